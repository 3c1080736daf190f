//! 解説のみ形式アダプタ
//!
//! 問題本文とは別ファイルで執筆・管理される解説を
//! [`ExplanationRecord`] に変換する。`question_id` は問題側と
//! 同じ複合ID式で算出し、後段のマージで突き合わせる。

use serde::Deserialize;
use tracing::warn;

use super::{
    check_year_season, deserialize_opt_number_string, deserialize_year, normalize_difficulty,
    resolve_variant, AdapterOutput,
};
use crate::error::{CorpusError, Result};
use crate::ident;
use crate::models::{Certificate, ExplanationRecord};

#[derive(Debug, Deserialize)]
pub struct RawExplanationCorpus {
    pub metadata: RawExplanationMetadata,
    pub explanations: Vec<RawExplanation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExplanationMetadata {
    pub cert_id: String,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub season: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExplanation {
    /// 完成済みの複合ID。あればそのまま信用する
    #[serde(default)]
    pub question_id: Option<String>,
    /// 複合IDがない場合に使う問題番号
    #[serde(default, deserialize_with = "deserialize_opt_number_string")]
    pub question_number: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub explanation_detail: Option<String>,
    #[serde(default)]
    pub explanation_images: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub fn adapt(corpus: RawExplanationCorpus, origin: &str) -> Result<AdapterOutput> {
    let meta = &corpus.metadata;
    let cert =
        Certificate::from_id(&meta.cert_id).ok_or_else(|| CorpusError::UnknownCertificate {
            cert_id: meta.cert_id.clone(),
        })?;
    let variant = resolve_variant(cert, meta.fuel_type.as_deref())?;
    check_year_season(meta.year, meta.season)?;

    let mut out = AdapterOutput::default();

    for (pos, raw) in corpus.explanations.into_iter().enumerate() {
        // 中身が完全に空の解説はマージ対象にならないので落とす
        let has_content = !raw.explanation.is_empty()
            || raw.explanation_detail.is_some()
            || !raw.explanation_images.is_empty();
        if !has_content {
            warn!(
                "[{}] 解説レコード {} をスキップ: 内容が空です",
                origin,
                pos + 1
            );
            out.skipped += 1;
            continue;
        }

        let question_id = match raw.question_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                match raw
                    .question_number
                    .as_deref()
                    .and_then(ident::pad_question_number)
                {
                    Some(n) => ident::compose_id(cert, variant, meta.year, meta.season, &n),
                    None => {
                        warn!(
                            "[{}] 解説レコード {} をスキップ: 問題番号を解決できません",
                            origin,
                            pos + 1
                        );
                        out.skipped += 1;
                        continue;
                    }
                }
            }
        };

        out.explanations.push(ExplanationRecord {
            question_id,
            explanation: raw.explanation,
            explanation_detail: raw.explanation_detail,
            images: raw.explanation_images,
            difficulty: normalize_difficulty(raw.difficulty),
            tags: raw.tags,
        });
    }

    Ok(out)
}
