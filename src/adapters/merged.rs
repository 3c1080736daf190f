//! 統合形式アダプタ
//!
//! 問題と解説が同じレコードに同梱されている形式
//! （資格・年度・実施回ごとに1ファイル）。レコード側はほぼ
//! 完成形なので、ここでの仕事はファイルレベルのメタデータの
//! 押印と複合IDの合成、カテゴリIDの検証に限られる。

use serde::Deserialize;
use tracing::warn;

use super::{
    build_choices, check_year_season, deserialize_opt_number_string, deserialize_year,
    normalize_difficulty, resolve_variant, AdapterOutput,
};
use crate::error::{CorpusError, Result};
use crate::ident;
use crate::models::{Certificate, Question};
use crate::utils::logging::truncate_text;

#[derive(Debug, Deserialize)]
pub struct RawMergedCorpus {
    pub metadata: RawMergedMetadata,
    pub questions: Vec<RawMergedQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMergedMetadata {
    pub cert_id: String,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub season: u8,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMergedQuestion {
    #[serde(default, deserialize_with = "deserialize_opt_number_string")]
    pub question_number: Option<String>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub correct_answer: u8,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub explanation_detail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub fn adapt(corpus: RawMergedCorpus, origin: &str) -> Result<AdapterOutput> {
    let meta = &corpus.metadata;
    let cert =
        Certificate::from_id(&meta.cert_id).ok_or_else(|| CorpusError::UnknownCertificate {
            cert_id: meta.cert_id.clone(),
        })?;
    let variant = resolve_variant(cert, meta.fuel_type.as_deref())?;
    check_year_season(meta.year, meta.season)?;

    let mut out = AdapterOutput::default();

    for (pos, raw) in corpus.questions.into_iter().enumerate() {
        // 必須項目: 本文（問題文・要約・テーマのいずれか）と選択肢
        let has_body = !raw.question.is_empty() || !raw.summary.is_empty() || !raw.theme.is_empty();
        let choices = build_choices(raw.choices);
        if !has_body || choices.is_none() {
            warn!(
                "[{}] レコード {} をスキップ: 必須項目の欠落 ({})",
                origin,
                pos + 1,
                truncate_text(&raw.question, 40)
            );
            out.skipped += 1;
            continue;
        }
        let choices = choices.unwrap_or_default();

        if !(1..=choices.len() as u8).contains(&raw.correct_answer) {
            warn!(
                "[{}] レコード {} をスキップ: 正答番号が不正 ({})",
                origin,
                pos + 1,
                raw.correct_answer
            );
            out.skipped += 1;
            continue;
        }

        let question_number = match raw
            .question_number
            .as_deref()
            .and_then(ident::pad_question_number)
        {
            Some(n) => n,
            None => {
                warn!(
                    "[{}] レコード {} をスキップ: 問題番号を解決できません",
                    origin,
                    pos + 1
                );
                out.skipped += 1;
                continue;
            }
        };

        // カテゴリIDはレコード持ち。資格に属さないIDは既定カテゴリに退避
        let category_id = if cert.has_category(&raw.category_id) {
            raw.category_id
        } else {
            warn!(
                "[{}] 問題 {} のカテゴリ '{}' は {} に属しません。既定カテゴリ '{}' に割り当てます",
                origin,
                question_number,
                raw.category_id,
                cert.id(),
                cert.default_category()
            );
            out.unclassified += 1;
            cert.default_category().to_string()
        };

        let id = ident::compose_id(cert, variant, meta.year, meta.season, &question_number);

        out.questions.push(Question {
            id,
            certificate_id: cert.id().to_string(),
            year: meta.year,
            season: meta.season,
            category_id,
            question_number,
            question: raw.question,
            summary: raw.summary,
            theme: raw.theme,
            choices,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
            explanation_detail: raw.explanation_detail,
            images: raw.images,
            difficulty: normalize_difficulty(raw.difficulty),
            tags: raw.tags,
            source: meta.source.clone(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_corpus() -> RawMergedCorpus {
        serde_json::from_str(
            r#"{
                "metadata": {"certId": "auto-mechanic-1", "year": "2023", "season": 2, "source": "第107回登録試験"},
                "questions": [
                    {
                        "questionNumber": 1,
                        "categoryId": "engine",
                        "question": "電子制御式燃料噴射装置に関する記述として適切なものはどれか",
                        "choices": ["A", "B", "C", "D"],
                        "correctAnswer": 3,
                        "explanation": "インジェクタの噴射時間はECUが決定する"
                    },
                    {
                        "questionNumber": 2,
                        "categoryId": "存在しない区分",
                        "question": "次の記述のうち適切なものはどれか",
                        "choices": ["A", "B"],
                        "correctAnswer": 1,
                        "explanation": ""
                    },
                    {
                        "questionNumber": 3,
                        "categoryId": "law",
                        "question": "",
                        "choices": [],
                        "correctAnswer": 1,
                        "explanation": "本文欠落のためスキップされる"
                    }
                ]
            }"#,
        )
        .expect("統合形式のサンプルが解析できるはず")
    }

    #[test]
    fn test_metadata_stamped_and_id_synthesized() {
        let out = adapt(sample_corpus(), "test.json").unwrap();
        let q = &out.questions[0];
        assert_eq!(q.id, "auto-mechanic-1-2023-2-001");
        assert_eq!(q.certificate_id, "auto-mechanic-1");
        assert_eq!(q.year, 2023);
        assert_eq!(q.season, 2);
        assert_eq!(q.source, "第107回登録試験");
        assert_eq!(q.explanation, "インジェクタの噴射時間はECUが決定する");
    }

    #[test]
    fn test_unknown_category_falls_back_with_warning_count() {
        let out = adapt(sample_corpus(), "test.json").unwrap();
        assert_eq!(out.unclassified, 1);
        assert_eq!(out.questions[1].category_id, "engine");
    }

    #[test]
    fn test_missing_body_is_skipped_not_fatal() {
        let out = adapt(sample_corpus(), "test.json").unwrap();
        assert_eq!(out.questions.len(), 2);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_unknown_certificate_is_corpus_error() {
        let mut corpus = sample_corpus();
        corpus.metadata.cert_id = "forklift-1".to_string();
        assert!(adapt(corpus, "test.json").is_err());
    }
}
