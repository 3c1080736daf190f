//! 問題のみ形式アダプタ
//!
//! 下位級コーパスの大半を占める、解説を持たない形式。
//! レコードごとに以下を行う:
//! - 選択肢の `"(n)."` 接頭辞を剥がし、位置ベースで連番を振る
//! - 問題番号を3段階フォールバックで解決する（`ident` 参照）
//! - 問題文先頭の `"Q<数字>. "` 接頭辞を取り除く
//! - 資格に応じた分類器（範囲 or キーワード）でカテゴリを決める
//!
//! 解説は空のまま残し、後段の解説マージに委ねる。

use serde::Deserialize;
use tracing::warn;

use super::{build_choices, deserialize_opt_number_string, AdapterOutput};
use crate::classify::{keyword, range};
use crate::error::{CorpusError, Result};
use crate::ident;
use crate::models::{Certificate, Question};
use crate::utils::logging::truncate_text;
use regex::Regex;

#[derive(Debug, Deserialize)]
pub struct RawQuestionOnlyCorpus {
    pub category: RawFileCategory,
    pub questions: Vec<RawQuestionOnly>,
}

/// ファイルレベルのメタデータ（この形式では `category` と呼ばれる）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFileCategory {
    /// 級（"2"・"3"・"body"。古いファイルは整数表記）
    #[serde(default, deserialize_with = "deserialize_opt_number_string")]
    pub level: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    /// `"YYYY-S"` 形式（例: `"2024-1"`）
    pub year: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestionOnly {
    /// 自由形式の番号表記（例: `"No.12"`）。欠落・空可
    #[serde(default, deserialize_with = "deserialize_opt_number_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
    /// 1始まりの正答番号
    #[serde(default)]
    pub answer_index: u8,
    #[serde(default)]
    pub images: Vec<String>,
}

pub fn adapt(corpus: RawQuestionOnlyCorpus, origin: &str) -> Result<AdapterOutput> {
    let meta = &corpus.category;
    let cert = certificate_for_level(meta.level.as_deref()).ok_or_else(|| {
        CorpusError::UnknownCertificate {
            cert_id: meta.level.clone().unwrap_or_default(),
        }
    })?;
    let variant = super::resolve_variant(cert, meta.fuel_type.as_deref())?;
    let (year, season) = parse_year_season(&meta.year)?;

    let choice_prefix_re = Regex::new(r"^\((\d)\)\.\s*")?;
    let stem_prefix_re = Regex::new(r"^Q\d+\.\s*")?;
    let embedded_number_re = ident::embedded_number_regex()?;

    let mut out = AdapterOutput::default();

    for (pos, raw) in corpus.questions.into_iter().enumerate() {
        let position = pos + 1;

        let question_number = match ident::resolve_question_number(
            raw.id.as_deref(),
            &raw.question,
            position,
            &embedded_number_re,
        ) {
            Some(n) => n,
            None => {
                warn!(
                    "[{}] レコード {} をスキップ: 問題番号を解決できません ({})",
                    origin,
                    position,
                    truncate_text(&raw.question, 40)
                );
                out.skipped += 1;
                continue;
            }
        };

        let question = stem_prefix_re.replace(&raw.question, "").into_owned();

        let stripped: Vec<String> = raw
            .choices
            .iter()
            .map(|c| strip_choice_prefix(&choice_prefix_re, c))
            .collect();
        let choices = build_choices(stripped);

        if question.is_empty() || choices.is_none() {
            warn!(
                "[{}] レコード {} をスキップ: 必須項目の欠落",
                origin, position
            );
            out.skipped += 1;
            continue;
        }
        let choices = choices.unwrap_or_default();

        if !(1..=choices.len() as u8).contains(&raw.answer_index) {
            warn!(
                "[{}] レコード {} をスキップ: 正答番号が不正 ({})",
                origin, position, raw.answer_index
            );
            out.skipped += 1;
            continue;
        }

        let category_id = classify(cert, &question_number, &question, &choices, origin, &mut out);
        let id = ident::compose_id(cert, variant, year, season, &question_number);

        out.questions.push(Question {
            id,
            certificate_id: cert.id().to_string(),
            year,
            season,
            category_id,
            question_number,
            question,
            summary: String::new(),
            theme: String::new(),
            choices,
            correct_answer: raw.answer_index,
            // 解説は別ファイル管理。マージが走らないコーパスでは空のまま
            explanation: String::new(),
            explanation_detail: None,
            images: raw.images,
            difficulty: None,
            tags: vec![],
            source: meta.source.clone(),
        });
    }

    Ok(out)
}

/// 資格に応じた分類器を選択してカテゴリを決める
fn classify(
    cert: Certificate,
    question_number: &str,
    question: &str,
    choices: &[crate::models::Choice],
    origin: &str,
    out: &mut AdapterOutput,
) -> String {
    let resolved = if let Some(table) = range::table_for(cert) {
        question_number
            .parse::<u32>()
            .ok()
            .and_then(|n| range::classify(table, n))
    } else {
        let texts: Vec<String> = choices.iter().map(|c| c.text.clone()).collect();
        keyword::classify(question, &texts)
    };

    match resolved {
        Some(category) => category.to_string(),
        None => {
            warn!(
                "[{}] 問題 {} を分類できません。既定カテゴリ '{}' に割り当てます",
                origin,
                question_number,
                cert.default_category()
            );
            out.unclassified += 1;
            cert.default_category().to_string()
        }
    }
}

/// `category.level` から資格を解決する
fn certificate_for_level(level: Option<&str>) -> Option<Certificate> {
    match level? {
        "1" => Some(Certificate::AutoMechanic1),
        "2" => Some(Certificate::AutoMechanic2),
        "3" => Some(Certificate::AutoMechanic3),
        "body" => Some(Certificate::AutoBody),
        _ => None,
    }
}

/// `"YYYY-S"` を (年度, 実施回) に分解する
fn parse_year_season(value: &str) -> Result<(i32, u8)> {
    let invalid = || CorpusError::InvalidYearSeason {
        value: value.to_string(),
    };
    let (y, s) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let season: u8 = s.parse().map_err(|_| invalid())?;
    super::check_year_season(year, season)?;
    Ok((year, season))
}

/// 選択肢の `"(n)."` 接頭辞を取り除いて表示文字列を得る
pub fn strip_choice_prefix(re: &Regex, choice: &str) -> String {
    re.replace(choice, "").into_owned()
}

/// 表示文字列に接頭辞を付け直す（`strip_choice_prefix` の逆操作）
pub fn prefix_choice(number: u8, text: &str) -> String {
    format!("({}). {}", number, text)
}
