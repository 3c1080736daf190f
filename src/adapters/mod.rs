//! スキーマアダプタ層
//!
//! 互換性のない3つのレガシー入力形式を、それぞれ専用のアダプタで
//! 正規化済みエンティティへ変換する。形式の判別はアダプタ境界の
//! 判別共用体（[`RawCorpus`]）で行い、読み込みコードに形式の
//! 嗅ぎ分けを散らばらせない。
//!
//! 失敗方針: 任意項目の欠落は空値で補い、決して失敗させない。
//! 必須項目（問題本文と選択肢リスト）を欠くレコードだけを
//! ログ付きスキップとして落とす。

use serde::Deserialize;

use crate::error::{CorpusError, Result};
use crate::models::{Certificate, Choice, ExplanationRecord, Question, Variant};

pub mod explanation_only;
pub mod merged;
pub mod question_only;

/// 生のコーパス文書（形式ごとの判別共用体）
///
/// - 統合形式: `metadata` + `questions`（解説同梱）
/// - 問題のみ形式: `category` + `questions`
/// - 解説のみ形式: `metadata` + `explanations`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawCorpus {
    Merged(merged::RawMergedCorpus),
    QuestionOnly(question_only::RawQuestionOnlyCorpus),
    ExplanationOnly(explanation_only::RawExplanationCorpus),
}

/// アダプタ1回分の出力
#[derive(Debug, Default)]
pub struct AdapterOutput {
    pub questions: Vec<Question>,
    pub explanations: Vec<ExplanationRecord>,
    /// 必須項目欠落・番号解決不能でスキップした件数
    pub skipped: usize,
    /// 既定カテゴリに落ちた件数（要データ確認）
    pub unclassified: usize,
}

/// 形式を判別して対応するアダプタに委譲する
pub fn adapt(raw: RawCorpus, origin: &str) -> Result<AdapterOutput> {
    match raw {
        RawCorpus::Merged(corpus) => merged::adapt(corpus, origin),
        RawCorpus::QuestionOnly(corpus) => question_only::adapt(corpus, origin),
        RawCorpus::ExplanationOnly(corpus) => explanation_only::adapt(corpus, origin),
    }
}

/// 資格と fuelType 文字列から受験区分を解決する
///
/// 区分を持たない資格では fuelType を無視して `None` を返す。
/// 区分あり資格で解決できない場合はコーパス単位のエラー。
pub(crate) fn resolve_variant(
    cert: Certificate,
    fuel_type: Option<&str>,
) -> Result<Option<Variant>> {
    if !cert.has_variants() {
        return Ok(None);
    }
    fuel_type
        .and_then(Variant::find)
        .map(Some)
        .ok_or_else(|| CorpusError::UnknownVariant {
            cert_id: cert.id().to_string(),
            fuel_type: fuel_type.map(|s| s.to_string()),
        })
}

/// 年度（4桁）と実施回（1 or 2）の検証
pub(crate) fn check_year_season(year: i32, season: u8) -> Result<()> {
    if !(1000..=9999).contains(&year) || !(season == 1 || season == 2) {
        return Err(CorpusError::InvalidYearSeason {
            value: format!("{}-{}", year, season),
        });
    }
    Ok(())
}

/// 表示文字列の選択肢リストを位置ベースの連番付き選択肢に変換する
///
/// 空リスト・5件以上は不正形として `None`。
pub(crate) fn build_choices(texts: Vec<String>) -> Option<Vec<Choice>> {
    if texts.is_empty() || texts.len() > 4 {
        return None;
    }
    Some(
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Choice {
                number: (i + 1) as u8,
                text,
            })
            .collect(),
    )
}

/// 難易度を 1〜5 に制限する（範囲外は未設定扱い）
pub(crate) fn normalize_difficulty(difficulty: Option<u8>) -> Option<u8> {
    difficulty.filter(|d| (1..=5).contains(d))
}

/// 年度を文字列・整数のどちらからでも読む
///
/// 古いコーパスでは `"2023"` と `2023` の両方の表記が混在している。
pub(crate) fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = i32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a year")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value.trim().parse().map_err(E::custom)
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            i32::try_from(value).map_err(E::custom)
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            i32::try_from(value).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// 番号項目を文字列・整数・null のどれからでも読む
pub(crate) fn deserialize_opt_number_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct NumberStringVisitor;

    impl<'de> Visitor<'de> for NumberStringVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, integer, or null")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberStringVisitor)
}
