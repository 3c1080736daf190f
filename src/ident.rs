//! 複合ID生成
//!
//! 形式: `{certId}[-{variantCode}]-{year}-{season}-{questionNumber}`
//!
//! この形式はレンダリング層のURLパス
//! (`/{certSlug}/{year}/{season}/{categorySlug}/{questionId}`)
//! と契約関係にあるため変更しないこと。

use crate::models::{Certificate, Variant};
use regex::Regex;

/// 複合IDを組み立てる
///
/// `question_number` は [`pad_question_number`] 済みの3桁文字列を渡す。
pub fn compose_id(
    cert: Certificate,
    variant: Option<Variant>,
    year: i32,
    season: u8,
    question_number: &str,
) -> String {
    match variant {
        Some(v) => format!(
            "{}-{}-{}-{}-{}",
            cert.id(),
            v.code(),
            year,
            season,
            question_number
        ),
        None => format!("{}-{}-{}-{}", cert.id(), year, season, question_number),
    }
}

/// IDが指定資格のものか（複合IDの接頭辞一致）
pub fn belongs_to_certificate(id: &str, cert: Certificate) -> bool {
    id.strip_prefix(cert.id())
        .map(|rest| rest.starts_with('-'))
        .unwrap_or(false)
}

/// 問題番号文字列を3桁ゼロ埋めに正規化する
///
/// `"No.12"` のような数字以外の接頭辞は取り除く。
/// 数字が含まれない、または 1〜999 の範囲外なら `None`。
pub fn pad_question_number(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let n: u32 = digits.parse().ok()?;
    if !(1..=999).contains(&n) {
        return None;
    }
    Some(format!("{:03}", n))
}

/// 問題番号の3段階フォールバック解決
///
/// 1. 明示的な `id` フィールド（数字以外の接頭辞を除去してゼロ埋め）
/// 2. 問題文中の最初の `No.<数字>` をゼロ埋め
/// 3. ファイル内の1始まり位置
///
/// 先に成立した規則が勝ち、以降の規則は試行しない。
/// 3段階すべて失敗した場合は `None`（レコードはスキップ対象）。
pub fn resolve_question_number(
    explicit_id: Option<&str>,
    question: &str,
    position: usize,
    embedded_number_re: &Regex,
) -> Option<String> {
    // (a) 明示ID
    if let Some(id) = explicit_id {
        if !id.is_empty() {
            if let Some(padded) = pad_question_number(id) {
                return Some(padded);
            }
        }
    }

    // (b) 問題文中の No.<数字>
    if let Some(caps) = embedded_number_re.captures(question) {
        if let Some(m) = caps.get(1) {
            if let Some(padded) = pad_question_number(m.as_str()) {
                return Some(padded);
            }
        }
    }

    // (c) ファイル内位置
    pad_question_number(&position.to_string())
}

/// 問題文中の `No.<数字>` を拾う正規表現
pub fn embedded_number_regex() -> Result<Regex, regex::Error> {
    Regex::new(r"No\.(\d+)")
}
