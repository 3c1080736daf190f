//! キーワード分類器（車体整備士向け）
//!
//! 出題区分が固定されていない資格では、問題文と全選択肢を連結・
//! 小文字化した本文に対し、優先順に並べた規則を先勝ちで評価する。
//!
//! キーワード集合は互いに排他ではない（例: ECU制御のABSに関する
//! 問題は電装規則にも車体規則にも掛かり得る）。順序が唯一の
//! 優先解決手段なので、この並びは変更しないこと:
//! 法規 > 図面 > 工具 > 材料 > 整備 > 診断 > 電装 > 既定(車体構造)

/// 1カテゴリ分のキーワード規則
///
/// キーワードは小文字で宣言する（本文側を小文字化して照合する）。
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

/// 優先順の規則リスト。先頭から評価し、最初に一致した規則で確定。
pub static BODY_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "law",
        keywords: &["道路運送車両法", "保安基準", "道路交通法", "車両法", "罰則"],
    },
    KeywordRule {
        category: "drawing",
        keywords: &["図面", "製図", "三角法", "投影"],
    },
    KeywordRule {
        category: "tools",
        keywords: &["工具", "スパナ", "レンチ", "測定器", "ノギス", "マイクロメータ"],
    },
    KeywordRule {
        category: "materials",
        keywords: &["材料", "鋼板", "塗料", "アルミ", "樹脂", "溶接"],
    },
    KeywordRule {
        category: "maintenance",
        keywords: &["点検", "整備", "修理", "交換", "締め付け"],
    },
    KeywordRule {
        category: "diagnosis",
        keywords: &["故障", "診断", "テスタ", "不具合", "原因"],
    },
    KeywordRule {
        category: "electrics",
        keywords: &["ecu", "センサ", "電気", "電装", "バッテリ", "abs", "エアバッグ"],
    },
];

/// 問題文と選択肢からカテゴリを引く
///
/// どの規則にも一致しなければ `None`（呼び出し側が既定カテゴリを
/// 割り当て、データ品質の警告を出す）。
pub fn classify(question: &str, choices: &[String]) -> Option<&'static str> {
    let mut haystack = question.to_lowercase();
    for choice in choices {
        haystack.push(' ');
        haystack.push_str(&choice.to_lowercase());
    }

    BODY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| haystack.contains(k)))
        .map(|rule| rule.category)
}
