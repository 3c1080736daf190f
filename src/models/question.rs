use serde::{Deserialize, Serialize};

/// 選択肢
///
/// `number` は 1〜4 の連番。欠番・重複なしが不変条件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub number: u8,
    pub text: String,
}

/// 正規化済みの問題レコード
///
/// スキーマアダプタが一度だけ構築する。構築後に変更されるのは
/// 解説マージによる `explanation` / `explanation_detail` /
/// `images` のみで、それ以外のフィールドは凍結扱い。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 複合ID（例: `auto-mechanic-3-G-2024-1-003`）
    pub id: String,
    pub certificate_id: String,
    pub year: i32,
    /// 実施回（1 or 2）
    pub season: u8,
    pub category_id: String,
    /// 3桁ゼロ埋めの問題番号文字列
    pub question_number: String,
    /// 問題文
    pub question: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub theme: String,
    pub choices: Vec<Choice>,
    /// 正答（1〜4）
    pub correct_answer: u8,
    #[serde(default)]
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_detail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// 難易度（1〜5）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 出典表記
    #[serde(default)]
    pub source: String,
}

/// 独立管理される解説レコード
///
/// `question_id` は問題側と同じ複合ID式で算出する。
/// 同一コーパス内で同じ `question_id` を持つ解説は高々1件。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRecord {
    pub question_id: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_detail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// レンダリング層が期待する camelCase のフィールド名で出力されること
    #[test]
    fn test_question_serializes_camel_case() {
        let q = Question {
            id: "auto-body-2024-1-001".to_string(),
            certificate_id: "auto-body".to_string(),
            year: 2024,
            season: 1,
            category_id: "structure".to_string(),
            question_number: "001".to_string(),
            question: "フレーム修正に関する記述として".to_string(),
            summary: String::new(),
            theme: String::new(),
            choices: vec![Choice {
                number: 1,
                text: "記述A".to_string(),
            }],
            correct_answer: 1,
            explanation: String::new(),
            explanation_detail: None,
            images: vec![],
            difficulty: None,
            tags: vec![],
            source: String::new(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["certificateId"], "auto-body");
        assert_eq!(json["categoryId"], "structure");
        assert_eq!(json["questionNumber"], "001");
        assert_eq!(json["correctAnswer"], 1);
        // 未設定の難易度は出力に含めない
        assert!(json.get("difficulty").is_none());
    }

    #[test]
    fn test_explanation_record_round_trip() {
        let raw = r#"{
            "questionId": "auto-mechanic-2-D-2022-2-037",
            "explanation": "車両総重量の算出方法",
            "images": ["a.png"]
        }"#;
        let record: ExplanationRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.question_id, "auto-mechanic-2-D-2022-2-037");
        assert!(record.explanation_detail.is_none());
        assert_eq!(record.images, vec!["a.png".to_string()]);
    }
}
