//! レジストリ
//!
//! 読み込み済みコーパスの保持と、解説マージ・問い合わせ層を提供する。
//! 構築は読み込みプロセスが一度だけ行い、以降は読み取り専用。

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CorpusError, Result};
use crate::ident;
use crate::models::{Category, Certificate, ExplanationRecord, Question};

/// 読み込み統計
#[derive(Debug, Default, Clone)]
pub struct LoadStats {
    pub files: usize,
    pub questions: usize,
    pub explanations: usize,
    /// 必須項目欠落・番号解決不能で落としたレコード数
    pub skipped: usize,
    /// 既定カテゴリに退避した件数（要データ確認）
    pub unclassified: usize,
    /// 解説マージが成立した問題数
    pub merged: usize,
    /// 対応する問題が見つからなかった解説数
    pub unmatched_explanations: usize,
}

/// 問題一覧の絞り込み条件
///
/// 指定しなかった条件は「制約なし」。複数指定はAND結合。
#[derive(Debug, Default, Clone)]
pub struct QuestionFilter {
    pub year: Option<i32>,
    pub season: Option<u8>,
    pub category_id: Option<String>,
}

impl QuestionFilter {
    fn matches(&self, q: &Question) -> bool {
        self.year.map_or(true, |y| q.year == y)
            && self.season.map_or(true, |s| q.season == s)
            && self
                .category_id
                .as_deref()
                .map_or(true, |c| q.category_id == c)
    }
}

/// 読み込み済みコーパス全体を所有するレジストリ
#[derive(Debug, Default)]
pub struct Registry {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
    explanations: Vec<ExplanationRecord>,
    explanation_by_id: HashMap<String, usize>,
    stats: LoadStats,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 問題を登録する
    ///
    /// 複合IDの衝突は元データの欠陥であり、静かに上書き・重複排除
    /// してはならない。必ずエラーで読み込みを打ち切る。
    pub(crate) fn insert_question(&mut self, question: Question, origin: &str) -> Result<()> {
        if self.by_id.contains_key(&question.id) {
            return Err(CorpusError::DuplicateIdentifier {
                id: question.id,
                origin: origin.to_string(),
            });
        }
        self.by_id.insert(question.id.clone(), self.questions.len());
        self.questions.push(question);
        self.stats.questions += 1;
        Ok(())
    }

    /// 解説レコードを登録する
    ///
    /// 同一 `question_id` の解説はコーパス全体で高々1件の想定。
    /// 2件目以降はデータ欠陥として警告し、先勝ちで無視する。
    pub(crate) fn insert_explanation(&mut self, record: ExplanationRecord, origin: &str) {
        if self.explanation_by_id.contains_key(&record.question_id) {
            warn!(
                "[{}] 解説 {} が重複しています。後から来たものを無視します",
                origin, record.question_id
            );
            self.stats.skipped += 1;
            return;
        }
        self.explanation_by_id
            .insert(record.question_id.clone(), self.explanations.len());
        self.explanations.push(record);
        self.stats.explanations += 1;
    }

    pub(crate) fn add_file_stats(&mut self, skipped: usize, unclassified: usize) {
        self.stats.files += 1;
        self.stats.skipped += skipped;
        self.stats.unclassified += unclassified;
    }

    /// 解説マージ（IDによる左結合）
    ///
    /// 解説ごとに同一IDの問題を探し、見つかれば解説本文を上書きし
    /// 画像リストを連結する（問題側の画像が先）。既に取り込んだ
    /// 画像は追加しないため、再実行しても結果は変わらない。
    /// 対応する問題を持たない解説はエラーではなく集計のみ。
    pub fn merge_explanations(&mut self) {
        let mut merged = 0;
        let mut unmatched = 0;

        for record in &self.explanations {
            let Some(&index) = self.by_id.get(&record.question_id) else {
                debug!("解説 {} に対応する問題がありません", record.question_id);
                unmatched += 1;
                continue;
            };
            let question = &mut self.questions[index];
            question.explanation = record.explanation.clone();
            question.explanation_detail = record.explanation_detail.clone();
            for image in &record.images {
                if !question.images.contains(image) {
                    question.images.push(image.clone());
                }
            }
            merged += 1;
        }

        self.stats.merged = merged;
        self.stats.unmatched_explanations = unmatched;
    }

    // ========== 問い合わせ層 ==========

    /// IDで問題を引く（見つからなければ `None`、決して panic しない）
    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    /// IDで解説を引く
    pub fn find_explanation(&self, id: &str) -> Option<&ExplanationRecord> {
        self.explanation_by_id.get(id).map(|&i| &self.explanations[i])
    }

    /// 資格の問題一覧（絞り込み条件はAND結合）
    pub fn questions_for_certificate(
        &self,
        cert: Certificate,
        filter: &QuestionFilter,
    ) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.certificate_id == cert.id() && filter.matches(q))
            .collect()
    }

    /// 資格のカテゴリ一覧（宣言順）
    pub fn categories_for_certificate(cert: Certificate) -> &'static [Category] {
        cert.categories()
    }

    /// 資格の解説一覧（複合IDの接頭辞一致）
    pub fn explanations_for_certificate(&self, cert: Certificate) -> Vec<&ExplanationRecord> {
        self.explanations
            .iter()
            .filter(|e| ident::belongs_to_certificate(&e.question_id, cert))
            .collect()
    }

    /// 全問題（読み取り専用ビュー）
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, year: i32, season: u8, category: &str) -> Question {
        Question {
            id: id.to_string(),
            certificate_id: "auto-mechanic-3".to_string(),
            year,
            season,
            category_id: category.to_string(),
            question_number: id.rsplit('-').next().unwrap_or("001").to_string(),
            question: "テスト問題".to_string(),
            summary: String::new(),
            theme: String::new(),
            choices: vec![],
            correct_answer: 1,
            explanation: String::new(),
            explanation_detail: None,
            images: vec!["q.png".to_string()],
            difficulty: None,
            tags: vec![],
            source: String::new(),
        }
    }

    fn explanation(question_id: &str) -> ExplanationRecord {
        ExplanationRecord {
            question_id: question_id.to_string(),
            explanation: "解説本文".to_string(),
            explanation_detail: Some("詳細".to_string()),
            images: vec!["e.png".to_string()],
            difficulty: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_duplicate_question_id_is_fatal() {
        let mut reg = Registry::new();
        reg.insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "a.json")
            .unwrap();
        let err = reg
            .insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "b.json")
            .unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn test_merge_overwrites_text_and_appends_images() {
        let mut reg = Registry::new();
        reg.insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "a.json")
            .unwrap();
        reg.insert_explanation(explanation("auto-mechanic-3-G-2024-1-001"), "e.json");
        reg.merge_explanations();

        let q = reg.find_question("auto-mechanic-3-G-2024-1-001").unwrap();
        assert_eq!(q.explanation, "解説本文");
        assert_eq!(q.explanation_detail.as_deref(), Some("詳細"));
        // 問題側の画像が先、解説側の画像が後
        assert_eq!(q.images, vec!["q.png".to_string(), "e.png".to_string()]);
        assert_eq!(reg.stats().merged, 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut reg = Registry::new();
        reg.insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "a.json")
            .unwrap();
        reg.insert_explanation(explanation("auto-mechanic-3-G-2024-1-001"), "e.json");
        reg.merge_explanations();
        let first = reg.find_question("auto-mechanic-3-G-2024-1-001").unwrap().clone();

        reg.merge_explanations();
        let second = reg.find_question("auto-mechanic-3-G-2024-1-001").unwrap();
        assert_eq!(second.explanation, first.explanation);
        assert_eq!(second.images, first.images);
    }

    #[test]
    fn test_unmatched_explanation_is_not_an_error() {
        let mut reg = Registry::new();
        reg.insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "a.json")
            .unwrap();
        reg.insert_explanation(explanation("auto-mechanic-3-G-2024-1-099"), "e.json");
        reg.merge_explanations();

        // 問題側は空の解説のまま（有効な終端状態）
        let q = reg.find_question("auto-mechanic-3-G-2024-1-001").unwrap();
        assert!(q.explanation.is_empty());
        assert_eq!(reg.stats().unmatched_explanations, 1);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut reg = Registry::new();
        reg.insert_question(question("auto-mechanic-3-G-2024-1-001", 2024, 1, "engine"), "a.json")
            .unwrap();
        reg.insert_question(question("auto-mechanic-3-G-2024-2-001", 2024, 2, "engine"), "a.json")
            .unwrap();
        reg.insert_question(question("auto-mechanic-3-G-2023-1-021", 2023, 1, "chassis"), "a.json")
            .unwrap();

        let all = reg.questions_for_certificate(
            Certificate::AutoMechanic3,
            &QuestionFilter::default(),
        );
        assert_eq!(all.len(), 3);

        let filtered = reg.questions_for_certificate(
            Certificate::AutoMechanic3,
            &QuestionFilter {
                year: Some(2024),
                season: Some(1),
                category_id: Some("engine".to_string()),
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "auto-mechanic-3-G-2024-1-001");

        // 別資格には何も返さない
        let other = reg.questions_for_certificate(
            Certificate::AutoMechanic2,
            &QuestionFilter::default(),
        );
        assert!(other.is_empty());
    }

    #[test]
    fn test_find_returns_none_for_unknown_id() {
        let reg = Registry::new();
        assert!(reg.find_question("auto-body-2024-1-001").is_none());
        assert!(reg.find_explanation("auto-body-2024-1-001").is_none());
    }

    #[test]
    fn test_explanations_for_certificate_prefix_match() {
        let mut reg = Registry::new();
        reg.insert_explanation(explanation("auto-mechanic-3-G-2024-1-001"), "e.json");
        reg.insert_explanation(explanation("auto-mechanic-2-D-2024-1-001"), "e.json");

        let m3 = reg.explanations_for_certificate(Certificate::AutoMechanic3);
        assert_eq!(m3.len(), 1);
        assert_eq!(m3[0].question_id, "auto-mechanic-3-G-2024-1-001");
    }
}
