//! # Seibishi Corpus
//!
//! 整備士試験問題コーパスの取り込み・正規化パイプライン
//!
//! 複数の互換性のないレガシー JSON 形式で出力された試験問題を、
//! 一貫したID・科目カテゴリ・解説を持つ単一の `Question`
//! コレクションへ正規化する。
//!
//! ## 構成
//!
//! データは下から上へ一方向に流れる:
//!
//! ### ① スキーマアダプタ層
//! - `adapters/` - 形式ごとの変換器（統合・問題のみ・解説のみ）
//!
//! ### ② 正規化層
//! - `ident` - 複合ID生成と問題番号のフォールバック解決
//! - `classify/` - 範囲表分類器とキーワード分類器
//!
//! ### ③ コーパス層
//! - `corpus/loader` - フォルダ走査とファイル単位の取り込み
//! - `corpus/registry` - 所有コレクション・解説マージ・問い合わせ層
//!
//! パイプラインはプロセス起動時に一度だけ同期実行される純粋変換で、
//! 完了後のレジストリは読み取り専用。

pub mod adapters;
pub mod classify;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ident;
pub mod models;
pub mod utils;

// よく使う型の再エクスポート
pub use config::Config;
pub use corpus::{load_corpus_dir, load_corpus_str, LoadStats, QuestionFilter, Registry};
pub use error::{CorpusError, Result};
pub use models::{Category, Certificate, Choice, ExplanationRecord, Question, Variant};
