//! カテゴリ分類
//!
//! 資格ごとに2つの戦略を使い分ける:
//! - 出題区分が規程で固定されている資格 → 問題番号の範囲表（`range`）
//! - 出題区分が固定されていない資格 → キーワード規則の優先順リスト（`keyword`）

pub mod keyword;
pub mod range;
