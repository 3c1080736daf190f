/// ログ工具モジュール
///
/// tracing の初期化と、読み込みレポートの整形・出力を提供する
use std::fs;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::corpus::LoadStats;

/// tracing サブスクライバを初期化する
///
/// `RUST_LOG` が未設定なら info（詳細ログ指定時は debug）レベル。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 起動情報を記録する
pub fn log_startup(config: &Config) {
    tracing::info!("{}", "=".repeat(60));
    tracing::info!("🚀 起動 - 問題コーパス取り込みパイプライン");
    tracing::info!("📁 コーパスフォルダ: {}", config.corpus_folder);
    tracing::info!("{}", "=".repeat(60));
}

/// 最終統計を表示する
pub fn print_final_stats(stats: &LoadStats) {
    tracing::info!("{}", "=".repeat(60));
    tracing::info!("📊 取り込み統計");
    tracing::info!(
        "完了時刻: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!("✅ ファイル: {}", stats.files);
    tracing::info!("✅ 問題: {} / 解説: {}", stats.questions, stats.explanations);
    tracing::info!(
        "🔗 解説マージ: {} / 未対応: {}",
        stats.merged,
        stats.unmatched_explanations
    );
    tracing::info!("⚠️ スキップ: {} / 未分類: {}", stats.skipped, stats.unclassified);
    tracing::info!("{}", "=".repeat(60));
}

/// 読み込みレポートをファイルに書き出す
pub fn write_report(stats: &LoadStats, report_path: &str) -> Result<()> {
    let report = format!(
        "{}\nコーパス取り込みレポート - {}\n{}\n\n\
         ファイル数:       {}\n\
         問題数:           {}\n\
         解説数:           {}\n\
         解説マージ成立:   {}\n\
         解説未対応:       {}\n\
         スキップ:         {}\n\
         未分類（要確認）: {}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60),
        stats.files,
        stats.questions,
        stats.explanations,
        stats.merged,
        stats.unmatched_explanations,
        stats.skipped,
        stats.unclassified
    );
    fs::write(report_path, report)?;
    tracing::info!("レポートを保存しました: {}", report_path);
    Ok(())
}

/// 長い本文をログ表示用に切り詰める
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
