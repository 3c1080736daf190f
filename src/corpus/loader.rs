//! コーパス読み込み
//!
//! フォルダ内の JSON ファイルを1つずつアダプタに通して
//! レジストリを構築する。読み込みは起動時に一度だけ走る
//! 同期処理で、完了後のレジストリは読み取り専用。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::adapters::{self, RawCorpus};
use crate::corpus::Registry;
use crate::error::CorpusError;

/// 1つの JSON 文書をレジストリに取り込む
///
/// レコード単位の不備はスキップ集計に回るが、コーパス単位の異常
/// （形式不明・資格不明など）はこのコーパスを丸ごと中止する。
pub fn load_corpus_str(
    content: &str,
    origin: &str,
    registry: &mut Registry,
) -> crate::error::Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|source| CorpusError::JsonParse {
            path: origin.to_string(),
            source,
        })?;
    // 判別共用体に掛からない文書は形式不明として中止
    let raw: RawCorpus = serde_json::from_value(value).map_err(|_| CorpusError::UnknownFormat {
        path: origin.to_string(),
    })?;

    let out = adapters::adapt(raw, origin)?;

    let question_count = out.questions.len();
    let explanation_count = out.explanations.len();

    for question in out.questions {
        registry.insert_question(question, origin)?;
    }
    for record in out.explanations {
        registry.insert_explanation(record, origin);
    }
    registry.add_file_stats(out.skipped, out.unclassified);

    info!(
        "[{}] 取り込み完了: 問題 {} 件, 解説 {} 件, スキップ {} 件",
        origin, question_count, explanation_count, out.skipped
    );
    Ok(())
}

/// フォルダ内の全 JSON ファイルからレジストリを構築する
///
/// ファイル単位の解析失敗はそのコーパスの中止として記録し、
/// 残りの読み込みを続ける。ID衝突だけは全体を打ち切る。
pub fn load_corpus_dir(folder_path: &str) -> Result<Registry> {
    let folder = PathBuf::from(folder_path);
    if !folder.exists() {
        anyhow::bail!("フォルダが存在しません: {}", folder_path);
    }

    let mut json_files = Vec::new();
    let entries =
        fs::read_dir(&folder).with_context(|| format!("フォルダを読み取れません: {}", folder_path))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            json_files.push(path);
        }
    }
    // ログと統計を安定させるため名前順に処理する
    json_files.sort();

    info!("✓ {} 個のコーパスファイルを検出", json_files.len());

    let mut registry = Registry::new();

    for path in &json_files {
        let origin = file_name(path);
        info!("読み込み中: {}", origin);

        let content = fs::read_to_string(path).map_err(|source| CorpusError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        match load_corpus_str(&content, &origin, &mut registry) {
            Ok(()) => {}
            // ID衝突は一意性の不変条件を壊すため全体を中止する
            Err(e @ CorpusError::DuplicateIdentifier { .. }) => {
                return Err(e).context("コーパス読み込みを中止しました");
            }
            Err(e) => {
                error!("コーパス {} を中止しました: {}", origin, e);
            }
        }
    }

    registry.merge_explanations();

    let stats = registry.stats();
    info!(
        "📊 読み込み完了: ファイル {} / 問題 {} / 解説 {} (マージ {}, 未対応 {}) / スキップ {} / 未分類 {}",
        stats.files,
        stats.questions,
        stats.explanations,
        stats.merged,
        stats.unmatched_explanations,
        stats.skipped,
        stats.unclassified
    );

    Ok(registry)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
