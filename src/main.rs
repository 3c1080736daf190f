use anyhow::Result;

use seibishi_corpus::utils::logging;
use seibishi_corpus::{load_corpus_dir, Config};

fn main() -> Result<()> {
    // 設定読み込みとログ初期化
    let config = Config::from_env();
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    // パイプライン実行
    let registry = load_corpus_dir(&config.corpus_folder)?;

    // 統計出力
    logging::print_final_stats(registry.stats());
    logging::write_report(registry.stats(), &config.report_file)?;

    Ok(())
}
