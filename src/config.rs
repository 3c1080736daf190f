/// 実行時設定
#[derive(Clone, Debug)]
pub struct Config {
    /// コーパス JSON ファイルの置き場所
    pub corpus_folder: String,
    /// 詳細ログを出すか
    pub verbose_logging: bool,
    /// 読み込みレポートの出力先
    pub report_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_folder: "corpus_json".to_string(),
            verbose_logging: false,
            report_file: "load_report.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            corpus_folder: std::env::var("CORPUS_FOLDER").unwrap_or(default.corpus_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
        }
    }
}
