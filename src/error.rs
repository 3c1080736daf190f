use thiserror::Error;

/// コーパス読み込みのエラー型
///
/// レコード単位の不備（必須項目の欠落など）はエラーにせず
/// スキップ件数として集計する。ここに定義するのは
/// コーパス単位・全体単位で処理を打ち切るべき異常のみ。
#[derive(Debug, Error)]
pub enum CorpusError {
    /// ファイル読み込み失敗
    #[error("ファイルの読み込みに失敗しました ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失敗
    #[error("JSONの解析に失敗しました ({path}): {source}")]
    JsonParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 既知のどの入力形式にも一致しない
    #[error("対応していない入力形式です: {path}")]
    UnknownFormat { path: String },

    /// メタデータの資格IDが未登録
    #[error("不明な資格IDです: {cert_id}")]
    UnknownCertificate { cert_id: String },

    /// 区分あり資格なのに燃料種別を解決できない
    #[error("受験区分（燃料種別）を解析できません ({cert_id}): {fuel_type:?}")]
    UnknownVariant {
        cert_id: String,
        fuel_type: Option<String>,
    },

    /// 年度・実施回の形式不正
    #[error("年度・実施回の形式が不正です: {value}")]
    InvalidYearSeason { value: String },

    /// 複合IDの衝突。一意性の不変条件を壊すため必ず読み込みを中止する
    #[error("問題ID {id} が重複しています（{origin}）。読み込みを中止します")]
    DuplicateIdentifier { id: String, origin: String },

    /// 正規表現の構築失敗
    #[error("正規表現の構築に失敗しました: {0}")]
    Regex(#[from] regex::Error),
}

/// クレート共通の Result 型
pub type Result<T> = std::result::Result<T, CorpusError>;
