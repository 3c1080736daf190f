use phf::phf_map;

/// 資格（検定）の列挙
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Certificate {
    /// 一級自動車整備士
    AutoMechanic1,
    /// 二級自動車整備士
    AutoMechanic2,
    /// 三級自動車整備士
    AutoMechanic3,
    /// 自動車車体整備士
    AutoBody,
}

/// 資格ID → 資格 の静的テーブル
static CERTIFICATES: phf::Map<&'static str, Certificate> = phf_map! {
    "auto-mechanic-1" => Certificate::AutoMechanic1,
    "auto-mechanic-2" => Certificate::AutoMechanic2,
    "auto-mechanic-3" => Certificate::AutoMechanic3,
    "auto-body" => Certificate::AutoBody,
};

impl Certificate {
    /// 安定ID（URLパス・複合IDの先頭要素に使う）
    pub fn id(self) -> &'static str {
        match self {
            Certificate::AutoMechanic1 => "auto-mechanic-1",
            Certificate::AutoMechanic2 => "auto-mechanic-2",
            Certificate::AutoMechanic3 => "auto-mechanic-3",
            Certificate::AutoBody => "auto-body",
        }
    }

    /// 表示名
    pub fn name(self) -> &'static str {
        match self {
            Certificate::AutoMechanic1 => "一級自動車整備士",
            Certificate::AutoMechanic2 => "二級自動車整備士",
            Certificate::AutoMechanic3 => "三級自動車整備士",
            Certificate::AutoBody => "自動車車体整備士",
        }
    }

    /// IDから資格を解決
    pub fn from_id(id: &str) -> Option<Self> {
        CERTIFICATES.get(id).copied()
    }

    /// 並行受験区分（ガソリン/ジーゼル等）を持つ資格か
    pub fn has_variants(self) -> bool {
        matches!(self, Certificate::AutoMechanic2 | Certificate::AutoMechanic3)
    }

    /// 宣言順のカテゴリ一覧
    pub fn categories(self) -> &'static [Category] {
        match self {
            Certificate::AutoMechanic1 => MECHANIC1_CATEGORIES,
            Certificate::AutoMechanic2 => MECHANIC2_CATEGORIES,
            Certificate::AutoMechanic3 => MECHANIC3_CATEGORIES,
            Certificate::AutoBody => BODY_CATEGORIES,
        }
    }

    /// 分類不能時に割り当てる既定カテゴリ
    pub fn default_category(self) -> &'static str {
        match self {
            Certificate::AutoBody => "structure",
            _ => "engine",
        }
    }

    /// slug がこの資格のカテゴリに属するか
    pub fn has_category(self, slug: &str) -> bool {
        self.categories().iter().any(|c| c.slug == slug)
    }
}

impl std::fmt::Display for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 科目カテゴリ
///
/// 資格ごとに静的に宣言する。`order` は表示順。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub order: usize,
}

const fn cat(slug: &'static str, name: &'static str, order: usize) -> Category {
    Category { slug, name, order }
}

static MECHANIC1_CATEGORIES: &[Category] = &[
    cat("engine", "エンジン", 0),
    cat("chassis", "シャシ", 1),
    cat("electrics", "電装", 2),
    cat("equipment", "整備機器", 3),
    cat("law", "法規", 4),
];

static MECHANIC2_CATEGORIES: &[Category] = &[
    cat("engine", "エンジン", 0),
    cat("chassis", "シャシ", 1),
    cat("equipment", "整備機器", 2),
    cat("law", "法規", 3),
];

static MECHANIC3_CATEGORIES: &[Category] = &[
    cat("engine", "エンジン", 0),
    cat("chassis", "シャシ", 1),
    cat("law", "法規", 2),
];

static BODY_CATEGORIES: &[Category] = &[
    cat("law", "法規", 0),
    cat("drawing", "図面", 1),
    cat("tools", "作業機器・工具", 2),
    cat("materials", "材料", 3),
    cat("maintenance", "点検・整備", 4),
    cat("diagnosis", "故障診断", 5),
    cat("electrics", "電装", 6),
    cat("structure", "車体構造", 7),
];

/// 受験区分（燃料・車種）の列挙
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    /// ガソリン
    Gasoline,
    /// ジーゼル
    Diesel,
    /// 二輪
    Motorcycle,
    /// シャシ
    Chassis,
}

impl Variant {
    /// 複合IDに埋め込む1文字コード
    pub fn code(self) -> char {
        match self {
            Variant::Gasoline => 'G',
            Variant::Diesel => 'D',
            Variant::Motorcycle => 'M',
            Variant::Chassis => 'C',
        }
    }

    /// 表示名
    pub fn name(self) -> &'static str {
        match self {
            Variant::Gasoline => "ガソリン",
            Variant::Diesel => "ジーゼル",
            Variant::Motorcycle => "二輪",
            Variant::Chassis => "シャシ",
        }
    }

    /// コードから区分を解決
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'G' => Some(Variant::Gasoline),
            'D' => Some(Variant::Diesel),
            'M' => Some(Variant::Motorcycle),
            'C' => Some(Variant::Chassis),
            _ => None,
        }
    }

    /// 文字列から区分を解析（完全一致）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gasoline" | "ガソリン" => Some(Variant::Gasoline),
            "diesel" | "ジーゼル" | "ディーゼル" => Some(Variant::Diesel),
            "motorcycle" | "二輪" => Some(Variant::Motorcycle),
            "chassis" | "シャシ" => Some(Variant::Chassis),
            _ => None,
        }
    }

    /// あいまい一致で区分を探す
    ///
    /// 元データの fuelType 表記は揺れるため、完全一致で解決
    /// できない場合は小文字化した部分一致で拾う。
    pub fn find(s: &str) -> Option<Self> {
        if let Some(v) = Self::from_str(s) {
            return Some(v);
        }

        let s_lower = s.to_lowercase();
        if s_lower.contains("gas") || s_lower.contains("ガソリン") {
            return Some(Variant::Gasoline);
        }
        if s_lower.contains("diesel") || s_lower.contains("ゼル") {
            return Some(Variant::Diesel);
        }
        if s_lower.contains("moto") || s_lower.contains("二輪") || s_lower.contains("バイク") {
            return Some(Variant::Motorcycle);
        }
        if s_lower.contains("chassis") || s_lower.contains("シャシ") {
            return Some(Variant::Chassis);
        }

        None
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
