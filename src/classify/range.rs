//! 範囲分類器
//!
//! 問題番号のみから科目カテゴリを決める純粋関数。
//! 表は試験形態（30問制・40問制）の全番号空間を
//! 隙間・重なりなく分割していなければならない。

use crate::models::Certificate;

/// 連続する問題番号の範囲を1カテゴリに対応付ける規則
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub start: u32,
    pub end: u32,
    pub category: &'static str,
}

const fn rule(start: u32, end: u32, category: &'static str) -> RangeRule {
    RangeRule {
        start,
        end,
        category,
    }
}

/// 三級（30問制）の出題区分表
static MECHANIC3_TABLE: &[RangeRule] = &[
    rule(1, 20, "engine"),
    rule(21, 27, "chassis"),
    rule(28, 30, "law"),
];

/// 二級（40問制）の出題区分表
static MECHANIC2_TABLE: &[RangeRule] = &[
    rule(1, 16, "engine"),
    rule(17, 32, "chassis"),
    rule(33, 36, "equipment"),
    rule(37, 40, "law"),
];

/// 資格に対応する範囲表
///
/// 範囲分類を使わない資格は `None`。
pub fn table_for(cert: Certificate) -> Option<&'static [RangeRule]> {
    match cert {
        Certificate::AutoMechanic2 => Some(MECHANIC2_TABLE),
        Certificate::AutoMechanic3 => Some(MECHANIC3_TABLE),
        _ => None,
    }
}

/// 問題番号からカテゴリを引く
///
/// どの範囲にも入らない番号は `None`（呼び出し側が既定カテゴリを
/// 割り当て、データ品質の警告を出す）。
pub fn classify(table: &[RangeRule], number: u32) -> Option<&'static str> {
    table
        .iter()
        .find(|r| r.start <= number && number <= r.end)
        .map(|r| r.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 表が 1..=max を隙間・重なりなく分割していることの検査
    fn assert_partitions(table: &[RangeRule], max: u32) {
        for n in 1..=max {
            let hits: Vec<_> = table
                .iter()
                .filter(|r| r.start <= n && n <= r.end)
                .collect();
            assert_eq!(hits.len(), 1, "番号 {} は丁度1つの範囲に入るはず", n);
        }
        assert!(classify(table, 0).is_none());
        assert!(classify(table, max + 1).is_none());
    }

    #[test]
    fn test_mechanic3_table_is_total_over_30() {
        assert_partitions(MECHANIC3_TABLE, 30);
    }

    #[test]
    fn test_mechanic2_table_is_total_over_40() {
        assert_partitions(MECHANIC2_TABLE, 40);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(MECHANIC3_TABLE, 1), Some("engine"));
        assert_eq!(classify(MECHANIC3_TABLE, 20), Some("engine"));
        assert_eq!(classify(MECHANIC3_TABLE, 21), Some("chassis"));
        assert_eq!(classify(MECHANIC3_TABLE, 27), Some("chassis"));
        assert_eq!(classify(MECHANIC3_TABLE, 28), Some("law"));
        assert_eq!(classify(MECHANIC3_TABLE, 30), Some("law"));

        assert_eq!(classify(MECHANIC2_TABLE, 16), Some("engine"));
        assert_eq!(classify(MECHANIC2_TABLE, 17), Some("chassis"));
        assert_eq!(classify(MECHANIC2_TABLE, 33), Some("equipment"));
        assert_eq!(classify(MECHANIC2_TABLE, 40), Some("law"));
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(MECHANIC3_TABLE, 3), Some("engine"));
        }
    }

    #[test]
    fn test_table_categories_belong_to_certificate() {
        for (cert, table) in [
            (Certificate::AutoMechanic2, MECHANIC2_TABLE),
            (Certificate::AutoMechanic3, MECHANIC3_TABLE),
        ] {
            for r in table {
                assert!(cert.has_category(r.category));
            }
        }
    }
}
