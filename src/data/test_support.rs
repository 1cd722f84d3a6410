//! Table builders shared by the data-layer tests.

use super::derive::{derive, COL_DURATION, COL_MASTERY, COL_TIER, COL_WIN};
use super::model::{CellValue, EnrichedTable, RawTable};

/// Build a raw table from `(win, duration_secs, mastery_level, solo_tier)` rows.
pub fn raw(rows: &[(bool, i64, i64, &str)]) -> RawTable {
    RawTable {
        columns: vec![
            COL_WIN.into(),
            COL_DURATION.into(),
            COL_MASTERY.into(),
            COL_TIER.into(),
        ],
        rows: rows
            .iter()
            .map(|&(win, duration, mastery, tier)| {
                vec![
                    CellValue::Bool(win),
                    CellValue::Integer(duration),
                    CellValue::Integer(mastery),
                    CellValue::String(tier.into()),
                ]
            })
            .collect(),
    }
}

/// Raw rows pushed through the real derivation stage.
pub fn enriched(rows: &[(bool, i64, i64, &str)]) -> EnrichedTable {
    derive(&raw(rows)).expect("test rows satisfy the schema")
}

/// Rows that only vary by mastery level and tier.
pub fn levels_and_tiers(rows: &[(i64, &str)]) -> EnrichedTable {
    let full: Vec<_> = rows
        .iter()
        .map(|&(level, tier)| (true, 1800, level, tier))
        .collect();
    enriched(&full)
}
