use super::bins::MasteryBins;
use super::error::{DashboardError, Result};
use super::model::{CellValue, EnrichedRecord, EnrichedTable, MatchRecord, RawTable, Tier};

pub const COL_WIN: &str = "win";
pub const COL_DURATION: &str = "duration";
pub const COL_MASTERY: &str = "mastery_level";
pub const COL_TIER: &str = "solo_tier";

/// Column positions of the four required columns.
struct Schema {
    win: usize,
    duration: usize,
    mastery: usize,
    tier: usize,
}

impl Schema {
    fn resolve(table: &RawTable) -> Result<Self> {
        let find = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| DashboardError::missing_column(name))
        };
        Ok(Schema {
            win: find(COL_WIN)?,
            duration: find(COL_DURATION)?,
            mastery: find(COL_MASTERY)?,
            tier: find(COL_TIER)?,
        })
    }
}

/// Validate the raw table and compute the derived columns.
///
/// All-or-nothing: the first schema violation aborts the whole derivation.
/// Row order and row count are preserved.
pub fn derive(raw: &RawTable) -> Result<EnrichedTable> {
    let schema = Schema::resolve(raw)?;

    let records = raw
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| typed_record(&schema, row, cells))
        .collect::<Result<Vec<_>>>()?;

    let mastery_bounds = records
        .iter()
        .map(|r| r.mastery_level)
        .fold(None, |acc: Option<(u32, u32)>, level| match acc {
            None => Some((level, level)),
            Some((lo, hi)) => Some((lo.min(level), hi.max(level))),
        });
    let bins = MasteryBins::from_max(mastery_bounds.map(|(_, hi)| hi));

    let mut unknown_tier_rows = 0;
    let mut enriched = Vec::with_capacity(records.len());
    for (row, record) in records.into_iter().enumerate() {
        let tier = record.solo_tier.parse::<Tier>().ok();
        if tier.is_none() {
            unknown_tier_rows += 1;
        }
        let mastery_bin = bins.bin_for(record.mastery_level).ok_or_else(|| {
            DashboardError::bad_cell(COL_MASTERY, row, "mastery level outside the derived bins")
        })?;
        enriched.push(EnrichedRecord {
            win_numeric: u8::from(record.win),
            duration_minutes: record.duration / 60.0,
            tier,
            mastery_bin,
            record,
        });
    }

    Ok(EnrichedTable {
        records: enriched,
        bins,
        mastery_bounds,
        unknown_tier_rows,
    })
}

fn typed_record(schema: &Schema, row: usize, cells: &[CellValue]) -> Result<MatchRecord> {
    let cell = |idx: usize| cells.get(idx).unwrap_or(&CellValue::Null);
    Ok(MatchRecord {
        win: parse_win(cell(schema.win), row)?,
        duration: parse_duration(cell(schema.duration), row)?,
        mastery_level: parse_mastery(cell(schema.mastery), row)?,
        solo_tier: parse_tier_text(cell(schema.tier)),
    })
}

fn parse_win(value: &CellValue, row: usize) -> Result<bool> {
    match value {
        CellValue::Bool(b) => Ok(*b),
        CellValue::Integer(0) => Ok(false),
        CellValue::Integer(1) => Ok(true),
        CellValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        CellValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(DashboardError::bad_cell(
            COL_WIN,
            row,
            format!("expected a boolean, found {other}"),
        )),
    }
}

fn parse_duration(value: &CellValue, row: usize) -> Result<f64> {
    match value.as_f64() {
        Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(DashboardError::bad_cell(
            COL_DURATION,
            row,
            format!("expected a non-negative number of seconds, found {value}"),
        )),
    }
}

fn parse_mastery(value: &CellValue, row: usize) -> Result<u32> {
    let level = match value {
        CellValue::Integer(i) => u32::try_from(*i).ok(),
        CellValue::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
            Some(*f as u32)
        }
        _ => None,
    };
    level.ok_or_else(|| {
        DashboardError::bad_cell(
            COL_MASTERY,
            row,
            format!("expected a non-negative integer, found {value}"),
        )
    })
}

/// Tier text is kept verbatim. Cells the loader typed as numbers or booleans
/// keep their text and nulls become an empty category; `Tier::from_str`
/// later classifies all of these as unknown.
fn parse_tier_text(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => s.clone(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Float(v) => v.to_string(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Null => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            columns: vec![
                "match_id".into(),
                COL_WIN.into(),
                COL_DURATION.into(),
                COL_MASTERY.into(),
                COL_TIER.into(),
            ],
            rows,
        }
    }

    fn row(id: i64, win: bool, duration: i64, mastery: i64, tier: &str) -> Vec<CellValue> {
        vec![
            CellValue::Integer(id),
            CellValue::Bool(win),
            CellValue::Integer(duration),
            CellValue::Integer(mastery),
            CellValue::String(tier.into()),
        ]
    }

    #[test]
    fn derives_numeric_win_and_minutes() {
        let t = derive(&table(vec![
            row(1, true, 3600, 15, "GOLD"),
            row(2, false, 1530, 3, "IRON"),
        ]))
        .unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.records[0].win_numeric, 1);
        assert_eq!(t.records[0].duration_minutes, 60.0);
        assert_eq!(t.records[1].win_numeric, 0);
        assert_eq!(t.records[1].duration_minutes, 25.5);
        assert_eq!(t.records[0].tier, Some(Tier::Gold));
        assert_eq!(t.records[0].mastery_bin.label(), "11-20");
        assert_eq!(t.mastery_bounds, Some((3, 15)));
    }

    #[test]
    fn preserves_row_order_and_count() {
        let rows: Vec<_> = (0..50)
            .map(|i| row(i, i % 2 == 0, 1200 + i, (i * 7) % 60, "SILVER"))
            .collect();
        let t = derive(&table(rows)).unwrap();
        assert_eq!(t.len(), 50);
        for (i, r) in t.records.iter().enumerate() {
            assert_eq!(r.record.duration, (1200 + i) as f64);
        }
    }

    #[test]
    fn unknown_tiers_are_kept_but_unordered() {
        let t = derive(&table(vec![
            row(1, true, 1800, 5, "GOLD"),
            row(2, true, 1800, 5, "gold"),
            row(3, false, 1800, 5, "UNRANKED"),
        ]))
        .unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.records[1].tier, None);
        assert_eq!(t.records[1].record.solo_tier, "gold");
        assert_eq!(t.records[2].tier, None);
        assert_eq!(t.unknown_tier_rows, 2);
    }

    #[test]
    fn bins_are_built_from_loaded_data() {
        let t = derive(&table(vec![
            row(1, true, 1800, 11, "GOLD"),
            row(2, true, 1800, 230, "GOLD"),
        ]))
        .unwrap();
        assert_eq!(t.bins.edges()[6], 231);
        assert_eq!(t.records[0].mastery_bin.label(), "11-20");
        assert_eq!(t.records[1].mastery_bin.label(), "51+");
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let t = derive(&table(Vec::new())).unwrap();
        assert_eq!(t.len(), 0);
        assert_eq!(t.mastery_bounds, None);
        assert_eq!(t.unknown_tier_rows, 0);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let raw = RawTable {
            columns: vec![COL_WIN.into(), COL_DURATION.into(), COL_TIER.into()],
            rows: Vec::new(),
        };
        match derive(&raw) {
            Err(DashboardError::InputSchema { column, row, .. }) => {
                assert_eq!(column, COL_MASTERY);
                assert_eq!(row, None);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_cell_type_aborts_derivation() {
        let mut bad = row(2, true, 1800, 5, "GOLD");
        bad[3] = CellValue::String("five".into());
        let err = derive(&table(vec![row(1, true, 1800, 5, "GOLD"), bad])).unwrap_err();
        match err {
            DashboardError::InputSchema { column, row, .. } => {
                assert_eq!(column, COL_MASTERY);
                assert_eq!(row, Some(1));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let mut negative = row(1, true, 1800, 5, "GOLD");
        negative[3] = CellValue::Integer(-1);
        assert!(derive(&table(vec![negative])).is_err());
    }

    #[test]
    fn lenient_win_and_mastery_encodings() {
        let rows = vec![
            vec![
                CellValue::Integer(1),
                CellValue::String("True".into()),
                CellValue::Float(1500.0),
                CellValue::Float(12.0),
                CellValue::String("SILVER".into()),
            ],
            vec![
                CellValue::Integer(2),
                CellValue::Integer(0),
                CellValue::Integer(900),
                CellValue::Integer(0),
                CellValue::Null,
            ],
        ];
        let t = derive(&table(rows)).unwrap();
        assert_eq!(t.records[0].win_numeric, 1);
        assert_eq!(t.records[0].record.mastery_level, 12);
        assert_eq!(t.records[1].win_numeric, 0);
        assert_eq!(t.records[1].tier, None);
        assert_eq!(t.records[1].duration_minutes, 15.0);
    }

    #[test]
    fn non_text_tier_cells_become_unknown_tiers() {
        let mut nan = row(1, true, 1800, 5, "");
        nan[4] = CellValue::Float(f64::NAN);
        let mut one = row(2, false, 1800, 5, "");
        one[4] = CellValue::Integer(1);
        let mut flag = row(3, true, 1800, 5, "");
        flag[4] = CellValue::Bool(true);

        let t = derive(&table(vec![nan, one, flag, row(4, true, 1800, 5, "GOLD")])).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.unknown_tier_rows, 3);
        assert_eq!(t.records[0].record.solo_tier, "NaN");
        assert_eq!(t.records[1].record.solo_tier, "1");
        assert_eq!(t.records[2].record.solo_tier, "true");
        assert!(t.records[..3].iter().all(|r| r.tier.is_none()));
        assert_eq!(t.records[3].tier, Some(Tier::Gold));
    }

    #[test]
    fn duration_conversion_is_linear() {
        for secs in [1i64, 59, 60, 61, 1799, 3600, 7201] {
            let t = derive(&table(vec![row(1, true, secs, 1, "IRON")])).unwrap();
            assert_eq!(t.records[0].duration_minutes, secs as f64 / 60.0);
        }
    }
}
