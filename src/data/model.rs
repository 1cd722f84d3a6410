use std::fmt;
use std::str::FromStr;

use super::bins::{MasteryBin, MasteryBins};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as produced by the loaders, before any schema
/// check has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s:?}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` (integers widen, everything else fails).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loaded, not yet validated table
// ---------------------------------------------------------------------------

/// Row-oriented raw table. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in file order.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Tier – the ordered solo queue ladder
// ---------------------------------------------------------------------------

/// Solo queue tier. Declaration order is the ladder order, lowest first, and
/// the derived `Ord` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const COUNT: usize = 10;

    /// All tiers in ladder order.
    pub const ALL: [Tier; Tier::COUNT] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Position on the ladder, `0` for `IRON`.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Name as it appears in the dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the ten tier names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    /// Exact match only: `"gold"` or `" GOLD"` are unknown, never coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

/// One ranked match observation, after schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub win: bool,
    /// Match length in seconds.
    pub duration: f64,
    pub mastery_level: u32,
    /// Tier exactly as found in the source, kept even when unknown.
    pub solo_tier: String,
}

/// A [`MatchRecord`] plus its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: MatchRecord,
    pub win_numeric: u8,
    pub duration_minutes: f64,
    /// `None` for a tier outside the ten known names.
    pub tier: Option<Tier>,
    pub mastery_bin: MasteryBin,
}

impl EnrichedRecord {
    pub fn mastery_level(&self) -> u32 {
        self.record.mastery_level
    }
}

// ---------------------------------------------------------------------------
// EnrichedTable – the cached, read-only output of derivation
// ---------------------------------------------------------------------------

/// The enriched dataset in source row order, with the bins and the observed
/// mastery bounds it was derived with.
#[derive(Debug, Clone)]
pub struct EnrichedTable {
    pub records: Vec<EnrichedRecord>,
    pub bins: MasteryBins,
    /// Observed `(min, max)` mastery level; `None` for an empty table.
    pub mastery_bounds: Option<(u32, u32)>,
    /// Rows whose `solo_tier` is not a known tier.
    pub unknown_tier_rows: usize,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
