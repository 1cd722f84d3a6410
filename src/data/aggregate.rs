use std::collections::BTreeMap;
use std::fmt;

use super::bins::MasteryBin;
use super::filter::{filtered_indices, FilterSelection};
use super::model::{EnrichedRecord, EnrichedTable, Tier};

// ---------------------------------------------------------------------------
// Grouping dimension and metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// Raw integer level, ascending.
    MasteryLevel,
    /// Mastery bin, low → high.
    MasteryBin,
    /// Known tiers in ladder order. Unknown tiers are left out.
    SoloTier,
}

impl GroupBy {
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::MasteryLevel => "Mastery Level",
            GroupBy::MasteryBin => "Mastery Range",
            GroupBy::SoloTier => "Tier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Mean of `win_numeric`, as a percentage.
    WinRate,
    /// Mean of `duration_minutes`.
    MeanDuration,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::WinRate => "Win Rate (%)",
            Metric::MeanDuration => "Mean Duration (min)",
        }
    }

    /// Short unit suffix for value labels.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::WinRate => "%",
            Metric::MeanDuration => " min",
        }
    }

    fn sample(self, record: &EnrichedRecord) -> f64 {
        match self {
            Metric::WinRate => f64::from(record.win_numeric),
            Metric::MeanDuration => record.duration_minutes,
        }
    }

    fn finish(self, mean: f64) -> f64 {
        match self {
            Metric::WinRate => mean * 100.0,
            Metric::MeanDuration => mean,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Key of one group. Keys of the same variant sort in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Level(u32),
    Bin(MasteryBin),
    Tier(Tier),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Level(l) => write!(f, "{l}"),
            GroupKey::Bin(b) => write!(f, "{b}"),
            GroupKey::Tier(t) => write!(f, "{t}"),
        }
    }
}

/// One non-empty group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStat {
    pub key: GroupKey,
    pub value: f64,
    /// Rows that contributed to `value`, always > 0.
    pub count: usize,
}

/// Grouped trend over the filtered rows. Groups without rows are omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub group_by: GroupBy,
    pub metric: Metric,
    pub groups: Vec<GroupStat>,
    /// Rows that passed the filter, including ones that fell in no group.
    pub matched_rows: usize,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> Vec<GroupKey> {
        self.groups.iter().map(|g| g.key).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    fn into_stat(self, key: GroupKey, metric: Metric) -> Option<GroupStat> {
        self.mean().map(|mean| GroupStat {
            key,
            value: metric.finish(mean),
            count: self.count,
        })
    }
}

// ---------------------------------------------------------------------------
// Trend: filter → group → mean
// ---------------------------------------------------------------------------

/// Filter `table` by `selection`, group by `group_by` and average `metric`.
///
/// Emission order is fixed by the dimension, never by scan order: tiers walk
/// [`Tier::ALL`], bins walk [`MasteryBin::ALL`], levels ascend.
pub fn apply(
    table: &EnrichedTable,
    selection: &FilterSelection,
    group_by: GroupBy,
    metric: Metric,
) -> AggregateResult {
    let indices = filtered_indices(table, selection);
    let rows = indices.iter().map(|&i| &table.records[i]);

    let groups = match group_by {
        GroupBy::SoloTier => {
            let mut acc = [Accumulator::default(); Tier::COUNT];
            for r in rows {
                if let Some(tier) = r.tier {
                    acc[tier.ordinal()].push(metric.sample(r));
                }
            }
            Tier::ALL
                .iter()
                .filter_map(|&t| acc[t.ordinal()].into_stat(GroupKey::Tier(t), metric))
                .collect()
        }
        GroupBy::MasteryBin => {
            let mut acc = [Accumulator::default(); MasteryBin::COUNT];
            for r in rows {
                acc[r.mastery_bin.index()].push(metric.sample(r));
            }
            MasteryBin::ALL
                .iter()
                .filter_map(|&b| acc[b.index()].into_stat(GroupKey::Bin(b), metric))
                .collect()
        }
        GroupBy::MasteryLevel => {
            let mut acc: BTreeMap<u32, Accumulator> = BTreeMap::new();
            for r in rows {
                acc.entry(r.mastery_level())
                    .or_default()
                    .push(metric.sample(r));
            }
            acc.into_iter()
                .filter_map(|(level, a)| a.into_stat(GroupKey::Level(level), metric))
                .collect()
        }
    };

    AggregateResult {
        group_by,
        metric,
        groups,
        matched_rows: indices.len(),
    }
}

// ---------------------------------------------------------------------------
// Headline: one statistic for one tier or bin
// ---------------------------------------------------------------------------

/// Single-valued selection for a headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadlineKey {
    Tier(Tier),
    Bin(MasteryBin),
}

impl HeadlineKey {
    fn matches(self, record: &EnrichedRecord) -> bool {
        match self {
            HeadlineKey::Tier(t) => record.tier == Some(t),
            HeadlineKey::Bin(b) => record.mastery_bin == b,
        }
    }
}

impl fmt::Display for HeadlineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadlineKey::Tier(t) => write!(f, "{t}"),
            HeadlineKey::Bin(b) => write!(f, "{b}"),
        }
    }
}

/// A headline statistic. An empty selection is `NoData`, never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Headline {
    Value { value: f64, count: usize },
    NoData,
}

impl Headline {
    pub fn value(&self) -> Option<f64> {
        match self {
            Headline::Value { value, .. } => Some(*value),
            Headline::NoData => None,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Headline::Value { count, .. } => *count,
            Headline::NoData => 0,
        }
    }
}

/// Mean of `metric` over the rows of one tier or bin.
pub fn headline(table: &EnrichedTable, key: HeadlineKey, metric: Metric) -> Headline {
    let mut acc = Accumulator::default();
    for r in table.records.iter().filter(|r| key.matches(r)) {
        acc.push(metric.sample(r));
    }
    match acc.mean() {
        Some(mean) => Headline::Value {
            value: metric.finish(mean),
            count: acc.count,
        },
        None => Headline::NoData,
    }
}
