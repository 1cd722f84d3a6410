use std::collections::BTreeSet;
use std::fmt;

use crate::data::aggregate::{
    apply, headline, AggregateResult, GroupBy, Headline, HeadlineKey, Metric,
};
use crate::data::bins::MasteryBin;
use crate::data::filter::{FilterSelection, MasteryRange};
use crate::data::model::{EnrichedTable, Tier};

// ---------------------------------------------------------------------------
// Analyses offered by the dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AnalysisKind {
    /// Line chart of win rate per mastery level, filtered by a mastery range.
    WinRateByMastery,
    /// Bar chart of mean duration per tier, filtered by a tier set.
    DurationByTier,
    /// Bar chart of win rate per tier, filtered by a tier set and a mastery range.
    WinRateByTierAndMastery,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::WinRateByMastery,
        AnalysisKind::DurationByTier,
        AnalysisKind::WinRateByTierAndMastery,
    ];

    /// Name shown in the analysis picker.
    pub fn name(self) -> &'static str {
        match self {
            AnalysisKind::WinRateByMastery => "Win Rate vs Mastery Level",
            AnalysisKind::DurationByTier => "Tier vs Match Duration",
            AnalysisKind::WinRateByTierAndMastery => "Win Rate by Tier and Mastery",
        }
    }

    pub fn group_by(self) -> GroupBy {
        match self {
            AnalysisKind::WinRateByMastery => GroupBy::MasteryLevel,
            AnalysisKind::DurationByTier | AnalysisKind::WinRateByTierAndMastery => {
                GroupBy::SoloTier
            }
        }
    }

    /// Coarser grouping listed in the summary table under the chart.
    pub fn breakdown(self) -> Option<GroupBy> {
        match self {
            AnalysisKind::WinRateByMastery => Some(GroupBy::MasteryBin),
            AnalysisKind::DurationByTier | AnalysisKind::WinRateByTierAndMastery => None,
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            AnalysisKind::DurationByTier => Metric::MeanDuration,
            AnalysisKind::WinRateByMastery | AnalysisKind::WinRateByTierAndMastery => {
                Metric::WinRate
            }
        }
    }

    pub fn chart(self) -> ChartKind {
        match self {
            AnalysisKind::WinRateByMastery => ChartKind::Line,
            AnalysisKind::DurationByTier | AnalysisKind::WinRateByTierAndMastery => ChartKind::Bar,
        }
    }

    /// Whether the mastery range input applies.
    pub fn uses_mastery_range(self) -> bool {
        self != AnalysisKind::DurationByTier
    }

    /// Whether the tier multi-select applies.
    pub fn uses_tier_set(self) -> bool {
        self != AnalysisKind::WinRateByMastery
    }

    /// Build the filter for this analysis from the current inputs.
    pub fn selection(self, inputs: &Inputs) -> FilterSelection {
        match self {
            AnalysisKind::WinRateByMastery => FilterSelection::Mastery(inputs.mastery),
            AnalysisKind::DurationByTier => FilterSelection::Tiers(inputs.tiers.clone()),
            AnalysisKind::WinRateByTierAndMastery => FilterSelection::Both {
                mastery: inputs.mastery,
                tiers: inputs.tiers.clone(),
            },
        }
    }

    fn title(self, inputs: &Inputs) -> String {
        let (lo, hi) = (inputs.mastery.lo(), inputs.mastery.hi());
        match self {
            AnalysisKind::WinRateByMastery => format!("Win Rate by Mastery Level ({lo}-{hi})"),
            AnalysisKind::DurationByTier => "Mean Match Duration by Tier".to_string(),
            AnalysisKind::WinRateByTierAndMastery => {
                format!("Win Rate by Tier ({lo}-{hi} Mastery)")
            }
        }
    }

    /// The single-value side metric, if this analysis has one.
    fn headline_key(self, inputs: &Inputs) -> Option<(HeadlineKey, Metric)> {
        match self {
            AnalysisKind::WinRateByMastery => {
                Some((HeadlineKey::Bin(inputs.headline_bin), Metric::WinRate))
            }
            AnalysisKind::DurationByTier => {
                Some((HeadlineKey::Tier(inputs.headline_tier), Metric::MeanDuration))
            }
            AnalysisKind::WinRateByTierAndMastery => None,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

// ---------------------------------------------------------------------------
// Inputs – the values of every input widget
// ---------------------------------------------------------------------------

/// Current values of the input channels. Rebuilt from the widgets on every
/// interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub mastery: MasteryRange,
    pub tiers: BTreeSet<Tier>,
    pub headline_bin: MasteryBin,
    pub headline_tier: Tier,
}

impl Inputs {
    /// Untouched inputs: full observed range, every tier selected.
    pub fn defaults(table: &EnrichedTable) -> Self {
        Self {
            mastery: MasteryRange::full(table),
            tiers: Tier::ALL.into_iter().collect(),
            headline_bin: MasteryBin::ALL[0],
            headline_tier: Tier::Iron,
        }
    }

    /// Keep the range inside the bounds of `table`.
    pub fn clamp_to(&mut self, table: &EnrichedTable) {
        if let Some(bounds) = table.mastery_bounds {
            self.mastery = self.mastery.clamped(bounds);
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation – what the sink receives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineView {
    pub label: String,
    pub key: HeadlineKey,
    pub metric: Metric,
    pub value: Headline,
}

/// Data and labels for one render. Carries no styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub kind: AnalysisKind,
    pub chart: ChartKind,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub result: AggregateResult,
    /// Same selection and metric over a coarser grouping, if the analysis has one.
    pub breakdown: Option<AggregateResult>,
    pub headline: Option<HeadlineView>,
    pub total_rows: usize,
}

/// Run one analysis over `table` with the given inputs.
pub fn present(table: &EnrichedTable, kind: AnalysisKind, inputs: &Inputs) -> Presentation {
    let selection = kind.selection(inputs);
    let result = apply(table, &selection, kind.group_by(), kind.metric());
    let breakdown = kind
        .breakdown()
        .map(|group_by| apply(table, &selection, group_by, kind.metric()));

    let side_metric = kind.headline_key(inputs).map(|(key, metric)| {
        let label = match key {
            HeadlineKey::Bin(b) => format!("Win rate at mastery {b}"),
            HeadlineKey::Tier(t) => format!("Mean duration in {t}"),
        };
        HeadlineView {
            label,
            key,
            metric,
            value: headline(table, key, metric),
        }
    });

    log::debug!(
        "{kind}: {} of {} rows matched, {} groups",
        result.matched_rows,
        table.len(),
        result.groups.len()
    );

    Presentation {
        kind,
        chart: kind.chart(),
        title: kind.title(inputs),
        x_label: kind.group_by().label(),
        y_label: kind.metric().label(),
        result,
        breakdown,
        headline: side_metric,
        total_rows: table.len(),
    }
}
