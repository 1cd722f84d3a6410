use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analysis::{present, AnalysisKind, Inputs, Presentation};
use crate::color::TierColors;
use crate::data::bins::MasteryBin;
use crate::data::cache::DatasetCache;
use crate::data::filter::MasteryRange;
use crate::data::model::{EnrichedTable, Tier};

/// How often the source file is checked for changes.
const SOURCE_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source file and its cached enriched table.
    pub cache: DatasetCache,

    /// Table the current inputs and presentation were built from.
    pub table: Option<Arc<EnrichedTable>>,

    /// Which analysis is shown.
    pub analysis: AnalysisKind,

    /// Values of the input widgets (None until a table is loaded).
    pub inputs: Option<Inputs>,

    /// Result of the last recompute.
    pub presentation: Option<Presentation>,

    /// Fixed tier colours for the charts.
    pub colors: TierColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    last_poll: Option<Instant>,
}

impl AppState {
    pub fn new(path: impl Into<PathBuf>, analysis: AnalysisKind) -> Self {
        Self {
            cache: DatasetCache::new(path),
            table: None,
            analysis,
            inputs: None,
            presentation: None,
            colors: TierColors::default(),
            status_message: None,
            last_poll: None,
        }
    }

    /// Switch to another dataset file.
    pub fn open(&mut self, path: impl Into<PathBuf>) {
        self.cache = DatasetCache::new(path);
        self.table = None;
        self.inputs = None;
        self.reload();
    }

    /// Fetch the table from the cache and recompute if it was rebuilt.
    ///
    /// A load failure clears the table and leaves the message in
    /// `status_message`; nothing is retried until the next poll or `open`.
    pub fn reload(&mut self) {
        self.last_poll = Some(Instant::now());
        match self.cache.get() {
            Ok(table) => {
                let unchanged = self
                    .table
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &table));
                if !unchanged {
                    self.set_table(table);
                }
                self.status_message = None;
            }
            Err(e) => {
                let message = format!("Error: {e}");
                if self.status_message.as_deref() != Some(message.as_str()) {
                    log::error!("Failed to load dataset: {e}");
                }
                self.table = None;
                self.presentation = None;
                self.status_message = Some(message);
            }
        }
    }

    /// Re-check the source file at most every [`SOURCE_POLL_INTERVAL`].
    pub fn poll_source(&mut self) {
        let due = self
            .last_poll
            .map_or(true, |t| t.elapsed() >= SOURCE_POLL_INTERVAL);
        if due {
            self.reload();
        }
    }

    /// Time left until the next source check is due.
    pub fn next_poll_in(&self) -> Duration {
        self.last_poll.map_or(Duration::ZERO, |t| {
            SOURCE_POLL_INTERVAL.saturating_sub(t.elapsed())
        })
    }

    /// Ingest a newly loaded table, keeping the user's inputs where they
    /// still fit.
    fn set_table(&mut self, table: Arc<EnrichedTable>) {
        let inputs = match self.inputs.take() {
            Some(mut inputs) => {
                inputs.clamp_to(&table);
                inputs
            }
            None => Inputs::defaults(&table),
        };
        self.inputs = Some(inputs);
        self.table = Some(table);
        self.refresh();
    }

    /// Recompute the presentation from the current table and inputs.
    pub fn refresh(&mut self) {
        self.presentation = match (&self.table, &self.inputs) {
            (Some(table), Some(inputs)) => Some(present(table, self.analysis, inputs)),
            _ => None,
        };
    }

    pub fn set_analysis(&mut self, analysis: AnalysisKind) {
        if self.analysis != analysis {
            self.analysis = analysis;
            self.refresh();
        }
    }

    /// Observed `(min, max)` mastery of the loaded table.
    pub fn mastery_bounds(&self) -> Option<(u32, u32)> {
        self.table.as_ref().and_then(|t| t.mastery_bounds)
    }

    /// Set the mastery range from two slider values, clamped to the data.
    pub fn set_mastery_range(&mut self, a: u32, b: u32) {
        let bounds = self.mastery_bounds();
        if let Some(inputs) = &mut self.inputs {
            let range = MasteryRange::new(a, b);
            inputs.mastery = bounds.map_or(range, |bounds| range.clamped(bounds));
            self.refresh();
        }
    }

    /// Toggle a single tier in the multi-select.
    pub fn toggle_tier(&mut self, tier: Tier) {
        if let Some(inputs) = &mut self.inputs {
            if !inputs.tiers.remove(&tier) {
                inputs.tiers.insert(tier);
            }
            self.refresh();
        }
    }

    /// Select every tier.
    pub fn select_all_tiers(&mut self) {
        if let Some(inputs) = &mut self.inputs {
            inputs.tiers = Tier::ALL.into_iter().collect();
            self.refresh();
        }
    }

    /// Deselect every tier.
    pub fn select_no_tiers(&mut self) {
        if let Some(inputs) = &mut self.inputs {
            inputs.tiers.clear();
            self.refresh();
        }
    }

    pub fn set_headline_bin(&mut self, bin: MasteryBin) {
        if let Some(inputs) = &mut self.inputs {
            inputs.headline_bin = bin;
            self.refresh();
        }
    }

    pub fn set_headline_tier(&mut self, tier: Tier) {
        if let Some(inputs) = &mut self.inputs {
            inputs.headline_tier = tier;
            self.refresh();
        }
    }
}
