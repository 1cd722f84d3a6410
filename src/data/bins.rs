use std::fmt;
use std::ops::Range;

// ---------------------------------------------------------------------------
// MasteryBin – one labelled slice of the mastery-level axis
// ---------------------------------------------------------------------------

/// Lower edges of the bins. The upper edge of the last bin is data-driven.
const LOWER_EDGES: [u32; 6] = [0, 11, 21, 31, 41, 51];

const LABELS: [&str; 6] = ["0-10", "11-20", "21-30", "31-40", "41-50", "51+"];

/// A mastery bin, ordered low → high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MasteryBin(u8);

impl MasteryBin {
    pub const COUNT: usize = LOWER_EDGES.len();

    /// All bins in ascending order.
    pub const ALL: [MasteryBin; 6] = [
        MasteryBin(0),
        MasteryBin(1),
        MasteryBin(2),
        MasteryBin(3),
        MasteryBin(4),
        MasteryBin(5),
    ];

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }
}

impl fmt::Display for MasteryBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MasteryBins – the partition for one loaded dataset
// ---------------------------------------------------------------------------

/// Half-open partition `[0,11) [11,21) [21,31) [31,41) [41,51) [51,max+1)`.
///
/// The final edge comes from the data, so it must be rebuilt whenever the
/// dataset changes. It never drops below `52`, which keeps the `51+` bin a
/// non-empty range even when every observed level is below 51.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteryBins {
    /// Exclusive upper edge of the last bin.
    upper: u64,
}

impl MasteryBins {
    /// Build the partition from the largest observed mastery level.
    pub fn from_max(max_level: Option<u32>) -> Self {
        let last = u64::from(LOWER_EDGES[MasteryBin::COUNT - 1]);
        let upper = max_level.map_or(0, |m| u64::from(m) + 1).max(last + 1);
        Self { upper }
    }

    /// All seven edges, `[0, 11, 21, 31, 41, 51, upper]`.
    pub fn edges(&self) -> [u64; 7] {
        let mut edges = [0u64; 7];
        for (slot, edge) in edges.iter_mut().zip(LOWER_EDGES) {
            *slot = u64::from(edge);
        }
        edges[6] = self.upper;
        edges
    }

    /// Half-open level range of `bin`.
    pub fn range(&self, bin: MasteryBin) -> Range<u64> {
        let edges = self.edges();
        edges[bin.index()]..edges[bin.index() + 1]
    }

    /// Bin containing `level`. A level on an edge belongs to the higher bin.
    /// `None` only for levels past the last edge.
    pub fn bin_for(&self, level: u32) -> Option<MasteryBin> {
        let level = u64::from(level);
        if level >= self.upper {
            return None;
        }
        // Last lower edge that is <= level.
        let idx = LOWER_EDGES
            .iter()
            .rposition(|&lo| u64::from(lo) <= level)
            .unwrap_or(0);
        Some(MasteryBin::ALL[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_fall_into_the_higher_bin() {
        let bins = MasteryBins::from_max(Some(80));
        assert_eq!(bins.bin_for(10).map(MasteryBin::label), Some("0-10"));
        assert_eq!(bins.bin_for(11).map(MasteryBin::label), Some("11-20"));
        assert_eq!(bins.bin_for(20).map(MasteryBin::label), Some("11-20"));
        assert_eq!(bins.bin_for(21).map(MasteryBin::label), Some("21-30"));
        assert_eq!(bins.bin_for(51).map(MasteryBin::label), Some("51+"));
        assert_eq!(bins.bin_for(0).map(MasteryBin::label), Some("0-10"));
    }

    #[test]
    fn last_edge_follows_observed_maximum() {
        let bins = MasteryBins::from_max(Some(140));
        assert_eq!(bins.edges(), [0, 11, 21, 31, 41, 51, 141]);
        assert_eq!(bins.bin_for(140).map(MasteryBin::label), Some("51+"));
        assert_eq!(bins.bin_for(141), None);

        let grown = MasteryBins::from_max(Some(400));
        assert_eq!(grown.edges()[6], 401);
        assert_eq!(grown.bin_for(400).map(MasteryBin::label), Some("51+"));
    }

    #[test]
    fn small_maximum_keeps_the_last_bin_non_empty() {
        let bins = MasteryBins::from_max(Some(9));
        assert_eq!(bins.edges(), [0, 11, 21, 31, 41, 51, 52]);
        assert_eq!(bins.bin_for(9).map(MasteryBin::label), Some("0-10"));
        assert_eq!(MasteryBins::from_max(None).edges()[6], 52);
    }

    #[test]
    fn every_level_up_to_max_is_in_exactly_one_bin() {
        for max in [0u32, 10, 11, 50, 51, 52, 97] {
            let bins = MasteryBins::from_max(Some(max));
            for level in 0..=max {
                let containing: Vec<_> = MasteryBin::ALL
                    .iter()
                    .filter(|b| bins.range(**b).contains(&u64::from(level)))
                    .collect();
                assert_eq!(containing.len(), 1, "level {level} with max {max}");
                assert_eq!(bins.bin_for(level), Some(*containing[0]));
            }
            // Ranges tile [0, upper) without gaps or overlaps.
            let mut expected_start = 0;
            for bin in MasteryBin::ALL {
                let r = bins.range(bin);
                assert_eq!(r.start, expected_start);
                assert!(r.end > r.start);
                expected_start = r.end;
            }
            assert!(expected_start > u64::from(max));
        }
    }

    #[test]
    fn bins_sort_low_to_high() {
        let mut bins = vec![MasteryBin::ALL[5], MasteryBin::ALL[0], MasteryBin::ALL[2]];
        bins.sort();
        let labels: Vec<_> = bins.iter().map(|b| b.label()).collect();
        assert_eq!(labels, ["0-10", "21-30", "51+"]);
    }
}
