//! Pairing of baseline runs by execution profile.
//!
//! A chunk holds the runs gathered for one test chunk. Every baseline run is
//! subtracted from every other baseline run with a different profile, and
//! the results are accumulated per pair label across chunks.

use std::collections::BTreeMap;

use crate::model::{TestRun, UniqueCoverageReport};
use crate::subtract::subtract;

/// Identifies a baseline/test profile combination. Displayed as
/// `"<baseline>-<test>"`, e.g. `xul-js` for the xul baseline subtracted from
/// js coverage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairLabel {
    pub baseline: String,
    pub test: String,
}

impl PairLabel {
    pub fn new(baseline: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            test: test.into(),
        }
    }
}

impl std::fmt::Display for PairLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.baseline, self.test)
    }
}

/// Unique-coverage results per pair label, ordered by the chunk that
/// produced them.
pub type DifferenceSets = BTreeMap<String, Vec<UniqueCoverageReport>>;

/// Subtract every baseline run in `runs` from every other baseline run with
/// a different profile. Non-baseline runs are ignored.
pub fn subtract_chunk(runs: &[TestRun]) -> Vec<(PairLabel, UniqueCoverageReport)> {
    let baselines: Vec<&TestRun> = runs.iter().filter(|r| r.is_baseline()).collect();

    let mut results = Vec::new();
    for baseline in &baselines {
        for test in &baselines {
            if baseline.profile() == test.profile() {
                continue;
            }
            let label = PairLabel::new(baseline.profile(), test.profile());
            results.push((label, subtract(&baseline.report, &test.report)));
        }
    }
    results
}

/// Accumulates chunk results into [`DifferenceSets`], optionally restricted
/// to an allow-list of pair labels.
#[derive(Debug, Default)]
pub struct Gatherer {
    allowed: Option<Vec<String>>,
    sets: DifferenceSets,
}

impl Gatherer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep results for these rendered labels. They are matched as
    /// whole strings, since a profile name may itself contain `-`. The labels
    /// are pre-registered so they appear in the output even if no chunk
    /// produced them.
    pub fn with_allowed(labels: Vec<String>) -> Self {
        let sets = labels.iter().map(|l| (l.clone(), Vec::new())).collect();
        Self {
            allowed: Some(labels),
            sets,
        }
    }

    /// Subtract one chunk and append its results.
    pub fn add_chunk(&mut self, runs: &[TestRun]) {
        for (label, unique) in subtract_chunk(runs) {
            let label = label.to_string();
            if let Some(ref allowed) = self.allowed {
                if !allowed.contains(&label) {
                    continue;
                }
            }
            self.sets.entry(label).or_default().push(unique);
        }
    }

    pub fn finish(self) -> DifferenceSets {
        self.sets
    }
}
