//! In-memory representation of the coveralls-style JSON that grcov emits
//! (`grcov -t coveralls`), plus the unique-coverage report produced by
//! baseline subtraction. Fields this crate does not interpret are kept in
//! `extra` so a report survives a load/transform/store cycle intact.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hit count for one source line. `None` means the line is not
/// instrumented, which is a different answer from `Some(0)`.
pub type LineHits = Option<u64>;

/// Coverage for a single source file.
///
/// `coverage[i]` describes source line `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub name: String,
    pub coverage: Vec<LineHits>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileCoverage {
    pub fn new(name: impl Into<String>, coverage: Vec<LineHits>) -> Self {
        Self {
            name: name.into(),
            coverage,
            extra: Map::new(),
        }
    }

    /// 1-based line numbers with a positive hit count.
    #[must_use]
    pub fn hit_lines(&self) -> BTreeSet<usize> {
        self.coverage
            .iter()
            .enumerate()
            .filter(|(_, hits)| matches!(hits, Some(n) if *n > 0))
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Number of lines with a positive hit count.
    #[must_use]
    pub fn covered_line_count(&self) -> u64 {
        self.coverage
            .iter()
            .filter(|hits| matches!(hits, Some(n) if *n > 0))
            .count() as u64
    }
}

/// A complete coverage report for one test execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub source_files: Vec<FileCoverage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoverageReport {
    pub fn new(source_files: Vec<FileCoverage>) -> Self {
        Self {
            source_files,
            extra: Map::new(),
        }
    }
}

/// The lines of a test report that the baseline did not also hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueCoverageReport {
    pub source_files: Vec<FileCoverage>,
    /// Number of files present in the test report but not the baseline.
    pub unique_file_count: usize,
    /// Names of those files, in test-report order.
    pub unique_files: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UniqueCoverageReport {
    /// Total number of unique lines across every included file.
    #[must_use]
    pub fn unique_line_count(&self) -> u64 {
        self.source_files
            .iter()
            .map(FileCoverage::covered_line_count)
            .sum()
    }
}

impl From<UniqueCoverageReport> for CoverageReport {
    fn from(report: UniqueCoverageReport) -> Self {
        Self {
            source_files: report.source_files,
            extra: report.extra,
        }
    }
}

/// One test-execution document: the test name and its coverage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub test: String,
    pub report: CoverageReport,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestRun {
    /// Execution profile, taken from the token after the last `.` of the
    /// test name (`test_baselinecoverage.xul` → `xul`).
    #[must_use]
    pub fn profile(&self) -> &str {
        self.test.rsplit('.').next().unwrap_or(&self.test)
    }

    /// Whether this run is a baseline (setup/teardown only) run.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.test.contains("baselinecoverage")
    }
}
