#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::json;
use uniqcov::model::{CoverageReport, FileCoverage, LineHits};

/// Build a report from `(name, coverage)` pairs.
pub fn report(files: &[(&str, Vec<LineHits>)]) -> CoverageReport {
    CoverageReport::new(
        files
            .iter()
            .map(|(name, coverage)| FileCoverage::new(*name, coverage.clone()))
            .collect(),
    )
}

/// Write a test-run document into `dir` and return its path.
pub fn write_run(dir: &Path, file: &str, test: &str, report: &CoverageReport) -> PathBuf {
    let path = dir.join(file);
    let doc = json!({ "test": test, "report": report });
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
    path
}
