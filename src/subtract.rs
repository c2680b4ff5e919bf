//! Baseline subtraction: keep only the coverage a test report has that its
//! baseline report does not.

use std::collections::{BTreeSet, HashMap};

use crate::model::{CoverageReport, FileCoverage, LineHits, UniqueCoverageReport};

/// Fields of [`UniqueCoverageReport`] that must not be carried over from
/// the test report.
const UNIQUE_FIELDS: [&str; 2] = ["unique_file_count", "unique_files"];

/// Subtract `baseline` from `test`, returning the coverage unique to `test`.
///
/// Files absent from the baseline are copied unchanged and counted in
/// `unique_file_count`. Files present in both are kept only if they hit at
/// least one line the baseline did not; their other instrumented lines are
/// zeroed. Neither input is modified.
#[must_use]
pub fn subtract(baseline: &CoverageReport, test: &CoverageReport) -> UniqueCoverageReport {
    let baseline_files: HashMap<&str, &FileCoverage> = baseline
        .source_files
        .iter()
        .map(|f| (f.name.as_str(), f))
        .collect();

    let mut source_files = Vec::new();
    let mut unique_files = Vec::new();

    for file in index_by_name(&test.source_files) {
        match baseline_files.get(file.name.as_str()) {
            None => {
                unique_files.push(file.name.clone());
                source_files.push(file.clone());
            }
            Some(base) => {
                let unique: BTreeSet<usize> = file
                    .hit_lines()
                    .difference(&base.hit_lines())
                    .copied()
                    .collect();
                if unique.is_empty() {
                    continue;
                }
                source_files.push(FileCoverage {
                    name: file.name.clone(),
                    coverage: mask_coverage(&file.coverage, &unique),
                    extra: file.extra.clone(),
                });
            }
        }
    }

    // A test report that was itself a subtraction result carries stale
    // counts; they would serialize as duplicate keys.
    let mut extra = test.extra.clone();
    for key in UNIQUE_FIELDS {
        extra.remove(key);
    }

    UniqueCoverageReport {
        source_files,
        unique_file_count: unique_files.len(),
        unique_files,
        extra,
    }
}

/// Deduplicate files by name. The last entry for a name wins, placed at the
/// position where the name first appeared.
fn index_by_name(files: &[FileCoverage]) -> Vec<&FileCoverage> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut ordered: Vec<&FileCoverage> = Vec::with_capacity(files.len());
    for file in files {
        match slots.get(file.name.as_str()) {
            Some(&slot) => ordered[slot] = file,
            None => {
                slots.insert(file.name.as_str(), ordered.len());
                ordered.push(file);
            }
        }
    }
    ordered
}

/// Rewrite a coverage vector so only the lines in `unique` (1-based) keep
/// their positive counts. Uninstrumented entries stay `None`.
fn mask_coverage(coverage: &[LineHits], unique: &BTreeSet<usize>) -> Vec<LineHits> {
    coverage
        .iter()
        .enumerate()
        .map(|(i, hits)| match hits {
            None => None,
            Some(n) if *n > 0 && unique.contains(&(i + 1)) => Some(*n),
            Some(_) => Some(0),
        })
        .collect()
}
