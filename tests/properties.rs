//! Property-based tests for baseline subtraction and file grouping.

use std::collections::HashMap;

use proptest::prelude::*;
use uniqcov::group::FileGroup;
use uniqcov::model::{CoverageReport, FileCoverage, LineHits};
use uniqcov::subtract::subtract;

// ============================================================================
// Strategies
// ============================================================================

fn arb_hits() -> impl Strategy<Value = LineHits> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(0u64)),
        2 => (1u64..50).prop_map(Some),
    ]
}

fn arb_coverage() -> impl Strategy<Value = Vec<LineHits>> {
    prop::collection::vec(arb_hits(), 0..24)
}

/// Reports drawn from a small pool of names so baseline and test overlap.
fn arb_report() -> impl Strategy<Value = CoverageReport> {
    prop::collection::btree_map(
        prop::sample::select(vec!["a.cpp", "b.h", "c.js", "d.jsm", "e.py", "Makefile"]),
        arb_coverage(),
        0..6,
    )
    .prop_map(|files| {
        CoverageReport::new(
            files
                .into_iter()
                .map(|(name, coverage)| FileCoverage::new(name, coverage))
                .collect(),
        )
    })
}

fn positive_sum(coverage: &[LineHits]) -> u64 {
    coverage.iter().flatten().filter(|n| **n > 0).sum()
}

fn non_zero_positions(report: &CoverageReport) -> Vec<(String, usize, u64)> {
    report
        .source_files
        .iter()
        .flat_map(|f| {
            f.coverage.iter().enumerate().filter_map(|(i, hits)| match hits {
                Some(n) if *n > 0 => Some((f.name.clone(), i, *n)),
                _ => None,
            })
        })
        .collect()
}

// ============================================================================
// Subtraction properties
// ============================================================================

proptest! {
    /// Shared files only ever carry null, zero, or the original test count.
    #[test]
    fn output_values_come_from_test(baseline in arb_report(), test in arb_report()) {
        let unique = subtract(&baseline, &test);
        let originals: HashMap<&str, &FileCoverage> =
            test.source_files.iter().map(|f| (f.name.as_str(), f)).collect();

        for file in &unique.source_files {
            let original = originals[file.name.as_str()];
            prop_assert_eq!(file.coverage.len(), original.coverage.len());
            for (out, orig) in file.coverage.iter().zip(&original.coverage) {
                match (out, orig) {
                    (None, None) => {}
                    (Some(0), Some(_)) => {}
                    (Some(n), Some(m)) => {
                        prop_assert_eq!(n, m);
                    }
                    _ => {
                        prop_assert!(false, "null changed: {:?} -> {:?}", orig, out);
                    }
                }
            }
        }
    }

    /// Unique coverage never exceeds the original test coverage.
    #[test]
    fn output_is_a_reduction(baseline in arb_report(), test in arb_report()) {
        let unique = subtract(&baseline, &test);
        let originals: HashMap<&str, &FileCoverage> =
            test.source_files.iter().map(|f| (f.name.as_str(), f)).collect();

        for file in &unique.source_files {
            let original = originals[file.name.as_str()];
            prop_assert!(positive_sum(&file.coverage) <= positive_sum(&original.coverage));
        }
    }

    /// Files missing from the baseline pass through untouched, one count each.
    #[test]
    fn new_files_pass_through(baseline in arb_report(), test in arb_report()) {
        let unique = subtract(&baseline, &test);
        let baseline_names: Vec<&str> =
            baseline.source_files.iter().map(|f| f.name.as_str()).collect();
        let new_files: Vec<&FileCoverage> = test
            .source_files
            .iter()
            .filter(|f| !baseline_names.contains(&f.name.as_str()))
            .collect();

        prop_assert_eq!(unique.unique_file_count, new_files.len());
        for file in new_files {
            let out = unique.source_files.iter().find(|f| f.name == file.name);
            prop_assert_eq!(out, Some(file));
        }
    }

    /// Subtracting the same baseline again changes no positive entry.
    #[test]
    fn resubtraction_is_a_no_op(baseline in arb_report(), test in arb_report()) {
        let once = subtract(&baseline, &test);
        let twice = subtract(&baseline, &CoverageReport::from(once.clone()));

        prop_assert_eq!(
            non_zero_positions(&CoverageReport::from(twice)),
            non_zero_positions(&CoverageReport::from(once))
        );
    }

    /// A unique line is never hit by the baseline.
    #[test]
    fn unique_lines_are_not_hit_by_baseline(baseline in arb_report(), test in arb_report()) {
        let unique = subtract(&baseline, &test);
        for file in &unique.source_files {
            if let Some(base) = baseline.source_files.iter().find(|f| f.name == file.name) {
                let base_hits = base.hit_lines();
                for line in file.hit_lines() {
                    prop_assert!(!base_hits.contains(&line));
                }
            }
        }
    }
}

// ============================================================================
// Grouping properties
// ============================================================================

proptest! {
    /// Every name lands in exactly one group, and `Etc` exactly when the
    /// extension is not in a table.
    #[test]
    fn classification_is_a_partition(name in "[a-z/]{0,12}(\\.[a-zA-Z]{0,4})?") {
        let (group, recognized) = FileGroup::classify(&name);
        let matching: Vec<FileGroup> = FileGroup::ALL
            .iter()
            .copied()
            .filter(|g| g.extensions().contains(&uniqcov::group::extension(&name)))
            .collect();

        prop_assert!(matching.len() <= 1);
        match matching.first() {
            Some(g) => {
                prop_assert_eq!(group, *g);
                prop_assert!(recognized);
            }
            None => {
                prop_assert_eq!(group, FileGroup::Etc);
                prop_assert!(!recognized);
            }
        }
    }
}
