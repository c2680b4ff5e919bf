//! Aggregation of unique-coverage results into per-pair, per-group series
//! and a directory-partitioned inventory of the files they touch.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::group::{extension, FileGroup};
use crate::pairing::DifferenceSets;

/// Paths left out of the directory inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateConfig {
    /// First path segments to skip entirely (e.g. test harness code).
    pub ignored_top_level: Vec<String>,
    /// Directory keys to skip, along with anything beneath them.
    pub ignored_dirs: Vec<String>,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            ignored_top_level: vec!["testing".to_string()],
            ignored_dirs: vec!["media/ffvpx".to_string()],
        }
    }
}

impl AggregateConfig {
    fn is_ignored(&self, top_level: &str, dir_key: &str) -> bool {
        self.ignored_top_level.iter().any(|t| t == top_level)
            || self.ignored_dirs.iter().any(|d| {
                dir_key == d
                    || dir_key
                        .strip_prefix(d.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    }
}

/// Parallel series for one (pair, group), indexed by batch position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupSeries {
    /// Files in the group with at least one unique line.
    pub total_files: Vec<u64>,
    /// Sum of unique lines over those files.
    pub total_lines_unique: Vec<u64>,
}

impl GroupSeries {
    fn zeroed(len: usize) -> Self {
        Self {
            total_files: vec![0; len],
            total_lines_unique: vec![0; len],
        }
    }
}

/// Everything aggregated for one pair label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairSeries {
    pub groups: BTreeMap<FileGroup, GroupSeries>,
    /// Files included in each batch's unique report.
    pub total_files: Vec<u64>,
    /// Files new to the test report in each batch.
    pub unique_file_count: Vec<u64>,
    /// Unique lines in each batch, over all groups.
    pub total_lines_unique: Vec<u64>,
    /// Distinct files that were new to the test report in any batch.
    pub unique_files: BTreeSet<String>,
    /// Distinct files included in any batch.
    pub all_files: BTreeSet<String>,
}

impl PairSeries {
    #[must_use]
    pub fn batches(&self) -> usize {
        self.total_files.len()
    }

    #[must_use]
    pub fn group(&self, group: FileGroup) -> Option<&GroupSeries> {
        self.groups.get(&group)
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSeries {
    pub pairs: BTreeMap<String, PairSeries>,
    /// Directory key → relative file names, from every touched file.
    pub all_files_path_split: BTreeMap<String, Vec<String>>,
    /// Extensions that fell through to the `etc` group, with the number of
    /// file entries seen for each.
    pub unrecognized_extensions: BTreeMap<String, u64>,
}

impl AggregateSeries {
    /// The series of one group for every pair, as consumed by the
    /// presentation layer (one figure per group, one line per pair).
    #[must_use]
    pub fn group_series(&self, group: FileGroup) -> BTreeMap<&str, &GroupSeries> {
        self.pairs
            .iter()
            .filter_map(|(label, pair)| pair.group(group).map(|s| (label.as_str(), s)))
            .collect()
    }

    /// Distinct file names across all pairs.
    #[must_use]
    pub fn all_files(&self) -> BTreeSet<&str> {
        self.pairs
            .values()
            .flat_map(|p| p.all_files.iter().map(String::as_str))
            .collect()
    }

    /// Pair label → distinct file names.
    #[must_use]
    pub fn all_files_per_type(&self) -> BTreeMap<&str, Vec<&str>> {
        self.pairs
            .iter()
            .map(|(label, p)| {
                (
                    label.as_str(),
                    p.all_files.iter().map(String::as_str).collect(),
                )
            })
            .collect()
    }
}

/// Aggregate the unique-coverage results of every pair.
#[must_use]
pub fn aggregate(sets: &DifferenceSets, config: &AggregateConfig) -> AggregateSeries {
    let mut out = AggregateSeries::default();

    for (label, batches) in sets {
        let mut pair = PairSeries {
            groups: FileGroup::ALL
                .iter()
                .map(|g| (*g, GroupSeries::zeroed(batches.len())))
                .collect(),
            ..Default::default()
        };

        for (i, report) in batches.iter().enumerate() {
            pair.total_files.push(report.source_files.len() as u64);
            pair.unique_file_count.push(report.unique_file_count as u64);
            pair.total_lines_unique.push(report.unique_line_count());
            pair.unique_files.extend(report.unique_files.iter().cloned());

            for file in &report.source_files {
                pair.all_files.insert(file.name.clone());

                let (group, recognized) = FileGroup::classify(&file.name);
                if !recognized {
                    *out
                        .unrecognized_extensions
                        .entry(extension(&file.name).to_string())
                        .or_default() += 1;
                }

                let lines = file.covered_line_count();
                if lines == 0 {
                    continue;
                }
                if let Some(series) = pair.groups.get_mut(&group) {
                    series.total_files[i] += 1;
                    series.total_lines_unique[i] += lines;
                }
            }
        }

        out.pairs.insert(label.clone(), pair);
    }

    let split = split_by_dir(out.all_files(), config);
    out.all_files_path_split = split;
    out
}

/// Split a path into its directory key and relative name.
///
/// Paths with three or more segments are keyed by their first two segments;
/// shorter paths are keyed by the first segment and named by the last.
#[must_use]
pub fn split_path(path: &str) -> (String, String) {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() > 2 {
        (segments[..2].join("/"), segments[2..].join("/"))
    } else {
        let last = segments.last().copied().unwrap_or(path);
        (segments[0].to_string(), last.to_string())
    }
}

/// Partition file names by directory key, skipping ignored paths.
pub fn split_by_dir<'a>(
    files: impl IntoIterator<Item = &'a str>,
    config: &AggregateConfig,
) -> BTreeMap<String, Vec<String>> {
    let mut split: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in files {
        let top_level = file.split('/').next().unwrap_or(file);
        let (dir_key, relative) = split_path(file);
        if config.is_ignored(top_level, &dir_key) {
            continue;
        }
        split.entry(dir_key).or_default().push(relative);
    }
    split
}
