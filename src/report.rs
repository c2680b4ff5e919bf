//! Output documents and summary formatting for aggregated unique coverage.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::aggregate::{AggregateSeries, GroupSeries};
use crate::error::Result;
use crate::group::FileGroup;
use crate::ingest::write_json;
use crate::model::{TestRun, UniqueCoverageReport};

pub const ALL_FILES_PER_TYPE: &str = "all_files_per_type.json";
pub const ALL_FILES_LIST: &str = "all_files_list.json";
pub const ALL_FILES_SPLIT_BY_DIR: &str = "all_files_split_by_dir.json";
pub const SERIES: &str = "series.json";

/// One group's series for every pair, keyed the way the plots consume them.
#[derive(Serialize)]
struct GroupDocument<'a> {
    total_files: BTreeMap<&'a str, &'a [u64]>,
    total_lines_unique: BTreeMap<&'a str, &'a [u64]>,
}

fn group_document<'a>(series: &BTreeMap<&'a str, &'a GroupSeries>) -> GroupDocument<'a> {
    GroupDocument {
        total_files: series
            .iter()
            .map(|(label, s)| (*label, s.total_files.as_slice()))
            .collect(),
        total_lines_unique: series
            .iter()
            .map(|(label, s)| (*label, s.total_lines_unique.as_slice()))
            .collect(),
    }
}

/// Write the file inventories and the per-group series into `results_dir`.
/// Returns the paths written.
pub fn write_outputs(results_dir: &Path, agg: &AggregateSeries) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(results_dir)?;
    let mut written = Vec::new();

    let path = results_dir.join(ALL_FILES_PER_TYPE);
    write_json(&path, &agg.all_files_per_type())?;
    written.push(path);

    let path = results_dir.join(ALL_FILES_LIST);
    write_json(&path, &agg.all_files())?;
    written.push(path);

    let path = results_dir.join(ALL_FILES_SPLIT_BY_DIR);
    write_json(&path, &agg.all_files_path_split)?;
    written.push(path);

    let groups: Vec<(FileGroup, BTreeMap<&str, &GroupSeries>)> = FileGroup::ALL
        .iter()
        .map(|g| (*g, agg.group_series(*g)))
        .collect();
    let series: BTreeMap<&str, GroupDocument> = groups
        .iter()
        .map(|(g, s)| (g.as_str(), group_document(s)))
        .collect();
    let path = results_dir.join(SERIES);
    write_json(&path, &series)?;
    written.push(path);

    Ok(written)
}

/// The document written by a single baseline subtraction: the test run
/// with its report replaced by the unique coverage.
#[derive(Serialize)]
struct DifferenceDocument<'a> {
    test: &'a str,
    total_file_count: usize,
    report: &'a UniqueCoverageReport,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// Write `difference_<timestamp>.json` into `out_dir`.
pub fn write_difference(
    out_dir: &Path,
    test_run: &TestRun,
    unique: &UniqueCoverageReport,
    timestamp: i64,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("difference_{timestamp}.json"));
    // A rerun over a previous difference document must not repeat the count.
    let mut extra = test_run.extra.clone();
    extra.remove("total_file_count");
    let doc = DifferenceDocument {
        test: &test_run.test,
        total_file_count: unique.source_files.len(),
        report: unique,
        extra: &extra,
    };
    write_json(&path, &doc)?;
    Ok(path)
}

/// Trait for formatting an aggregate summary.
pub trait SummaryFormatter {
    fn format(&self, agg: &AggregateSeries) -> String;
}

/// Totals of one group series, as shown in a summary row.
struct RowTotals {
    batches: usize,
    files: u64,
    lines: u64,
    peak_lines: u64,
}

impl RowTotals {
    fn of(series: &GroupSeries) -> Self {
        Self {
            batches: series.total_files.len(),
            files: series.total_files.iter().sum(),
            lines: series.total_lines_unique.iter().sum(),
            peak_lines: series.total_lines_unique.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Plain text formatter.
pub struct TextFormatter;

impl SummaryFormatter for TextFormatter {
    fn format(&self, agg: &AggregateSeries) -> String {
        let mut out = String::new();

        if agg.pairs.is_empty() {
            out.push_str("No pairs to summarize.\n");
            return out;
        }

        for group in FileGroup::ALL {
            writeln!(out, "{}", group.title()).unwrap();
            writeln!(
                out,
                "{:<16} {:>8} {:>10} {:>12} {:>10}",
                "PAIR", "BATCHES", "FILES", "UNIQUE", "PEAK"
            )
            .unwrap();
            writeln!(out, "{}", "-".repeat(60)).unwrap();
            for (label, series) in agg.group_series(group) {
                let t = RowTotals::of(series);
                writeln!(
                    out,
                    "{:<16} {:>8} {:>10} {:>12} {:>10}",
                    label, t.batches, t.files, t.lines, t.peak_lines
                )
                .unwrap();
            }
            out.push('\n');
        }

        let total_files = agg.all_files().len();
        let dirs = agg.all_files_path_split.len();
        writeln!(out, "Files touched: {total_files} across {dirs} directories").unwrap();
        out
    }
}

/// Markdown formatter.
pub struct MarkdownFormatter;

impl SummaryFormatter for MarkdownFormatter {
    fn format(&self, agg: &AggregateSeries) -> String {
        let mut md = String::new();

        if agg.pairs.is_empty() {
            md.push_str("No pairs to summarize.\n");
            return md;
        }

        for group in FileGroup::ALL {
            writeln!(md, "### {}\n", group.title()).unwrap();
            md.push_str("| Pair | Batches | Files | Unique lines | Peak |\n");
            md.push_str("|:-----|--------:|------:|-------------:|-----:|\n");
            for (label, series) in agg.group_series(group) {
                let t = RowTotals::of(series);
                writeln!(
                    md,
                    "| `{label}` | {} | {} | {} | {} |",
                    t.batches, t.files, t.lines, t.peak_lines
                )
                .unwrap();
            }
            md.push('\n');
        }

        if !agg.unrecognized_extensions.is_empty() {
            md.push_str("<details>\n<summary>Unrecognized extensions</summary>\n\n");
            for (ext, count) in &agg.unrecognized_extensions {
                writeln!(md, "- `{ext}`: {count}").unwrap();
            }
            md.push_str("\n</details>\n");
        }

        md
    }
}
