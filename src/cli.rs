//! Command handler functions for the uniqcov CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout. Progress and warnings go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;

use crate::aggregate::{aggregate, AggregateConfig};
use crate::ingest::{self, SetsSource};
use crate::report::{self, MarkdownFormatter, SummaryFormatter, TextFormatter};
use crate::subtract::subtract;

/// Output style for the `analyze` summary.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Style {
    Text,
    Markdown,
}

pub fn cmd_subtract(baseline: &Path, test: &Path, out_dir: &Path) -> Result<String> {
    let baseline_run = ingest::read_test_run(baseline)
        .with_context(|| format!("Failed to load baseline {}", baseline.display()))?;
    let test_run = ingest::read_test_run(test)
        .with_context(|| format!("Failed to load test coverage {}", test.display()))?;

    eprintln!("Removing baseline coverage ...");
    let unique = subtract(&baseline_run.report, &test_run.report);

    let path = report::write_difference(out_dir, &test_run, &unique, Utc::now().timestamp())
        .context("Failed to write difference report")?;

    Ok(format!(
        "Unique to '{}' against '{}': {} files, {} new files, {} lines → {}\n",
        test_run.test,
        baseline_run.test,
        unique.source_files.len(),
        unique.unique_file_count,
        unique.unique_line_count(),
        path.display(),
    ))
}

pub fn cmd_analyze(
    results_dir: &Path,
    chunks: &[Vec<PathBuf>],
    pairs: &[String],
    config: &AggregateConfig,
    style: Style,
) -> Result<String> {
    let (sets, source) = ingest::load_difference_sets(results_dir, pairs, chunks)
        .context("Failed to load difference sets")?;
    match source {
        SetsSource::Cache => eprintln!(
            "Loaded {} cached pairs from {}",
            sets.len(),
            results_dir.display()
        ),
        SetsSource::Recomputed => {
            eprintln!("Recomputed {} pairs from {} chunks", sets.len(), chunks.len());
            for (label, batches) in &sets {
                eprintln!("  {label}: {}", batches.len());
            }
        }
    }

    let agg = aggregate(&sets, config);
    for (ext, count) in &agg.unrecognized_extensions {
        eprintln!("Warning: no group for extension '{ext}' ({count} files)");
    }

    report::write_outputs(results_dir, &agg).context("Failed to write results")?;

    let formatter: &dyn SummaryFormatter = match style {
        Style::Text => &TextFormatter,
        Style::Markdown => &MarkdownFormatter,
    };
    Ok(formatter.format(&agg))
}
