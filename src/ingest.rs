use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, UniqcovError};
use crate::model::{TestRun, UniqueCoverageReport};
use crate::pairing::{DifferenceSets, Gatherer};

/// Where the difference sets handed to the aggregator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetsSource {
    /// Every requested pair was read from `<results-dir>/<label>.json`.
    Cache,
    /// Recomputed from raw test runs and written back to the cache.
    Recomputed,
}

/// Read and parse a JSON document, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read(path)?;
    serde_json::from_slice(&content).map_err(|source| UniqcovError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Serialize `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_vec_pretty(value).map_err(|source| UniqcovError::Json {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Read a single test-run document.
pub fn read_test_run(path: &Path) -> Result<TestRun> {
    read_json(path)
}

/// Read every test-run document of one chunk. Fails on the first file that
/// cannot be read or parsed.
pub fn read_chunk(paths: &[PathBuf]) -> Result<Vec<TestRun>> {
    paths.iter().map(|p| read_test_run(p)).collect()
}

/// Path of the cached difference set for a pair label.
pub fn cached_pair_path(results_dir: &Path, label: &str) -> PathBuf {
    results_dir.join(format!("{label}.json"))
}

/// Read a cached difference set. A missing file is `Ok(None)`: the set
/// needs to be recomputed.
pub fn read_cached_pair(
    results_dir: &Path,
    label: &str,
) -> Result<Option<Vec<UniqueCoverageReport>>> {
    let path = cached_pair_path(results_dir, label);
    if !path.exists() {
        return Ok(None);
    }
    read_json(&path).map(Some)
}

pub fn write_cached_pair(
    results_dir: &Path,
    label: &str,
    batches: &[UniqueCoverageReport],
) -> Result<()> {
    write_json(&cached_pair_path(results_dir, label), batches)
}

/// Load the difference sets for `labels` from the results directory, or
/// recompute them from `chunks` when any cached set is missing.
///
/// With no labels the cache cannot be consulted, so every pair found in the
/// chunks is recomputed. Recomputed sets are written back to the cache.
pub fn load_difference_sets(
    results_dir: &Path,
    labels: &[String],
    chunks: &[Vec<PathBuf>],
) -> Result<(DifferenceSets, SetsSource)> {
    if !labels.is_empty() {
        let mut cached = DifferenceSets::new();
        for label in labels {
            match read_cached_pair(results_dir, label)? {
                Some(batches) => {
                    cached.insert(label.clone(), batches);
                }
                None => break,
            }
        }
        if cached.len() == labels.len() {
            return Ok((cached, SetsSource::Cache));
        }
    }

    if chunks.is_empty() {
        return Err(UniqcovError::MissingInput(format!(
            "no cached results in {} and no chunk inputs to recompute from",
            results_dir.display()
        )));
    }

    let mut gatherer = if labels.is_empty() {
        Gatherer::new()
    } else {
        Gatherer::with_allowed(labels.to_vec())
    };
    for chunk in chunks {
        let runs = read_chunk(chunk)?;
        gatherer.add_chunk(&runs);
    }
    let sets = gatherer.finish();

    std::fs::create_dir_all(results_dir)?;
    for (label, batches) in &sets {
        write_cached_pair(results_dir, label, batches)?;
    }

    Ok((sets, SetsSource::Recomputed))
}
