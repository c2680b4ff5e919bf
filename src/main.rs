use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use uniqcov::aggregate::AggregateConfig;
use uniqcov::cli::{self, Style};

/// uniqcov — Coverage unique to a test profile once its baseline is removed.
#[derive(Parser)]
#[command(name = "uniqcov", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subtract one baseline run from one test run.
    Subtract {
        /// Baseline coverage document (setup/teardown only).
        #[arg(long)]
        baseline: PathBuf,

        /// Test coverage document.
        #[arg(long)]
        test: PathBuf,

        /// Directory for the difference_<timestamp>.json output.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Pair baseline runs, aggregate their unique coverage, and write the
    /// file inventories and per-group series.
    Analyze {
        /// Directory holding cached pair results and receiving outputs.
        #[arg(long)]
        results_dir: PathBuf,

        /// Coverage documents of one test chunk. Repeat once per chunk.
        /// Only needed when cached results are missing.
        #[arg(long = "chunk", num_args = 1.., value_name = "FILE")]
        chunks: Vec<Vec<PathBuf>>,

        /// Pair labels to keep, e.g. "xul-js,html-js". Default: all pairs.
        #[arg(long, value_delimiter = ',')]
        pairs: Vec<String>,

        /// First path segment to leave out of the directory inventory.
        #[arg(long, default_value = "testing")]
        ignore_top_level: Vec<String>,

        /// Directory to leave out of the directory inventory.
        #[arg(long, default_value = "media/ffvpx")]
        ignore_dir: Vec<String>,

        /// Output style for the summary.
        #[arg(long, value_enum, default_value = "text")]
        style: Style,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let output = match args.command {
        Commands::Subtract {
            baseline,
            test,
            out,
        } => cli::cmd_subtract(&baseline, &test, &out)?,
        Commands::Analyze {
            results_dir,
            chunks,
            pairs,
            ignore_top_level,
            ignore_dir,
            style,
        } => {
            let config = AggregateConfig {
                ignored_top_level: ignore_top_level,
                ignored_dirs: ignore_dir,
            };
            cli::cmd_analyze(&results_dir, &chunks, &pairs, &config, style)?
        }
    };

    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_groups_keep_commas_in_paths() {
        let args = Cli::try_parse_from([
            "uniqcov",
            "analyze",
            "--results-dir",
            "out",
            "--chunk",
            "a.json",
            "runs/b,c.json",
            "--chunk",
            "d.json",
            "--pairs",
            "xul-js,browser-chrome-xul",
        ])
        .unwrap();

        let Commands::Analyze { chunks, pairs, .. } = args.command else {
            panic!("expected analyze");
        };
        assert_eq!(
            chunks,
            vec![
                vec![PathBuf::from("a.json"), PathBuf::from("runs/b,c.json")],
                vec![PathBuf::from("d.json")],
            ]
        );
        assert_eq!(pairs, vec!["xul-js", "browser-chrome-xul"]);
    }
}
