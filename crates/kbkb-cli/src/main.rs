//! kbkb - cluster workloads as a falling-block puzzle board.
//!
//! Run: kubectl get pods,nodes -A -o json > snapshot.json && kbkb snapshot.json

#![allow(clippy::doc_markdown)]

mod config;
mod snapshot;

use clap::Parser;
use config::{ConfigError, KbkbConfig, Overrides};
use kbkb_core::{ClassifierKind, Grid, GridBuilder, RegionAnalyzer};
use kbkb_terminal::{render, CharSet, CharsetPreset, OverwritePrinter, TuiError};
use snapshot::{SnapshotError, SnapshotSource};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Draw cluster workloads as a puzzle board, one column per node.
#[derive(Parser)]
#[command(name = "kbkb", version, about, long_about = None)]
struct Cli {
    /// Snapshot files from `kubectl get pods,nodes -o json|yaml` (`-` for stdin)
    #[arg(required_unless_present = "dump_config")]
    snapshots: Vec<PathBuf>,

    /// Path to config file (YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color strategy (annotation, hash)
    #[arg(long)]
    classifier: Option<ClassifierKind>,

    /// Annotation holding the color
    #[arg(long, value_name = "KEY")]
    annotation_key: Option<String>,

    /// Glyph set (narrow, wide)
    #[arg(long)]
    charset: Option<CharsetPreset>,

    /// Same-color neighbours needed for a group to be erasable
    #[arg(short, long)]
    threshold: Option<usize>,

    /// Only report erasable groups when every pod is ready
    #[arg(long)]
    require_stable: bool,

    /// Refresh interval in milliseconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Draw one frame and exit
    #[arg(long)]
    once: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    dump_config: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            classifier: self.classifier,
            annotation_key: self.annotation_key.clone(),
            charset: self.charset,
            threshold: self.threshold,
            require_stable: self.require_stable,
            refresh_ms: self.refresh,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Terminal(#[from] TuiError),
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// One complete frame: the board plus a status line.
fn draw(grid: &Grid, analyzer: &RegionAnalyzer, charset: &CharSet) -> String {
    let erasable = analyzer.find_erasable(grid);
    let mut frame = render(grid, charset);
    frame.push_str(&format!(
        "erasable: {}/{} cells (threshold {})\n",
        erasable.len(),
        grid.cell_count(),
        analyzer.threshold()
    ));
    frame
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => KbkbConfig::load_from_file(path)?,
        None => KbkbConfig::default(),
    };
    config.apply_overrides(cli.overrides());
    tracing::debug!(?config, "configuration loaded");

    let builder = GridBuilder::new(config.classifier.build(&config.annotation_key));
    let analyzer = RegionAnalyzer::new(config.threshold).with_gate(config.gate);
    let charset = config.charset();
    let refresh = Duration::from_millis(config.refresh_ms);
    let mut source = SnapshotSource::new(cli.snapshots.clone());
    let mut printer = OverwritePrinter::new(io::stdout().lock());

    loop {
        match source.load() {
            Ok(snapshot) => {
                let grid = builder.build(&snapshot.workloads, &snapshot.nodes);
                printer.print(&draw(&grid, &analyzer, &charset))?;
            }
            Err(err) if !cli.once => {
                tracing::warn!(error = %err, "snapshot unavailable, keeping previous frame");
            }
            Err(err) => return Err(err.into()),
        }

        if cli.once {
            return Ok(());
        }
        thread::sleep(refresh);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", KbkbConfig::default_yaml());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kbkb: {err}");
            ExitCode::FAILURE
        }
    }
}
