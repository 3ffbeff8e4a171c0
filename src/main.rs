use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::EnvFilter;

use compbench::bench;
use compbench::clock::MonotonicClock;
use compbench::config::{self, Overrides};
use compbench::launcher::SystemLauncher;
use compbench::report;
use compbench::types::{OutputFormat, TimeUnit};

#[derive(Parser)]
#[command(
    name = "compbench",
    version,
    about = "Build a compression binary and time repeated runs against an input file"
)]
struct Cli {
    /// Input file handed to the subject binary [default: test.txt]
    input: Option<PathBuf>,

    /// Number of timed runs [default: 10]
    #[arg(short = 'n', long)]
    runs: Option<usize>,

    /// Path to the subject binary [default: target/release/cs581-project]
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Display unit for timings [default: seconds]
    #[arg(short, long)]
    unit: Option<TimeUnit>,

    /// Print a JSON report instead of per-run lines
    #[arg(long)]
    json: bool,

    /// Config file [default: ./compbench.toml, then the user config dir]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = Overrides {
        input: cli.input,
        runs: cli.runs,
        binary: cli.binary,
        unit: cli.unit,
        json: cli.json,
    };
    let config = config::load(cli.config.as_deref(), overrides)?;
    config.check_input()?;

    let banner = "Building release binary\u{2026}";
    let mut launcher = SystemLauncher;
    let clock = MonotonicClock::new();
    let started_at = Utc::now();

    match config.format {
        OutputFormat::Text => {
            println!(
                "{}",
                banner.if_supports_color(Stream::Stdout, |s| s.dimmed())
            );
            let stdout = io::stdout();
            let mut out = stdout.lock();
            bench::run(&config, &mut launcher, &clock, &mut out)?;
        }
        OutputFormat::Json => {
            eprintln!(
                "{}",
                banner.if_supports_color(Stream::Stderr, |s| s.dimmed())
            );
            let outcome = bench::run(&config, &mut launcher, &clock, &mut io::sink())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", report::format_json(&outcome, config.unit, started_at))?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
