//! Pinganalyzer - ping log reliability statistics
//!
//! Entry point for the command-line tables.

use anyhow::Result;
use pinganalyzer::cli::{Args, Command};
use pinganalyzer::stats::report::host_label;
use pinganalyzer::{autocorrelation_table, AnalyzerConfig, ProbeSequence, ProbeSummary};
use std::path::{Path, PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Diagnostics go to stderr so tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pinganalyzer=info".parse()?)
                .add_directive("pinganalyzer_core=info".parse()?),
        )
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            return Ok(());
        }
    };

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path),
        None => AnalyzerConfig::default(),
    };
    if let Some(max_lag) = args.max_lag {
        config.max_lag = max_lag;
    }

    match args.command {
        Command::Help => print_help(),
        Command::Version => println!("pinganalyzer {}", pinganalyzer::VERSION),
        Command::Stats { files } => run_stats(&files, &config, args.json)?,
        Command::Autocorrelation { file } => run_autocorrelation(&file, &config, args.json)?,
    }

    Ok(())
}

fn print_help() {
    println!("Usage: pinganalyzer <COMMAND> [OPTIONS] FILE...");
    println!();
    println!("Commands:");
    println!("  stats                   Delivery rate, run lengths and RTT extrema per log");
    println!("  autocorrelation         Reply/loss autocorrelation table for one log");
    println!();
    println!("Options:");
    println!("  -j, --json              Print JSON instead of a table");
    println!("  -c, --config PATH       Load analysis settings from a JSON file");
    println!("  -k, --max-lag N         Autocorrelation lags -N..=N (default: 10)");
    println!("  -v, --version           Show version");
    println!("  -h, --help              Show this help");
    println!();
    println!("Examples:");
    println!("  pinganalyzer stats data/*-ping.txt");
    println!("  pinganalyzer autocorrelation -k 5 data/www.ntu.edu.sg-2025-08-01_10-06-34-ping.txt");
}

fn load(path: &Path) -> ProbeSequence {
    let sequence = ProbeSequence::from_path(path);
    info!(
        path = %path.display(),
        records = sequence.len(),
        lost = sequence.lost_count(),
        "Loaded ping log"
    );
    sequence
}

fn run_stats(files: &[PathBuf], config: &AnalyzerConfig, json: bool) -> Result<()> {
    let summaries: Vec<ProbeSummary> = files
        .iter()
        .map(|path| ProbeSummary::new(host_label(path), &load(path), config.run_boundary))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "{:<26}{:>14}{:>22}{:>21}{:>10}{:>10}",
        "Host", "Deliver_rate", "Longest_consecutive", "Longest_burst_lost", "Min_RTT", "Max_RTT"
    );
    println!("{}", "=".repeat(103));
    for s in &summaries {
        println!(
            "{:<26}{:>14.6}{:>22}{:>21}{:>10.3}{:>10.3}",
            s.host,
            s.delivery_rate,
            s.longest_consecutive,
            s.longest_lost_burst,
            s.min_rtt_ms,
            s.max_rtt_ms
        );
    }

    Ok(())
}

fn run_autocorrelation(file: &Path, config: &AnalyzerConfig, json: bool) -> Result<()> {
    let sequence = load(file);
    let rows = autocorrelation_table(&sequence, config.max_lag);

    if json {
        let report = serde_json::json!({
            "host": host_label(file),
            "delivery_rate": sequence.delivery_rate(),
            "autocorrelation": rows,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:<8}{:>28}{:>28}",
        "k", "Autocorrelation_replied", "Autocorrelation_lost"
    );
    println!("{}", "=".repeat(64));
    for row in &rows {
        println!("{:<8}{:>28.6}{:>28.6}", row.lag, row.replied, row.lost);
    }
    println!("{}", "=".repeat(64));
    println!("Delivery rate");
    println!("{}", "=".repeat(64));
    println!("{:.6}", sequence.delivery_rate());

    Ok(())
}
