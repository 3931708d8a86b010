// Boost Miner - Free and Open Source Software Statement
//
// File: src/main.rs
// Version: 3.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Command-line front end: reads a Boost puzzle from flags or a job file, runs
// one mining session and prints the solution as JSON.

use anyhow::{Context, Result};
use boost_miner::{
    BenchmarkRunner, JobSpec, MiningSession, SessionResult, StopSignal,
    core::jobs::{DEFAULT_TILT, JobBook, JobFile},
    core::types::Args,
    utils::format::FormatUtils,
};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    init_logging(&args.log_level)?;
    info!(
        "🚀 Starting Boost Miner v{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    if args.benchmark {
        return handle_benchmark(&args).await;
    }

    handle_mining(&args).await
}

/// Console logging on stderr; stdout carries only the solution JSON.
fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level {}", level))?;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {t} - {m}{n}",
        )))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Raise `stop` on Ctrl-C.
fn stop_on_ctrl_c(stop: StopSignal) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 Ctrl-C received, stopping workers...");
            stop.stop();
        }
    });
}

/// The job to mine, plus the book and index it came from when the job file
/// held several priced jobs.
fn load_job(args: &Args) -> Result<(Arc<JobSpec>, Option<(JobBook, usize)>)> {
    let Some(path) = &args.job else {
        return Ok((Arc::new(JobSpec::new(args.job_params()?)?), None));
    };

    match JobFile::load(path)? {
        JobFile::Single(params) => Ok((Arc::new(JobSpec::new(params)?), None)),
        JobFile::Book(entries) => {
            let count = entries.len();
            let book = JobBook::from_entries(entries)?;
            let (index, job) = book
                .select(&mut rand::thread_rng(), args.min_profitability, DEFAULT_TILT)
                .with_context(|| {
                    format!(
                        "no job in {} reaches a profitability of {}",
                        path.display(),
                        args.min_profitability
                    )
                })?;
            info!(
                "📋 Selected job {} of {} (profitability {:.2} sats/difficulty)",
                index + 1,
                count,
                book.profitability(index).unwrap_or_default()
            );
            Ok((job, Some((book, index))))
        }
    }
}

async fn handle_mining(args: &Args) -> Result<()> {
    let (job, mut booked) = load_job(args)?;
    if let Some((book, index)) = booked.as_mut() {
        book.assign_worker(*index);
        debug!(
            "Job {} weight with this miner assigned: {:.4}",
            *index + 1,
            book.weight(*index, args.min_profitability, DEFAULT_TILT).unwrap_or_default()
        );
    }
    let session = MiningSession::new(args.session_config())?;
    stop_on_ctrl_c(session.stop_signal());

    info!("🎯 Difficulty: {}", FormatUtils::format_difficulty(job.difficulty()));
    info!(
        "🧵 CPU Threads: {}",
        if args.threads == 0 { "auto".to_string() } else { args.threads.to_string() }
    );

    let report = tokio::task::spawn_blocking(move || session.run_job(job))
        .await
        .context("mining task failed")??;

    if let Some((book, index)) = booked.as_mut() {
        book.release_worker(*index);
    }

    match report.result {
        SessionResult::Found(solution) => {
            let json = serde_json::to_string_pretty(&solution)?;
            println!("{}", json);
            if let Some(path) = &args.output {
                std::fs::write(path, format!("{}\n", json))
                    .with_context(|| format!("could not write {}", path.display()))?;
                info!("💾 Solution written to {}", path.display());
            }
            Ok(())
        }
        SessionResult::NoSolution => {
            warn!("❌ Search space exhausted without a solution");
            std::process::exit(2);
        }
        SessionResult::Cancelled => {
            warn!("⏹️  Mining stopped before a solution was found");
            std::process::exit(3);
        }
    }
}

async fn handle_benchmark(args: &Args) -> Result<()> {
    info!("🧪 Starting Benchmark Mode");
    info!(
        "🧵 Threads: {}",
        if args.threads == 0 { "auto".to_string() } else { args.threads.to_string() }
    );
    info!("⏱️ Duration: {}s", args.benchmark_duration);
    info!("🎯 Target difficulty: {:.10}", args.benchmark_difficulty);

    let runner = BenchmarkRunner::new(args.threads, args.benchmark_duration, args.benchmark_difficulty);
    stop_on_ctrl_c(runner.stop_signal());

    let result = tokio::task::spawn_blocking(move || runner.run())
        .await
        .context("benchmark task failed")??;

    info!("📊 Benchmark Complete!");
    info!("🎯 Difficulty tested: {:.10}", args.benchmark_difficulty);
    info!("⏱️ Duration: {:.2}s", result.duration.as_secs_f64());
    info!("⚡ Average hashrate: {}", result.format_hashrate());
    info!("🔥 Peak hashrate: {}", FormatUtils::format_hashrate(result.peak_hashrate));
    info!("📈 Total hashes: {}", FormatUtils::format_number(result.total_hashes));
    info!("💎 Solutions found: {}", result.solutions_found);
    info!(
        "📊 Solutions/MH: {:.4} (expected {:.4}{})",
        result.solutions_per_mh(),
        result.expected_solutions_per_mh,
        if result.within_expected { "" } else { ", outside tolerance" }
    );
    info!("🧵 Threads used: {}", result.thread_count);
    if let Some(eta) = FormatUtils::expected_solve_time(1.0, result.hashrate) {
        info!("⌛ Expected time for a difficulty 1 puzzle: {}", FormatUtils::format_elapsed(eta));
    }

    Ok(())
}

// Changelog:
// - v3.0.1 (2025-07-04): The job picked from a job book is assigned to this
//   miner for the length of the session; benchmark output reports the
//   expected solution rate.
// - v3.0.0 (2025-07-02): Boost miner front end.
//   - Replaced pool/SV2/GPU modes and feature gating with a single CPU
//     session per invocation; jobs come from flags or a JSON job file.
//   - Logging initialized through log4rs on stderr.
//   - Ctrl-C raises the session stop signal; the session runs on
//     spawn_blocking.
// - v2.0.0 (2025-06-24): Feature-based mining modes.
