// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/runner.rs
// Version: 2.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the benchmark execution engine for testing Boost mining
// performance. It runs real mining sessions on a synthetic job for a fixed
// time, restarting past every solution, and collects the hashrate.

use crate::Result;
use crate::benchmark::jobs::{BenchmarkJob, create_benchmark_job, validate_job_metrics};
use crate::core::types::{SessionConfig, SessionResult, StopSignal};
use crate::miner::cpu::MiningSession;
use crate::utils::format::FormatUtils;
use log::{debug, info};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "boostminer::benchmark";

/// Configuration for benchmark execution
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub thread_count: usize,
    pub duration: Duration,
    pub target_difficulty: f64,
    pub report_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Total hashes computed
    pub total_hashes: u64,

    pub duration: Duration,

    /// Average hashrate (H/s)
    pub hashrate: f64,

    /// Highest sampled hashrate (H/s)
    pub peak_hashrate: f64,

    pub solutions_found: u64,

    /// Solutions per million hashes the job's difficulty predicts
    pub expected_solutions_per_mh: f64,

    /// Solution rate within tolerance of the prediction
    pub within_expected: bool,

    pub thread_count: usize,
}

impl BenchmarkResult {
    pub fn format_hashrate(&self) -> String {
        FormatUtils::format_hashrate(self.hashrate)
    }

    pub fn solutions_per_mh(&self) -> f64 {
        solutions_per_mh(self.solutions_found, self.total_hashes)
    }
}

fn solutions_per_mh(solutions: u64, hashes: u64) -> f64 {
    if hashes == 0 {
        0.0
    } else {
        solutions as f64 / (hashes as f64 / 1_000_000.0)
    }
}

/// Main benchmark runner
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    stop: StopSignal,
}

impl BenchmarkRunner {
    pub fn new(threads: usize, duration_secs: u64, difficulty: f64) -> Self {
        let actual_threads = if threads == 0 {
            num_cpus::get()
        } else {
            threads
        };
        Self {
            config: BenchmarkConfig {
                thread_count: actual_threads,
                duration: Duration::from_secs(duration_secs),
                target_difficulty: difficulty,
                report_interval: Duration::from_secs(5),
            },
            stop: StopSignal::new(),
        }
    }

    pub fn with_config(config: BenchmarkConfig) -> Self {
        Self {
            config,
            stop: StopSignal::new(),
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Raising this ends the benchmark early.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn run(&self) -> Result<BenchmarkResult> {
        let benchmark_job = create_benchmark_job(self.config.target_difficulty, "Benchmark")?;
        self.run_job(benchmark_job)
    }

    /// Mine `benchmark_job` until the configured duration has elapsed. Each
    /// solution restarts the search at the next extra nonce.
    pub fn run_job(&self, benchmark_job: BenchmarkJob) -> Result<BenchmarkResult> {
        info!(
            target: LOG_TARGET,
            "🧪 Starting benchmark with {} threads for {}",
            self.config.thread_count,
            FormatUtils::format_elapsed(self.config.duration)
        );
        info!(target: LOG_TARGET, "📋 Using benchmark job: {}", benchmark_job.description);

        let mut params = benchmark_job.params.clone();
        let start_time = Instant::now();
        let mut total_hashes = 0u64;
        let mut solutions_found = 0u64;
        let mut peak_hashrate = 0.0f64;

        while !self.stop.is_stopped() {
            let remaining = self.config.duration.saturating_sub(start_time.elapsed());
            if remaining.is_zero() {
                break;
            }

            let config = SessionConfig {
                worker_count: self.config.thread_count,
                sample_interval: self.config.report_interval,
                max_duration: Some(remaining),
                ..SessionConfig::default()
            };
            let report = MiningSession::new(config)?
                .with_stop_signal(self.stop.clone())
                .run(params.clone())?;

            total_hashes += report.total_trials;
            peak_hashrate = report
                .samples
                .iter()
                .map(|s| s.hashrate)
                .fold(peak_hashrate, f64::max);

            match report.result {
                SessionResult::Found(solution) => {
                    solutions_found += 1;
                    debug!(
                        target: LOG_TARGET,
                        "💎 Benchmark solution #{}: nonce {}, extra nonce {}",
                        solutions_found,
                        solution.nonce(),
                        solution.extra_nonce()
                    );
                    params.extra_nonce_range.start = solution.extra_nonce().saturating_add(1);
                    if params.extra_nonce_range.is_empty() {
                        break;
                    }
                }
                SessionResult::NoSolution | SessionResult::Cancelled => break,
            }
        }

        let duration = start_time.elapsed();
        let hashrate = if duration.as_secs_f64() > 0.0 {
            total_hashes as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        let within_expected = validate_job_metrics(&benchmark_job, solutions_found, total_hashes);
        info!(
            target: LOG_TARGET,
            "✅ Benchmark finished: {:.4} solutions/MH (expected {:.4}){}",
            solutions_per_mh(solutions_found, total_hashes),
            benchmark_job.expected_solutions_per_mh,
            if within_expected { "" } else { ", outside tolerance" }
        );

        Ok(BenchmarkResult {
            total_hashes,
            duration,
            hashrate,
            peak_hashrate: peak_hashrate.max(hashrate),
            solutions_found,
            expected_solutions_per_mh: benchmark_job.expected_solutions_per_mh,
            within_expected,
            thread_count: self.config.thread_count,
        })
    }
}


// Changelog:
// - v2.0.1 (2025-07-04): Sessions share the runner's stop signal directly;
//   results carry the expected solution rate and whether the run matched it.
// - v2.0.0 (2025-07-02): Boost benchmark runner.
//   - Benchmark threads replaced by consecutive MiningSessions on a synthetic
//     job, so the benchmark measures the production search loop.
//   - Solutions restart the search at the next extra nonce.
//   - Peak hashrate taken from session samples; profiler removed.
//   - run() is synchronous; the binary calls it through spawn_blocking.
// - v1.0.29 (2025-06-23): Fixed benchmark duration logic.
