// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/cpu/miner.rs
// Version: 3.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file drives one Boost mining session, located in the cpu subdirectory
// of the miner module. A MiningSession validates the job, runs the worker pool
// to a terminal result and samples the aggregate hashrate on a monitor thread
// while the workers run.

use super::pool::WorkerPool;
use crate::Result;
use crate::core::error::MinerError;
use crate::core::job::{JobParams, JobSpec};
use crate::core::sha256::{PowHasher, Sha256d};
use crate::core::types::{SessionConfig, SessionResult, StopSignal};
use crate::miner::stats::{HashRateSample, SessionStats};
use crate::utils::format::FormatUtils;
use crossbeam::channel::{Receiver, after, bounded, never, tick};
use crossbeam::select;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

const LOG_TARGET: &str = "boostminer::session";

/// Hashrate observer, called on the monitor thread after every sample.
pub type HashRateCallback = Box<dyn Fn(&HashRateSample) + Send + Sync>;

/// What one session produced.
#[derive(Debug)]
pub struct SessionReport {
    pub result: SessionResult,
    pub worker_count: usize,
    /// Trials performed across all workers
    pub total_trials: u64,
    pub elapsed: Duration,
    pub samples: Vec<HashRateSample>,
}

impl SessionReport {
    /// Average trials per second over the whole session
    pub fn hashrate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_trials as f64 / secs
        } else {
            0.0
        }
    }
}

pub struct MiningSession<H: PowHasher = Sha256d> {
    config: SessionConfig,
    hasher: H,
    stop: StopSignal,
    on_hashrate: Option<HashRateCallback>,
}

impl MiningSession<Sha256d> {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            hasher: Sha256d,
            stop: StopSignal::new(),
            on_hashrate: None,
        })
    }
}

impl<H: PowHasher> MiningSession<H> {
    /// Replace the hashing primitive.
    pub fn with_hasher<H2: PowHasher>(self, hasher: H2) -> MiningSession<H2> {
        MiningSession {
            config: self.config,
            hasher,
            stop: self.stop,
            on_hashrate: self.on_hashrate,
        }
    }

    /// Share an externally owned stop signal.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn on_hashrate<F>(mut self, callback: F) -> Self
    where
        F: Fn(&HashRateSample) + Send + Sync + 'static,
    {
        self.on_hashrate = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Handle that stops this session when raised. Running the session never
    /// raises it.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Validate `params` and mine them.
    pub fn run(&self, params: JobParams) -> Result<SessionReport> {
        let job = JobSpec::new(params)?;
        self.run_job(Arc::new(job))
    }

    /// Mine an already validated job. Never retries; a fault ends the session.
    pub fn run_job(&self, job: Arc<JobSpec>) -> Result<SessionReport> {
        let pool = WorkerPool::new(&job, self.config.effective_workers(), self.config.poll_interval);
        let stats = SessionStats::new(pool.worker_count());

        info!(
            target: LOG_TARGET,
            "⛏️  Mining content {} | difficulty {} | {} workers | nonces [{}, {})",
            hex::encode(job.content()),
            FormatUtils::format_difficulty(job.difficulty()),
            pool.worker_count(),
            job.nonce_range().start,
            job.nonce_range().end
        );

        // Winners and the deadline raise this run's flag only; the session
        // signal is observed, never written.
        let stop = self.stop.child();
        let (done_tx, done_rx) = bounded::<()>(0);
        let joined = crossbeam::scope(|scope| {
            let stats = &stats;
            let run_stop = &stop;
            let monitor = scope.spawn(move |_| self.monitor(stats, run_stop, done_rx));

            let result = pool.run(&job, &self.hasher, run_stop, stats);
            drop(done_tx);
            if monitor.join().is_err() {
                warn!(target: LOG_TARGET, "Hashrate monitor panicked");
            }
            result
        });
        let result = match joined {
            Ok(result) => result?,
            Err(_) => return Err(MinerError::ThreadPanic("session")),
        };

        let report = SessionReport {
            result,
            worker_count: pool.worker_count(),
            total_trials: stats.get_total_trials(),
            elapsed: stats.elapsed(),
            samples: stats.hashrate_history(),
        };

        match &report.result {
            SessionResult::Found(solution) => info!(
                target: LOG_TARGET,
                "✅ Solved after {} trials in {}: nonce {}, extra nonce {}, timestamp {}",
                FormatUtils::format_number(report.total_trials),
                FormatUtils::format_elapsed(report.elapsed),
                solution.nonce(),
                solution.extra_nonce(),
                solution.timestamp()
            ),
            SessionResult::NoSolution => info!(
                target: LOG_TARGET,
                "No solution in the search space after {} trials",
                FormatUtils::format_number(report.total_trials)
            ),
            SessionResult::Cancelled => info!(
                target: LOG_TARGET,
                "⏹️  Session cancelled after {} trials",
                FormatUtils::format_number(report.total_trials)
            ),
        }
        stats.display_summary("final");

        Ok(report)
    }

    /// Sample the hashrate every interval until the pool finishes; raise the
    /// stop signal if the session outlives `max_duration`.
    fn monitor(&self, stats: &SessionStats, stop: &StopSignal, done: Receiver<()>) {
        let ticker = tick(self.config.sample_interval);
        let deadline = match self.config.max_duration {
            Some(limit) => after(limit),
            None => never(),
        };

        loop {
            select! {
                recv(done) -> _ => break,
                recv(ticker) -> _ => {
                    let sample = stats.sample();
                    info!(
                        target: LOG_TARGET,
                        "⚡ Hashrate: {} | trials {} | elapsed {}",
                        FormatUtils::format_hashrate(sample.hashrate),
                        FormatUtils::format_number(sample.total_trials),
                        FormatUtils::format_elapsed(sample.elapsed)
                    );
                    if let Some(callback) = &self.on_hashrate {
                        callback(&sample);
                    }
                },
                recv(deadline) -> _ => {
                    warn!(
                        target: LOG_TARGET,
                        "Maximum session time of {} reached, stopping workers",
                        FormatUtils::format_elapsed(self.config.max_duration.unwrap_or_default())
                    );
                    stop.stop();
                    break;
                },
            }
        }
        debug!(target: LOG_TARGET, "Hashrate monitor exiting");
    }
}

/// Search `job` with `worker_count` workers (0 = one per CPU) until a solution
/// is found, the space is exhausted or `stop` is raised.
pub fn solve(job: &JobSpec, worker_count: usize, stop: &StopSignal) -> Result<SessionResult> {
    let session = MiningSession::new(SessionConfig::with_workers(worker_count))?.with_stop_signal(stop.clone());
    Ok(session.run_job(Arc::new(job.clone()))?.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn params(bits: u32, nonces: u64) -> JobParams {
        let mut params = JobParams::new([0u8; 32], bits);
        params.time_range = 1_700_000_000..1_700_000_001;
        params.extra_nonce_range = 0..1;
        params.nonce_range = 0..nonces;
        params
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let mut config = SessionConfig::with_workers(1);
        config.poll_interval = 0;
        assert!(matches!(MiningSession::new(config), Err(MinerError::InvalidConfig(_))));
    }

    #[test]
    fn test_report_counts_trials() {
        let session = MiningSession::new(SessionConfig::with_workers(2)).unwrap();
        let report = session.run(params(0x03000001, 500)).unwrap();
        assert!(matches!(report.result, SessionResult::NoSolution));
        assert_eq!(report.total_trials, 500);
        assert_eq!(report.worker_count, 2);
    }

    #[test]
    fn test_session_reusable_after_solution() {
        let session = MiningSession::new(SessionConfig::with_workers(2)).unwrap();
        for _ in 0..2 {
            let report = session.run(params(0x207fffff, 1000)).unwrap();
            assert!(report.result.is_found());
            assert!(report.total_trials > 0);
            assert!(!session.stop_signal().is_stopped());
        }
    }

    #[test]
    fn test_deadline_leaves_session_signal_clear() {
        let config = SessionConfig {
            worker_count: 1,
            max_duration: Some(Duration::from_millis(20)),
            ..SessionConfig::default()
        };
        let session = MiningSession::new(config).unwrap();
        let report = session.run(params(0x03000001, 1 << 32)).unwrap();
        assert!(matches!(report.result, SessionResult::Cancelled));
        assert!(!session.stop_signal().is_stopped());
    }

    #[test]
    fn test_hashrate_callback_sampled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let config = SessionConfig {
            worker_count: 1,
            poll_interval: 64,
            sample_interval: Duration::from_millis(5),
            max_duration: Some(Duration::from_millis(100)),
        };
        let session = MiningSession::new(config)
            .unwrap()
            .on_hashrate(move |_| {
                seen.fetch_add(1, Ordering::Relaxed);
            });

        let report = session.run(params(0x03000001, 1 << 32)).unwrap();
        assert!(matches!(report.result, SessionResult::Cancelled));
        assert!(calls.load(Ordering::Relaxed) >= 1);
        assert!(!report.samples.is_empty());
    }
}

// Changelog:
// - v3.0.1 (2025-07-04): Each run mines under a child of the session stop
//   signal, so a solution or deadline no longer leaves the session (or the
//   caller's signal passed to solve()) stopped.
// - v3.0.0 (2025-07-02): Boost mining session.
//   - CpuMiner (pool-connected, endless) replaced by MiningSession, which
//     solves one job and returns Found, NoSolution or Cancelled.
//   - Stratum/pool handling removed; jobs arrive as JobParams or JobSpec.
//   - Hashrate reporting moved to a crossbeam select monitor with an
//     optional callback and a max-duration deadline.
//   - Added the solve() entry point.
// - v2.0.4 (2025-06-20): DNS resolution for pool addresses.
