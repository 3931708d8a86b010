// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/stats/session_stats.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements session-wide statistics tracking for the Boost miner,
// located in the stats subdirectory of the miner module. Each MiningSession
// owns one SessionStats; there is no process-wide telemetry.
//
// Tree Location:
// - src/miner/stats/session_stats.rs (session statistics logic)
// - Depends on: std, log, thread_stats

use super::thread_stats::ThreadStats;
use crate::utils::format::FormatUtils;
use log::info;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "boostminer::stats";

/// Samples kept in the hashrate history.
const HISTORY_CAPACITY: usize = 300;

/// One aggregate hashrate measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashRateSample {
    pub elapsed: Duration,
    pub total_trials: u64,
    /// Trials per second since the session started
    pub hashrate: f64,
}

#[derive(Debug)]
pub struct SessionStats {
    pub total_trials: AtomicU64,
    pub outer_steps: AtomicU64,
    start_time: Instant,
    pub thread_stats: Vec<Arc<ThreadStats>>,
    hashrate_history: Mutex<VecDeque<HashRateSample>>,
}

impl SessionStats {
    pub fn new(num_workers: usize) -> Self {
        let thread_stats = (0..num_workers).map(|i| Arc::new(ThreadStats::new(i))).collect();

        Self {
            total_trials: AtomicU64::new(0),
            outer_steps: AtomicU64::new(0),
            start_time: Instant::now(),
            thread_stats,
            hashrate_history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Flush a worker's batch of trials into the session totals.
    pub fn record_trials(&self, worker_id: usize, trials: u64) {
        if trials == 0 {
            return;
        }
        self.total_trials.fetch_add(trials, Ordering::Relaxed);
        if let Some(stats) = self.thread_stats.get(worker_id) {
            stats.record_trials(trials);
        }
    }

    pub fn record_outer_step(&self) {
        self.outer_steps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_trials(&self) -> u64 {
        self.total_trials.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn get_total_hashrate(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_total_trials() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Take a hashrate sample and append it to the history.
    pub fn sample(&self) -> HashRateSample {
        let elapsed = self.elapsed();
        let total_trials = self.get_total_trials();
        let secs = elapsed.as_secs_f64();
        let sample = HashRateSample {
            elapsed,
            total_trials,
            hashrate: if secs > 0.0 { total_trials as f64 / secs } else { 0.0 },
        };

        if let Ok(mut history) = self.hashrate_history.lock() {
            history.push_back(sample);
            if history.len() > HISTORY_CAPACITY {
                history.pop_front();
            }
        }
        sample
    }

    pub fn hashrate_history(&self) -> Vec<HashRateSample> {
        self.hashrate_history
            .lock()
            .map(|history| history.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn get_active_worker_count(&self) -> usize {
        self.thread_stats.iter().filter(|t| t.get_trials() > 0).count()
    }

    /// Log a summary of the session so far
    pub fn display_summary(&self, label: &str) {
        let total_trials = self.get_total_trials();
        let peak = self
            .thread_stats
            .iter()
            .map(|t| t.get_peak_hashrate())
            .fold(0.0, f64::max);

        info!(target: LOG_TARGET, "📊 SESSION SUMMARY - {}", label);
        info!(target: LOG_TARGET, "├─ Hashrate: {}", FormatUtils::format_hashrate(self.get_total_hashrate()));
        info!(target: LOG_TARGET, "├─ Total Trials: {}", FormatUtils::format_number(total_trials));
        info!(target: LOG_TARGET, "├─ Outer Steps: {}", self.outer_steps.load(Ordering::Relaxed));
        info!(target: LOG_TARGET, "├─ Peak Worker Hashrate: {}", FormatUtils::format_hashrate(peak));
        info!(
            target: LOG_TARGET,
            "├─ Active Workers: {}/{}",
            self.get_active_worker_count(),
            self.thread_stats.len()
        );
        info!(target: LOG_TARGET, "└─ Session Time: {}", FormatUtils::format_elapsed(self.elapsed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_trials_updates_totals_and_worker() {
        let stats = SessionStats::new(3);
        stats.record_trials(0, 10);
        stats.record_trials(2, 5);
        stats.record_trials(7, 1);
        assert_eq!(stats.get_total_trials(), 16);
        assert_eq!(stats.thread_stats[0].get_trials(), 10);
        assert_eq!(stats.thread_stats[2].get_trials(), 5);
        assert_eq!(stats.get_active_worker_count(), 2);
    }

    #[test]
    fn test_sample_history() {
        let stats = SessionStats::new(1);
        stats.record_trials(0, 1000);
        let sample = stats.sample();
        assert_eq!(sample.total_trials, 1000);
        assert!(sample.hashrate >= 0.0);
        assert_eq!(stats.hashrate_history(), vec![sample]);

        for _ in 0..HISTORY_CAPACITY + 5 {
            stats.sample();
        }
        assert_eq!(stats.hashrate_history().len(), HISTORY_CAPACITY);
    }
}

// Changelog:
// - v2.0.0 (2025-07-02): Session-scoped Boost statistics.
//   - Renamed MinerStats to SessionStats; owned by one MiningSession.
//   - Shares and luck metrics replaced by trials and hashrate samples.
//   - Dashboard reduced to a session summary.
// - v1.0.3 (2025-06-14): Fixed Top 5 Shares sorting.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
