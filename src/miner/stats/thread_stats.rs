// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/stats/thread_stats.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements per-worker statistics tracking for the Boost miner,
// located in the stats subdirectory of the miner module. Workers flush their
// trial counts here every poll interval; nothing is updated per trial.
//
// Tree Location:
// - src/miner/stats/thread_stats.rs (per-worker statistics logic)
// - Depends on: std

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Debug)]
pub struct ThreadStats {
    worker_id: usize,
    pub trials: AtomicU64,
    pub ranges_completed: AtomicU64,
    pub solutions_found: AtomicU64,
    start_time: Instant,
    pub peak_hashrate: AtomicU64,
}

impl ThreadStats {
    /// Create a new ThreadStats instance for a specific worker
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            trials: AtomicU64::new(0),
            ranges_completed: AtomicU64::new(0),
            solutions_found: AtomicU64::new(0),
            start_time: Instant::now(),
            peak_hashrate: AtomicU64::new(0),
        }
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Add a batch of trials and refresh the peak hashrate
    pub fn record_trials(&self, trials: u64) {
        let total = self.trials.fetch_add(trials, Ordering::Relaxed) + trials;
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            let rate = (total as f64 / elapsed) as u64;
            self.peak_hashrate.fetch_max(rate, Ordering::Relaxed);
        }
    }

    pub fn record_range_completed(&self) {
        self.ranges_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_solution(&self) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_trials(&self) -> u64 {
        self.trials.load(Ordering::Relaxed)
    }

    /// Average hashrate since the worker's stats were created
    pub fn get_hashrate(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_trials() as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_peak_hashrate(&self) -> f64 {
        self.peak_hashrate.load(Ordering::Relaxed) as f64
    }
}


// Changelog:
// - v2.0.0 (2025-07-02): Boost worker statistics.
//   - Shares replaced by trials, completed ranges and solutions.
//   - Hashrate derived from atomics; the per-thread mutexes are gone.
//   - Peak hashrate uses fetch_max.
// - v1.0.1 (2025-06-14): Added peak hashrate tracking for benchmarking.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
