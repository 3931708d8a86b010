// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/cpu/thread.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the implementation of individual mining workers for the
// Boost miner, located in the cpu subdirectory of the miner module. It handles
// nonce iteration, hash computation, and solution detection for one slice of
// the nonce space.

use crate::core::boost;
use crate::core::difficulty::meets_target;
use crate::core::error::{HashError, MinerError};
use crate::core::job::{JobSpec, OuterStep};
use crate::core::sha256::PowHasher;
use crate::core::types::{Solution, StopSignal, WorkerRange};
use crate::core::Candidate;
use crate::miner::stats::SessionStats;
use log::{debug, error, info};
use std::sync::{Arc, OnceLock};

const LOG_TARGET: &str = "boostminer::worker";

/// Lifecycle of a HashWorker within one outer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
    /// This worker's solution filled the result slot.
    Found,
    /// The assigned range was enumerated without a hit.
    Exhausted,
    /// The stop signal was observed, or another worker won first.
    Cancelled,
    /// The hashing primitive failed.
    Faulted,
}

impl WorkerState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, WorkerState::Idle | WorkerState::Running)
    }
}

/// Session-ending event. The first worker to record one wins.
#[derive(Debug)]
pub enum Terminal {
    Found(Solution),
    Fault(MinerError),
}

/// Everything a worker reads but does not own.
pub struct WorkerShared<'a, H: PowHasher + ?Sized> {
    pub job: &'a Arc<JobSpec>,
    pub hasher: &'a H,
    pub stop: &'a StopSignal,
    pub slot: &'a OnceLock<Terminal>,
    pub stats: &'a SessionStats,
    /// Trials between stop checks and stats flushes
    pub poll_interval: u64,
}

pub struct HashWorker<'a, H: PowHasher + ?Sized> {
    id: usize,
    range: WorkerRange,
    shared: &'a WorkerShared<'a, H>,
    candidate: Candidate,
    state: WorkerState,
}

impl<'a, H: PowHasher + ?Sized> HashWorker<'a, H> {
    pub fn new(id: usize, range: WorkerRange, shared: &'a WorkerShared<'a, H>) -> Self {
        Self {
            id,
            range,
            shared,
            candidate: Candidate::new(shared.job),
            state: WorkerState::Idle,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn range(&self) -> WorkerRange {
        self.range
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Enumerate the assigned nonces, ascending, for one outer step.
    ///
    /// The stop signal is checked before the first trial and then every
    /// `poll_interval` trials; trial counts are flushed at the same points.
    pub fn run(&mut self, step: OuterStep) -> WorkerState {
        self.state = WorkerState::Running;
        let shared = self.shared;

        if let Err(e) = self.candidate.set_outer(step, shared.hasher) {
            return self.fault(e);
        }

        let target = shared.job.target();
        let mut batch = 0u64;

        for nonce in self.range.start..self.range.end {
            if batch == 0 && shared.stop.is_stopped() {
                return self.finish(WorkerState::Cancelled);
            }

            self.candidate.set_nonce(nonce as u32);
            let raw = match shared.hasher.hash256(self.candidate.header()) {
                Ok(raw) => raw,
                Err(e) => {
                    shared.stats.record_trials(self.id, batch);
                    return self.fault(e);
                }
            };
            batch += 1;

            let digest = boost::work_digest(raw);
            if meets_target(&digest, target) {
                shared.stats.record_trials(self.id, batch);
                return self.found(digest);
            }

            if batch == shared.poll_interval {
                shared.stats.record_trials(self.id, batch);
                batch = 0;
            }
        }

        shared.stats.record_trials(self.id, batch);
        if let Some(stats) = shared.stats.thread_stats.get(self.id) {
            stats.record_range_completed();
        }
        debug!(
            target: LOG_TARGET,
            "Worker {} exhausted nonces [{}, {}) at extra nonce {} timestamp {}",
            self.id, self.range.start, self.range.end, step.extra_nonce, step.timestamp
        );
        self.finish(WorkerState::Exhausted)
    }

    fn found(&mut self, digest: [u8; 32]) -> WorkerState {
        let shared = self.shared;
        let solution = Solution::new(Arc::clone(shared.job), &self.candidate, digest, self.id);

        if shared.slot.set(Terminal::Found(solution)).is_err() {
            debug!(
                target: LOG_TARGET,
                "Worker {} found nonce {} after the result was already claimed",
                self.id,
                self.candidate.nonce()
            );
            return self.finish(WorkerState::Cancelled);
        }
        shared.stop.stop();

        if let Some(stats) = shared.stats.thread_stats.get(self.id) {
            stats.record_solution();
        }
        info!(
            target: LOG_TARGET,
            "💎 Worker {} found a solution! Nonce: {}, Extra nonce: {}, Timestamp: {}",
            self.id,
            self.candidate.nonce(),
            self.candidate.extra_nonce(),
            self.candidate.timestamp()
        );
        info!(target: LOG_TARGET, "🔍 Digest: {}", hex::encode(digest));
        self.finish(WorkerState::Found)
    }

    fn fault(&mut self, source: HashError) -> WorkerState {
        let shared = self.shared;
        error!(target: LOG_TARGET, "Worker {} hashing failed: {}", self.id, source);
        // Losing the slot to an earlier solution or fault is fine; the session
        // ends either way.
        let _ = shared.slot.set(Terminal::Fault(MinerError::WorkerFault {
            worker: self.id,
            source,
        }));
        shared.stop.stop();
        self.finish(WorkerState::Faulted)
    }

    fn finish(&mut self, state: WorkerState) -> WorkerState {
        self.state = state;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::job::JobParams;
    use crate::core::sha256::Sha256d;

    struct FailingHasher;

    impl PowHasher for FailingHasher {
        fn hash256(&self, _input: &[u8]) -> Result<[u8; 32], HashError> {
            Err(HashError("unavailable".to_string()))
        }
    }

    fn job(bits: u32) -> Arc<JobSpec> {
        let mut params = JobParams::new([0u8; 32], bits);
        params.time_range = 1000..1001;
        params.extra_nonce_range = 0..1;
        params.nonce_range = 0..256;
        Arc::new(JobSpec::new(params).unwrap())
    }

    fn step() -> OuterStep {
        OuterStep { extra_nonce: 0, timestamp: 1000 }
    }

    #[test]
    fn test_worker_exhausts_impossible_range() {
        let job = job(0x03000001);
        let stop = StopSignal::new();
        let slot = OnceLock::new();
        let stats = SessionStats::new(1);
        let shared = WorkerShared {
            job: &job,
            hasher: &Sha256d,
            stop: &stop,
            slot: &slot,
            stats: &stats,
            poll_interval: 10,
        };
        let mut worker = HashWorker::new(0, WorkerRange { start: 0, end: 256 }, &shared);
        assert_eq!(worker.state(), WorkerState::Idle);
        assert_eq!(worker.run(step()), WorkerState::Exhausted);
        assert_eq!(stats.get_total_trials(), 256);
        assert!(slot.get().is_none());
        assert!(!stop.is_stopped());
    }

    #[test]
    fn test_worker_finds_easy_target() {
        let job = job(0x207fffff);
        let stop = StopSignal::new();
        let slot = OnceLock::new();
        let stats = SessionStats::new(1);
        let shared = WorkerShared {
            job: &job,
            hasher: &Sha256d,
            stop: &stop,
            slot: &slot,
            stats: &stats,
            poll_interval: 1,
        };
        let mut worker = HashWorker::new(0, WorkerRange { start: 0, end: 256 }, &shared);
        assert_eq!(worker.run(step()), WorkerState::Found);
        assert!(stop.is_stopped());
        match slot.get() {
            Some(Terminal::Found(solution)) => {
                assert!(solution.meets_target());
                assert!(solution.verify(&Sha256d).unwrap());
            }
            other => panic!("expected a solution, got {:?}", other),
        }
    }

    #[test]
    fn test_worker_cancelled_before_first_trial() {
        let job = job(0x207fffff);
        let stop = StopSignal::new();
        stop.stop();
        let slot = OnceLock::new();
        let stats = SessionStats::new(1);
        let shared = WorkerShared {
            job: &job,
            hasher: &Sha256d,
            stop: &stop,
            slot: &slot,
            stats: &stats,
            poll_interval: 4,
        };
        let mut worker = HashWorker::new(0, WorkerRange { start: 0, end: 256 }, &shared);
        assert_eq!(worker.run(step()), WorkerState::Cancelled);
        assert_eq!(stats.get_total_trials(), 0);
    }

    #[test]
    fn test_worker_fault_claims_slot() {
        let job = job(0x207fffff);
        let stop = StopSignal::new();
        let slot = OnceLock::new();
        let stats = SessionStats::new(1);
        let shared = WorkerShared {
            job: &job,
            hasher: &FailingHasher,
            stop: &stop,
            slot: &slot,
            stats: &stats,
            poll_interval: 4,
        };
        let mut worker = HashWorker::new(3, WorkerRange { start: 0, end: 256 }, &shared);
        assert_eq!(worker.run(step()), WorkerState::Faulted);
        assert!(worker.state().is_terminal());
        assert!(stop.is_stopped());
        assert!(matches!(
            slot.get(),
            Some(Terminal::Fault(MinerError::WorkerFault { worker: 3, .. }))
        ));
    }
}

// Changelog:
// - v2.0.0 (2025-07-02): Boost hash worker.
//   - Replaced the job-channel mining loop with HashWorker, which enumerates
//     an assigned WorkerRange for one outer step and reports a WorkerState.
//   - The header buffer lives in the worker's Candidate; only the nonce bytes
//     change per trial.
//   - First success is recorded in a shared OnceLock and raises the shared
//     StopSignal; late finders end as Cancelled.
//   - Trial counts are flushed to SessionStats once per poll interval.
// - v1.1.4 (2025-06-18): Fixed type mismatches and compilation errors.
