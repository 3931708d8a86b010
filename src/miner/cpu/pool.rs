// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/cpu/pool.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the worker pool of the Boost miner, located in the cpu
// subdirectory of the miner module. It splits the nonce space into contiguous
// blocks, runs one HashWorker per block on scoped threads, and walks the outer
// extra-nonce/timestamp loop until a worker wins, the space runs out or the
// stop signal is raised.

use super::thread::{HashWorker, Terminal, WorkerShared, WorkerState};
use crate::Result;
use crate::core::error::{HashError, MinerError};
use crate::core::job::{JobSpec, OuterStep};
use crate::core::sha256::PowHasher;
use crate::core::types::{SessionResult, StopSignal, WorkerRange};
use crate::miner::stats::SessionStats;
use log::{debug, info, warn};
use std::ops::Range;
use std::sync::{Arc, OnceLock};

const LOG_TARGET: &str = "boostminer::pool";

/// Split `range` into at most `workers` contiguous blocks of equal size.
///
/// The worker count is clamped to the range length so no block is empty; the
/// last block absorbs the remainder.
pub fn partition(range: Range<u64>, workers: usize) -> Vec<WorkerRange> {
    let len = range.end.saturating_sub(range.start);
    if len == 0 {
        return Vec::new();
    }
    let count = (workers.max(1) as u64).min(len);
    let block = len / count;

    (0..count)
        .map(|i| {
            let start = range.start + i * block;
            let end = if i == count - 1 { range.end } else { start + block };
            WorkerRange { start, end }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct WorkerPool {
    ranges: Vec<WorkerRange>,
    poll_interval: u64,
}

impl WorkerPool {
    pub fn new(job: &JobSpec, worker_count: usize, poll_interval: u64) -> Self {
        Self {
            ranges: partition(job.nonce_range(), worker_count),
            poll_interval,
        }
    }

    pub fn ranges(&self) -> &[WorkerRange] {
        &self.ranges
    }

    /// Number of workers actually launched per outer step.
    pub fn worker_count(&self) -> usize {
        self.ranges.len()
    }

    /// Search the job to a terminal result.
    ///
    /// Leaves `stop` raised when a worker found a solution or faulted.
    pub fn run<H: PowHasher + ?Sized>(
        &self,
        job: &Arc<JobSpec>,
        hasher: &H,
        stop: &StopSignal,
        stats: &SessionStats,
    ) -> Result<SessionResult> {
        let slot = OnceLock::new();
        let outcome = {
            let shared = WorkerShared {
                job,
                hasher,
                stop,
                slot: &slot,
                stats,
                poll_interval: self.poll_interval,
            };
            let mut workers: Vec<HashWorker<'_, H>> = self
                .ranges
                .iter()
                .enumerate()
                .map(|(id, range)| HashWorker::new(id, *range, &shared))
                .collect();

            self.walk_outer_loop(job, &mut workers, &shared)?
        };

        match slot.into_inner() {
            Some(Terminal::Found(solution)) => Ok(SessionResult::Found(solution)),
            Some(Terminal::Fault(e)) => Err(e),
            None => Ok(outcome),
        }
    }

    fn walk_outer_loop<H: PowHasher + ?Sized>(
        &self,
        job: &JobSpec,
        workers: &mut [HashWorker<'_, H>],
        shared: &WorkerShared<'_, H>,
    ) -> Result<SessionResult> {
        for step in job.outer_steps() {
            if shared.stop.is_stopped() {
                return Ok(SessionResult::Cancelled);
            }
            shared.stats.record_outer_step();
            debug!(
                target: LOG_TARGET,
                "Outer step: extra nonce {}, timestamp {}", step.extra_nonce, step.timestamp
            );

            let states = Self::run_step(workers, step, shared.stop)?;

            if shared.slot.get().is_some() {
                return Ok(SessionResult::Cancelled);
            }
            if states.iter().any(|s| *s != WorkerState::Exhausted) {
                return Ok(SessionResult::Cancelled);
            }
        }

        info!(target: LOG_TARGET, "Search space exhausted without a solution");
        Ok(SessionResult::NoSolution)
    }

    /// Run every worker over its range for one outer step and join them all.
    fn run_step<H: PowHasher + ?Sized>(
        workers: &mut [HashWorker<'_, H>],
        step: OuterStep,
        stop: &StopSignal,
    ) -> Result<Vec<WorkerState>> {
        let joined = crossbeam::scope(|scope| {
            let handles: Vec<_> = workers
                .iter_mut()
                .map(|worker| {
                    let id = worker.id();
                    (id, scope.spawn(move |_| worker.run(step)))
                })
                .collect();

            handles
                .into_iter()
                .map(|(id, handle)| {
                    handle.join().map_err(|_| {
                        warn!(target: LOG_TARGET, "Worker {} panicked", id);
                        stop.stop();
                        MinerError::WorkerFault {
                            worker: id,
                            source: HashError("worker thread panicked".to_string()),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()
        });

        match joined {
            Ok(states) => states,
            Err(_) => Err(MinerError::ThreadPanic("worker pool")),
        }
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial worker pool.
//   - Contiguous nonce partitioning replaces per-thread random nonce starts.
//   - Workers run on crossbeam scoped threads, joined every outer step.
//   - Result precedence: claimed slot, then cancellation, then the next
//     outer step; NoSolution once the outer loop ends.
