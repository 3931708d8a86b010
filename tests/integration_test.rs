// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/integration_test.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains integration tests for the Boost miner, located in the tests
// directory. It drives whole search sessions: easy and impossible targets,
// cancellation, determinism, validation and hashing faults.
//
// Tree Location:
// - tests/integration_test.rs (integration tests)
// - Depends on: boost-miner

#[cfg(test)]
mod tests {
    use boost_miner::core::error::HashError;
    use boost_miner::core::sha256::sha256d_hash;
    use boost_miner::{
        JobParams, JobSpec, MinerError, MiningSession, PowHasher, SessionConfig, SessionResult,
        Sha256d, StopSignal, solve,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Roughly every second trial succeeds.
    const EASY_BITS: u32 = 0x207fffff;
    /// Target 1: no digest will ever meet it.
    const IMPOSSIBLE_BITS: u32 = 0x03000001;

    struct CountingHasher {
        calls: Arc<AtomicU64>,
    }

    impl PowHasher for CountingHasher {
        fn hash256(&self, input: &[u8]) -> Result<[u8; 32], HashError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(sha256d_hash(input))
        }
    }

    struct FailingHasher {
        calls: AtomicU64,
        fail_after: u64,
    }

    impl PowHasher for FailingHasher {
        fn hash256(&self, input: &[u8]) -> Result<[u8; 32], HashError> {
            if self.calls.fetch_add(1, Ordering::Relaxed) >= self.fail_after {
                return Err(HashError("hardware error".to_string()));
            }
            Ok(sha256d_hash(input))
        }
    }

    fn params(bits: u32, nonces: u64) -> JobParams {
        let mut params = JobParams::new([0u8; 32], bits);
        params.time_range = 1_700_000_000..1_700_000_001;
        params.extra_nonce_range = 0..1;
        params.nonce_range = 0..nonces;
        params
    }

    fn job(bits: u32, nonces: u64) -> JobSpec {
        JobSpec::new(params(bits, nonces)).unwrap()
    }

    fn tight_config(workers: usize, poll_interval: u64) -> SessionConfig {
        SessionConfig {
            worker_count: workers,
            poll_interval,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_easy_target_single_worker_scenario() {
        let job = job(EASY_BITS, 1000);
        let result = solve(&job, 1, &StopSignal::new()).unwrap();

        let solution = result.solution().expect("easy target should be solved");
        assert!(solution.nonce() < 1000, "nonce {} outside [0, 1000)", solution.nonce());
        assert!(solution.meets_target());
        assert!(solution.verify(&Sha256d).unwrap());
    }

    #[test]
    fn test_trivial_target_solved_within_few_trials() {
        let session = MiningSession::new(tight_config(1, 1)).unwrap();
        let report = session.run(params(EASY_BITS, 1 << 32)).unwrap();

        assert!(report.result.is_found());
        assert!(report.total_trials <= 64, "took {} trials", report.total_trials);
    }

    #[test]
    fn test_concurrent_workers_surface_exactly_one_solution() {
        let job = job(EASY_BITS, 1 << 16);
        for workers in [2, 4, 8] {
            match solve(&job, workers, &StopSignal::new()).unwrap() {
                SessionResult::Found(solution) => {
                    assert!(solution.meets_target());
                    assert!(solution.worker() < workers);
                    assert!(solution.verify(&Sha256d).unwrap());
                }
                other => panic!("expected a solution with {} workers, got {:?}", workers, other),
            }
        }
    }

    #[test]
    fn test_impossible_target_enumerates_exactly_the_space() {
        for workers in [1, 3, 4] {
            let session = MiningSession::new(tight_config(workers, 7)).unwrap();
            let report = session.run(params(IMPOSSIBLE_BITS, 5000)).unwrap();
            assert!(matches!(report.result, SessionResult::NoSolution));
            assert_eq!(report.total_trials, 5000, "{} workers", workers);
        }
    }

    #[test]
    fn test_outer_loop_covers_extra_nonces_and_timestamps() {
        let mut p = params(IMPOSSIBLE_BITS, 1000);
        p.extra_nonce_range = 0..3;
        p.time_range = 10..12;

        let session = MiningSession::new(tight_config(2, 100)).unwrap();
        let report = session.run(p).unwrap();
        assert!(matches!(report.result, SessionResult::NoSolution));
        assert_eq!(report.total_trials, 1000 * 3 * 2);
    }

    #[test]
    fn test_solution_found_after_outer_step() {
        let mut p = params(0x2000ffff, 4);
        p.extra_nonce_range = 0..10_000;
        let job = JobSpec::new(p).unwrap();

        let solution = match solve(&job, 2, &StopSignal::new()).unwrap() {
            SessionResult::Found(solution) => solution,
            other => panic!("expected a solution, got {:?}", other),
        };
        assert!(solution.nonce() < 4);
        assert!(solution.verify(&Sha256d).unwrap());
    }

    #[test]
    fn test_external_cancellation_is_prompt() {
        let job = job(IMPOSSIBLE_BITS, 1 << 32);
        let stop = StopSignal::new();
        let trigger = stop.clone();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            trigger.stop();
        });

        let start = Instant::now();
        let result = solve(&job, 2, &stop).unwrap();
        canceller.join().unwrap();

        assert!(matches!(result, SessionResult::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_stopped_before_start_is_cancelled() {
        let stop = StopSignal::new();
        stop.stop();
        let result = solve(&job(EASY_BITS, 1000), 4, &stop).unwrap();
        assert!(matches!(result, SessionResult::Cancelled));
    }

    #[test]
    fn test_solve_does_not_raise_callers_signal() {
        let job = job(EASY_BITS, 1000);
        let stop = StopSignal::new();

        let first = solve(&job, 2, &stop).unwrap();
        assert!(first.is_found());
        assert!(!stop.is_stopped());

        let second = solve(&job, 2, &stop).unwrap();
        assert!(second.is_found(), "reused signal gave {:?}", second);
    }

    #[test]
    fn test_max_duration_cancels_session() {
        let config = SessionConfig {
            worker_count: 2,
            max_duration: Some(Duration::from_millis(50)),
            ..SessionConfig::default()
        };
        let session = MiningSession::new(config).unwrap();
        let report = session.run(params(IMPOSSIBLE_BITS, 1 << 32)).unwrap();
        assert!(matches!(report.result, SessionResult::Cancelled));
        assert!(report.total_trials > 0);
    }

    #[test]
    fn test_single_worker_is_deterministic() {
        let job = job(0x2000ffff, 1 << 20);
        let first = solve(&job, 1, &StopSignal::new()).unwrap();
        let second = solve(&job, 1, &StopSignal::new()).unwrap();

        let (a, b) = match (first, second) {
            (SessionResult::Found(a), SessionResult::Found(b)) => (a, b),
            other => panic!("expected two solutions, got {:?}", other),
        };
        assert_eq!(a.nonce(), b.nonce());
        assert_eq!(a.extra_nonce(), b.extra_nonce());
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_malformed_target_rejected_before_hashing() {
        for bits in [0xff123456, 0x04923456, 0x01003456] {
            let calls = Arc::new(AtomicU64::new(0));
            let session = MiningSession::new(SessionConfig::with_workers(2))
                .unwrap()
                .with_hasher(CountingHasher { calls: Arc::clone(&calls) });

            let err = session.run(params(bits, 1000)).unwrap_err();
            assert!(
                matches!(err, MinerError::InvalidTarget { bits: b, .. } if b == bits),
                "{:#010x}: {}",
                bits,
                err
            );
            assert_eq!(calls.load(Ordering::Relaxed), 0);
        }
    }

    #[test]
    fn test_hash_failure_is_worker_fault() {
        let session = MiningSession::new(tight_config(2, 16))
            .unwrap()
            .with_hasher(FailingHasher {
                calls: AtomicU64::new(0),
                fail_after: 100,
            });

        let err = session.run(params(IMPOSSIBLE_BITS, 1 << 20)).unwrap_err();
        assert!(matches!(err, MinerError::WorkerFault { .. }), "{}", err);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_poll_interval_rejected() {
        let err = MiningSession::new(tight_config(1, 0)).err().unwrap();
        assert!(matches!(err, MinerError::InvalidConfig(_)));
    }

    #[test]
    fn test_counting_hasher_sees_every_trial() {
        let calls = Arc::new(AtomicU64::new(0));
        let session = MiningSession::new(tight_config(3, 5))
            .unwrap()
            .with_hasher(CountingHasher { calls: Arc::clone(&calls) });
        let report = session.run(params(IMPOSSIBLE_BITS, 300)).unwrap();

        // One metadata commitment per worker plus one hash per trial
        assert_eq!(calls.load(Ordering::Relaxed), report.total_trials + 3);
    }
}

// Changelog:
// - v2.0.0 (2025-07-02): Boost session integration tests.
//   - Replaced SHA3x/pool message tests with end-to-end search tests.
// - v1.0.0 (2025-06-14): Enhanced integration test implementation.
