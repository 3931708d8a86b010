// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/jobs.rs
// Version: 2.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides synthetic Boost puzzles for measuring mining performance
// without a real bounty to work on.

use crate::Result;
use crate::core::difficulty::CompactTarget;
use crate::core::job::{JobParams, NONCE_SPACE_END};

/// Hashes needed on average to solve a difficulty 1 puzzle.
const HASHES_PER_DIFFICULTY: f64 = 4_294_967_296.0;

/// Fixed timestamp so benchmark runs are comparable.
const BENCHMARK_TIMESTAMP: u32 = 1_750_191_225;

/// Benchmark-specific job configuration
#[derive(Debug, Clone)]
pub struct BenchmarkJob {
    pub params: JobParams,

    /// Expected solutions per million hashes (for validation)
    pub expected_solutions_per_mh: f64,

    pub description: String,
}

/// Synthetic puzzle at the given difficulty.
pub fn create_benchmark_job(difficulty: f64, label: &str) -> Result<BenchmarkJob> {
    let bits = CompactTarget::from_difficulty(difficulty)?;
    let actual_difficulty = bits.difficulty()?;

    let mut params = JobParams::new(
        [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98,
            0x76, 0x54, 0x32, 0x10,
        ],
        bits.bits(),
    );
    params.tag = b"benchmark".to_vec();
    params.additional_data = format!("boost-miner {} benchmark", label).into_bytes();
    params.user_nonce = 0x0b00_57ed;
    params.extra_nonce_1 = 0xbe0c_4a11;
    params.time_range = BENCHMARK_TIMESTAMP..BENCHMARK_TIMESTAMP + 3600;
    params.extra_nonce_range = 0..u64::MAX;
    params.nonce_range = 0..NONCE_SPACE_END;

    Ok(BenchmarkJob {
        params,
        expected_solutions_per_mh: 1_000_000.0 / (actual_difficulty * HASHES_PER_DIFFICULTY),
        description: format!("{} Boost job - difficulty ~{:.10}", label, actual_difficulty),
    })
}

/// Check a run's solution rate against the job's expectation
pub fn validate_job_metrics(job: &BenchmarkJob, actual_solutions: u64, total_hashes: u64) -> bool {
    if total_hashes == 0 {
        return false;
    }

    let actual_per_mh = (actual_solutions as f64 * 1_000_000.0) / total_hashes as f64;
    let tolerance = 0.5; // 50% tolerance for randomness
    let expected = job.expected_solutions_per_mh;

    actual_per_mh >= expected * (1.0 - tolerance) && actual_per_mh <= expected * (1.0 + tolerance)
}


// Changelog:
// - v2.0.1 (2025-07-04): Dropped the fixed easy/medium/realistic presets;
//   the runner builds jobs from the requested difficulty.
// - v2.0.0 (2025-07-02): Boost benchmark jobs.
//   - Benchmark jobs are JobParams with a fixed content digest, tag and
//     timestamp; SHA3x/SV2 header fixtures removed.
//   - Difficulty to compact conversion now lives in core::difficulty.
// - v1.0.16 (2025-06-17): Fixed SHA-256 difficulty calculations.
