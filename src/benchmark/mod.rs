// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file declares the benchmark module for performance testing of the Boost
// miner. It measures the hashrate of the real search loop on synthetic puzzles.
//
// Tree Location:
// - src/benchmark/mod.rs (benchmark module entry point)
// - Submodules: jobs, runner

pub mod jobs;
pub mod runner;

// Re-export key benchmark types and functions
pub use jobs::{BenchmarkJob, create_benchmark_job, validate_job_metrics};
pub use runner::{BenchmarkConfig, BenchmarkResult, BenchmarkRunner};

// Changelog:
// - v2.0.0 (2025-07-02): Boost benchmarks; profiler submodule removed.
// - v1.0.0 (2025-06-14): Initial benchmark module creation.
