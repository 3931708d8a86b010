// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file serves as the main library entry point for the Boost miner,
// located at the root of the source tree. It exports all public modules
// and types that other crates or binaries can use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: core, miner, utils, benchmark

pub mod benchmark;
pub mod core;
pub mod miner;
pub mod utils;

// Re-export commonly used types at the crate root for convenience
pub use crate::benchmark::runner::BenchmarkRunner;
pub use crate::core::{
    CompactTarget, JobParams, JobSpec, MinerError, PowHasher, SessionConfig, SessionResult, Sha256d,
    Solution, StopSignal,
};
pub use crate::miner::{MiningSession, SessionReport, solve};

pub type Result<T> = std::result::Result<T, MinerError>;

// Changelog:
// - v2.0.0 (2025-07-02): Boost miner library root.
//   - Removed pool, help and tui modules.
//   - Result now carries MinerError instead of a boxed error.
//   - Re-exported solve() and MiningSession as the public search API.
// - v1.0.2 (2025-06-15): Added help module support.
// - v1.0.1 (2025-06-14): Added benchmark module support.
// - v1.0.0 (2025-06-14): Initial modular breakout from monolithic main.rs.
