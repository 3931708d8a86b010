// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the miner functionality of the Boost
// miner, located in the miner subdirectory. It declares submodules and re-exports
// key types for use throughout the project.
//
// Tree Location:
// - src/miner/mod.rs (miner module entry point)
// - Submodules: cpu, stats

pub mod cpu;
pub mod stats;

// Re-export key types for convenience
pub use cpu::{MiningSession, SessionReport, WorkerPool, solve};
pub use stats::{HashRateSample, SessionStats, ThreadStats};

// Changelog:
// - v2.0.0 (2025-07-02): Removed the GPU module; CPU mining only.
// - v1.1.0 (2025-06-24): Added GPU mining module.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
