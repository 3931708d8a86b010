// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/cpu/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the CPU mining functionality of the
// Boost miner, located in the cpu subdirectory of the miner module. It declares
// submodules and re-exports key types for use throughout the project.
//
// Tree Location:
// - src/miner/cpu/mod.rs (CPU miner module entry point)
// - Submodules: miner, pool, thread

pub mod miner;
pub mod pool;
pub mod thread;

// Re-export key types for convenience
pub use miner::{HashRateCallback, MiningSession, SessionReport, solve};
pub use pool::{WorkerPool, partition};
pub use thread::{HashWorker, WorkerState};

// Changelog:
// - v2.0.0 (2025-07-02): Added the pool submodule; CpuMiner became MiningSession.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
