// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/stats/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the statistics tracking functionality
// of the Boost miner, located in the stats subdirectory of the miner module. It
// declares submodules and re-exports key types for use throughout the project.
//
// Tree Location:
// - src/miner/stats/mod.rs (stats module entry point)
// - Submodules: session_stats, thread_stats

pub mod session_stats;
pub mod thread_stats;

// Re-export key types for convenience
pub use session_stats::{HashRateSample, SessionStats};
pub use thread_stats::ThreadStats;

// Changelog:
// - v2.0.0 (2025-07-02): MinerStats became SessionStats; GPU info removed.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
