// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the core functionality of the Boost
// miner, located in the core subdirectory. It declares submodules and re-exports
// key types for use throughout the project.

pub mod boost;
pub mod candidate;
pub mod difficulty;
pub mod error;
pub mod job;
pub mod jobs;
pub mod sha256;
pub mod types;

// Re-export the most commonly used items
pub use candidate::Candidate;
pub use difficulty::{CompactTarget, U256, expand, meets_target};
pub use error::{HashError, MinerError};
pub use job::{JobParams, JobSpec, OuterStep};
pub use jobs::{JobBook, JobEntry, JobFile};
pub use sha256::{PowHasher, Sha256d, sha256d_hash};
pub use types::{Args, SessionConfig, SessionResult, Solution, StopSignal, WorkerRange};

// Changelog:
// - v2.0.0 (2025-07-02): Boost puzzle core.
//   - Removed the sha3x module; SHA256d is the only hash.
//   - Added boost, candidate, error, job and jobs modules.
// - v1.0.1 (2025-06-16): Added simple SHA-256 support.
//   - Added sha256 module with basic double SHA-256 implementation.
