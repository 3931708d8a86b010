// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/error.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the error taxonomy of the Boost miner, located in the core
// subdirectory. Validation errors are raised before any worker is spawned;
// worker faults abort the whole session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Invalid compact target {bits:#010x}: {reason}")]
    InvalidTarget { bits: u32, reason: &'static str },

    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    #[error("Worker {worker} faulted")]
    WorkerFault {
        worker: usize,
        #[source]
        source: HashError,
    },

    #[error("The {0} thread panicked")]
    ThreadPanic(&'static str),
}

/// Failure reported by a hashing primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Hash primitive failed: {0}")]
pub struct HashError(pub String);

impl MinerError {
    pub fn invalid_job(message: impl Into<String>) -> Self {
        MinerError::InvalidJob(message.into())
    }

    /// True for errors detected before any hashing took place.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MinerError::InvalidJob(_) | MinerError::InvalidTarget { .. } | MinerError::InvalidConfig(_)
        )
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial error taxonomy.
//   - InvalidJob / InvalidTarget / InvalidConfig for pre-flight validation.
//   - WorkerFault wraps the HashError raised by the hashing primitive.
//   - ThreadPanic for a session thread that died without reporting.
