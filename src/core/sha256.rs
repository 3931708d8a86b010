// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/sha256.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the SHA256d (double SHA-256) primitive used by Boost
// puzzles for both the metadata commitment and the proof-of-work header hash.
// The PowHasher trait is the seam workers hash through.

use crate::core::error::HashError;
use sha2::{Digest, Sha256};

/// Hashing primitive used by mining workers.
///
/// Returns the raw double-hash output (internal byte order). Any error is a
/// fatal worker fault; callers never retry.
pub trait PowHasher: Send + Sync {
    fn hash256(&self, input: &[u8]) -> Result<[u8; 32], HashError>;
}

/// Double SHA-256, the Bitcoin Hash256 function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256d;

impl PowHasher for Sha256d {
    #[inline]
    fn hash256(&self, input: &[u8]) -> Result<[u8; 32], HashError> {
        Ok(sha256d_hash(input))
    }
}

pub fn sha256d_hash(input: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(input);
    Sha256::digest(first).into()
}


// Changelog:
// - v1.1.0 (2025-07-02): Adapted for Boost commitments.
//   - Removed the 80-byte header restriction; metadata hashing needs any length.
//   - Removed the 4-nonce batch helper; workers patch the nonce in place.
//   - Added the PowHasher trait so the hashing primitive can be swapped.
// - v1.0.4 (2025-06-18): Fixed type mismatches and compilation errors.
