// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/difficulty.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the target arithmetic of the Boost miner, located in the
// core subdirectory of the source tree. It expands compact (nBits) targets to
// 256-bit integers, compares digests against them, and converts between
// difficulty and target for display and job construction.

use crate::core::error::MinerError;
use crate::Result;
use log::{debug, warn};
use std::fmt;

const LOG_TARGET: &str = "boostminer::difficulty";

mod u256 {
    use uint::construct_uint;

    construct_uint! {
        pub struct U256(4);
    }
}

pub use u256::U256;

/// Difficulty 1 target (0x00000000FFFF0000...), the genesis block target.
const MAX_TARGET: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// Fixed-point scale for difficulty -> target conversion. max_target * scale
// stays below 2^256.
const DIFFICULTY_SCALE: u64 = 1_000_000_000;

/// Compact 4-byte encoding of a 256-bit target (Bitcoin nBits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactTarget(pub u32);

impl CompactTarget {
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Expand to the full 256-bit target.
    pub fn expand(self) -> Result<U256> {
        expand(self.0)
    }

    /// Canonical compact encoding of a 256-bit target.
    pub fn from_target(target: U256) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (target >> (8 * (size - 3))).low_u32()
        };
        // The mantissa is signed; move a set high bit into the exponent.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        CompactTarget(compact | ((size as u32) << 24))
    }

    /// Compact target for a difficulty, where difficulty 1 is `MAX_TARGET`.
    pub fn from_difficulty(difficulty: f64) -> Result<Self> {
        if !difficulty.is_finite() || difficulty <= 0.0 {
            return Err(MinerError::invalid_job(format!(
                "difficulty must be a positive number, got {}",
                difficulty
            )));
        }
        let scaled_difficulty = (difficulty * DIFFICULTY_SCALE as f64) as u64;
        if scaled_difficulty == 0 {
            return Err(MinerError::invalid_job(format!(
                "difficulty {} is below the supported precision",
                difficulty
            )));
        }
        let max_target = U256::from_big_endian(&MAX_TARGET);
        let target = max_target * U256::from(DIFFICULTY_SCALE) / U256::from(scaled_difficulty);
        if target.is_zero() {
            return Err(MinerError::invalid_job(format!(
                "difficulty {} is too high to encode",
                difficulty
            )));
        }
        let compact = Self::from_target(target);
        debug!(target: LOG_TARGET, "Difficulty {} -> nbits {:08x}", difficulty, compact.0);
        Ok(compact)
    }

    /// Difficulty of this target relative to `MAX_TARGET`. Display only.
    pub fn difficulty(self) -> Result<f64> {
        let target = self.expand()?;
        Ok(u256_to_f64(U256::from_big_endian(&MAX_TARGET)) / u256_to_f64(target))
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Expand a compact target.
///
/// Fails on a set sign bit, an exponent that pushes the mantissa past 256
/// bits, or a zero result.
pub fn expand(bits: u32) -> Result<U256> {
    let exponent = (bits >> 24) as usize;
    let mantissa = bits & 0x007F_FFFF;

    if mantissa != 0 && bits & 0x0080_0000 != 0 {
        warn!(target: LOG_TARGET, "Invalid nbits: {:08x}, negative mantissa", bits);
        return Err(MinerError::InvalidTarget { bits, reason: "negative mantissa" });
    }
    if mantissa != 0
        && (exponent > 34 || (mantissa > 0xFF && exponent > 33) || (mantissa > 0xFFFF && exponent > 32))
    {
        warn!(target: LOG_TARGET, "Invalid nbits: {:08x}, exponent overflows", bits);
        return Err(MinerError::InvalidTarget { bits, reason: "exponent overflows 256 bits" });
    }

    let target = if exponent <= 3 {
        U256::from(mantissa >> (8 * (3 - exponent)))
    } else {
        U256::from(mantissa) << (8 * (exponent - 3))
    };
    if target.is_zero() {
        warn!(target: LOG_TARGET, "Invalid nbits: {:08x}, target is zero", bits);
        return Err(MinerError::InvalidTarget { bits, reason: "target is not positive" });
    }

    debug!(target: LOG_TARGET, "nbits={:08x} -> target={:064x}", bits, target);
    Ok(target)
}

/// A digest, read big-endian, meets the target iff it is <= target.
#[inline]
pub fn meets_target(digest: &[u8; 32], target: &U256) -> bool {
    U256::from_big_endian(digest) <= *target
}

/// Difficulty a digest would satisfy. Used for logging found solutions.
pub fn digest_difficulty(digest: &[u8; 32]) -> f64 {
    let value = U256::from_big_endian(digest);
    if value.is_zero() {
        return f64::INFINITY;
    }
    u256_to_f64(U256::from_big_endian(&MAX_TARGET)) / u256_to_f64(value)
}

fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}


// Changelog:
// - v1.0.1 (2025-07-04): U256 generated in its own module so the crate
//   Result alias does not leak into the macro expansion.
// - v1.0.0 (2025-07-02): Target arithmetic for Boost puzzles.
//   - expand() validates sign, overflow and zero targets (InvalidTarget).
//   - meets_target() compares big-endian digests with fixed-width U256.
//   - CompactTarget encodes targets and converts from/to difficulty using
//     scaled integer division in place of the old difficulty_to_target float path.
