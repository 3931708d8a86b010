// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/job.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the description of one Boost puzzle instance, located in
// the core subdirectory. JobParams is the raw, serde-loadable input; JobSpec
// is the validated, immutable form shared read-only by every worker.

use crate::core::boost::{
    self, MAX_ADDITIONAL_DATA_LEN, MAX_TAG_LEN, MINER_PUBKEY_HASH_LEN, Metadata, ScriptVersion,
};
use crate::core::difficulty::{CompactTarget, U256};
use crate::core::error::MinerError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};

/// End of the 32-bit nonce space (exclusive).
pub const NONCE_SPACE_END: u64 = 1 << 32;

/// Unvalidated job parameters, as supplied by the CLI or a job file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    /// Content digest being boosted (32 bytes)
    #[serde(with = "hex::serde")]
    pub content: Vec<u8>,

    /// Compact difficulty target
    pub bits: u32,

    /// Tag/topic, at most 20 bytes
    #[serde(default, with = "hex::serde")]
    pub tag: Vec<u8>,

    /// Free-form additional data committed with the puzzle
    #[serde(default, with = "hex::serde")]
    pub additional_data: Vec<u8>,

    #[serde(default)]
    pub category: u32,

    /// Makes otherwise identical scripts distinct
    #[serde(default)]
    pub user_nonce: u32,

    /// Miner address hash. Fixed by contract scripts, chosen by the miner for bounties
    #[serde(default = "default_miner_pubkey_hash", with = "hex::serde")]
    pub miner_pubkey_hash: Vec<u8>,

    #[serde(default)]
    pub version: ScriptVersion,

    /// Miner-chosen bits merged into the category field (version 2 only)
    #[serde(default)]
    pub general_purpose_bits: u32,

    #[serde(default)]
    pub extra_nonce_1: u32,

    #[serde(default = "default_time_range")]
    pub time_range: Range<u32>,

    #[serde(default = "default_extra_nonce_range")]
    pub extra_nonce_range: Range<u64>,

    #[serde(default = "default_nonce_range")]
    pub nonce_range: Range<u64>,
}

fn default_miner_pubkey_hash() -> Vec<u8> {
    vec![0u8; MINER_PUBKEY_HASH_LEN]
}

/// A single timestamp: the current time.
fn default_time_range() -> Range<u32> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0);
    now..now.saturating_add(1)
}

fn default_extra_nonce_range() -> Range<u64> {
    0..u64::MAX
}

fn default_nonce_range() -> Range<u64> {
    0..NONCE_SPACE_END
}

impl JobParams {
    /// Parameters with every optional field at its default.
    pub fn new(content: [u8; 32], bits: u32) -> Self {
        Self {
            content: content.to_vec(),
            bits,
            tag: Vec::new(),
            additional_data: Vec::new(),
            category: 0,
            user_nonce: 0,
            miner_pubkey_hash: default_miner_pubkey_hash(),
            version: ScriptVersion::V1,
            general_purpose_bits: 0,
            extra_nonce_1: 0,
            time_range: default_time_range(),
            extra_nonce_range: default_extra_nonce_range(),
            nonce_range: default_nonce_range(),
        }
    }
}

/// One step of the outer extra-nonce/timestamp loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterStep {
    pub extra_nonce: u64,
    pub timestamp: u32,
}

/// Validated, immutable puzzle description.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    content: [u8; 32],
    tag: Vec<u8>,
    additional_data: Vec<u8>,
    bits: CompactTarget,
    target: U256,
    category: u32,
    user_nonce: u32,
    miner_pubkey_hash: [u8; MINER_PUBKEY_HASH_LEN],
    version: ScriptVersion,
    general_purpose_bits: u32,
    extra_nonce_1: u32,
    time_range: Range<u32>,
    extra_nonce_range: Range<u64>,
    nonce_range: Range<u64>,
}

impl JobSpec {
    /// Validate parameters. Performs no I/O and no hashing.
    pub fn new(params: JobParams) -> Result<Self> {
        let content: [u8; 32] = params.content.as_slice().try_into().map_err(|_| {
            MinerError::invalid_job(format!(
                "content digest must be 32 bytes, got {}",
                params.content.len()
            ))
        })?;
        if params.tag.len() > MAX_TAG_LEN {
            return Err(MinerError::invalid_job(format!(
                "tag is too big: must be {} or fewer bytes, got {}",
                MAX_TAG_LEN,
                params.tag.len()
            )));
        }
        if params.additional_data.len() > MAX_ADDITIONAL_DATA_LEN {
            return Err(MinerError::invalid_job(format!(
                "additional data is too big: must be {} or fewer bytes, got {}",
                MAX_ADDITIONAL_DATA_LEN,
                params.additional_data.len()
            )));
        }
        let miner_pubkey_hash: [u8; MINER_PUBKEY_HASH_LEN] =
            params.miner_pubkey_hash.as_slice().try_into().map_err(|_| {
                MinerError::invalid_job(format!(
                    "miner pubkey hash must be {} bytes, got {}",
                    MINER_PUBKEY_HASH_LEN,
                    params.miner_pubkey_hash.len()
                ))
            })?;

        let bits = CompactTarget(params.bits);
        let target = bits.expand()?;

        if params.time_range.is_empty() {
            return Err(MinerError::invalid_job(format!(
                "time range {:?} is empty",
                params.time_range
            )));
        }
        if params.extra_nonce_range.is_empty() {
            return Err(MinerError::invalid_job(format!(
                "extra nonce range {:?} is empty",
                params.extra_nonce_range
            )));
        }
        if params.nonce_range.is_empty() || params.nonce_range.end > NONCE_SPACE_END {
            return Err(MinerError::invalid_job(format!(
                "nonce range {:?} must be non-empty and within the 32-bit nonce space",
                params.nonce_range
            )));
        }

        Ok(Self {
            content,
            tag: params.tag,
            additional_data: params.additional_data,
            bits,
            target,
            category: params.category,
            user_nonce: params.user_nonce,
            miner_pubkey_hash,
            version: params.version,
            general_purpose_bits: params.general_purpose_bits,
            extra_nonce_1: params.extra_nonce_1,
            time_range: params.time_range,
            extra_nonce_range: params.extra_nonce_range,
            nonce_range: params.nonce_range,
        })
    }

    pub fn content(&self) -> &[u8; 32] {
        &self.content
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    pub fn additional_data(&self) -> &[u8] {
        &self.additional_data
    }

    pub fn bits(&self) -> CompactTarget {
        self.bits
    }

    /// Expanded 256-bit target.
    pub fn target(&self) -> &U256 {
        &self.target
    }

    pub fn version(&self) -> ScriptVersion {
        self.version
    }

    pub fn general_purpose_bits(&self) -> u32 {
        self.general_purpose_bits
    }

    pub fn extra_nonce_1(&self) -> u32 {
        self.extra_nonce_1
    }

    pub fn miner_pubkey_hash(&self) -> &[u8; MINER_PUBKEY_HASH_LEN] {
        &self.miner_pubkey_hash
    }

    pub fn nonce_range(&self) -> Range<u64> {
        self.nonce_range.clone()
    }

    pub fn time_range(&self) -> Range<u32> {
        self.time_range.clone()
    }

    pub fn extra_nonce_range(&self) -> Range<u64> {
        self.extra_nonce_range.clone()
    }

    /// Difficulty of the job target, for display.
    pub fn difficulty(&self) -> f64 {
        self.bits.difficulty().unwrap_or(0.0)
    }

    /// Value of the header category field.
    pub fn category_field(&self) -> u32 {
        boost::category_field(self.version, self.category, self.general_purpose_bits)
    }

    /// Boost metadata for a given extra nonce 2.
    pub fn metadata(&self, extra_nonce_2: u64) -> Metadata<'_> {
        Metadata {
            tag: &self.tag,
            miner_pubkey_hash: &self.miner_pubkey_hash,
            extra_nonce_1: self.extra_nonce_1,
            extra_nonce_2,
            user_nonce: self.user_nonce,
            additional_data: &self.additional_data,
        }
    }

    /// Outer loop steps in search order.
    ///
    /// Extra nonce ascends across its range; when it wraps the timestamp
    /// advances by one second. Ends once the time range is exhausted.
    pub fn outer_steps(&self) -> OuterSteps {
        OuterSteps {
            extra_nonce_range: self.extra_nonce_range.clone(),
            time_range: self.time_range.clone(),
            next: Some(OuterStep {
                extra_nonce: self.extra_nonce_range.start,
                timestamp: self.time_range.start,
            }),
        }
    }
}

impl TryFrom<JobParams> for JobSpec {
    type Error = MinerError;

    fn try_from(params: JobParams) -> Result<Self> {
        JobSpec::new(params)
    }
}

/// Iterator over the outer extra-nonce/timestamp loop.
#[derive(Debug, Clone)]
pub struct OuterSteps {
    extra_nonce_range: Range<u64>,
    time_range: Range<u32>,
    next: Option<OuterStep>,
}

impl Iterator for OuterSteps {
    type Item = OuterStep;

    fn next(&mut self) -> Option<OuterStep> {
        let current = self.next?;
        let extra_nonce = current.extra_nonce + 1;
        self.next = if extra_nonce < self.extra_nonce_range.end {
            Some(OuterStep { extra_nonce, ..current })
        } else if current.timestamp + 1 < self.time_range.end {
            Some(OuterStep {
                extra_nonce: self.extra_nonce_range.start,
                timestamp: current.timestamp + 1,
            })
        } else {
            None
        };
        Some(current)
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Boost job description.
//   - Replaces PoolJob/MiningJob with JobParams (raw) and JobSpec (validated).
//   - Validation happens once, before any worker is spawned.
//   - Added the outer extra-nonce/timestamp step iterator.
