// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/boost.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file holds the Boost proof-of-work field layout, located in the core
// subdirectory. It writes the 80-byte work header and the metadata whose
// Hash256 is committed in it, and exposes in-place setters for the fields a
// worker varies per trial.
//
// Header layout (integers little-endian):
//   [0..4)   category (version 2: category/general-purpose bits merged)
//   [4..36)  content digest
//   [36..68) Hash256(metadata)
//   [68..72) timestamp
//   [72..76) compact target
//   [76..80) nonce
//
// Metadata layout:
//   tag | miner pubkey hash (20) | extra nonce 1 (4, BE) | extra nonce 2 (8, BE)
//   | user nonce (4, LE) | additional data

use serde::{Deserialize, Serialize};

pub const HEADER_LEN: usize = 80;
pub const MAX_TAG_LEN: usize = 20;
pub const MAX_ADDITIONAL_DATA_LEN: usize = 520;
pub const MINER_PUBKEY_HASH_LEN: usize = 20;

/// Bits of the category field a version 2 script fixes. The remaining bits
/// (BIP320 general-purpose bits) are chosen by the miner.
pub const CATEGORY_MASK: u32 = 0xE000_1FFF;
pub const GENERAL_PURPOSE_BITS_MASK: u32 = !CATEGORY_MASK;

const CATEGORY_OFFSET: usize = 0;
const CONTENT_OFFSET: usize = 4;
const METADATA_HASH_OFFSET: usize = 36;
const TIMESTAMP_OFFSET: usize = 68;
const BITS_OFFSET: usize = 72;
const NONCE_OFFSET: usize = 76;

/// Boost output script version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScriptVersion {
    #[default]
    V1,
    /// Adds miner-chosen general-purpose bits (ASICBoost compatible).
    V2,
}

impl TryFrom<u8> for ScriptVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ScriptVersion::V1),
            2 => Ok(ScriptVersion::V2),
            other => Err(format!("invalid script version {}", other)),
        }
    }
}

impl From<ScriptVersion> for u8 {
    fn from(version: ScriptVersion) -> Self {
        match version {
            ScriptVersion::V1 => 1,
            ScriptVersion::V2 => 2,
        }
    }
}

/// Value of the header's category field.
pub fn category_field(version: ScriptVersion, category: u32, general_purpose_bits: u32) -> u32 {
    match version {
        ScriptVersion::V1 => category,
        ScriptVersion::V2 => (category & CATEGORY_MASK) | (general_purpose_bits & GENERAL_PURPOSE_BITS_MASK),
    }
}

/// Boost metadata fields.
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    pub tag: &'a [u8],
    pub miner_pubkey_hash: &'a [u8; MINER_PUBKEY_HASH_LEN],
    pub extra_nonce_1: u32,
    pub extra_nonce_2: u64,
    pub user_nonce: u32,
    pub additional_data: &'a [u8],
}

impl Metadata<'_> {
    pub fn encoded_len(&self) -> usize {
        self.tag.len() + MINER_PUBKEY_HASH_LEN + 4 + 8 + 4 + self.additional_data.len()
    }

    /// Offset of extra nonce 2 within the encoded metadata.
    pub fn extra_nonce_2_offset(&self) -> usize {
        self.tag.len() + MINER_PUBKEY_HASH_LEN + 4
    }

    /// Replace `out` with the encoded metadata.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.encoded_len());
        out.extend_from_slice(self.tag);
        out.extend_from_slice(self.miner_pubkey_hash);
        out.extend_from_slice(&self.extra_nonce_1.to_be_bytes());
        out.extend_from_slice(&self.extra_nonce_2.to_be_bytes());
        out.extend_from_slice(&self.user_nonce.to_le_bytes());
        out.extend_from_slice(self.additional_data);
    }
}

/// Overwrite extra nonce 2 in encoded metadata.
#[inline]
pub fn set_extra_nonce_2(metadata: &mut [u8], offset: usize, extra_nonce_2: u64) {
    metadata[offset..offset + 8].copy_from_slice(&extra_nonce_2.to_be_bytes());
}

/// Write the fields that stay fixed for a whole job.
pub fn write_header_template(header: &mut [u8; HEADER_LEN], category: u32, content: &[u8; 32], bits: u32) {
    header[CATEGORY_OFFSET..CONTENT_OFFSET].copy_from_slice(&category.to_le_bytes());
    header[CONTENT_OFFSET..METADATA_HASH_OFFSET].copy_from_slice(content);
    header[BITS_OFFSET..NONCE_OFFSET].copy_from_slice(&bits.to_le_bytes());
}

#[inline]
pub fn set_metadata_hash(header: &mut [u8; HEADER_LEN], hash: &[u8; 32]) {
    header[METADATA_HASH_OFFSET..TIMESTAMP_OFFSET].copy_from_slice(hash);
}

#[inline]
pub fn set_timestamp(header: &mut [u8; HEADER_LEN], timestamp: u32) {
    header[TIMESTAMP_OFFSET..BITS_OFFSET].copy_from_slice(&timestamp.to_le_bytes());
}

#[inline]
pub fn set_nonce(header: &mut [u8; HEADER_LEN], nonce: u32) {
    header[NONCE_OFFSET..HEADER_LEN].copy_from_slice(&nonce.to_le_bytes());
}

/// Proof-of-work digest from a raw Hash256 output.
///
/// Bitcoin reads hashes as little-endian integers; reversing gives the
/// big-endian form `meets_target` compares.
#[inline]
pub fn work_digest(raw: [u8; 32]) -> [u8; 32] {
    let mut digest = raw;
    digest.reverse();
    digest
}


// Changelog:
// - v1.0.0 (2025-07-02): Boost work header and metadata layout.
//   - Replaces build_bitcoin_header: the header template is written once per
//     worker and nonce/timestamp/metadata hash are patched in place.
