// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/candidate.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the per-worker trial input, located in the core
// subdirectory. A Candidate owns the header and metadata buffers for one
// worker; they are allocated once and patched in place for every trial.

use crate::core::boost::{self, HEADER_LEN};
use crate::core::error::HashError;
use crate::core::job::{JobSpec, OuterStep};
use crate::core::sha256::PowHasher;

/// One trial input: nonce, extra nonce and timestamp plus the header they
/// serialize into. Never shared between workers.
#[derive(Debug, Clone)]
pub struct Candidate {
    nonce: u32,
    extra_nonce: u64,
    timestamp: u32,
    header: [u8; HEADER_LEN],
    metadata: Vec<u8>,
    extra_nonce_offset: usize,
}

impl Candidate {
    /// Candidate positioned at the job's first outer step. The metadata hash
    /// is not computed until `set_outer` is called.
    pub fn new(job: &JobSpec) -> Self {
        let extra_nonce = job.extra_nonce_range().start;
        let timestamp = job.time_range().start;
        let metadata_fields = job.metadata(extra_nonce);

        let mut metadata = Vec::new();
        metadata_fields.encode_into(&mut metadata);

        let mut header = [0u8; HEADER_LEN];
        boost::write_header_template(&mut header, job.category_field(), job.content(), job.bits().bits());
        boost::set_timestamp(&mut header, timestamp);

        Self {
            nonce: 0,
            extra_nonce,
            timestamp,
            header,
            metadata,
            extra_nonce_offset: metadata_fields.extra_nonce_2_offset(),
        }
    }

    /// Move to an outer step. Rewrites extra nonce and timestamp and
    /// recommits the metadata hash.
    pub fn set_outer<H: PowHasher + ?Sized>(&mut self, step: OuterStep, hasher: &H) -> Result<(), HashError> {
        self.extra_nonce = step.extra_nonce;
        self.timestamp = step.timestamp;
        boost::set_extra_nonce_2(&mut self.metadata, self.extra_nonce_offset, step.extra_nonce);
        let metadata_hash = hasher.hash256(&self.metadata)?;
        boost::set_metadata_hash(&mut self.header, &metadata_hash);
        boost::set_timestamp(&mut self.header, step.timestamp);
        Ok(())
    }

    #[inline]
    pub fn set_nonce(&mut self, nonce: u32) {
        self.nonce = nonce;
        boost::set_nonce(&mut self.header, nonce);
    }

    #[inline]
    pub fn header(&self) -> &[u8; HEADER_LEN] {
        &self.header
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn extra_nonce(&self) -> u64 {
        self.extra_nonce
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::job::JobParams;
    use crate::core::sha256::{Sha256d, sha256d_hash};

    fn job() -> JobSpec {
        let mut p = JobParams::new([0x11; 32], 0x1d00ffff);
        p.tag = b"tag".to_vec();
        p.extra_nonce_range = 10..20;
        p.time_range = 1000..1010;
        JobSpec::new(p).unwrap()
    }

    #[test]
    fn test_set_outer_commits_metadata() {
        let job = job();
        let mut candidate = Candidate::new(&job);
        candidate
            .set_outer(OuterStep { extra_nonce: 15, timestamp: 1003 }, &Sha256d)
            .unwrap();

        let mut expected_metadata = Vec::new();
        job.metadata(15).encode_into(&mut expected_metadata);
        let expected_hash = sha256d_hash(&expected_metadata);

        assert_eq!(&candidate.header()[36..68], &expected_hash);
        assert_eq!(&candidate.header()[68..72], &1003u32.to_le_bytes());
        assert_eq!(candidate.extra_nonce(), 15);
        assert_eq!(candidate.timestamp(), 1003);
    }

    #[test]
    fn test_set_nonce_only_touches_nonce() {
        let job = job();
        let mut candidate = Candidate::new(&job);
        candidate
            .set_outer(OuterStep { extra_nonce: 10, timestamp: 1000 }, &Sha256d)
            .unwrap();
        let before = *candidate.header();
        candidate.set_nonce(0x0102_0304);
        let after = candidate.header();

        assert_eq!(&before[..76], &after[..76]);
        assert_eq!(&after[76..], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(candidate.nonce(), 0x0102_0304);
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Per-worker trial buffer.
//   - Header and metadata are allocated once per worker; the hot path only
//     overwrites the nonce bytes.
