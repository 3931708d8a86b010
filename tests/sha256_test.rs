// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/sha256_test.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains tests for the SHA256d proof-of-work hash and the Boost
// header it is applied to, located in the tests directory.
//
// Tree Location:
// - tests/sha256_test.rs (SHA256d and header layout tests)
// - Depends on: boost-miner, sha2, hex

#[cfg(test)]
mod tests {
    use boost_miner::core::boost::{HEADER_LEN, work_digest};
    use boost_miner::core::{Candidate, JobParams, JobSpec, OuterStep, Sha256d, expand, meets_target, sha256d_hash};
    use sha2::{Digest, Sha256};

    // Bitcoin genesis block header, an 80-byte header with a known work hash
    const GENESIS_HEADER: &str = "0100000000000000000000000000000000000000000000000000000000000000\
                                  000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa\
                                  4b1e5e4a29ab5f49ffff001d1dac2b7c";
    const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

    #[test]
    fn test_sha256d_matches_two_rounds() {
        let input = b"boost proof of work";
        let expected = Sha256::digest(Sha256::digest(input));
        assert_eq!(sha256d_hash(input).to_vec(), expected.to_vec());
    }

    #[test]
    fn test_genesis_work_digest() {
        let header = hex::decode(GENESIS_HEADER).unwrap();
        assert_eq!(header.len(), HEADER_LEN);

        let digest = work_digest(sha256d_hash(&header));
        assert_eq!(hex::encode(digest), GENESIS_HASH);
    }

    #[test]
    fn test_genesis_meets_its_own_target() {
        let header = hex::decode(GENESIS_HEADER).unwrap();
        let digest = work_digest(sha256d_hash(&header));

        assert!(meets_target(&digest, &expand(0x1d00ffff).unwrap()));
        // Unreversed, the raw hash reads as a huge number
        assert!(!meets_target(&sha256d_hash(&header), &expand(0x1d00ffff).unwrap()));
        assert!(!meets_target(&digest, &expand(0x1800ffff).unwrap()));
    }

    #[test]
    fn test_candidate_header_layout() {
        let mut params = JobParams::new([0xab; 32], 0x1d00ffff);
        params.category = 0x0000_0042;
        params.tag = b"tag".to_vec();
        params.additional_data = b"data".to_vec();
        params.user_nonce = 0x0403_0201;
        params.miner_pubkey_hash = vec![0x11; 20];
        params.extra_nonce_1 = 0xdead_beef;
        let job = JobSpec::new(params).unwrap();

        let mut candidate = Candidate::new(&job);
        candidate
            .set_outer(OuterStep { extra_nonce: 7, timestamp: 1_600_000_000 }, &Sha256d)
            .unwrap();
        candidate.set_nonce(0x0a0b_0c0d);

        let mut metadata = Vec::new();
        metadata.extend_from_slice(b"tag");
        metadata.extend_from_slice(&[0x11; 20]);
        metadata.extend_from_slice(&0xdead_beefu32.to_be_bytes());
        metadata.extend_from_slice(&7u64.to_be_bytes());
        metadata.extend_from_slice(&0x0403_0201u32.to_le_bytes());
        metadata.extend_from_slice(b"data");

        let mut expected = Vec::with_capacity(HEADER_LEN);
        expected.extend_from_slice(&0x42u32.to_le_bytes());
        expected.extend_from_slice(&[0xab; 32]);
        expected.extend_from_slice(&sha256d_hash(&metadata));
        expected.extend_from_slice(&1_600_000_000u32.to_le_bytes());
        expected.extend_from_slice(&0x1d00ffffu32.to_le_bytes());
        expected.extend_from_slice(&0x0a0b_0c0du32.to_le_bytes());

        assert_eq!(candidate.header().to_vec(), expected);
    }

    #[test]
    fn test_outer_step_changes_metadata_hash() {
        let job = JobSpec::new(JobParams::new([0u8; 32], 0x1d00ffff)).unwrap();
        let mut candidate = Candidate::new(&job);

        candidate.set_outer(OuterStep { extra_nonce: 0, timestamp: 10 }, &Sha256d).unwrap();
        let first = *candidate.header();
        candidate.set_outer(OuterStep { extra_nonce: 1, timestamp: 10 }, &Sha256d).unwrap();
        let second = *candidate.header();

        assert_ne!(first[36..68], second[36..68]);
        assert_eq!(first[..36], second[..36]);
        assert_eq!(first[68..], second[68..]);
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): SHA256d and Boost header tests.
//   - Replaces the SHA3x triple-hash tests.
