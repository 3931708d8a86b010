// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 2.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines core data structures for the Boost miner, located in the
// core subdirectory. It includes the command-line arguments, the session
// configuration, the stop signal, worker ranges and the solution record.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: clap, serde, hex

use crate::core::boost::{self, ScriptVersion};
use crate::core::candidate::Candidate;
use crate::core::difficulty::{self, CompactTarget};
use crate::core::error::{HashError, MinerError};
use crate::core::job::{JobParams, JobSpec, OuterStep};
use crate::core::sha256::PowHasher;
use clap::Parser;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Trials between cancellation checks unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: u64 = 1 << 14;

/// Command-line arguments for the Boost miner
#[derive(Parser, Debug)]
#[command(
    name = "boostminer",
    author = "Boost Mining Team",
    version,
    about = "Parallel CPU miner for Boost proof-of-work puzzles",
    long_about = "Boost Miner searches the nonce space of a Boost puzzle for a header whose\n\
                  double SHA-256 meets the puzzle target, and prints the solution as JSON.\n\n\
                  Examples:\n\
                    Inline job: boostminer --content 0x<64 hex> --difficulty 0.0001 --tag news --threads 4\n\
                    Job file:   boostminer --job jobs.json --output solution.json\n\
                    Benchmark:  boostminer --benchmark --threads 8 --benchmark-duration 30"
)]
pub struct Args {
    /// JSON job file: one job object, or a list of priced jobs to choose from
    #[arg(long, value_name = "FILE", conflicts_with = "content")]
    pub job: Option<PathBuf>,

    /// Content digest to mine on (64 hex chars). A leading 0x reads it byte-reversed
    #[arg(long, value_name = "HEX")]
    pub content: Option<String>,

    /// Puzzle difficulty (1.0 = genesis block difficulty)
    #[arg(short, long, value_name = "DIFFICULTY", conflicts_with = "bits")]
    pub difficulty: Option<f64>,

    /// Compact target as 8 hex chars, e.g. 1d00ffff
    #[arg(long, value_name = "HEX")]
    pub bits: Option<String>,

    /// Tag/topic, at most 20 bytes
    #[arg(long, default_value = "")]
    pub tag: String,

    /// Additional data committed with the puzzle
    #[arg(long, default_value = "")]
    pub data: String,

    /// User nonce of the puzzle script (random when omitted)
    #[arg(long, value_name = "NONCE")]
    pub user_nonce: Option<u32>,

    #[arg(long, default_value = "0")]
    pub category: u32,

    /// Miner public key hash (40 hex chars)
    #[arg(long, value_name = "HEX")]
    pub miner_pkh: Option<String>,

    /// Boost script version (1 or 2)
    #[arg(long, default_value = "1")]
    pub script_version: u8,

    /// Number of CPU mining threads (0 = auto-detect)
    #[arg(short, long, default_value = "0", value_name = "COUNT")]
    pub threads: usize,

    /// Trials between cancellation checks
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL, value_name = "TRIALS")]
    pub poll_interval: u64,

    /// Seconds between hash-rate reports
    #[arg(long, default_value = "10", value_name = "SECONDS")]
    pub report_interval: u64,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub max_time: Option<u64>,

    /// Skip jobs from a job file whose value/difficulty is below this
    #[arg(long, default_value = "0", value_name = "SATS")]
    pub min_profitability: f64,

    /// Also write the solution JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run a hash-rate benchmark on a synthetic job
    #[arg(long, default_value = "false")]
    pub benchmark: bool,

    #[arg(long, default_value = "30", value_name = "SECONDS")]
    pub benchmark_duration: u64,

    /// Benchmark puzzle difficulty [0.0001 = many solutions, 1.0 = realistic]
    #[arg(long, default_value = "0.0001", value_name = "DIFFICULTY")]
    pub benchmark_difficulty: f64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate arguments and return helpful errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.benchmark && self.job.is_none() {
            if self.content.is_none() {
                return Err("Content is required. Use --content HEX or --job FILE".to_string());
            }
            if self.difficulty.is_none() && self.bits.is_none() {
                return Err("A target is required. Use --difficulty or --bits".to_string());
            }
        }

        if let Some(difficulty) = self.difficulty {
            if !difficulty.is_finite() || difficulty <= 0.0 {
                return Err(format!("Difficulty must be > 0; value provided was {}", difficulty));
            }
        }

        if self.tag.len() > boost::MAX_TAG_LEN {
            return Err(format!("Tag is too big: must be {} or fewer bytes", boost::MAX_TAG_LEN));
        }

        if ScriptVersion::try_from(self.script_version).is_err() {
            return Err(format!("Invalid script version {}", self.script_version));
        }

        if self.threads > 1024 {
            return Err("Thread count cannot exceed 1024".to_string());
        }

        if self.poll_interval == 0 {
            return Err("Poll interval must be at least 1 trial".to_string());
        }

        if self.report_interval == 0 {
            return Err("Report interval must be greater than 0 seconds".to_string());
        }

        if self.benchmark && self.benchmark_duration == 0 {
            return Err("Benchmark duration must be greater than 0 seconds".to_string());
        }

        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            worker_count: self.threads,
            poll_interval: self.poll_interval,
            sample_interval: Duration::from_secs(self.report_interval),
            max_duration: self.max_time.map(Duration::from_secs),
        }
    }

    /// Job parameters from the inline flags.
    pub fn job_params(&self) -> Result<JobParams, MinerError> {
        let content_hex = self
            .content
            .as_deref()
            .ok_or_else(|| MinerError::invalid_job("content not provided"))?;
        let content = parse_content(content_hex)?;

        let bits = match (&self.bits, self.difficulty) {
            (Some(bits_hex), _) => u32::from_str_radix(bits_hex.trim_start_matches("0x"), 16)
                .map_err(|e| MinerError::invalid_job(format!("invalid bits {}: {}", bits_hex, e)))?,
            (None, Some(difficulty)) => CompactTarget::from_difficulty(difficulty)?.bits(),
            (None, None) => return Err(MinerError::invalid_job("difficulty not provided")),
        };

        let mut params = JobParams::new(content, bits);
        params.tag = self.tag.as_bytes().to_vec();
        params.additional_data = self.data.as_bytes().to_vec();
        params.category = self.category;
        params.user_nonce = self.user_nonce.unwrap_or_else(rand::random);
        params.extra_nonce_1 = rand::random();
        params.version = ScriptVersion::try_from(self.script_version).map_err(MinerError::InvalidJob)?;
        if params.version == ScriptVersion::V2 {
            params.general_purpose_bits = rand::random();
        }
        if let Some(pkh) = &self.miner_pkh {
            params.miner_pubkey_hash = hex::decode(pkh)
                .map_err(|e| MinerError::invalid_job(format!("invalid miner pubkey hash: {}", e)))?;
        }
        let start = rand::random::<u64>() >> 1;
        params.extra_nonce_range = start..u64::MAX;
        Ok(params)
    }
}

/// Parse a content digest. Hashes with a `0x` prefix are read byte-reversed,
/// the way Bitcoin displays them.
pub fn parse_content(content_hex: &str) -> Result<[u8; 32], MinerError> {
    let (hex_str, reversed) = match content_hex.strip_prefix("0x") {
        Some(rest) => (rest, true),
        None => (content_hex, false),
    };
    let mut bytes = hex::decode(hex_str)
        .map_err(|e| MinerError::invalid_job(format!("could not read content {}: {}", content_hex, e)))?;
    if reversed {
        bytes.reverse();
    }
    bytes.as_slice().try_into().map_err(|_| {
        MinerError::invalid_job(format!("content must be 32 bytes, got {}", bytes.len()))
    })
}

/// Tunables for one mining session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Worker threads (0 = available hardware parallelism)
    pub worker_count: usize,

    /// Trials between checks of the stop signal
    pub poll_interval: u64,

    /// Interval between hash-rate samples
    pub sample_interval: Duration,

    /// Raise the stop signal after this long
    pub max_duration: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            worker_count: 0,
            poll_interval: DEFAULT_POLL_INTERVAL,
            sample_interval: Duration::from_secs(10),
            max_duration: None,
        }
    }
}

impl SessionConfig {
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    /// Worker count with 0 resolved to the number of CPUs.
    pub fn effective_workers(&self) -> usize {
        if self.worker_count == 0 {
            num_cpus::get()
        } else {
            self.worker_count
        }
    }

    pub fn validate(&self) -> Result<(), MinerError> {
        if self.poll_interval == 0 {
            return Err(MinerError::InvalidConfig("poll interval must be at least 1".to_string()));
        }
        if self.sample_interval.is_zero() {
            return Err(MinerError::InvalidConfig("sample interval must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Shared cancellation flag.
///
/// Clones share one flag. A signal made with `child` also observes its
/// parent, but raising the child never touches the parent. Once raised a
/// flag stays raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh signal that is stopped whenever this one is.
    pub fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.flag)),
        }
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
            || self.parent.as_ref().is_some_and(|p| p.load(Ordering::Acquire))
    }
}

/// `[start, end)` slice of the nonce space assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRange {
    pub start: u64,
    pub end: u64,
}

impl WorkerRange {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A winning trial. Created at most once per session.
#[derive(Debug, Clone)]
pub struct Solution {
    job: Arc<JobSpec>,
    nonce: u32,
    extra_nonce: u64,
    timestamp: u32,
    digest: [u8; 32],
    worker: usize,
}

impl Solution {
    pub fn new(job: Arc<JobSpec>, candidate: &Candidate, digest: [u8; 32], worker: usize) -> Self {
        Self {
            job,
            nonce: candidate.nonce(),
            extra_nonce: candidate.extra_nonce(),
            timestamp: candidate.timestamp(),
            digest,
            worker,
        }
    }

    pub fn job(&self) -> &JobSpec {
        &self.job
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

    /// Proof-of-work digest (big-endian).
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Index of the worker that found it.
    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn meets_target(&self) -> bool {
        difficulty::meets_target(&self.digest, self.job.target())
    }

    /// Rebuild the header from the recorded fields and check the digest.
    pub fn verify<H: PowHasher + ?Sized>(&self, hasher: &H) -> Result<bool, HashError> {
        let mut candidate = Candidate::new(&self.job);
        candidate.set_outer(
            OuterStep {
                extra_nonce: self.extra_nonce,
                timestamp: self.timestamp,
            },
            hasher,
        )?;
        candidate.set_nonce(self.nonce);
        let digest = boost::work_digest(hasher.hash256(candidate.header())?);
        Ok(digest == self.digest && self.meets_target())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn record(&self) -> SolutionRecord {
        let bits = (self.job.version() == ScriptVersion::V2)
            .then(|| hex::encode(self.job.general_purpose_bits().to_be_bytes()));
        SolutionRecord {
            content: hex::encode(self.job.content()),
            bits: self.job.bits().to_string(),
            share: ShareRecord {
                timestamp: hex::encode(self.timestamp.to_be_bytes()),
                nonce: hex::encode(self.nonce.to_be_bytes()),
                extra_nonce_2: hex::encode(self.extra_nonce.to_be_bytes()),
                bits,
            },
            extra_nonce_1: hex::encode(self.job.extra_nonce_1().to_be_bytes()),
            miner_pubkey_hash: hex::encode(self.job.miner_pubkey_hash()),
            digest: hex::encode(self.digest),
        }
    }
}

#[derive(Serialize)]
struct ShareRecord {
    timestamp: String,
    nonce: String,
    extra_nonce_2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bits: Option<String>,
}

#[derive(Serialize)]
struct SolutionRecord {
    content: String,
    bits: String,
    share: ShareRecord,
    extra_nonce_1: String,
    miner_pubkey_hash: String,
    digest: String,
}

impl Serialize for Solution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

/// Terminal outcome of a session that did not fault.
#[derive(Debug, Clone)]
pub enum SessionResult {
    Found(Solution),
    /// The whole declared search space was enumerated without a hit.
    NoSolution,
    /// The stop signal was raised before a solution was found.
    Cancelled,
}

impl SessionResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SessionResult::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SessionResult::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sha256::Sha256d;

    fn base_args() -> Args {
        let content = "00".repeat(32);
        Args::parse_from(["boostminer", "--content", content.as_str(), "--difficulty", "0.5"])
    }

    #[test]
    fn test_args_validate() {
        assert!(base_args().validate().is_ok());

        let args = Args::parse_from(["boostminer", "--difficulty", "1"]);
        assert!(args.validate().unwrap_err().contains("Content"));

        let args = Args::parse_from(["boostminer", "--content", "00", "--difficulty", "0"]);
        assert!(args.validate().is_err());

        let mut args = base_args();
        args.script_version = 3;
        assert!(args.validate().is_err());

        let mut args = base_args();
        args.tag = "x".repeat(21);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["boostminer", "--benchmark"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_args_job_params() {
        let content = "00".repeat(32);
        let args = Args::parse_from([
            "boostminer",
            "--content",
            content.as_str(),
            "--bits",
            "1d00ffff",
            "--tag",
            "news",
            "--user-nonce",
            "7",
        ]);
        let params = args.job_params().unwrap();
        assert_eq!(params.bits, 0x1d00ffff);
        assert_eq!(params.tag, b"news".to_vec());
        assert_eq!(params.user_nonce, 7);
        assert!(JobSpec::new(params).is_ok());
    }

    #[test]
    fn test_parse_content_reversed() {
        let forward = format!("01{}", "00".repeat(31));
        let bytes = parse_content(&forward).unwrap();
        assert_eq!(bytes[0], 1);

        let reversed = parse_content(&format!("0x{}", forward)).unwrap();
        assert_eq!(reversed[31], 1);

        assert!(parse_content("abcd").is_err());
        assert!(parse_content("zz").is_err());
    }

    #[test]
    fn test_session_config_validate() {
        assert!(SessionConfig::default().validate().is_ok());
        let mut config = SessionConfig::with_workers(2);
        config.poll_interval = 0;
        assert!(matches!(config.validate(), Err(MinerError::InvalidConfig(_))));
        assert_eq!(SessionConfig::with_workers(3).effective_workers(), 3);
        assert!(SessionConfig::with_workers(0).effective_workers() >= 1);
    }

    #[test]
    fn test_stop_signal_shared() {
        let signal = StopSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_stopped());
        signal.stop();
        assert!(clone.is_stopped());
    }

    #[test]
    fn test_child_signal_does_not_raise_parent() {
        let parent = StopSignal::new();
        let child = parent.child();
        child.stop();
        assert!(child.is_stopped());
        assert!(!parent.is_stopped());

        let child = parent.child();
        assert!(!child.is_stopped());
        parent.stop();
        assert!(child.is_stopped());
    }

    #[test]
    fn test_solution_json_and_verify() {
        let mut params = JobParams::new([0u8; 32], 0x207fffff);
        params.time_range = 1000..1001;
        params.extra_nonce_range = 5..6;
        params.extra_nonce_1 = 0xAABBCCDD;
        let job = Arc::new(JobSpec::new(params).unwrap());

        let mut candidate = Candidate::new(&job);
        candidate
            .set_outer(OuterStep { extra_nonce: 5, timestamp: 1000 }, &Sha256d)
            .unwrap();
        candidate.set_nonce(9);
        let digest = boost::work_digest(Sha256d.hash256(candidate.header()).unwrap());
        let solution = Solution::new(Arc::clone(&job), &candidate, digest, 0);

        assert_eq!(solution.verify(&Sha256d).unwrap(), solution.meets_target());

        let json = solution.to_json();
        assert_eq!(json["share"]["nonce"], "00000009");
        assert_eq!(json["share"]["timestamp"], "000003e8");
        assert_eq!(json["share"]["extra_nonce_2"], "0000000000000005");
        assert_eq!(json["extra_nonce_1"], "aabbccdd");
        assert_eq!(json["bits"], "207fffff");
        assert!(json["share"].get("bits").is_none());
    }
}

// Changelog:
// - v2.0.1 (2025-07-04): StopSignal::child for per-run flags that observe
//   the caller's signal without writing to it.
// - v2.0.0 (2025-07-02): Boost miner types.
//   - Args now describes a Boost puzzle (content, difficulty/bits, tag, data)
//     and session tunables; wallet/pool/SV2/web flags removed.
//   - Replaced PoolJob/MiningJob/Share with JobParams/JobSpec (core/job.rs)
//     and the Solution record, serialized like the reference share JSON.
//   - Added SessionConfig, StopSignal, WorkerRange and SessionResult.
//   - BenchmarkResult moved to the benchmark module.
