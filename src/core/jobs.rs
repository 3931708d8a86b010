// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/jobs.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the job book, located in the core subdirectory. It
// holds several priced Boost puzzles and picks one at random, weighted by
// profitability (value per unit of difficulty) and by how many workers are
// already on each puzzle.

use crate::core::error::MinerError;
use crate::core::job::{JobParams, JobSpec};
use crate::Result;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

const LOG_TARGET: &str = "boostminer::jobs";

/// Default tilt: how strongly extra workers discourage piling onto a puzzle.
pub const DEFAULT_TILT: f64 = 1.0;

/// A puzzle together with the satoshis it pays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEntry {
    pub value: u64,
    pub job: JobParams,
}

/// Contents of a JSON job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobFile {
    Single(JobParams),
    Book(Vec<JobEntry>),
}

impl JobFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MinerError::invalid_job(format!("malformed job file: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| MinerError::invalid_job(format!("could not read {}: {}", path.display(), e)))?;
        let file = Self::from_json(&json)?;
        debug!(target: LOG_TARGET, "Loaded job file {}", path.display());
        Ok(file)
    }
}

#[derive(Debug, Clone)]
struct BookEntry {
    job: Arc<JobSpec>,
    value: u64,
    workers: usize,
}

impl BookEntry {
    fn difficulty(&self) -> f64 {
        self.job.difficulty()
    }

    fn profitability(&self) -> f64 {
        let difficulty = self.difficulty();
        if difficulty > 0.0 {
            self.value as f64 / difficulty
        } else {
            0.0
        }
    }

    // Puzzles below the minimum get no weight; each worker already assigned
    // scales the weight by difficulty / (difficulty + tilt).
    fn weight(&self, minimum_profitability: f64, tilt: f64) -> f64 {
        let profitability = self.profitability();
        if profitability < minimum_profitability {
            return 0.0;
        }
        let difficulty = self.difficulty();
        let factor = difficulty / (difficulty + tilt);
        factor.powi(self.workers as i32) * (profitability - minimum_profitability)
    }
}

/// Weighted pool of candidate puzzles.
#[derive(Debug, Clone, Default)]
pub struct JobBook {
    entries: Vec<BookEntry>,
}

impl JobBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add every entry.
    pub fn from_entries(entries: Vec<JobEntry>) -> Result<Self> {
        let mut book = Self::new();
        for entry in entries {
            book.insert(JobSpec::new(entry.job)?, entry.value);
        }
        Ok(book)
    }

    /// Add a puzzle and return its index.
    pub fn insert(&mut self, job: JobSpec, value: u64) -> usize {
        self.entries.push(BookEntry {
            job: Arc::new(job),
            value,
            workers: 0,
        });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn job(&self, index: usize) -> Option<&Arc<JobSpec>> {
        self.entries.get(index).map(|e| &e.job)
    }

    /// Satoshis per unit of difficulty.
    pub fn profitability(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(BookEntry::profitability)
    }

    pub fn weight(&self, index: usize, minimum_profitability: f64, tilt: f64) -> Option<f64> {
        self.entries.get(index).map(|e| e.weight(minimum_profitability, tilt))
    }

    /// Record that a worker started on a puzzle.
    pub fn assign_worker(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.workers += 1;
        }
    }

    pub fn release_worker(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.workers = entry.workers.saturating_sub(1);
        }
    }

    /// Pick a puzzle at random with probability proportional to its weight.
    /// Returns `None` when no puzzle reaches the minimum profitability.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        minimum_profitability: f64,
        tilt: f64,
    ) -> Option<(usize, Arc<JobSpec>)> {
        let weights: Vec<f64> = self
            .entries
            .iter()
            .map(|e| e.weight(minimum_profitability, tilt))
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            info!(
                target: LOG_TARGET,
                "No job in the book reaches minimum profitability {}", minimum_profitability
            );
            return None;
        }

        let pick = rng.gen_range(0.0..total);
        let mut accumulated = 0.0;
        let mut last_eligible = None;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            accumulated += weight;
            last_eligible = Some(index);
            if accumulated > pick {
                break;
            }
        }

        let index = last_eligible?;
        let entry = &self.entries[index];
        debug!(
            target: LOG_TARGET,
            "Selected job {} (value {} sats, difficulty {:.6}, profitability {:.2})",
            index,
            entry.value,
            entry.difficulty(),
            entry.profitability()
        );
        Some((index, Arc::clone(&entry.job)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn job(bits: u32) -> JobSpec {
        let mut params = JobParams::new([0u8; 32], bits);
        params.time_range = 1..2;
        JobSpec::new(params).unwrap()
    }

    #[test]
    fn test_profitability_is_value_per_difficulty() {
        let mut book = JobBook::new();
        // 0x1d00ffff is difficulty 1
        let index = book.insert(job(0x1d00ffff), 5000);
        assert!((book.profitability(index).unwrap() - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_weight_decays_with_workers() {
        let mut book = JobBook::new();
        let index = book.insert(job(0x1d00ffff), 100);
        let idle = book.weight(index, 0.0, 1.0).unwrap();
        book.assign_worker(index);
        let busy = book.weight(index, 0.0, 1.0).unwrap();
        assert!((busy - idle / 2.0).abs() < 1e-9);
        book.release_worker(index);
        assert_eq!(book.weight(index, 0.0, 1.0).unwrap(), idle);
    }

    #[test]
    fn test_select_never_returns_unprofitable_job() {
        let mut book = JobBook::new();
        book.insert(job(0x1d00ffff), 10);
        let good = book.insert(job(0x1d00ffff), 1000);
        book.insert(job(0x1d00ffff), 20);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let (index, _) = book.select(&mut rng, 100.0, DEFAULT_TILT).unwrap();
            assert_eq!(index, good);
        }
    }

    #[test]
    fn test_assigned_workers_steer_selection_away() {
        let mut book = JobBook::new();
        let busy = book.insert(job(0x1d00ffff), 1000);
        let idle = book.insert(job(0x1d00ffff), 1000);
        for _ in 0..6 {
            book.assign_worker(busy);
        }
        assert!(book.weight(busy, 0.0, DEFAULT_TILT) < book.weight(idle, 0.0, DEFAULT_TILT));

        let mut rng = StdRng::seed_from_u64(11);
        let picks_idle = (0..400)
            .filter(|_| book.select(&mut rng, 0.0, DEFAULT_TILT).map(|(i, _)| i) == Some(idle))
            .count();
        assert!(picks_idle > 300, "idle job picked {} of 400 times", picks_idle);

        for _ in 0..6 {
            book.release_worker(busy);
        }
        assert_eq!(book.weight(busy, 0.0, DEFAULT_TILT), book.weight(idle, 0.0, DEFAULT_TILT));
    }

    #[test]
    fn test_select_none_when_nothing_qualifies() {
        let mut book = JobBook::new();
        book.insert(job(0x1d00ffff), 10);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(book.select(&mut rng, 1000.0, DEFAULT_TILT).is_none());
        assert!(JobBook::new().select(&mut rng, 0.0, DEFAULT_TILT).is_none());
    }

    #[test]
    fn test_job_file_single_and_book() {
        let content = "00".repeat(32);
        let single = format!(r#"{{"content": "{}", "bits": 545259519}}"#, content);
        assert!(matches!(JobFile::from_json(&single).unwrap(), JobFile::Single(_)));

        let book = format!(
            r#"[{{"value": 1000, "job": {{"content": "{c}", "bits": 545259519}}}},
                {{"value": 50, "job": {{"content": "{c}", "bits": 486604799}}}}]"#,
            c = content
        );
        match JobFile::from_json(&book).unwrap() {
            JobFile::Book(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(JobBook::from_entries(entries).unwrap().len(), 2);
            }
            other => panic!("expected a job book, got {:?}", other),
        }

        assert!(matches!(JobFile::from_json("{"), Err(MinerError::InvalidJob(_))));
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Weighted job selection.
//   - JobBook picks among priced puzzles in proportion to profitability above
//     a minimum, tilted away from puzzles other workers already hold.
//   - JobFile reads a single job or a priced list from JSON.
