// Boost Miner - Free and Open Source Software Statement
//
// This project, boost-miner, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides utility functions for formatting statistics in the Boost
// miner, located in the utils subdirectory. It formats hashrate, elapsed time,
// trial counts and difficulties for log output.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

use std::time::Duration;

/// Utility functions for formatting miner statistics
pub struct FormatUtils;

impl FormatUtils {
    /// Format hashrate in appropriate units (H/s, KH/s, MH/s, GH/s)
    pub fn format_hashrate(hashrate: f64) -> String {
        if hashrate >= 1_000_000_000.0 {
            format!("{:.2} GH/s", hashrate / 1_000_000_000.0)
        } else if hashrate >= 1_000_000.0 {
            format!("{:.2} MH/s", hashrate / 1_000_000.0)
        } else if hashrate >= 1_000.0 {
            format!("{:.2} KH/s", hashrate / 1_000.0)
        } else {
            format!("{:.2} H/s", hashrate)
        }
    }

    /// Format an elapsed time as `45s`, `12m 5s` or `3h 20m`
    pub fn format_elapsed(duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        }
    }

    /// Format large numbers with suffixes (K, M, B)
    pub fn format_number(num: u64) -> String {
        if num >= 1_000_000_000 {
            format!("{:.1}B", num as f64 / 1_000_000_000.0)
        } else if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Boost difficulties are often far below 1
    pub fn format_difficulty(difficulty: f64) -> String {
        if difficulty >= 1_000.0 {
            Self::format_number(difficulty as u64)
        } else if difficulty >= 0.01 {
            format!("{:.4}", difficulty)
        } else {
            format!("{:.3e}", difficulty)
        }
    }

    /// Expected time to solve a puzzle of `difficulty` at `hashrate`.
    /// Difficulty 1 takes 2^32 hashes on average.
    pub fn expected_solve_time(difficulty: f64, hashrate: f64) -> Option<Duration> {
        if hashrate <= 0.0 || difficulty <= 0.0 {
            return None;
        }
        let seconds = difficulty * 4_294_967_296.0 / hashrate;
        Duration::try_from_secs_f64(seconds).ok()
    }
}


// Changelog:
// - v1.1.0 (2025-07-02): Boost formatting.
//   - format_duration became format_elapsed (session time, not "ago").
//   - Added format_difficulty and expected_solve_time for puzzle reports.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
