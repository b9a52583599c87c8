// Replay module for re-running logged move requests
//
// This module provides functionality to:
// 1. Parse JSONL debug logs written by DebugLogger
// 2. Re-run the selector on each logged request
// 3. Compare logged vs replayed moves and flag illegal logged moves

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::debug_logger::LogEntry;
use crate::error::SnakeError;
use crate::selector::{legal_moves, MoveSelector};
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    /// False when a legal move existed but the logged one was not among them
    pub original_legal: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub illegal_originals: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    selector: MoveSelector,
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine. `seed` makes the randomized policy repeatable.
    pub fn new(config: Config, seed: u64, verbose: bool) -> Self {
        ReplayEngine {
            selector: MoveSelector::new(config.selector, config.appearance.shout),
            seed,
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, SnakeError> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| SnakeError::Log(format!("Failed to open log file: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                SnakeError::Log(format!("Failed to read line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                SnakeError::Log(format!("Failed to parse JSON on line {}: {}", line_num + 1, e))
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, SnakeError> {
        let original_move = Direction::parse(&entry.chosen_move).ok_or_else(|| {
            SnakeError::Log(format!("Invalid direction: {}", entry.chosen_move))
        })?;

        let mut rng = StdRng::seed_from_u64(self.seed ^ entry.turn as u64);
        let replayed_move = self.selector.select(&entry.request, &mut rng)?.direction;

        let legal = legal_moves(&entry.request.board, &entry.request.you);
        let original_legal = legal.is_empty() || legal.contains(&original_move);
        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!("Turn {}: MATCH - {}", entry.turn, replayed_move.as_str());
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {}",
                    entry.turn,
                    original_move.as_str(),
                    replayed_move.as_str()
                );
            }
        }
        if !original_legal {
            warn!(
                "Turn {}: logged move {} was illegal (legal: {:?})",
                entry.turn,
                original_move.as_str(),
                legal.iter().map(|d| d.as_str()).collect::<Vec<_>>()
            );
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            original_legal,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, SnakeError> {
        let mut selected = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| {
                    SnakeError::Log(format!("Turn {} not found in log file", turn_num))
                })?;
            selected.push(entry.clone());
        }

        Ok(self.replay_all(&selected))
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let illegal_originals = results.iter().filter(|r| !r.original_legal).count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            illegal_originals,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT ({:?})", self.selector.policy());
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:       {}", stats.total_turns);
        println!("Matches:           {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:        {}", stats.mismatches);
        println!("Illegal originals: {}", stats.illegal_originals);
        println!("═══════════════════════════════════════════════════════════\n");

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("DETAILED MISMATCHES");
            for result in mismatches {
                println!(
                    "Turn {}: {} → {}{}",
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    if result.original_legal { "" } else { " (original illegal)" }
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), SnakeError> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| SnakeError::Log(format!("Turn {} not found in log", turn)))?;

            let actual_move = Direction::parse(&entry.chosen_move).ok_or_else(|| {
                SnakeError::Log(format!("Invalid direction: {}", entry.chosen_move))
            })?;

            if !acceptable.contains(&actual_move) {
                return Err(SnakeError::Log(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                )));
            }
        }

        Ok(())
    }
}
