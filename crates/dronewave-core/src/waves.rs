//! Per-wave tuning tables.
//!
//! All difficulty progression is indexed by the current wave: spawn
//! quotas, concurrency caps, cadence, and the policy knobs the behavior
//! states read (pain/dodge chances, speed scale, think time, weapon
//! spread). Tables are static configuration; their one invariant —
//! every column covers every reachable wave index — is validated at
//! load time rather than handled at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed wave-table configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaveTableError {
    #[error("wave table is empty")]
    Empty,
    #[error("wave table column `{column}` has {len} rows, expected {expected}")]
    RaggedColumn {
        column: &'static str,
        len: usize,
        expected: usize,
    },
}

/// Parallel per-wave columns. Index with the accessor methods, which
/// clamp to the final row so endless-mode looping of the last wave can
/// never read out of range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveTable {
    /// Drones to spawn during each wave.
    pub drones_per_wave: Vec<u32>,
    /// Cap on concurrently live drones per wave.
    pub max_alive_per_wave: Vec<u32>,
    /// Seconds between spawns.
    pub spawn_cadence_secs: Vec<f32>,
    /// Waves skipped in short mode.
    pub skip_in_short_mode: Vec<bool>,
    /// Chance a qualifying hit triggers the pain reaction.
    pub pain_chance: Vec<f32>,
    /// Chance a hit triggers a dodge.
    pub dodge_chance: Vec<f32>,
    /// Max-speed multiplier applied while planning.
    pub speed_scale: Vec<f32>,
    /// Seconds between planning decisions.
    pub think_time_secs: Vec<f32>,
    /// Weapon spread multiplier (higher = less accurate).
    pub weapon_spread_scale: Vec<f32>,
}

impl WaveTable {
    /// The standard seven-wave progression.
    pub fn standard() -> Self {
        Self {
            drones_per_wave: vec![3, 5, 7, 9, 12, 15, 18],
            max_alive_per_wave: vec![2, 3, 3, 4, 4, 5, 6],
            spawn_cadence_secs: vec![4.0, 3.5, 3.0, 2.6, 2.3, 2.0, 1.8],
            skip_in_short_mode: vec![false, true, false, true, false, true, false],
            pain_chance: vec![0.6, 0.55, 0.5, 0.45, 0.4, 0.35, 0.3],
            dodge_chance: vec![0.1, 0.15, 0.2, 0.3, 0.35, 0.4, 0.5],
            speed_scale: vec![0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4],
            think_time_secs: vec![2.2, 2.0, 1.8, 1.5, 1.3, 1.1, 0.9],
            weapon_spread_scale: vec![1.4, 1.3, 1.1, 1.0, 0.9, 0.8, 0.7],
        }
    }

    /// Check that every column covers every wave.
    pub fn validate(&self) -> Result<(), WaveTableError> {
        let expected = self.drones_per_wave.len();
        if expected == 0 {
            return Err(WaveTableError::Empty);
        }
        let columns: [(&'static str, usize); 8] = [
            ("max_alive_per_wave", self.max_alive_per_wave.len()),
            ("spawn_cadence_secs", self.spawn_cadence_secs.len()),
            ("skip_in_short_mode", self.skip_in_short_mode.len()),
            ("pain_chance", self.pain_chance.len()),
            ("dodge_chance", self.dodge_chance.len()),
            ("speed_scale", self.speed_scale.len()),
            ("think_time_secs", self.think_time_secs.len()),
            ("weapon_spread_scale", self.weapon_spread_scale.len()),
        ];
        for (column, len) in columns {
            if len != expected {
                return Err(WaveTableError::RaggedColumn {
                    column,
                    len,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Number of waves.
    pub fn len(&self) -> usize {
        self.drones_per_wave.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones_per_wave.is_empty()
    }

    /// Index of the final wave.
    pub fn last_wave(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn row(&self, wave: usize) -> usize {
        wave.min(self.last_wave())
    }

    pub fn drones(&self, wave: usize) -> u32 {
        self.drones_per_wave[self.row(wave)]
    }

    pub fn max_alive(&self, wave: usize) -> u32 {
        self.max_alive_per_wave[self.row(wave)]
    }

    pub fn cadence(&self, wave: usize) -> f32 {
        self.spawn_cadence_secs[self.row(wave)]
    }

    pub fn skipped_in_short(&self, wave: usize) -> bool {
        self.skip_in_short_mode[self.row(wave)]
    }

    pub fn pain(&self, wave: usize) -> f32 {
        self.pain_chance[self.row(wave)]
    }

    pub fn dodge(&self, wave: usize) -> f32 {
        self.dodge_chance[self.row(wave)]
    }

    pub fn speed(&self, wave: usize) -> f32 {
        self.speed_scale[self.row(wave)]
    }

    pub fn think_time(&self, wave: usize) -> f32 {
        self.think_time_secs[self.row(wave)]
    }

    pub fn spread(&self, wave: usize) -> f32 {
        self.weapon_spread_scale[self.row(wave)]
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::standard()
    }
}
