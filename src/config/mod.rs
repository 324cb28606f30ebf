//! Tunable constants and where they live on disk
//!
//! Settings are a flat JSON object. Every key has a default, so a partial
//! file loads cleanly and is written back with the missing keys filled in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::constants::GRID_SIZE;
use crate::models::errors::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Informational; the grid is fixed at `GRID_SIZE`.
    pub grid_size: i32,

    pub klingon_min_firing_interval: u32,
    pub klingon_max_firing_interval: u32,
    pub commander_min_firing_interval: u32,
    pub commander_max_firing_interval: u32,
    pub super_commander_min_firing_interval: u32,
    pub super_commander_max_firing_interval: u32,

    pub klingon_min_move_interval: u32,
    pub klingon_max_move_interval: u32,
    pub commander_min_move_interval: u32,
    pub commander_max_move_interval: u32,
    pub super_commander_min_move_interval: u32,
    pub super_commander_max_move_interval: u32,

    pub min_starbase_count: u32,
    pub max_starbase_count: u32,
    pub min_planet_count: u32,
    pub max_planet_count: u32,
    pub max_commanders: u32,
    pub max_klingons_per_quadrant: u32,

    pub starbase_search_count: u32,
    pub commander_search_count: u32,
    pub sector_search_count: u32,
    /// Random quadrant picks before a linear sweep.
    pub quadrant_search_count: u32,
    pub evasion_retry_count: u32,

    /// Wall-clock seconds between future-event checks.
    pub event_check_interval: f64,
    pub seconds_per_stardate: f64,
    pub supernova_mean_factor: f64,
    pub commander_attacks_base_mean_factor: f64,
    pub tractor_beam_mean_factor: f64,
    pub debug_no_supernova: bool,
    pub debug_no_commander_attacks_base: bool,
    pub debug_no_tractor_beam: bool,

    pub shield_absorption_fraction: f64,
    pub phaser_dust_factor: f64,
    pub phaser_dust_jitter: f64,
    pub phaser_drain_factor: f64,
    pub hit_range_limit: f64,
    pub quadrant_distance_factor: f64,
    pub torpedo_power: f64,
    pub torpedo_dodge_chance: f64,
    /// Grid units per second for enemy torpedoes.
    pub projectile_speed: f64,

    pub max_safe_warp_factor: f64,
    pub damaged_warp_factor: f64,
    pub docked_repair_factor: f64,
    pub low_energy_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            grid_size: GRID_SIZE,

            klingon_min_firing_interval: 5,
            klingon_max_firing_interval: 10,
            commander_min_firing_interval: 3,
            commander_max_firing_interval: 7,
            super_commander_min_firing_interval: 2,
            super_commander_max_firing_interval: 5,

            klingon_min_move_interval: 10,
            klingon_max_move_interval: 20,
            commander_min_move_interval: 6,
            commander_max_move_interval: 12,
            super_commander_min_move_interval: 4,
            super_commander_max_move_interval: 8,

            min_starbase_count: 2,
            max_starbase_count: 4,
            min_planet_count: 5,
            max_planet_count: 10,
            max_commanders: 10,
            max_klingons_per_quadrant: 9,

            starbase_search_count: 128,
            commander_search_count: 128,
            sector_search_count: 256,
            quadrant_search_count: 128,
            evasion_retry_count: 32,

            event_check_interval: 5.0,
            seconds_per_stardate: 120.0,
            supernova_mean_factor: 0.5,
            commander_attacks_base_mean_factor: 0.3,
            tractor_beam_mean_factor: 1.5,
            debug_no_supernova: false,
            debug_no_commander_attacks_base: false,
            debug_no_tractor_beam: false,

            shield_absorption_fraction: 0.7,
            phaser_dust_factor: 0.9,
            phaser_dust_jitter: 0.01,
            phaser_drain_factor: 2.0,
            hit_range_limit: 1.3,
            quadrant_distance_factor: 0.1,
            torpedo_power: 900.0,
            torpedo_dodge_chance: 0.25,
            projectile_speed: 4.0,

            max_safe_warp_factor: 6.0,
            damaged_warp_factor: 4.0,
            docked_repair_factor: 4.0,
            low_energy_threshold: 1000.0,
        }
    }
}

impl Settings {
    /// Parse settings JSON; absent keys take their defaults.
    pub fn from_json(text: &str) -> GameResult<Self> {
        serde_json::from_str(text).map_err(GameError::Settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string_pretty(self).map_err(GameError::Settings)
    }
}

/// File-backed settings. The location must be chosen before any I/O.
#[derive(Debug, Default)]
pub struct SettingsStore {
    location: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(path: impl Into<PathBuf>) -> Self {
        SettingsStore {
            location: Some(path.into()),
        }
    }

    pub fn set_location(&mut self, path: impl Into<PathBuf>) {
        self.location = Some(path.into());
    }

    pub fn location(&self) -> GameResult<&Path> {
        self.location
            .as_deref()
            .ok_or(GameError::ConfigLocationUnset)
    }

    /// Read the settings file, creating it with defaults when absent and
    /// rewriting it so every key is present.
    pub fn load_or_create(&self) -> GameResult<Settings> {
        let path = self.location()?;
        let settings = if path.exists() {
            Settings::from_json(&fs::read_to_string(path)?)?
        } else {
            log::debug!("no settings at {}; using defaults", path.display());
            Settings::default()
        };
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> GameResult<()> {
        let path = self.location()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, settings.to_json()?)?;
        Ok(())
    }
}
