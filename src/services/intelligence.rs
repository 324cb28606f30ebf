//! Balance engine
//!
//! Every stochastic quantity in the game is derived here from a single
//! uniform `[0, 1)` source and the tunable constants in `Settings`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Settings;
use crate::models::constants::{GameType, PlayerType, GRID_SIZE, STARDATES_PER_LENGTH_UNIT};
use crate::models::coordinate::{Coordinate, Direction};
use crate::models::enemy::EnemyKind;

/// Supplier of uniform samples in `[0, 1)`.
pub trait UniformSource {
    fn uniform(&mut self) -> f64;
}

impl UniformSource for StdRng {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedUniform {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedUniform {
    pub fn new(values: Vec<f64>) -> Self {
        ScriptedUniform { values, next: 0 }
    }
}

impl UniformSource for ScriptedUniform {
    fn uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

pub struct Intelligence {
    settings: Settings,
    source: Box<dyn UniformSource>,
}

impl Intelligence {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_source(settings, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_source(settings: Settings, source: Box<dyn UniformSource>) -> Self {
        Intelligence { settings, source }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ========== Primitive samplers ==========

    pub fn uniform(&mut self) -> f64 {
        self.source.uniform()
    }

    /// Inverse-CDF exponential sample with the given mean.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        -mean * (1.0 - self.uniform()).ln()
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    pub fn random_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (u64::from(max) - u64::from(min) + 1) as f64;
        let offset = (self.uniform() * span).floor() as u64;
        (u64::from(min) + offset).min(u64::from(max)) as u32
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    pub fn random_coordinate(&mut self) -> Coordinate {
        let max = (GRID_SIZE - 1) as u32;
        Coordinate {
            x: self.random_int(0, max) as i32,
            y: self.random_int(0, max) as i32,
        }
    }

    pub fn random_direction(&mut self) -> Direction {
        let index = self.random_int(0, (Direction::ALL.len() - 1) as u32) as usize;
        Direction::ALL[index]
    }

    // ========== Session setup ==========

    pub fn initial_stardate(&mut self) -> f64 {
        100.0 * (31.0 * self.uniform() + 20.0).floor()
    }

    pub fn initial_game_time(&self, game_type: GameType) -> f64 {
        STARDATES_PER_LENGTH_UNIT * game_type.length() as f64
    }

    /// Total enemy count before commanders and super-commanders are split off.
    pub fn initial_klingon_count(&mut self, in_time: f64, player_type: PlayerType) -> u32 {
        let skill = player_type.skill() as f64;
        let count = (2.0 * in_time * (skill + 1.0 - 2.0 * self.uniform()) * skill * 0.1 + 0.20)
            .round();
        (count.max(1.0)) as u32
    }

    pub fn initial_commander_count(&mut self, player_type: PlayerType, klingons: u32) -> u32 {
        let extra = (0.0625 * klingons as f64 * self.uniform()).floor() as u32;
        (player_type.skill() + extra).min(self.settings.max_commanders)
    }

    pub fn initial_super_commander_count(&mut self, player_type: PlayerType) -> u32 {
        u32::from(player_type.has_super_commanders())
    }

    pub fn initial_starbase_count(&mut self) -> u32 {
        let (min, max) = (self.settings.min_starbase_count, self.settings.max_starbase_count);
        self.random_int(min, max).min(max)
    }

    pub fn initial_planet_count(&mut self) -> u32 {
        let (min, max) = (self.settings.min_planet_count, self.settings.max_planet_count);
        self.random_int(min, max).min(max)
    }

    // ========== Enemy attributes ==========

    pub fn klingon_power(&mut self, player_type: PlayerType) -> f64 {
        300.0 + 150.0 * self.uniform() + 25.0 * player_type.skill() as f64
    }

    pub fn commander_power(&mut self, player_type: PlayerType) -> f64 {
        950.0 + 400.0 * self.uniform() + 50.0 * player_type.skill() as f64
    }

    pub fn super_commander_power(&mut self, player_type: PlayerType) -> f64 {
        1175.0 + 400.0 * self.uniform() + 125.0 * player_type.skill() as f64
    }

    pub fn enemy_power(&mut self, kind: EnemyKind, player_type: PlayerType) -> f64 {
        match kind {
            EnemyKind::Klingon => self.klingon_power(player_type),
            EnemyKind::Commander => self.commander_power(player_type),
            EnemyKind::SuperCommander => self.super_commander_power(player_type),
        }
    }

    pub fn klingon_firing_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (s.klingon_min_firing_interval, s.klingon_max_firing_interval);
        self.random_int(min, max)
    }

    pub fn commander_firing_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (s.commander_min_firing_interval, s.commander_max_firing_interval);
        self.random_int(min, max)
    }

    pub fn super_commander_firing_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (
            s.super_commander_min_firing_interval,
            s.super_commander_max_firing_interval,
        );
        self.random_int(min, max)
    }

    pub fn klingon_move_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (s.klingon_min_move_interval, s.klingon_max_move_interval);
        self.random_int(min, max)
    }

    pub fn commander_move_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (s.commander_min_move_interval, s.commander_max_move_interval);
        self.random_int(min, max)
    }

    pub fn super_commander_move_interval(&mut self) -> u32 {
        let s = &self.settings;
        let (min, max) = (
            s.super_commander_min_move_interval,
            s.super_commander_max_move_interval,
        );
        self.random_int(min, max)
    }

    pub fn firing_interval(&mut self, kind: EnemyKind) -> f64 {
        let seconds = match kind {
            EnemyKind::Klingon => self.klingon_firing_interval(),
            EnemyKind::Commander => self.commander_firing_interval(),
            EnemyKind::SuperCommander => self.super_commander_firing_interval(),
        };
        seconds as f64
    }

    pub fn move_interval(&mut self, kind: EnemyKind) -> f64 {
        let seconds = match kind {
            EnemyKind::Klingon => self.klingon_move_interval(),
            EnemyKind::Commander => self.commander_move_interval(),
            EnemyKind::SuperCommander => self.super_commander_move_interval(),
        };
        seconds as f64
    }

    /// Stardates of repair work after a damaging hit or engine overload.
    pub fn device_damage_duration(&mut self, player_type: PlayerType) -> f64 {
        0.5 * player_type.skill() as f64 * (3.0 * self.uniform() + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smarty(seed: u64) -> Intelligence {
        Intelligence::new(Settings::default(), seed)
    }

    fn observed_bounds(mut sample: impl FnMut() -> u32) -> (u32, u32) {
        let mut min = u32::MAX;
        let mut max = u32::MIN;
        for _ in 0..200 {
            let v = sample();
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }

    #[test]
    fn firing_intervals_hit_both_bounds() {
        let mut intel = smarty(3);
        let s = Settings::default();
        assert_eq!(
            observed_bounds(|| intel.klingon_firing_interval()),
            (s.klingon_min_firing_interval, s.klingon_max_firing_interval)
        );
        assert_eq!(
            observed_bounds(|| intel.commander_firing_interval()),
            (s.commander_min_firing_interval, s.commander_max_firing_interval)
        );
        assert_eq!(
            observed_bounds(|| intel.super_commander_firing_interval()),
            (
                s.super_commander_min_firing_interval,
                s.super_commander_max_firing_interval
            )
        );
    }

    #[test]
    fn move_intervals_hit_both_bounds() {
        let mut intel = smarty(11);
        let s = Settings::default();
        assert_eq!(
            observed_bounds(|| intel.klingon_move_interval()),
            (s.klingon_min_move_interval, s.klingon_max_move_interval)
        );
        assert_eq!(
            observed_bounds(|| intel.commander_move_interval()),
            (s.commander_min_move_interval, s.commander_max_move_interval)
        );
        assert_eq!(
            observed_bounds(|| intel.super_commander_move_interval()),
            (
                s.super_commander_min_move_interval,
                s.super_commander_max_move_interval
            )
        );
    }

    #[test]
    fn random_int_edges_of_unit_interval() {
        let settings = Settings::default();
        let mut low = Intelligence::with_source(settings.clone(), Box::new(ScriptedUniform::new(vec![0.0])));
        assert_eq!(low.random_int(5, 10), 5);
        let mut high = Intelligence::with_source(settings, Box::new(ScriptedUniform::new(vec![0.999_999])));
        assert_eq!(high.random_int(5, 10), 10);
    }

    #[test]
    fn random_int_spans_the_whole_u32_range() {
        let settings = Settings::default();
        let mut high = Intelligence::with_source(settings.clone(), Box::new(ScriptedUniform::new(vec![0.999_999])));
        assert!(high.random_int(0, u32::MAX) > u32::MAX / 2);
        assert_eq!(high.random_int(u32::MAX - 1, u32::MAX), u32::MAX);
        let mut low = Intelligence::with_source(settings, Box::new(ScriptedUniform::new(vec![0.0])));
        assert_eq!(low.random_int(0, u32::MAX), 0);
    }

    #[test]
    fn planet_and_starbase_counts_stay_in_limits() {
        let mut intel = smarty(5);
        let s = Settings::default();
        for _ in 0..200 {
            let planets = intel.initial_planet_count();
            assert!((s.min_planet_count..=s.max_planet_count).contains(&planets));
            let bases = intel.initial_starbase_count();
            assert!((s.min_starbase_count..=s.max_starbase_count).contains(&bases));
        }
    }

    #[test]
    fn exponential_matches_inverse_cdf() {
        let mut intel = Intelligence::with_source(
            Settings::default(),
            Box::new(ScriptedUniform::new(vec![0.5])),
        );
        let sample = intel.exponential(4.0);
        assert!((sample - 4.0 * std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut intel = smarty(17);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| intel.exponential(3.5)).sum::<f64>() / n as f64;
        assert!((mean - 3.5).abs() < 0.15, "sample mean {}", mean);
    }

    #[test]
    fn klingon_count_formula() {
        // u = 0.5, skill 3, inTime 14: 2*14*(3)*0.3 + 0.2 = 25.4 -> 25
        let mut intel = Intelligence::with_source(
            Settings::default(),
            Box::new(ScriptedUniform::new(vec![0.5])),
        );
        assert_eq!(intel.initial_klingon_count(14.0, PlayerType::Good), 25);
    }

    #[test]
    fn commander_count_is_capped() {
        let mut intel = Intelligence::with_source(
            Settings::default(),
            Box::new(ScriptedUniform::new(vec![0.99])),
        );
        assert_eq!(intel.initial_commander_count(PlayerType::Emeritus, 500), 10);
    }

    #[test]
    fn power_ranges_scale_with_skill() {
        let mut intel = smarty(23);
        for _ in 0..100 {
            let k = intel.klingon_power(PlayerType::Novice);
            assert!((325.0..475.0).contains(&k));
            let c = intel.commander_power(PlayerType::Expert);
            assert!((1150.0..1550.0).contains(&c));
            let s = intel.super_commander_power(PlayerType::Good);
            assert!((1550.0..1950.0).contains(&s));
        }
    }

    #[test]
    fn initial_stardate_is_whole_hundreds() {
        let mut intel = smarty(1);
        for _ in 0..50 {
            let date = intel.initial_stardate();
            assert_eq!(date % 100.0, 0.0);
            assert!((2000.0..=5000.0).contains(&date));
        }
    }

    #[test]
    fn random_coordinates_are_valid() {
        let mut intel = smarty(8);
        for _ in 0..500 {
            assert!(intel.random_coordinate().is_valid());
        }
    }
}
