//! The session-wide mutable record
//!
//! Field mutation is unchecked: callers keep counts non-negative and
//! coordinates in range at each call site.

use serde::{Deserialize, Serialize};

use super::constants::{
    GameType, PlayerType, ShipCondition, INITIAL_ENERGY, INITIAL_SHIELD_ENERGY, INITIAL_TORPEDOES,
};
use super::coordinate::Coordinate;
use super::enemy::EnemyKind;
use super::errors::{GameError, GameResult};
use crate::services::intelligence::Intelligence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player_type: PlayerType,
    pub game_type: GameType,
    pub energy: f64,
    pub shield_energy: f64,
    pub torpedo_count: u32,
    pub stardate: f64,
    pub starting_stardate: f64,
    pub in_time: f64,
    pub remaining_game_time: f64,
    pub remaining_klingons: u32,
    pub remaining_commanders: u32,
    pub remaining_super_commanders: u32,
    pub initial_enemies: u32,
    pub starbase_count: u32,
    pub planet_count: u32,
    pub ship_condition: ShipCondition,
    pub current_quadrant: Coordinate,
    pub current_sector: Coordinate,
    pub warp_factor: f64,
    pub game_active: bool,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            player_type: PlayerType::Novice,
            game_type: GameType::Short,
            energy: INITIAL_ENERGY,
            shield_energy: INITIAL_SHIELD_ENERGY,
            torpedo_count: INITIAL_TORPEDOES,
            stardate: 0.0,
            starting_stardate: 0.0,
            in_time: 0.0,
            remaining_game_time: 0.0,
            remaining_klingons: 0,
            remaining_commanders: 0,
            remaining_super_commanders: 0,
            initial_enemies: 0,
            starbase_count: 0,
            planet_count: 0,
            ship_condition: ShipCondition::Green,
            current_quadrant: Coordinate::default(),
            current_sector: Coordinate::default(),
            warp_factor: 5.0,
            game_active: false,
        }
    }
}

impl GameState {
    /// Compute every initial value through the balance engine, in order:
    /// game/player type, endowments, stardate, time budget, klingons,
    /// commanders, super-commanders, starbases and planets.
    pub fn initialize_new_game(
        &mut self,
        player_type: PlayerType,
        game_type: GameType,
        intelligence: &mut Intelligence,
    ) {
        self.player_type = player_type;
        self.game_type = game_type;

        self.energy = INITIAL_ENERGY;
        self.shield_energy = INITIAL_SHIELD_ENERGY;
        self.torpedo_count = INITIAL_TORPEDOES;

        self.stardate = intelligence.initial_stardate();
        self.starting_stardate = self.stardate;

        self.in_time = intelligence.initial_game_time(game_type);
        self.remaining_game_time = self.in_time;

        let klingons = intelligence.initial_klingon_count(self.in_time, player_type);
        let commanders = intelligence
            .initial_commander_count(player_type, klingons)
            .min(klingons);
        let super_commanders = if player_type.has_super_commanders() {
            intelligence
                .initial_super_commander_count(player_type)
                .min(klingons - commanders)
        } else {
            0
        };
        self.remaining_klingons = klingons - commanders - super_commanders;
        self.remaining_commanders = commanders;
        self.remaining_super_commanders = super_commanders;
        self.initial_enemies = klingons;

        self.starbase_count = intelligence.initial_starbase_count();
        self.planet_count = intelligence.initial_planet_count();

        self.ship_condition = ShipCondition::Green;
        self.game_active = true;
    }

    /// Reactivate a session that ended.
    pub fn reset_statistics(&mut self) {
        self.game_active = true;
        if self.ship_condition == ShipCondition::Dead {
            self.ship_condition = ShipCondition::Green;
        }
    }

    pub fn remaining_enemies(&self) -> u32 {
        self.remaining_klingons + self.remaining_commanders + self.remaining_super_commanders
    }

    pub fn remaining_of(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::Klingon => self.remaining_klingons,
            EnemyKind::Commander => self.remaining_commanders,
            EnemyKind::SuperCommander => self.remaining_super_commanders,
        }
    }

    /// Drop `count` from the tally for `kind`, never below zero.
    pub fn decrement_enemy(&mut self, kind: EnemyKind, count: u32) {
        let field = match kind {
            EnemyKind::Klingon => &mut self.remaining_klingons,
            EnemyKind::Commander => &mut self.remaining_commanders,
            EnemyKind::SuperCommander => &mut self.remaining_super_commanders,
        };
        *field = field.saturating_sub(count);
    }

    pub fn decrement_starbases(&mut self) {
        self.starbase_count = self.starbase_count.saturating_sub(1);
    }

    pub fn decrement_planets(&mut self) {
        self.planet_count = self.planet_count.saturating_sub(1);
    }

    /// Move the clock forward and recompute the time budget.
    pub fn advance_stardate(&mut self, delta: f64) {
        self.stardate += delta;
        self.remaining_game_time = self.in_time - (self.stardate - self.starting_stardate);
    }

    pub fn elapsed_stardates(&self) -> f64 {
        self.stardate - self.starting_stardate
    }

    pub fn is_time_expired(&self) -> bool {
        self.remaining_game_time <= 0.0
    }

    pub fn is_docked(&self) -> bool {
        self.ship_condition == ShipCondition::Docked
    }

    pub fn consume_torpedo(&mut self) -> bool {
        if self.torpedo_count == 0 {
            return false;
        }
        self.torpedo_count -= 1;
        true
    }

    pub fn subtract_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn subtract_shields(&mut self, amount: f64) {
        self.shield_energy = (self.shield_energy - amount).max(0.0);
    }

    /// Restock at a starbase.
    pub fn dock(&mut self) {
        self.energy = INITIAL_ENERGY;
        self.shield_energy = INITIAL_SHIELD_ENERGY;
        self.torpedo_count = INITIAL_TORPEDOES;
        self.ship_condition = ShipCondition::Docked;
    }

    /// Efficiency rating: enemies destroyed per stardate, scaled by 1000.
    pub fn efficiency_rating(&self) -> i32 {
        let elapsed = self.elapsed_stardates().max(0.1);
        ((self.initial_enemies as f64 / elapsed) * 1000.0) as i32
    }

    pub fn to_snapshot(&self) -> GameResult<String> {
        serde_json::to_string_pretty(self).map_err(GameError::Snapshot)
    }

    pub fn from_snapshot(text: &str) -> GameResult<Self> {
        serde_json::from_str(text).map_err(GameError::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn new_game(seed: u64, player: PlayerType, game: GameType) -> GameState {
        let mut intelligence = Intelligence::new(Settings::default(), seed);
        let mut state = GameState::default();
        state.initialize_new_game(player, game, &mut intelligence);
        state
    }

    #[test]
    fn new_game_has_full_endowments() {
        let state = new_game(1, PlayerType::Good, GameType::Medium);
        assert_eq!(state.energy, INITIAL_ENERGY);
        assert_eq!(state.shield_energy, INITIAL_SHIELD_ENERGY);
        assert_eq!(state.torpedo_count, INITIAL_TORPEDOES);
        assert_eq!(state.in_time, 14.0);
        assert_eq!(state.remaining_game_time, state.in_time);
        assert!(state.game_active);
    }

    #[test]
    fn enemy_counts_are_conserved() {
        for seed in 0..50 {
            let state = new_game(seed, PlayerType::Expert, GameType::Long);
            assert_eq!(
                state.remaining_enemies(),
                state.initial_enemies,
                "seed {}: split must account for every generated enemy",
                seed
            );
        }
    }

    #[test]
    fn low_tiers_have_no_super_commanders() {
        for seed in 0..30 {
            assert_eq!(
                new_game(seed, PlayerType::Novice, GameType::Long).remaining_super_commanders,
                0
            );
            assert_eq!(
                new_game(seed, PlayerType::Fair, GameType::Long).remaining_super_commanders,
                0
            );
        }
    }

    #[test]
    fn decrement_never_goes_negative() {
        let mut state = GameState::default();
        state.remaining_commanders = 1;
        state.decrement_enemy(EnemyKind::Commander, 3);
        assert_eq!(state.remaining_commanders, 0);
        state.decrement_starbases();
        assert_eq!(state.starbase_count, 0);
    }

    #[test]
    fn advancing_time_shrinks_budget() {
        let mut state = GameState {
            stardate: 2000.0,
            starting_stardate: 2000.0,
            in_time: 7.0,
            remaining_game_time: 7.0,
            ..GameState::default()
        };
        state.advance_stardate(2.5);
        assert!((state.remaining_game_time - 4.5).abs() < 1e-9);
        state.advance_stardate(5.0);
        assert!(state.is_time_expired());
    }

    #[test]
    fn docking_restocks() {
        let mut state = GameState {
            energy: 10.0,
            shield_energy: 0.0,
            torpedo_count: 1,
            ..GameState::default()
        };
        state.dock();
        assert_eq!(state.energy, INITIAL_ENERGY);
        assert_eq!(state.torpedo_count, INITIAL_TORPEDOES);
        assert!(state.is_docked());
    }

    #[test]
    fn reset_statistics_reactivates() {
        let mut state = GameState {
            game_active: false,
            ship_condition: ShipCondition::Dead,
            ..GameState::default()
        };
        state.reset_statistics();
        assert!(state.game_active);
        assert_eq!(state.ship_condition, ShipCondition::Green);
    }

    #[test]
    fn snapshot_uses_names_and_xy_pairs() {
        let state = new_game(9, PlayerType::Fair, GameType::Short);
        let json = state.to_snapshot().unwrap();
        assert!(json.contains("\"player_type\": \"Fair\""));
        assert!(json.contains("\"ship_condition\": \"Green\""));
        assert!(json.contains("\"current_quadrant\": {"));

        let restored = GameState::from_snapshot(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn snapshot_with_unknown_enum_name_fails() {
        let state = GameState::default();
        let json = state
            .to_snapshot()
            .unwrap()
            .replace("\"Novice\"", "\"Admiral\"");
        let err = GameState::from_snapshot(&json).unwrap_err();
        assert!(matches!(err, GameError::Snapshot(_)));
    }

    #[test]
    fn efficiency_rating_truncates() {
        let state = GameState {
            initial_enemies: 17,
            stardate: 2007.0,
            starting_stardate: 2000.0,
            ..GameState::default()
        };
        assert_eq!(state.efficiency_rating(), 2428);
    }
}
