//! The bundle of per-session services
//!
//! Exactly one of each exists per session. Fields are public so a service
//! can borrow the galaxy mutably while reading the settings.

use crate::config::Settings;
use crate::models::constants::{GameType, PlayerType, ShipCondition};
use crate::models::coordinate::Coordinate;
use crate::models::devices::{DeviceStatus, DeviceType, Devices};
use crate::models::galaxy::Galaxy;
use crate::models::game_state::GameState;
use crate::models::motion::Projectile;
use crate::services::events::EventScheduler;
use crate::services::intelligence::Intelligence;

pub struct SimContext {
    pub settings: Settings,
    pub state: GameState,
    pub galaxy: Galaxy,
    pub intelligence: Intelligence,
    pub devices: Devices,
    pub events: EventScheduler,
    pub projectiles: Vec<Projectile>,
    /// Game-clock seconds since the session began.
    pub clock: f64,
}

impl SimContext {
    pub fn new(settings: Settings, player_type: PlayerType, game_type: GameType, seed: u64) -> Self {
        let intelligence = Intelligence::new(settings.clone(), seed);
        Self::with_intelligence(settings, player_type, game_type, intelligence)
    }

    /// Build a session around a prepared balance engine (e.g. one fed by a
    /// scripted uniform source).
    pub fn with_intelligence(
        settings: Settings,
        player_type: PlayerType,
        game_type: GameType,
        mut intelligence: Intelligence,
    ) -> Self {
        let mut state = GameState::default();
        state.initialize_new_game(player_type, game_type, &mut intelligence);
        let galaxy = Galaxy::generate(&mut state, &mut intelligence);

        let mut events = EventScheduler::new();
        events.arm_all(&settings, &state, &galaxy, &mut intelligence);

        let mut ctx = SimContext {
            settings,
            state,
            galaxy,
            intelligence,
            devices: Devices::new(),
            events,
            projectiles: Vec::new(),
            clock: 0.0,
        };
        ctx.state.ship_condition = ctx.evaluate_condition();
        ctx
    }

    pub fn shields_up(&self) -> bool {
        self.devices.status(DeviceType::Shields) == DeviceStatus::Up
    }

    /// Put the ship at `sector` of `quadrant` (or the nearest free sector),
    /// keeping the galaxy and the game state in agreement. Leaving a
    /// quadrant undocks the ship and drops torpedoes still in flight there.
    pub fn move_ship(&mut self, quadrant: Coordinate, sector: Coordinate) -> Option<Coordinate> {
        let previous = self.galaxy.current_coordinate();
        let landed = self.galaxy.relocate_ship(quadrant, sector)?;
        self.state.current_quadrant = quadrant;
        self.state.current_sector = landed;
        if self.state.is_docked() {
            self.state.ship_condition = ShipCondition::Green;
        }
        if previous != quadrant {
            self.projectiles.retain(|p| p.quadrant == quadrant);
            let clock = self.clock;
            // Enemies in a freshly entered quadrant start their timers now.
            for enemy in self.galaxy.current_quadrant_mut().enemies_mut() {
                enemy.last_fired = clock;
                enemy.last_moved = clock;
            }
        }
        self.state.ship_condition = self.evaluate_condition();
        Some(landed)
    }

    /// Green, Yellow, Red, Docked or Dead, from the current situation.
    pub fn evaluate_condition(&self) -> ShipCondition {
        if self.state.energy <= 0.0 {
            ShipCondition::Dead
        } else if self.state.is_docked() {
            ShipCondition::Docked
        } else if self.galaxy.current_quadrant().enemy_count() > 0 {
            ShipCondition::Red
        } else if self.state.energy < self.settings.low_energy_threshold {
            ShipCondition::Yellow
        } else {
            ShipCondition::Green
        }
    }

    /// Let `stardates` pass: the clock moves and damage control works on
    /// every damaged device (faster while docked). Returns the devices
    /// brought back on line.
    pub fn advance_time(&mut self, stardates: f64) -> Vec<DeviceType> {
        if stardates <= 0.0 {
            return Vec::new();
        }
        self.state.advance_stardate(stardates);
        let docked = self.state.is_docked();
        let work = if docked {
            stardates * self.settings.docked_repair_factor
        } else {
            stardates
        };
        self.devices.repair_all(work, docked)
    }
}
