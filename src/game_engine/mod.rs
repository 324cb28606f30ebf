//! Session state machine
//!
//! The `GameEngine` owns the simulation context and decides when the
//! session is over. Time moves through `on_tick`; the player acts through
//! `on_command`. Neither is re-entrant and both run to completion.

pub mod context;

pub use context::SimContext;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::constants::{GameType, PlayerType, ShipCondition, GRID_SIZE};
use crate::models::errors::{GameError, GameResult};
use crate::models::game_state::GameState;
use crate::services::commands::{self, Command};
use crate::services::events::{check_events, EventOutcome};
use crate::services::{combat, computer, navigation};
use crate::ui::presenters::{CombatPresenter, DevicePresenter, HelpPresenter, ScanPresenter, StatusPresenter};

/// Length of one simulation step when a span of real time is replayed.
pub const TICK_SECONDS: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Playing,
    Victory { rating: i32 },
    Defeat { reason: DefeatReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatReason {
    ShipDestroyed,
    TimeExpired,
    Supernova,
}

impl DefeatReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DefeatReason::ShipDestroyed => "The ship has been destroyed",
            DefeatReason::TimeExpired => "Time has run out",
            DefeatReason::Supernova => "The ship was lost in a supernova",
        }
    }
}

/// Core game engine that manages the session and its end conditions
pub struct GameEngine {
    ctx: SimContext,
    status: SessionStatus,
    save_path: Option<PathBuf>,
    lost_to_supernova: bool,
}

impl GameEngine {
    /// Start a new session with a freshly generated galaxy.
    pub fn new(settings: Settings, player_type: PlayerType, game_type: GameType, seed: u64) -> Self {
        if settings.grid_size != GRID_SIZE {
            log::warn!(
                "grid_size {} in settings ignored; the grid is fixed at {}",
                settings.grid_size,
                GRID_SIZE
            );
        }
        let ctx = SimContext::new(settings, player_type, game_type, seed);
        log::info!(
            "new {:?} {:?} session (seed {}): {} enemies, {} starbases, {:.1} stardates",
            player_type,
            game_type,
            seed,
            ctx.state.remaining_enemies(),
            ctx.state.starbase_count,
            ctx.state.in_time
        );
        Self::from_context(ctx)
    }

    /// Wrap a prepared context.
    pub fn from_context(ctx: SimContext) -> Self {
        GameEngine {
            ctx,
            status: SessionStatus::Playing,
            save_path: None,
            lost_to_supernova: false,
        }
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Playing
    }

    // ========== Time ==========

    /// Advance the simulation by `delta` game-clock seconds.
    ///
    /// Within the step, enemies move before anything reads their positions;
    /// torpedoes in flight land, ready enemies fire, and the event
    /// scheduler runs once its wall-clock interval has elapsed.
    pub fn on_tick(&mut self, delta: f64, feedback: &mut dyn Feedback) -> &SessionStatus {
        if self.is_over() || delta <= 0.0 {
            return &self.status;
        }
        let ctx = &mut self.ctx;
        ctx.clock += delta;
        let restored = ctx.advance_time(delta / ctx.settings.seconds_per_stardate);
        for device in restored {
            feedback.display_message(&format!("{} repaired", device.name()), Severity::Info);
        }

        combat::move_enemies(ctx);
        combat::advance_projectiles(ctx, delta, feedback);
        combat::enemies_fire(ctx, feedback);

        let interval = ctx.settings.event_check_interval;
        if ctx.events.record_wall_time(delta, interval) {
            self.run_scheduler(feedback);
        }

        self.refresh(feedback);
        &self.status
    }

    /// Replay `seconds` of real time as fixed-length ticks.
    pub fn advance(&mut self, seconds: f64, feedback: &mut dyn Feedback) {
        let mut remaining = seconds;
        while remaining > 0.0 && !self.is_over() {
            let step = remaining.min(TICK_SECONDS);
            self.on_tick(step, feedback);
            remaining -= step;
        }
    }

    fn run_scheduler(&mut self, feedback: &mut dyn Feedback) {
        for report in check_events(&mut self.ctx, feedback) {
            if let EventOutcome::Supernova { ship_lost: true, .. } = report.outcome {
                self.lost_to_supernova = true;
            }
        }
    }

    /// Re-evaluate the ship's condition and the session's end state.
    fn refresh(&mut self, feedback: &mut dyn Feedback) {
        let before = self.ctx.state.ship_condition;
        let after = self.ctx.evaluate_condition();
        self.ctx.state.ship_condition = after;
        if after == ShipCondition::Red && before != ShipCondition::Red {
            feedback.play_sound(SoundKind::RedAlert);
            feedback.display_message("Red alert: enemy vessels in this quadrant", Severity::Alert);
        }

        if let Some(status) = self.check_game_over() {
            match status {
                SessionStatus::Victory { rating } => CombatPresenter::show_victory(rating, feedback),
                SessionStatus::Defeat { reason } => CombatPresenter::show_defeat(reason.describe(), feedback),
                SessionStatus::Playing => {}
            }
        }
    }

    /// Move to Victory or Defeat when the session has just ended. Returns
    /// the new status on the call that ends the session, None otherwise.
    ///
    /// A lost ship outranks a cleared galaxy, which outranks the clock.
    pub fn check_game_over(&mut self) -> Option<SessionStatus> {
        if self.is_over() {
            return None;
        }
        let state = &self.ctx.state;
        let status = if state.energy <= 0.0 || state.ship_condition == ShipCondition::Dead {
            let reason = if self.lost_to_supernova {
                DefeatReason::Supernova
            } else {
                DefeatReason::ShipDestroyed
            };
            SessionStatus::Defeat { reason }
        } else if state.remaining_enemies() == 0 {
            SessionStatus::Victory {
                rating: state.efficiency_rating(),
            }
        } else if state.is_time_expired() {
            SessionStatus::Defeat {
                reason: DefeatReason::TimeExpired,
            }
        } else {
            return None;
        };

        log::info!("session over at stardate {:.2}: {:?}", state.stardate, status);
        self.ctx.state.game_active = false;
        self.status = status.clone();
        Some(status)
    }

    // ========== Commands ==========

    /// Carry out one command. Errors leave the session as it was, except
    /// that time-passing commands which succeed run a scheduler check.
    pub fn on_command(&mut self, command: Command, feedback: &mut dyn Feedback) -> GameResult<()> {
        if self.is_over() {
            return Err(GameError::unable("the session is over"));
        }
        let ctx = &mut self.ctx;
        match command {
            Command::Rest(stardates) => {
                navigation::rest(ctx, stardates, feedback)?;
                self.run_scheduler(feedback);
            }
            Command::Move(target) => {
                navigation::travel(ctx, target, feedback)?;
                self.run_scheduler(feedback);
                let report = computer::status_report(&self.ctx);
                StatusPresenter::show_status(&report, self.ctx.galaxy.current_quadrant(), feedback);
            }
            Command::Phasers(power) => combat::fire_phasers(ctx, power, feedback)?,
            Command::Photons(count) => combat::fire_torpedoes(ctx, count, feedback)?,
            Command::Warp(factor) => navigation::set_warp_factor(ctx, factor.value(), feedback)?,
            Command::Shields(raise) => combat::set_shields(ctx, raise, feedback)?,
            Command::Chart => {
                let grid = computer::chart(&ctx.galaxy);
                ScanPresenter::show_chart(&grid, ctx.state.current_quadrant, feedback);
            }
            Command::LongRangeScan => {
                let entries = computer::long_range_scan(ctx)?;
                ScanPresenter::show_long_range_scan(&entries, feedback);
            }
            Command::Damages => {
                DevicePresenter::show_damage_report(&computer::damage_report(&ctx.devices), feedback);
            }
            Command::Dock => navigation::dock(ctx, feedback)?,
            Command::Help => HelpPresenter::show_help(feedback),
            Command::Save => {
                let path = self.save()?;
                feedback.display_message(&format!("Game saved to {}", path.display()), Severity::Info);
            }
            Command::Quit => {}
        }
        self.refresh(feedback);
        Ok(())
    }

    /// Parse and carry out one line of player input, reporting any failure
    /// to the player. Returns false when the player asked to quit.
    pub fn execute(&mut self, input: &str, feedback: &mut dyn Feedback) -> bool {
        let command = match commands::parse(input) {
            Ok(command) => command,
            Err(err) => {
                report_error(&err, feedback);
                return true;
            }
        };
        if command == Command::Quit {
            return false;
        }
        if let Err(err) = self.on_command(command, feedback) {
            report_error(&err, feedback);
        }
        true
    }

    // ========== Persistence ==========

    /// Write the game-state snapshot to the save path.
    pub fn save(&self) -> GameResult<PathBuf> {
        let path = self
            .save_path
            .clone()
            .ok_or_else(|| GameError::unable("no save file configured"))?;
        write_snapshot(&self.ctx.state, &path)?;
        Ok(path)
    }

    /// Replace the game state with a snapshot. A snapshot that cannot be
    /// read leaves the session untouched.
    pub fn restore(&mut self, snapshot: &str) -> GameResult<()> {
        let state = GameState::from_snapshot(snapshot).map_err(|err| {
            log::warn!("snapshot restore failed: {}", err);
            err
        })?;
        let condition = state.ship_condition;
        let (quadrant, sector) = (state.current_quadrant, state.current_sector);
        let previous = std::mem::replace(&mut self.ctx.state, state);
        self.ctx.state.reset_statistics();
        if self.ctx.move_ship(quadrant, sector).is_none() {
            log::warn!("snapshot places the ship in unusable quadrant {}", quadrant);
            self.ctx.state = previous;
            return Err(GameError::unable("the snapshot's ship position cannot be restored"));
        }
        self.ctx.projectiles.clear();
        if condition == ShipCondition::Docked {
            self.ctx.state.ship_condition = ShipCondition::Docked;
        }
        self.status = SessionStatus::Playing;
        self.lost_to_supernova = false;
        self.check_game_over();
        Ok(())
    }
}

fn write_snapshot(state: &GameState, path: &Path) -> GameResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, state.to_snapshot()?)?;
    Ok(())
}

/// Turn a command failure into player-visible feedback.
fn report_error(err: &GameError, feedback: &mut dyn Feedback) {
    match err {
        GameError::UnableToComply(_) => {
            feedback.play_sound(SoundKind::UnableToComply);
            feedback.display_message(&err.to_string(), Severity::Warning);
        }
        _ if err.is_input_error() => feedback.display_message(&err.to_string(), Severity::Warning),
        _ => {
            log::warn!("command failed: {}", err);
            feedback.display_message(&err.to_string(), Severity::Alert);
        }
    }
}
