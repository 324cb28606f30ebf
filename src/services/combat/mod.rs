//! Combat system
//!
//! Handles all combat operations including phaser fire, torpedo launch,
//! shield control, enemy fire and enemy evasive movement.

pub mod formulas;
pub mod line_of_sight;

mod enemy_attack;
mod evasion;
mod phasers;
mod shields;
mod torpedoes;

pub use enemy_attack::{advance_projectiles, enemies_fire};
pub use evasion::{evade, move_enemies};
pub use phasers::fire_phasers;
pub use shields::{absorb_hit, set_shields};
pub use torpedoes::fire_torpedoes;

use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::devices::DeviceType;
use crate::models::enemy::{Enemy, EnemyId};
use crate::ui::presenters::CombatPresenter;

/// Power below this counts as destroyed; absorbs rounding in exact-kill shots.
const KILL_EPSILON: f64 = 1e-6;

/// Take `amount` of power from an enemy, returning what it has left.
fn drain_enemy(enemy: &mut Enemy, amount: f64) -> f64 {
    enemy.power = (enemy.power - amount).max(0.0);
    if enemy.power < KILL_EPSILON {
        enemy.power = 0.0;
    }
    enemy.power
}

/// Remove a destroyed enemy from the current quadrant and the session
/// tallies.
fn destroy_enemy(ctx: &mut SimContext, id: EnemyId, feedback: &mut dyn Feedback) -> Option<Enemy> {
    let enemy = ctx.galaxy.current_quadrant_mut().remove_enemy(id)?;
    ctx.state.decrement_enemy(enemy.kind, 1);
    log::info!(
        "{} {} destroyed at {} in quadrant {}",
        enemy.kind.name(),
        enemy.id,
        enemy.sector,
        ctx.state.current_quadrant
    );
    feedback.play_sound(SoundKind::EnemyDestroyed);
    CombatPresenter::show_enemy_destroyed(enemy.kind, enemy.sector, feedback);
    Some(enemy)
}

/// Knock out one device at random for a skill-scaled repair time.
fn damage_random_device(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> DeviceType {
    let last = (DeviceType::ALL.len() - 1) as u32;
    let device = DeviceType::ALL[ctx.intelligence.random_int(0, last) as usize];
    let duration = ctx.intelligence.device_damage_duration(ctx.state.player_type);
    ctx.devices.damage(device, duration);
    log::info!("{} damaged for {:.2} stardates", device.name(), duration);
    feedback.display_message(
        &format!("Damage control: {} damaged", device.name()),
        Severity::Warning,
    );
    device
}
