use crate::game_engine::SimContext;
use crate::io::{Feedback, SoundKind};
use crate::models::coordinate::{sector_distance, Coordinate};
use crate::models::devices::DeviceType;
use crate::models::enemy::EnemyId;
use crate::models::errors::{GameError, GameResult};
use crate::ui::presenters::CombatPresenter;

use super::formulas::{automatic_phaser_power, phaser_hit};
use super::{destroy_enemy, drain_enemy};

/// One enemy locked by the phaser banks.
#[derive(Debug, Clone, Copy)]
struct Lock {
    id: EnemyId,
    sector: Coordinate,
    distance: f64,
    allocated: f64,
}

/// Lock on every live enemy in the quadrant.
fn acquire_targets(ctx: &SimContext) -> GameResult<Vec<Lock>> {
    if ctx.devices.is_damaged(DeviceType::Phasers) {
        return Err(GameError::unable("phasers are damaged"));
    }
    let ship = ctx.state.current_sector;
    let locks: Vec<Lock> = ctx
        .galaxy
        .current_quadrant()
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .map(|e| Lock {
            id: e.id,
            sector: e.sector,
            distance: sector_distance(ship, e.sector),
            allocated: 0.0,
        })
        .collect();
    if locks.is_empty() {
        return Err(GameError::unable("no enemies in this quadrant"));
    }
    Ok(locks)
}

/// Split the energy between the locks. With no power given, each enemy
/// gets exactly what it takes to drain it.
fn allocate(ctx: &SimContext, locks: &mut [Lock], power: Option<f64>, dust: f64) {
    let drain_factor = ctx.settings.phaser_drain_factor;
    match power {
        Some(total) => {
            let share = total / locks.len() as f64;
            for lock in locks.iter_mut() {
                lock.allocated = share;
            }
        }
        None => {
            let quadrant = ctx.galaxy.current_quadrant();
            for lock in locks.iter_mut() {
                let defender = quadrant.enemy(lock.id).map_or(0.0, |e| e.power);
                lock.allocated = automatic_phaser_power(lock.distance, defender, dust, drain_factor);
            }
        }
    }
}

/// Fire the phaser banks at every enemy in the quadrant.
///
/// With `power` the energy is split equally between the targets; without
/// it the fire control computes the energy that destroys each target
/// outright. Attenuation per sector is the dust factor plus a small random
/// jitter.
///
/// # Errors
///
/// `UnableToComply` when the phasers are damaged, the quadrant holds no
/// enemies, or the ship lacks the energy. Nothing is spent in those cases.
pub fn fire_phasers(
    ctx: &mut SimContext,
    power: Option<f64>,
    feedback: &mut dyn Feedback,
) -> GameResult<()> {
    // Phase 1: Preconditions
    let mut locks = acquire_targets(ctx)?;

    // Phase 2: Allocation
    let dust = ctx.settings.phaser_dust_factor
        + ctx.settings.phaser_dust_jitter * ctx.intelligence.uniform();
    allocate(ctx, &mut locks, power, dust);
    let required: f64 = locks.iter().map(|l| l.allocated).sum();
    if required > ctx.state.energy {
        return Err(GameError::unable(format!(
            "insufficient energy for phasers ({:.0} required, {:.0} available)",
            required, ctx.state.energy
        )));
    }

    // Phase 3: Energy deduction
    ctx.state.subtract_energy(required);
    feedback.play_sound(SoundKind::PhaserFired);

    // Phase 4: Damage
    let drain_factor = ctx.settings.phaser_drain_factor;
    let mut destroyed = Vec::new();
    for lock in &locks {
        let Some(enemy) = ctx.galaxy.current_quadrant_mut().enemy_mut(lock.id) else {
            continue;
        };
        let shot = phaser_hit(lock.distance, lock.allocated, enemy.power, dust, drain_factor);
        let remaining = drain_enemy(enemy, shot.drained);
        let kind = enemy.kind;
        CombatPresenter::show_enemy_hit(kind, lock.sector, shot.hit, remaining, feedback);
        if remaining <= 0.0 {
            destroyed.push(lock.id);
        }
    }

    // Phase 5: Cleanup
    for id in destroyed {
        destroy_enemy(ctx, id, feedback);
    }
    ctx.state.ship_condition = ctx.evaluate_condition();
    Ok(())
}
