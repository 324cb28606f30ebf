use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::coordinate::sector_distance;
use crate::models::devices::DeviceType;
use crate::models::enemy::{Enemy, EnemyId};
use crate::models::errors::{GameError, GameResult};
use crate::ui::presenters::CombatPresenter;

use super::evasion::evade;
use super::formulas::hit_value;
use super::line_of_sight::{has_line_of_sight, quadrant_obstacles, Sight};
use super::{destroy_enemy, drain_enemy};

/// Check preconditions for firing torpedoes.
fn check_torpedo_readiness(ctx: &SimContext) -> GameResult<()> {
    if ctx.devices.is_damaged(DeviceType::PhotonTubes) {
        return Err(GameError::unable("photon tubes are damaged"));
    }
    if ctx.state.torpedo_count == 0 {
        return Err(GameError::unable("all photon torpedoes expended"));
    }
    if ctx.galaxy.current_quadrant().enemy_count() == 0 {
        return Err(GameError::unable("no enemies in this quadrant"));
    }
    Ok(())
}

/// Closest live enemy to the ship.
fn nearest_target(ctx: &SimContext) -> Option<Enemy> {
    let ship = ctx.state.current_sector;
    ctx.galaxy
        .current_quadrant()
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            sector_distance(ship, a.sector).total_cmp(&sector_distance(ship, b.sector))
        })
        .cloned()
}

enum Shot {
    Blocked,
    Dodged,
    Hit,
}

fn fire_one(ctx: &mut SimContext, target: &Enemy, feedback: &mut dyn Feedback) -> Shot {
    let ship = ctx.state.current_sector;

    let obstacles = quadrant_obstacles(ctx.galaxy.current_quadrant(), &[target.id]);
    if let Sight::Blocked(obstacle) = has_line_of_sight(ship, target.sector, &obstacles) {
        log::debug!("torpedo at {} stopped by {:?} at {}", target.sector, obstacle.kind, obstacle.sector);
        feedback.play_sound(SoundKind::TorpedoMissed);
        feedback.display_message(
            &format!("Torpedo stopped by obstacle at {}", obstacle.sector),
            Severity::Info,
        );
        return Shot::Blocked;
    }

    if ctx.intelligence.chance(ctx.settings.torpedo_dodge_chance) {
        let retries = ctx.settings.evasion_retry_count;
        let quadrant = ctx.galaxy.current_quadrant_mut();
        if let Some(to) = evade(quadrant, target.id, &mut ctx.intelligence, retries) {
            quadrant.mark_torpedo_miss(target.sector);
            feedback.play_sound(SoundKind::TorpedoMissed);
            feedback.display_message(
                &format!("{} at {} evades to {}", target.kind.name(), target.sector, to),
                Severity::Info,
            );
            return Shot::Dodged;
        }
    }

    let hit = hit_value(ship, target.sector, ctx.settings.torpedo_power, &ctx.settings);
    if let Some(enemy) = ctx.galaxy.current_quadrant_mut().enemy_mut(target.id) {
        let remaining = drain_enemy(enemy, hit);
        CombatPresenter::show_enemy_hit(target.kind, target.sector, hit, remaining, feedback);
    }
    Shot::Hit
}

/// Fire up to `count` photon torpedoes, each at the nearest live enemy.
/// The salvo stops early when the tubes run dry or the quadrant is clear.
pub fn fire_torpedoes(ctx: &mut SimContext, count: u32, feedback: &mut dyn Feedback) -> GameResult<()> {
    check_torpedo_readiness(ctx)?;

    let salvo = count.max(1).min(ctx.state.torpedo_count);
    for _ in 0..salvo {
        let Some(target) = nearest_target(ctx) else {
            break;
        };
        if !ctx.state.consume_torpedo() {
            break;
        }
        feedback.play_sound(SoundKind::TorpedoFired);

        if let Shot::Hit = fire_one(ctx, &target, feedback) {
            let dead: Vec<EnemyId> = ctx
                .galaxy
                .current_quadrant()
                .enemies()
                .iter()
                .filter(|e| e.id == target.id && !e.is_alive())
                .map(|e| e.id)
                .collect();
            for id in dead {
                destroy_enemy(ctx, id, feedback);
            }
        }
    }
    ctx.state.ship_condition = ctx.evaluate_condition();
    Ok(())
}
