use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::constants::ShipCondition;
use crate::models::enemy::EnemyId;
use crate::models::motion::{advance_motion, MovingEntity, Projectile};
use crate::ui::presenters::CombatPresenter;

use super::damage_random_device;
use super::formulas::hit_value;
use super::line_of_sight::{has_line_of_sight, quadrant_obstacles, Sight};
use super::shields::absorb_hit;

/// Enemies in the ship's quadrant whose firing interval has passed take a
/// shot. A shot with a clear line launches a torpedo; a blocked one is
/// wasted. Either way the shooter's timer restarts. Returns the number of
/// torpedoes launched.
pub fn enemies_fire(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> usize {
    if ctx.state.is_docked() || ctx.state.ship_condition == ShipCondition::Dead {
        return 0;
    }
    let now = ctx.clock;
    let ship = ctx.state.current_sector;
    let ready: Vec<EnemyId> = ctx
        .galaxy
        .current_quadrant()
        .enemies()
        .iter()
        .filter(|e| e.is_alive() && e.ready_to_fire(now))
        .map(|e| e.id)
        .collect();

    let mut launched = 0;
    for id in ready {
        let quadrant = ctx.galaxy.current_quadrant_mut();
        let Some(shooter) = quadrant.enemy_mut(id) else {
            continue;
        };
        shooter.last_fired = now;
        let shooter = shooter.clone();

        let obstacles = quadrant_obstacles(ctx.galaxy.current_quadrant(), &[id]);
        if let Sight::Blocked(obstacle) = has_line_of_sight(shooter.sector, ship, &obstacles) {
            log::debug!(
                "{} {} at {} blocked by {:?} at {}",
                shooter.kind.name(),
                id,
                shooter.sector,
                obstacle.kind,
                obstacle.sector
            );
            feedback.display_message(
                &format!(
                    "{} at {} has no clear shot ({} in the way)",
                    shooter.kind.name(),
                    shooter.sector,
                    obstacle.kind.symbol().trim()
                ),
                Severity::Info,
            );
            continue;
        }

        let hit = hit_value(shooter.sector, ship, shooter.power, &ctx.settings);
        ctx.projectiles.push(Projectile::new(
            id,
            shooter.kind,
            ctx.state.current_quadrant,
            shooter.sector,
            ship,
            hit,
        ));
        feedback.play_sound(SoundKind::EnemyTorpedoFired);
        launched += 1;
    }
    launched
}

/// Fly every enemy torpedo for `delta` seconds and resolve the arrivals.
pub fn advance_projectiles(ctx: &mut SimContext, delta: f64, feedback: &mut dyn Feedback) {
    let speed = ctx.settings.projectile_speed;
    let mut arrived = Vec::new();
    for projectile in ctx.projectiles.iter_mut() {
        if advance_motion(projectile, speed, delta) {
            arrived.push(projectile.clone());
        }
    }
    ctx.projectiles.retain(|p| p.in_motion());

    for projectile in arrived {
        strike(ctx, &projectile, feedback);
    }
}

fn strike(ctx: &mut SimContext, projectile: &Projectile, feedback: &mut dyn Feedback) {
    if projectile.quadrant != ctx.state.current_quadrant
        || projectile.target != ctx.state.current_sector
        || ctx.state.ship_condition == ShipCondition::Dead
    {
        return;
    }
    if ctx.state.is_docked() {
        feedback.display_message("Starbase shields protect the ship", Severity::Info);
        return;
    }

    let absorption = absorb_hit(ctx, projectile.hit_value);
    feedback.play_sound(SoundKind::ShieldHit);
    CombatPresenter::show_ship_hit(
        projectile.shooter_kind,
        projectile.hit_value,
        &absorption,
        ctx.state.shield_energy,
        feedback,
    );

    let skill = ctx.state.player_type.skill() as f64;
    let threshold = (275.0 - 25.0 * skill) * (1.0 + 0.5 * ctx.intelligence.uniform());
    if absorption.to_energy > 0.0 && projectile.hit_value >= threshold {
        damage_random_device(ctx, feedback);
    }

    if ctx.state.energy <= 0.0 {
        ctx.state.ship_condition = ShipCondition::Dead;
        log::info!(
            "ship destroyed by {} fire in quadrant {}",
            projectile.shooter_kind.name(),
            ctx.state.current_quadrant
        );
        feedback.play_sound(SoundKind::ShipDestroyed);
    }
}
