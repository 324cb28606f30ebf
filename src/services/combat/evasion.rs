use crate::game_engine::SimContext;
use crate::models::coordinate::Coordinate;
use crate::models::enemy::EnemyId;
use crate::models::quadrant::Quadrant;
use crate::services::intelligence::Intelligence;

/// Step an enemy one sector in a random direction, retrying up to `retries`
/// times until the stepped sector is on the grid and vacant. Returns the
/// new sector, or None when every try failed (the enemy stays put).
pub fn evade(
    quadrant: &mut Quadrant,
    id: EnemyId,
    intelligence: &mut Intelligence,
    retries: u32,
) -> Option<Coordinate> {
    let from = quadrant.enemy(id)?.sector;
    for _ in 0..retries {
        let to = from.step(intelligence.random_direction());
        if quadrant.is_vacant(to) && quadrant.move_enemy(id, to) {
            return Some(to);
        }
    }
    log::warn!("enemy {} found no room to evade from {}", id, from);
    None
}

/// Move every enemy in the ship's quadrant whose move interval has passed.
/// Returns how many actually changed sector.
pub fn move_enemies(ctx: &mut SimContext) -> usize {
    let now = ctx.clock;
    let retries = ctx.settings.evasion_retry_count;
    let ready: Vec<EnemyId> = ctx
        .galaxy
        .current_quadrant()
        .enemies()
        .iter()
        .filter(|e| e.is_alive() && e.ready_to_move(now))
        .map(|e| e.id)
        .collect();

    let mut moved = 0;
    for id in ready {
        let quadrant = ctx.galaxy.current_quadrant_mut();
        if let Some(to) = evade(quadrant, id, &mut ctx.intelligence, retries) {
            log::debug!("enemy {} moved to {}", id, to);
            moved += 1;
        }
        if let Some(enemy) = ctx.galaxy.current_quadrant_mut().enemy_mut(id) {
            enemy.last_moved = now;
        }
    }
    moved
}
