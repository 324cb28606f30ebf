use crate::models::coordinate::{sector_distance, Coordinate};
use crate::models::quadrant::Quadrant;
use crate::services::intelligence::Intelligence;

use super::Galaxy;

/// Find a quadrant matching `predicate`: up to `budget` random picks, then a
/// row-major scan. None when no quadrant matches at all.
pub fn search_quadrants(
    galaxy: &Galaxy,
    intelligence: &mut Intelligence,
    budget: u32,
    predicate: impl Fn(&Quadrant) -> bool,
) -> Option<Coordinate> {
    for _ in 0..budget {
        let c = intelligence.random_coordinate();
        if galaxy.quadrant(c).is_some_and(&predicate) {
            return Some(c);
        }
    }
    log::debug!("random quadrant search exhausted after {} tries; scanning", budget);
    let found = galaxy
        .quadrants()
        .find(|&q| predicate(q))
        .map(|q| q.coordinate);
    if found.is_none() {
        log::warn!("no quadrant satisfies the search");
    }
    found
}

/// A quadrant holding a starbase that is not already under attack.
pub fn find_starbase_quadrant(
    galaxy: &Galaxy,
    intelligence: &mut Intelligence,
    budget: u32,
) -> Option<Coordinate> {
    search_quadrants(galaxy, intelligence, budget, |q| {
        q.has_starbase() && !q.under_attack
    })
}

/// A quadrant holding at least one live commander.
pub fn find_commander_quadrant(
    galaxy: &Galaxy,
    intelligence: &mut Intelligence,
    budget: u32,
) -> Option<Coordinate> {
    search_quadrants(galaxy, intelligence, budget, |q| q.commander_count() > 0)
}

/// A random vacant sector, falling back to the first vacant one.
pub fn find_vacant_sector(
    quadrant: &Quadrant,
    intelligence: &mut Intelligence,
    budget: u32,
) -> Option<Coordinate> {
    for _ in 0..budget {
        let c = intelligence.random_coordinate();
        if quadrant.is_vacant(c) {
            return Some(c);
        }
    }
    quadrant.vacant_sectors().next()
}

/// Closest vacant sector to `near`; ties go to the first in row-major order.
pub fn nearest_vacant_sector(quadrant: &Quadrant, near: Coordinate) -> Option<Coordinate> {
    quadrant.vacant_sectors().min_by(|a, b| {
        sector_distance(near, *a).total_cmp(&sector_distance(near, *b))
    })
}
