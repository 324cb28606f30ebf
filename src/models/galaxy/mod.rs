//! Galaxy model
//!
//! Represents the game universe with 10x10 quadrants, each holding its own
//! 10x10 sector grid. The galaxy owns every quadrant for the whole session
//! and tracks which one the ship is in.

mod generation;
mod quadrant_ops;

use std::fmt;

use super::constants::GRID_SIZE;
use super::coordinate::Coordinate;
use super::enemy::{EnemyId, EnemyKind};
use super::quadrant::Quadrant;

pub use quadrant_ops::{
    find_commander_quadrant, find_starbase_quadrant, find_vacant_sector, nearest_vacant_sector,
    search_quadrants,
};

/// Top-level spatial container.
pub struct Galaxy {
    /// Row-major: `quadrants[y * GRID_SIZE + x]`.
    quadrants: Vec<Quadrant>,
    current: Coordinate,
    next_enemy_id: EnemyId,
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new()
    }
}

impl Galaxy {
    /// An empty galaxy with the ship's quadrant at (0,0).
    pub fn new() -> Self {
        Galaxy {
            quadrants: Coordinate::all().map(Quadrant::new).collect(),
            current: Coordinate::default(),
            next_enemy_id: 1,
        }
    }

    fn index(c: Coordinate) -> Option<usize> {
        c.is_valid().then(|| (c.y * GRID_SIZE + c.x) as usize)
    }

    // ========== Accessor Methods ==========

    pub fn quadrant(&self, c: Coordinate) -> Option<&Quadrant> {
        Self::index(c).and_then(|i| self.quadrants.get(i))
    }

    pub fn quadrant_mut(&mut self, c: Coordinate) -> Option<&mut Quadrant> {
        Self::index(c).and_then(move |i| self.quadrants.get_mut(i))
    }

    pub fn quadrants(&self) -> impl Iterator<Item = &Quadrant> {
        self.quadrants.iter()
    }

    pub fn current_coordinate(&self) -> Coordinate {
        self.current
    }

    /// The quadrant the ship is in. `current` is only ever set to a valid
    /// coordinate, so the slot always exists.
    pub fn current_quadrant(&self) -> &Quadrant {
        let i = Self::index(self.current).unwrap_or(0);
        &self.quadrants[i]
    }

    pub fn current_quadrant_mut(&mut self) -> &mut Quadrant {
        let i = Self::index(self.current).unwrap_or(0);
        &mut self.quadrants[i]
    }

    pub fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    // ========== Ship placement ==========

    /// Move the ship to `sector` of `quadrant`, or to the nearest vacant
    /// sector there when `sector` is taken. The destination is marked
    /// scanned. Returns the sector the ship landed on, or None (nothing
    /// changed) when the quadrant is invalid or full.
    pub fn relocate_ship(&mut self, quadrant: Coordinate, sector: Coordinate) -> Option<Coordinate> {
        let same_quadrant = quadrant == self.current;
        let target = self.quadrant(quadrant)?;
        let landing = if target.is_vacant(sector) || (same_quadrant && target.ship() == Some(sector)) {
            sector
        } else {
            nearest_vacant_sector(target, sector)?
        };

        self.current_quadrant_mut().remove_ship();
        self.current = quadrant;
        let target = self.current_quadrant_mut();
        target.place_ship(landing);
        target.scanned = true;
        Some(landing)
    }

    // ========== Statistics ==========

    /// Enemies of `kind` across the whole galaxy, from the maintained counts.
    pub fn total_of(&self, kind: EnemyKind) -> u32 {
        self.quadrants
            .iter()
            .map(|q| match kind {
                EnemyKind::Klingon => q.klingon_count(),
                EnemyKind::Commander => q.commander_count(),
                EnemyKind::SuperCommander => q.super_commander_count(),
            })
            .sum()
    }

    pub fn total_enemies(&self) -> u32 {
        self.quadrants.iter().map(|q| q.enemy_count()).sum()
    }

    pub fn total_starbases(&self) -> u32 {
        self.quadrants.iter().filter(|q| q.has_starbase()).count() as u32
    }

    pub fn total_planets(&self) -> u32 {
        self.quadrants.iter().filter(|q| q.has_planet()).count() as u32
    }
}

impl fmt::Debug for Galaxy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Galaxy")
            .field("current", &self.current)
            .field("enemies", &self.total_enemies())
            .field("starbases", &self.total_starbases())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::SectorKind;
    use crate::models::enemy::Enemy;

    #[test]
    fn new_galaxy_has_one_quadrant_per_cell() {
        let galaxy = Galaxy::new();
        assert_eq!(galaxy.quadrants().count(), 100);
        for c in Coordinate::all() {
            assert_eq!(galaxy.quadrant(c).map(|q| q.coordinate), Some(c));
        }
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let galaxy = Galaxy::new();
        assert!(galaxy.quadrant(Coordinate::new(10, 0)).is_none());
        assert!(galaxy.quadrant(Coordinate::new(0, -1)).is_none());
    }

    #[test]
    fn enemy_ids_are_unique() {
        let mut galaxy = Galaxy::new();
        let a = galaxy.allocate_enemy_id();
        let b = galaxy.allocate_enemy_id();
        assert_ne!(a, b);
    }

    #[test]
    fn relocate_ship_moves_between_quadrants() {
        let mut galaxy = Galaxy::new();
        galaxy.relocate_ship(Coordinate::new(0, 0), Coordinate::new(2, 2));
        let landed = galaxy.relocate_ship(Coordinate::new(5, 5), Coordinate::new(3, 3));

        assert_eq!(landed, Some(Coordinate::new(3, 3)));
        assert_eq!(galaxy.current_coordinate(), Coordinate::new(5, 5));
        assert!(galaxy.current_quadrant().scanned);
        let old = galaxy.quadrant(Coordinate::new(0, 0)).unwrap();
        assert_eq!(old.ship(), None);
        assert_eq!(old.kind_at(Coordinate::new(2, 2)), Some(SectorKind::Empty));
    }

    #[test]
    fn relocate_ship_sidesteps_occupied_sector() {
        let mut galaxy = Galaxy::new();
        let id = galaxy.allocate_enemy_id();
        galaxy
            .quadrant_mut(Coordinate::new(1, 1))
            .unwrap()
            .add_enemy(Enemy::new(id, EnemyKind::Klingon, Coordinate::new(4, 4), 300.0, 10.0, 5.0));

        let landed = galaxy
            .relocate_ship(Coordinate::new(1, 1), Coordinate::new(4, 4))
            .unwrap();
        assert_ne!(landed, Coordinate::new(4, 4));
        assert!(landed.is_adjacent(Coordinate::new(4, 4)));
    }

    #[test]
    fn relocate_within_quadrant_to_own_sector() {
        let mut galaxy = Galaxy::new();
        galaxy.relocate_ship(Coordinate::new(2, 2), Coordinate::new(5, 5));
        let landed = galaxy.relocate_ship(Coordinate::new(2, 2), Coordinate::new(5, 5));
        assert_eq!(landed, Some(Coordinate::new(5, 5)));
        assert_eq!(galaxy.current_quadrant().ship(), Some(Coordinate::new(5, 5)));
    }

    #[test]
    fn relocate_to_invalid_quadrant_changes_nothing() {
        let mut galaxy = Galaxy::new();
        galaxy.relocate_ship(Coordinate::new(2, 2), Coordinate::new(5, 5));
        assert!(galaxy
            .relocate_ship(Coordinate::new(12, 2), Coordinate::new(5, 5))
            .is_none());
        assert_eq!(galaxy.current_coordinate(), Coordinate::new(2, 2));
        assert_eq!(galaxy.current_quadrant().ship(), Some(Coordinate::new(5, 5)));
    }
}
