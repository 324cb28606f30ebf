use crate::models::constants::PlayerType;
use crate::models::coordinate::Coordinate;
use crate::models::enemy::{Enemy, EnemyId, EnemyKind};
use crate::models::game_state::GameState;
use crate::services::intelligence::Intelligence;

use super::quadrant_ops::{find_vacant_sector, search_quadrants};
use super::Galaxy;

impl Galaxy {
    /// Lay out a new galaxy for the counts already stored in `state`:
    /// starbases, planets, then super-commanders, commanders and klingons,
    /// then the ship. A feature that finds no room is dropped and its
    /// count in `state` lowered so the totals always agree.
    pub fn generate(state: &mut GameState, intelligence: &mut Intelligence) -> Galaxy {
        let mut galaxy = Galaxy::new();
        let settings = intelligence.settings().clone();

        let mut starbases = 0;
        for _ in 0..state.starbase_count {
            if galaxy.place_feature(intelligence, settings.starbase_search_count, Feature::Starbase) {
                starbases += 1;
            }
        }
        state.starbase_count = starbases;

        let mut planets = 0;
        for _ in 0..state.planet_count {
            if galaxy.place_feature(intelligence, settings.sector_search_count, Feature::Planet) {
                planets += 1;
            }
        }
        state.planet_count = planets;

        state.remaining_super_commanders = galaxy.populate(
            intelligence,
            state.player_type,
            EnemyKind::SuperCommander,
            state.remaining_super_commanders,
        );
        state.remaining_commanders = galaxy.populate(
            intelligence,
            state.player_type,
            EnemyKind::Commander,
            state.remaining_commanders,
        );
        state.remaining_klingons = galaxy.populate(
            intelligence,
            state.player_type,
            EnemyKind::Klingon,
            state.remaining_klingons,
        );
        state.initial_enemies = state.remaining_enemies();

        let start = intelligence.random_coordinate();
        let sector = galaxy
            .quadrant(start)
            .and_then(|q| find_vacant_sector(q, intelligence, settings.sector_search_count))
            .unwrap_or_default();
        let landed = galaxy.relocate_ship(start, sector).unwrap_or(sector);
        state.current_quadrant = galaxy.current_coordinate();
        state.current_sector = landed;

        galaxy
    }

    fn place_feature(&mut self, intelligence: &mut Intelligence, budget: u32, feature: Feature) -> bool {
        let Some(c) = search_quadrants(self, intelligence, budget, |q| match feature {
            Feature::Starbase => !q.has_starbase(),
            Feature::Planet => !q.has_planet(),
        }) else {
            return false;
        };
        let Some(quadrant) = self.quadrant_mut(c) else {
            return false;
        };
        let Some(sector) = find_vacant_sector(quadrant, intelligence, budget) else {
            return false;
        };
        match feature {
            Feature::Starbase => quadrant.place_starbase(sector),
            Feature::Planet => quadrant.place_planet(sector),
        }
    }

    /// Scatter `count` enemies of one kind. Commanders and super-commanders
    /// never share a quadrant with their own kind. Returns how many were placed.
    fn populate(
        &mut self,
        intelligence: &mut Intelligence,
        player_type: PlayerType,
        kind: EnemyKind,
        count: u32,
    ) -> u32 {
        let settings = intelligence.settings().clone();
        let mut placed = 0;
        for _ in 0..count {
            let target = search_quadrants(self, intelligence, settings.quadrant_search_count, |q| {
                let crowded = q.enemy_count() >= settings.max_klingons_per_quadrant;
                let lonely = match kind {
                    EnemyKind::Klingon => true,
                    EnemyKind::Commander => q.commander_count() == 0,
                    EnemyKind::SuperCommander => q.super_commander_count() == 0,
                };
                !crowded && lonely
            });
            let spawned = target.and_then(|c| self.spawn_enemy(intelligence, player_type, kind, c));
            match spawned {
                Some(_) => placed += 1,
                None => log::warn!("no room left for a {}", kind.name()),
            }
        }
        placed
    }

    /// Create an enemy with fresh balance attributes in a random vacant
    /// sector of `quadrant`.
    pub fn spawn_enemy(
        &mut self,
        intelligence: &mut Intelligence,
        player_type: PlayerType,
        kind: EnemyKind,
        quadrant: Coordinate,
    ) -> Option<EnemyId> {
        let budget = intelligence.settings().sector_search_count;
        let sector = find_vacant_sector(self.quadrant(quadrant)?, intelligence, budget)?;
        let power = intelligence.enemy_power(kind, player_type);
        let move_interval = intelligence.move_interval(kind);
        let firing_interval = intelligence.firing_interval(kind);
        let id = self.allocate_enemy_id();
        let enemy = Enemy::new(id, kind, sector, power, move_interval, firing_interval);
        self.quadrant_mut(quadrant)?.add_enemy(enemy).then_some(id)
    }
}

#[derive(Clone, Copy)]
enum Feature {
    Starbase,
    Planet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::constants::GameType;

    fn generated(seed: u64, player: PlayerType, game: GameType) -> (Galaxy, GameState) {
        let mut intelligence = Intelligence::new(Settings::default(), seed);
        let mut state = GameState::default();
        state.initialize_new_game(player, game, &mut intelligence);
        let galaxy = Galaxy::generate(&mut state, &mut intelligence);
        (galaxy, state)
    }

    #[test]
    fn galaxy_counts_match_state() {
        for seed in 0..10 {
            let (galaxy, state) = generated(seed, PlayerType::Expert, GameType::Long);
            assert_eq!(galaxy.total_of(EnemyKind::Klingon), state.remaining_klingons);
            assert_eq!(galaxy.total_of(EnemyKind::Commander), state.remaining_commanders);
            assert_eq!(
                galaxy.total_of(EnemyKind::SuperCommander),
                state.remaining_super_commanders
            );
            assert_eq!(galaxy.total_starbases(), state.starbase_count);
            assert_eq!(galaxy.total_planets(), state.planet_count);
        }
    }

    #[test]
    fn maintained_counts_match_grid_tally() {
        let (galaxy, _) = generated(3, PlayerType::Emeritus, GameType::Long);
        for q in galaxy.quadrants() {
            assert_eq!(q.enemy_count(), q.tally_enemy_sectors());
            assert!(q.enemy_count() <= Settings::default().max_klingons_per_quadrant);
            assert!(q.commander_count() <= 1);
        }
    }

    #[test]
    fn ship_is_placed_where_state_says() {
        let (galaxy, state) = generated(21, PlayerType::Good, GameType::Short);
        assert_eq!(galaxy.current_coordinate(), state.current_quadrant);
        assert_eq!(galaxy.current_quadrant().ship(), Some(state.current_sector));
        assert!(galaxy.current_quadrant().scanned);
    }

    #[test]
    fn enemy_attributes_come_from_settings() {
        let (galaxy, _) = generated(4, PlayerType::Fair, GameType::Medium);
        let s = Settings::default();
        for q in galaxy.quadrants() {
            for e in q.enemies() {
                if e.kind == EnemyKind::Klingon {
                    let firing = s.klingon_min_firing_interval as f64
                        ..=s.klingon_max_firing_interval as f64;
                    assert!(firing.contains(&e.firing_interval));
                }
                assert!(e.is_alive());
            }
        }
    }

    #[test]
    fn same_seed_same_galaxy() {
        let (a, sa) = generated(99, PlayerType::Good, GameType::Medium);
        let (b, sb) = generated(99, PlayerType::Good, GameType::Medium);
        assert_eq!(sa, sb);
        for (qa, qb) in a.quadrants().zip(b.quadrants()) {
            assert_eq!(qa.value_string(), qb.value_string());
            assert_eq!(qa.enemies(), qb.enemies());
        }
    }
}
