use super::constants::{SectorKind, GRID_SIZE};
use super::coordinate::Coordinate;
use super::enemy::{Enemy, EnemyId, EnemyKind};

const CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// One cell of a quadrant. `occupant` is set only for enemy sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub kind: SectorKind,
    pub occupant: Option<EnemyId>,
}

impl Sector {
    const EMPTY: Sector = Sector {
        kind: SectorKind::Empty,
        occupant: None,
    };
}

/// What a supernova took out of a quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantLosses {
    pub klingons: u32,
    pub commanders: u32,
    pub super_commanders: u32,
    pub starbase: bool,
    pub planet: bool,
}

/// A 10x10 sector grid plus incrementally maintained counts.
#[derive(Debug, Clone)]
pub struct Quadrant {
    pub coordinate: Coordinate,
    sectors: [Sector; CELLS],
    enemies: Vec<Enemy>,
    klingon_count: u32,
    commander_count: u32,
    super_commander_count: u32,
    planet: Option<Coordinate>,
    starbase: Option<Coordinate>,
    ship: Option<Coordinate>,
    pub has_supernova: bool,
    pub scanned: bool,
    pub under_attack: bool,
}

impl Quadrant {
    pub fn new(coordinate: Coordinate) -> Self {
        Quadrant {
            coordinate,
            sectors: [Sector::EMPTY; CELLS],
            enemies: Vec::new(),
            klingon_count: 0,
            commander_count: 0,
            super_commander_count: 0,
            planet: None,
            starbase: None,
            ship: None,
            has_supernova: false,
            scanned: false,
            under_attack: false,
        }
    }

    fn index(c: Coordinate) -> Option<usize> {
        c.is_valid().then(|| (c.y * GRID_SIZE + c.x) as usize)
    }

    pub fn sector(&self, c: Coordinate) -> Option<&Sector> {
        Self::index(c).map(|i| &self.sectors[i])
    }

    fn set(&mut self, c: Coordinate, sector: Sector) -> bool {
        match Self::index(c) {
            Some(i) => {
                self.sectors[i] = sector;
                true
            }
            None => false,
        }
    }

    pub fn kind_at(&self, c: Coordinate) -> Option<SectorKind> {
        self.sector(c).map(|s| s.kind)
    }

    /// In range and free to be occupied.
    pub fn is_vacant(&self, c: Coordinate) -> bool {
        self.kind_at(c).is_some_and(|k| k.is_vacant())
    }

    pub fn vacant_sectors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(move |c| self.is_vacant(*c))
    }

    // ========== Occupants ==========

    pub fn ship(&self) -> Option<Coordinate> {
        self.ship
    }

    pub fn place_ship(&mut self, c: Coordinate) -> bool {
        if !self.is_vacant(c) {
            return false;
        }
        if let Some(old) = self.ship.take() {
            self.set(old, Sector::EMPTY);
        }
        self.set(
            c,
            Sector {
                kind: SectorKind::Ship,
                occupant: None,
            },
        );
        self.ship = Some(c);
        true
    }

    pub fn remove_ship(&mut self) {
        if let Some(old) = self.ship.take() {
            self.set(old, Sector::EMPTY);
        }
    }

    pub fn planet(&self) -> Option<Coordinate> {
        self.planet
    }

    pub fn place_planet(&mut self, c: Coordinate) -> bool {
        if self.planet.is_some() || !self.is_vacant(c) {
            return false;
        }
        self.set(
            c,
            Sector {
                kind: SectorKind::Planet,
                occupant: None,
            },
        );
        self.planet = Some(c);
        true
    }

    pub fn starbase(&self) -> Option<Coordinate> {
        self.starbase
    }

    pub fn place_starbase(&mut self, c: Coordinate) -> bool {
        if self.starbase.is_some() || !self.is_vacant(c) {
            return false;
        }
        self.set(
            c,
            Sector {
                kind: SectorKind::StarBase,
                occupant: None,
            },
        );
        self.starbase = Some(c);
        true
    }

    pub fn remove_starbase(&mut self) -> bool {
        match self.starbase.take() {
            Some(c) => {
                self.set(c, Sector::EMPTY);
                self.under_attack = false;
                true
            }
            None => false,
        }
    }

    pub fn mark_torpedo_miss(&mut self, c: Coordinate) {
        if self.kind_at(c) == Some(SectorKind::Empty) {
            self.set(
                c,
                Sector {
                    kind: SectorKind::TorpedoMiss,
                    occupant: None,
                },
            );
        }
    }

    // ========== Enemies ==========

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn add_enemy(&mut self, enemy: Enemy) -> bool {
        if !self.is_vacant(enemy.sector) {
            return false;
        }
        self.set(
            enemy.sector,
            Sector {
                kind: enemy.kind.sector_kind(),
                occupant: Some(enemy.id),
            },
        );
        match enemy.kind {
            EnemyKind::Klingon => self.klingon_count += 1,
            EnemyKind::Commander => self.commander_count += 1,
            EnemyKind::SuperCommander => self.super_commander_count += 1,
        }
        self.enemies.push(enemy);
        true
    }

    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        let enemy = self.enemies.remove(index);
        self.set(enemy.sector, Sector::EMPTY);
        match enemy.kind {
            EnemyKind::Klingon => self.klingon_count = self.klingon_count.saturating_sub(1),
            EnemyKind::Commander => self.commander_count = self.commander_count.saturating_sub(1),
            EnemyKind::SuperCommander => {
                self.super_commander_count = self.super_commander_count.saturating_sub(1)
            }
        }
        Some(enemy)
    }

    /// Relocate an enemy to a vacant sector. The old sector is cleared.
    pub fn move_enemy(&mut self, id: EnemyId, to: Coordinate) -> bool {
        if !self.is_vacant(to) {
            return false;
        }
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let from = enemy.sector;
        enemy.sector = to;
        let sector = Sector {
            kind: enemy.kind.sector_kind(),
            occupant: Some(id),
        };
        self.set(from, Sector::EMPTY);
        self.set(to, sector);
        true
    }

    pub fn klingon_count(&self) -> u32 {
        self.klingon_count
    }

    pub fn commander_count(&self) -> u32 {
        self.commander_count
    }

    pub fn super_commander_count(&self) -> u32 {
        self.super_commander_count
    }

    pub fn enemy_count(&self) -> u32 {
        self.klingon_count + self.commander_count + self.super_commander_count
    }

    pub fn has_planet(&self) -> bool {
        self.planet.is_some()
    }

    pub fn has_starbase(&self) -> bool {
        self.starbase.is_some()
    }

    /// Three-character chart entry: enemies, starbase, planet.
    pub fn value_string(&self) -> String {
        if self.has_supernova {
            return "***".to_string();
        }
        if !self.scanned {
            return "...".to_string();
        }
        format!(
            "{}{}{}",
            self.enemy_count().min(9),
            u32::from(self.has_starbase()),
            u32::from(self.has_planet())
        )
    }

    /// Wipe out every enemy, the starbase and the planet.
    pub fn go_supernova(&mut self) -> QuadrantLosses {
        let losses = QuadrantLosses {
            klingons: self.klingon_count,
            commanders: self.commander_count,
            super_commanders: self.super_commander_count,
            starbase: self.starbase.is_some(),
            planet: self.planet.is_some(),
        };
        let ids: Vec<EnemyId> = self.enemies.iter().map(|e| e.id).collect();
        for id in ids {
            self.remove_enemy(id);
        }
        self.remove_starbase();
        if let Some(p) = self.planet.take() {
            self.set(p, Sector::EMPTY);
        }
        self.has_supernova = true;
        losses
    }

    /// Count enemy sectors by scanning the grid. Statistics only; the
    /// maintained counts are authoritative.
    pub fn tally_enemy_sectors(&self) -> u32 {
        self.sectors
            .iter()
            .filter(|s| {
                matches!(
                    s.kind,
                    SectorKind::Klingon | SectorKind::Commander | SectorKind::SuperCommander
                )
            })
            .count() as u32
    }

    /// Render a row of the sector grid. y is 0-based.
    pub fn render_row(&self, y: i32) -> String {
        (0..GRID_SIZE)
            .map(|x| {
                self.kind_at(Coordinate { x, y })
                    .unwrap_or(SectorKind::Empty)
                    .symbol()
            })
            .collect()
    }
}
