use serde::{Deserialize, Serialize};

use super::constants::SectorKind;
use super::coordinate::Coordinate;

pub type EnemyId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Klingon,
    Commander,
    SuperCommander,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Klingon => "Klingon",
            EnemyKind::Commander => "Commander",
            EnemyKind::SuperCommander => "Super-Commander",
        }
    }

    pub fn sector_kind(&self) -> SectorKind {
        match self {
            EnemyKind::Klingon => SectorKind::Klingon,
            EnemyKind::Commander => SectorKind::Commander,
            EnemyKind::SuperCommander => SectorKind::SuperCommander,
        }
    }
}

/// A hostile ship inside a quadrant. Timestamps are game-clock seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub sector: Coordinate,
    pub power: f64,
    pub move_interval: f64,
    pub firing_interval: f64,
    pub last_fired: f64,
    pub last_moved: f64,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        kind: EnemyKind,
        sector: Coordinate,
        power: f64,
        move_interval: f64,
        firing_interval: f64,
    ) -> Self {
        Enemy {
            id,
            kind,
            sector,
            power,
            move_interval,
            firing_interval,
            last_fired: 0.0,
            last_moved: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.power > 0.0
    }

    pub fn ready_to_fire(&self, now: f64) -> bool {
        now - self.last_fired > self.firing_interval
    }

    pub fn ready_to_move(&self, now: f64) -> bool {
        now - self.last_moved > self.move_interval
    }
}
