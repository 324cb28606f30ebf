use serde::{Deserialize, Serialize};

/// Width and height of both the galaxy grid and every quadrant's sector grid.
pub const GRID_SIZE: i32 = 10;

pub const INITIAL_ENERGY: f64 = 5000.0;
pub const INITIAL_SHIELD_ENERGY: f64 = 2500.0;
pub const INITIAL_TORPEDOES: u32 = 10;

/// Stardates of game time per unit of game length.
pub const STARDATES_PER_LENGTH_UNIT: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorKind {
    Empty,
    Ship,
    Klingon,
    Commander,
    SuperCommander,
    Planet,
    StarBase,
    TorpedoMiss,
}

impl SectorKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            SectorKind::Empty => " . ",
            SectorKind::Ship => "<E>",
            SectorKind::Klingon => " K ",
            SectorKind::Commander => " C ",
            SectorKind::SuperCommander => " S ",
            SectorKind::Planet => " P ",
            SectorKind::StarBase => ">B<",
            SectorKind::TorpedoMiss => " x ",
        }
    }

    /// A torpedo-miss marker does not block placement.
    pub fn is_vacant(&self) -> bool {
        matches!(self, SectorKind::Empty | SectorKind::TorpedoMiss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipCondition {
    Green,
    Yellow,
    Red,
    Docked,
    Dead,
}

impl ShipCondition {
    pub fn label(&self) -> &'static str {
        match self {
            ShipCondition::Green => "GREEN",
            ShipCondition::Yellow => "YELLOW",
            ShipCondition::Red => "RED",
            ShipCondition::Docked => "DOCKED",
            ShipCondition::Dead => "DEAD",
        }
    }
}

/// Skill tier. The numeric value feeds every balance formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    Novice,
    Fair,
    Good,
    Expert,
    Emeritus,
}

impl PlayerType {
    pub fn skill(&self) -> u32 {
        match self {
            PlayerType::Novice => 1,
            PlayerType::Fair => 2,
            PlayerType::Good => 3,
            PlayerType::Expert => 4,
            PlayerType::Emeritus => 5,
        }
    }

    /// Super-commanders only appear above the two lowest tiers.
    pub fn has_super_commanders(&self) -> bool {
        self.skill() > 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    Short,
    Medium,
    Long,
}

impl GameType {
    pub fn length(&self) -> u32 {
        match self {
            GameType::Short => 1,
            GameType::Medium => 2,
            GameType::Long => 4,
        }
    }
}
