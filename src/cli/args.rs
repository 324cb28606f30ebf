use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::models::constants::{GameType, PlayerType};

/// Real-time tactical space combat in the terminal.
#[derive(Debug, Parser)]
#[command(name = "space-tactics", version)]
pub struct Args {
    /// Seed for the random number generator (default: from the clock)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Settings file (default: ~/.space-tactics/settings.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Skill::Good)]
    pub skill: Skill,

    #[arg(long, value_enum, default_value_t = Length::Short)]
    pub length: Length,

    /// Where the save command writes the game state
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Resume from a saved game state
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Skill {
    Novice,
    Fair,
    Good,
    Expert,
    Emeritus,
}

impl From<Skill> for PlayerType {
    fn from(skill: Skill) -> Self {
        match skill {
            Skill::Novice => PlayerType::Novice,
            Skill::Fair => PlayerType::Fair,
            Skill::Good => PlayerType::Good,
            Skill::Expert => PlayerType::Expert,
            Skill::Emeritus => PlayerType::Emeritus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl From<Length> for GameType {
    fn from(length: Length) -> Self {
        match length {
            Length::Short => GameType::Short,
            Length::Medium => GameType::Medium,
            Length::Long => GameType::Long,
        }
    }
}
