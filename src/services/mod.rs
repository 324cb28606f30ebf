//! Game services
//!
//! Business logic for the simulation: combat, navigation, the library
//! computer, the command grammar, scheduled events and the balance engine.

pub mod combat;
pub mod commands;
pub mod computer;
pub mod events;
pub mod game;
pub mod intelligence;
pub mod navigation;
