//! Space Tactics simulation engine
//!
//! A real-time tactical space-combat game on a 10x10 galaxy of 10x10
//! quadrants. The player's ship hunts enemy vessels before the stardate
//! budget runs out while the enemies move, fire and evade on their own
//! timers.
//!
//! # Modules
//!
//! - [`game_engine`] - Session state machine, ticks and game-over logic
//! - [`models`] - Domain models (galaxy, quadrants, enemies, devices, state)
//! - [`services`] - Game services (combat, navigation, computer, events)
//! - [`config`] - JSON-backed settings
//! - [`io`] - Message and sound sinks, input abstraction
//! - [`ui`] - Presentation of reports and combat results
//! - [`cli`] - Command-line options
//!
//! # Example
//!
//! ```rust,no_run
//! use space_tactics::models::constants::{GameType, PlayerType};
//! use space_tactics::{GameEngine, Settings};
//!
//! let engine = GameEngine::new(Settings::default(), PlayerType::Good, GameType::Short, 42);
//! ```

pub mod cli;
pub mod config;
pub mod game_engine;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use config::Settings;
pub use game_engine::{DefeatReason, GameEngine, SessionStatus, SimContext};
