//! Domain models
//!
//! This module contains all domain models representing game entities
//! and concepts. Models are plain data plus the bookkeeping that keeps
//! their own counts consistent.

pub mod constants;
pub mod coordinate;
pub mod devices;
pub mod enemy;
pub mod errors;
pub mod future_event;
pub mod galaxy;
pub mod game_state;
pub mod motion;
pub mod navigation_types;
pub mod quadrant;
