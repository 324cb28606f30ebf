//! Navigation system
//!
//! Handles warp travel across the galaxy, engine overload, docking and
//! resting in place.

mod course;
mod damage;
mod movement;

pub use course::{absolute_position, split_absolute, AbsolutePosition};
pub use damage::overload_probability;
pub use movement::{dock, rest, set_warp_factor, travel, warp_energy, warp_time};
