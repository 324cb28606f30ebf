//! Damage arithmetic shared by both sides of a fight
//!
//! Pure functions only; callers supply the tunables from `Settings`.

use crate::config::Settings;
use crate::models::coordinate::{quadrant_distance, Coordinate};

/// Result of one phaser shot on one defender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaserHit {
    /// Energy arriving at the target after attenuation.
    pub hit: f64,
    /// Power actually taken from the defender.
    pub drained: f64,
}

/// Attenuate `allocated` phaser energy over `distance` sectors.
/// `dust` is the fraction of energy surviving each sector of travel.
pub fn phaser_hit(
    distance: f64,
    allocated: f64,
    defender_power: f64,
    dust: f64,
    drain_factor: f64,
) -> PhaserHit {
    let hit = allocated * dust.powf(distance);
    let drained = (drain_factor * hit).min(defender_power.max(0.0));
    PhaserHit { hit, drained }
}

/// Energy that exactly drains `defender_power` at `distance` sectors.
pub fn automatic_phaser_power(distance: f64, defender_power: f64, dust: f64, drain_factor: f64) -> f64 {
    defender_power.max(0.0) / (drain_factor * dust.powf(distance))
}

/// Damage an attacker of `attacker_power` does at the defender's position.
/// Falls off linearly with quadrant-scale distance and never goes negative.
pub fn hit_value(
    attacker: Coordinate,
    defender: Coordinate,
    attacker_power: f64,
    settings: &Settings,
) -> f64 {
    let distance = quadrant_distance(attacker, defender, settings.quadrant_distance_factor);
    (attacker_power * (settings.hit_range_limit - distance)).max(0.0)
}

/// How an incoming hit splits between shields and ship energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorption {
    pub absorbed: f64,
    pub to_energy: f64,
}

/// Raised shields soak up `fraction` of the hit, limited by what they have
/// left. Lowered or damaged shields soak up nothing.
pub fn absorb(hit: f64, shields_up: bool, shield_energy: f64, fraction: f64) -> Absorption {
    let hit = hit.max(0.0);
    let absorbed = if shields_up {
        (fraction * hit).min(shield_energy.max(0.0))
    } else {
        0.0
    };
    Absorption {
        absorbed,
        to_energy: hit - absorbed,
    }
}
