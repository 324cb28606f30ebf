//! Straight-line motion for anything that travels across a quadrant
//!
//! Positions are continuous grid units (sector centres sit on integers).

use super::coordinate::Coordinate;
use super::enemy::{EnemyId, EnemyKind};

pub trait MovingEntity {
    fn position(&self) -> (f64, f64);
    fn set_position(&mut self, position: (f64, f64));
    fn destination(&self) -> (f64, f64);
    fn in_motion(&self) -> bool;
    fn set_in_motion(&mut self, moving: bool);
    /// Heading in degrees, 0 = east, 90 = north.
    fn heading(&self) -> f64;
    fn set_heading(&mut self, degrees: f64);
}

/// Turn toward the destination and advance `speed * delta` grid units.
/// Arrival snaps to the destination and stops the entity. Returns true on
/// the step that arrives.
pub fn advance_motion(entity: &mut dyn MovingEntity, speed: f64, delta: f64) -> bool {
    if !entity.in_motion() {
        return false;
    }
    let (x, y) = entity.position();
    let (tx, ty) = entity.destination();
    let dx = tx - x;
    let dy = ty - y;
    let remaining = (dx * dx + dy * dy).sqrt();

    if remaining > 0.0 {
        entity.set_heading((-dy).atan2(dx).to_degrees());
    }

    let travel = speed * delta;
    if travel >= remaining {
        entity.set_position((tx, ty));
        entity.set_in_motion(false);
        return true;
    }
    entity.set_position((x + dx / remaining * travel, y + dy / remaining * travel));
    false
}

/// An enemy torpedo in flight toward the ship. The hit value is fixed when
/// it is fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub shooter: EnemyId,
    pub shooter_kind: EnemyKind,
    pub quadrant: Coordinate,
    pub target: Coordinate,
    pub hit_value: f64,
    position: (f64, f64),
    heading: f64,
    moving: bool,
}

impl Projectile {
    pub fn new(
        shooter: EnemyId,
        shooter_kind: EnemyKind,
        quadrant: Coordinate,
        origin: Coordinate,
        target: Coordinate,
        hit_value: f64,
    ) -> Self {
        Projectile {
            shooter,
            shooter_kind,
            quadrant,
            target,
            hit_value,
            position: origin.center(),
            heading: super::coordinate::angle_to_target(origin, target),
            moving: true,
        }
    }
}

impl MovingEntity for Projectile {
    fn position(&self) -> (f64, f64) {
        self.position
    }

    fn set_position(&mut self, position: (f64, f64)) {
        self.position = position;
    }

    fn destination(&self) -> (f64, f64) {
        self.target.center()
    }

    fn in_motion(&self) -> bool {
        self.moving
    }

    fn set_in_motion(&mut self, moving: bool) {
        self.moving = moving;
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }
}
