use crate::models::constants::GRID_SIZE;
use crate::models::coordinate::Coordinate;
use crate::models::navigation_types::MoveTarget;

/// A point in galaxy-wide sector units: `quadrant * GRID_SIZE + sector`
/// on each axis.
pub type AbsolutePosition = (f64, f64);

pub fn absolute_position(quadrant: Coordinate, sector: Coordinate) -> AbsolutePosition {
    let n = GRID_SIZE as f64;
    (
        quadrant.x as f64 * n + sector.x as f64,
        quadrant.y as f64 * n + sector.y as f64,
    )
}

/// Round to the nearest sector and split back into quadrant and sector.
/// Positions off the edge of the galaxy are clamped to it.
pub fn split_absolute(position: AbsolutePosition) -> (Coordinate, Coordinate) {
    let last = GRID_SIZE * GRID_SIZE - 1;
    let ax = (position.0.round() as i32).clamp(0, last);
    let ay = (position.1.round() as i32).clamp(0, last);
    (
        Coordinate::new(ax / GRID_SIZE, ay / GRID_SIZE),
        Coordinate::new(ax % GRID_SIZE, ay % GRID_SIZE),
    )
}

/// Where a move command wants the ship to end up.
pub fn destination(quadrant: Coordinate, sector: Coordinate, target: MoveTarget) -> AbsolutePosition {
    match target {
        MoveTarget::Manual { dx, dy } => {
            let (x, y) = absolute_position(quadrant, sector);
            let n = GRID_SIZE as f64;
            (x + dx * n, y + dy * n)
        }
        MoveTarget::Automatic { quadrant, sector } => absolute_position(quadrant, sector),
    }
}

/// Straight-line distance in quadrants.
pub fn distance_in_quadrants(from: AbsolutePosition, to: AbsolutePosition) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt() / GRID_SIZE as f64
}

/// The point `fraction` of the way from `from` to `to`, on the same bearing.
pub fn along_bearing(from: AbsolutePosition, to: AbsolutePosition, fraction: f64) -> AbsolutePosition {
    let f = fraction.clamp(0.0, 1.0);
    (from.0 + (to.0 - from.0) * f, from.1 + (to.1 - from.1) * f)
}
