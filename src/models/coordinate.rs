//! Grid coordinates and compass arithmetic
//!
//! The same `Coordinate` addresses a quadrant within the galaxy and a sector
//! within a quadrant. (0,0) is upper-left; x grows to the right and y grows
//! downward. A coordinate may hold out-of-range values: stepping never clamps,
//! callers check `is_valid` before touching a grid.

use serde::{Deserialize, Serialize};

use super::constants::GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset. North is toward row 0.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// True iff both axes are within `[0, GRID_SIZE - 1]`.
    pub fn is_valid(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Offset by one unit in `direction`. The result is not validated.
    pub fn step(&self, direction: Direction) -> Coordinate {
        let (dx, dy) = direction.delta();
        Coordinate {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// All in-range neighbours: 3 at a corner, 5 on an edge, 8 inside.
    pub fn adjacent_valid(&self) -> Vec<(Coordinate, Direction)> {
        Direction::ALL
            .iter()
            .map(|d| (self.step(*d), *d))
            .filter(|(c, _)| c.is_valid())
            .collect()
    }

    pub fn is_adjacent(&self, other: Coordinate) -> bool {
        *self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Row-major iteration over every valid coordinate.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Coordinate { x, y }))
    }

    /// Position of this cell's centre in continuous grid units.
    pub fn center(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Euclidean distance in sector units.
pub fn sector_distance(from: Coordinate, to: Coordinate) -> f64 {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Sector distance rescaled to quadrant units by `factor` (1 / grid size).
pub fn quadrant_distance(from: Coordinate, to: Coordinate, factor: f64) -> f64 {
    factor * sector_distance(from, to)
}

/// Bearing from `from` to `to` in degrees, `[0, 360)`. 0 is east, 90 is north.
pub fn angle_to_target(from: Coordinate, to: Coordinate) -> f64 {
    let dx = (to.x - from.x) as f64;
    let dy = -((to.y - from.y) as f64);
    let degrees = dy.atan2(dx).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Pixel layout of the quadrant view. Screen y grows upward from the
/// bottom of the window; sector row 0 sits just under `grid_top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub sector_width: f64,
    pub sector_height: f64,
    pub grid_left: f64,
    pub grid_top: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        GridMetrics {
            sector_width: 64.0,
            sector_height: 64.0,
            grid_left: 0.0,
            grid_top: 880.0,
        }
    }
}

impl GridMetrics {
    /// Sector under a screen point. May be out of range for points outside the grid.
    pub fn to_sector(&self, px: f64, py: f64) -> Coordinate {
        Coordinate {
            x: ((px - self.grid_left) / self.sector_width).floor() as i32,
            y: ((self.grid_top - py) / self.sector_height).floor() as i32,
        }
    }

    /// Screen point at the centre of a sector.
    pub fn to_screen(&self, sector: Coordinate) -> (f64, f64) {
        (
            self.grid_left + (sector.x as f64 + 0.5) * self.sector_width,
            self.grid_top - (sector.y as f64 + 0.5) * self.sector_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_covers_whole_grid() {
        for c in Coordinate::all() {
            assert!(c.is_valid(), "{} should be valid", c);
        }
        assert!(!Coordinate::new(-1, 0).is_valid());
        assert!(!Coordinate::new(0, 10).is_valid());
        assert!(!Coordinate::new(10, 10).is_valid());
    }

    #[test]
    fn step_is_not_clamped() {
        let c = Coordinate::new(0, 0).step(Direction::NorthWest);
        assert_eq!(c, Coordinate::new(-1, -1));
        assert!(!c.is_valid());
    }

    #[test]
    fn every_direction_round_trips() {
        let c = Coordinate::new(5, 5);
        for d in Direction::ALL {
            assert_eq!(c.step(d).step(d.opposite()), c);
        }
    }

    #[test]
    fn adjacency_counts_by_position() {
        assert_eq!(Coordinate::new(0, 0).adjacent_valid().len(), 3);
        assert_eq!(Coordinate::new(9, 9).adjacent_valid().len(), 3);
        assert_eq!(Coordinate::new(0, 4).adjacent_valid().len(), 5);
        assert_eq!(Coordinate::new(4, 9).adjacent_valid().len(), 5);
        assert_eq!(Coordinate::new(4, 4).adjacent_valid().len(), 8);
    }

    #[test]
    fn quadrant_distance_diagonal_and_perpendicular() {
        let diagonal = quadrant_distance(Coordinate::new(0, 0), Coordinate::new(9, 9), 0.1);
        assert!(diagonal >= 1.2, "diagonal distance {}", diagonal);

        let row = quadrant_distance(Coordinate::new(0, 3), Coordinate::new(9, 3), 0.1);
        assert!((row - 0.9).abs() < 1e-9);

        let a = Coordinate::new(2, 7);
        let b = Coordinate::new(8, 1);
        assert_eq!(quadrant_distance(a, b, 0.1), quadrant_distance(b, a, 0.1));
    }

    #[test]
    fn angle_points_east_and_north() {
        let origin = Coordinate::new(5, 5);
        assert!((angle_to_target(origin, Coordinate::new(8, 5)) - 0.0).abs() < 1e-9);
        assert!((angle_to_target(origin, Coordinate::new(5, 2)) - 90.0).abs() < 1e-9);
        assert!((angle_to_target(origin, Coordinate::new(2, 5)) - 180.0).abs() < 1e-9);
        assert!((angle_to_target(origin, Coordinate::new(5, 8)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn screen_point_maps_to_sector() {
        let metrics = GridMetrics::default();
        assert_eq!(metrics.to_sector(163.0, 775.0), Coordinate::new(2, 1));
    }

    #[test]
    fn sector_centre_maps_back_to_sector() {
        let metrics = GridMetrics::default();
        for c in Coordinate::all() {
            let (px, py) = metrics.to_screen(c);
            assert_eq!(metrics.to_sector(px, py), c);
        }
    }
}
