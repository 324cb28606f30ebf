//! Type-safe wrappers for navigation values

use std::fmt;

use super::coordinate::Coordinate;

/// Warp factor (1.0 to 10.0)
///
/// Energy cost grows with the cube of the factor and travel time shrinks
/// with its square. Factors above the configured safe limit risk engine
/// damage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct WarpFactor(f64);

impl WarpFactor {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 10.0;

    /// Create a new warp factor
    ///
    /// # Returns
    /// Ok(WarpFactor) if valid, Err with message if invalid
    pub fn new(value: f64) -> Result<Self, &'static str> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(WarpFactor(value))
        } else {
            Err("warp factor must be between 1 and 10")
        }
    }

    /// Get the warp factor value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for WarpFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Where a move command is headed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveTarget {
    /// Offset in quadrant units; fractions land inside a quadrant.
    Manual { dx: f64, dy: f64 },
    /// Explicit destination quadrant and sector.
    Automatic {
        quadrant: Coordinate,
        sector: Coordinate,
    },
}
