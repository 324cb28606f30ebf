//! Line-of-sight blocking inside a quadrant
//!
//! Every occupied sector is treated as a circle centred on the sector; a
//! shot is blocked when its segment passes through one.

use crate::models::constants::SectorKind;
use crate::models::coordinate::Coordinate;
use crate::models::enemy::EnemyId;
use crate::models::quadrant::Quadrant;

/// Radius of an obstacle's bounding circle, in sector units.
pub const OBSTACLE_RADIUS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: SectorKind,
    pub sector: Coordinate,
    pub enemy: Option<EnemyId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sight {
    Clear,
    Blocked(Obstacle),
}

impl Sight {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Sight::Blocked(_))
    }
}

/// Planet, starbase and every enemy except those in `exclude`.
pub fn quadrant_obstacles(quadrant: &Quadrant, exclude: &[EnemyId]) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    if let Some(sector) = quadrant.planet() {
        obstacles.push(Obstacle {
            kind: SectorKind::Planet,
            sector,
            enemy: None,
        });
    }
    if let Some(sector) = quadrant.starbase() {
        obstacles.push(Obstacle {
            kind: SectorKind::StarBase,
            sector,
            enemy: None,
        });
    }
    obstacles.extend(
        quadrant
            .enemies()
            .iter()
            .filter(|e| !exclude.contains(&e.id))
            .map(|e| Obstacle {
                kind: e.kind.sector_kind(),
                sector: e.sector,
                enemy: Some(e.id),
            }),
    );
    obstacles
}

/// First obstacle (closest to `start`) whose circle the segment crosses.
/// Obstacles sitting on either endpoint are ignored.
pub fn has_line_of_sight(start: Coordinate, end: Coordinate, obstacles: &[Obstacle]) -> Sight {
    let (sx, sy) = start.center();
    let (ex, ey) = end.center();
    let (dx, dy) = (ex - sx, ey - sy);
    let length_sq = dx * dx + dy * dy;

    let mut nearest: Option<(f64, Obstacle)> = None;
    for obstacle in obstacles {
        if obstacle.sector == start || obstacle.sector == end {
            continue;
        }
        let (ox, oy) = obstacle.sector.center();
        let t = if length_sq == 0.0 {
            0.0
        } else {
            (((ox - sx) * dx + (oy - sy) * dy) / length_sq).clamp(0.0, 1.0)
        };
        let (px, py) = (sx + t * dx, sy + t * dy);
        let miss_sq = (ox - px).powi(2) + (oy - py).powi(2);
        if miss_sq < OBSTACLE_RADIUS * OBSTACLE_RADIUS
            && nearest.map_or(true, |(best, _)| t < best)
        {
            nearest = Some((t, *obstacle));
        }
    }

    match nearest {
        Some((_, obstacle)) => Sight::Blocked(obstacle),
        None => Sight::Clear,
    }
}
