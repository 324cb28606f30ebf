//! Library computer: galaxy chart, long-range scan, damage and status
//! reports. These gather data; `ui::presenters` formats it.

use crate::game_engine::SimContext;
use crate::models::constants::{ShipCondition, GRID_SIZE};
use crate::models::coordinate::Coordinate;
use crate::models::devices::{Device, DeviceType, Devices};
use crate::models::errors::{GameError, GameResult};
use crate::models::galaxy::Galaxy;

/// Value strings for every quadrant, one row per galaxy row.
pub fn chart(galaxy: &Galaxy) -> Vec<Vec<String>> {
    (0..GRID_SIZE)
        .map(|y| {
            (0..GRID_SIZE)
                .map(|x| {
                    galaxy
                        .quadrant(Coordinate::new(x, y))
                        .map_or_else(|| "...".to_string(), |q| q.value_string())
                })
                .collect()
        })
        .collect()
}

/// One cell of a long-range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub quadrant: Coordinate,
    pub value: String,
}

/// Scan the ship's quadrant and its in-range neighbours, marking them all
/// scanned. The ship's own quadrant comes first.
pub fn long_range_scan(ctx: &mut SimContext) -> GameResult<Vec<ScanEntry>> {
    if ctx.devices.is_damaged(DeviceType::LongRangeSensors) {
        return Err(GameError::unable("long-range sensors are damaged"));
    }
    let centre = ctx.state.current_quadrant;
    let mut targets = vec![centre];
    targets.extend(centre.adjacent_valid().into_iter().map(|(c, _)| c));

    let mut entries = Vec::with_capacity(targets.len());
    for quadrant in targets {
        if let Some(q) = ctx.galaxy.quadrant_mut(quadrant) {
            q.scanned = true;
            entries.push(ScanEntry {
                quadrant,
                value: q.value_string(),
            });
        }
    }
    Ok(entries)
}

/// The device table in declaration order.
pub fn damage_report(devices: &Devices) -> Vec<Device> {
    devices.iter().copied().collect()
}

/// Snapshot of the ship's situation for the status display.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub stardate: f64,
    pub condition: ShipCondition,
    pub quadrant: Coordinate,
    pub sector: Coordinate,
    pub energy: f64,
    pub shield_energy: f64,
    pub shields_up: bool,
    pub torpedoes: u32,
    pub warp_factor: f64,
    pub enemies_left: u32,
    pub starbases_left: u32,
    pub time_left: f64,
}

pub fn status_report(ctx: &SimContext) -> StatusReport {
    let state = &ctx.state;
    StatusReport {
        stardate: state.stardate,
        condition: state.ship_condition,
        quadrant: state.current_quadrant,
        sector: state.current_sector,
        energy: state.energy,
        shield_energy: state.shield_energy,
        shields_up: ctx.shields_up(),
        torpedoes: state.torpedo_count,
        warp_factor: state.warp_factor,
        enemies_left: state.remaining_enemies(),
        starbases_left: state.starbase_count,
        time_left: state.remaining_game_time,
    }
}
