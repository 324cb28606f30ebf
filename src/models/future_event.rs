use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FutureEventType {
    Supernova,
    CommanderAttacksBase,
    TractorBeam,
}

impl FutureEventType {
    pub const ALL: [FutureEventType; 3] = [
        FutureEventType::Supernova,
        FutureEventType::CommanderAttacksBase,
        FutureEventType::TractorBeam,
    ];
}

/// One pending strategic event. `star_date == 0` or `!schedulable` means not armed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureEvent {
    pub event_type: FutureEventType,
    pub star_date: f64,
    pub quadrant_coordinate: Coordinate,
    pub schedulable: bool,
}

impl FutureEvent {
    pub fn unscheduled(event_type: FutureEventType) -> Self {
        FutureEvent {
            event_type,
            star_date: 0.0,
            quadrant_coordinate: Coordinate::default(),
            schedulable: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.schedulable && self.star_date > 0.0
    }

    pub fn is_due(&self, stardate: f64) -> bool {
        self.is_armed() && stardate >= self.star_date
    }

    /// Disabled events forget their date and target.
    pub fn disable(&mut self) {
        self.schedulable = false;
        self.star_date = 0.0;
        self.quadrant_coordinate = Coordinate::default();
    }
}
