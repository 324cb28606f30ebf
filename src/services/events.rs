//! Future event scheduler
//!
//! One pending event per kind. Each is armed at `stardate + exponential(mean)`
//! and, once the stardate reaches it, fires its handler and is re-armed
//! with a fresh sample. Checks run every `event_check_interval` seconds of
//! wall time and after commands that pass time.

use crate::config::Settings;
use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::constants::ShipCondition;
use crate::models::coordinate::Coordinate;
use crate::models::devices::DeviceType;
use crate::models::enemy::EnemyKind;
use crate::models::future_event::{FutureEvent, FutureEventType};
use crate::models::galaxy::{
    find_commander_quadrant, find_starbase_quadrant, find_vacant_sector, search_quadrants, Galaxy,
};
use crate::models::game_state::GameState;
use crate::models::quadrant::QuadrantLosses;
use crate::services::intelligence::Intelligence;

/// Smallest delay between firing and the re-armed date, in stardates.
const MIN_EVENT_DELAY: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct EventScheduler {
    events: [FutureEvent; 3],
    since_check: f64,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventScheduler {
    pub fn new() -> Self {
        EventScheduler {
            events: FutureEventType::ALL.map(FutureEvent::unscheduled),
            since_check: 0.0,
        }
    }

    fn slot(kind: FutureEventType) -> usize {
        match kind {
            FutureEventType::Supernova => 0,
            FutureEventType::CommanderAttacksBase => 1,
            FutureEventType::TractorBeam => 2,
        }
    }

    pub fn event(&self, kind: FutureEventType) -> &FutureEvent {
        &self.events[Self::slot(kind)]
    }

    pub fn event_mut(&mut self, kind: FutureEventType) -> &mut FutureEvent {
        &mut self.events[Self::slot(kind)]
    }

    /// Arm every kind at session start; kinds switched off in the settings
    /// are disabled instead.
    pub fn arm_all(
        &mut self,
        settings: &Settings,
        state: &GameState,
        galaxy: &Galaxy,
        intelligence: &mut Intelligence,
    ) {
        for kind in FutureEventType::ALL {
            if is_switched_off(kind, settings) {
                self.disable(kind);
                log::info!("{:?} disabled by settings", kind);
            } else {
                self.schedule(kind, settings, state, galaxy, intelligence);
            }
        }
    }

    /// Sample a new date for `kind`. Returns false (and leaves the event
    /// unscheduled) when the kind has nothing to act on.
    pub fn schedule(
        &mut self,
        kind: FutureEventType,
        settings: &Settings,
        state: &GameState,
        galaxy: &Galaxy,
        intelligence: &mut Intelligence,
    ) -> bool {
        let event = self.event_mut(kind);
        if !event.schedulable {
            return false;
        }
        let Some(mean) = mean_delay(kind, settings, state) else {
            event.star_date = 0.0;
            return false;
        };
        let delay = intelligence.exponential(mean).max(MIN_EVENT_DELAY);
        event.star_date = state.stardate + delay;
        if kind == FutureEventType::Supernova {
            let budget = settings.quadrant_search_count;
            event.quadrant_coordinate =
                search_quadrants(galaxy, intelligence, budget, |q| !q.has_supernova)
                    .unwrap_or_default();
        }
        log::info!("{:?} armed for stardate {:.2}", kind, event.star_date);
        true
    }

    pub fn disable(&mut self, kind: FutureEventType) {
        self.event_mut(kind).disable();
    }

    /// Allow a disabled kind to be scheduled again. It stays unscheduled
    /// until the next `schedule` call.
    pub fn enable(&mut self, kind: FutureEventType) {
        self.event_mut(kind).schedulable = true;
    }

    /// Accumulate wall time. True once per elapsed check interval.
    pub fn record_wall_time(&mut self, seconds: f64, interval: f64) -> bool {
        self.since_check += seconds;
        if self.since_check >= interval {
            self.since_check = 0.0;
            true
        } else {
            false
        }
    }
}

fn is_switched_off(kind: FutureEventType, settings: &Settings) -> bool {
    match kind {
        FutureEventType::Supernova => settings.debug_no_supernova,
        FutureEventType::CommanderAttacksBase => settings.debug_no_commander_attacks_base,
        FutureEventType::TractorBeam => settings.debug_no_tractor_beam,
    }
}

/// Mean delay in stardates, or None when the kind cannot happen.
pub fn mean_delay(kind: FutureEventType, settings: &Settings, state: &GameState) -> Option<f64> {
    let mean = match kind {
        FutureEventType::Supernova => settings.supernova_mean_factor * state.in_time,
        FutureEventType::CommanderAttacksBase => {
            settings.commander_attacks_base_mean_factor * state.in_time
        }
        FutureEventType::TractorBeam => {
            if state.remaining_commanders == 0 {
                return None;
            }
            settings.tractor_beam_mean_factor * state.remaining_game_time.max(0.0)
                / state.remaining_commanders as f64
        }
    };
    (mean > 0.0).then_some(mean)
}

/// What a fired event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Supernova {
        quadrant: Coordinate,
        losses: QuadrantLosses,
        ship_lost: bool,
    },
    TractorBeam {
        from: Coordinate,
        to: Coordinate,
    },
    BaseUnderAttack {
        quadrant: Coordinate,
    },
    /// Nothing to act on; the event was re-armed regardless.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    pub kind: FutureEventType,
    pub fired_at: f64,
    pub outcome: EventOutcome,
}

/// Fire every due event and re-arm it.
pub fn check_events(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> Vec<EventReport> {
    let mut reports = Vec::new();
    for kind in FutureEventType::ALL {
        let event = *ctx.events.event(kind);
        if !event.is_due(ctx.state.stardate) {
            continue;
        }

        let outcome = match kind {
            FutureEventType::Supernova => supernova(ctx, event.quadrant_coordinate, feedback),
            FutureEventType::CommanderAttacksBase => commander_attacks_base(ctx, feedback),
            FutureEventType::TractorBeam => tractor_beam(ctx, feedback),
        };
        log::info!(
            "{:?} fired at stardate {:.2}: {:?}",
            kind,
            ctx.state.stardate,
            outcome
        );

        ctx.events.event_mut(kind).quadrant_coordinate = Coordinate::default();
        ctx.events.schedule(
            kind,
            &ctx.settings,
            &ctx.state,
            &ctx.galaxy,
            &mut ctx.intelligence,
        );
        reports.push(EventReport {
            kind,
            fired_at: event.star_date,
            outcome,
        });
    }
    reports
}

fn supernova(ctx: &mut SimContext, target: Coordinate, feedback: &mut dyn Feedback) -> EventOutcome {
    let Some(quadrant) = ctx.galaxy.quadrant_mut(target) else {
        return EventOutcome::Skipped;
    };
    if quadrant.has_supernova {
        return EventOutcome::Skipped;
    }
    let losses = quadrant.go_supernova();

    let state = &mut ctx.state;
    state.decrement_enemy(EnemyKind::Klingon, losses.klingons);
    state.decrement_enemy(EnemyKind::Commander, losses.commanders);
    state.decrement_enemy(EnemyKind::SuperCommander, losses.super_commanders);
    if losses.starbase {
        state.decrement_starbases();
    }
    if losses.planet {
        state.decrement_planets();
    }
    ctx.projectiles.retain(|p| p.quadrant != target);

    feedback.play_sound(SoundKind::Supernova);
    let ship_lost = target == ctx.state.current_quadrant;
    if ship_lost {
        ctx.state.energy = 0.0;
        ctx.state.ship_condition = ShipCondition::Dead;
        feedback.display_message(
            &format!("SUPERNOVA IN QUADRANT {}: THE SHIP IS CAUGHT IN THE BLAST", target),
            Severity::Alert,
        );
        feedback.play_sound(SoundKind::ShipDestroyed);
    } else {
        feedback.display_message(
            &format!("Supernova reported in quadrant {}", target),
            Severity::Warning,
        );
    }

    EventOutcome::Supernova {
        quadrant: target,
        losses,
        ship_lost,
    }
}

fn tractor_beam(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> EventOutcome {
    let budget = ctx.settings.commander_search_count;
    let Some(target) = find_commander_quadrant(&ctx.galaxy, &mut ctx.intelligence, budget) else {
        return EventOutcome::Skipped;
    };
    let from = ctx.state.current_quadrant;
    if target == from {
        return EventOutcome::Skipped;
    }
    let sector_budget = ctx.settings.sector_search_count;
    let Some(sector) = ctx
        .galaxy
        .quadrant(target)
        .and_then(|q| find_vacant_sector(q, &mut ctx.intelligence, sector_budget))
    else {
        return EventOutcome::Skipped;
    };
    if ctx.move_ship(target, sector).is_none() {
        return EventOutcome::Skipped;
    }

    feedback.play_sound(SoundKind::TractorBeam);
    feedback.display_message(
        &format!("Caught in a commander's tractor beam! Pulled to quadrant {}", target),
        Severity::Alert,
    );
    EventOutcome::TractorBeam { from, to: target }
}

fn commander_attacks_base(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> EventOutcome {
    let budget = ctx.settings.starbase_search_count;
    let Some(target) = find_starbase_quadrant(&ctx.galaxy, &mut ctx.intelligence, budget) else {
        return EventOutcome::Skipped;
    };
    let Some(quadrant) = ctx.galaxy.quadrant_mut(target) else {
        return EventOutcome::Skipped;
    };
    quadrant.under_attack = true;

    if !ctx.devices.is_damaged(DeviceType::SubspaceRadio) {
        feedback.play_sound(SoundKind::SubspaceRadio);
        feedback.display_message(
            &format!("Subspace radio: starbase in quadrant {} is under attack", target),
            Severity::Warning,
        );
    }
    EventOutcome::BaseUnderAttack { quadrant: target }
}
