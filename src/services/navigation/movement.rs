use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::devices::{DeviceStatus, DeviceType};
use crate::models::errors::{GameError, GameResult};
use crate::models::navigation_types::{MoveTarget, WarpFactor};

use super::course::{
    along_bearing, absolute_position, destination, distance_in_quadrants, split_absolute, AbsolutePosition,
};
use super::damage::{blow_engines, roll_overload};

/// Energy a warp trip costs. Raised shields double the draw.
pub fn warp_energy(distance: f64, warp: f64, shields_up: bool) -> f64 {
    let shield_factor = if shields_up { 2.0 } else { 1.0 };
    (distance + 0.05) * warp.powi(3) * shield_factor
}

/// Stardates a warp trip takes.
pub fn warp_time(distance: f64, warp: f64) -> f64 {
    10.0 * distance / (warp * warp)
}

/// Set the warp factor for subsequent moves.
pub fn set_warp_factor(ctx: &mut SimContext, value: f64, feedback: &mut dyn Feedback) -> GameResult<()> {
    let warp = WarpFactor::new(value).map_err(|reason| GameError::invalid_value("warp", reason))?;
    ctx.state.warp_factor = warp.value();
    if warp.value() > ctx.settings.max_safe_warp_factor {
        feedback.display_message(
            &format!(
                "Warp factor {} set; engineering warns the engines may not hold above warp {}",
                warp, ctx.settings.max_safe_warp_factor
            ),
            Severity::Warning,
        );
    } else {
        feedback.display_message(&format!("Warp factor {} set", warp), Severity::Info);
    }
    Ok(())
}

/// Engages warp engines to move the ship.
///
/// The trip runs along a straight line from the ship to the target at the
/// current warp factor. Damaged engines cap the factor. Running the engines
/// past the safe limit risks a blow-out that damages them and ends the
/// trip part way along the same bearing, short of any supernova remnant.
/// A manual course running off the galaxy stops at its edge and is costed
/// only for the distance actually flown.
///
/// # Returns
///
/// Stardates the trip took.
///
/// # Errors
///
/// `InvalidCommandValue` for an off-grid target. `UnableToComply` when the
/// target is the ship's own position or a supernova quadrant, the ship
/// lacks the energy, or the trip would outlast the remaining game time.
/// Nothing changes in those cases.
pub fn travel(ctx: &mut SimContext, target: MoveTarget, feedback: &mut dyn Feedback) -> GameResult<f64> {
    if let MoveTarget::Automatic { quadrant, sector } = target {
        if !quadrant.is_valid() || !sector.is_valid() {
            return Err(GameError::invalid_value("move", "coordinates must be between 0 and 9"));
        }
    }

    // Phase 1: Plot
    let from = absolute_position(ctx.state.current_quadrant, ctx.state.current_sector);
    let (to_quadrant, to_sector) =
        split_absolute(destination(ctx.state.current_quadrant, ctx.state.current_sector, target));
    let to = absolute_position(to_quadrant, to_sector);
    let planned = distance_in_quadrants(from, to);
    if planned <= 0.0 {
        return Err(GameError::unable("the ship is already there"));
    }
    if ctx
        .galaxy
        .quadrant(to_quadrant)
        .is_some_and(|q| q.has_supernova)
    {
        return Err(GameError::unable(format!("quadrant {} is a supernova remnant", to_quadrant)));
    }

    let mut warp = ctx.state.warp_factor;
    if ctx.devices.is_damaged(DeviceType::WarpEngines) {
        warp = warp.min(ctx.settings.damaged_warp_factor);
    }

    // Phase 2: Costs
    let shields_up = ctx.shields_up();
    let energy = warp_energy(planned, warp, shields_up);
    if energy > ctx.state.energy {
        return Err(GameError::unable(format!(
            "insufficient energy for warp {:.1} ({:.0} required, {:.0} available)",
            warp, energy, ctx.state.energy
        )));
    }
    let time = warp_time(planned, warp);
    if time >= ctx.state.remaining_game_time {
        return Err(GameError::unable(format!(
            "the trip would take {:.2} stardates; only {:.2} remain",
            time, ctx.state.remaining_game_time
        )));
    }

    // Phase 3: Engine stress
    let blow_out = roll_overload(ctx, warp, planned);
    let (landing, distance, effective_warp) = match blow_out {
        Some(fraction) => {
            let fraction = short_of_remnants(ctx, from, to, planned, fraction);
            (
                along_bearing(from, to, fraction),
                planned * fraction,
                warp.min(ctx.settings.damaged_warp_factor),
            )
        }
        None => (to, planned, warp),
    };

    // Phase 4: Move
    let (quadrant, sector) = split_absolute(landing);
    let Some(landed) = ctx.move_ship(quadrant, sector) else {
        return Err(GameError::unable(format!("no room in quadrant {}", quadrant)));
    };
    if let Some(fraction) = blow_out {
        blow_engines(ctx, warp, fraction, feedback);
    }
    ctx.state.subtract_energy(warp_energy(distance, warp, shields_up));
    feedback.play_sound(SoundKind::Warp);

    // Phase 5: Time
    let elapsed = warp_time(distance, effective_warp);
    let restored = ctx.advance_time(elapsed);
    for device in restored {
        feedback.display_message(&format!("{} repaired", device.name()), Severity::Info);
    }
    ctx.state.ship_condition = ctx.evaluate_condition();
    feedback.display_message(
        &format!("Arrived at quadrant {} sector {}", quadrant, landed),
        Severity::Info,
    );
    Ok(elapsed)
}

/// Back off along the bearing, a sector at a time, until the point
/// `fraction` of the way to `to` lies outside every supernova remnant.
/// The starting quadrant is always clear.
fn short_of_remnants(
    ctx: &SimContext,
    from: AbsolutePosition,
    to: AbsolutePosition,
    planned: f64,
    fraction: f64,
) -> f64 {
    let step = 1.0 / (planned * 10.0).ceil().max(1.0);
    let mut fraction = fraction;
    while fraction > 0.0 {
        let (quadrant, _) = split_absolute(along_bearing(from, to, fraction));
        if !ctx.galaxy.quadrant(quadrant).is_some_and(|q| q.has_supernova) {
            return fraction;
        }
        fraction -= step;
    }
    0.0
}

/// Dock at a starbase in an adjacent sector.
pub fn dock(ctx: &mut SimContext, feedback: &mut dyn Feedback) -> GameResult<()> {
    if ctx.state.is_docked() {
        feedback.display_message("Already docked", Severity::Info);
        return Ok(());
    }
    let ship = ctx.state.current_sector;
    let adjacent = ctx
        .galaxy
        .current_quadrant()
        .starbase()
        .is_some_and(|base| base.is_adjacent(ship));
    if !adjacent {
        return Err(GameError::unable("no starbase adjacent to the ship"));
    }

    ctx.state.dock();
    if ctx.devices.status(DeviceType::Shields) == DeviceStatus::Up {
        ctx.devices.set_status(DeviceType::Shields, DeviceStatus::Down);
    }
    ctx.projectiles.clear();
    feedback.play_sound(SoundKind::Docked);
    feedback.display_message("Docked; supplies replenished, shields lowered", Severity::Info);
    Ok(())
}

/// Let `stardates` pass in place while damage control works.
pub fn rest(ctx: &mut SimContext, stardates: f64, feedback: &mut dyn Feedback) -> GameResult<f64> {
    if stardates <= 0.0 {
        return Err(GameError::invalid_value("rest", "interval must be positive"));
    }
    if stardates > ctx.state.remaining_game_time {
        return Err(GameError::unable(format!(
            "only {:.2} stardates remain",
            ctx.state.remaining_game_time
        )));
    }
    let restored = ctx.advance_time(stardates);
    for device in restored {
        feedback.display_message(&format!("{} repaired", device.name()), Severity::Info);
    }
    Ok(stardates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::io::test_utils::MockSink;
    use crate::models::constants::{GameType, PlayerType, ShipCondition, INITIAL_ENERGY};
    use crate::models::coordinate::Coordinate;
    use crate::models::enemy::{Enemy, EnemyKind};
    use crate::models::galaxy::Galaxy;
    use crate::services::intelligence::{Intelligence, ScriptedUniform};

    /// Empty galaxy, ship at quadrant (2,2) sector (5,5), plenty of time.
    fn place_ship_for_test() -> SimContext {
        let mut ctx = SimContext::new(Settings::default(), PlayerType::Good, GameType::Long, 42);
        ctx.galaxy = Galaxy::new();
        ctx.move_ship(Coordinate::new(2, 2), Coordinate::new(5, 5));
        ctx.state.remaining_game_time = 20.0;
        ctx.state.in_time = 20.0;
        ctx.state.starting_stardate = ctx.state.stardate;
        ctx
    }

    #[test]
    fn energy_and_time_formulas() {
        assert!((warp_energy(1.0, 5.0, false) - 131.25).abs() < 1e-9);
        assert!((warp_energy(1.0, 5.0, true) - 262.5).abs() < 1e-9);
        assert!((warp_time(2.0, 5.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn automatic_move_reaches_target() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 5.0;
        let mut sink = MockSink::new();

        let target = MoveTarget::Automatic {
            quadrant: Coordinate::new(4, 2),
            sector: Coordinate::new(5, 5),
        };
        let elapsed = travel(&mut ctx, target, &mut sink).unwrap();

        assert_eq!(ctx.state.current_quadrant, Coordinate::new(4, 2));
        assert_eq!(ctx.state.current_sector, Coordinate::new(5, 5));
        assert_eq!(ctx.galaxy.current_coordinate(), Coordinate::new(4, 2));
        assert!((elapsed - 0.8).abs() < 1e-9);
        assert!((ctx.state.energy - (INITIAL_ENERGY - 2.05 * 125.0 * 2.0)).abs() < 1e-9);
        assert!(sink.heard(SoundKind::Warp));
    }

    #[test]
    fn manual_move_within_quadrant() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 2.0;
        travel(&mut ctx, MoveTarget::Manual { dx: 0.3, dy: 0.0 }, &mut MockSink::new()).unwrap();
        assert_eq!(ctx.state.current_quadrant, Coordinate::new(2, 2));
        assert_eq!(ctx.state.current_sector, Coordinate::new(8, 5));
    }

    #[test]
    fn manual_move_clamps_at_galaxy_edge() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 4.0;
        let elapsed =
            travel(&mut ctx, MoveTarget::Manual { dx: -5.0, dy: 0.0 }, &mut MockSink::new()).unwrap();
        assert_eq!(ctx.state.current_quadrant, Coordinate::new(0, 2));
        assert_eq!(ctx.state.current_sector, Coordinate::new(0, 5));
        // Only the 2.5 quadrants to the edge are flown and paid for.
        assert!((elapsed - 1.5625).abs() < 1e-9);
        assert!((ctx.state.energy - (INITIAL_ENERGY - 326.4)).abs() < 1e-9);
    }

    #[test]
    fn edge_clamped_trip_fits_the_remaining_time() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 4.0;
        // Unclamped, this trip would take 3.125 stardates.
        ctx.state.remaining_game_time = 2.0;
        travel(&mut ctx, MoveTarget::Manual { dx: -5.0, dy: 0.0 }, &mut MockSink::new()).unwrap();
        assert_eq!(ctx.state.current_quadrant, Coordinate::new(0, 2));
    }

    #[test]
    fn insufficient_energy_refuses() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 10.0;
        ctx.state.energy = 100.0;
        let target = MoveTarget::Manual { dx: 3.0, dy: 3.0 };
        let err = travel(&mut ctx, target, &mut MockSink::new()).unwrap_err();
        assert!(matches!(err, GameError::UnableToComply(_)));
        assert_eq!(ctx.state.current_quadrant, Coordinate::new(2, 2));
        assert_eq!(ctx.state.energy, 100.0);
    }

    #[test]
    fn trip_longer_than_remaining_time_refuses() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 1.0;
        ctx.state.remaining_game_time = 5.0;
        let target = MoveTarget::Manual { dx: 1.0, dy: 0.0 };
        assert!(travel(&mut ctx, target, &mut MockSink::new()).is_err());
    }

    #[test]
    fn engine_blowout_truncates_trip_on_bearing() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 8.0;
        // chance roll, completed fraction, damage duration
        ctx.intelligence = Intelligence::with_source(
            ctx.settings.clone(),
            Box::new(ScriptedUniform::new(vec![0.0, 0.5, 0.5])),
        );
        let mut sink = MockSink::new();

        let target = MoveTarget::Automatic {
            quadrant: Coordinate::new(6, 2),
            sector: Coordinate::new(5, 5),
        };
        travel(&mut ctx, target, &mut sink).unwrap();

        assert_eq!(ctx.state.current_quadrant, Coordinate::new(4, 2));
        assert_eq!(ctx.state.current_sector, Coordinate::new(5, 5));
        assert!(ctx.devices.is_damaged(DeviceType::WarpEngines));
        assert!(sink.heard(SoundKind::EngineDamaged));
    }

    #[test]
    fn blowout_stops_short_of_a_supernova_remnant() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 8.0;
        ctx.galaxy.quadrant_mut(Coordinate::new(4, 2)).unwrap().has_supernova = true;
        ctx.intelligence = Intelligence::with_source(
            ctx.settings.clone(),
            Box::new(ScriptedUniform::new(vec![0.0, 0.5, 0.5])),
        );

        let target = MoveTarget::Automatic {
            quadrant: Coordinate::new(6, 2),
            sector: Coordinate::new(5, 5),
        };
        travel(&mut ctx, target, &mut MockSink::new()).unwrap();

        assert_eq!(ctx.state.current_quadrant, Coordinate::new(3, 2));
        assert_eq!(ctx.state.current_sector, Coordinate::new(9, 5));
        assert!(!ctx.galaxy.current_quadrant().has_supernova);
        assert_ne!(ctx.evaluate_condition(), ShipCondition::Dead);
    }

    #[test]
    fn blowout_into_a_full_quadrant_leaves_engines_intact() {
        let mut ctx = place_ship_for_test();
        ctx.state.warp_factor = 8.0;
        for sector in Coordinate::all() {
            let id = ctx.galaxy.allocate_enemy_id();
            ctx.galaxy
                .quadrant_mut(Coordinate::new(4, 2))
                .unwrap()
                .add_enemy(Enemy::new(id, EnemyKind::Klingon, sector, 100.0, 10.0, 5.0));
        }
        ctx.intelligence = Intelligence::with_source(
            ctx.settings.clone(),
            Box::new(ScriptedUniform::new(vec![0.0, 0.99, 0.5])),
        );
        let energy = ctx.state.energy;
        let mut sink = MockSink::new();

        let target = MoveTarget::Automatic {
            quadrant: Coordinate::new(4, 2),
            sector: Coordinate::new(5, 5),
        };
        let err = travel(&mut ctx, target, &mut sink).unwrap_err();

        assert!(matches!(err, GameError::UnableToComply(_)));
        assert!(!ctx.devices.is_damaged(DeviceType::WarpEngines));
        assert!(!sink.heard(SoundKind::EngineDamaged));
        assert_eq!(ctx.state.energy, energy);
        assert_eq!(ctx.state.current_quadrant, Coordinate::new(2, 2));
    }

    #[test]
    fn invalid_warp_factor_is_a_value_error() {
        let mut ctx = place_ship_for_test();
        let err = set_warp_factor(&mut ctx, 11.0, &mut MockSink::new()).unwrap_err();
        assert!(err.is_input_error());
        set_warp_factor(&mut ctx, 7.0, &mut MockSink::new()).unwrap();
        assert_eq!(ctx.state.warp_factor, 7.0);
    }

    #[test]
    fn docking_needs_an_adjacent_base() {
        let mut ctx = place_ship_for_test();
        ctx.galaxy
            .current_quadrant_mut()
            .place_starbase(Coordinate::new(8, 8));
        let err = dock(&mut ctx, &mut MockSink::new()).unwrap_err();
        assert!(matches!(err, GameError::UnableToComply(_)));

        ctx.move_ship(Coordinate::new(2, 2), Coordinate::new(7, 7));
        ctx.state.energy = 10.0;
        let mut sink = MockSink::new();
        dock(&mut ctx, &mut sink).unwrap();
        assert_eq!(ctx.state.ship_condition, ShipCondition::Docked);
        assert_eq!(ctx.state.energy, INITIAL_ENERGY);
        assert!(!ctx.shields_up());
        assert!(sink.heard(SoundKind::Docked));
    }

    #[test]
    fn moving_away_undocks() {
        let mut ctx = place_ship_for_test();
        ctx.galaxy
            .current_quadrant_mut()
            .place_starbase(Coordinate::new(5, 6));
        dock(&mut ctx, &mut MockSink::new()).unwrap();
        travel(&mut ctx, MoveTarget::Manual { dx: 0.0, dy: -0.3 }, &mut MockSink::new()).unwrap();
        assert!(!ctx.state.is_docked());
    }

    #[test]
    fn rest_passes_time_and_repairs() {
        let mut ctx = place_ship_for_test();
        ctx.devices.damage(DeviceType::Computer, 0.5);
        let before = ctx.state.stardate;
        let mut sink = MockSink::new();

        rest(&mut ctx, 1.0, &mut sink).unwrap();

        assert!((ctx.state.stardate - before - 1.0).abs() < 1e-9);
        assert!(!ctx.devices.is_damaged(DeviceType::Computer));
        assert!(sink.said("Computer repaired"));
    }

    #[test]
    fn rest_beyond_remaining_time_refuses() {
        let mut ctx = place_ship_for_test();
        ctx.state.remaining_game_time = 0.5;
        assert!(rest(&mut ctx, 1.0, &mut MockSink::new()).is_err());
    }
}
