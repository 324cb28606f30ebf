use proptest::prelude::*;
use space_tactics::models::constants::{GameType, PlayerType};
use space_tactics::models::coordinate::{sector_distance, Coordinate, Direction};
use space_tactics::models::enemy::EnemyKind;
use space_tactics::models::future_event::FutureEventType;
use space_tactics::services::combat::formulas::{absorb, automatic_phaser_power, phaser_hit};
use space_tactics::services::commands;
use space_tactics::services::events::check_events;
use space_tactics::services::navigation::{absolute_position, split_absolute, warp_energy, warp_time};
use space_tactics::{GameEngine, Settings, SimContext};

fn player_type() -> impl Strategy<Value = PlayerType> {
    prop_oneof![
        Just(PlayerType::Novice),
        Just(PlayerType::Fair),
        Just(PlayerType::Good),
        Just(PlayerType::Expert),
        Just(PlayerType::Emeritus),
    ]
}

proptest! {
    /// Enemy totals in the state always match what the galaxy holds.
    #[test]
    fn enemy_counts_agree_with_galaxy(seed in any::<u64>(), player in player_type()) {
        let engine = GameEngine::new(Settings::default(), player, GameType::Short, seed);
        let ctx = engine.context();
        for kind in [EnemyKind::Klingon, EnemyKind::Commander, EnemyKind::SuperCommander] {
            prop_assert_eq!(ctx.galaxy.total_of(kind), ctx.state.remaining_of(kind));
        }
        prop_assert_eq!(ctx.galaxy.total_starbases(), ctx.state.starbase_count);
    }

    /// The ship occupies exactly the sector the state says it does.
    #[test]
    fn ship_placement_agrees(seed in any::<u64>()) {
        let engine = GameEngine::new(Settings::default(), PlayerType::Good, GameType::Medium, seed);
        let ctx = engine.context();
        prop_assert_eq!(ctx.galaxy.current_coordinate(), ctx.state.current_quadrant);
        prop_assert_eq!(ctx.galaxy.current_quadrant().ship(), Some(ctx.state.current_sector));
        prop_assert!(ctx.state.current_sector.is_valid());
    }

    /// Phaser energy only attenuates, and the drain never exceeds the defender.
    #[test]
    fn phaser_hit_is_bounded(
        distance in 0.0f64..13.0,
        allocated in 0.0f64..5000.0,
        defender in 0.0f64..2000.0,
        dust in 0.5f64..1.0,
    ) {
        let shot = phaser_hit(distance, allocated, defender, dust, 2.0);
        prop_assert!(shot.hit <= allocated + 1e-9);
        prop_assert!(shot.drained <= defender + 1e-9);
        prop_assert!(shot.drained >= 0.0);
    }

    #[test]
    fn automatic_power_always_finishes_the_target(
        distance in 1.0f64..13.0,
        defender in 1.0f64..2000.0,
        dust in 0.5f64..1.0,
    ) {
        let power = automatic_phaser_power(distance, defender, dust, 2.0);
        let shot = phaser_hit(distance, power, defender, dust, 2.0);
        prop_assert!((shot.drained - defender).abs() < 1e-6 * defender.max(1.0));
    }

    /// Shields and energy together account for the whole hit.
    #[test]
    fn absorption_conserves_the_hit(
        hit in 0.0f64..3000.0,
        shields_up in any::<bool>(),
        shield_energy in 0.0f64..2500.0,
    ) {
        let a = absorb(hit, shields_up, shield_energy, 0.7);
        prop_assert!((a.absorbed + a.to_energy - hit).abs() < 1e-9);
        prop_assert!(a.absorbed <= shield_energy + 1e-9);
        if !shields_up {
            prop_assert_eq!(a.absorbed, 0.0);
        }
    }

    /// A coordinate is on the grid exactly when both axes are in 0..10.
    #[test]
    fn coordinate_validity(x in -20i32..30, y in -20i32..30) {
        let expected = (0..10).contains(&x) && (0..10).contains(&y);
        prop_assert_eq!(Coordinate::new(x, y).is_valid(), expected);
    }

    /// Every event that fires is re-armed strictly after the date it fired,
    /// or left unscheduled when it has nothing to act on.
    #[test]
    fn fired_events_rearm_later(seed in 0u64..500) {
        let mut ctx = SimContext::new(Settings::default(), PlayerType::Good, GameType::Short, seed);
        let fired_at = ctx.state.stardate;
        let target = if ctx.state.current_quadrant == Coordinate::new(0, 0) {
            Coordinate::new(9, 9)
        } else {
            Coordinate::new(0, 0)
        };
        for kind in FutureEventType::ALL {
            ctx.events.enable(kind);
            ctx.events.event_mut(kind).star_date = fired_at;
        }
        ctx.events.event_mut(FutureEventType::Supernova).quadrant_coordinate = target;

        check_events(&mut ctx, &mut Sink);

        prop_assert!(ctx.events.event(FutureEventType::Supernova).star_date > fired_at);
        for kind in FutureEventType::ALL {
            let next = ctx.events.event(kind).star_date;
            prop_assert!(next == 0.0 || next > fired_at, "{:?} re-armed at {}", kind, next);
        }
    }

    #[test]
    fn absolute_position_round_trips(qx in 0i32..10, qy in 0i32..10, sx in 0i32..10, sy in 0i32..10) {
        let q = Coordinate::new(qx, qy);
        let s = Coordinate::new(sx, sy);
        prop_assert_eq!(split_absolute(absolute_position(q, s)), (q, s));
    }

    /// Anything off the grid clamps back onto it.
    #[test]
    fn split_absolute_stays_in_galaxy(x in -500.0f64..500.0, y in -500.0f64..500.0) {
        let (q, s) = split_absolute((x, y));
        prop_assert!(q.is_valid());
        prop_assert!(s.is_valid());
    }

    /// Faster warp costs more energy and takes less time.
    #[test]
    fn warp_tradeoff(distance in 0.1f64..12.0, w in 1.0f64..9.0) {
        prop_assert!(warp_energy(distance, w + 1.0, false) > warp_energy(distance, w, false));
        prop_assert!(warp_time(distance, w + 1.0) < warp_time(distance, w));
        prop_assert!(
            (warp_energy(distance, w, true) - 2.0 * warp_energy(distance, w, false)).abs() < 1e-6
        );
    }

    /// Stepping and stepping back returns to the start.
    #[test]
    fn step_round_trips(x in 1i32..9, y in 1i32..9, d in 0usize..8) {
        let c = Coordinate::new(x, y);
        let direction = Direction::ALL[d];
        prop_assert_eq!(c.step(direction).step(direction.opposite()), c);
    }

    #[test]
    fn adjacency_depends_on_position(x in 0i32..10, y in 0i32..10) {
        let edges = [x, y].iter().filter(|v| **v == 0 || **v == 9).count();
        let expected = match edges {
            0 => 8,
            1 => 5,
            _ => 3,
        };
        prop_assert_eq!(Coordinate::new(x, y).adjacent_valid().len(), expected);
    }

    #[test]
    fn sector_distance_is_symmetric(ax in 0i32..10, ay in 0i32..10, bx in 0i32..10, by in 0i32..10) {
        let a = Coordinate::new(ax, ay);
        let b = Coordinate::new(bx, by);
        prop_assert!((sector_distance(a, b) - sector_distance(b, a)).abs() < 1e-12);
    }

    /// The parser never panics, whatever it is fed.
    #[test]
    fn parser_accepts_or_rejects_any_line(line in "\\PC{0,40}") {
        let _ = commands::parse(&line);
    }

    /// Rejected input leaves the session exactly as it was.
    #[test]
    fn bad_warp_values_change_nothing(seed in 0u64..200, w in prop_oneof![-100.0f64..0.99, 10.01f64..100.0]) {
        let mut engine = GameEngine::new(Settings::default(), PlayerType::Fair, GameType::Short, seed);
        let before = engine.context().state.clone();
        let mut sink = Sink;
        engine.execute(&format!("warp {}", w), &mut sink);
        prop_assert_eq!(&engine.context().state, &before);
    }
}

struct Sink;

impl space_tactics::io::MessageSink for Sink {
    fn display_message(&mut self, _text: &str, _severity: space_tactics::io::Severity) {}
}

impl space_tactics::io::SoundSink for Sink {
    fn play_sound(&mut self, _sound: space_tactics::io::SoundKind) {}
}
