use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::devices::DeviceType;

/// Chance that engines pushed to `warp` blow out over `distance` quadrants.
/// Zero at or below the safe factor.
pub fn overload_probability(warp: f64, distance: f64, max_safe: f64) -> f64 {
    if warp <= max_safe {
        return 0.0;
    }
    distance * (max_safe - warp).powi(2) / 66.666
}

/// Roll for a blow-out on a fast trip. Returns the fraction of the trip
/// completed before the engines give out. Nothing is damaged yet.
pub fn roll_overload(ctx: &mut SimContext, warp: f64, distance: f64) -> Option<f64> {
    if ctx.devices.is_damaged(DeviceType::WarpEngines) {
        return None;
    }
    let probability = overload_probability(warp, distance, ctx.settings.max_safe_warp_factor);
    if probability <= 0.0 || !ctx.intelligence.chance(probability) {
        return None;
    }
    Some(ctx.intelligence.uniform())
}

/// Take the warp engines off line after a blow-out.
pub fn blow_engines(ctx: &mut SimContext, warp: f64, completed: f64, feedback: &mut dyn Feedback) {
    let repair = ctx.intelligence.device_damage_duration(ctx.state.player_type);
    ctx.devices.damage(DeviceType::WarpEngines, repair);
    log::info!(
        "warp engines overloaded at warp {:.1}; trip cut to {:.0}%",
        warp,
        completed * 100.0
    );
    feedback.play_sound(SoundKind::EngineDamaged);
    feedback.display_message(
        "Engineering reports the warp engines are damaged; dropping out of warp",
        Severity::Alert,
    );
}
