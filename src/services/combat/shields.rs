use crate::game_engine::SimContext;
use crate::io::{Feedback, Severity, SoundKind};
use crate::models::devices::{DeviceStatus, DeviceType};
use crate::models::errors::{GameError, GameResult};

use super::formulas::{absorb, Absorption};

/// Raise or lower the shields.
pub fn set_shields(ctx: &mut SimContext, raise: bool, feedback: &mut dyn Feedback) -> GameResult<()> {
    let current = ctx.devices.status(DeviceType::Shields);
    if current == DeviceStatus::Damaged {
        return Err(GameError::unable("shields are damaged"));
    }

    let (wanted, sound, word) = if raise {
        (DeviceStatus::Up, SoundKind::ShieldsRaised, "up")
    } else {
        (DeviceStatus::Down, SoundKind::ShieldsLowered, "down")
    };
    if current == wanted {
        feedback.display_message(&format!("Shields already {}", word), Severity::Info);
        return Ok(());
    }

    ctx.devices.set_status(DeviceType::Shields, wanted);
    feedback.play_sound(sound);
    feedback.display_message(
        &format!("Shields {} ({:.0} units)", word, ctx.state.shield_energy),
        Severity::Info,
    );
    Ok(())
}

/// Apply an incoming hit: shields soak up their share, the ship's energy
/// takes the rest.
pub fn absorb_hit(ctx: &mut SimContext, hit: f64) -> Absorption {
    let absorption = absorb(
        hit,
        ctx.shields_up(),
        ctx.state.shield_energy,
        ctx.settings.shield_absorption_fraction,
    );
    ctx.state.subtract_shields(absorption.absorbed);
    ctx.state.subtract_energy(absorption.to_energy);
    absorption
}
