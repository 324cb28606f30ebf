//! Input/output abstractions
//!
//! The engine never prints. It reports through a `MessageSink` for text and
//! a `SoundSink` for audio cues; the console binary implements both on the
//! terminal and tests record them.

use std::io::{self, Write};

/// How loudly a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

/// Closed set of audio cues the engine can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    UnableToComply,
    Docked,
    PhaserFired,
    TorpedoFired,
    EnemyTorpedoFired,
    ShieldHit,
    ShieldsRaised,
    ShieldsLowered,
    EnemyDestroyed,
    TorpedoMissed,
    Warp,
    EngineDamaged,
    RedAlert,
    Supernova,
    TractorBeam,
    SubspaceRadio,
    ShipDestroyed,
}

impl SoundKind {
    pub fn name(&self) -> &'static str {
        match self {
            SoundKind::UnableToComply => "unable to comply",
            SoundKind::Docked => "docked",
            SoundKind::PhaserFired => "phasers",
            SoundKind::TorpedoFired => "photon torpedo",
            SoundKind::EnemyTorpedoFired => "enemy torpedo",
            SoundKind::ShieldHit => "shield hit",
            SoundKind::ShieldsRaised => "shields up",
            SoundKind::ShieldsLowered => "shields down",
            SoundKind::EnemyDestroyed => "explosion",
            SoundKind::TorpedoMissed => "torpedo miss",
            SoundKind::Warp => "warp",
            SoundKind::EngineDamaged => "engine damage",
            SoundKind::RedAlert => "red alert",
            SoundKind::Supernova => "supernova",
            SoundKind::TractorBeam => "tractor beam",
            SoundKind::SubspaceRadio => "subspace radio",
            SoundKind::ShipDestroyed => "ship destroyed",
        }
    }
}

/// Receives every player-visible narrative line.
pub trait MessageSink {
    fn display_message(&mut self, text: &str, severity: Severity);
}

/// Receives audio cues.
pub trait SoundSink {
    fn play_sound(&mut self, sound: SoundKind);
}

/// Both sinks at once; what the engine is handed on every call.
pub trait Feedback: MessageSink + SoundSink {}

impl<T: MessageSink + SoundSink> Feedback for T {}

/// Trait for reading user input
pub trait InputReader {
    /// Read a line of input from the user with a prompt
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error>;
}

/// Terminal I/O implementation using stdin/stdout
pub struct TerminalIO;

impl InputReader for TerminalIO {
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(input)
    }
}

impl MessageSink for TerminalIO {
    fn display_message(&mut self, text: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("{}", text),
            Severity::Warning => println!("! {}", text),
            Severity::Alert => println!("*** {} ***", text),
        }
    }
}

impl SoundSink for TerminalIO {
    fn play_sound(&mut self, sound: SoundKind) {
        println!("  <{}>", sound.name());
    }
}
