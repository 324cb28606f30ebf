//! Presentation
//!
//! Presenters turn report data from the services into text lines for a
//! `MessageSink`. They hold no state and never touch the simulation.

pub mod presenters;
