//! Command-line options for the console binary

mod args;

pub use args::{Args, Length, Skill};
