//! Console session driver
//!
//! Reads commands from an `InputReader` and feeds the engine. The real
//! time spent at the prompt is replayed through the engine before each
//! command runs, so enemies keep acting while the player thinks.

use std::io;
use std::time::Instant;

use crate::game_engine::GameEngine;
use crate::io::{Feedback, InputReader, Severity, TerminalIO};
use crate::models::errors::GameResult;
use crate::services::computer;
use crate::ui::presenters::StatusPresenter;

pub struct Game<I: InputReader, O: Feedback> {
    engine: GameEngine,
    input: I,
    output: O,
}

impl Game<TerminalIO, TerminalIO> {
    pub fn console(engine: GameEngine) -> Self {
        Game::new(engine, TerminalIO, TerminalIO)
    }
}

impl<I: InputReader, O: Feedback> Game<I, O> {
    pub fn new(engine: GameEngine, input: I, output: O) -> Self {
        Game { engine, input, output }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn run(&mut self) -> GameResult<()> {
        self.print_mission_briefing();
        self.show_status();

        let mut last_input = Instant::now();
        while !self.engine.is_over() {
            let line = match self.input.read_line("COMMAND") {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::debug!("input closed; ending session");
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            let now = Instant::now();
            self.engine
                .advance(now.duration_since(last_input).as_secs_f64(), &mut self.output);
            last_input = now;

            if self.engine.is_over() {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                self.show_status();
                continue;
            }
            if !self.engine.execute(line, &mut self.output) {
                self.output.display_message("Session ended by the captain", Severity::Info);
                break;
            }
        }
        Ok(())
    }

    fn show_status(&mut self) {
        let ctx = self.engine.context();
        let report = computer::status_report(ctx);
        StatusPresenter::show_status(&report, ctx.galaxy.current_quadrant(), &mut self.output);
    }

    fn print_mission_briefing(&mut self) {
        let state = &self.engine.context().state;
        let plural = if state.starbase_count != 1 { "s" } else { "" };
        self.output.display_message(
            &format!(
                "You must destroy {} enemy ships in {:.0} stardates with {} starbase{}",
                state.remaining_enemies(),
                state.remaining_game_time,
                state.starbase_count,
                plural,
            ),
            Severity::Info,
        );
        self.output
            .display_message("Type help for the list of commands", Severity::Info);
    }
}
