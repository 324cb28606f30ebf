//! Text command grammar
//!
//! Verbs may be abbreviated to any unique prefix of at least two letters.
//! Parsing never touches the simulation; a parse failure is an input
//! error and leaves everything as it was.

use crate::models::coordinate::Coordinate;
use crate::models::errors::{GameError, GameResult};
use crate::models::navigation_types::{MoveTarget, WarpFactor};

/// Everything the player can ask for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rest(f64),
    Phasers(Option<f64>),
    Photons(u32),
    Warp(WarpFactor),
    Move(MoveTarget),
    Shields(bool),
    Chart,
    LongRangeScan,
    Damages,
    Dock,
    Help,
    Save,
    Quit,
}

const VERBS: [&str; 13] = [
    "rest", "phasers", "photons", "warp", "move", "shields", "chart", "lrscan", "damages", "dock",
    "help", "save", "quit",
];

/// Expand an abbreviation to its full verb.
fn resolve_verb(word: &str) -> GameResult<&'static str> {
    let word = word.to_ascii_lowercase();
    if let Some(exact) = VERBS.iter().copied().find(|v| *v == word) {
        return Ok(exact);
    }
    if word.len() < 2 {
        return Err(GameError::InvalidCommand(word));
    }
    let mut matches = VERBS.iter().copied().filter(|v| v.starts_with(word.as_str()));
    match (matches.next(), matches.next()) {
        (Some(verb), None) => Ok(verb),
        (Some(_), Some(_)) => Err(GameError::InvalidCommand(format!("{} is ambiguous", word))),
        _ => Err(GameError::InvalidCommand(word)),
    }
}

fn number(command: &'static str, text: &str) -> GameResult<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GameError::invalid_value(command, format!("'{}' is not a number", text)))
}

fn grid_index(text: &str) -> GameResult<i32> {
    match text.parse::<i32>() {
        Ok(v) if (0..=9).contains(&v) => Ok(v),
        Ok(_) => Err(GameError::invalid_value("move", "coordinates must be between 0 and 9")),
        Err(_) => Err(GameError::invalid_value("move", format!("'{}' is not a whole number", text))),
    }
}

fn no_arguments(verb: &'static str, args: &[&str], command: Command) -> GameResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(GameError::invalid_value(verb, "takes no arguments"))
    }
}

pub fn parse(input: &str) -> GameResult<Command> {
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return Err(GameError::InvalidCommand(String::new()));
    };
    let args: Vec<&str> = words.collect();
    let verb = resolve_verb(first)?;

    match verb {
        "rest" => {
            let [interval] = args.as_slice() else {
                return Err(GameError::invalid_value("rest", "expected one interval in stardates"));
            };
            let interval = number("rest", interval)?;
            if interval <= 0.0 {
                return Err(GameError::invalid_value("rest", "interval must be positive"));
            }
            Ok(Command::Rest(interval))
        }
        "phasers" => match args.as_slice() {
            [] => Ok(Command::Phasers(None)),
            [power] => {
                let power = number("phasers", power)?;
                if power <= 0.0 {
                    return Err(GameError::invalid_value("phasers", "power must be positive"));
                }
                Ok(Command::Phasers(Some(power)))
            }
            _ => Err(GameError::invalid_value("phasers", "expected at most one power value")),
        },
        "photons" => match args.as_slice() {
            [] => Ok(Command::Photons(1)),
            [count] => match count.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(Command::Photons(n)),
                _ => Err(GameError::invalid_value("photons", "count must be a whole number of at least 1")),
            },
            _ => Err(GameError::invalid_value("photons", "expected at most one count")),
        },
        "warp" => {
            let [factor] = args.as_slice() else {
                return Err(GameError::invalid_value("warp", "expected one warp factor"));
            };
            let factor = number("warp", factor)?;
            WarpFactor::new(factor)
                .map(Command::Warp)
                .map_err(|reason| GameError::invalid_value("warp", reason))
        }
        "move" => match args.as_slice() {
            [dx, dy] => Ok(Command::Move(MoveTarget::Manual {
                dx: number("move", dx)?,
                dy: number("move", dy)?,
            })),
            [qx, qy, sx, sy] => Ok(Command::Move(MoveTarget::Automatic {
                quadrant: Coordinate::new(grid_index(qx)?, grid_index(qy)?),
                sector: Coordinate::new(grid_index(sx)?, grid_index(sy)?),
            })),
            _ => Err(GameError::invalid_value(
                "move",
                "expected <dx> <dy> or <qx> <qy> <sx> <sy>",
            )),
        },
        "shields" => match args.as_slice() {
            [word] if word.eq_ignore_ascii_case("up") => Ok(Command::Shields(true)),
            [word] if word.eq_ignore_ascii_case("down") => Ok(Command::Shields(false)),
            _ => Err(GameError::invalid_value("shields", "expected up or down")),
        },
        "chart" => no_arguments("chart", &args, Command::Chart),
        "lrscan" => no_arguments("lrscan", &args, Command::LongRangeScan),
        "damages" => no_arguments("damages", &args, Command::Damages),
        "dock" => no_arguments("dock", &args, Command::Dock),
        "help" => no_arguments("help", &args, Command::Help),
        "save" => no_arguments("save", &args, Command::Save),
        "quit" => no_arguments("quit", &args, Command::Quit),
        other => Err(GameError::InvalidCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_abbreviated_verbs() {
        assert_eq!(parse("chart").unwrap(), Command::Chart);
        assert_eq!(parse("CH").unwrap(), Command::Chart);
        assert_eq!(parse("lr").unwrap(), Command::LongRangeScan);
        assert_eq!(parse("da").unwrap(), Command::Damages);
        assert_eq!(parse("do").unwrap(), Command::Dock);
        assert_eq!(parse("pho 3").unwrap(), Command::Photons(3));
        assert_eq!(parse("pha").unwrap(), Command::Phasers(None));
    }

    #[test]
    fn ambiguous_or_short_prefix_is_invalid_command() {
        assert!(matches!(parse("ph"), Err(GameError::InvalidCommand(_))));
        assert!(matches!(parse("d"), Err(GameError::InvalidCommand(_))));
        assert!(matches!(parse("fly 3"), Err(GameError::InvalidCommand(_))));
        assert!(matches!(parse("   "), Err(GameError::InvalidCommand(_))));
    }

    #[test]
    fn rest_needs_a_positive_number() {
        assert_eq!(parse("rest 1.5").unwrap(), Command::Rest(1.5));
        for bad in ["rest", "rest abc", "rest 0", "rest -2", "rest 1 2", "rest NaN"] {
            let err = parse(bad).unwrap_err();
            assert!(
                matches!(err, GameError::InvalidCommandValue { command: "rest", .. }),
                "{} gave {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn phasers_power_is_optional_but_positive() {
        assert_eq!(parse("phasers 500").unwrap(), Command::Phasers(Some(500.0)));
        assert!(parse("phasers -1").unwrap_err().is_input_error());
    }

    #[test]
    fn photons_default_to_one() {
        assert_eq!(parse("photons").unwrap(), Command::Photons(1));
        assert!(parse("photons 0").is_err());
        assert!(parse("photons two").is_err());
    }

    #[test]
    fn warp_range_is_checked() {
        assert_eq!(parse("warp 6.5").unwrap(), Command::Warp(WarpFactor::new(6.5).unwrap()));
        assert!(matches!(
            parse("warp 11"),
            Err(GameError::InvalidCommandValue { command: "warp", .. })
        ));
    }

    #[test]
    fn move_has_two_forms() {
        assert_eq!(
            parse("move 1.5 -2").unwrap(),
            Command::Move(MoveTarget::Manual { dx: 1.5, dy: -2.0 })
        );
        assert_eq!(
            parse("mo 1 2 3 4").unwrap(),
            Command::Move(MoveTarget::Automatic {
                quadrant: Coordinate::new(1, 2),
                sector: Coordinate::new(3, 4),
            })
        );
        assert!(parse("move 1 2 3 10").unwrap_err().is_input_error());
        assert!(parse("move 1 2 3").unwrap_err().is_input_error());
        assert!(parse("move 1.5 2 3 4").unwrap_err().is_input_error());
    }

    #[test]
    fn shields_up_or_down() {
        assert_eq!(parse("shields UP").unwrap(), Command::Shields(true));
        assert_eq!(parse("sh down").unwrap(), Command::Shields(false));
        assert!(parse("shields sideways").unwrap_err().is_input_error());
    }

    #[test]
    fn bare_verbs_reject_arguments() {
        assert!(parse("chart 3").unwrap_err().is_input_error());
        assert_eq!(parse("save").unwrap(), Command::Save);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
    }
}
