use std::str::FromStr;
use sweeper_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   toggle a flag
  n               start a new game
  s               show the board
  h               show this help
  q               quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    MissingCoords(String),
    #[error("`{0}` is not a valid coordinate")]
    BadCoord(String),
    #[error("unexpected argument `{0}`")]
    TrailingInput(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(name, &mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(name, &mut words)?),
            "n" | "new" => Command::New,
            "s" | "show" => Command::Show,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    name: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next_coord = || -> Result<Coord, CommandError> {
        let word = words
            .next()
            .ok_or_else(|| CommandError::MissingCoords(name.to_string()))?;
        word.parse()
            .map_err(|_| CommandError::BadCoord(word.to_string()))
    };
    let row = next_coord()?;
    let col = next_coord()?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_with_coordinates() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  flag 0 12 ".parse::<Command>(), Ok(Command::Flag((0, 12))));
        assert_eq!("REVEAL 1 1".parse::<Command>(), Ok(Command::Reveal((1, 1))));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::New));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingCoords("r".into()))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(CommandError::BadCoord("-1".into()))
        );
        assert_eq!(
            "r 1 2 3".parse::<Command>(),
            Err(CommandError::TrailingInput("3".into()))
        );
        assert_eq!(
            "n now".parse::<Command>(),
            Err(CommandError::TrailingInput("now".into()))
        );
    }
}
