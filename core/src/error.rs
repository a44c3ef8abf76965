use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfiguration,
    #[error("Coordinates outside of the board")]
    IndexOutOfRange,
    #[error("Game already ended, no new moves are accepted")]
    InvalidTransition,
    #[error("Unknown level name")]
    UnknownLevel,
}

pub type Result<T> = core::result::Result<T, GameError>;
