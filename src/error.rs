use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Mines have not been placed yet")]
    NotGenerated,
    #[error("Mines have already been placed")]
    AlreadyGenerated,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
