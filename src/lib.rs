pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod position;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use board::{Board, CellValue};
pub use config::{Difficulty, GameConfig, PlacementPolicy, SizeLimits};
pub use display::format_counter;
pub use error::{GameError, Result};
pub use game::{
    CellState, FlagOutcome, FlagStatus, Game, GameState, OpenedCell, RevealOutcome, RevealStatus,
};
pub use position::Position;
