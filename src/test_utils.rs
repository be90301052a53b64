//! Helpers for tests and benchmarks that need fixed mine layouts.

use crate::{Board, Game, Position};

/// Builds a generated board from rows of text where `*` marks a mine and any
/// other character a safe cell. All rows must have the same length.
pub fn board_from_rows(rows: &[&str]) -> Board {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
    let mines: Vec<Position> = rows
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, c)| *c == '*')
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
        .collect();
    Board::from_mines(width, height, &mines).expect("mine rows must be rectangular")
}

/// A running game over the layout described by `rows`.
pub fn game_from_rows(rows: &[&str]) -> Game {
    Game::from_board(board_from_rows(rows))
}

/// Counts mines around `pos` straight from the coordinates, without going
/// through the board's neighbor iterator.
pub fn recount_adjacent(board: &Board, pos: Position) -> u8 {
    let mut count = 0;
    for y in pos.y - 1..=pos.y + 1 {
        for x in pos.x - 1..=pos.x + 1 {
            let other = Position::new(x, y);
            if other != pos && board.is_within_bounds(other) && board.is_mine(other) {
                count += 1;
            }
        }
    }
    count
}

/// Positions of the maximal zero region containing `start` plus its border of
/// numbered cells, found by a plain scan to a fixed point.
pub fn expected_cascade(board: &Board, start: Position) -> Vec<Position> {
    let mut region = vec![start];
    loop {
        let mut grew = false;
        for pos in board.positions() {
            if region.contains(&pos) || board.is_mine(pos) {
                continue;
            }
            let touches_zero = region
                .iter()
                .any(|&open| open.is_adjacent(pos) && recount_adjacent(board, open) == 0);
            if touches_zero {
                region.push(pos);
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }
    region.sort();
    region
}
