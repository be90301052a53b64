#![cfg(feature = "test-utils")]

use minefield::{
    test_utils::{board_from_rows, expected_cascade, game_from_rows, recount_adjacent},
    Board, CellValue, GameConfig, PlacementPolicy, Position, RevealStatus, SizeLimits,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn adjacency_matches(board: &Board) -> bool {
    board.positions().all(|pos| match board.cell_value(pos) {
        Ok(CellValue::Adjacent(count)) => count == recount_adjacent(board, pos),
        Ok(CellValue::Mine) => true,
        Err(_) => false,
    })
}

#[test]
fn test_generated_adjacency_extensive() {
    let mut rng = StdRng::seed_from_u64(12345);
    let limits = SizeLimits::new(1, 40);
    let mut failures = 0;

    for idx in 0..2_000 {
        let width = rng.gen_range(1..=40);
        let height = rng.gen_range(1..=40);
        let mines = rng.gen_range(1..=width * height);
        let placement = if idx % 2 == 0 {
            PlacementPolicy::SafeSeed
        } else {
            PlacementPolicy::SafeNeighborhood
        };
        let config = GameConfig::with_limits(width, height, mines, limits).with_placement(placement);
        let seed = Position::new(
            rng.gen_range(0..config.width()) as i32,
            rng.gen_range(0..config.height()) as i32,
        );

        let mut board = Board::new(&config);
        board.generate_with(seed, &mut rng).unwrap();

        let mine_total = board.mine_positions().count() as u32;
        if mine_total != config.mines() || board.is_mine(seed) || !adjacency_matches(&board) {
            println!("Failure on test case {} ({:?}, seed {:?})", idx, config, seed);
            failures += 1;
        }
    }

    assert_eq!(
        failures, 0,
        "Generation failed on {} out of 2,000 boards",
        failures
    );
}

#[test]
fn test_single_row_and_column_boards() {
    let row = board_from_rows(&["*..*.*"]);
    assert!(adjacency_matches(&row));
    assert_eq!(row.cell_value(Position::new(4, 0)), Ok(CellValue::Adjacent(2)));
    assert_eq!(row.cell_value(Position::new(1, 0)), Ok(CellValue::Adjacent(1)));

    let column = board_from_rows(&[".", "*", ".", "."]);
    assert!(adjacency_matches(&column));
    assert_eq!(
        column.cell_value(Position::new(0, 3)),
        Ok(CellValue::Adjacent(0))
    );
}

#[test]
fn test_cascade_matches_reference_region() {
    let rows = [
        "........*.",
        "..........",
        "...*......",
        "..........",
        "......**..",
        "..........",
        "*.........",
    ];
    let mut game = game_from_rows(&rows);
    let start = Position::new(9, 6);

    let outcome = game.reveal(start);

    let mut opened: Vec<Position> = outcome.opened.iter().map(|c| c.position).collect();
    opened.sort();
    assert_eq!(opened, expected_cascade(game.board(), start));
}

#[test]
fn test_cascade_stops_at_enclosed_cell() {
    let mut game = game_from_rows(&[
        ".......",
        ".......",
        "..***..",
        "..*.*..",
        "..***..",
        ".......",
        ".......",
    ]);

    let outcome = game.reveal(Position::new(0, 0));

    assert_eq!(outcome.status, RevealStatus::Opened);
    assert_eq!(outcome.opened.len(), 40);
    assert!(outcome
        .opened
        .iter()
        .all(|cell| cell.position != Position::new(3, 3)));

    assert_eq!(game.reveal(Position::new(3, 3)).status, RevealStatus::Won);
}
