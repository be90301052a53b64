use minefield::{
    format_counter, CellState, Difficulty, FlagStatus, Game, GameConfig, GameState,
    PlacementPolicy, Position, RevealStatus, SizeLimits,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn all_positions(game: &Game) -> Vec<Position> {
    game.board().positions().collect()
}

/// Reveals every safe cell in row-major order, checking the win fires exactly
/// on the last one.
fn play_to_win(game: &mut Game) {
    let cells = game.board().cell_count();
    let mines = game.board().mines_count();
    for pos in all_positions(game) {
        if game.state().is_finished() {
            break;
        }
        if game.board().is_mine(pos) {
            continue;
        }
        let outcome = game.reveal(pos);
        if outcome.status == RevealStatus::NoChange {
            continue;
        }
        if cells - game.open_count() == mines {
            assert_eq!(outcome.status, RevealStatus::Won);
            assert_eq!(game.state(), GameState::Won);
        } else {
            assert_eq!(outcome.status, RevealStatus::Opened);
            assert_eq!(game.state(), GameState::Running);
        }
    }
}

#[test]
fn test_beginner_game_can_be_won() {
    let mut game = Game::with_seed(Difficulty::Beginner.config(), 2024);
    game.reveal(Position::new(3, 3));
    play_to_win(&mut game);

    assert_eq!(game.state(), GameState::Won);
    assert_eq!(game.open_count(), 64 - 10);
    assert_eq!(format_counter(game.mines_remaining() as i64), "000");
}

#[test]
fn test_mine_counter_tracks_flags() {
    let mut game = Game::with_seed(Difficulty::Beginner.config(), 5);

    let targets: Vec<Position> = all_positions(&game).into_iter().take(15).collect();
    for (flags, pos) in targets.iter().enumerate() {
        let outcome = game.toggle_flag(*pos);
        assert_eq!(outcome.status, FlagStatus::Flagged);
        assert_eq!(outcome.mines_remaining, 10 - (flags as i32 + 1));
        assert_eq!(
            format_counter(outcome.mines_remaining as i64),
            format_counter(10 - game.flag_count() as i64)
        );
    }
    assert_eq!(game.mines_remaining(), -5);
    assert_eq!(format_counter(game.mines_remaining() as i64), "-05");
}

#[test]
fn test_independent_sessions_do_not_share_state() {
    let config = Difficulty::Beginner.config();
    let mut first = Game::with_seed(config, 1);
    let second = Game::with_seed(config, 1);

    first.reveal(Position::new(4, 4));
    first.toggle_flag(Position::new(0, 7));

    assert_eq!(second.state(), GameState::Pending);
    assert_eq!(second.flag_count(), 0);
    assert!(!second.board().is_generated());
}

#[test]
fn test_large_board_cascade_terminates() {
    let config = GameConfig::with_limits(100, 100, 1, SizeLimits::new(2, 100))
        .with_placement(PlacementPolicy::SafeNeighborhood);
    let mut game = Game::with_seed(config, 11);

    let outcome = game.reveal(Position::new(0, 0));

    assert_eq!(outcome.status, RevealStatus::Won);
    assert_eq!(outcome.opened.len(), 9_999);
    assert_eq!(game.open_count(), 9_999);
}

#[test]
fn test_safe_neighborhood_first_reveal_cascades() {
    let config = Difficulty::Expert
        .config()
        .with_placement(PlacementPolicy::SafeNeighborhood);
    for seed in 0..10 {
        let mut game = Game::with_seed(config, seed);
        let outcome = game.reveal(Position::new(15, 8));

        assert!(outcome.opened.len() >= 9, "cascade too small");
        assert_eq!(outcome.opened[0].adjacent, 0);
    }
}

proptest! {
    #[test]
    fn prop_cascade_opens_each_cell_once(
        width in 2u32..25,
        height in 2u32..25,
        mines in 1u32..80,
        rng_seed in any::<u64>(),
        clicks in prop::collection::vec((0u32..25, 0u32..25), 1..12),
    ) {
        let config = GameConfig::with_limits(width, height, mines, SizeLimits::new(2, 100));
        let mut game = Game::with_seed(config, rng_seed);
        let mut seen = HashSet::new();

        for (x, y) in clicks {
            let pos = Position::new((x % config.width()) as i32, (y % config.height()) as i32);
            let before = game.open_count();
            let outcome = game.reveal(pos);

            for cell in &outcome.opened {
                prop_assert!(seen.insert(cell.position), "{:?} opened twice", cell.position);
                prop_assert_eq!(
                    game.cell_state(cell.position),
                    Ok(CellState::Opened(cell.adjacent))
                );
            }
            prop_assert_eq!(game.open_count() - before, outcome.opened.len() as u32);

            match outcome.status {
                RevealStatus::Exploded(at) => {
                    prop_assert_eq!(at, pos);
                    prop_assert_eq!(game.state(), GameState::Lost);
                    let frozen = game.open_count();
                    prop_assert_eq!(game.reveal(pos).status, RevealStatus::GameOver);
                    prop_assert_eq!(game.open_count(), frozen);
                    break;
                }
                RevealStatus::Won => {
                    prop_assert_eq!(
                        game.open_count(),
                        game.board().cell_count() - game.board().mines_count()
                    );
                    break;
                }
                _ => {
                    prop_assert!(
                        game.open_count() < game.board().cell_count() - game.board().mines_count()
                    );
                }
            }
        }
    }

    #[test]
    fn prop_double_toggle_is_identity(
        rng_seed in any::<u64>(),
        x in 0i32..8,
        y in 0i32..8,
        reveal_first in any::<bool>(),
    ) {
        let mut game = Game::with_seed(Difficulty::Beginner.config(), rng_seed);
        if reveal_first {
            game.reveal(Position::new(7 - x, 7 - y));
        }
        let pos = Position::new(x, y);
        let state = game.cell_state(pos);
        let flags = game.flag_count();

        game.toggle_flag(pos);
        game.toggle_flag(pos);

        prop_assert_eq!(game.cell_state(pos), state);
        prop_assert_eq!(game.flag_count(), flags);
    }
}
