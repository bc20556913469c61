//! Computer opponent tiers against fixed positions.

use rand::SeedableRng;
use rand::rngs::mock::StepRng;
use rand_chacha::ChaCha8Rng;
use tictactoe_engine::opponent::{select_move, smart_move, winning_move};
use tictactoe_engine::{Board, Difficulty, Mark, OpponentError, Position};

const X: Option<Mark> = Some(Mark::X);
const O: Option<Mark> = Some(Mark::O);
const E: Option<Mark> = None;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_hard_blocks_top_row() {
    let board = Board::from_marks([X, X, E, E, E, E, E, E, E]);
    let pos = select_move(&board, Mark::O, Difficulty::Hard, &mut rng(0)).unwrap();
    assert_eq!(pos, Position::TopRight);
}

#[test]
fn test_hard_prefers_win_over_block() {
    // O can win at 2; X also threatens 5.
    let board = Board::from_marks([O, O, E, X, X, E, E, E, E]);
    let pos = select_move(&board, Mark::O, Difficulty::Hard, &mut rng(0)).unwrap();
    assert_eq!(pos, Position::TopRight);

    let board = Board::from_marks([O, O, E, E, E, E, E, E, E]);
    let pos = select_move(&board, Mark::O, Difficulty::Hard, &mut rng(0)).unwrap();
    assert_eq!(pos, Position::TopRight);
}

#[test]
fn test_hard_takes_center_on_empty_board() {
    for seed in 0..8 {
        let pos = select_move(&Board::new(), Mark::O, Difficulty::Hard, &mut rng(seed)).unwrap();
        assert_eq!(pos, Position::Center);
    }
}

#[test]
fn test_hard_corner_choice_is_seed_dependent() {
    let board = Board::from_marks([E, E, E, E, X, E, E, E, E]);
    let picks: std::collections::BTreeSet<_> = (0..64)
        .map(|seed| smart_move(&board, Mark::O, &mut rng(seed)).unwrap())
        .collect();
    assert!(picks.iter().all(|p| Position::CORNERS.contains(p)));
    assert!(picks.len() > 1, "corner tie-break should vary with the seed");
}

#[test]
fn test_hard_blocks_every_single_threat() {
    // For every line, two X marks with the third square free: O must block.
    for line in tictactoe_engine::rules::LINES {
        for gap in 0..3 {
            let mut board = Board::new();
            for (i, pos) in line.iter().enumerate() {
                if i != gap {
                    board = board.with_mark(*pos, Mark::X);
                }
            }
            // Give O one mark off the line to keep the count plausible.
            let spare = board
                .empty_positions()
                .into_iter()
                .find(|p| !line.contains(p))
                .unwrap();
            board = board.with_mark(spare, Mark::O);
            assert_eq!(winning_move(&board, Mark::X), Some(line[gap]));
            let pos = select_move(&board, Mark::O, Difficulty::Hard, &mut rng(1)).unwrap();
            assert_eq!(pos, line[gap], "board:\n{}", board.display());
        }
    }
}

#[test]
fn test_easy_only_picks_empty_squares() {
    let board = Board::from_marks([X, O, X, E, O, E, E, X, E]);
    let empty = board.empty_positions();
    for seed in 0..64 {
        let pos = select_move(&board, Mark::O, Difficulty::Easy, &mut rng(seed)).unwrap();
        assert!(empty.contains(&pos));
    }
}

#[test]
fn test_easy_covers_every_empty_square() {
    let picks: std::collections::BTreeSet<_> = (0..256)
        .map(|seed| select_move(&Board::new(), Mark::O, Difficulty::Easy, &mut rng(seed)).unwrap())
        .collect();
    assert_eq!(picks.len(), 9);
}

#[test]
fn test_medium_smart_branch_when_coin_lands_low() {
    // A zero stream always passes the 0.5 coin flip, so Medium plays Hard.
    let board = Board::from_marks([X, X, E, E, O, E, E, E, E]);
    let mut always_smart = StepRng::new(0, 0);
    let pos = select_move(&board, Mark::O, Difficulty::Medium, &mut always_smart).unwrap();
    assert_eq!(pos, Position::TopRight);
}

#[test]
fn test_medium_mixes_policies() {
    let board = Board::from_marks([X, X, E, E, O, E, E, E, E]);
    let blocks = (0..200)
        .filter(|&seed| {
            select_move(&board, Mark::O, Difficulty::Medium, &mut rng(seed)).unwrap()
                == Position::TopRight
        })
        .count();
    // Hard always blocks; Easy blocks one time in six.
    assert!(blocks > 80 && blocks < 170, "blocked {blocks} of 200");
}

#[test]
fn test_medium_is_reproducible_under_seed() {
    let board = Board::from_marks([X, E, E, E, E, E, E, E, E]);
    for seed in 0..16 {
        let a = select_move(&board, Mark::O, Difficulty::Medium, &mut rng(seed));
        let b = select_move(&board, Mark::O, Difficulty::Medium, &mut rng(seed));
        assert_eq!(a, b);
    }
}

#[test]
fn test_full_board_is_no_legal_move() {
    let board = Board::from_marks([X, O, X, X, O, O, O, X, X]);
    assert_eq!(
        select_move(&board, Mark::O, Difficulty::Hard, &mut rng(0)),
        Err(OpponentError::NoLegalMove)
    );
}

#[test]
fn test_selection_does_not_mutate_board() {
    let board = Board::from_marks([X, X, E, E, O, E, E, E, E]);
    let before = board;
    let _ = select_move(&board, Mark::O, Difficulty::Hard, &mut rng(0));
    assert_eq!(board, before);
}
