use degen_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn mines_in(board: &Board) -> usize {
    board.cells().iter().filter(|cell| cell.is_mine()).count()
}

#[test]
fn easy_first_click_in_the_middle() {
    for seed in 0..200 {
        let mut board = Board::new(9, 9).unwrap();
        RandomMinePlacer::new(seed)
            .place(&mut board, 10, (4, 4))
            .unwrap();

        assert_eq!(mines_in(&board), 10);
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(!board.cell((row, col)).unwrap().is_mine(), "seed {seed}");
            }
        }
    }
}

#[test]
fn safe_zone_holds_wherever_the_first_click_lands() {
    let mut rng = SmallRng::seed_from_u64(99);
    for row in 0..8 {
        for col in 0..8 {
            let mut board = Board::new(8, 8).unwrap();
            board.place_mines(55, (row, col), &mut rng).unwrap();

            assert_eq!(mines_in(&board), 55);
            assert!(
                board
                    .iter_coords()
                    .filter(|&coords| within_one((row, col), coords))
                    .all(|coords| !board.cell(coords).unwrap().is_mine())
            );
        }
    }
}

#[test]
fn counts_match_neighbors_after_random_placement() {
    for seed in 0..20 {
        let mut board = Board::new(24, 24).unwrap();
        RandomMinePlacer::new(seed)
            .place(&mut board, 99, (0, 0))
            .unwrap();

        for coords in board.iter_coords() {
            let cell = board.cell(coords).unwrap();
            if cell.is_mine() {
                continue;
            }
            let expected = board
                .iter_neighbors(coords)
                .filter(|&pos| board.cell(pos).unwrap().is_mine())
                .count() as u8;
            assert_eq!(cell.neighbor_mine_count(), expected);
        }
    }
}

#[test]
fn mine_free_three_by_three_opens_in_one_reveal() {
    let mut board = Board::new(3, 3).unwrap();

    // nothing placed, every count is zero
    assert_eq!(board.reveal((1, 1)), RevealResult::Expanded { opened: 9 });
    assert!(board.cells().iter().all(|cell| cell.is_revealed()));
}

#[test]
fn first_click_zero_region_opens_with_its_border() {
    let mut board = Board::new(16, 16).unwrap();
    RandomMinePlacer::new(17)
        .place(&mut board, 40, (8, 8))
        .unwrap();

    board.reveal((8, 8));

    // every revealed zero has all neighbors revealed, every hidden cell borders no revealed zero
    for coords in board.iter_coords() {
        let cell = board.cell(coords).unwrap();
        let borders_open_zero = board.iter_neighbors(coords).any(|pos| {
            let neighbor = board.cell(pos).unwrap();
            neighbor.is_revealed() && neighbor.neighbor_mine_count() == 0
        });
        if cell.is_revealed() {
            assert!(!cell.is_mine());
            assert!(borders_open_zero || coords == (8, 8));
        } else {
            assert!(!borders_open_zero, "{coords:?} should have been opened");
        }
    }
}

#[test]
fn mine_reveal_ends_the_session() {
    let mut session = Session::new(Difficulty::Easy, 0).unwrap();
    // column 2 walls off the left side so the first reveal cannot win
    let mines = (0..9).map(|row| (row, 2)).chain([(8, 0)]);
    session
        .reveal_cell_with((0, 8), FixedMinePlacer::new(mines))
        .unwrap();
    let before = session.board().revealed_count();
    assert_eq!(session.status(), GameStatus::InProgress);

    assert_eq!(session.reveal_cell((4, 2)), Ok(RevealOutcome::HitMine));
    assert_eq!(session.board().revealed_count(), before);
    assert_eq!(session.status(), GameStatus::Lost);
    assert!(!session.board().check_win(10));
}

#[test]
fn eight_by_eight_wins_after_all_safe_cells() {
    let mut board = Board::new(8, 8).unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);
    board.place_mines(10, (0, 0), &mut rng).unwrap();

    let safe: Vec<_> = board
        .iter_coords()
        .filter(|&coords| !board.cell(coords).unwrap().is_mine())
        .collect();
    assert_eq!(safe.len(), 54);

    assert!(!board.check_win(10));
    for coords in safe {
        board.reveal(coords);
    }

    assert_eq!(board.revealed_count(), 54);
    assert!(board.check_win(10));
}

#[test]
fn random_games_end_in_a_win_or_a_loss() {
    for seed in 0..30 {
        let mut session = Session::new(Difficulty::Medium, seed).unwrap();
        let (rows, cols) = session.board().size();
        'play: for row in 0..rows {
            for col in 0..cols {
                match session.reveal_cell((row, col)) {
                    Ok(outcome) if outcome.is_final() => break 'play,
                    Ok(_) => {}
                    Err(err) => panic!("unexpected {err} at {row},{col}"),
                }
            }
        }

        let board = session.board();
        match session.status() {
            GameStatus::Won => assert_eq!(board.revealed_count(), 216),
            GameStatus::Lost => assert!(board.revealed_count() < 216),
            status => panic!("game should have ended, got {status:?}"),
        }
    }
}
