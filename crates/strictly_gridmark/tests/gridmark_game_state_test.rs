//! Tests for the game state machine: construction, move legality, turn order
//! and the end-of-game scenarios.

use strictly_gridmark::{
    GameConfig, GameError, GameErrorKind, GameState, GameStatus, MoveError, Player, Position,
    Square,
};

fn play(game: &mut GameState, moves: &[(usize, usize)]) -> Vec<GameStatus> {
    moves
        .iter()
        .map(|(row, col)| game.apply_move(Position::new(*row, *col)).unwrap())
        .collect()
}

#[test]
fn test_construction_valid_configs() {
    for size in 1..=6 {
        for win_length in 1..=size {
            let game = GameState::new(size, win_length, Player::X).unwrap();
            assert_eq!(game.status(), GameStatus::InProgress);
            assert_eq!(game.moves_played(), 0);
            assert_eq!(game.size(), size);
            assert_eq!(game.win_length(), win_length);
            assert!(game.board().squares().iter().all(|s| *s == Square::Empty));
        }
    }
}

#[test]
fn test_construction_invalid_configs() {
    assert!(GameState::new(0, 0, Player::X).is_err());
    assert!(GameState::new(0, 1, Player::X).is_err());
    assert!(GameState::new(3, 4, Player::X).is_err());
    assert!(GameState::new(3, 0, Player::O).is_err());
}

#[test]
fn test_oversized_board_is_invalid_configuration() {
    for size in [GameConfig::MAX_SIZE + 1, 100_000, 1usize << 33, usize::MAX] {
        let err = GameState::new(size, 1, Player::X).unwrap_err();
        assert_eq!(GameError::from(err).kind(), GameErrorKind::InvalidConfiguration);
    }
}

#[test]
fn test_starting_player_respected() {
    let game = GameState::new(4, 3, Player::O).unwrap();
    assert_eq!(game.current_player(), Player::O);
}

#[test]
fn test_out_of_bounds_edges() {
    let mut game = GameState::classic(Player::X);
    for (row, col) in [(-1, 0), (0, -1), (3, 0), (0, 3), (3, 3), (-1, 3)] {
        let result = game.apply_move_signed(row, col);
        assert!(
            matches!(result, Err(MoveError::OutOfBounds { .. })),
            "({row}, {col}) should be out of bounds"
        );
    }
    assert_eq!(game.moves_played(), 0);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.current_player(), Player::X);
}

#[test]
fn test_row_equal_to_size_rejected() {
    let mut game = GameState::new(4, 3, Player::X).unwrap();
    let result = game.apply_move(Position::new(4, 0));
    assert_eq!(
        result,
        Err(MoveError::OutOfBounds {
            row: 4,
            col: 0,
            size: 4
        })
    );
    assert!(game.apply_move(Position::new(0, 4)).is_err());
    assert_eq!(game.moves_played(), 0);
}

#[test]
fn test_occupied_square_rejected() {
    let mut game = GameState::classic(Player::X);
    game.apply_move(Position::new(1, 1)).unwrap();
    let before = game.board().clone();

    let result = game.apply_move(Position::new(1, 1));
    assert_eq!(result, Err(MoveError::CellOccupied(Position::new(1, 1))));
    assert_eq!(game.board(), &before);
    assert_eq!(game.moves_played(), 1);
    assert_eq!(game.current_player(), Player::O);
}

#[test]
fn test_game_over_rejects_further_moves() {
    let mut game = GameState::classic(Player::X);
    play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert_eq!(game.status(), GameStatus::Won(Player::X));

    let result = game.apply_move(Position::new(2, 2));
    assert_eq!(
        result,
        Err(MoveError::GameAlreadyOver(GameStatus::Won(Player::X)))
    );
    assert_eq!(game.moves_played(), 5);
}

#[test]
fn test_game_over_checked_before_bounds() {
    let mut game = GameState::new(1, 1, Player::X).unwrap();
    game.apply_move(Position::new(0, 0)).unwrap();
    assert!(matches!(
        game.apply_move(Position::new(5, 5)),
        Err(MoveError::GameAlreadyOver(_))
    ));
    assert!(matches!(
        game.apply_move_signed(-1, -1),
        Err(MoveError::GameAlreadyOver(_))
    ));
}

#[test]
fn test_players_alternate() {
    let mut game = GameState::new(4, 4, Player::O).unwrap();
    let mut expected = Player::O;
    for pos in [(0, 0), (1, 1), (2, 2), (3, 0), (0, 3), (2, 1)] {
        assert_eq!(game.current_player(), expected);
        let placed = Position::new(pos.0, pos.1);
        game.apply_move(placed).unwrap();
        assert_eq!(game.board().get(placed), Some(Square::Occupied(expected)));
        expected = expected.opponent();
    }
}

#[test]
fn test_failed_move_does_not_flip_turn() {
    let mut game = GameState::classic(Player::X);
    game.apply_move(Position::new(0, 0)).unwrap();
    let _ = game.apply_move(Position::new(0, 0));
    let _ = game.apply_move(Position::new(9, 9));
    assert_eq!(game.current_player(), Player::O);
}

#[test]
fn test_scenario_main_diagonal_win() {
    let mut game = GameState::new(3, 3, Player::X).unwrap();
    let statuses = play(&mut game, &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    assert_eq!(
        statuses,
        vec![
            GameStatus::InProgress,
            GameStatus::InProgress,
            GameStatus::InProgress,
            GameStatus::InProgress,
            GameStatus::Won(Player::X),
        ]
    );
}

#[test]
fn test_scenario_full_board_draw() {
    // X O X / X O O / O X X: no line of three.
    let mut game = GameState::new(3, 3, Player::X).unwrap();
    let statuses = play(
        &mut game,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 2),
            (2, 2),
        ],
    );
    assert!(statuses[..8].iter().all(|s| *s == GameStatus::InProgress));
    assert_eq!(statuses[8], GameStatus::Draw);
    assert_eq!(game.moves_played(), 9);
}

#[test]
fn test_scenario_listed_sequence_ends_on_diagonal() {
    // A(0,0) B(0,1) A(0,2) B(1,0) A(1,1) B(1,2) A(2,1) B(2,0) A(2,2):
    // A's last mark completes (0,0)-(1,1)-(2,2), so the win is reported
    // ahead of the full board.
    let mut game = GameState::new(3, 3, Player::X).unwrap();
    let statuses = play(
        &mut game,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );
    assert!(statuses[..8].iter().all(|s| *s == GameStatus::InProgress));
    assert_eq!(statuses[8], GameStatus::Won(Player::X));
    assert!(game.board().is_full());
}

#[test]
fn test_scenario_inner_diagonal_on_larger_board() {
    let mut game = GameState::new(4, 3, Player::X).unwrap();
    // X plays elsewhere; O builds (1,1), (2,2), (3,3).
    let statuses = play(&mut game, &[(0, 3), (1, 1), (0, 2), (2, 2), (3, 0), (3, 3)]);
    assert_eq!(statuses[3], GameStatus::InProgress);
    assert_eq!(statuses[4], GameStatus::InProgress);
    assert_eq!(statuses[5], GameStatus::Won(Player::O));
}

#[test]
fn test_win_found_when_line_starts_at_edge() {
    // Completing a run from the far end must count back to column 0.
    let mut game = GameState::new(5, 3, Player::X).unwrap();
    let statuses = play(&mut game, &[(2, 0), (4, 4), (2, 1), (4, 3), (2, 2)]);
    assert_eq!(statuses[4], GameStatus::Won(Player::X));
}

#[test]
fn test_win_found_in_middle_of_run() {
    // The gap is filled last; the run extends in both directions.
    let mut game = GameState::new(5, 4, Player::X).unwrap();
    let statuses = play(
        &mut game,
        &[(0, 1), (4, 0), (3, 4), (4, 1), (2, 3), (4, 4), (1, 2)],
    );
    assert_eq!(statuses[6], GameStatus::Won(Player::X));
}

#[test]
fn test_reset_after_win() {
    let mut game = GameState::classic(Player::X);
    play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert!(game.status().is_over());

    game.reset(Player::O);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.moves_played(), 0);
    assert_eq!(game.current_player(), Player::O);
    assert_eq!(game.size(), 3);
    assert_eq!(game.win_length(), 3);
    assert!(game.board().squares().iter().all(|s| *s == Square::Empty));

    game.apply_move(Position::new(1, 1)).unwrap();
    assert_eq!(
        game.board().get(Position::new(1, 1)),
        Some(Square::Occupied(Player::O))
    );
}
