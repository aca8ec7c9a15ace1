use super::*;
use crate::error::Error;
use crate::game::Game;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::One.opponent(), Player::Two);
    assert_eq!(Player::Two.opponent(), Player::One);
    assert_eq!(Player::One.index(), 0);
    assert_eq!(Player::Two.index(), 1);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(3, 4);
    assert_eq!(pos.to_index(7), 25);
    assert_eq!(Pos::from_index(25, 7), pos);
    // Non-square board
    assert_eq!(Pos::new(1, 2).to_index(5), 7);
    assert_eq!(Pos::from_index(7, 5), Pos::new(1, 2));
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0, 7, 7));
    assert!(Pos::is_valid(6, 6, 7, 7));
    assert!(!Pos::is_valid(-1, 0, 7, 7));
    assert!(!Pos::is_valid(0, 7, 7, 7));
    assert!(Pos::is_valid(2, 4, 5, 3));
    assert!(!Pos::is_valid(3, 0, 5, 3));
}

#[test]
fn test_pos_manhattan() {
    assert_eq!(Pos::new(0, 0).manhattan(Pos::new(2, 3)), 5);
    assert_eq!(Pos::new(4, 1).manhattan(Pos::new(1, 4)), 6);
    assert_eq!(Pos::new(2, 2).manhattan(Pos::new(2, 2)), 0);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 6) < Pos::new(1, 0));
}

#[test]
fn test_invalid_board_size() {
    assert!(matches!(
        Board::new(0, 5),
        Err(Error::InvalidBoardSize { width: 0, height: 5 })
    ));
    assert!(Board::new(256, 3).is_err());
    assert!(Board::new(1, 1).is_ok());
}

#[test]
fn test_first_move_any_blank_cell() {
    let board = Board::default();
    assert_eq!(board.width(), DEFAULT_SIZE);
    assert_eq!(board.active_player(), Player::One);
    assert_eq!(board.legal_moves(Player::One).len(), 49);

    let board = board.forecast_move(Pos::new(3, 3));
    assert_eq!(board.active_player(), Player::Two);
    // Player two is unplaced: every cell except the one just taken
    let moves = board.legal_moves(Player::Two);
    assert_eq!(moves.len(), 48);
    assert!(!moves.contains(&Pos::new(3, 3)));
}

#[test]
fn test_knight_moves_from_center() {
    let board = Board::from_parts(7, 7, &[], Some(Pos::new(3, 3)), None, Player::One).unwrap();
    let moves = board.legal_moves(Player::One);
    assert_eq!(
        moves,
        vec![
            Pos::new(1, 2),
            Pos::new(1, 4),
            Pos::new(2, 1),
            Pos::new(2, 5),
            Pos::new(4, 1),
            Pos::new(4, 5),
            Pos::new(5, 2),
            Pos::new(5, 4),
        ]
    );
}

#[test]
fn test_knight_moves_clipped_and_blocked() {
    let board = Board::from_parts(
        7,
        7,
        &[Pos::new(2, 1)],
        Some(Pos::new(0, 0)),
        Some(Pos::new(6, 6)),
        Player::One,
    )
    .unwrap();
    assert_eq!(board.legal_moves(Player::One), vec![Pos::new(1, 2)]);
    assert_eq!(board.blocked_count(), 3);
}

#[test]
fn test_forecast_is_pure() {
    let board = Board::default();
    let next = board.forecast_move(Pos::new(0, 0));
    assert_eq!(board.blocked_count(), 0);
    assert_eq!(board.player_location(Player::One), None);
    assert_eq!(next.blocked_count(), 1);
    assert_eq!(next.player_location(Player::One), Some(Pos::new(0, 0)));
}

#[test]
fn test_visited_cells_stay_blocked() {
    let mut board = Board::new(5, 5).unwrap();
    board.apply_move(Pos::new(0, 0)).unwrap();
    board.apply_move(Pos::new(4, 4)).unwrap();
    board.apply_move(Pos::new(1, 2)).unwrap();
    assert!(!board.is_blank(Pos::new(0, 0)));
    assert!(!board.is_blank(Pos::new(1, 2)));
    assert_eq!(board.blocked_count(), 3);
    // Player one cannot jump back to its old cell
    board.apply_move(Pos::new(2, 3)).unwrap();
    assert!(!board.legal_moves(Player::One).contains(&Pos::new(0, 0)));
}

#[test]
fn test_apply_illegal_move() {
    let mut board = Board::new(5, 5).unwrap();
    board.apply_move(Pos::new(2, 2)).unwrap();
    assert!(matches!(
        board.apply_move(Pos::new(2, 2)),
        Err(Error::IllegalMove { .. })
    ));
    assert!(matches!(
        board.apply_move(Pos::new(9, 0)),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(board.active_player(), Player::Two);
}

#[test]
fn test_loser_and_winner() {
    // Player two at (0,0) with both knight exits blocked, and to move
    let board = Board::from_parts(
        3,
        3,
        &[Pos::new(1, 2), Pos::new(2, 1)],
        Some(Pos::new(2, 2)),
        Some(Pos::new(0, 0)),
        Player::Two,
    )
    .unwrap();
    assert!(board.is_loser(Player::Two));
    assert!(board.is_winner(Player::One));
    assert!(!board.is_loser(Player::One));
    assert!(!board.is_winner(Player::Two));
}

#[test]
fn test_not_loser_when_not_to_move() {
    // Player one is stuck but it is player two's turn
    let board = Board::from_parts(
        3,
        3,
        &[Pos::new(1, 2), Pos::new(2, 1)],
        Some(Pos::new(0, 0)),
        Some(Pos::new(1, 1)),
        Player::Two,
    )
    .unwrap();
    assert!(!board.is_loser(Player::One));
    assert!(!board.is_winner(Player::Two));
}

#[test]
fn test_from_parts_out_of_bounds() {
    assert!(matches!(
        Board::from_parts(3, 3, &[Pos::new(3, 0)], None, None, Player::One),
        Err(Error::OutOfBounds { .. })
    ));
}

#[test]
fn test_display() {
    let board = Board::from_parts(
        3,
        3,
        &[Pos::new(1, 1)],
        Some(Pos::new(0, 0)),
        Some(Pos::new(2, 2)),
        Player::One,
    )
    .unwrap();
    assert_eq!(board.to_string(), "1 . .\n. # .\n. . 2\n");
}
