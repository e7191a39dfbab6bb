//! Tests for the typestate game phases.

use starmoon_tictactoe::{
    GameInProgress, GameResult, GameSetup, Move, MoveError, Outcome, Player, Position,
};

#[test]
fn test_typestate_lifecycle() {
    let game = GameSetup::new();
    assert!(game.board().squares().iter().all(|s| s.player().is_none()));

    let game = game.start(Player::X);
    assert_eq!(game.to_move(), Player::X);

    let action = Move::new(Player::X, Position::Center);
    let game = match game.make_move(action).expect("Valid move") {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Game shouldn't finish after one move"),
    };

    assert_eq!(game.to_move(), Player::O);
    assert_eq!(game.valid_moves().len(), 8);
}

#[test]
fn test_occupied_square_rejected() {
    let game = GameSetup::new().start(Player::X);

    let game = match game
        .make_move(Move::new(Player::X, Position::Center))
        .expect("Valid move")
    {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Unexpected finish"),
    };

    let result = game.make_move(Move::new(Player::O, Position::Center));
    assert!(matches!(
        result,
        Err(MoveError::SquareOccupied(Position::Center))
    ));
}

#[test]
fn test_second_player_can_open() {
    let game = GameSetup::new().start(Player::O);

    let result = game
        .clone()
        .make_move(Move::new(Player::X, Position::Center));
    assert!(matches!(result, Err(MoveError::WrongPlayer(Player::X))));

    match game.make_move(Move::new(Player::O, Position::Center)) {
        Ok(GameResult::InProgress(g)) => assert_eq!(g.to_move(), Player::X),
        other => panic!("Expected in-progress game, got {:?}", other),
    }
}

#[test]
fn test_win_detection() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::TopRight),
    ];

    match GameInProgress::replay(Player::X, &moves).expect("Valid replay") {
        GameResult::Finished(game) => match game.outcome() {
            Outcome::Winner { player, line } => {
                assert_eq!(*player, Player::X);
                assert_eq!(line.indices(), [0, 1, 2]);
            }
            Outcome::Draw => panic!("Expected a win"),
        },
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_draw_detection() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopRight),
        Move::new(Player::O, Position::TopCenter),
        Move::new(Player::X, Position::BottomCenter),
        Move::new(Player::O, Position::MiddleLeft),
        Move::new(Player::X, Position::MiddleRight),
        Move::new(Player::O, Position::BottomRight),
        Move::new(Player::X, Position::BottomLeft),
    ];

    match GameInProgress::replay(Player::X, &moves).expect("Valid replay") {
        GameResult::Finished(game) => assert_eq!(game.outcome(), &Outcome::Draw),
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_restart() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::TopRight),
    ];

    let GameResult::Finished(game) = GameInProgress::replay(Player::X, &moves).unwrap() else {
        panic!("Game should be finished");
    };

    let new_game = game.restart().start(Player::X);
    assert_eq!(new_game.to_move(), Player::X);
    assert!(new_game.history().is_empty());
    assert_eq!(new_game.valid_moves().len(), 9);
}
