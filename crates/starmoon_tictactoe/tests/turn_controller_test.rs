//! Tests for the `AnyGame` turn controller.

use starmoon_tictactoe::{
    AnyGame, GameStatus, MoveError, Placement, Player, Position, Square, rules,
};

fn play(first: Player, indices: &[usize]) -> AnyGame {
    indices.iter().fold(AnyGame::new(first), |game, &i| {
        let placement = game.place_index(i);
        assert!(placement.is_accepted(), "move {} was rejected", i);
        placement.into_game()
    })
}

#[test]
fn test_top_row_win() {
    let game = play(Player::X, &[0, 4, 1, 3, 2]);

    match game.status() {
        GameStatus::Won { player, line } => {
            assert_eq!(player, Player::X);
            assert_eq!(line.indices(), [0, 1, 2]);
        }
        other => panic!("Expected X to win, got {:?}", other),
    }
    assert_eq!(game.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert_eq!(game.to_move(), None);
}

#[test]
fn test_full_board_draw() {
    // O opens and the board ends as X O X / O X O / O X O.
    let game = play(Player::O, &[1, 0, 3, 2, 5, 4, 6, 7, 8]);

    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.winning_line(), None);
    let expected = [
        Player::X,
        Player::O,
        Player::X,
        Player::O,
        Player::X,
        Player::O,
        Player::O,
        Player::X,
        Player::O,
    ];
    for (square, player) in game.board().squares().iter().zip(expected) {
        assert_eq!(*square, Square::Occupied(player));
    }
}

#[test]
fn test_occupied_square_is_noop() {
    let game = play(Player::X, &[4]);

    match game.clone().place(Position::Center) {
        Placement::Rejected { game: after, reason } => {
            assert_eq!(after, game);
            assert_eq!(reason, MoveError::SquareOccupied(Position::Center));
            assert_eq!(after.to_move(), Some(Player::O));
            assert_eq!(after.status(), GameStatus::InProgress);
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
}

#[test]
fn test_finished_game_rejects_every_move() {
    let game = play(Player::X, &[0, 4, 1, 3, 2]);

    for pos in Position::ALL {
        match game.clone().place(pos) {
            Placement::Rejected { game: after, reason } => {
                assert_eq!(after, game);
                assert_eq!(reason, MoveError::GameOver);
            }
            other => panic!("Finished game accepted {:?}", other),
        }
    }
}

#[test]
fn test_reset_restores_initial_state() {
    for first in Player::ALL {
        let game = play(first, &[0, 4, 1]);
        let reset = game.reset();

        assert_eq!(reset, AnyGame::new(first));
        assert_eq!(reset.to_move(), Some(first));
        assert_eq!(reset.status(), GameStatus::InProgress);
        assert!(reset.history().is_empty());
        assert!(reset.board().squares().iter().all(|s| *s == Square::Empty));
    }
}

/// Walks every reachable game from both openers.
///
/// Checks that accepted moves alternate from the first player, that the
/// reported status always agrees with the rules engine, and that finished
/// games accept nothing.
#[test]
fn test_exhaustive_alternation_and_freeze() {
    fn walk(game: AnyGame, visited: &mut usize) {
        *visited += 1;
        assert_eq!(game.status(), rules::evaluate(game.board()));

        let history = game.history();
        for (i, mov) in history.iter().enumerate() {
            let expected = if i % 2 == 0 {
                game.first_player()
            } else {
                game.first_player().opponent()
            };
            assert_eq!(mov.player, expected);
        }

        if game.is_over() {
            for pos in Position::ALL {
                assert!(!game.clone().place(pos).is_accepted());
            }
            return;
        }

        if let Some(&taken) = history.last() {
            assert_eq!(*game.clone().place(taken.position).game(), game);
        }

        for pos in Position::valid_moves(game.board()) {
            match game.clone().place(pos) {
                Placement::Accepted { game: next, mov } => {
                    assert_eq!(Some(mov.player), game.to_move());
                    walk(next, visited);
                }
                other => panic!("Empty square rejected: {:?}", other),
            }
        }
    }

    for first in Player::ALL {
        let mut visited = 0;
        walk(AnyGame::new(first), &mut visited);
        // Number of move sequences (including the empty one) in tic-tac-toe.
        assert_eq!(visited, 549_946);
    }
}
