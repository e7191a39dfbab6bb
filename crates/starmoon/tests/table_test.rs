//! Tests for the application state machine.

use starmoon::{Command, Cue, Effect, PreferenceChange, SavedSession, Stage, TableState};
use starmoon_tictactoe::{GameStatus, Player, Position, Statistics, Symbol};

fn new_table(first: Player) -> TableState {
    TableState::new(SavedSession::default(), first)
}

fn playing(first: Player) -> TableState {
    let mut table = new_table(first);
    table.apply(Command::Start);
    assert_eq!(*table.stage(), Stage::Playing);
    table
}

/// Places at each index, collecting every effect.
fn place_all(table: &mut TableState, indices: &[usize]) -> Vec<Effect> {
    indices
        .iter()
        .flat_map(|i| {
            let pos = Position::from_index(*i).expect("valid index");
            table.apply(Command::Place(pos))
        })
        .collect()
}

#[test]
fn test_win_records_statistics_and_cues() {
    let mut table = playing(Player::X);
    let effects = place_all(&mut table, &[0, 4, 1, 3, 2]);

    assert_eq!(*table.statistics(), Statistics::new(1, 0, 0));
    assert_eq!(
        &effects[effects.len() - 3..],
        &[
            Effect::Cue(Cue::Move),
            Effect::SaveStatistics(Statistics::new(1, 0, 0)),
            Effect::Cue(Cue::Win),
        ]
    );
    assert!(matches!(
        table.game().status(),
        GameStatus::Won {
            player: Player::X,
            ..
        }
    ));
}

#[test]
fn test_draw_records_draw() {
    let mut table = playing(Player::X);
    let effects = place_all(&mut table, &[0, 4, 2, 1, 7, 3, 5, 8, 6]);

    assert_eq!(table.game().status(), GameStatus::Draw);
    assert_eq!(*table.statistics(), Statistics::new(0, 0, 1));
    assert!(effects.contains(&Effect::Cue(Cue::Draw)));
}

#[test]
fn test_occupied_cell_is_silent_noop() {
    let mut table = playing(Player::X);
    place_all(&mut table, &[4]);
    let before = table.clone();

    assert!(place_all(&mut table, &[4]).is_empty());
    assert_eq!(table, before);
    assert_eq!(table.to_move(), Some(Player::O));
}

#[test]
fn test_finished_game_accepts_no_moves_until_reset() {
    let mut table = playing(Player::X);
    place_all(&mut table, &[0, 4, 1, 3, 2]);
    let finished = table.clone();

    assert!(place_all(&mut table, &[5, 6, 7, 8]).is_empty());
    assert_eq!(table, finished);

    let effects = table.apply(Command::Reset);
    assert_eq!(effects, vec![Effect::Cue(Cue::Reset)]);
    assert!(table.game().history().is_empty());
    assert_eq!(table.to_move(), Some(Player::X));
    assert_eq!(*table.statistics(), Statistics::new(1, 0, 0));
}

#[test]
fn test_statistics_accumulate_across_games() {
    let mut table = playing(Player::O);
    place_all(&mut table, &[0, 4, 1, 3, 2]);
    table.apply(Command::Reset);
    place_all(&mut table, &[0, 4, 1, 3, 2]);
    table.apply(Command::Reset);
    place_all(&mut table, &[1, 0, 3, 2, 5, 4, 6, 7, 8]);

    assert_eq!(*table.statistics(), Statistics::new(0, 2, 1));
}

#[test]
fn test_configured_first_player_opens_every_game() {
    let mut table = playing(Player::O);
    assert_eq!(table.to_move(), Some(Player::O));
    place_all(&mut table, &[4]);
    table.apply(Command::Reset);
    assert_eq!(table.to_move(), Some(Player::O));
}

#[test]
fn test_start_requires_both_names() {
    let mut table = new_table(Player::X);
    table.apply(Command::Rename(Player::O, "  ".to_string()));
    assert!(!table.can_start());

    assert!(table.apply(Command::Start).is_empty());
    assert_eq!(*table.stage(), Stage::Setup);

    table.apply(Command::Rename(Player::O, "Bea".to_string()));
    table.apply(Command::Start);
    assert_eq!(*table.stage(), Stage::Playing);
}

#[test]
fn test_rename_emits_save() {
    let mut table = new_table(Player::X);
    let effects = table.apply(Command::Rename(Player::X, "Ann".to_string()));
    assert_eq!(
        effects,
        vec![Effect::SavePreference(PreferenceChange::Name(
            Player::X,
            "Ann".to_string()
        ))]
    );
    assert_eq!(table.profile(Player::X).name(), "Ann");
}

#[test]
fn test_rename_ignored_while_playing() {
    let mut table = playing(Player::X);
    assert!(
        table
            .apply(Command::Rename(Player::X, "Ann".to_string()))
            .is_empty()
    );
    assert_eq!(table.profile(Player::X).name(), "Player 1");
}

#[test]
fn test_duplicate_symbol_rejected() {
    let mut table = new_table(Player::X);
    let moon = Symbol::default_for(Player::O);
    assert!(table.apply(Command::PickSymbol(Player::X, moon)).is_empty());
    assert_eq!(*table.profile(Player::X).symbol(), Symbol::default_for(Player::X));

    let fox = Symbol::parse("🦊").expect("palette glyph");
    assert_eq!(
        table.apply(Command::PickSymbol(Player::X, fox)),
        vec![Effect::SavePreference(PreferenceChange::Symbol(
            Player::X, fox
        ))]
    );
}

#[test]
fn test_change_players_returns_to_setup_with_fresh_board() {
    let mut table = playing(Player::X);
    place_all(&mut table, &[0, 4]);
    table.apply(Command::ChangePlayers);

    assert_eq!(*table.stage(), Stage::Setup);
    assert!(table.game().history().is_empty());
}

#[test]
fn test_toggle_sound_persists_and_mutes() {
    let mut table = playing(Player::X);
    assert_eq!(
        table.apply(Command::ToggleSound),
        vec![Effect::SavePreference(PreferenceChange::Sound(false))]
    );

    let effects = place_all(&mut table, &[0, 4, 1, 3, 2]);
    assert_eq!(
        effects,
        vec![Effect::SaveStatistics(Statistics::new(1, 0, 0))]
    );
}
