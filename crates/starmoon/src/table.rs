//! Application state: the game, both profiles, statistics and sound flag.
//!
//! [`TableState::apply`] is the only way state changes. It returns the side
//! effects the caller must carry out (sounds, persistence), so the state
//! machine itself never touches storage or audio.

use derive_getters::Getters;
use starmoon_tictactoe::{
    AnyGame, GameStatus, Outcome, Placement, Player, PlayerProfile, Position, Statistics, Symbol,
};
use tracing::{debug, info, instrument};

use crate::audio::Cue;
use crate::session_store::{SavedSession, SessionStore};

/// Which screen the table is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Choosing names and symbols.
    Setup,
    /// A game is on the board.
    Playing,
}

/// A user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave setup and begin a game.
    Start,
    /// Mark a cell for the player on turn.
    Place(Position),
    /// Clear the board, keeping statistics.
    Reset,
    /// Return to setup.
    ChangePlayers,
    /// Flip the sound flag.
    ToggleSound,
    /// Set a display name.
    Rename(Player, String),
    /// Choose a palette symbol.
    PickSymbol(Player, Symbol),
}

/// A preference that changed and should be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceChange {
    /// New display name.
    Name(Player, String),
    /// New symbol.
    Symbol(Player, Symbol),
    /// New sound flag.
    Sound(bool),
}

/// Work the caller performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Play a sound.
    Cue(Cue),
    /// Persist the counters.
    SaveStatistics(Statistics),
    /// Persist one preference.
    SavePreference(PreferenceChange),
}

impl Effect {
    /// Writes persistence effects to `store`; cues are ignored.
    #[instrument(skip(store))]
    pub fn persist(&self, store: &SessionStore) {
        match self {
            Effect::Cue(_) => {}
            Effect::SaveStatistics(stats) => store.set_statistics(stats),
            Effect::SavePreference(PreferenceChange::Name(player, name)) => {
                store.set_player_name(*player, name)
            }
            Effect::SavePreference(PreferenceChange::Symbol(player, symbol)) => {
                store.set_player_symbol(*player, *symbol)
            }
            Effect::SavePreference(PreferenceChange::Sound(enabled)) => {
                store.set_sound_enabled(*enabled)
            }
        }
    }
}

/// Everything on screen, owned in one place.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TableState {
    stage: Stage,
    game: AnyGame,
    player_x: PlayerProfile,
    player_o: PlayerProfile,
    statistics: Statistics,
    sound_enabled: bool,
    first_player: Player,
}

impl TableState {
    /// Builds the table from restored values, starting in setup.
    #[instrument(skip(saved))]
    pub fn new(saved: SavedSession, first_player: Player) -> Self {
        Self {
            stage: Stage::Setup,
            game: AnyGame::new(first_player),
            player_x: saved.player_x().clone(),
            player_o: saved.player_o().clone(),
            statistics: *saved.statistics(),
            sound_enabled: *saved.sound_enabled(),
            first_player,
        }
    }

    /// Profile of `player`.
    pub fn profile(&self, player: Player) -> &PlayerProfile {
        match player {
            Player::X => &self.player_x,
            Player::O => &self.player_o,
        }
    }

    fn profile_mut(&mut self, player: Player) -> &mut PlayerProfile {
        match player {
            Player::X => &mut self.player_x,
            Player::O => &mut self.player_o,
        }
    }

    /// True when both names have visible characters.
    pub fn can_start(&self) -> bool {
        self.player_x.has_name() && self.player_o.has_name()
    }

    /// Whose turn it is, if the game is running.
    pub fn to_move(&self) -> Option<Player> {
        self.game.to_move()
    }

    /// Closest palette symbol from `player`'s current one, stepping forward
    /// or backward and skipping the opponent's symbol.
    pub fn neighbour_symbol(&self, player: Player, forward: bool) -> Symbol {
        let taken = *self.profile(player.opponent()).symbol();
        let step = |s: Symbol| if forward { s.next() } else { s.prev() };
        let candidate = step(*self.profile(player).symbol());
        if candidate == taken {
            step(candidate)
        } else {
            candidate
        }
    }

    /// Applies `command`, returning the effects to carry out.
    ///
    /// Commands that do not make sense in the current stage, or that the
    /// game rejects, leave the state untouched and return no effects.
    #[instrument(skip(self), fields(stage = ?self.stage))]
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        let mut effects = match (self.stage, command) {
            (Stage::Setup, Command::Start) => self.start(),
            (Stage::Playing, Command::Place(pos)) => self.place(pos),
            (Stage::Playing, Command::Reset) => {
                self.game = self.game.reset();
                info!(first = %self.first_player, "Board reset");
                vec![Effect::Cue(Cue::Reset)]
            }
            (Stage::Playing, Command::ChangePlayers) => {
                self.stage = Stage::Setup;
                self.game = AnyGame::new(self.first_player);
                info!("Back to player setup");
                Vec::new()
            }
            (_, Command::ToggleSound) => {
                self.sound_enabled = !self.sound_enabled;
                info!(enabled = self.sound_enabled, "Sound toggled");
                vec![Effect::SavePreference(PreferenceChange::Sound(
                    self.sound_enabled,
                ))]
            }
            (Stage::Setup, Command::Rename(player, name)) => {
                self.profile_mut(player).set_name(name.clone());
                vec![Effect::SavePreference(PreferenceChange::Name(player, name))]
            }
            (Stage::Setup, Command::PickSymbol(player, symbol)) => {
                self.pick_symbol(player, symbol)
            }
            (stage, command) => {
                debug!(?stage, ?command, "Command ignored in this stage");
                Vec::new()
            }
        };

        if !self.sound_enabled {
            effects.retain(|e| !matches!(e, Effect::Cue(_)));
        }
        effects
    }

    fn start(&mut self) -> Vec<Effect> {
        if !self.can_start() {
            debug!("Start ignored, a name is blank");
            return Vec::new();
        }
        self.stage = Stage::Playing;
        self.game = AnyGame::new(self.first_player);
        info!(
            x = %self.player_x.label(),
            o = %self.player_o.label(),
            first = %self.first_player,
            "Game started"
        );
        Vec::new()
    }

    fn place(&mut self, pos: Position) -> Vec<Effect> {
        let game = std::mem::take(&mut self.game);
        match game.place(pos) {
            Placement::Rejected { game, reason } => {
                debug!(%reason, position = %pos, "Move ignored");
                self.game = game;
                Vec::new()
            }
            Placement::Accepted { game, mov } => {
                debug!(%mov, "Move placed");
                self.game = game;
                let mut effects = vec![Effect::Cue(Cue::Move)];
                if let Some(outcome) = self.game.status().outcome() {
                    effects.extend(self.finish(outcome));
                }
                effects
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Vec<Effect> {
        self.statistics.record(&outcome);
        info!(
            %outcome,
            x_wins = self.statistics.x_wins(),
            o_wins = self.statistics.o_wins(),
            draws = self.statistics.draws(),
            "Game finished"
        );
        let cue = match outcome {
            Outcome::Winner { .. } => Cue::Win,
            Outcome::Draw => Cue::Draw,
        };
        vec![Effect::SaveStatistics(self.statistics), Effect::Cue(cue)]
    }

    fn pick_symbol(&mut self, player: Player, symbol: Symbol) -> Vec<Effect> {
        if *self.profile(player.opponent()).symbol() == symbol {
            debug!(%player, %symbol, "Symbol already taken by the opponent");
            return Vec::new();
        }
        self.profile_mut(player).set_symbol(symbol);
        vec![Effect::SavePreference(PreferenceChange::Symbol(
            player, symbol,
        ))]
    }

    /// One-line banner for the board screen.
    pub fn banner(&self) -> String {
        match self.game.status() {
            GameStatus::InProgress => match self.to_move() {
                Some(p) => format!("Turn: {}", self.profile(p).label()),
                None => String::new(),
            },
            GameStatus::Won { player, .. } => format!("{} wins!", self.profile(player).label()),
            GameStatus::Draw => "Draw!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> TableState {
        let mut table = TableState::new(SavedSession::default(), Player::X);
        table.apply(Command::Start);
        table
    }

    #[test]
    fn test_place_ignored_during_setup() {
        let mut table = TableState::new(SavedSession::default(), Player::X);
        assert!(table.apply(Command::Place(Position::Center)).is_empty());
        assert!(table.game().history().is_empty());
    }

    #[test]
    fn test_neighbour_symbol_skips_opponent() {
        let table = playing();
        // X holds palette[0], O holds palette[1].
        assert_eq!(
            table.neighbour_symbol(Player::X, true),
            Symbol::from_index(2).expect("palette index")
        );
        assert_eq!(
            table.neighbour_symbol(Player::O, false),
            Symbol::from_index(19).expect("palette index")
        );
    }

    #[test]
    fn test_banner_names_player_on_turn() {
        let table = playing();
        assert_eq!(table.banner(), "Turn: ⭐ Player 1");
    }

    #[test]
    fn test_muted_table_emits_no_cues() {
        let mut table = playing();
        table.apply(Command::ToggleSound);
        let effects = table.apply(Command::Place(Position::Center));
        assert!(effects.is_empty());
    }
}
