//! Player display profiles: a name and a symbol from the fixed palette.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Player;

/// The glyphs a player may choose from, in picker order.
pub const PALETTE: [&str; 20] = [
    "⭐", "🌙", "❌", "⭕", "🌞", "🔥", "💧", "🌸", "🍀", "⚡", "🎯", "🐱", "🐶", "🦊", "🐸",
    "🍎", "💎", "👑", "🚀", "👻",
];

/// A palette member.
///
/// Construction goes through [`Symbol::parse`] or [`Symbol::from_index`], so
/// a `Symbol` always names a glyph in [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(usize);

impl Symbol {
    /// Returns the symbol at palette index `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PALETTE.len()).then_some(Self(index))
    }

    /// Looks a glyph up in the palette.
    #[instrument]
    pub fn parse(glyph: &str) -> Option<Self> {
        PALETTE.iter().position(|g| *g == glyph).map(Self)
    }

    /// The default symbol for a seat.
    pub fn default_for(player: Player) -> Self {
        match player {
            Player::X => Self(0),
            Player::O => Self(1),
        }
    }

    /// The glyph text.
    pub fn glyph(self) -> &'static str {
        PALETTE[self.0]
    }

    /// Palette index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Next glyph in the palette, wrapping around.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % PALETTE.len())
    }

    /// Previous glyph in the palette, wrapping around.
    pub fn prev(self) -> Self {
        Self((self.0 + PALETTE.len() - 1) % PALETTE.len())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{}' is not in the symbol palette", value))
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.glyph().to_string()
    }
}

/// How a seat is presented: free-form name plus a palette symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerProfile {
    name: String,
    symbol: Symbol,
}

impl PlayerProfile {
    /// Creates a profile.
    pub fn new(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            name: name.into(),
            symbol,
        }
    }

    /// Default profile for a seat ("Player 1" / "Player 2").
    #[instrument]
    pub fn default_for(player: Player) -> Self {
        let name = match player {
            Player::X => "Player 1",
            Player::O => "Player 2",
        };
        Self::new(name, Symbol::default_for(player))
    }

    /// True when the name has visible characters.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the symbol.
    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    /// "<symbol> <name>" for banners.
    pub fn label(&self) -> String {
        format!("{} {}", self.symbol, self.name.trim())
    }
}
