//! Finite-choice selections driven by menu tokens
//!
//! Menus on the chat platform send back an opaque token per button.
//! Every choice enum owns one explicit token table, so parsing is a lookup
//! and the keyboard builder can iterate the same table.

/// A value picked from a fixed menu
pub trait Choice: Sized + Copy + PartialEq + 'static {
    /// Token ↔ variant mapping, in menu order
    const TOKENS: &'static [(&'static str, Self)];

    /// Human-readable label shown on buttons and in summaries
    fn label(self) -> &'static str;

    /// Look up the variant for a menu token
    fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(candidate, _)| *candidate == token)
            .map(|(_, value)| *value)
    }

    /// Menu token for this variant
    fn token(self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, value)| *value == self)
            .map_or("", |(token, _)| token)
    }

    /// All variants in menu order
    fn variants() -> impl Iterator<Item = Self> {
        Self::TOKENS.iter().map(|(_, value)| *value)
    }
}
