//! Chat user identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a user on the chat platform (Telegram user id)
///
/// Keys both the trainer registration and the in-memory dialogue sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatUserId(i64);

impl ChatUserId {
    /// Wrap a platform user id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the platform user id
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatUserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(ChatUserId::new(1), "a");
        assert_eq!(map.get(&ChatUserId::new(1)), Some(&"a"));
        assert!(map.get(&ChatUserId::new(2)).is_none());
    }
}
