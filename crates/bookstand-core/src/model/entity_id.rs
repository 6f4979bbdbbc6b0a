// ── Core identity type ──
//
// Calibre-backed servers hand out integer ids, but ids arriving from a
// fragment route or a hand-edited record may be arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for books and shelves.
///
/// Integer-looking strings always normalize to `Numeric`, so `"42"` from a
/// route and `42` from the server compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Key(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Key(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Key(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn integer_strings_become_numeric() {
        assert_eq!(EntityId::from("42"), EntityId::Numeric(42));
        assert_eq!(EntityId::from(" 7 "), EntityId::Numeric(7));
    }

    #[test]
    fn other_strings_stay_keys() {
        let id: EntityId = "abc-1".parse().unwrap();
        assert_eq!(id, EntityId::Key("abc-1".into()));
    }

    #[test]
    fn display_round_trips_numeric() {
        assert_eq!(EntityId::Numeric(99).to_string(), "99");
    }

    #[test]
    fn numeric_sorts_before_keys() {
        let mut ids = vec![EntityId::from("b"), EntityId::from(3), EntityId::from(1)];
        ids.sort();
        assert_eq!(ids, vec![EntityId::from(1), EntityId::from(3), EntityId::from("b")]);
    }
}
