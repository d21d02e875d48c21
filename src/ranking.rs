// Ranking key parsing.
//
// Ranking strings come from a free-text column ("3", "3,2", "" or junk). They
// are turned into a (primary, secondary) integer pair that orders records
// within a category. Parsing never fails: malformed primaries fall back to a
// sentinel that sorts after every real rank, and a missing or malformed
// secondary becomes 0.

use std::fmt;

use serde::Serialize;

/// Primary value used when the leading part of a ranking string is not an integer.
pub const RANK_SENTINEL: i64 = 9999;

/// Lexicographically ordered `(primary, secondary)` pair.
///
/// Field order matters: the derived `Ord` compares `primary` first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RankingKey {
    pub primary: i64,
    pub secondary: i64,
}

impl RankingKey {
    pub const fn new(primary: i64, secondary: i64) -> Self {
        Self { primary, secondary }
    }

    /// Parse a ranking string. Trims, splits on the first comma and parses
    /// each side as an integer, using the documented fallbacks on failure.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (head, tail) = match text.split_once(',') {
            Some((head, tail)) => (head, Some(tail)),
            None => (text, None),
        };

        let primary = parse_int(head).unwrap_or(RANK_SENTINEL);
        let secondary = tail.and_then(parse_int).unwrap_or(0);

        Self { primary, secondary }
    }

    /// True when the primary part fell back to the sentinel.
    pub fn is_unranked(&self) -> bool {
        self.primary == RANK_SENTINEL
    }
}

impl From<&str> for RankingKey {
    fn from(text: &str) -> Self {
        RankingKey::parse(text)
    }
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.primary, self.secondary)
    }
}

fn parse_int(part: &str) -> Option<i64> {
    part.trim().parse::<i64>().ok()
}
