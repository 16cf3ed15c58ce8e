//! Block reclamation policies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What a pool does with a block whose last live cell was just released.
///
/// A cell address identifies exactly one block, so [`Lifo`](Self::Lifo)
/// and [`Fifo`](Self::Fifo) always remove the same block. They differ only
/// in the direction the pool scans its insertion-ordered block list to
/// find it: from the oldest block, or from the newest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReclamationPolicy {
    /// Keep empty blocks for reuse until the pool is dropped.
    #[default]
    None,
    /// Remove the emptied block, scanning from the oldest block.
    Lifo,
    /// Remove the emptied block, scanning from the newest block.
    Fifo,
}

impl ReclamationPolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 3] = [Self::None, Self::Lifo, Self::Fifo];

    /// Whether emptied blocks are removed from the pool.
    pub fn reclaims(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lifo => "lifo",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for ReclamationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognised policy name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown reclamation policy '{0}' (expected none, lifo or fifo)")]
pub struct ParsePolicyError(pub String);

impl FromStr for ReclamationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lifo" => Ok(Self::Lifo),
            "fifo" => Ok(Self::Fifo),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}
