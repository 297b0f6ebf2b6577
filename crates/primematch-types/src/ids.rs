//! Identifiers used throughout PrimeMatch.
//!
//! Orders carry no identifier of their own: an order is identified by its
//! party and its position inside that party's batch.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoundId
// ---------------------------------------------------------------------------

/// Sequential matching-round identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    /// The round that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Party
// ---------------------------------------------------------------------------

/// Which side of the confidential match submitted a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Party {
    Bank,
    Client,
}

impl Party {
    /// Stable byte tag used in batch commitments.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Bank => 0,
            Self::Client => 1,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank => write!(f, "BANK"),
            Self::Client => write!(f, "CLIENT"),
        }
    }
}

// ---------------------------------------------------------------------------
// OrderRef
// ---------------------------------------------------------------------------

/// Identity of an order: its party and its position in the party's batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderRef {
    pub party: Party,
    pub position: usize,
}

impl OrderRef {
    #[must_use]
    pub fn new(party: Party, position: usize) -> Self {
        Self { party, position }
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.party, self.position)
    }
}
