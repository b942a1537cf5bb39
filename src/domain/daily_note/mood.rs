//! Mood vocabulary and menstrual flow level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Fixed five-value mood vocabulary.
///
/// The lowercase Indonesian words are the wire and storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Senang,
    Sedih,
    Kesal,
    Cemas,
    Normal,
}

impl Mood {
    /// All moods, in histogram order.
    pub const ALL: [Mood; 5] = [
        Mood::Senang,
        Mood::Sedih,
        Mood::Kesal,
        Mood::Cemas,
        Mood::Normal,
    ];

    /// Returns the canonical lowercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Senang => "senang",
            Mood::Sedih => "sedih",
            Mood::Kesal => "kesal",
            Mood::Cemas => "cemas",
            Mood::Normal => "normal",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    /// Case-insensitive match against the vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .ok_or_else(|| DomainError::new(ErrorCode::InvalidMood, "Invalid mood value"))
    }
}

/// Menstrual flow level on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowLevel(i16);

impl FlowLevel {
    /// Creates a flow level, rejecting values outside [1, 5].
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(1..=5).contains(&value) {
            return Err(DomainError::new(
                ErrorCode::InvalidFlowLevel,
                "Flow level must be between 1 and 5",
            ));
        }
        Ok(Self(value as i16))
    }

    /// Returns the level as a small integer.
    pub fn value(&self) -> i16 {
        self.0
    }
}
