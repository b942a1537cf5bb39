//! Normalization for loosely-typed note inputs.
//!
//! Clients send symptoms as a list or a single string and flow level as a
//! number or numeric string. Normalization happens once at the domain edge;
//! stored records only carry the canonical forms.

use serde::Deserialize;

use super::FlowLevel;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Symptoms as received: a list of items or one free-form string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymptomsInput {
    List(Vec<String>),
    Text(String),
}

impl SymptomsInput {
    /// Collapses the input to a trimmed, comma-joined string.
    ///
    /// List items are trimmed and empty items dropped; an empty result is
    /// None. A plain string is trimmed as-is.
    pub fn normalize(self) -> Option<String> {
        match self {
            SymptomsInput::List(items) => {
                let joined = items
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            SymptomsInput::Text(text) => {
                let trimmed = text.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            }
        }
    }
}

/// Flow level as received: a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlowInput {
    Number(i64),
    Text(String),
}

impl FlowInput {
    /// Parses the input to a validated flow level.
    ///
    /// An empty string counts as absent. Anything that is not an integer in
    /// [1, 5] is `InvalidFlowLevel`.
    pub fn parse(self) -> Result<Option<FlowLevel>, DomainError> {
        match self {
            FlowInput::Number(n) => FlowLevel::new(n).map(Some),
            FlowInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                let numeric = trimmed.parse::<i64>().map_err(|_| {
                    DomainError::new(
                        ErrorCode::InvalidFlowLevel,
                        "Flow level must be between 1 and 5",
                    )
                })?;
                FlowLevel::new(numeric).map(Some)
            }
        }
    }
}

/// Trims a story, mapping empty input to None.
pub fn normalize_story(story: Option<String>) -> Option<String> {
    story.and_then(|s| {
        let trimmed = s.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
