//! Success envelope shared by every endpoint.

use serde::Serialize;

/// Standard success body: a human-readable message plus the payload.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
