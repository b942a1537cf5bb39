//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidInput,
    InvalidDateFormat,
    InvalidDate,
    InvalidDateRange,
    InvalidCycleId,
    InvalidMood,
    InvalidFlowLevel,

    // Not found errors
    CycleNotFound,
    NoteNotFound,

    // Conflict errors
    CycleOverlap,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidDateFormat => "INVALID_DATE_FORMAT",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::InvalidCycleId => "INVALID_CYCLE_ID",
            ErrorCode::InvalidMood => "INVALID_MOOD",
            ErrorCode::InvalidFlowLevel => "INVALID_FLOW_LEVEL",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::NoteNotFound => "NOTE_NOT_FOUND",
            ErrorCode::CycleOverlap => "CYCLE_OVERLAP",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with a stable code and a client-safe message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an unauthorized error with the standard message.
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized. Please log in.")
    }

    /// Wraps a storage failure, keeping the driver detail out of the
    /// client-facing taxonomy.
    pub fn database(context: &str, source: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, source))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
