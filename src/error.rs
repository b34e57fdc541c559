//! Error types for the instrumented store façade
//!
//! Provides unified error handling using thiserror.

use std::num::{ParseFloatError, ParseIntError};
use std::string::FromUtf8Error;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for store, decode and fetch failures.
///
/// A missing key is never an error: lookups return `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A primitive call to the key-value store failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The key holds a value of the wrong kind for the operation
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// The store rejected the request (bad TTL, non-integer counter, overflow)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Stored bytes could not be decoded by the requested transform
    #[error("Decode failure: {0}")]
    Decode(String),

    /// The underlying resource fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

// == Conversions ==
impl From<FromUtf8Error> for CacheError {
    fn from(err: FromUtf8Error) -> Self {
        CacheError::Decode(err.to_string())
    }
}

impl From<ParseIntError> for CacheError {
    fn from(err: ParseIntError) -> Self {
        CacheError::Decode(err.to_string())
    }
}

impl From<ParseFloatError> for CacheError {
    fn from(err: ParseFloatError) -> Self {
        CacheError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
