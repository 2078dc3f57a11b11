//! Error types for the jsonbox client.
//!
//! Transport failures and invalid caller input are the only error classes.
//! A non-200 status or a miss on a single-record operation is a normal
//! outcome, reported through the flags on the operation's output type, and
//! never surfaces here.

use thiserror::Error;

/// The unified error type for jsonbox operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Input validation errors (invalid base URL, unserializable document).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other HTTP transport failure, including client construction.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// The configured base URL is not a usable absolute HTTP(S) URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// The document could not be serialized to JSON.
    #[error("document could not be serialized: {reason}")]
    Document { reason: String },
}
