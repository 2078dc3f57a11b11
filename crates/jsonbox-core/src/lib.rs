//! jsonbox-core - Core types and traits for the jsonbox client.

pub mod error;
pub mod output;
pub mod query;
pub mod transport;
pub mod types;

pub use error::{Error, InvalidInputError, TransportError};
pub use output::{DeleteOutput, ReadOutput, UpdateOutput};
pub use query::QueryBuilder;
pub use transport::{Method, Request, Response, Transport};
pub use types::BoxUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
