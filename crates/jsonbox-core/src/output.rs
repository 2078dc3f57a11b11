//! Operation output types.
//!
//! Single-record operations report misses and rejected writes through a
//! flag rather than an error: the call completed at the transport level,
//! the service just said no. A false flag always pairs with an empty body.

/// Output from reading a single record.
#[derive(Debug, Clone)]
pub struct ReadOutput {
    /// Raw response body; empty when `found` is false.
    pub body: Vec<u8>,

    /// Whether the record exists. False on a non-200 status, and on the
    /// service's array-shaped "no match" body.
    pub found: bool,
}

/// Output from updating a single record.
#[derive(Debug, Clone)]
pub struct UpdateOutput {
    /// Post-update state of the record as returned by the follow-up read;
    /// empty when `updated` is false.
    pub body: Vec<u8>,

    /// Whether the update was accepted and the record re-read.
    pub updated: bool,
}

/// Output from deleting a single record.
#[derive(Debug, Clone)]
pub struct DeleteOutput {
    /// Raw response body; empty when `deleted` is false.
    pub body: Vec<u8>,

    /// Whether the service acknowledged the deletion with a 200.
    pub deleted: bool,
}
