//! Transport capability for dispatching HTTP requests.
//!
//! Requests and responses are plain data: the client builds a [`Request`],
//! a [`Transport`] implementation performs the round trip, and the full
//! response body comes back as owned bytes with the connection already
//! released. Substituting a scripted transport gives tests canned
//! responses without any network I/O.

use async_trait::async_trait;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method as its wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// A bodyless GET request.
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A bodyless DELETE request.
    pub fn delete(url: String) -> Self {
        Self {
            method: Method::Delete,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST request carrying a JSON body.
    pub fn post_json(url: String, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: json_headers(),
            body: Some(body),
        }
    }

    /// A PUT request carrying a JSON body.
    pub fn put_json(url: String, body: Vec<u8>) -> Self {
        Self {
            method: Method::Put,
            url,
            headers: json_headers(),
            body: Some(body),
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// An HTTP response described as plain data.
///
/// The body has been read to completion by the transport; nothing is left
/// open behind this value.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// The remote protocol reports success with exactly 200, never other
    /// 2xx codes.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Capability for performing one HTTP round trip.
///
/// Implementations must be safe to share across concurrent callers; the
/// client issues every request through one shared instance.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the response with its body fully read.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems (connection refused, DNS,
    /// timeout). A response with a non-200 status is returned as `Ok`.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
