//! reqwest-backed transport implementation.

use async_trait::async_trait;

use jsonbox_core::error::TransportError;
use jsonbox_core::transport::{Method, Request, Response, Transport};

/// Default transport dispatching requests through a shared reqwest client.
///
/// Cloning is cheap; the underlying connection pool is shared. Timeouts,
/// proxies, and TLS configuration are inherited from the wrapped reqwest
/// client, so callers needing a policy build their own client and pass it
/// through [`HttpTransport::from_client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the library's default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jsonbox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self { client })
    }

    /// Wrap a caller-configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // bytes() drains the body to completion, releasing the connection
        // even when the caller discards the response.
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}
