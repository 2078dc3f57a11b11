//! The jsonbox client.

use serde::Serialize;
use tracing::{debug, instrument};

use jsonbox_core::error::InvalidInputError;
use jsonbox_core::output::{DeleteOutput, ReadOutput, UpdateOutput};
use jsonbox_core::transport::{Request, Transport};
use jsonbox_core::types::BoxUrl;
use jsonbox_core::Result;

use crate::transport::HttpTransport;

/// Client for one box on a jsonbox-style remote JSON store.
///
/// The box URL is composed once at construction and never changes, so a
/// client is safe to share and clone across concurrent tasks. All requests
/// go through a single [`Transport`]; substituting a scripted transport
/// gives tests canned responses without touching the network.
///
/// Response bodies come back as raw bytes. Decoding them into typed
/// structures is the caller's concern; the only shape this client ever
/// inspects is the array-body miss signal on [`read`](Client::read).
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    base: BoxUrl,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client with the default reqwest-backed transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable HTTP(S) URL or the
    /// transport cannot be constructed.
    pub fn new(base_url: &str, box_id: &str) -> Result<Self> {
        Self::with_transport(base_url, box_id, HttpTransport::new()?)
    }
}

impl<T: Transport> Client<T> {
    /// Create a client dispatching through the given transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable HTTP(S) URL.
    pub fn with_transport(base_url: &str, box_id: &str, transport: T) -> Result<Self> {
        Ok(Self {
            base: BoxUrl::new(base_url, box_id)?,
            transport,
        })
    }

    /// Returns the composed box URL this client addresses.
    pub fn base_url(&self) -> &BoxUrl {
        &self.base
    }

    /// Create a new record in `collection`.
    ///
    /// Returns the raw response body, which carries the stored record
    /// including its server-assigned `_id`.
    #[instrument(skip(self, doc), fields(base = %self.base))]
    pub async fn create<D>(&self, collection: &str, doc: &D) -> Result<Vec<u8>>
    where
        D: Serialize + ?Sized,
    {
        debug!(collection, "creating record");

        let body = encode_document(doc)?;
        let url = self.base.collection_url(collection);
        let response = self.transport.send(Request::post_json(url, body)).await?;

        Ok(response.body)
    }

    /// Read every record in `collection`, returning the raw response body.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn read_all(&self, collection: &str) -> Result<Vec<u8>> {
        debug!(collection, "reading all records");

        let url = self.base.collection_url(collection);
        let response = self.transport.send(Request::get(url)).await?;

        Ok(response.body)
    }

    /// Read the records in `collection` matching a pre-built query string,
    /// as produced by [`QueryBuilder::build`](jsonbox_core::QueryBuilder::build).
    ///
    /// The query string is appended verbatim, leading `?` included.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn read_by_query(&self, collection: &str, query: &str) -> Result<Vec<u8>> {
        debug!(collection, query, "reading records by query");

        let url = format!("{}{}", self.base.collection_url(collection), query);
        let response = self.transport.send(Request::get(url)).await?;

        Ok(response.body)
    }

    /// Read a single record by id.
    ///
    /// The service reports a miss either with a non-200 status or with a
    /// 200 whose body is a JSON array instead of an object. Both come back
    /// as `found: false`; an array-shaped body is treated as a miss
    /// regardless of its contents.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn read(&self, collection: &str, record_id: &str) -> Result<ReadOutput> {
        debug!(collection, record_id, "reading record");

        let url = self.base.record_url(collection, record_id);
        let response = self.transport.send(Request::get(url)).await?;

        if !response.is_ok() {
            return Ok(ReadOutput {
                body: Vec::new(),
                found: false,
            });
        }

        if serde_json::from_slice::<Vec<serde_json::Value>>(&response.body).is_ok() {
            debug!(collection, record_id, "array-shaped body, treating as miss");
            return Ok(ReadOutput {
                body: Vec::new(),
                found: false,
            });
        }

        Ok(ReadOutput {
            body: response.body,
            found: true,
        })
    }

    /// Update the record `record_id` in `collection` with `doc`.
    ///
    /// On a 200 the record is re-read and the output reflects that
    /// canonical post-update state, not the PUT response body. On any
    /// other status no follow-up read is issued.
    #[instrument(skip(self, doc), fields(base = %self.base))]
    pub async fn update<D>(&self, collection: &str, record_id: &str, doc: &D) -> Result<UpdateOutput>
    where
        D: Serialize + ?Sized,
    {
        debug!(collection, record_id, "updating record");

        let body = encode_document(doc)?;
        let url = self.base.record_url(collection, record_id);
        let response = self.transport.send(Request::put_json(url, body)).await?;

        if !response.is_ok() {
            return Ok(UpdateOutput {
                body: Vec::new(),
                updated: false,
            });
        }

        let read = self.read(collection, record_id).await?;
        Ok(UpdateOutput {
            body: read.body,
            updated: read.found,
        })
    }

    /// Delete the record `record_id` in `collection`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete(&self, collection: &str, record_id: &str) -> Result<DeleteOutput> {
        debug!(collection, record_id, "deleting record");

        let url = self.base.record_url(collection, record_id);
        let response = self.transport.send(Request::delete(url)).await?;

        if !response.is_ok() {
            return Ok(DeleteOutput {
                body: Vec::new(),
                deleted: false,
            });
        }

        Ok(DeleteOutput {
            body: response.body,
            deleted: true,
        })
    }
}

fn encode_document<D>(doc: &D) -> Result<Vec<u8>>
where
    D: Serialize + ?Sized,
{
    serde_json::to_vec(doc).map_err(|e| {
        InvalidInputError::Document {
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use jsonbox_core::error::TransportError;
    use jsonbox_core::transport::{Method, Request, Response, Transport};
    use serde_json::json;

    use super::*;

    /// Replays a fixed script of responses and records every request.
    struct ScriptedTransport {
        responses: Mutex<Vec<Response>>,
        requests: Mutex<Vec<Request>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Response>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: Request) -> std::result::Result<Response, TransportError> {
            self.requests.lock().unwrap().push(request);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(TransportError::Connection {
                    message: "script exhausted".to_string(),
                });
            }
            Ok(responses.remove(0))
        }
    }

    fn response(status: u16, body: &str) -> Response {
        Response {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn client(responses: Vec<Response>) -> Client<ScriptedTransport> {
        Client::with_transport("https://test.com", "box_test", ScriptedTransport::new(responses))
            .unwrap()
    }

    #[tokio::test]
    async fn create_posts_json_and_returns_body_verbatim() {
        let responded = r#"{"_id":"aaaa","name":"taro","_createdOn":"2020-04-26T16:26:13.935Z"}"#;
        let client = client(vec![response(200, responded)]);

        let result = client.create("users", &json!({"name": "taro"})).await.unwrap();
        assert_eq!(result, responded.as_bytes());

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://test.com/box_test/users");
        assert_eq!(requests[0].body.as_deref(), Some(br#"{"name":"taro"}"# as &[u8]));
        assert!(
            requests[0]
                .headers
                .iter()
                .any(|(name, value)| name == "content-type" && value == "application/json")
        );
    }

    #[tokio::test]
    async fn create_normalizes_collection_slashes() {
        let client = client(vec![response(200, "{}")]);

        client.create("/users", &json!({"name": "taro"})).await.unwrap();

        let requests = client.transport.requests();
        assert_eq!(requests[0].url, "https://test.com/box_test/users");
    }

    #[tokio::test]
    async fn read_all_passes_body_through_uninterpreted() {
        // Not valid JSON; this layer must not care.
        let client = client(vec![response(200, "not json at all")]);

        let result = client.read_all("users").await.unwrap();
        assert_eq!(result, b"not json at all");

        let requests = client.transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://test.com/box_test/users");
    }

    #[tokio::test]
    async fn read_by_query_appends_query_string_verbatim() {
        let client = client(vec![response(200, "[]")]);

        client
            .read_by_query("users", "?limit=3&q=age:>=40")
            .await
            .unwrap();

        let requests = client.transport.requests();
        assert_eq!(
            requests[0].url,
            "https://test.com/box_test/users?limit=3&q=age:>=40"
        );
    }

    #[tokio::test]
    async fn read_found_on_object_body() {
        let body = r#"{"_id":"id001","name":"taro"}"#;
        let client = client(vec![response(200, body)]);

        let result = client.read("users", "id001").await.unwrap();
        assert!(result.found);
        assert_eq!(result.body, body.as_bytes());

        let requests = client.transport.requests();
        assert_eq!(requests[0].url, "https://test.com/box_test/users/id001");
    }

    #[tokio::test]
    async fn read_miss_on_non_200() {
        let client = client(vec![response(500, r#"{"_id":"id001"}"#)]);

        let result = client.read("users", "id001").await.unwrap();
        assert!(!result.found);
        assert!(result.body.is_empty());
    }

    #[tokio::test]
    async fn read_miss_on_array_body() {
        let client = client(vec![response(200, r#"[{"_id":"id002","name":"taro"}]"#)]);

        let result = client.read("users", "id001").await.unwrap();
        assert!(!result.found);
        assert!(result.body.is_empty());
    }

    #[tokio::test]
    async fn read_miss_on_empty_array_body() {
        let client = client(vec![response(200, "[]")]);

        let result = client.read("users", "id001").await.unwrap();
        assert!(!result.found);
    }

    #[tokio::test]
    async fn update_returns_follow_up_read_state() {
        let updated_body = r#"{"_id":"id001","name":"updated_taro"}"#;
        let client = client(vec![
            response(200, r#"{"message":"Record updated."}"#),
            response(200, updated_body),
        ]);

        let result = client
            .update("users", "id001", &json!({"name": "updated_taro"}))
            .await
            .unwrap();
        assert!(result.updated);
        assert_eq!(result.body, updated_body.as_bytes());

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(requests[1].url, "https://test.com/box_test/users/id001");
    }

    #[tokio::test]
    async fn rejected_update_skips_follow_up_read() {
        let client = client(vec![response(400, r#"{"message":"Invalid record id."}"#)]);

        let result = client
            .update("users", "id001", &json!({"name": "taro"}))
            .await
            .unwrap();
        assert!(!result.updated);
        assert!(result.body.is_empty());

        assert_eq!(client.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn delete_acknowledged_on_200() {
        let body = r#"{"message":"Record removed."}"#;
        let client = client(vec![response(200, body)]);

        let result = client.delete("users", "id001").await.unwrap();
        assert!(result.deleted);
        assert_eq!(result.body, body.as_bytes());

        let requests = client.transport.requests();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].url, "https://test.com/box_test/users/id001");
    }

    #[tokio::test]
    async fn delete_rejected_on_non_200() {
        let client = client(vec![response(404, r#"{"message":"Record not found."}"#)]);

        let result = client.delete("users", "id001").await.unwrap();
        assert!(!result.deleted);
        assert!(result.body.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_not_a_miss() {
        let client = client(Vec::new());

        let result = client.read("users", "id001").await;
        assert!(matches!(
            result,
            Err(jsonbox_core::Error::Transport(TransportError::Connection { .. }))
        ));
    }
}
