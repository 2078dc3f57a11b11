//! Box URL type.

use std::fmt;

use url::Url;

use crate::error::{Error, InvalidInputError};

use super::path;

/// The composed base URL of one box on a jsonbox service.
///
/// Built once from the service base URL and the box id, with each piece
/// normalized independently so that any mix of leading/trailing slashes
/// yields the same composition. The result never carries a trailing `/`;
/// collection and record URLs are derived from it by segment joining.
///
/// # Example
///
/// ```
/// use jsonbox_core::BoxUrl;
///
/// let base = BoxUrl::new("https://jsonbox.io/", "box_x").unwrap();
/// assert_eq!(base.as_str(), "https://jsonbox.io/box_x");
/// assert_eq!(base.record_url("users", "id001"), "https://jsonbox.io/box_x/users/id001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxUrl {
    full: String,
}

impl BoxUrl {
    /// Compose a box URL from a service base URL and a box id.
    ///
    /// The base URL must parse as an absolute `http` or `https` URL with a
    /// host; the box id is an opaque segment and is not validated beyond
    /// slash normalization.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a usable HTTP(S) URL.
    pub fn new(base_url: &str, box_id: &str) -> Result<Self, Error> {
        Self::validate(base_url)?;

        let full = format!(
            "{}{}",
            path::trim_trailing_slash(base_url),
            path::join_segment(box_id)
        );

        Ok(Self { full })
    }

    /// Returns the composed `{base}/{boxId}` URL as a string.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Returns the URL addressing a whole collection.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}{}", self.full, path::join_segment(collection))
    }

    /// Returns the URL addressing a single record within a collection.
    pub fn record_url(&self, collection: &str, record_id: &str) -> String {
        format!(
            "{}{}{}",
            self.full,
            path::join_segment(collection),
            path::join_segment(record_id)
        )
    }

    fn validate(base_url: &str) -> Result<(), Error> {
        let url = Url::parse(base_url).map_err(|e| InvalidInputError::BaseUrl {
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvalidInputError::BaseUrl {
                value: base_url.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: base_url.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BoxUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}

impl AsRef<str> for BoxUrl {
    fn as_ref(&self) -> &str {
        &self.full
    }
}
