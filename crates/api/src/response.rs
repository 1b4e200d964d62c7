//! Response envelope.
//!
//! Every successful payload is wrapped under a single named key, e.g.
//! `{"movie": {...}}`. Paginated lists add a sibling `"metadata"` key.
//!
//! # Example
//!
//! ```ignore
//! Ok(Json(Envelope::new("movies", movies).with_metadata(metadata)))
//! ```

use greenlight_core::filters::Metadata;
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    payload: T,
    metadata: Option<Metadata>,
}

impl<T> Envelope<T> {
    pub fn new(key: &'static str, payload: T) -> Self {
        Self {
            key,
            payload,
            metadata: None,
        }
    }

    /// Attach pagination metadata. Empty metadata is left out of the output.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.key, &self.payload)?;
        if let Some(metadata) = &self.metadata {
            map.serialize_entry("metadata", metadata)?;
        }
        map.end()
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode the payload stored under `key` in an enveloped JSON document.
    pub fn open(key: &str, bytes: &[u8]) -> Result<T, serde_json::Error> {
        let mut document: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes)?;
        let payload = document
            .remove(key)
            .ok_or_else(|| serde_json::Error::custom(format!("missing envelope key `{key}`")))?;
        serde_json::from_value(payload)
    }
}
