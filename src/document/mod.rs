// Document module
// The unit the surrounding application hands to the pipeline: raw text plus
// the processed flag and the opaque serialized index blob

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::index::VectorIndex;

/// A document owned by the caller. The pipeline reads `content` and
/// round-trips the serialized index through `vectorstore_data`; identity and
/// storage location are the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub processed: bool,
    /// Serialized vector index, base64-encoded in text representations
    #[serde(default, with = "blob_encoding")]
    pub vectorstore_data: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create an unprocessed document with a fresh id.
    #[inline]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            processed: false,
            vectorstore_data: None,
            created_at: Utc::now(),
        }
    }

    /// Persist a built index into the blob field and mark the document
    /// processed. Replaces any previous index wholesale.
    #[inline]
    pub fn attach_index(&mut self, index: &VectorIndex) -> Result<()> {
        self.vectorstore_data = Some(index.to_bytes()?);
        self.processed = true;
        Ok(())
    }

    /// The persisted index blob, if any
    #[inline]
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.vectorstore_data.as_deref()
    }
}

/// Serde adapter storing the index blob as base64 text, for storage media
/// that only take strings (JSON sidecars, text columns).
mod blob_encoding {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
