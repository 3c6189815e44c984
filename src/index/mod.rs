// Vector index module
// In-memory store of (chunk text, embedding) pairs with cosine top-k search
// and a versioned byte serialization for persistence

#[cfg(test)]
mod tests;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::provider::EmbeddingProvider;
use crate::{QaError, Result};

/// Bumped whenever the serialized layout changes; older blobs are rejected
/// and the caller rebuilds from document content.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// A chunk's text paired with its embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    pub content: String,
    pub embedding: Vec<f32>,
}

/// Ordered collection of chunk embeddings for one document version.
/// Built once per `process` call and replaced wholesale on rebuild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorIndex {
    format_version: u32,
    embedding_model: String,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Verbatim chunk text
    pub content: String,
    /// Cosine similarity between query and chunk embeddings
    pub score: f32,
    /// Position of the chunk in the source document
    pub chunk_index: usize,
}

impl VectorIndex {
    /// Embed `chunks` and build an index over them. An empty chunk sequence
    /// yields an empty, queryable index. Fails wholesale if any embedding
    /// cannot be produced or the provider returns mismatched dimensions.
    #[inline]
    pub fn build(
        chunks: Vec<String>,
        embedding_model: &str,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        if chunks.is_empty() {
            debug!("Building empty index (no chunks)");
            return Ok(Self {
                format_version: INDEX_FORMAT_VERSION,
                embedding_model: embedding_model.to_string(),
                dimension: 0,
                entries: Vec::new(),
            });
        }

        let embeddings = embedder.embed_batch(&chunks)?;
        if embeddings.len() != chunks.len() {
            return Err(QaError::Index(format!(
                "Embedding count mismatch: {} chunks but {} vectors",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dimension = embeddings[0].len();
        if dimension == 0 {
            return Err(QaError::Index("Provider returned empty vectors".to_string()));
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| {
                if embedding.len() == dimension {
                    Ok(IndexEntry { content, embedding })
                } else {
                    Err(QaError::Index(format!(
                        "Inconsistent embedding dimensions: expected {}, got {}",
                        dimension,
                        embedding.len()
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Built index with {} entries at dimension {}",
            entries.len(),
            dimension
        );

        Ok(Self {
            format_version: INDEX_FORMAT_VERSION,
            embedding_model: embedding_model.to_string(),
            dimension,
            entries,
        })
    }

    /// Return the top `k` entries by descending cosine similarity to
    /// `query`. Ties keep original chunk order. An empty index returns no
    /// results; a query of the wrong dimension is an error.
    #[inline]
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        if query.len() != self.dimension {
            return Err(QaError::Index(format!(
                "Query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .enumerate()
            .map(|(chunk_index, entry)| SearchResult {
                content: entry.content.clone(),
                score: cosine_similarity(query, &entry.embedding),
                chunk_index,
            })
            .collect();

        // Stable sort keeps source order among equal scores.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(k);

        Ok(results)
    }

    /// Serialize to a byte blob suitable for opaque storage.
    #[inline]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(self)
            .context("Failed to serialize vector index")
            .map_err(QaError::Other)?;
        Ok(bytes)
    }

    /// Reconstruct an index from bytes produced by [`Self::to_bytes`].
    /// Rejects unknown format versions and dimension-inconsistent entries.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let index: Self = serde_json::from_slice(bytes)
            .map_err(|e| QaError::Index(format!("Failed to parse vector index: {}", e)))?;

        if index.format_version != INDEX_FORMAT_VERSION {
            warn!(
                "Rejecting index blob with format version {} (expected {})",
                index.format_version, INDEX_FORMAT_VERSION
            );
            return Err(QaError::Index(format!(
                "Unsupported index format version: {}",
                index.format_version
            )));
        }

        if index
            .entries
            .iter()
            .any(|entry| entry.embedding.len() != index.dimension)
        {
            return Err(QaError::Index(
                "Index entry dimension disagrees with recorded dimension".to_string(),
            ));
        }

        Ok(index)
    }

    /// Identifier of the embedding model the index was built with
    #[inline]
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cosine similarity between two equal-length vectors. Zero-magnitude
/// vectors score 0 rather than dividing by zero.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot = x.mul_add(*y, dot);
        norm_a = x.mul_add(*x, norm_a);
        norm_b = y.mul_add(*y, norm_b);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}
