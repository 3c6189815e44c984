// RAG pipeline module
// Orchestrates chunking, embedding, retrieval, relevance gating, and answer
// synthesis. Holds only configuration and provider handles; every call is an
// independent synchronous chain with no per-document state.

pub mod gate;
pub mod synthesizer;


use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chunker;
use crate::config::{Config, PipelineConfig};
use crate::document::Document;
use crate::index::VectorIndex;
use crate::provider::{EmbeddingProvider, GenerationOptions, GenerationProvider, OllamaClient};
use crate::{QaError, Result};

/// Fixed answer returned for documents that have not been processed
pub const NOT_PROCESSED_ANSWER: &str =
    "This document hasn't been processed yet. Please process it before asking questions.";

/// Fixed answer returned when no retrieved chunk clears the relevance gate
pub const NO_RELEVANT_CONTENT_ANSWER: &str =
    "I couldn't find relevant information in the document to answer your question.";

/// A generated answer with the verbatim chunk texts that grounded it.
/// `sources` is empty for the fixed answer states.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<String>,
}

impl QueryResult {
    fn fixed(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Composes the chunker, embedding provider, vector index, relevance gate,
/// and answer synthesizer into the two pipeline entry points.
pub struct RagPipeline {
    config: PipelineConfig,
    embedding_model: String,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn GenerationProvider>,
}

impl RagPipeline {
    #[inline]
    pub fn new(
        config: PipelineConfig,
        embedding_model: String,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            config,
            embedding_model,
            embedder,
            generator,
        }
    }

    /// Build a pipeline backed by the configured Ollama server for both
    /// capabilities.
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(OllamaClient::new(config).map_err(QaError::Other)?);

        Ok(Self::new(
            config.pipeline.clone(),
            config.ollama.embedding_model.clone(),
            Arc::clone(&client) as Arc<dyn EmbeddingProvider>,
            client as Arc<dyn GenerationProvider>,
        ))
    }

    /// Chunk and embed a document's content into a fresh vector index ready
    /// for serialization.
    ///
    /// Empty content is rejected before any provider call. A provider
    /// failure propagates to the caller and leaves no partial index; the
    /// caller is responsible for keeping the document unprocessed in that
    /// case.
    #[inline]
    pub fn process_document(&self, document: &Document) -> Result<VectorIndex> {
        if document.content.trim().is_empty() {
            return Err(QaError::Document(
                "Document content is empty; nothing to process".to_string(),
            ));
        }

        let chunks = chunker::split(
            &document.content,
            self.config.chunk_size,
            self.config.chunk_overlap,
        );

        info!(
            "Processing document '{}': {} chunks from {} characters",
            document.title,
            chunks.len(),
            document.content.chars().count()
        );

        VectorIndex::build(chunks, &self.embedding_model, self.embedder.as_ref())
    }

    /// Answer a question about a processed document.
    ///
    /// Unprocessed documents yield the fixed not-processed answer without
    /// touching any provider. When no retrieved chunk clears the relevance
    /// gate, the fixed no-relevant-content answer comes back with empty
    /// sources and no generation call is made.
    #[inline]
    pub fn answer_question(&self, document: &Document, question: &str) -> Result<QueryResult> {
        if !document.processed {
            debug!(
                "Document '{}' is not processed; returning fixed answer",
                document.title
            );
            return Ok(QueryResult::fixed(NOT_PROCESSED_ANSWER));
        }

        let index = self.load_or_rebuild_index(document)?;
        let query = self.embedder.embed(question)?;
        let retrieved = index.search(&query, self.config.top_k)?;

        let relevant = gate::filter_relevant(retrieved, self.config.relevance_threshold);
        if relevant.is_empty() {
            info!(
                "No relevant chunks for question against document '{}'",
                document.title
            );
            return Ok(QueryResult::fixed(NO_RELEVANT_CONTENT_ANSWER));
        }

        let sources: Vec<String> = relevant.into_iter().map(|result| result.content).collect();

        let options = GenerationOptions {
            temperature: 0.0,
            max_tokens: self.config.max_answer_tokens,
        };

        let answer = synthesizer::synthesize(question, &sources, self.generator.as_ref(), &options)?;

        Ok(QueryResult { answer, sources })
    }

    /// Load the document's persisted index, falling back to a rebuild when
    /// the blob is absent, unreadable, or was built under a different
    /// embedding model.
    fn load_or_rebuild_index(&self, document: &Document) -> Result<VectorIndex> {
        if let Some(bytes) = document.index_bytes() {
            match VectorIndex::from_bytes(bytes) {
                Ok(index) if index.embedding_model() == self.embedding_model => {
                    debug!(
                        "Loaded persisted index for '{}' ({} entries)",
                        document.title,
                        index.len()
                    );
                    return Ok(index);
                }
                Ok(index) => {
                    warn!(
                        "Persisted index for '{}' was built with model '{}' but '{}' is configured; rebuilding",
                        document.title,
                        index.embedding_model(),
                        self.embedding_model
                    );
                }
                Err(e) => {
                    warn!(
                        "Persisted index for '{}' is unreadable ({}); rebuilding",
                        document.title, e
                    );
                }
            }
        }

        self.process_document(document)
    }
}
