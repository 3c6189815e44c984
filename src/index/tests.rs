use super::*;
use crate::provider::EmbeddingProvider;

/// Embeds each text as a fixed vector looked up by exact content.
struct TableEmbedder {
    vectors: Vec<(&'static str, Vec<f32>)>,
}

impl EmbeddingProvider for TableEmbedder {
    fn embed(&self, text: &str) -> crate::Result<Vec<f32>> {
        self.vectors
            .iter()
            .find(|(t, _)| *t == text)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| crate::QaError::Provider(format!("No vector for text: {}", text)))
    }
}

fn axis_embedder() -> TableEmbedder {
    TableEmbedder {
        vectors: vec![
            ("alpha", vec![1.0, 0.0, 0.0]),
            ("beta", vec![0.0, 1.0, 0.0]),
            ("gamma", vec![0.0, 0.0, 1.0]),
            ("alpha twin", vec![1.0, 0.0, 0.0]),
        ],
    }
}

fn build_index(chunks: &[&str]) -> VectorIndex {
    let chunks: Vec<String> = chunks.iter().map(|c| (*c).to_string()).collect();
    VectorIndex::build(chunks, "test-embed", &axis_embedder()).expect("build should succeed")
}

#[test]
fn empty_chunks_build_empty_index() {
    let index = build_index(&[]);
    assert!(index.is_empty());
    assert_eq!(index.dimension(), 0);

    let results = index.search(&[1.0, 0.0, 0.0], 5).expect("search succeeds");
    assert!(results.is_empty());
}

#[test]
fn search_orders_by_descending_similarity() {
    let index = build_index(&["alpha", "beta", "gamma"]);

    let results = index
        .search(&[0.9, 0.4, 0.1], 3)
        .expect("search should succeed");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].content, "alpha");
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn search_returns_at_most_k() {
    let index = build_index(&["alpha", "beta", "gamma"]);
    let results = index
        .search(&[1.0, 1.0, 1.0], 2)
        .expect("search should succeed");
    assert_eq!(results.len(), 2);
}

#[test]
fn ties_keep_original_chunk_order() {
    let index = build_index(&["beta", "alpha", "alpha twin"]);

    let results = index
        .search(&[1.0, 0.0, 0.0], 3)
        .expect("search should succeed");

    // "alpha" and "alpha twin" both score 1.0; source order decides.
    assert_eq!(results[0].content, "alpha");
    assert_eq!(results[0].chunk_index, 1);
    assert_eq!(results[1].content, "alpha twin");
    assert_eq!(results[1].chunk_index, 2);
}

#[test]
fn query_dimension_mismatch_is_an_error() {
    let index = build_index(&["alpha"]);
    assert!(index.search(&[1.0, 0.0], 1).is_err());
}

#[test]
fn serialization_round_trip_preserves_search_results() {
    let index = build_index(&["alpha", "beta", "gamma"]);
    let query = [0.7, 0.6, 0.2];

    let before = index.search(&query, 3).expect("search should succeed");

    let bytes = index.to_bytes().expect("serialization should succeed");
    let restored = VectorIndex::from_bytes(&bytes).expect("deserialization should succeed");
    assert_eq!(restored, index);

    let after = restored.search(&query, 3).expect("search should succeed");
    assert_eq!(before, after);
}

#[test]
fn from_bytes_rejects_unknown_version() {
    let mut index = build_index(&["alpha"]);
    index.format_version = INDEX_FORMAT_VERSION + 1;
    let bytes = serde_json::to_vec(&index).expect("should serialize");

    assert!(VectorIndex::from_bytes(&bytes).is_err());
}

#[test]
fn from_bytes_rejects_inconsistent_dimensions() {
    let mut index = build_index(&["alpha", "beta"]);
    index.entries[1].embedding.push(0.5);
    let bytes = serde_json::to_vec(&index).expect("should serialize");

    assert!(VectorIndex::from_bytes(&bytes).is_err());
}

#[test]
fn from_bytes_rejects_garbage() {
    assert!(VectorIndex::from_bytes(b"not an index").is_err());
}

#[test]
fn records_embedding_model() {
    let index = build_index(&["alpha"]);
    assert_eq!(index.embedding_model(), "test-embed");
}

#[test]
fn cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}
