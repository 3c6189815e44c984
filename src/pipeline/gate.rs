use tracing::debug;

use crate::index::SearchResult;

/// Default minimum question/chunk similarity for a chunk to count as
/// relevant
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.5;

/// Keep only retrieved chunks whose similarity to the question exceeds
/// `threshold`, preserving retrieval order.
///
/// Top-k retrieval returns the nearest chunks even when the whole document
/// is unrelated to the question; this filter is what stands between that and
/// a fabricated answer. The scores already are question/chunk cosine
/// similarities, so no further embedding work is needed here.
#[inline]
pub fn filter_relevant(results: Vec<SearchResult>, threshold: f32) -> Vec<SearchResult> {
    let total = results.len();
    let relevant: Vec<SearchResult> = results
        .into_iter()
        .filter(|result| result.score > threshold)
        .collect();

    debug!(
        "Relevance gate kept {}/{} chunks at threshold {}",
        relevant.len(),
        total,
        threshold
    );

    relevant
}

/// True iff at least one retrieved chunk clears `threshold`.
#[inline]
pub fn is_relevant(results: &[SearchResult], threshold: f32) -> bool {
    results.iter().any(|result| result.score > threshold)
}
