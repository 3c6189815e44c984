// Text chunker module
// Splits raw document text into bounded, overlapping chunks for embedding

#[cfg(test)]
mod tests;

use tracing::debug;

/// Cut-point candidates, tried largest semantic boundary first. A segment
/// with none of these inside the size window gets a hard character cut.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Split `text` into chunks of at most `chunk_size` characters, each chunk
/// after the first re-reading the final `overlap` characters of its
/// predecessor.
///
/// Cuts prefer the largest separator that fits the window: paragraph break,
/// then line break, then sentence end, then word boundary, then a hard cut.
/// Separators stay attached to the chunk they terminate, so concatenating
/// the chunks minus the shared overlap reproduces the input exactly.
/// Counts are Unicode scalar values, not bytes. Empty input yields no
/// chunks; input within `chunk_size` yields a single chunk equal to the
/// input.
#[inline]
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let overlap = overlap.min(chunk_size - 1);
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let window_end = (start + chunk_size).min(chars.len());
        if window_end == chars.len() {
            chunks.push(chars[start..].iter().collect());
            break;
        }

        let cut = find_cut(&chars, start, window_end);
        chunks.push(chars[start..cut].iter().collect());

        // Re-read `overlap` characters of context, clamped to keep progress
        // when the cut landed close to the chunk start.
        start = cut.saturating_sub(overlap).max(start + 1);
    }

    debug!(
        "Split text of {} chars into {} chunks (size {}, overlap {})",
        chars.len(),
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}

/// Find the cut position in `(start, window_end]`: one past the last
/// occurrence of the highest-priority separator inside the window, or
/// `window_end` for a hard cut when no separator fits.
fn find_cut(chars: &[char], start: usize, window_end: usize) -> usize {
    for sep in SEPARATORS {
        let sep_chars: Vec<char> = sep.chars().collect();
        if window_end - start < sep_chars.len() {
            continue;
        }

        let mut pos = window_end - sep_chars.len();
        loop {
            if chars[pos..pos + sep_chars.len()] == sep_chars[..] {
                return pos + sep_chars.len();
            }
            if pos <= start {
                break;
            }
            pos -= 1;
        }
    }

    window_end
}
