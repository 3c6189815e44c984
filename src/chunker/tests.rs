use super::*;

fn reconstruct(chunks: &[String], overlap: usize) -> String {
    let mut text = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            text.push_str(chunk);
        } else {
            text.extend(chunk.chars().skip(overlap));
        }
    }
    text
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(split("", 100, 20).is_empty());
}

#[test]
fn short_input_yields_single_chunk() {
    let text = "A short paragraph that fits in one chunk.";
    let chunks = split(text, 1000, 200);
    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn split_is_deterministic() {
    let text = "First sentence here. Second sentence there. ".repeat(40);
    let first = split(&text, 120, 30);
    let second = split(&text, 120, 30);
    assert_eq!(first, second);
}

#[test]
fn chunks_respect_size_limit() {
    let text = "Some words separated by spaces ".repeat(60);
    for chunk in split(&text, 100, 20) {
        assert!(chunk.chars().count() <= 100);
    }
}

#[test]
fn overlap_removal_reconstructs_input() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(30);
    let overlap = 20;
    let chunks = split(&text, 150, overlap);
    assert!(chunks.len() > 1);
    assert_eq!(reconstruct(&chunks, overlap), text);
}

#[test]
fn reconstruction_without_overlap() {
    let text = "Line one\nline two\nline three\n".repeat(25);
    let chunks = split(&text, 80, 0);
    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn prefers_paragraph_boundary() {
    let first = "A paragraph that takes up a fair amount of room in the window.";
    let second = "The second paragraph continues with more text than fits alongside the first one.";
    let text = format!("{first}\n\n{second}");
    let chunks = split(&text, 100, 0);
    assert!(chunks[0].ends_with("\n\n"));
    assert_eq!(chunks[0], format!("{first}\n\n"));
}

#[test]
fn prefers_sentence_boundary_over_space() {
    let text = "One short sentence. Another sentence that pushes the text past the cut point for sure.";
    let chunks = split(&text, 40, 0);
    assert!(chunks[0].ends_with(". "));
}

#[test]
fn hard_cut_when_no_separator_exists() {
    let text = "a".repeat(250);
    let chunks = split(&text, 100, 0);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].chars().count(), 100);
    assert_eq!(chunks[1].chars().count(), 100);
    assert_eq!(chunks[2].chars().count(), 50);
}

#[test]
fn counts_characters_not_bytes() {
    // Multibyte characters must not split mid-codepoint or over-count.
    let text = "é".repeat(150);
    let chunks = split(&text, 100, 0);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chars().count(), 100);
    assert_eq!(chunks[1].chars().count(), 50);
}

#[test]
fn overlapping_chunks_share_context() {
    let text = "word ".repeat(100);
    let overlap = 10;
    let chunks = split(&text, 60, overlap);
    assert!(chunks.len() > 1);
    for pair in chunks.windows(2) {
        let tail: String = pair[0]
            .chars()
            .skip(pair[0].chars().count() - overlap)
            .collect();
        let head: String = pair[1].chars().take(overlap).collect();
        assert_eq!(tail, head);
    }
}
