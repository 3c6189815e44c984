use super::*;
use std::io::Write as _;
use tempfile::NamedTempFile;

fn temp_file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("should create temp file");
    file.write_all(content.as_bytes())
        .expect("should write temp file");
    file
}

#[test]
fn detects_format_from_extension() {
    assert_eq!(
        DocumentFormat::from_path(Path::new("notes.txt")),
        Some(DocumentFormat::PlainText)
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("README.md")),
        Some(DocumentFormat::Markdown)
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("guide.MARKDOWN")),
        Some(DocumentFormat::Markdown)
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("paper.PDF")),
        Some(DocumentFormat::Pdf)
    );
    assert_eq!(DocumentFormat::from_path(Path::new("image.png")), None);
    assert_eq!(DocumentFormat::from_path(Path::new("no_extension")), None);
}

#[test]
fn plain_text_is_read_verbatim() {
    let file = temp_file_with(".txt", "Line one.\nLine two.\n");
    let text = extract_text(file.path()).expect("extraction should succeed");
    assert_eq!(text, "Line one.\nLine two.\n");
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = temp_file_with(".png", "binary-ish");
    assert!(extract_text(file.path()).is_err());
}

#[test]
fn markdown_flattens_to_prose() {
    let markdown = "# Title\n\nFirst paragraph with *emphasis* and `code`.\n\n- item one\n- item two\n";
    let text = markdown_to_text(markdown);

    assert!(text.contains("Title"));
    assert!(text.contains("First paragraph with emphasis and code."));
    assert!(text.contains("item one"));
    assert!(!text.contains('#'));
    assert!(!text.contains('*'));
    assert!(!text.contains('`'));
}

#[test]
fn markdown_keeps_block_boundaries() {
    let markdown = "# Heading\n\nParagraph one.\n\nParagraph two.";
    let text = markdown_to_text(markdown);

    assert!(text.contains("Heading\n\n"));
    assert!(text.contains("Paragraph one.\n\n"));
    assert!(text.ends_with("Paragraph two."));
}

#[test]
fn markdown_extraction_through_file() {
    let file = temp_file_with(".md", "## Section\n\nBody text here.");
    let text = extract_text(file.path()).expect("extraction should succeed");
    assert!(text.contains("Section"));
    assert!(text.contains("Body text here."));
}
