// Text extraction module
// Turns an uploaded file (TXT, Markdown, PDF) into plain text for chunking

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, TagEnd};
use tracing::debug;

use crate::{QaError, Result};

/// Supported input formats, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Pdf,
}

impl DocumentFormat {
    #[inline]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("txt") {
            Some(Self::PlainText)
        } else if extension.eq_ignore_ascii_case("md") || extension.eq_ignore_ascii_case("markdown")
        {
            Some(Self::Markdown)
        } else if extension.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

/// Extract plain text from a document file. Unsupported extensions and
/// unreadable files are validation failures surfaced before any pipeline
/// work happens.
#[inline]
pub fn extract_text(path: &Path) -> Result<String> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        QaError::Document(format!(
            "Unsupported file type: {} (expected .txt, .md, or .pdf)",
            path.display()
        ))
    })?;

    debug!("Extracting text from {} as {:?}", path.display(), format);

    match format {
        DocumentFormat::PlainText => Ok(fs::read_to_string(path)?),
        DocumentFormat::Markdown => {
            let raw = fs::read_to_string(path)?;
            Ok(markdown_to_text(&raw))
        }
        DocumentFormat::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| QaError::Document(format!("Failed to extract PDF text: {}", e))),
    }
}

/// Flatten markdown to prose: inline markup is dropped, block boundaries
/// become paragraph breaks so the chunker still sees structure.
#[inline]
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => {
                text.push_str("\n\n");
            }
            _ => {}
        }
    }

    text.trim_end().to_string()
}
