use itertools::Itertools;
use tracing::debug;

use crate::Result;
use crate::provider::{GenerationOptions, GenerationProvider};

/// The exact sentence the model is instructed to emit when the context does
/// not contain the answer
pub const CONTEXT_FALLBACK_SENTENCE: &str =
    "I cannot find the answer in the provided document.";

/// Render the grounded prompt: relevant chunks joined by blank lines as
/// context, followed by the question and the grounding rules.
#[inline]
pub fn build_prompt(question: &str, chunks: &[String]) -> String {
    let context = chunks.iter().join("\n\n");

    format!(
        "You are answering a question about a document. Use only the context below.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Rules:\n\
         - Answer strictly from the context above.\n\
         - If the context does not contain the answer, reply exactly: \"{CONTEXT_FALLBACK_SENTENCE}\"\n\
         - Do not use outside or general knowledge.\n\
         \n\
         Answer:"
    )
}

/// Produce a grounded answer from the relevant chunks. Sampling is
/// deterministic (temperature 0) with a bounded output length; the generated
/// text is returned verbatim.
#[inline]
pub fn synthesize(
    question: &str,
    chunks: &[String],
    generator: &dyn GenerationProvider,
    options: &GenerationOptions,
) -> Result<String> {
    let prompt = build_prompt(question, chunks);

    debug!(
        "Synthesizing answer from {} chunks (prompt length: {})",
        chunks.len(),
        prompt.len()
    );

    generator.generate(&prompt, options)
}
