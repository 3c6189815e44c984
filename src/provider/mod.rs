// Capability provider module
// Embedding and generation are injected behind object-safe traits so the
// pipeline can run against a remote model server or a test substitute

pub mod ollama;

pub use ollama::OllamaClient;

use crate::Result;

/// Maps text to a fixed-dimension vector. All texts embedded through one
/// provider instance share the same dimension.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order.
    #[inline]
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Produces text from a prompt.
pub trait GenerationProvider: Send + Sync {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// Sampling controls passed to the generation capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    #[inline]
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 512,
        }
    }
}
