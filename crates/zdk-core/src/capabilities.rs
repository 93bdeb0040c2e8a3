//! Capability type definitions for provider system
//!
//! Result types returned by the chat and embedding capabilities.

use serde::{Deserialize, Serialize};

/// Embedding vector result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Number of dimensions in the vector
    pub dimensions: usize,
}

impl EmbeddingVector {
    /// Create a new embedding vector
    pub fn new(vector: Vec<f32>) -> Self {
        let dimensions = vector.len();
        Self { vector, dimensions }
    }
}

/// A single, complete text generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,
    /// Model that served the request, as reported by the provider
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_vector() {
        let vector = vec![0.1, 0.2, 0.3];
        let embedding = EmbeddingVector::new(vector.clone());

        assert_eq!(embedding.dimensions, 3);
        assert_eq!(embedding.vector, vector);
    }
}
