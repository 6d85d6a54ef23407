//! Text embedding using local models
//!
//! The same model embeds chunk text at ingestion and query text at search
//! time, so both live in one vector space.
//!
//! # Usage
//!
//! ```ignore
//! use citeseek_lib::embed::{Embedder, MpnetEmbedder};
//!
//! let mut embedder = MpnetEmbedder::new()?;
//!
//! // Embed passages (for indexing)
//! let doc_embeddings = embedder.embed_documents(&["1.1 Public data...", "2.1 All LLM usage..."])?;
//!
//! // Embed a query (for searching)
//! let query_embedding = embedder.embed_query("Can public data be shared?")?;
//! ```

use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding models
pub trait Embedder: Send + Sync {
    /// Embed multiple passages for indexing
    ///
    /// Passages may be batched for efficiency.
    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Embed a single query for searching
    fn embed_query(&mut self, text: &str) -> Result<Embedding>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

mod mpnet;
pub use mpnet::*;
