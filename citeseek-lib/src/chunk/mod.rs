//! Document chunking strategies
//!
//! Two interchangeable policies split a document into retrievable passages:
//! - [`SentenceChunker`]: sentence-aware packing (canonical). Keeps section
//!   headers intact inside one chunk, which the citation formatter relies on.
//! - [`WindowChunker`]: fixed-width word window with overlap, no sentence
//!   awareness. Baseline alternative behind the same contract.
//!
//! Every chunk produced by either strategy has a trimmed length above
//! [`MIN_CHUNK_LEN`]; near-empty fragments such as a lone heading are dropped.
//!
//! # Implementing a Chunker
//!
//! ```ignore
//! use citeseek_lib::chunk::Chunker;
//!
//! struct MyChunker { /* ... */ }
//!
//! impl Chunker for MyChunker {
//!     fn chunk(&self, text: &str) -> Vec<String> {
//!         // Your chunking logic here
//!         todo!()
//!     }
//!     fn name(&self) -> &'static str { "mine" }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Chunks at or below this trimmed length are discarded.
pub const MIN_CHUNK_LEN: usize = 50;

/// A retrievable unit of document text.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Chunk {
    /// Position within one ingestion batch, dense from 0
    pub sequence_id: usize,
    /// The passage text
    pub text: String,
    /// Provenance carried into the index
    pub metadata: ChunkMetadata,
}

/// Metadata attached to a chunk and persisted alongside its embedding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ChunkMetadata {
    /// Same as the chunk's sequence id
    pub chunk_id: usize,
    /// Title of the source document, when known
    pub document_title: Option<String>,
    /// Section reference precomputed at ingestion, when configured
    pub section_label: Option<String>,
}

/// Trait for document chunking strategies
pub trait Chunker: Send + Sync {
    /// Split text into passage strings.
    ///
    /// Returned passages all have trimmed length above [`MIN_CHUNK_LEN`].
    /// Empty input yields an empty vector.
    fn chunk(&self, text: &str) -> Vec<String>;

    /// Returns the name of this chunking strategy
    fn name(&self) -> &'static str;
}

impl Chunker for Box<dyn Chunker> {
    fn chunk(&self, text: &str) -> Vec<String> {
        self.as_ref().chunk(text)
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}

/// Drop fragments too short to be retrievable passages.
fn retain_substantial(chunks: Vec<String>) -> Vec<String> {
    chunks
        .into_iter()
        .filter(|c| c.trim().len() > MIN_CHUNK_LEN)
        .collect()
}

mod sentence;
mod window;

pub use sentence::*;
pub use window::*;
