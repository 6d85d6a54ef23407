//! Similarity-searchable index storage
//!
//! An [`IndexStore`] owns the persisted form of chunks: id, text, embedding
//! and metadata. Stores hold one fixed-name collection that `reset`
//! recreates empty; `add` enforces unique ids so re-ingesting without a
//! reset surfaces as an error instead of silently colliding.
//!
//! # Usage
//!
//! ```ignore
//! use citeseek_lib::store::{IndexStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.reset()?;
//! store.add(entries)?;
//!
//! // Nearest neighbors by ascending cosine distance
//! let hits = store.query(&query_embedding, 5)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkMetadata;
use crate::embed::Embedding;
use crate::Result;

/// The persisted form of a chunk, owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Batch-scoped id, `"doc_" + sequence_id`
    pub id: String,
    /// The passage text
    pub text: String,
    /// Embedding of the text
    pub embedding: Embedding,
    /// Provenance metadata
    pub metadata: ChunkMetadata,
}

/// One result of a store query.
#[derive(Debug, Clone)]
pub struct Hit {
    /// The matched passage text
    pub text: String,
    /// Cosine distance to the query, lower is closer
    pub distance: f32,
    /// Metadata stored with the entry
    pub metadata: ChunkMetadata,
}

/// Trait for index storage backends
pub trait IndexStore: Send + Sync {
    /// Delete the collection if present and recreate it empty.
    ///
    /// Idempotent: absence of a collection to delete is not an error, and
    /// calling this on a never-populated store is safe.
    fn reset(&mut self) -> Result<()>;

    /// Insert entries into the collection.
    ///
    /// Returns [`crate::Error::Store`] if any entry id already exists;
    /// callers must `reset` before re-ingesting.
    fn add(&mut self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Return up to `k` entries ordered by ascending distance to `embedding`.
    ///
    /// An empty collection yields an empty vector, not an error.
    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Hit>>;

    /// Get total number of stored entries
    fn len(&self) -> usize;

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Brute-force nearest neighbors over a slice of entries.
pub(crate) fn nearest(entries: &[IndexEntry], embedding: &[f32], k: usize) -> Vec<Hit> {
    let mut hits: Vec<Hit> = entries
        .iter()
        .map(|e| Hit {
            text: e.text.clone(),
            distance: cosine_distance(embedding, &e.embedding),
            metadata: e.metadata.clone(),
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(k);
    hits
}

/// Cosine distance: `1 - cosine_similarity`, in [0, 2].
///
/// A zero-norm vector has no direction and is treated as maximally distant
/// from everything (similarity 0).
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

mod disk;
mod memory;

pub use disk::*;
pub use memory::*;
