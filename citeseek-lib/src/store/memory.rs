use std::collections::HashSet;

use crate::store::{nearest, Hit, IndexEntry, IndexStore};
use crate::{Error, Result};

/// In-memory index store for development and testing.
///
/// Uses brute-force cosine distance search. Suitable for small collections
/// (< 10k entries); use [`DiskStore`](crate::store::DiskStore) when the
/// collection must survive the process.
pub struct MemoryStore {
    entries: Vec<IndexEntry>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore for MemoryStore {
    fn reset(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn add(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        let mut ids: HashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
        for entry in &entries {
            if !ids.insert(&entry.id) {
                return Err(Error::Store(format!(
                    "duplicate entry id '{}': reset the collection before re-ingesting",
                    entry.id
                )));
            }
        }

        self.entries.extend(entries);
        Ok(())
    }

    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Hit>> {
        Ok(nearest(&self.entries, embedding, k))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkMetadata;

    fn entry(id: &str, text: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            text: text.to_string(),
            embedding,
            metadata: ChunkMetadata::default(),
        }
    }

    #[test]
    fn test_add_and_len() {
        let mut store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());

        store
            .add(vec![
                entry("doc_0", "hello", vec![1.0, 0.0]),
                entry("doc_1", "world", vec![0.0, 1.0]),
            ])
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_query_ascending_distance() {
        let mut store = MemoryStore::new();
        store
            .add(vec![
                entry("doc_0", "far away", vec![0.0, 1.0, 0.0]),
                entry("doc_1", "very close", vec![1.0, 0.0, 0.0]),
                entry("doc_2", "medium", vec![0.5, 0.5, 0.0]),
            ])
            .unwrap();

        let hits = store.query(&[1.0, 0.0, 0.0], 3).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].text, "very close");
        assert_eq!(hits[1].text, "medium");
        assert_eq!(hits[2].text, "far away");
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[test]
    fn test_query_respects_k() {
        let mut store = MemoryStore::new();
        store
            .add(vec![
                entry("doc_0", "a", vec![1.0, 0.0]),
                entry("doc_1", "b", vec![0.9, 0.1]),
                entry("doc_2", "c", vec![0.8, 0.2]),
            ])
            .unwrap();

        let hits = store.query(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_query_k_larger_than_collection() {
        let mut store = MemoryStore::new();
        store
            .add(vec![entry("doc_0", "only one", vec![1.0, 0.0])])
            .unwrap();

        let hits = store.query(&[1.0, 0.0], 100).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_query_empty_collection() {
        let store = MemoryStore::new();
        let hits = store.query(&[1.0, 0.0], 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut store = MemoryStore::new();
        store.reset().unwrap();
        store.reset().unwrap();
        assert!(store.is_empty());

        store
            .add(vec![entry("doc_0", "hello", vec![1.0])])
            .unwrap();
        assert_eq!(store.len(), 1);

        store.reset().unwrap();
        store.reset().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = MemoryStore::new();
        store
            .add(vec![entry("doc_0", "first", vec![1.0])])
            .unwrap();

        let err = store
            .add(vec![entry("doc_0", "second", vec![1.0])])
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));

        // The collection is unchanged
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_after_reset_reuses_ids() {
        let mut store = MemoryStore::new();
        store
            .add(vec![entry("doc_0", "first", vec![1.0])])
            .unwrap();

        store.reset().unwrap();
        store
            .add(vec![entry("doc_0", "second", vec![1.0])])
            .unwrap();
        assert_eq!(store.len(), 1);
    }
}
