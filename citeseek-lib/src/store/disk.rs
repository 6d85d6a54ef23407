use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::{nearest, Hit, IndexEntry, IndexStore};
use crate::{Error, Result};

/// Name of the single collection a store manages.
const COLLECTION: &str = "documents";

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedCollection {
    version: u32,
    entries: Vec<IndexEntry>,
}

/// Index store persisted as a JSON collection under a fixed local directory.
///
/// The collection is loaded fully into memory on open; queries are
/// brute-force like [`MemoryStore`](crate::store::MemoryStore). Every
/// successful `add` rewrites the collection file, so a crash mid-batch
/// leaves either the previous or the new collection on disk, never a
/// half-written one in memory.
pub struct DiskStore {
    dir: PathBuf,
    entries: Vec<IndexEntry>,
}

impl DiskStore {
    /// Open the collection under `dir`, creating the directory if needed.
    ///
    /// An unreadable or unparsable collection file is a [`Error::Store`];
    /// a missing one simply starts the collection empty.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Store(format!("failed to create {}: {e}", dir.display())))?;

        let mut store = Self {
            dir,
            entries: Vec::new(),
        };

        let path = store.collection_path();
        if path.exists() {
            let data = fs::read_to_string(&path)
                .map_err(|e| Error::Store(format!("failed to read collection: {e}")))?;
            let persisted: PersistedCollection = serde_json::from_str(&data)
                .map_err(|e| Error::Store(format!("failed to parse collection: {e}")))?;
            store.entries = persisted.entries;
            tracing::info!(
                entries = store.entries.len(),
                path = %path.display(),
                "loaded collection"
            );
        }

        Ok(store)
    }

    fn collection_path(&self) -> PathBuf {
        self.dir.join(format!("{COLLECTION}.json"))
    }

    fn persist(&self) -> Result<()> {
        let persisted = PersistedCollection {
            version: FORMAT_VERSION,
            entries: self.entries.clone(),
        };
        let data = serde_json::to_string(&persisted)
            .map_err(|e| Error::Store(format!("failed to serialize collection: {e}")))?;
        fs::write(self.collection_path(), data)
            .map_err(|e| Error::Store(format!("failed to write collection: {e}")))?;
        Ok(())
    }
}

impl IndexStore for DiskStore {
    fn reset(&mut self) -> Result<()> {
        // Deleting a collection that does not exist is not an error
        match fs::remove_file(self.collection_path()) {
            Ok(()) => tracing::debug!("deleted old collection"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Store(format!("failed to delete collection: {e}"))),
        }

        self.entries.clear();
        self.persist()?;
        tracing::debug!("created fresh collection");
        Ok(())
    }

    fn add(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        let mut ids: std::collections::HashSet<&str> =
            self.entries.iter().map(|e| e.id.as_str()).collect();
        for entry in &entries {
            if !ids.insert(&entry.id) {
                return Err(Error::Store(format!(
                    "duplicate entry id '{}': reset the collection before re-ingesting",
                    entry.id
                )));
            }
        }

        self.entries.extend(entries);
        self.persist()
    }

    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Hit>> {
        Ok(nearest(&self.entries, embedding, k))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
