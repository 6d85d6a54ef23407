//! High-level ingestion and query pipeline
//!
//! A [`SearchEngine`] is the explicit context object tying the pipeline
//! together: chunker, embedder, index store, answer extractor and citation
//! style. Construct it once and pass it by reference; there is no implicit
//! process-wide instance.
//!
//! # Usage
//!
//! ```ignore
//! use citeseek_lib::search::SearchEngine;
//!
//! let mut engine = SearchEngine::new(chunker, embedder, store);
//! engine.reload(&document)?;            // reset + ingest
//! let results = engine.search("Can public data be shared?", 3)?;
//! ```
//!
//! Mutating operations (`reset`, `ingest`, `reload`) must be serialized by
//! the caller; concurrent reads of a non-mutating engine are safe.

use crate::chunk::{Chunk, ChunkMetadata, Chunker};
use crate::cite::{CitationFormatter, CitationStyle};
use crate::document::Document;
use crate::embed::Embedder;
use crate::extract::AnswerExtractor;
use crate::store::{IndexEntry, IndexStore};
use crate::{Error, Result};

/// A retrieval candidate: one store hit with distance mapped to similarity.
///
/// Valid only for the duration of one search call; never persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The matched passage text
    pub text: String,
    /// `1 - distance`, clamped to [0, 1]; higher is more relevant
    pub similarity: f32,
    /// Metadata stored with the passage
    pub metadata: ChunkMetadata,
}

/// The externally visible unit of a query: passage, score, answer, citation.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched passage text
    pub text: String,
    /// Similarity in [0, 1], non-increasing across a result set
    pub similarity: f32,
    /// Extracted (or heuristic) answer span
    pub answer: String,
    /// Human-readable source reference
    pub citation: String,
}

/// Ingestion + query pipeline over one document collection.
pub struct SearchEngine<C: Chunker, E: Embedder, S: IndexStore> {
    chunker: C,
    embedder: E,
    store: S,
    extractor: AnswerExtractor,
    formatter: CitationFormatter,
}

impl<C: Chunker, E: Embedder, S: IndexStore> SearchEngine<C, E, S> {
    /// Create an engine with heuristic-only answer extraction and
    /// text-derived citations.
    #[must_use]
    pub fn new(chunker: C, embedder: E, store: S) -> Self {
        Self {
            chunker,
            embedder,
            store,
            extractor: AnswerExtractor::heuristic(),
            formatter: CitationFormatter::default(),
        }
    }

    /// Replace the answer extractor (e.g. to attach a QA model).
    #[must_use]
    pub fn with_extractor(mut self, extractor: AnswerExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Select the citation strategy.
    #[must_use]
    pub fn with_citation_style(mut self, style: CitationStyle) -> Self {
        self.formatter = CitationFormatter::new(style);
        self
    }

    /// Delete and recreate the store's collection.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()
    }

    /// Split a document into chunks with dense sequence ids from 0.
    ///
    /// Section labels are precomputed here when the engine is configured
    /// for metadata-derived citations.
    #[must_use]
    pub fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        let title = (!document.title.is_empty()).then(|| document.title.clone());
        let precompute_labels = self.formatter.style() == CitationStyle::MetadataDerived;

        self.chunker
            .chunk(&document.raw_text)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let section_label = precompute_labels
                    .then(|| CitationFormatter::derive(&text, title.as_deref()));
                Chunk {
                    sequence_id: i,
                    metadata: ChunkMetadata {
                        chunk_id: i,
                        document_title: title.clone(),
                        section_label,
                    },
                    text,
                }
            })
            .collect()
    }

    /// Chunk, embed and index a document; returns the number of chunks added.
    ///
    /// Entry ids are `doc_0..doc_n` scoped to this batch, so ingesting into
    /// a non-empty collection fails with a store error; use
    /// [`reload`](Self::reload) for unconditional re-ingestion.
    pub fn ingest(&mut self, document: &Document) -> Result<usize> {
        let chunks = self.chunk_document(document);
        if chunks.is_empty() {
            tracing::warn!(title = %document.title, "document produced no chunks");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts)?;

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry {
                id: format!("doc_{}", chunk.sequence_id),
                text: chunk.text,
                embedding,
                metadata: chunk.metadata,
            })
            .collect();

        let count = entries.len();
        self.store.add(entries)?;

        tracing::info!(
            title = %document.title,
            chunks = count,
            strategy = self.chunker.name(),
            "indexed document"
        );
        Ok(count)
    }

    /// Reset the collection, then ingest the document.
    ///
    /// The reset completes fully before ingestion begins; a failure during
    /// ingestion leaves a structurally valid (possibly partial) collection.
    pub fn reload(&mut self, document: &Document) -> Result<usize> {
        self.reset()?;
        self.ingest(document)
    }

    /// Retrieve up to `k` candidates ranked by descending similarity.
    pub fn retrieve(&mut self, query: &str, k: usize) -> Result<Vec<Candidate>> {
        if k == 0 {
            return Err(Error::InvalidInput("k must be positive".to_string()));
        }

        let query_embedding = self.embedder.embed_query(query)?;
        let hits = self.store.query(&query_embedding, k)?;

        Ok(hits
            .into_iter()
            .map(|hit| {
                let similarity = 1.0 - hit.distance;
                let similarity = if similarity.is_nan() {
                    0.0
                } else {
                    similarity.clamp(0.0, 1.0)
                };
                Candidate {
                    text: hit.text,
                    similarity,
                    metadata: hit.metadata,
                }
            })
            .collect())
    }

    /// Answer a query: retrieve candidates, extract an answer span and
    /// format a citation for each.
    ///
    /// Extraction and citation degrade to heuristics and sentinels, so a
    /// result set is returned whenever retrieval itself succeeds.
    pub fn search(&mut self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let candidates = self.retrieve(query, k)?;
        tracing::debug!(query, candidates = candidates.len(), "retrieved");

        Ok(candidates
            .into_iter()
            .map(|c| {
                let answer = self.extractor.extract(query, &c.text);
                let citation = self.formatter.format(&c.text, &c.metadata);
                SearchResult {
                    text: c.text,
                    similarity: c.similarity,
                    answer,
                    citation,
                }
            })
            .collect())
    }

    /// Returns the number of indexed chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no chunks are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}
