//! CiteSeek - retrieval-augmented question answering over a single document
//!
//! # Architecture
//!
//! ```text
//! Document -> Chunker -> Embedder -> IndexStore
//!                                        |
//! Query -> Embedder -> retrieve <--------+
//!                          |
//!             AnswerExtractor + CitationFormatter
//!                          |
//!                    SearchResults
//! ```
//!
//! # Example
//!
//! ```ignore
//! use citeseek_lib::{
//!     chunk::SentenceChunker, document::Document, embed::MpnetEmbedder,
//!     search::SearchEngine, store::MemoryStore,
//! };
//!
//! let doc = Document::from_path("data/policy.txt")?;
//!
//! let mut engine = SearchEngine::new(
//!     SentenceChunker::default(),
//!     MpnetEmbedder::new()?,
//!     MemoryStore::new(),
//! );
//!
//! // Index the document (reset + add)
//! engine.reload(&doc)?;
//!
//! // Ask a question
//! let results = engine.search("How many levels is data classified?", 3)?;
//! for r in &results {
//!     println!("{:.2} {} [{}]", r.similarity, r.answer, r.citation);
//! }
//! ```

pub mod chunk;
pub mod cite;
pub mod document;
pub mod embed;
pub mod error;
pub mod extract;
pub mod search;
pub mod store;

pub use error::{Error, Result};
