//! CiteSeek CLI - for exercising the document QA library
//!
//! # Commands
//!
//! ```bash
//! # Chunk a document and show results
//! citeseek chunk --strategy sentence policy.txt
//!
//! # Index a document into the persistent collection
//! citeseek ingest policy.txt
//!
//! # Ask a question against the persistent collection
//! citeseek query "How many levels is data classified?"
//!
//! # Demo: index a file in memory and ask in one command
//! citeseek demo policy.txt "Can public data be shared?"
//! ```

use anyhow::Result;
use citeseek_lib::{
    chunk::{Chunker, SentenceChunker, WindowChunker},
    cite::CitationStyle,
    document::Document,
    embed::{Embedder, MpnetEmbedder},
    search::{SearchEngine, SearchResult},
    store::{DiskStore, IndexStore, MemoryStore},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Fixed local path of the persistent collection.
const DB_DIR: &str = "./data/vector_db";

#[derive(Parser)]
#[command(name = "citeseek")]
#[command(about = "Retrieval-augmented question answering over a document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a document using the specified strategy
    Chunk {
        /// Input file to chunk
        input: String,

        /// Chunking strategy: "sentence" or "window"
        #[arg(short, long, default_value = "sentence")]
        strategy: String,

        /// Max chunk size (sentence) / window size in words (window)
        #[arg(long, default_value = "200")]
        size: usize,

        /// Word overlap (window strategy only)
        #[arg(long, default_value = "8")]
        overlap: usize,
    },

    /// Index a document into the persistent collection (reset + add)
    Ingest {
        /// Input file to index
        input: String,

        /// Chunking strategy
        #[arg(short, long, default_value = "sentence")]
        strategy: String,

        /// Precompute section labels at ingestion
        #[arg(long)]
        precompute_citations: bool,
    },

    /// Ask a question against the persistent collection
    Query {
        /// The question
        query: String,

        /// Number of results to return
        #[arg(short, long, default_value = "3")]
        k: usize,
    },

    /// Demo: index a file in memory and ask a question (all in one command)
    Demo {
        /// Input file to index
        input: String,

        /// The question
        query: String,

        /// Number of results to return
        #[arg(short, long, default_value = "3")]
        k: usize,

        /// Chunking strategy
        #[arg(long, default_value = "sentence")]
        strategy: String,
    },
}

fn make_chunker(strategy: &str, size: usize, overlap: usize) -> Box<dyn Chunker> {
    match strategy {
        "window" => Box::new(WindowChunker::new(size, overlap)),
        _ => Box::new(SentenceChunker::new(size)),
    }
}

fn print_results(results: &[SearchResult]) {
    println!("\n=== Results ===\n");
    for (i, result) in results.iter().enumerate() {
        println!("#{} (similarity: {:.4})", i + 1, result.similarity);
        println!("Answer:   {}", result.answer);
        println!("Citation: {}", result.citation);
        println!("---");
        let preview: String = result.text.chars().take(300).collect();
        let ellipsis = if result.text.chars().count() > 300 { "..." } else { "" };
        println!("{preview}{ellipsis}\n");
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk {
            input,
            strategy,
            size,
            overlap,
        } => {
            let doc = Document::from_path(&input)?;
            let chunker = make_chunker(&strategy, size, overlap);
            let chunks = chunker.chunk(&doc.raw_text);

            println!(
                "Chunked '{}' into {} chunks using {} strategy:\n",
                input,
                chunks.len(),
                chunker.name()
            );
            for (i, chunk) in chunks.iter().enumerate() {
                println!("--- Chunk {} ({}B) ---", i + 1, chunk.len());
                let preview: String = chunk.chars().take(200).collect();
                println!("{}{}\n", preview, if chunk.len() > 200 { "..." } else { "" });
            }
        }

        Commands::Ingest {
            input,
            strategy,
            precompute_citations,
        } => {
            let doc = Document::from_path(&input)?;

            println!("Loading embedding model (first run downloads ~1GB)...");
            let embedder = MpnetEmbedder::new()?;
            let store = DiskStore::open(DB_DIR)?;

            let style = if precompute_citations {
                CitationStyle::MetadataDerived
            } else {
                CitationStyle::TextDerived
            };

            let chunker = make_chunker(&strategy, 200, 8);
            let mut engine =
                SearchEngine::new(chunker, embedder, store).with_citation_style(style);

            let count = engine.reload(&doc)?;
            println!("Indexed {} chunks from '{}' into {}", count, input, DB_DIR);
        }

        Commands::Query { query, k } => {
            let store = DiskStore::open(DB_DIR)?;
            if store.is_empty() {
                println!("The collection is empty - run `citeseek ingest <file>` first.");
                return Ok(());
            }

            println!("Loading embedding model...");
            let embedder = MpnetEmbedder::new()?;

            let mut engine = SearchEngine::new(SentenceChunker::default(), embedder, store);
            println!("Embedding model: {}", engine.embedder().model_name());
            println!("Searching: '{query}' (k={k})");
            let results = engine.search(&query, k)?;
            print_results(&results);
        }

        Commands::Demo {
            input,
            query,
            k,
            strategy,
        } => {
            let doc = Document::from_path(&input)?;
            let chunker = make_chunker(&strategy, 200, 8);

            println!("Loading embedding model (first run downloads ~1GB)...");
            let embedder = MpnetEmbedder::new()?;

            let mut engine = SearchEngine::new(chunker, embedder, MemoryStore::new());
            let count = engine.reload(&doc)?;
            println!("Indexed {count} chunks from '{input}'");

            println!("Searching: '{query}' (k={k})");
            let results = engine.search(&query, k)?;
            print_results(&results);
        }
    }

    Ok(())
}
