//! Interactive document Q&A front-end.
//!
//! Ingests one PDF through the RAG pipeline, then reads questions from
//! stdin and prints the best-matching chunks until EOF. The embedding
//! provider is any `OpenAI`-compatible endpoint; the API key comes from
//! `OPENAI_API_KEY`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tome_openai::OpenAI;
use tome_rag::{RagConfig, RagManager, reader::PdfReader};

#[derive(Debug, Parser)]
#[command(name = "tome", version, about = "Ask questions about a document from your terminal")]
struct Args {
    /// PDF document to ingest.
    document: PathBuf,

    /// Fixed chunk width in characters. Both --chunk-size and --overlap
    /// must be set to enable fixed-size chunking; otherwise documents are
    /// split on paragraph boundaries.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap in characters between consecutive fixed-size chunks.
    #[arg(long)]
    overlap: Option<usize>,

    /// Number of chunks embedded per provider request.
    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Number of chunks retrieved per question.
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Base URL of an `OpenAI`-compatible endpoint.
    #[arg(long)]
    base_url: Option<String>,

    /// Embedding model identifier.
    #[arg(long)]
    embedding_model: Option<String>,

    /// Embedding dimension override for models the client does not know.
    #[arg(long)]
    embedding_dimensions: Option<usize>,
}

impl Args {
    fn build_embedder(&self, api_key: String) -> OpenAI {
        let mut builder = OpenAI::builder(api_key);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(model) = &self.embedding_model {
            builder = builder.embedding_model(model);
        }
        if let Some(dimensions) = self.embedding_dimensions {
            builder = builder.embedding_dimensions(dimensions);
        }
        builder.build()
    }

    fn build_config(&self) -> RagConfig {
        let mut builder = RagConfig::builder()
            .batch_size(self.batch_size)
            .default_top_k(self.top_k);
        if let (Some(chunk_size), Some(overlap)) = (self.chunk_size, self.overlap) {
            builder = builder.chunk_size(chunk_size).overlap(overlap);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;

    let embedder = args.build_embedder(api_key);
    let config = args.build_config();
    let batch_size = config.batch_size;
    let top_k = config.default_top_k;

    let manager = RagManager::new(embedder, PdfReader::new(), config)?;

    let indexed = manager.process_document(&args.document, batch_size).await?;
    println!(
        "Indexed {indexed} chunks from {}. Ask away (ctrl-d to quit).",
        args.document.display()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match manager.search_similar_chunks(query, top_k).await {
            Ok(chunks) => {
                for (rank, chunk) in chunks.iter().enumerate() {
                    println!("--- [{}] ---", rank + 1);
                    println!("{chunk}");
                }
            }
            Err(err) => eprintln!("search failed: {err}"),
        }
    }

    Ok(())
}
