use anyhow::{Context, Result};
use clap::Parser;
use search_core::corpus::load_corpus;
use search_core::{SearchConfig, SearchEngine};
use search_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus to index at startup (JSON/JSONL file or directory)
    #[arg(long)]
    input: Option<String>,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of results per search
    #[arg(long, default_value_t = search_core::config::MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut engine = SearchEngine::with_config(SearchConfig { max_results: args.max_results, ..SearchConfig::default() });
    engine.set_stop_words(&args.stop_words);
    if let Some(input) = &args.input {
        let docs = load_corpus(input)?;
        engine.ingest(docs).with_context(|| format!("indexing {input}"))?;
    }
    let app = build_app(engine);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
