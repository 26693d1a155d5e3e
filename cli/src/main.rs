use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::corpus::{load_corpus, InputDoc};
use search_core::{DocId, Document, DocumentStatus, SearchConfig, SearchEngine};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank documents with TF-IDF and plus/minus queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of results per search
    #[arg(long, default_value_t = search_core::config::MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the documents of a corpus against a query
    Search {
        /// Corpus path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        /// Only return documents with this status (default: actual)
        #[arg(long)]
        status: Option<DocumentStatus>,
        /// Only return documents rated at least this much
        #[arg(long)]
        min_rating: Option<i32>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// List the query words found in one document
    Match {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Index the built-in sample documents and run the sample queries
    Demo {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, status, min_rating, engine } => {
            let engine = build_engine(&engine, load_corpus(&input)?)?;
            let results = match (status, min_rating) {
                (None, None) => engine.find_top_documents(&query),
                (Some(status), None) => engine.find_top_documents_by_status(&query, status),
                (status, Some(min)) => {
                    let wanted = status.unwrap_or_default();
                    engine.find_top_documents_with(&query, |_, s, rating| s == wanted && rating >= min)
                }
            };
            results.iter().for_each(print_document);
            Ok(())
        }
        Commands::Match { input, query, id, engine } => {
            let engine = build_engine(&engine, load_corpus(&input)?)?;
            let (words, status) = engine.match_document(&query, id).with_context(|| format!("matching document {id}"))?;
            println!("{{ document_id = {id}, status = {status}, words = [{}] }}", words.join(", "));
            Ok(())
        }
        Commands::Demo { engine } => run_demo(&engine),
    }
}

fn build_engine(args: &EngineArgs, docs: Vec<InputDoc>) -> Result<SearchEngine> {
    let config = SearchConfig { max_results: args.max_results, ..SearchConfig::default() };
    let mut engine = SearchEngine::with_config(config);
    engine.set_stop_words(&args.stop_words);
    engine.ingest(docs).context("indexing corpus")?;
    Ok(engine)
}

fn print_document(document: &Document) {
    println!(
        "{{ document_id = {}, relevance = {}, rating = {} }}",
        document.id, document.relevance, document.rating
    );
}

fn sample_docs() -> Vec<InputDoc> {
    let doc = |id, text: &str, status, ratings: &[i32]| InputDoc { id, text: text.to_string(), status, ratings: ratings.to_vec() };
    vec![
        doc(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3]),
        doc(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7]),
        doc(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1]),
        doc(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9]),
    ]
}

fn run_demo(args: &EngineArgs) -> Result<()> {
    let stop_words = if args.stop_words.is_empty() { "и в на" } else { args.stop_words.as_str() };
    let args = EngineArgs { stop_words: stop_words.to_string(), max_results: args.max_results };
    let engine = build_engine(&args, sample_docs())?;
    let query = "пушистый ухоженный кот";

    println!("ACTUAL by default:");
    engine.find_top_documents(query).iter().for_each(print_document);
    println!("BANNED:");
    engine.find_top_documents_by_status(query, DocumentStatus::Banned).iter().for_each(print_document);
    println!("Even ids:");
    engine.find_top_documents_with(query, |id, _, _| id % 2 == 0).iter().for_each(print_document);
    Ok(())
}
