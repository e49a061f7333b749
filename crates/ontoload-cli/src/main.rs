//! Ontoload CLI - Command-line interface
//!
//! Usage:
//!   ontoload fetch <ontology>
//!   ontoload extract <ontology> [--predicate <curie>]...
//!   ontoload load <ontology> [--predicate <curie>]...

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use ontoload_adapter::SqliteAdapter;
use ontoload_core::AppConfig;
use ontoload_extract::OntologyExtractor;
use ontoload_fetch::Fetcher;
use ontoload_store::{Loader, SurrealStore};

#[derive(Parser)]
#[command(name = "ontoload")]
#[command(about = "Ontology database fetch, extract, and load pipeline")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file (environment variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and decompress an ontology database
    Fetch {
        /// Ontology short name, e.g. "envo"
        ontology: String,
    },
    /// Extract class and relation records, printed as JSON lines
    Extract {
        /// Ontology short name, e.g. "envo"
        ontology: String,
        /// Hierarchical predicate, repeatable (defaults apply when omitted)
        #[arg(long = "predicate")]
        predicates: Vec<String>,
    },
    /// Run the full pipeline: fetch, extract, load into the document store
    Load {
        /// Ontology short name, e.g. "envo"
        ontology: String,
        /// Hierarchical predicate, repeatable (defaults apply when omitted)
        #[arg(long = "predicate")]
        predicates: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };

    init_tracing(&config);

    match cli.command {
        Commands::Fetch { ontology } => {
            let fetcher = Fetcher::new(&config.fetch);
            let path = fetcher.prepare(&ontology).await?;
            println!("{}", path.display());
        }
        Commands::Extract {
            ontology,
            predicates,
        } => {
            run_extract(&config, &ontology, &predicates).await?;
        }
        Commands::Load {
            ontology,
            predicates,
        } => {
            run_load(&config, &ontology, &predicates).await?;
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn predicate_filter(predicates: &[String]) -> Option<&[String]> {
    if predicates.is_empty() {
        None
    } else {
        Some(predicates)
    }
}

async fn run_extract(
    config: &AppConfig,
    ontology: &str,
    predicates: &[String],
) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&config.fetch);
    let db_path = fetcher.prepare(ontology).await?;

    let adapter = SqliteAdapter::open(&db_path).await?;
    let extractor = OntologyExtractor::new(&adapter, ontology);

    for class in extractor.extract_classes().await? {
        println!("{}", serde_json::to_string(&class.to_document())?);
    }
    for relation in extractor
        .extract_relations(predicate_filter(predicates))
        .await?
    {
        println!("{}", serde_json::to_string(&relation)?);
    }

    Ok(())
}

async fn run_load(
    config: &AppConfig,
    ontology: &str,
    predicates: &[String],
) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&config.fetch);
    let db_path = fetcher.prepare(ontology).await?;

    let adapter = SqliteAdapter::open(&db_path).await?;
    let extractor = OntologyExtractor::new(&adapter, ontology);

    let classes = extractor.extract_classes().await?;
    let relations = extractor
        .extract_relations(predicate_filter(predicates))
        .await?;

    let store = SurrealStore::connect(&config.store).await?;
    let summary = Loader::new(&store).load(&classes, &relations).await?;

    info!(
        ontology,
        classes = summary.classes_inserted,
        relations = summary.relations_inserted,
        "load complete"
    );

    Ok(())
}
