use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use docqa::Result;
use docqa::config::Config;
use docqa::document::Document;
use docqa::extract;
use docqa::pipeline::RagPipeline;
use tracing::error;

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Ask questions about your documents using retrieval-augmented generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
    /// Extract a document's text and build its vector index
    Process {
        /// Path to a .txt, .md, or .pdf file
        file: PathBuf,
        /// Title for the document (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Ask a question about a processed document
    Ask {
        /// Path to a previously processed file
        file: PathBuf,
        /// The question to answer
        question: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { init } => show_config(init)?,
        Commands::Process { file, title } => process_file(&file, title)?,
        Commands::Ask { file, question } => ask(&file, &question)?,
    }

    Ok(())
}

fn show_config(init: bool) -> Result<()> {
    if init && !Config::config_file_path().map_err(anyhow::Error::from)?.exists() {
        Config::default().save()?;
        println!(
            "Wrote default configuration to {}",
            Config::config_file_path()
                .map_err(anyhow::Error::from)?
                .display()
        );
    }

    let config = Config::load()?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}

/// Where the processed document (content + serialized index) lives on disk,
/// next to the source file
fn sidecar_path(file: &Path) -> PathBuf {
    PathBuf::from(format!("{}.docqa.json", file.display()))
}

fn document_title(file: &Path, title: Option<String>) -> String {
    title.unwrap_or_else(|| {
        file.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string())
    })
}

fn process_file(file: &Path, title: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let content = extract::extract_text(file)?;

    let mut document = Document::new(document_title(file, title), content);
    let pipeline = RagPipeline::from_config(&config)?;

    let index = pipeline.process_document(&document)?;
    document.attach_index(&index)?;

    let sidecar = sidecar_path(file);
    let serialized =
        serde_json::to_vec_pretty(&document).context("Failed to serialize document")?;
    fs::write(&sidecar, serialized)?;

    println!(
        "Processed '{}' into {} chunks; saved to {}",
        document.title,
        index.len(),
        sidecar.display()
    );
    Ok(())
}

fn ask(file: &Path, question: &str) -> Result<()> {
    let config = Config::load()?;
    let sidecar = sidecar_path(file);

    let document = if sidecar.exists() {
        let bytes = fs::read(&sidecar)?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", sidecar.display()))?
    } else {
        // Unprocessed: hand the pipeline an empty document so it answers
        // with its fixed not-processed message.
        Document::new(document_title(file, None), String::new())
    };

    let pipeline = RagPipeline::from_config(&config)?;

    match pipeline.answer_question(&document, question) {
        Ok(result) => {
            println!("{}", result.answer);
            if !result.sources.is_empty() {
                println!();
                println!("Sources:");
                for (i, source) in result.sources.iter().enumerate() {
                    println!("--- [{}] ---", i + 1);
                    println!("{}", source.trim());
                }
            }
        }
        Err(e) => {
            error!("Failed to answer question: {}", e);
            println!("Something went wrong while answering your question: {e}");
        }
    }

    Ok(())
}
