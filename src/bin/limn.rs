//! Limn CLI - Generate Mermaid architecture diagrams from local repositories.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use limn::api::OpenAiClient;
use limn::errors::{exit_code, LimnError};
use limn::generator::{GenerationResult, Generator};
use limn::output::{remove_click_events, to_html};
use limn::scanner::{find_readme, scan};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "limn")]
#[command(about = "Generate Mermaid architecture diagrams from local repositories")]
#[command(version)]
struct Cli {
    /// Repository root to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "mermaid")]
    format: Format,

    /// Custom instructions for diagram generation
    #[arg(short, long, default_value = "")]
    instructions: String,

    /// OpenAI API key (or use OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// OpenAI model to use
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Show generation progress
    #[arg(short, long)]
    verbose: bool,

    /// Disable click events in output
    #[arg(long)]
    no_click: bool,

    /// Stream model output to stderr as it is produced
    #[arg(long)]
    stream: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Mermaid,
    Html,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: Cli) -> Result<(), LimnError> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| {
            LimnError::Config(
                "OpenAI API key required. Set OPENAI_API_KEY env var or use --api-key".into(),
            )
        })?;

    if cli.verbose {
        eprintln!("Scanning directory: {}", cli.path.display());
    }

    let file_tree = scan(&cli.path)?;

    if cli.verbose {
        eprintln!("Found {} entries in file tree", file_tree.lines().count());
    }

    let readme = match find_readme(&cli.path) {
        Some(content) => {
            if cli.verbose {
                eprintln!("Found README ({} bytes)", content.len());
            }
            content
        }
        None => {
            if cli.verbose {
                eprintln!("No README found, continuing without it");
            }
            String::new()
        }
    };

    if cli.verbose {
        eprintln!("Generating diagram using {}...", cli.model);
    }

    let client = Arc::new(OpenAiClient::new(api_key));
    let generator = Generator::new(client, &cli.model, cli.verbose);

    let result = if cli.stream {
        stream_generate(&generator, &file_tree, &readme, &cli.instructions).await?
    } else {
        generator
            .generate(&file_tree, &readme, &cli.instructions)
            .await?
    };

    let mut diagram = result.diagram;
    if cli.no_click {
        diagram = remove_click_events(&diagram);
    }

    let rendered = match cli.format {
        Format::Mermaid => diagram,
        Format::Html => to_html(&diagram),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)?;
            if cli.verbose {
                eprintln!("Diagram written to {}", path.display());
            }
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Run the streaming pipeline, echoing chunks to stderr as they arrive.
async fn stream_generate(
    generator: &Generator,
    file_tree: &str,
    readme: &str,
    instructions: &str,
) -> Result<GenerationResult, LimnError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let printer = tokio::spawn(async move {
        while let Some(chunk) = rx.recv().await {
            eprint!("{chunk}");
        }
        eprintln!();
    });

    let result = generator
        .generate_streaming(file_tree, readme, instructions, tx)
        .await;

    // all senders are dropped once generation returns, so the printer ends
    let _ = printer.await;

    Ok(result?)
}
