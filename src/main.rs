// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use docqa::utils::logging::{
    format_confidence, format_error, format_info, format_success, format_warning, init_logger,
};
use docqa::pipeline::{block_on_detached, run_blocking_with_timeout};
use docqa::{Answer, Config, IngestSpinner, LoadedDocument, QaError, SessionId, SessionStore};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Ask questions about a single PDF, DOCX or text document", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and answer one question
    Ask {
        file: PathBuf,

        question: String,

        #[arg(long)]
        json: bool,
    },

    /// Show what was extracted from a document and how it was indexed
    Inspect {
        file: PathBuf,

        #[arg(long)]
        json: bool,

        /// Print every passage with its byte span
        #[arg(long)]
        passages: bool,
    },

    /// Interactive question loop over one document
    Chat { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Shut down without joining an ingestion that already timed out.
    block_on_detached(run(cli)).context("Failed to start async runtime")?
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.color {
        colored::control::set_override(false);
    }
    init_logger(cli.color, cli.verbose);

    debug!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        debug!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            debug!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let store = Arc::new(SessionStore::new(&config));
    let timeout = Duration::from_secs(config.ingest.timeout_secs);

    match cli.command {
        Commands::Ask {
            file,
            question,
            json,
        } => {
            cmd_ask(&store, timeout, &file, &question, json, cli.color).await?;
        }
        Commands::Inspect {
            file,
            json,
            passages,
        } => {
            cmd_inspect(&store, timeout, &file, json, passages, cli.color).await?;
        }
        Commands::Chat { file } => {
            cmd_chat(&store, timeout, &file, cli.color).await?;
        }
    }

    Ok(())
}

/// Build the document on a blocking thread, bounded by the ingest timeout.
/// The session only sees the document once it is complete.
async fn load_document(
    store: &Arc<SessionStore>,
    session: &SessionId,
    path: &Path,
    timeout: Duration,
    spinner: IngestSpinner,
) -> Result<Arc<LoadedDocument>> {
    let task_store = Arc::clone(store);
    let task_path = path.to_path_buf();
    let loaded =
        run_blocking_with_timeout(timeout, move || task_store.prepare_path(&task_path)).await;

    match loaded {
        Ok(loaded) => {
            spinner.finish(&loaded.stats);
            if loaded.stats.is_partial() {
                warn!("{} was only partially extracted", loaded.document.filename);
            }
            Ok(store.install(session, loaded)?)
        }
        Err(QaError::Ingest(e)) => {
            spinner.fail(&e.user_message());
            debug!("Ingestion failed at {:?}: {}", e.stage(), e);
            Err(anyhow!(e.user_message())).with_context(|| format!("{}", path.display()))
        }
        Err(e) => {
            spinner.fail(&e.to_string());
            Err(e.into())
        }
    }
}

fn spinner_for(path: &Path, quiet: bool, color: bool) -> IngestSpinner {
    if quiet {
        IngestSpinner::hidden()
    } else {
        IngestSpinner::new(&path.display().to_string(), color)
    }
}

async fn cmd_ask(
    store: &Arc<SessionStore>,
    timeout: Duration,
    file: &Path,
    question: &str,
    json: bool,
    color: bool,
) -> Result<()> {
    let session = store.create();
    let loaded = load_document(store, &session, file, timeout, spinner_for(file, json, color))
        .await?;

    let answer = store.ask(&session, question)?;
    store.end(&session);

    if json {
        let output = json!({
            "document": {
                "id": loaded.document.id,
                "filename": loaded.document.filename,
                "format": loaded.document.format,
            },
            "question": question,
            "confidence": answer.confidence,
            "score": answer.score,
            "passages": answer.passage_indices(),
            "answer": answer.render(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_answer(&answer);
    }

    Ok(())
}

async fn cmd_inspect(
    store: &Arc<SessionStore>,
    timeout: Duration,
    file: &Path,
    json: bool,
    show_passages: bool,
    color: bool,
) -> Result<()> {
    let session = store.create();
    let loaded = load_document(store, &session, file, timeout, spinner_for(file, json, color))
        .await?;
    store.end(&session);

    if json {
        let mut output = json!({
            "id": loaded.document.id,
            "filename": loaded.document.filename,
            "format": loaded.document.format,
            "mime_type": loaded.document.format.mime_type(),
            "size": loaded.document.size(),
            "uploaded_at": loaded.document.uploaded_at,
            "report": loaded.document.report,
            "stats": loaded.stats,
        });
        if show_passages {
            output["passages"] = serde_json::to_value(loaded.index.passages())?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let document = &loaded.document;
    println!("\n{}", "=".repeat(80));
    println!("Document: {} ({})", document.filename, document.format);
    println!("Id:       {}", document.id);
    println!("Size:     {} bytes", document.size());
    println!("Index:    {}", loaded.stats.format());

    if !document.report.skipped_pages.is_empty() {
        println!(
            "{}",
            format_warning(&format!(
                "Pages skipped: {:?}",
                document.report.skipped_pages
            ))
        );
    }
    if document.report.skipped_tables > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "Tables skipped: {}",
                document.report.skipped_tables
            ))
        );
    }
    if document.report.skipped_elements > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "Other elements skipped: {}",
                document.report.skipped_elements
            ))
        );
    }
    if document.report.truncated {
        println!("{}", format_warning("Extracted text was truncated"));
    }

    if show_passages {
        println!("{}", "-".repeat(80));
        for passage in loaded.index.passages() {
            println!(
                "[{:>4}] {:>7}..{:<7} {}",
                passage.index,
                passage.span.start,
                passage.span.end,
                passage.preview(100)
            );
        }
    }
    println!("{}\n", "=".repeat(80));

    Ok(())
}

async fn cmd_chat(
    store: &Arc<SessionStore>,
    timeout: Duration,
    file: &Path,
    color: bool,
) -> Result<()> {
    let session = store.create();
    info!("Started session {}", session);

    load_document(store, &session, file, timeout, spinner_for(file, false, color)).await?;
    print_status(store, &session)?;
    println!(
        "{}",
        format_info("Ask a question, or use :load <FILE>, :status, :quit")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" | ":exit" => break,
            ":status" => print_status(store, &session)?,
            _ if line.starts_with(":load") => {
                let target = line.trim_start_matches(":load").trim();
                if target.is_empty() {
                    println!("{}", format_warning("Usage: :load <FILE>"));
                    continue;
                }

                let path = PathBuf::from(target);
                match load_document(store, &session, &path, timeout, spinner_for(&path, false, color))
                    .await
                {
                    Ok(loaded) => println!(
                        "{}",
                        format_success(&format!("Now answering from {}", loaded.document.filename))
                    ),
                    Err(e) => println!("{}", format_error(&format!("{:#}", e))),
                }
            }
            _ if line.starts_with(':') => {
                println!("{}", format_warning(&format!("Unknown command: {}", line)));
            }
            question => {
                let answer = store.ask(&session, question)?;
                print_answer(&answer);
            }
        }
    }

    store.end(&session);
    info!("Ended session {}", session);
    Ok(())
}

fn print_answer(answer: &Answer) {
    if !answer.is_found() {
        println!("{}", format_info(&answer.render()));
        return;
    }

    println!(
        "{} {}",
        format_confidence(answer.confidence),
        answer.render()
    );
    debug!(
        "score {:.4}, passages {:?}",
        answer.score,
        answer.passage_indices()
    );
}

fn print_status(store: &SessionStore, session: &SessionId) -> Result<()> {
    match store.status(session)? {
        Some(status) => println!("{}", format_info(&status.format_line())),
        None => println!("{}", format_info("No document loaded")),
    }
    Ok(())
}
