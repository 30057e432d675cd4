use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use sift::{load_rows, FilterSession, SiftConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Filter and summarize JSON rows with status:active style queries")]
#[command(version)]
struct Args {
    /// JSON config file (schema, field map, summary fields)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered filter keys
    Keys,
    /// Autocomplete suggestions for the word under the cursor
    Suggest {
        text: String,
        /// Byte offset of the cursor; defaults to the end of the text
        #[arg(long)]
        cursor: Option<usize>,
    },
    /// Human-readable description of a filter expression
    Describe { text: String },
    /// Apply a filter expression to a JSON array of rows
    Filter {
        text: String,
        #[arg(short, long)]
        rows: PathBuf,
    },
    /// Aggregate metrics over all rows
    Summarize {
        #[arg(short, long)]
        rows: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    sift::tracing::init_with_filter(&args.log_level);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> sift::Result<()> {
    let config = match &args.config {
        Some(path) => SiftConfig::load(path)?,
        None => SiftConfig::default(),
    };

    match args.command {
        Command::Keys => {
            let registry = config.registry()?;
            let keys: Vec<Value> = registry
                .iter()
                .map(|(key, schema)| {
                    json!({
                        "key": key,
                        "type": schema.kind,
                        "description": schema.description,
                        "operators": schema.supports_operators(),
                    })
                })
                .collect();
            print_json(&keys)
        }
        Command::Suggest { text, cursor } => {
            let session = FilterSession::new(config, Vec::new())?;
            let cursor = cursor.unwrap_or(text.len());
            print_json(&session.suggest(&text, cursor))
        }
        Command::Describe { text } => {
            let tokens = sift_core::parse(&text);
            print_json(&json!({
                "tokens": tokens,
                "description": sift_core::describe_filters(&tokens),
            }))
        }
        Command::Filter { text, rows } => {
            let session = session_with_rows(config, &rows)?;
            let outcome = session.evaluate(&text)?;
            info!(
                matched = outcome.rows.len(),
                total = session.rows().len(),
                "filter applied"
            );
            print_json(&outcome)
        }
        Command::Summarize { rows } => {
            let session = session_with_rows(config, &rows)?;
            print_json(&session.summarize_all())
        }
    }
}

fn session_with_rows(config: SiftConfig, path: &Path) -> sift::Result<FilterSession> {
    FilterSession::new(config, load_rows(path)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> sift::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
