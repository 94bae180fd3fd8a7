//! Command-line client for the note store.
//!
//! # Responsibility
//! - Resolve configuration from env and flags, load the store once.
//! - Persist after every mutating command and map failures to exit codes.

use clap::{Parser, Subcommand};
use log::warn;
use notestore_core::config::parse_clock;
use notestore_core::{init_logging, Note, SharedNoteStore, StoreConfig, StoreError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notestore", version, about = "Local JSON-file note store")]
struct Cli {
    /// Directory holding notes.json (overrides NOTESTORE_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Seed file used when notes.json is missing (overrides NOTESTORE_SEED_PATH).
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    /// Log level (overrides NOTESTORE_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Timestamp mode for new notes: zero|wall (overrides NOTESTORE_CLOCK).
    #[arg(long, global = true)]
    clock: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// List every note in store order.
    List,
    /// Show one note.
    Show { id: String },
    /// Create a note and persist.
    Add { title: String, body: String },
    /// Replace a note's title and body and persist.
    Update {
        id: String,
        title: String,
        body: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
        // Logging is best-effort for the CLI; the store still works without it.
        eprintln!("warning: {err}");
    }

    run(cli.command, &config)
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig, String> {
    let mut config = StoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = absolutize(dir)?;
    }
    if let Some(seed) = &cli.seed {
        config.seed_path = Some(seed.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(clock) = &cli.clock {
        config.clock = parse_clock(clock).ok_or_else(|| format!("unknown clock `{clock}`"))?;
    }
    config.data_dir = absolutize(&config.data_dir)?;
    Ok(config)
}

fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve `{}`: {err}", path.display()))
}

fn run(command: Command, config: &StoreConfig) -> ExitCode {
    let durable = config.durable_source();
    let seed = config.seed_source();
    let shared = SharedNoteStore::with_clock(config.clock);

    let mutated = match command {
        Command::Ping => {
            println!("notestore_core ping={}", notestore_core::ping());
            println!("notestore_core version={}", notestore_core::core_version());
            return ExitCode::SUCCESS;
        }
        Command::List => {
            let store = shared.get_or_load(&durable, &*seed);
            for note in store.iter() {
                println!("{}", summary_line(note));
            }
            return ExitCode::SUCCESS;
        }
        Command::Show { id } => {
            let store = shared.get_or_load(&durable, &*seed);
            return match store.get(&id) {
                Some(note) => {
                    print_note(note);
                    ExitCode::SUCCESS
                }
                None => report_store_error(&StoreError::NotFound(id)),
            };
        }
        Command::Add { title, body } => Ok(shared
            .get_or_load(&durable, &*seed)
            .add_note(title, body)),
        Command::Update { id, title, body } => shared
            .get_or_load(&durable, &*seed)
            .update_note(&id, title, body),
    };

    let note = match mutated {
        Ok(note) => note,
        Err(err) => return report_store_error(&err),
    };
    print_note(&note);

    match shared.persist(&durable) {
        Some(report) if report.is_written() => ExitCode::SUCCESS,
        Some(report) => {
            eprintln!("error: {report}");
            ExitCode::FAILURE
        }
        None => ExitCode::FAILURE,
    }
}

fn report_store_error(err: &StoreError) -> ExitCode {
    warn!("event=cli_command module=cli status=error error={err}");
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

fn summary_line(note: &Note) -> String {
    format!("{}\t{}\t{}", note.id, note.last_modified, note.title)
}

fn print_note(note: &Note) {
    println!("id: {}", note.id);
    println!("title: {}", note.title);
    println!("dateCreated: {}", note.date_created);
    println!("lastModified: {}", note.last_modified);
    println!();
    println!("{}", note.body);
}
