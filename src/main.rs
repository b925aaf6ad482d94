//! Binary entry point for gitnotes.
//!
//! Thin CLI over the library: parse arguments, load configuration, resolve
//! the target and print the outcome.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use gitnotes::config::GitNotesConfig;
use gitnotes::observability;
use gitnotes::{CommitLocator, Locator, NotesRef, NotesService};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// gitnotes - append git notes to objects located by hash, message or path.
#[derive(Parser)]
#[command(name = "gitnotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the git repository.
    #[arg(short = 'C', long = "repo", global = true)]
    repo: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Append text to the note on a target.
    Append {
        /// The note content.
        content: String,

        /// Notes ref (short names expand to refs/notes/<name>).
        #[arg(short = 'r', long = "ref", env = "GITNOTES_REF")]
        notes_ref: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the object id a target resolves to.
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the note on a target.
    Show {
        /// Notes ref.
        #[arg(short = 'r', long = "ref", env = "GITNOTES_REF")]
        notes_ref: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove the note on a target.
    Remove {
        /// Notes ref.
        #[arg(short = 'r', long = "ref", env = "GITNOTES_REF")]
        notes_ref: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Target selection shared by all commands.
#[derive(Args)]
struct TargetArgs {
    /// Full or abbreviated object id.
    #[arg(
        long,
        required_unless_present_any = ["commit", "file", "folder"],
        conflicts_with_all = ["commit", "file", "folder", "on"]
    )]
    hash: Option<String>,

    /// Substring of a commit message; the newest match is used.
    #[arg(long, conflicts_with_all = ["file", "folder", "on"])]
    commit: Option<String>,

    /// File path inside the commit given by --on.
    #[arg(long, requires = "on", conflicts_with = "folder")]
    file: Option<String>,

    /// Folder path inside the commit given by --on.
    #[arg(long, requires = "on")]
    folder: Option<String>,

    /// Commit holding --file or --folder: a hash or a message substring.
    #[arg(long)]
    on: Option<String>,
}

impl TargetArgs {
    fn into_locator(self) -> anyhow::Result<Locator> {
        let commit = self.on.map(CommitLocator::infer);
        Ok(match (self.hash, self.commit, self.file, self.folder, commit) {
            (Some(id), None, None, None, None) => Locator::Hash(id),
            (None, Some(message), None, None, None) => Locator::CommitMessage(message),
            (None, None, Some(path), None, Some(commit)) => Locator::FileAt { path, commit },
            (None, None, None, Some(path), Some(commit)) => Locator::FolderAt { path, commit },
            _ => bail!("give exactly one of --hash, --commit, --file/--on or --folder/--on"),
        })
    }
}

#[allow(clippy::option_if_let_else)]
fn load_config(path: Option<&Path>, repo: Option<PathBuf>) -> anyhow::Result<GitNotesConfig> {
    let config = match path {
        Some(path) => GitNotesConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GitNotesConfig::load_default(),
    };
    Ok(match repo {
        Some(repo) => config.with_repo_path(repo),
        None => config,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.repo.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Expands an optional `--ref` value.
fn expand_ref(value: Option<String>) -> Option<NotesRef> {
    value.map(NotesRef::new)
}

/// Runs the selected command.
fn run_command(command: Commands, config: &GitNotesConfig) -> anyhow::Result<()> {
    let service = NotesService::from_config(config);

    match command {
        Commands::Append {
            content,
            notes_ref,
            target,
        } => {
            let text = service.text(content, expand_ref(notes_ref));
            let id = text.append_to(&target.into_locator()?)?;
            println!("Appended note to {} under {}", id, text.notes_ref());
        },
        Commands::Resolve { target } => {
            let id = service.resolve(&target.into_locator()?)?;
            println!("{id}");
        },
        Commands::Show { notes_ref, target } => {
            let locator = target.into_locator()?;
            match service.read(&locator, expand_ref(notes_ref))? {
                Some(note) => print!("{note}"),
                None => bail!("no note on {locator}"),
            }
        },
        Commands::Remove { notes_ref, target } => {
            let locator = target.into_locator()?;
            if service.remove(&locator, expand_ref(notes_ref))? {
                println!("Removed note on {locator}");
            } else {
                println!("No note on {locator}");
            }
        },
    }

    Ok(())
}
