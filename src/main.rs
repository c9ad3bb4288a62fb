//! transporter: move text and block references between notes.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use transporter::block_id::BlockIdGenerator;
use transporter::block_ref::annotate_selections;
use transporter::buffer::LineBuffer;
use transporter::commands;
use transporter::config::Config;
use transporter::document::Document;
use transporter::error::Result;
use transporter::formats::markdown::MarkdownFormat;
use transporter::locate::Direction;
use transporter::section::Position;
use transporter::sink::ConsoleSink;
use transporter::transfer::{Candidate, Chooser, ScriptedChooser, TransferMode};
use transporter::ui::TerminalChooser;
use transporter::vault::Vault;

#[derive(Parser)]
#[command(name = "transporter")]
#[command(about = "Section-aware selection and block references across notes", long_about = None)]
struct Args {
    /// Log engine decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Directory holding the notes (overrides transporter.toml)
    #[arg(long, global = true, value_name = "DIR")]
    vault: Option<PathBuf>,

    /// File extensions to offer as targets
    #[arg(long, short = 'e', global = true, value_name = "EXT")]
    ext: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Cursor {
    /// Document to act on
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Put the cursor at the start of this line
    #[arg(long, conflicts_with_all = ["anchor", "head"])]
    line: Option<usize>,

    /// Fixed end of the selection, as LINE:COLUMN
    #[arg(long, value_parser = parse_position)]
    anchor: Option<Position>,

    /// Moving end of the selection, as LINE:COLUMN
    #[arg(long, value_parser = parse_position)]
    head: Option<Position>,
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Document to transfer to or from; prompts if missing
    #[arg(long)]
    target: Option<String>,

    /// Line in the target document
    #[arg(long)]
    target_line: Option<usize>,

    /// Last line to pull from the target (defaults to --target-line)
    #[arg(long)]
    end_line: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Select the cursor's whole line
    SelectLine(Cursor),
    /// Grow the selection by one step
    Expand {
        #[command(flatten)]
        cursor: Cursor,
        /// Direction to grow in
        #[arg(long, value_enum, default_value = "up")]
        direction: Direction,
    },
    /// Print an embed for the block under the cursor
    CopyRef(Cursor),
    /// Give every selected paragraph a block reference
    Annotate(Cursor),
    /// Insert the selection (or line) into another document
    Push {
        #[command(flatten)]
        cursor: Cursor,
        #[command(flatten)]
        target: TargetArgs,
        /// Remove the text from this document afterwards
        #[arg(long = "move")]
        move_text: bool,
    },
    /// Replace the selection with lines from another document
    Pull {
        #[command(flatten)]
        cursor: Cursor,
        #[command(flatten)]
        target: TargetArgs,
        /// Remove the lines from the other document afterwards
        #[arg(long = "move")]
        move_text: bool,
    },
    /// Embed the selected blocks into another document
    PushRef {
        #[command(flatten)]
        cursor: Cursor,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Replace the selection with an embed of a block in another document
    PullRef {
        #[command(flatten)]
        cursor: Cursor,
        #[command(flatten)]
        target: TargetArgs,
    },
}

fn parse_position(s: &str) -> std::result::Result<Position, String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got {s:?}"))?;
    let line = line.parse().map_err(|e| format!("bad line {line:?}: {e}"))?;
    let column = column.parse().map_err(|e| format!("bad column {column:?}: {e}"))?;
    Ok(Position::new(line, column))
}

/// Prompts answered from the command line when given, on the terminal otherwise.
enum CliChooser {
    Scripted(ScriptedChooser),
    Terminal(TerminalChooser),
}

impl CliChooser {
    fn new(target: &TargetArgs) -> Self {
        match (&target.target, target.target_line) {
            (Some(path), Some(line)) => {
                let end = target.end_line.unwrap_or(line);
                Self::Scripted(ScriptedChooser::new([path.clone(), line.to_string(), end.to_string()]))
            }
            _ => Self::Terminal(TerminalChooser),
        }
    }
}

impl Chooser for CliChooser {
    fn choose(&mut self, prompt: &str, candidates: &[Candidate]) -> Option<usize> {
        match self {
            Self::Scripted(chooser) => chooser.choose(prompt, candidates),
            Self::Terminal(chooser) => chooser.choose(prompt, candidates),
        }
    }
}

fn mode(move_text: bool) -> TransferMode {
    if move_text {
        TransferMode::Move
    } else {
        TransferMode::Copy
    }
}

fn open(vault: &Vault, cursor: &Cursor) -> Result<Document> {
    let path = vault.relative(&cursor.path);
    let mut doc = Document::open(vault, &path, &MarkdownFormat)?;
    let (anchor, head) = match (cursor.line, cursor.anchor, cursor.head) {
        (Some(line), _, _) => (Position::line_start(line), Position::line_start(line)),
        (None, Some(anchor), Some(head)) => (anchor, head),
        (None, Some(at), None) | (None, None, Some(at)) => (at, at),
        (None, None, None) => (Position::default(), Position::default()),
    };
    doc.buffer.set_selection(anchor, head);
    Ok(doc)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut cfg = Config::load();
    if let Some(vault) = args.vault {
        cfg.vault_root = vault.to_string_lossy().into_owned();
    }
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    let vault = Vault::new(&cfg.vault_root, cfg.file_extensions);
    let mut ids = BlockIdGenerator::new();

    let doc = match args.command {
        Command::SelectLine(cursor) => {
            let mut doc = open(&vault, &cursor)?;
            print_json(&commands::select_current_line(&mut doc))?;
            doc
        }
        Command::Expand { cursor, direction } => {
            let mut doc = open(&vault, &cursor)?;
            print_json(&commands::select_current_section(&mut doc, direction))?;
            doc
        }
        Command::CopyRef(cursor) => {
            let mut doc = open(&vault, &cursor)?;
            commands::copy_block_ref(&mut doc, &mut ids, &mut ConsoleSink)?;
            doc
        }
        Command::Annotate(cursor) => {
            let mut doc = open(&vault, &cursor)?;
            let selections = doc.buffer.selections();
            let tokens = annotate_selections(&mut doc.buffer, &mut doc.index, &mut ids, &selections);
            print_json(&tokens)?;
            doc
        }
        Command::Push {
            cursor,
            target,
            move_text,
        } => {
            let mut doc = open(&vault, &cursor)?;
            let mut chooser = CliChooser::new(&target);
            let pushed = commands::push_line_or_selection(&mut doc, &vault, &mut chooser, mode(move_text))?;
            print_json(&serde_json::json!({ "transferred": pushed }))?;
            doc
        }
        Command::Pull {
            cursor,
            target,
            move_text,
        } => {
            let mut doc = open(&vault, &cursor)?;
            let mut chooser = CliChooser::new(&target);
            let pulled = commands::pull_line_or_selection(&mut doc, &vault, &mut chooser, mode(move_text))?;
            print_json(&serde_json::json!({ "transferred": pulled }))?;
            doc
        }
        Command::PushRef { cursor, target } => {
            let mut doc = open(&vault, &cursor)?;
            let mut chooser = CliChooser::new(&target);
            let embeds = commands::push_block_reference(&mut doc, &mut ids, &vault, &mut chooser)?;
            print_json(&embeds)?;
            doc
        }
        Command::PullRef { cursor, target } => {
            let mut doc = open(&vault, &cursor)?;
            let mut chooser = CliChooser::new(&target);
            let embed = commands::pull_block_reference(
                &mut doc,
                &mut ids,
                &vault,
                &MarkdownFormat,
                &mut chooser,
                &mut ConsoleSink,
            )?;
            print_json(&embed)?;
            doc
        }
    };

    if doc.save(&vault)? {
        tracing::info!(path = %doc.path, "saved document");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("transporter={level}"))),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
