use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Wordex - inverted index over text files
#[derive(Parser)]
#[command(name = "wordex", version, about)]
pub struct Cli {
    /// Path to an index configuration TOML file.
    #[arg(long, env = "WORDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Index the files and print the whole index.
    Display(SourceArgs),
    /// Index the files and look up a word.
    Search(SearchCommand),
    /// Index the files and write the flat export.
    Save(SaveCommand),
    /// Load the files and start the interactive menu.
    Repl(SourceArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Text files to index.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct SearchCommand {
    /// Word to look up (case-insensitive).
    pub word: String,

    /// Match every word starting with WORD instead of WORD exactly.
    #[arg(long)]
    pub prefix: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct SaveCommand {
    /// Export file path.
    #[arg(long, short, default_value = "database.txt")]
    pub output: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}
