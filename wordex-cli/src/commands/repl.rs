use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use rustyline::DefaultEditor;
use wordex::{Engine, IndexConfig, MatchPolicy};

use crate::context;
use crate::output::{self, OutputFormat};

const DEFAULT_EXPORT: &str = "database.txt";

/// Run the interactive menu.
pub fn run(files: &[PathBuf], config: IndexConfig, format: OutputFormat) -> Result<()> {
    let mut engine = context::open_engine(config, files, format)?;
    output::print_files(&engine, format)?;

    let mut rl = DefaultEditor::new()?;

    println!("Wordex REPL (type 'help' for commands, 'exit' to quit)");

    loop {
        let line = match rl.readline("wordex> ") {
            Ok(line) => line,
            Err(
                rustyline::error::ReadlineError::Interrupted | rustyline::error::ReadlineError::Eof,
            ) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        debug!("repl command {command:?} with {} argument(s)", args.len());

        let result = match command {
            "help" => {
                print_help();
                Ok(())
            }
            "exit" | "quit" => break,
            "create" => handle_create(&mut engine),
            "display" => output::print_index(&engine, format),
            "search" | "prefix" => {
                let Some(word) = args.first() else {
                    eprintln!("Usage: {command} <word>");
                    continue;
                };
                let policy = if command == "prefix" {
                    MatchPolicy::Prefix
                } else {
                    engine.config().match_policy
                };
                let hits: Vec<_> = engine.search_with(word, policy).collect();
                output::print_search_results(word, &hits, format)
            }
            "update" => {
                if args.is_empty() {
                    eprintln!("Usage: update <file> [<file>...]");
                    continue;
                }
                handle_update(&mut engine, &args, format)
            }
            "save" => {
                let path = args.first().copied().unwrap_or(DEFAULT_EXPORT);
                handle_save(&engine, Path::new(path))
            }
            "files" => output::print_files(&engine, format),
            "stats" => output::print_stats(&engine.stats(), format),
            _ => {
                eprintln!("Unknown command: '{command}'. Type 'help' for available commands.");
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {e:#}");
        }
    }

    engine.close();
    println!("Goodbye.");
    Ok(())
}

fn print_help() {
    println!(
        "\
Available commands:
  create                       Index the loaded files
  display                      Show the whole index
  search <word>                Look up a word (case-insensitive)
  prefix <word>                Look up every word starting with <word>
  update <file> [<file>...]    Add files and index only those
  save [file]                  Write the flat export (default: database.txt)
  files                        List loaded files
  stats                        Show index statistics
  help                         Show this help
  exit                         Release the index and exit"
    );
}

fn handle_create(engine: &mut Engine) -> Result<()> {
    if engine.is_up_to_date() {
        println!("All loaded files are already indexed.");
        return Ok(());
    }
    let stats = engine.create().context("Failed to create the index")?;
    println!(
        "Index created: {} file(s), {} token(s), {} new word(s).",
        stats.files, stats.tokens, stats.new_words
    );
    Ok(())
}

fn handle_update(engine: &mut Engine, files: &[&str], format: OutputFormat) -> Result<()> {
    let report = engine.update(files).context("Failed to update the index")?;
    output::print_update_report(&report, format)
}

fn handle_save(engine: &Engine, path: &Path) -> Result<()> {
    let written = engine
        .save(path)
        .with_context(|| format!("Failed to save to {}", path.display()))?;
    println!("Saved {written} words to {}.", path.display());
    Ok(())
}
