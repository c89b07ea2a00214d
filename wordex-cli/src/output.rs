use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use wordex::source::Admission;
use wordex::{Engine, IndexStats, Rejected, SearchHit, UpdateReport};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON output.
    Json,
}

type Result<T> = anyhow::Result<T>;

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Report rejected candidate files on stderr.
pub fn print_admission(admission: &Admission, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for rejected in &admission.rejected {
                eprintln!("{}", rejected_json(rejected));
            }
        }
        OutputFormat::Table => {
            for rejected in &admission.rejected {
                eprintln!("Skipping {rejected}");
            }
        }
    }
    Ok(())
}

/// Print the loaded file list.
pub fn print_files(engine: &Engine, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let files = path_strings(engine.files().as_slice());
            print_json(&json!({
                "files": files,
                "pending": engine.pending_files().len(),
            }))
        }
        OutputFormat::Table => {
            if engine.files().is_empty() {
                println!("No files loaded.");
                return Ok(());
            }
            let pending = engine.pending_files();
            let rows: Vec<FileRow> = engine
                .files()
                .iter()
                .enumerate()
                .map(|(i, path)| FileRow {
                    position: i + 1,
                    file: path.display().to_string(),
                    indexed: if pending.contains(path) { "no" } else { "yes" }.to_string(),
                })
                .collect();
            println!("{}", Table::new(&rows).with(Style::rounded()));
            Ok(())
        }
    }
}

/// Print the whole index, one row per (word, file).
pub fn print_index(engine: &Engine, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(engine.records())?),
        OutputFormat::Table => {
            let rows: Vec<IndexRow> = engine
                .display_rows()
                .into_iter()
                .map(|row| IndexRow {
                    index: row.index.map(|i| i.to_string()).unwrap_or_default(),
                    word: row.word.unwrap_or_default().to_string(),
                    file_count: row.file_count.map(|n| n.to_string()).unwrap_or_default(),
                    file: row.file.to_string(),
                    count: row.count,
                })
                .collect();

            if rows.is_empty() {
                println!("The index is empty.");
                return Ok(());
            }
            println!("{}", Table::new(&rows).with(Style::rounded()));
            Ok(())
        }
    }
}

/// Print search hits for `word`.
pub fn print_search_results(
    word: &str,
    hits: &[SearchHit<'_>],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let results: Vec<serde_json::Value> = hits
                .iter()
                .map(|hit| {
                    json!({
                        "word": hit.word,
                        "total": hit.total,
                        "files": hit.occurrences,
                    })
                })
                .collect();
            print_json(&json!({ "query": word, "hits": results }))
        }
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("'{word}' was not found.");
                return Ok(());
            }

            for hit in hits {
                println!("Found match: [{}]", hit.word);
                let rows: Vec<OccurrenceRow> = hit
                    .occurrences
                    .iter()
                    .map(|o| OccurrenceRow {
                        file: o.file().to_string(),
                        count: o.count(),
                    })
                    .collect();
                println!("{}", Table::new(&rows).with(Style::rounded()));
                println!(
                    "Total appearances: {} in {} file(s)\n",
                    hit.total,
                    hit.file_count()
                );
            }
            Ok(())
        }
    }
}

/// Print the outcome of an update.
pub fn print_update_report(report: &UpdateReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&update_report_json(report)),
        OutputFormat::Table => {
            for rejected in &report.rejected {
                eprintln!("Skipping {rejected}");
            }
            if report.is_noop() {
                println!("No new valid files were added to the index.");
            } else {
                println!(
                    "Indexed {} new file(s): {} token(s), {} new word(s).",
                    report.indexed.len(),
                    report.stats.tokens,
                    report.stats.new_words
                );
            }
            Ok(())
        }
    }
}

/// Print index statistics.
pub fn print_stats(stats: &IndexStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(stats)?),
        OutputFormat::Table => {
            println!("Words:         {}", stats.words);
            println!("Occurrences:   {}", stats.occurrences);
            println!("Tokens:        {}", stats.tokens);
            println!("Buckets used:  {}", stats.buckets_used);
            Ok(())
        }
    }
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

fn path_strings(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| path_string(path)).collect()
}

fn rejected_json(rejected: &Rejected) -> serde_json::Value {
    json!({
        "file": path_string(&rejected.path),
        "reason": rejected.reason.to_string(),
    })
}

fn update_report_json(report: &UpdateReport) -> serde_json::Value {
    let rejected: Vec<serde_json::Value> = report.rejected.iter().map(rejected_json).collect();
    json!({
        "indexed": path_strings(&report.indexed),
        "rejected": rejected,
        "stats": report.stats,
    })
}

// --- Helper types ---

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Indexed")]
    indexed: String,
}

#[derive(Tabled)]
struct IndexRow {
    #[tabled(rename = "Index")]
    index: String,
    #[tabled(rename = "Word")]
    word: String,
    #[tabled(rename = "File Count")]
    file_count: String,
    #[tabled(rename = "File Name")]
    file: String,
    #[tabled(rename = "Word Count")]
    count: u32,
}

#[derive(Tabled)]
struct OccurrenceRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Count")]
    count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordex::Rejection;

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_render_as_json() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = PathBuf::from(OsStr::from_bytes(b"bad\xffname.txt"));
        let report = UpdateReport {
            indexed: vec![path.clone()],
            rejected: vec![Rejected {
                path,
                reason: Rejection::Empty,
            }],
            ..UpdateReport::default()
        };

        let value = update_report_json(&report);
        let indexed = value["indexed"][0].as_str().unwrap();
        assert!(indexed.starts_with("bad"));
        assert!(indexed.ends_with("name.txt"));
        assert_eq!(value["rejected"][0]["reason"], "file is empty");
        assert_eq!(value["stats"]["files"], 0);
    }

    #[test]
    fn test_rejected_json_fields() {
        let rejected = Rejected {
            path: PathBuf::from("notes.md"),
            reason: Rejection::WrongExtension,
        };
        assert_eq!(
            rejected_json(&rejected),
            json!({ "file": "notes.md", "reason": "wrong extension" })
        );
    }
}
