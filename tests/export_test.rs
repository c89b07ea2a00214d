use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use wordex::export::read_records;
use wordex::{Engine, IndexConfig};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_save_and_inspect() -> wordex::Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "zebra apple apple 99");
    let b = write(temp_dir.path(), "b.txt", "apple banana");

    let mut engine = Engine::new(IndexConfig::default())?;
    engine.load_files([&a, &b]);
    engine.create()?;

    let out = temp_dir.path().join("database.txt");
    let written = engine.save(&out)?;
    assert_eq!(written, 3);

    let records = read_records(fs::File::open(&out)?)?;
    assert_eq!(records, engine.records());

    let words: Vec<(usize, &str, u64)> = records
        .iter()
        .map(|r| (r.index, r.word.as_str(), r.word_count))
        .collect();
    assert_eq!(
        words,
        vec![(0, "apple", 3), (1, "banana", 1), (25, "zebra", 1)]
    );
    assert_eq!(records[0].file_count, 2);
    assert_eq!(records[0].files.len(), 2);

    Ok(())
}

#[test]
fn test_save_to_unwritable_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::new(IndexConfig::default()).unwrap();
    let out = temp_dir.path().join("missing-dir").join("database.txt");
    assert!(engine.save(&out).is_err());
}

#[test]
fn test_display_rows_follow_export_order() -> wordex::Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat dog");
    let b = write(temp_dir.path(), "b.txt", "cat");

    let mut engine = Engine::new(IndexConfig::default())?;
    engine.load_files([&a, &b]);
    engine.create()?;

    let rows = engine.display_rows();
    let shape: Vec<(Option<&str>, u32)> = rows.iter().map(|r| (r.word, r.count)).collect();
    assert_eq!(shape, vec![(Some("cat"), 1), (None, 1), (Some("dog"), 1)]);

    Ok(())
}

#[test]
fn test_filename_with_comma_survives_save() -> wordex::Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let notes = write(temp_dir.path(), "notes, draft.txt", "draft draft final");
    let plain = write(temp_dir.path(), "plain.txt", "draft");

    let mut engine = Engine::new(IndexConfig::default())?;
    engine.load_files([&notes, &plain]);
    engine.create()?;

    let out = temp_dir.path().join("database.txt");
    engine.save(&out)?;

    let records = read_records(fs::File::open(&out)?)?;
    assert_eq!(records, engine.records());

    let draft = records.iter().find(|r| r.word == "draft").unwrap();
    assert_eq!(draft.file_count, 2);
    assert_eq!(
        draft.files,
        vec![
            notes.to_string_lossy().into_owned(),
            plain.to_string_lossy().into_owned()
        ]
    );

    Ok(())
}
