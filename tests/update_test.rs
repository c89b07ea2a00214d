use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use wordex::{
    Engine, FileValidator, IncrementalUpdater, IndexBuilder, IndexConfig, InvertedIndex,
    MatchPolicy, Rejection, SourceFileList,
};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn built_over(files: &[&PathBuf]) -> (InvertedIndex, SourceFileList) {
    let validator = FileValidator::default();
    let mut list = SourceFileList::new();
    let admission = validator.admit(&mut list, files.iter().copied());
    assert!(admission.rejected.is_empty());

    let mut index = InvertedIndex::new();
    IndexBuilder::default().build(&mut index, &list).unwrap();
    (index, list)
}

#[test]
fn test_update_with_no_files_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat cat dog");
    let (mut index, mut list) = built_over(&[&a]);
    let before = index.clone();
    let mut indexed = list.len();

    let no_files: Vec<PathBuf> = Vec::new();

    let updater = IncrementalUpdater::default();
    let report = updater
        .update(&mut index, &mut list, &mut indexed, &no_files)
        .unwrap();

    assert!(report.is_noop());
    assert_eq!(index, before);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_update_with_only_rejected_files_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat");
    let empty = write(temp_dir.path(), "empty.txt", "");
    let markdown = write(temp_dir.path(), "notes.md", "cat");
    let (mut index, mut list) = built_over(&[&a]);
    let before = index.clone();
    let mut indexed = list.len();

    let report = IncrementalUpdater::default()
        .update(&mut index, &mut list, &mut indexed, [&a, &empty, &markdown])
        .unwrap();

    assert!(report.is_noop());
    let reasons: Vec<Rejection> = report.rejected.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![Rejection::Duplicate, Rejection::Empty, Rejection::WrongExtension]
    );
    assert_eq!(index, before);
}

#[test]
fn test_update_finds_new_word_in_new_file_only() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat cat dog");
    let b = write(temp_dir.path(), "b.txt", "walrus cat");
    let (mut index, mut list) = built_over(&[&a]);
    let mut indexed = list.len();

    let report = IncrementalUpdater::default()
        .update(&mut index, &mut list, &mut indexed, [&b])
        .unwrap();
    assert_eq!(indexed, 2);
    assert_eq!(report.indexed, vec![b.clone()]);
    assert_eq!(report.stats.files, 1);
    assert_eq!(report.stats.tokens, 2);

    let b_id = b.to_string_lossy().into_owned();
    let hits: Vec<_> = index.search("walrus", MatchPolicy::Exact).collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].occurrences.len(), 1);
    assert_eq!(hits[0].occurrences[0].file(), b_id);
    assert_eq!(hits[0].occurrences[0].count(), 1);

    // a.txt was not scanned again.
    let cat = index.get("cat").unwrap();
    assert_eq!(cat.total_count(), 3);
    assert_eq!(cat.file_count(), 2);
}

#[test]
fn test_repeated_updates_keep_counts_stable() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "one two two");
    let b = write(temp_dir.path(), "b.txt", "two three");
    let c = write(temp_dir.path(), "c.txt", "three");

    let mut engine = Engine::new(IndexConfig::default()).unwrap();
    engine.load_files([&a]);
    engine.create().unwrap();

    engine.update([&b]).unwrap();
    engine.update([&b]).unwrap();
    engine.update([&c]).unwrap();
    engine.update(Vec::<PathBuf>::new()).unwrap();

    let count = |word: &str| engine.index().get(word).map(|e| e.total_count());
    assert_eq!(count("one"), Some(1));
    assert_eq!(count("two"), Some(3));
    assert_eq!(count("three"), Some(2));
    assert_eq!(engine.files().len(), 3);
}

#[test]
fn test_failed_update_resumes_after_the_last_finished_file() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat");
    let c = write(temp_dir.path(), "c.txt", "dog dog");
    let b = write(temp_dir.path(), "b.txt", "bird");
    let (mut index, mut list) = built_over(&[&a]);
    let mut indexed = list.len();
    let updater = IncrementalUpdater::default();

    // b passes validation and is gone by the time it is read.
    let admission = FileValidator::default().admit(&mut list, [&c, &b]);
    assert_eq!(admission.accepted.len(), 2);
    fs::remove_file(&b).unwrap();

    let no_files: Vec<PathBuf> = Vec::new();
    let result = updater.update(&mut index, &mut list, &mut indexed, &no_files);
    assert!(result.is_err());
    assert_eq!(indexed, 2);
    assert_eq!(list.since(indexed), &[b.clone()]);
    assert_eq!(index.get("dog").map(|e| e.total_count()), Some(2));

    write(temp_dir.path(), "b.txt", "bird");
    let report = updater
        .update(&mut index, &mut list, &mut indexed, &no_files)
        .unwrap();

    assert_eq!(report.stats.files, 1);
    assert_eq!(indexed, 3);
    assert_eq!(index.get("dog").map(|e| e.total_count()), Some(2));
    assert_eq!(index.get("bird").map(|e| e.total_count()), Some(1));
}

#[test]
fn test_engine_update_does_not_double_count_after_failure() {
    let temp_dir = TempDir::new().unwrap();
    let a = write(temp_dir.path(), "a.txt", "cat");
    let c = write(temp_dir.path(), "c.txt", "dog dog");
    let b = write(temp_dir.path(), "b.txt", "bird");

    let mut engine = Engine::new(IndexConfig::default()).unwrap();
    engine.load_files([&a]);
    engine.create().unwrap();

    engine.load_files([&c, &b]);
    fs::remove_file(&b).unwrap();
    assert!(engine.update(Vec::<PathBuf>::new()).is_err());

    write(temp_dir.path(), "b.txt", "bird");
    engine.create().unwrap();

    let count = |word: &str| engine.index().get(word).map(|e| e.total_count());
    assert_eq!(count("dog"), Some(2));
    assert_eq!(count("bird"), Some(1));
    assert_eq!(count("cat"), Some(1));
    assert!(engine.is_up_to_date());
}
