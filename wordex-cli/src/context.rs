use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use wordex::{Engine, IndexConfig};

use crate::output::{self, OutputFormat};

/// Read the index configuration, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    let Some(path) = path else {
        return Ok(IndexConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: IndexConfig = toml::from_str(&content).context("Failed to parse config TOML")?;
    config.validate()?;
    Ok(config)
}

/// Create an engine and load the given files, reporting rejected ones.
pub fn open_engine(config: IndexConfig, files: &[PathBuf], format: OutputFormat) -> Result<Engine> {
    let mut engine = Engine::new(config)?;
    let admission = engine.load_files(files);
    output::print_admission(&admission, format)?;
    Ok(engine)
}

/// Like [`open_engine`], but also builds the index and fails if nothing was loaded.
pub fn build_engine(
    config: IndexConfig,
    files: &[PathBuf],
    format: OutputFormat,
) -> Result<Engine> {
    let mut engine = open_engine(config, files, format)?;
    if engine.files().is_empty() {
        bail!("No valid files to index.");
    }
    engine.create().context("Failed to create the index")?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wordex::MatchPolicy;

    #[test]
    fn test_load_config_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Exact);
    }

    #[test]
    fn test_load_config_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordex.toml");
        fs::write(
            &path,
            "match_policy = \"prefix\"\nmax_word_len = 20\n").unwrap(
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Prefix);
        assert_eq!(config.max_word_len, 20);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordex.toml");
        fs::write(&path, "max_word_len = 0\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_build_engine_requires_valid_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "hello").unwrap();

        let result = build_engine(IndexConfig::default(), &[path], OutputFormat::Table);
        assert!(result.is_err());
    }
}
