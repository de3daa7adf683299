//! Record input configuration.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result as AnyhowResult, anyhow};
use clap::Args;
use seekpage_core::MemorySource;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Where the records to paginate come from.
///
/// Records are read either as a JSON array or as one JSON object per line.
/// Without `--input` they are read from standard input.
///
/// # Environment Variables
///
/// - `SEEKPAGE_INPUT` - Path to the records file
///
/// # Examples
///
/// ```bash
/// seekpage --input records.json
/// cat records.jsonl | seekpage
/// ```
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct InputConfig {
    /// Path to a JSON array or JSON lines file, `-` for standard input
    #[arg(short, long, env = "SEEKPAGE_INPUT")]
    #[serde(default)]
    pub input: Option<PathBuf>,
}

impl InputConfig {
    /// Validates that the input file exists when one is given.
    pub fn validate(&self) -> AnyhowResult<()> {
        match self.path() {
            Some(path) if !path.is_file() => {
                Err(anyhow!("Input file {} does not exist.", path.display()))
            }
            _ => Ok(()),
        }
    }

    /// Returns the input file, `None` for standard input.
    pub fn path(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// Reads every record into memory.
    pub fn load(&self) -> AnyhowResult<MemorySource> {
        let source = match self.path() {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                MemorySource::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to read records from {}", path.display()))?
            }
            None => MemorySource::from_reader(io::stdin().lock())
                .context("failed to read records from standard input")?,
        };

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            input = %self.describe(),
            records = source.len(),
            "loaded records"
        );

        Ok(source)
    }

    /// Logs the input configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            input = %self.describe(),
            "input configuration"
        );
    }

    fn describe(&self) -> String {
        self.path()
            .map_or_else(|| "<stdin>".to_owned(), |path| path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn stdin_by_default() {
        let config = InputConfig::default();
        assert!(config.path().is_none());
        assert!(config.validate().is_ok());

        let config = InputConfig {
            input: Some(PathBuf::from("-")),
        };
        assert!(config.path().is_none());
    }

    #[test]
    fn reject_missing_files() {
        let config = InputConfig {
            input: Some(PathBuf::from("/definitely/not/here.json")),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_json_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 1, "name": "a"}}"#).unwrap();
        writeln!(file, r#"{{"id": 2, "name": "b"}}"#).unwrap();

        let config = InputConfig {
            input: Some(file.path().to_path_buf()),
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.load().unwrap().len(), 2);
    }

    #[test]
    fn load_reports_malformed_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": 1}},").unwrap();

        let config = InputConfig {
            input: Some(file.path().to_path_buf()),
        };
        let err = config.load().unwrap_err();
        assert!(err.to_string().starts_with("failed to read records from"));
    }
}
