//! Configuration management.
//!
//! Values come from defaults, then an optional TOML file, then CLI flags.
//!
//! ```toml
//! repo_path = "/path/to/repo"
//! notes_ref = "review"
//!
//! [logging]
//! format = "json"
//! filter = "gitnotes=debug"
//! ```

use crate::models::NotesRef;
use crate::observability::LogFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for gitnotes.
#[derive(Debug, Clone)]
pub struct GitNotesConfig {
    /// Path to the git repository.
    pub repo_path: PathBuf,
    /// Notes ref used when a handle does not name one.
    pub notes_ref: NotesRef,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Repository path.
    pub repo_path: Option<String>,
    /// Default notes ref.
    pub notes_ref: Option<String>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// "pretty" or "json".
    pub format: Option<String>,
    /// Filter directive.
    pub filter: Option<String>,
}

impl Default for GitNotesConfig {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            notes_ref: NotesRef::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl GitNotesConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid value.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or holds an invalid value.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir, then `~/.config/gitnotes/`.
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("gitnotes").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("gitnotes")
                .join("config.toml"),
        ];

        candidates
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| match Self::load_from_file(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                    None
                },
            })
            .unwrap_or_default()
    }

    /// Converts a `ConfigFile` to `GitNotesConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(repo_path) = file.repo_path {
            config.repo_path = PathBuf::from(repo_path);
        }
        if let Some(notes_ref) = file.notes_ref {
            config = config.with_notes_ref(NotesRef::new(notes_ref))?;
        }
        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                config.logging.format = format.parse()?;
            }
            config.logging.filter = logging.filter;
        }

        Ok(config)
    }

    /// Sets the repository path.
    #[must_use]
    pub fn with_repo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.repo_path = path.into();
        self
    }

    /// Sets the default notes ref.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if git would reject the ref name.
    pub fn with_notes_ref(mut self, notes_ref: NotesRef) -> Result<Self> {
        if !notes_ref.is_valid() {
            return Err(Error::InvalidInput(format!(
                "invalid notes ref '{notes_ref}'"
            )));
        }
        self.notes_ref = notes_ref;
        Ok(self)
    }
}
