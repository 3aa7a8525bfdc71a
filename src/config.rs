//! Configuration for docsync runs.
//!
//! The defaults describe the conky repository layout, so running from the repository root needs no configuration.
//! A `docsync.toml` at the root (or a file passed with `--config`) overrides individual keys:
//!
//! ```toml
//! objects_sources = ["src/core.cc"]
//! configs_sources = ["src/conky.cc", "src/display-x11.cc"]
//! objects_doc = "doc/variables.yaml"
//! doc_projection = "name"
//! ```
//!
//! Relative paths are resolved against the run's root directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use docsync_core::vocab::syntax::SyntaxFormat;

use crate::docs::{DocProjection, DocReader};
use crate::error::{SyncError, SyncResult};
use crate::regen::TargetFile;

/// Name of the configuration file looked up at the root.
pub const CONFIG_FILE_NAME: &str = "docsync.toml";

/// Docsync configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Source files declaring text objects
    pub objects_sources: Vec<PathBuf>,
    /// Source files declaring config settings
    pub configs_sources: Vec<PathBuf>,
    /// Documentation of text objects
    pub objects_doc: PathBuf,
    /// Documentation of config settings
    pub configs_doc: PathBuf,
    /// Key holding the entry sequence in both documents; empty means the root is the sequence
    pub doc_entries_key: String,
    /// Dotted path from an entry to its identifier
    pub doc_projection: String,
    /// Vim syntax file to regenerate
    pub vim_syntax: PathBuf,
    /// Nano rc file to regenerate
    pub nano_syntax: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            objects_sources: vec![PathBuf::from("src/core.cc")],
            configs_sources: vec![PathBuf::from("src/conky.cc")],
            objects_doc: PathBuf::from("doc/variables.yaml"),
            configs_doc: PathBuf::from("doc/config_settings.yaml"),
            doc_entries_key: "values".to_string(),
            doc_projection: "term.command.option".to_string(),
            vim_syntax: PathBuf::from("extras/vim/syntax/conkyrc.vim"),
            nano_syntax: PathBuf::from("extras/nano/conky.nanorc"),
        }
    }
}

impl SyncConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str, origin: &Path) -> SyncResult<Self> {
        toml::from_str(text).map_err(|e| SyncError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Load `explicit` if given, else `<root>/docsync.toml` if it exists, else the defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> SyncResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using configuration file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Set the object source files
    pub fn with_objects_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.objects_sources = sources;
        self
    }

    /// Set the config-setting source files
    pub fn with_configs_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.configs_sources = sources;
        self
    }

    /// Set both documentation files
    pub fn with_docs(mut self, objects_doc: impl Into<PathBuf>, configs_doc: impl Into<PathBuf>) -> Self {
        self.objects_doc = objects_doc.into();
        self.configs_doc = configs_doc.into();
        self
    }

    /// Set the documentation projection path
    pub fn with_doc_projection(mut self, dotted: impl Into<String>) -> Self {
        self.doc_projection = dotted.into();
        self
    }

    /// Set both syntax targets
    pub fn with_targets(mut self, vim: impl Into<PathBuf>, nano: impl Into<PathBuf>) -> Self {
        self.vim_syntax = vim.into();
        self.nano_syntax = nano.into();
        self
    }

    /// Documentation reader for this configuration.
    pub fn doc_reader(&self) -> DocReader {
        let key = Some(self.doc_entries_key.clone()).filter(|k| !k.is_empty());
        DocReader::new(key, DocProjection::parse(&self.doc_projection))
    }

    /// Inputs the analysis reads, resolved against `root`.
    pub fn input_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.objects_sources
            .iter()
            .chain(&self.configs_sources)
            .chain([&self.objects_doc, &self.configs_doc])
            .map(|p| root.join(p))
            .collect()
    }

    /// Syntax files to regenerate, resolved against `root`.
    pub fn targets(&self, root: &Path) -> Vec<TargetFile> {
        vec![
            TargetFile {
                path: root.join(&self.vim_syntax),
                format: SyntaxFormat::Vim,
            },
            TargetFile {
                path: root.join(&self.nano_syntax),
                format: SyntaxFormat::Nano,
            },
        ]
    }
}
