//! Watched domain list sources
//!
//! The list is re-read at the start of every scan cycle so it can be
//! edited while the process runs.

use crate::error::DomainListError;
use std::path::{Path, PathBuf};

/// Where the watched domain list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource {
    /// A fixed list (CLI `--domains`, tests)
    Inline(Vec<String>),
    /// A JSON array of domain names
    File(PathBuf),
    /// A comma-separated environment variable, falling back to a JSON file
    /// when the variable is unset or empty
    EnvOrFile { var: String, file: PathBuf },
}

impl DomainSource {
    /// Load the current domain list
    pub fn load(&self) -> Result<Vec<String>, DomainListError> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Load using a custom environment lookup
    pub fn load_with<F>(&self, lookup: F) -> Result<Vec<String>, DomainListError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Self::Inline(domains) => Ok(domains.clone()),
            Self::File(path) => read_domains_file(path),
            Self::EnvOrFile { var, file } => match lookup(var) {
                Some(raw) if !raw.is_empty() => {
                    let domains = parse_domain_list(&raw);
                    tracing::debug!(var = %var, count = domains.len(), "loaded domains from environment");
                    Ok(domains)
                }
                _ => read_domains_file(file),
            },
        }
    }

    /// Human-readable description of the source
    pub fn describe(&self) -> String {
        match self {
            Self::Inline(_) => "command line".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::EnvOrFile { var, file } => format!("${} or {}", var, file.display()),
        }
    }
}

/// Split a comma-separated list, trimming whitespace and dropping empty entries
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_domains_file(path: &Path) -> Result<Vec<String>, DomainListError> {
    let list_error = |reason: String| DomainListError {
        source_name: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| list_error(e.to_string()))?;
    let domains: Vec<String> =
        serde_json::from_str(&content).map_err(|e| list_error(e.to_string()))?;

    tracing::debug!(path = %path.display(), count = domains.len(), "loaded domains from file");
    Ok(domains)
}
