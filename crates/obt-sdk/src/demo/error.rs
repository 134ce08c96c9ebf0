//! Error types for demo resolution and rendering.
//!
//! Messages match what component authors already see from the build service,
//! so tooling that greps the text keeps working.

use std::path::PathBuf;

use super::config::DemoFilter;
use crate::manifest::ManifestError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(
        "Could not build demo templates. Missing configuration for the component directory: \"cwd\"."
    )]
    MissingRoot,

    #[error("Couldn't find demos config path, checked: {}", checked.join(","))]
    ConfigNotFound { checked: Vec<String> },

    #[error("{} is not valid JSON.", path.display())]
    MalformedConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "The \"demos\" field in {} must be a list or an object of demos, found {found}.",
        path.display()
    )]
    InvalidDemosField { path: PathBuf, found: &'static str },

    #[error("Demos with the same name were found. Give them unique names and try again.")]
    DuplicateNames,

    #[error("Demo at position {index} has no name. Give it a unique name and try again.")]
    UnnamedDemo { index: usize },

    #[error("No demos were found{}.", filter.as_ref().map(|f| format!(" for {f}")).unwrap_or_default())]
    NoMatchingDemos { filter: Option<DemoFilter> },

    #[error("Demo '{name}' has invalid configuration: {source}")]
    InvalidDemo {
        name: String,
        source: serde_json::Error,
    },

    #[error("{0}")]
    ManifestRead(#[from] ManifestError),

    #[error("Failed to read page template {}: {source}", path.display())]
    PageTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Demo template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Failed to load demo data from {}: {reason}", path.display())]
    DataFile { path: PathBuf, reason: String },

    #[error("Failed to load partials from {}: {source}", dir.display())]
    Partials {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render demo '{demo}': {reason}")]
    Render { demo: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Demo '{demo}' render task failed: {reason}")]
    Task { demo: String, reason: String },
}
