//! Error types for asset compilation.

use std::path::PathBuf;

use super::BuildKind;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Could not build {kind}. Missing configuration for the {what}: \"{key}\".")]
    MissingConfiguration {
        kind: BuildKind,
        what: &'static str,
        key: &'static str,
    },

    #[error("could not create build output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{kind} build of {} failed: {stderr}", entry.display())]
    Failed {
        kind: BuildKind,
        entry: PathBuf,
        stderr: String,
    },
}
