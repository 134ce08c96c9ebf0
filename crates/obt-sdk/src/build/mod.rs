//! JavaScript and Sass builds.
//!
//! Compilation is delegated to external tools behind the [`AssetCompiler`]
//! trait. This module owns configuration validation and the shape of a
//! build result; [`ExternalCompiler`] is the process-spawning implementation.

mod compiler;
mod config;
mod error;

use std::path::PathBuf;

pub use compiler::{ExternalCompiler, DEFAULT_JS_BUNDLER, DEFAULT_SASS_COMPILER};
pub use config::{BuildConfig, BuildEnv, BuildKind, ValidatedBuild};
pub use error::BuildError;

/// A file written by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub kind: BuildKind,
    pub path: PathBuf,
}

/// Compiles a component's script and stylesheet entry points.
pub trait AssetCompiler: Send + Sync {
    /// Bundle `config.entry` into a single JavaScript file.
    fn build_js(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError>;

    /// Compile `config.entry` from Sass to CSS.
    fn build_sass(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError>;
}
