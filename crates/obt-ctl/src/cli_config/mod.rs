//! CLI configuration for external tools and page rendering.
//!
//! Read from `.obt.toml` in the component directory or
//! `~/.config/obt.toml`. Every key is optional; unset keys fall back to the
//! SDK defaults (`esbuild`, `sass`, `node`, the built-in page template).

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::{Path, PathBuf};

use obt_sdk::build::ExternalCompiler;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// JavaScript bundler executable (default: `esbuild`).
    pub js_bundler: Option<String>,

    /// Sass compiler executable (default: `sass`).
    pub sass_compiler: Option<String>,

    /// Interpreter for script demo data files (default: `node`).
    pub script_runner: Option<String>,

    /// Replacement demo page template, relative to the component directory.
    pub page_template: Option<String>,
}

impl CliConfig {
    /// Compiler using the configured executables.
    pub(crate) fn compiler(&self) -> ExternalCompiler {
        let defaults = ExternalCompiler::default();
        ExternalCompiler {
            js_bundler: self.js_bundler.clone().unwrap_or(defaults.js_bundler),
            sass_compiler: self
                .sass_compiler
                .clone()
                .unwrap_or(defaults.sass_compiler),
        }
    }

    /// Resolve `page-template` against the component directory.
    pub(crate) fn page_template_path(&self, cwd: &Path) -> Option<PathBuf> {
        self.page_template
            .as_deref()
            .map(|path| cwd.join(loader::expand_path(path)))
    }
}
