//! Demo page building.
//!
//! A run resolves the demo configuration once, reads the component manifest
//! once into a [`DemoBuildContext`], then renders every demo as its own unit of
//! work on the blocking pool. Configuration problems fail the whole run before
//! anything is written; a problem with one demo is recorded in that demo's
//! [`DemoOutcome`] and does not stop its siblings. Pages already written are
//! never removed.
//!
//! # Modules
//!
//! - [`config`]: Config file discovery, legacy-shape normalisation, filtering, defaults
//! - [`partials`]: Recursive partial discovery keyed by relative path
//! - [`render`]: Asset tags and the two-pass page render

pub mod config;
mod data;
mod error;
pub mod partials;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

pub use config::{resolve_demos, DemoData, DemoFilter, DemoRecord, ResolvedDemos};
pub use data::DEFAULT_SCRIPT_RUNNER;
pub use error::DemoError;
pub use render::{render_demo, write_demo, RenderedDemo, PAGE_TEMPLATE};

use crate::files;
use crate::manifest::OrigamiManifest;

/// Inputs for one demo build run.
#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    /// Component root directory.
    pub root: PathBuf,

    /// Explicit config file, relative to the root. Skips the default search.
    pub config_path: Option<PathBuf>,

    /// Only build demos with these names.
    pub filter: Option<DemoFilter>,

    /// Brand applied to every demo's stylesheet bundle.
    pub brand: Option<String>,

    /// Replacement for the built-in page template.
    pub page_template: Option<PathBuf>,

    /// Executable used to evaluate script data files.
    pub script_runner: Option<String>,
}

impl DemoOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Read-only state shared by every demo render in a run.
#[derive(Debug)]
pub struct DemoBuildContext {
    pub root: PathBuf,
    pub module_name: String,
    pub browser_features: Vec<String>,
    pub page_template: Arc<str>,
    pub script_runner: String,
}

impl DemoBuildContext {
    /// Read the manifests and page template for a run.
    pub fn load(options: &DemoOptions) -> Result<Self, DemoError> {
        let module_name = files::module_name(&options.root)?;
        let browser_features = OrigamiManifest::load(&options.root)?.browser_features();

        let page_template: Arc<str> = match &options.page_template {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| DemoError::PageTemplate {
                    path: path.clone(),
                    source: e,
                })?
                .into(),
            None => Arc::from(PAGE_TEMPLATE),
        };

        Ok(Self {
            root: options.root.clone(),
            module_name,
            browser_features,
            page_template,
            script_runner: options
                .script_runner
                .clone()
                .unwrap_or_else(|| DEFAULT_SCRIPT_RUNNER.to_string()),
        })
    }
}

/// Result of building a single demo.
#[derive(Debug)]
pub struct DemoOutcome {
    pub name: String,
    /// Path of the written page, or why it could not be built.
    pub result: Result<PathBuf, DemoError>,
}

/// Completion report for a demo run, in config order.
#[derive(Debug)]
pub struct DemoReport {
    pub config_path: PathBuf,
    pub outcomes: Vec<DemoOutcome>,
}

impl DemoReport {
    /// Paths of every page written.
    pub fn built(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Demos that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &DemoError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Collapse into the written paths, or the first failure.
    pub fn into_result(self) -> Result<Vec<PathBuf>, DemoError> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}

/// Build every configured demo into `<root>/demos/`.
pub async fn build_demos(options: &DemoOptions) -> Result<DemoReport, DemoError> {
    let resolved = resolve_demos(options)?;
    let ctx = Arc::new(DemoBuildContext::load(options)?);

    let renders = resolved.demos.into_iter().map(|demo| {
        let ctx = Arc::clone(&ctx);
        async move {
            let name = demo.name.clone();
            tracing::info!(demo = %name, "Building demo");

            let result = tokio::task::spawn_blocking(move || {
                let rendered = render_demo(&ctx, &demo)?;
                write_demo(&ctx.root, &rendered)
            })
            .await
            .unwrap_or_else(|e| {
                Err(DemoError::Task {
                    demo: name.clone(),
                    reason: e.to_string(),
                })
            });

            if let Err(e) = &result {
                tracing::error!(demo = %name, error = %e, "Demo failed");
            }
            DemoOutcome { name, result }
        }
    });

    let outcomes = futures::future::join_all(renders).await;

    Ok(DemoReport {
        config_path: resolved.config_path,
        outcomes,
    })
}
