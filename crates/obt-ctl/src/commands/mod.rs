//! Command handlers for the `obt` CLI.
//!
//! Each module handles one subcommand, delegating the work to `obt-sdk`.

pub(crate) mod build;
pub(crate) mod demo;

pub(crate) use build::handle_build_command;
pub(crate) use demo::handle_demo_command;

use obt_sdk::build::BuildError;
use obt_sdk::demo::DemoError;
use obt_sdk::manifest::ManifestError;

/// Failure of a CLI command; every variant exits with status 1.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Demo(#[from] DemoError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{failed} of {total} demos failed to build")]
    DemosFailed { failed: usize, total: usize },

    #[error("{failed} build(s) failed")]
    BuildsFailed { failed: usize },

    #[error("{kind} build task failed: {reason}")]
    Task { kind: String, reason: String },
}
