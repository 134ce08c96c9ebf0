//! Shared build tooling for Origami components: demo rendering, manifest reading,
//! and the asset compiler collaborator.
//!
//! This crate provides the capabilities consumed by `obt-ctl` (CLI). It holds no
//! terminal or argument-parsing concerns.
//!
//! # Modules
//!
//! - [`build`]: Build configuration validation and external JS/Sass compiler adapter
//! - [`demo`]: Demo config resolution, partial loading, and two-pass page rendering
//! - [`files`]: Component file helpers (module name, main files, mustache discovery)
//! - [`manifest`]: `bower.json` and `origami.json` parsing

pub mod build;
pub mod demo;
pub mod files;
pub mod manifest;
