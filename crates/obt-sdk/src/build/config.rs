//! Build configuration and validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::BuildError;

const DEFAULT_JS_OUTPUT: &str = "main.js";
const DEFAULT_CSS_OUTPUT: &str = "main.css";

/// Which asset a build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
    JavaScript,
    Sass,
}

impl BuildKind {
    fn entry_key(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Sass => "sass",
        }
    }

    fn default_output(self) -> &'static str {
        match self {
            Self::JavaScript => DEFAULT_JS_OUTPUT,
            Self::Sass => DEFAULT_CSS_OUTPUT,
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaScript => f.write_str("JavaScript"),
            Self::Sass => f.write_str("Sass"),
        }
    }
}

/// Build environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildEnv {
    #[default]
    Development,
    Production,
}

impl BuildEnv {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for BuildEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for BuildEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "unknown build environment '{other}' (expected development or production)"
            )),
        }
    }
}

/// Configuration for a single JavaScript or Sass build.
///
/// Relative `entry` and `build_folder` paths are resolved against `cwd`.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Source file to compile.
    pub entry: Option<PathBuf>,
    /// Component directory.
    pub cwd: Option<PathBuf>,
    /// Output directory.
    pub build_folder: Option<PathBuf>,
    pub env: BuildEnv,
    /// Force source maps on outside development.
    pub source_maps: bool,
    /// Output file name; `main.js` or `main.css` when unset.
    pub output_name: Option<String>,
}

impl BuildConfig {
    /// Validate the configuration for `kind`, resolving paths and defaults.
    pub fn validate(&self, kind: BuildKind) -> Result<ValidatedBuild, BuildError> {
        let missing = |what, key| BuildError::MissingConfiguration { kind, what, key };

        let entry = self
            .entry
            .as_ref()
            .ok_or_else(|| missing("main path to build", kind.entry_key()))?;
        let cwd = self
            .cwd
            .as_ref()
            .ok_or_else(|| missing("component directory", "cwd"))?;
        let build_folder = self
            .build_folder
            .as_ref()
            .ok_or_else(|| missing("build output directory", "buildFolder"))?;

        let output_name = self
            .output_name
            .clone()
            .unwrap_or_else(|| kind.default_output().to_string());

        Ok(ValidatedBuild {
            kind,
            entry: cwd.join(entry),
            cwd: cwd.clone(),
            output: cwd.join(build_folder).join(output_name),
            env: self.env,
            source_maps: self.source_maps || self.env == BuildEnv::Development,
        })
    }
}

/// A build configuration with every required value present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBuild {
    pub kind: BuildKind,
    pub entry: PathBuf,
    pub cwd: PathBuf,
    /// Full path of the file to write.
    pub output: PathBuf,
    pub env: BuildEnv,
    pub source_maps: bool,
}
