//! Component manifest parsing (`bower.json` and `origami.json`).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Package manifest declaring the module name and its legacy `main` files.
pub const BOWER_MANIFEST: &str = "bower.json";

/// Origami component manifest declaring browser features and demos.
pub const ORIGAMI_MANIFEST: &str = "origami.json";

/// Package manifest parsed from `bower.json`.
#[derive(Debug, Default, Deserialize)]
pub struct BowerManifest {
    /// Module name (e.g., "o-test").
    #[serde(default)]
    pub name: Option<String>,

    /// Entry files declared by the package, either a single path or a list.
    #[serde(default)]
    pub main: Option<MainFiles>,
}

/// The `main` field of `bower.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MainFiles {
    Single(String),
    Many(Vec<String>),
}

impl MainFiles {
    /// Whether `file` is declared as a main file.
    pub fn contains(&self, file: &str) -> bool {
        match self {
            Self::Single(main) => main == file,
            Self::Many(mains) => mains.iter().any(|m| m == file),
        }
    }
}

impl BowerManifest {
    /// Load `bower.json` from a component directory.
    ///
    /// Returns `Ok(None)` when the directory has no `bower.json`.
    pub fn load(dir: &Path) -> Result<Option<Self>, ManifestError> {
        let path = dir.join(BOWER_MANIFEST);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Whether `file` is listed in the `main` declaration.
    pub fn declares_main(&self, file: &str) -> bool {
        self.main.as_ref().is_some_and(|main| main.contains(file))
    }
}

/// The subset of `origami.json` needed to render demo pages.
#[derive(Debug, Default, Deserialize)]
pub struct OrigamiManifest {
    /// Polyfill features the component depends on.
    #[serde(default, rename = "browserFeatures")]
    pub browser_features: Option<BrowserFeatures>,
}

/// Browser features declared in `origami.json`.
#[derive(Debug, Default, Deserialize)]
pub struct BrowserFeatures {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

impl OrigamiManifest {
    /// Load `origami.json` from a component directory.
    ///
    /// Unlike [`BowerManifest::load`], a missing file is an error: every
    /// component that builds demos is expected to carry one.
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        read_json(&dir.join(ORIGAMI_MANIFEST))
    }

    /// Required features followed by optional ones, without duplicates.
    pub fn browser_features(&self) -> Vec<String> {
        let Some(features) = &self.browser_features else {
            return Vec::new();
        };

        let mut merged: Vec<String> = Vec::new();
        for feature in features.required.iter().chain(&features.optional) {
            if !merged.contains(feature) {
                merged.push(feature.clone());
            }
        }
        merged
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{source} in {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_bower_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BowerManifest::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_bower_main_as_string() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BOWER_MANIFEST),
            r#"{"name": "o-test", "main": "main.scss"}"#,
        )
        .unwrap();

        let bower = BowerManifest::load(dir.path()).unwrap().unwrap();
        assert_eq!(bower.name.as_deref(), Some("o-test"));
        assert!(bower.declares_main("main.scss"));
        assert!(!bower.declares_main("main.js"));
    }

    #[test]
    fn test_bower_main_as_list() {
        let bower: BowerManifest =
            serde_json::from_str(r#"{"name": "o-test", "main": ["main.js", "main.scss"]}"#)
                .unwrap();
        assert!(bower.declares_main("main.js"));
        assert!(bower.declares_main("main.scss"));
    }

    #[test]
    fn test_bower_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BOWER_MANIFEST), "{ not json").unwrap();
        let result = BowerManifest::load(dir.path());
        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn test_browser_features_required_first_without_duplicates() {
        let manifest: OrigamiManifest = serde_json::from_str(
            r#"{"browserFeatures": {
                "required": ["promises", "fetch"],
                "optional": ["IntersectionObserver", "fetch"]
            }}"#,
        )
        .unwrap();

        assert_eq!(
            manifest.browser_features(),
            vec!["promises", "fetch", "IntersectionObserver"]
        );
    }

    #[test]
    fn test_browser_features_absent() {
        let manifest: OrigamiManifest = serde_json::from_str(r#"{"name": "o-test"}"#).unwrap();
        assert!(manifest.browser_features().is_empty());
    }

    #[test]
    fn test_origami_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = OrigamiManifest::load(dir.path());
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
