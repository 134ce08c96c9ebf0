//! File-system helpers for component directories.
//!
//! Locates the module name, the build output folder, the main Sass/JS entry
//! points declared in `bower.json`, and every mustache template under a
//! directory.

use std::path::{Path, PathBuf};

use crate::manifest::{BowerManifest, ManifestError};

/// Extension of template partial files.
pub const MUSTACHE_EXTENSION: &str = "mustache";

const BUILD_FOLDER: &str = "build";
const MAIN_SASS: &str = "main.scss";
const MAIN_JS: &str = "main.js";

/// Default build output folder for a component: `<dir>/build/`.
pub fn build_folder_path(dir: &Path) -> PathBuf {
    dir.join(BUILD_FOLDER)
}

/// Module name declared in `bower.json`, or an empty string when there is none.
pub fn module_name(dir: &Path) -> Result<String, ManifestError> {
    Ok(BowerManifest::load(dir)?
        .and_then(|bower| bower.name)
        .unwrap_or_default())
}

/// Path to `main.scss` when it both exists and is declared in `bower.json`.
pub fn main_sass_path(dir: &Path) -> Result<Option<PathBuf>, ManifestError> {
    main_file_path(dir, MAIN_SASS)
}

/// Path to `main.js` when it both exists and is declared in `bower.json`.
pub fn main_js_path(dir: &Path) -> Result<Option<PathBuf>, ManifestError> {
    main_file_path(dir, MAIN_JS)
}

fn main_file_path(dir: &Path, file: &str) -> Result<Option<PathBuf>, ManifestError> {
    let path = dir.join(file);
    let exists = path.is_file();
    let declared = BowerManifest::load(dir)?.is_some_and(|bower| bower.declares_main(file));

    match (declared, exists) {
        (true, true) => Ok(Some(path)),
        (true, false) => {
            tracing::warn!(file, "Listed in bower.json main, but the file doesn't exist");
            Ok(None)
        }
        (false, true) => {
            tracing::warn!(file, "File exists but is not listed in bower.json main");
            Ok(None)
        }
        (false, false) => Ok(None),
    }
}

/// List every `.mustache` file under `base`, recursing into subdirectories.
///
/// Paths are returned sorted.
pub fn mustache_files(base: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_mustache_files(base, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_mustache_files(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_mustache_files(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == MUSTACHE_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}
