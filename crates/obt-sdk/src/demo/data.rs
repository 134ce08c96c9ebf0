//! Demo data resolution.
//!
//! `data` is either an inline object or a path to a file. JSON files are read
//! directly; anything else is treated as a CommonJS module and evaluated with
//! the configured script runner (`node` by default), which prints the export
//! as JSON. A module exporting a function is called with no arguments first.

use std::path::Path;
use std::process::Command;

use serde_json::{Map, Value};

use super::config::DemoData;
use super::DemoError;

/// Default executable used to evaluate script data files.
pub const DEFAULT_SCRIPT_RUNNER: &str = "node";

const EXPORT_SCRIPT: &str = "const m = require(process.argv[1]); \
    const d = typeof m === 'function' ? m() : m; \
    process.stdout.write(JSON.stringify(d === undefined ? {} : d));";

/// Resolve a demo's data into a JSON object.
pub(crate) fn load_demo_data(
    root: &Path,
    data: Option<&DemoData>,
    script_runner: &str,
) -> Result<Map<String, Value>, DemoError> {
    match data {
        None => Ok(Map::new()),
        Some(DemoData::Inline(map)) => Ok(map.clone()),
        Some(DemoData::Path(relative)) => {
            let path = root.join(relative);
            if !path.is_file() {
                tracing::warn!(path = %path.display(), "Demo data file not found, using empty data");
                return Ok(Map::new());
            }

            let raw = if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::read_to_string(&path).map_err(|e| DemoError::DataFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
            } else {
                evaluate_script(&path, script_runner)?
            };

            parse_object(&path, &raw)
        }
    }
}

fn evaluate_script(path: &Path, script_runner: &str) -> Result<String, DemoError> {
    let data_error = |reason: String| DemoError::DataFile {
        path: path.to_path_buf(),
        reason,
    };

    let absolute = std::fs::canonicalize(path).map_err(|e| data_error(e.to_string()))?;
    tracing::debug!(path = %absolute.display(), runner = script_runner, "Evaluating demo data script");

    let output = Command::new(script_runner)
        .arg("-e")
        .arg(EXPORT_SCRIPT)
        .arg(&absolute)
        .output()
        .map_err(|e| data_error(format!("failed to run '{script_runner}': {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(data_error(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn parse_object(path: &Path, raw: &str) -> Result<Map<String, Value>, DemoError> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DemoError::DataFile {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(DemoError::DataFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
