//! Demo configuration discovery, normalisation, and defaulting.
//!
//! Demo config lives in `origami.json` today, but components published before
//! that convention keep it in `demos/src/config.json`, and older still declare
//! `demos` as an object keyed by demo name. Every shape is folded into a single
//! list of [`DemoRecord`]s here so nothing downstream has to care.

use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{DemoError, DemoOptions};
use crate::manifest::ORIGAMI_MANIFEST;

/// Legacy demo config location, still preferred over `origami.json` when present.
pub const LEGACY_CONFIG_PATH: &str = "demos/src/config.json";

/// Allow-list of demo names to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoFilter(Vec<String>);

impl DemoFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn allows(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl FromStr for DemoFilter {
    type Err = Infallible;

    /// Parse a comma-joined list such as `"test1,test2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(
            s.split(',').map(str::trim).filter(|n| !n.is_empty()),
        ))
    }
}

impl fmt::Display for DemoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// A single demo after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRecord {
    /// Unique demo name; also the output file stem.
    pub name: String,

    /// Template path relative to the component root.
    #[serde(default)]
    pub template: Option<String>,

    /// Template data, inline or as a path to a data file.
    #[serde(default)]
    pub data: Option<DemoData>,

    /// Sass entry point for the demo's stylesheet bundle.
    #[serde(default)]
    pub sass: Option<String>,

    /// JavaScript entry point for the demo's script bundle.
    #[serde(default)]
    pub js: Option<String>,

    /// Other modules loaded alongside this one.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub document_classes: Option<String>,

    /// Superseded by `documentClasses`.
    #[serde(default)]
    pub body_classes: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,
}

impl DemoRecord {
    /// Classes for the root element, falling back to the legacy `bodyClasses`.
    pub fn document_classes(&self) -> &str {
        match self.document_classes.as_deref() {
            Some(classes) if !classes.is_empty() => classes,
            _ => self.body_classes.as_deref().unwrap_or_default(),
        }
    }
}

/// The `data` field of a demo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DemoData {
    /// Path to a JSON or script file, relative to the component root.
    Path(String),
    /// Inline object.
    Inline(Map<String, Value>),
}

/// Demo records resolved from a config file.
#[derive(Debug)]
pub struct ResolvedDemos {
    /// Absolute path of the config file that was used.
    pub config_path: PathBuf,
    pub demos: Vec<DemoRecord>,
}

#[derive(Debug, Deserialize)]
struct DemoConfigSource {
    /// Either shape of [`DemoEntries`]; checked after parsing.
    #[serde(default)]
    demos: Option<Value>,

    #[serde(default, rename = "demosDefaults")]
    demos_defaults: Option<Value>,

    /// Older name for `demosDefaults`.
    #[serde(default)]
    options: Option<Value>,
}

#[derive(Debug)]
enum DemoEntries {
    Records(Vec<Value>),
    Legacy(Map<String, Value>),
}

impl DemoEntries {
    fn from_value(config_path: &Path, demos: Value) -> Result<Self, DemoError> {
        match demos {
            Value::Null => Ok(Self::Records(Vec::new())),
            Value::Array(records) => Ok(Self::Records(records)),
            Value::Object(map) => Ok(Self::Legacy(map)),
            other @ (Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                Err(DemoError::InvalidDemosField {
                    path: config_path.to_path_buf(),
                    found: json_kind(&other),
                })
            }
        }
    }

    /// Fold either shape into a list of raw records.
    ///
    /// Legacy maps come back in key order; that format never promised one.
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Records(records) => records,
            Self::Legacy(map) => map
                .into_iter()
                .map(|(name, fields)| {
                    let mut record = match fields {
                        Value::Object(fields) => fields,
                        _ => Map::new(),
                    };
                    record.insert("name".to_string(), Value::String(name));
                    Value::Object(record)
                })
                .collect(),
        }
    }
}

/// Locate, parse, validate, filter, and default the demo configuration.
///
/// All failures here happen before any file is written.
pub fn resolve_demos(options: &DemoOptions) -> Result<ResolvedDemos, DemoError> {
    if options.root.as_os_str().is_empty() {
        return Err(DemoError::MissingRoot);
    }

    let config_path = locate_config(&options.root, options.config_path.as_deref())?;
    tracing::info!(config = %config_path.display(), "Building demos");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| DemoError::Read {
        path: config_path.clone(),
        source: e,
    })?;
    let source: DemoConfigSource =
        serde_json::from_str(&contents).map_err(|e| DemoError::MalformedConfig {
            path: config_path.clone(),
            source: e,
        })?;

    let records = match source.demos {
        Some(demos) => DemoEntries::from_value(&config_path, demos)?.into_records(),
        None => Vec::new(),
    };
    ensure_unique_names(&records)?;

    if !config_path.ends_with(ORIGAMI_MANIFEST) {
        tracing::warn!(
            config = %config_path.display(),
            "Please move your demo config into origami.json, see \
             http://origami.ft.com/docs/syntax/origamijson"
        );
    }

    let shared = source.demos_defaults.or(source.options);
    let mut demos = Vec::new();
    for record in records {
        let name = record_name(&record).unwrap_or_default().to_string();
        if options.filter.as_ref().is_some_and(|f| !f.allows(&name)) {
            continue;
        }

        let mut demo = apply_defaults(record, shared.as_ref())
            .map_err(|e| DemoError::InvalidDemo { name, source: e })?;
        if let Some(brand) = &options.brand {
            demo.brand = Some(brand.clone());
        }
        demos.push(demo);
    }

    if demos.is_empty() {
        return Err(DemoError::NoMatchingDemos {
            filter: options.filter.clone(),
        });
    }

    Ok(ResolvedDemos { config_path, demos })
}

/// Find the first existing config file, checking an override alone if given.
fn locate_config(root: &Path, config_override: Option<&Path>) -> Result<PathBuf, DemoError> {
    let candidates: Vec<String> = match config_override {
        Some(path) => vec![path.to_string_lossy().into_owned()],
        None => vec![LEGACY_CONFIG_PATH.to_string(), ORIGAMI_MANIFEST.to_string()],
    };

    for candidate in &candidates {
        let path = root.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }

    Err(DemoError::ConfigNotFound {
        checked: candidates.into_iter().rev().collect(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn record_name(record: &Value) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}

fn ensure_unique_names(records: &[Value]) -> Result<(), DemoError> {
    let mut seen: Vec<&str> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let name = record_name(record).ok_or(DemoError::UnnamedDemo { index })?;
        if seen.contains(&name) {
            return Err(DemoError::DuplicateNames);
        }
        seen.push(name);
    }
    Ok(())
}

/// Layer built-in defaults < shared defaults < the record itself.
fn apply_defaults(record: Value, shared: Option<&Value>) -> Result<DemoRecord, serde_json::Error> {
    let mut merged = json!({
        "documentClasses": "",
        "description": "",
    });
    if let Some(shared) = shared.filter(|s| s.is_object()) {
        deep_merge(&mut merged, shared);
    }
    deep_merge(&mut merged, &record);
    serde_json::from_value(merged)
}

/// Merge `source` into `target`; objects merge key by key, everything else is replaced.
fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}
