//! Partial discovery and inlining for demo templates.

use std::collections::HashMap;
use std::path::Path;

use crate::files;

/// Partial name → raw template text.
pub type PartialMap = HashMap<String, String>;

const PARTIAL_OPEN: &str = "{{>";
const TAG_CLOSE: &str = "}}";
const MAX_PARTIAL_DEPTH: usize = 16;

/// Load every mustache file under `dir`, keyed by its slash-joined relative
/// path without extension (`folder-1/example-3.mustache` → `folder-1/example-3`).
pub fn load_partials(dir: &Path) -> std::io::Result<PartialMap> {
    let mut partials = PartialMap::new();

    for path in files::mustache_files(dir)? {
        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let name = partial_name(relative);
        let contents = std::fs::read_to_string(&path)?;
        partials.insert(name, contents);
    }

    Ok(partials)
}

/// Replace every `{{>name}}` tag in `template` with that partial's text,
/// following partials that include other partials.
///
/// Unknown partials render empty. Inclusion stops at a fixed depth, so a
/// partial that includes itself terminates.
pub fn expand_partials(template: &str, partials: &PartialMap) -> String {
    expand(template, partials, 0)
}

fn expand(template: &str, partials: &PartialMap, depth: usize) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PARTIAL_OPEN) {
        let tag = &rest[start + PARTIAL_OPEN.len()..];
        let Some(end) = tag.find(TAG_CLOSE) else {
            break;
        };
        out.push_str(&rest[..start]);

        let name = tag[..end].trim();
        match partials.get(name) {
            Some(body) if depth < MAX_PARTIAL_DEPTH => {
                out.push_str(&expand(body, partials, depth + 1));
            }
            Some(_) => tracing::warn!(partial = name, "Partials nested too deeply; skipping"),
            None => tracing::debug!(partial = name, "Unknown partial"),
        }
        rest = &tag[end + TAG_CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

fn partial_name(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
