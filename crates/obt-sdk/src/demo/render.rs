//! Demo page rendering.
//!
//! The page template embeds the demo's own template text through
//! `{{{oDemoTpl}}}`. Since that text can itself contain variables and partials,
//! the page is rendered twice: the second pass runs over the output of the
//! first. Exactly two passes are made, so a demo template can nest one level of
//! self-reference and no more.
//!
//! Partial tags are inlined from the [`PartialMap`] before each pass compiles,
//! so the engine never resolves partials against the filesystem.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::config::DemoRecord;
use super::data::load_demo_data;
use super::partials::{expand_partials, load_partials, PartialMap};
use super::{DemoBuildContext, DemoError};

/// Output subdirectory of the component root.
pub const DEMO_OUTPUT_DIR: &str = "demos";

/// Built-in page shell wrapped around every demo.
pub const PAGE_TEMPLATE: &str = include_str!("../../templates/page.mustache");

const CSS_BUNDLE_URL: &str = "/v2/bundles/css?modules=";
const JS_BUNDLE_URL: &str = "/v2/bundles/js?modules=";
const MAIN_SASS: &str = "main.scss";
const MAIN_JS: &str = "main.js";

/// A rendered demo page, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedDemo {
    pub name: String,
    pub content: String,
}

/// `<link>` tag loading the module's stylesheet bundle plus its dependencies.
pub fn stylesheet_tag(
    module_name: &str,
    sass: Option<&str>,
    dependencies: &[String],
    brand: Option<&str>,
) -> String {
    let modules = bundle_modules(module_name, sass, MAIN_SASS, dependencies);
    let brand = brand
        .map(|b| format!("&brand={b}"))
        .unwrap_or_default();
    format!(r#"<link rel="stylesheet" href="{CSS_BUNDLE_URL}{modules}{brand}" />"#)
}

/// `<script>` tag loading the module's script bundle plus its dependencies.
pub fn script_tag(module_name: &str, js: Option<&str>, dependencies: &[String]) -> String {
    let modules = bundle_modules(module_name, js, MAIN_JS, dependencies);
    format!(r#"<script src="{JS_BUNDLE_URL}{modules}"></script>"#)
}

/// Module list for a bundle URL; a non-conventional entry is appended as `:/<path>`.
fn bundle_modules(
    module_name: &str,
    entry: Option<&str>,
    conventional: &str,
    dependencies: &[String],
) -> String {
    let own = match entry {
        Some(entry) if entry != conventional => format!("{module_name}:/{entry}"),
        _ => module_name.to_string(),
    };

    std::iter::once(own)
        .filter(|m| !m.is_empty())
        .chain(dependencies.iter().cloned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Render one demo page.
pub fn render_demo(ctx: &DemoBuildContext, demo: &DemoRecord) -> Result<RenderedDemo, DemoError> {
    let relative = demo.template.as_deref().unwrap_or_default();
    let template_path = ctx.root.join(relative.trim_start_matches('/'));
    if !template_path.is_file() {
        return Err(DemoError::TemplateNotFound {
            path: template_path,
        });
    }

    let data = load_demo_data(&ctx.root, demo.data.as_ref(), &ctx.script_runner)?;
    let template_text =
        std::fs::read_to_string(&template_path).map_err(|e| DemoError::Read {
            path: template_path.clone(),
            source: e,
        })?;
    let context = render_context(ctx, demo, data, template_text);

    let partials_dir = template_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.root.clone());
    let partials = load_partials(&partials_dir).map_err(|e| DemoError::Partials {
        dir: partials_dir.clone(),
        source: e,
    })?;

    tracing::info!(demo = %demo.name, output = %format!("{DEMO_OUTPUT_DIR}/{}.html", demo.name), "Rendering");
    let content = render_twice(&ctx.page_template, &context, &partials, &demo.name)?;

    Ok(RenderedDemo {
        name: demo.name.clone(),
        content,
    })
}

/// Write a rendered demo to `<root>/demos/<name>.html`.
pub fn write_demo(root: &Path, rendered: &RenderedDemo) -> Result<PathBuf, DemoError> {
    let dir = root.join(DEMO_OUTPUT_DIR);
    std::fs::create_dir_all(&dir).map_err(|e| DemoError::Write {
        path: dir.clone(),
        source: e,
    })?;

    let path = dir.join(format!("{}.html", rendered.name));
    std::fs::write(&path, &rendered.content).map_err(|e| DemoError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

fn render_context(
    ctx: &DemoBuildContext,
    demo: &DemoRecord,
    mut data: Map<String, Value>,
    template_text: String,
) -> Value {
    let fields = [
        (
            "oDemoTitle",
            Value::String(format!("{}: {} demo", ctx.module_name, demo.name)),
        ),
        (
            "oDemoStyle",
            Value::String(stylesheet_tag(
                &ctx.module_name,
                demo.sass.as_deref(),
                &demo.dependencies,
                demo.brand.as_deref(),
            )),
        ),
        (
            "oDemoScript",
            Value::String(script_tag(
                &ctx.module_name,
                demo.js.as_deref(),
                &demo.dependencies,
            )),
        ),
        (
            "oDemoDocumentClasses",
            Value::String(demo.document_classes().to_string()),
        ),
        ("oDemoTpl", Value::String(template_text)),
        (
            "oDemoBrowserFeatures",
            Value::Array(
                ctx.browser_features
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        ),
    ];

    for (key, value) in fields {
        data.insert(key.to_string(), value);
    }
    Value::Object(data)
}

fn render_twice(
    page_template: &str,
    context: &Value,
    partials: &PartialMap,
    demo: &str,
) -> Result<String, DemoError> {
    let first = render_pass(page_template, context, partials, demo)?;
    render_pass(&first, context, partials, demo)
}

fn render_pass(
    text: &str,
    context: &Value,
    partials: &PartialMap,
    demo: &str,
) -> Result<String, DemoError> {
    let render_error = |e: mustache::Error| DemoError::Render {
        demo: demo.to_string(),
        reason: e.to_string(),
    };

    mustache::compile_str(&expand_partials(text, partials))
        .map_err(render_error)?
        .render_to_string(context)
        .map_err(render_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::sync::Arc;

    fn context(root: &Path) -> DemoBuildContext {
        DemoBuildContext {
            root: root.to_path_buf(),
            module_name: "o-test".to_string(),
            browser_features: vec!["promises".to_string(), "fetch".to_string()],
            page_template: Arc::from(PAGE_TEMPLATE),
            script_runner: "node".to_string(),
        }
    }

    fn demo(value: Value) -> DemoRecord {
        serde_json::from_value(value).unwrap()
    }

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_stylesheet_tag_default_entry() {
        assert_eq!(
            stylesheet_tag("o-test", Some("main.scss"), &[], None),
            r#"<link rel="stylesheet" href="/v2/bundles/css?modules=o-test" />"#
        );
    }

    #[test]
    fn test_stylesheet_tag_with_entry_dependencies_and_brand() {
        let deps = vec!["o-fonts@^3".to_string(), "o-normalise".to_string()];
        assert_eq!(
            stylesheet_tag("o-test", Some("demos/src/demo.scss"), &deps, Some("internal")),
            r#"<link rel="stylesheet" href="/v2/bundles/css?modules=o-test:/demos/src/demo.scss,o-fonts@^3,o-normalise&brand=internal" />"#
        );
    }

    #[test]
    fn test_script_tag_without_entry() {
        let deps = vec!["o-autoinit".to_string()];
        assert_eq!(
            script_tag("o-test", None, &deps),
            r#"<script src="/v2/bundles/js?modules=o-test,o-autoinit"></script>"#
        );
    }

    #[test]
    fn test_script_tag_without_module_name() {
        assert_eq!(
            script_tag("", None, &["o-autoinit".to_string()]),
            r#"<script src="/v2/bundles/js?modules=o-autoinit"></script>"#
        );
    }

    #[test]
    fn test_render_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_demo(
            &context(dir.path()),
            &demo(json!({"name": "test", "template": "demos/src/missing.mustache"})),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Demo template not found: {}",
                dir.path().join("demos/src/missing.mustache").display()
            )
        );
    }

    #[test]
    fn test_render_synthesized_fields() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "demos/src/test.mustache", "<div>test</div>");

        let rendered = render_demo(
            &context(dir.path()),
            &demo(json!({
                "name": "test",
                "template": "demos/src/test.mustache",
                "sass": "demos/src/demo.scss",
                "bodyClasses": "legacy-classes"
            })),
        )
        .unwrap();

        assert_eq!(rendered.name, "test");
        assert!(rendered.content.contains("<div>test</div>"));
        assert!(rendered.content.contains("<title>o-test: test demo</title>"));
        assert!(rendered.content.contains("legacy-classes"));
        assert!(rendered
            .content
            .contains("/v2/polyfill.min.js?features=promises,fetch,\""));
        assert!(rendered
            .content
            .contains("/v2/bundles/css?modules=o-test:/demos/src/demo.scss"));
        assert!(rendered
            .content
            .contains(r#"<script src="/v2/bundles/js?modules=o-test"></script>"#));
    }

    #[test]
    fn test_second_pass_resolves_variables_in_demo_template() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "demos/src/test.mustache",
            "<p>{{someVar}}</p><h1>{{oDemoTitle}}</h1>",
        );

        let rendered = render_demo(
            &context(dir.path()),
            &demo(json!({
                "name": "test",
                "template": "demos/src/test.mustache",
                "data": {"someVar": "resolved"}
            })),
        )
        .unwrap();

        assert!(rendered.content.contains("<p>resolved</p>"));
        assert!(rendered.content.contains("<h1>o-test: test demo</h1>"));
        assert!(!rendered.content.contains("{{someVar}}"));
    }

    #[test]
    fn test_exactly_two_passes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "demos/src/test.mustache", "<p>{{{outer}}}</p>");

        let rendered = render_demo(
            &context(dir.path()),
            &demo(json!({
                "name": "test",
                "template": "demos/src/test.mustache",
                "data": {"outer": "{{inner}}", "inner": "too deep"}
            })),
        )
        .unwrap();

        assert!(rendered.content.contains("<p>{{inner}}</p>"));
    }

    #[test]
    fn test_nested_partials() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "demos/src/test.mustache",
            "<div>test</div>\n{{>partial1}}\n{{>partials/partial2}}",
        );
        write(dir.path(), "demos/src/partial1.mustache", "<div>partial1</div>");
        write(
            dir.path(),
            "demos/src/partials/partial2.mustache",
            "<div>partial2</div>",
        );

        let rendered = render_demo(
            &context(dir.path()),
            &demo(json!({"name": "test", "template": "demos/src/test.mustache"})),
        )
        .unwrap();

        assert!(rendered.content.contains("<div>partial1</div>"));
        assert!(rendered.content.contains("<div>partial2</div>"));
    }

    fn render_data(template: &str, data: Value) -> String {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "demos/src/test.mustache", template);
        render_demo(
            &context(dir.path()),
            &demo(json!({
                "name": "test",
                "template": "demos/src/test.mustache",
                "data": data
            })),
        )
        .unwrap()
        .content
    }

    #[test]
    fn test_list_section() {
        let content = render_data(
            "<ul>{{#items}}<li>{{name}}</li>{{/items}}</ul>",
            json!({"items": [{"name": "one"}, {"name": "two"}]}),
        );
        assert!(content.contains("<ul><li>one</li><li>two</li></ul>"));
    }

    #[test]
    fn test_boolean_section() {
        let content = render_data(
            "<p>{{#show}}yes{{/show}}</p><i>{{#hide}}no{{/hide}}</i>",
            json!({"show": true, "hide": false}),
        );
        assert!(content.contains("<p>yes</p>"));
        assert!(content.contains("<i></i>"));
    }

    #[test]
    fn test_inverted_section() {
        let content = render_data(
            "<p>{{^items}}none{{/items}}</p>",
            json!({"items": []}),
        );
        assert!(content.contains("<p>none</p>"));

        let content = render_data(
            "<p>{{^items}}none{{/items}}</p>",
            json!({"items": [1]}),
        );
        assert!(content.contains("<p></p>"));
    }

    #[test]
    fn test_implicit_iterator() {
        let content = render_data("<p>{{#xs}}{{.}};{{/xs}}</p>", json!({"xs": ["a", "b"]}));
        assert!(content.contains("<p>a;b;</p>"));
    }

    #[test]
    fn test_dotted_names() {
        let content = render_data("<p>{{a.b}}</p>", json!({"a": {"b": "nested"}}));
        assert!(content.contains("<p>nested</p>"));
    }

    #[test]
    fn test_unreferenced_sibling_template_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "demos/src/test.mustache", "<div>test</div>");
        write(
            dir.path(),
            "demos/src/other.mustache",
            "{{#rows}}{{.}}{{/rows}}{{^rows}}empty{{/rows}}",
        );

        let rendered = render_demo(
            &context(dir.path()),
            &demo(json!({"name": "test", "template": "demos/src/test.mustache"})),
        )
        .unwrap();

        assert!(rendered.content.contains("<div>test</div>"));
        assert!(!rendered.content.contains("empty"));
    }

    #[test]
    fn test_unclosed_section_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "demos/src/test.mustache", "{{#open}}never closed");

        let err = render_demo(
            &context(dir.path()),
            &demo(json!({"name": "test", "template": "demos/src/test.mustache"})),
        )
        .unwrap_err();
        assert!(matches!(err, DemoError::Render { ref demo, .. } if demo == "test"));
    }

    #[test]
    fn test_write_demo_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_demo(
            dir.path(),
            &RenderedDemo {
                name: "pa11y".to_string(),
                content: "<html></html>".to_string(),
            },
        )
        .unwrap();

        assert_eq!(path, dir.path().join("demos/pa11y.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
