//! External bundler and Sass compiler adapter.
//!
//! Drives `esbuild` and the Dart `sass` CLI through `std::process::Command`.
//! Bundling, transpilation and CSS post-processing semantics belong to those
//! tools; this adapter only translates a [`ValidatedBuild`] into their flags.

use std::ffi::OsString;
use std::process::Command;

use super::{AssetCompiler, BuildConfig, BuildError, BuildKind, BuildOutput, ValidatedBuild};

/// Default JavaScript bundler executable.
pub const DEFAULT_JS_BUNDLER: &str = "esbuild";

/// Default Sass compiler executable.
pub const DEFAULT_SASS_COMPILER: &str = "sass";

const BOWER_COMPONENTS: &str = "bower_components";

/// [`AssetCompiler`] that shells out to configurable executables.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    pub js_bundler: String,
    pub sass_compiler: String,
}

impl Default for ExternalCompiler {
    fn default() -> Self {
        Self {
            js_bundler: DEFAULT_JS_BUNDLER.to_string(),
            sass_compiler: DEFAULT_SASS_COMPILER.to_string(),
        }
    }
}

impl ExternalCompiler {
    fn run(
        &self,
        program: &str,
        build: &ValidatedBuild,
        args: Vec<OsString>,
    ) -> Result<BuildOutput, BuildError> {
        if let Some(parent) = build.output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::OutputDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        tracing::info!(kind = %build.kind, entry = %build.entry.display(), program, "Compiling");

        let output = Command::new(program)
            .args(args)
            .current_dir(&build.cwd)
            .env("NODE_PATH", build.cwd.join(BOWER_COMPONENTS))
            .output()
            .map_err(|e| BuildError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::Failed {
                kind: build.kind,
                entry: build.entry.clone(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(BuildOutput {
            kind: build.kind,
            path: build.output.clone(),
        })
    }
}

impl AssetCompiler for ExternalCompiler {
    fn build_js(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
        let build = config.validate(BuildKind::JavaScript)?;
        self.run(&self.js_bundler, &build, js_args(&build))
    }

    fn build_sass(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
        let build = config.validate(BuildKind::Sass)?;
        self.run(&self.sass_compiler, &build, sass_args(&build))
    }
}

/// `esbuild` arguments for a validated JavaScript build.
pub(crate) fn js_args(build: &ValidatedBuild) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        build.entry.clone().into(),
        "--bundle".into(),
        "--main-fields=browser,main".into(),
    ];

    let mut outfile = OsString::from("--outfile=");
    outfile.push(&build.output);
    args.push(outfile);

    if build.source_maps {
        args.push("--sourcemap".into());
    }
    if build.env.is_production() {
        args.push("--minify".into());
        args.push(r#"--define:process.env.NODE_ENV="production""#.into());
    }
    args
}

/// `sass` arguments for a validated Sass build.
pub(crate) fn sass_args(build: &ValidatedBuild) -> Vec<OsString> {
    let mut load_path = OsString::from("--load-path=");
    load_path.push(build.cwd.join(BOWER_COMPONENTS));

    let style = if build.env.is_production() {
        "--style=compressed"
    } else {
        "--style=expanded"
    };
    let source_map = if build.source_maps {
        "--source-map"
    } else {
        "--no-source-map"
    };

    vec![
        load_path,
        style.into(),
        source_map.into(),
        build.entry.clone().into(),
        build.output.clone().into(),
    ]
}
