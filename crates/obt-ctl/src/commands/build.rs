//! `obt build`: compile a component's JavaScript and Sass.

use std::path::PathBuf;
use std::sync::Arc;

use obt_sdk::build::{AssetCompiler, BuildConfig, BuildKind, BuildOutput};
use obt_sdk::files;

use super::CommandError;
use crate::cli_config::CliConfig;
use crate::output;
use crate::BuildArgs;

pub(crate) async fn handle_build_command(
    args: BuildArgs,
    cli_config: &CliConfig,
) -> Result<(), CommandError> {
    let (js, sass) = if args.js.is_none() && args.sass.is_none() {
        (files::main_js_path(&args.cwd)?, files::main_sass_path(&args.cwd)?)
    } else {
        (args.js.clone(), args.sass.clone())
    };

    if js.is_none() && sass.is_none() {
        output::warning("Nothing to build: no JavaScript or Sass entry point found.");
        return Ok(());
    }

    let build_folder = args
        .build_folder
        .clone()
        .unwrap_or_else(|| files::build_folder_path(&args.cwd));
    let config = |entry: Option<PathBuf>, output_name: Option<String>| {
        entry.map(|entry| BuildConfig {
            entry: Some(entry),
            cwd: Some(args.cwd.clone()),
            build_folder: Some(build_folder.clone()),
            env: args.env,
            source_maps: args.source_maps,
            output_name,
        })
    };

    let jobs: Vec<(BuildKind, BuildConfig)> = [
        (BuildKind::JavaScript, config(js, args.build_js.clone())),
        (BuildKind::Sass, config(sass, args.build_css.clone())),
    ]
    .into_iter()
    .filter_map(|(kind, config)| config.map(|c| (kind, c)))
    .collect();

    let compiler: Arc<dyn AssetCompiler> = Arc::new(cli_config.compiler());
    let builds = jobs.into_iter().map(|(kind, config)| {
        let compiler = Arc::clone(&compiler);
        async move {
            tokio::task::spawn_blocking(move || match kind {
                BuildKind::JavaScript => compiler.build_js(&config),
                BuildKind::Sass => compiler.build_sass(&config),
            })
            .await
            .map_err(|e| CommandError::Task {
                kind: kind.to_string(),
                reason: e.to_string(),
            })
        }
    });

    let mut failed = 0;
    for result in futures::future::join_all(builds).await {
        match result.and_then(|r| r.map_err(CommandError::from)) {
            Ok(BuildOutput { kind, path }) => {
                output::success(format!("Built {kind}: {}", path.display()));
            }
            Err(e) => {
                output::error(e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CommandError::BuildsFailed { failed });
    }
    output::label("Environment", args.env);
    Ok(())
}
