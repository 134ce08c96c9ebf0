//! `obt demo`: render every configured demo page.

use obt_sdk::demo::{build_demos, DemoOptions};

use super::CommandError;
use crate::cli_config::CliConfig;
use crate::output;
use crate::DemoArgs;

pub(crate) async fn handle_demo_command(
    args: DemoArgs,
    cli_config: &CliConfig,
) -> Result<(), CommandError> {
    let options = DemoOptions {
        page_template: cli_config.page_template_path(&args.cwd),
        script_runner: cli_config.script_runner.clone(),
        config_path: args.demo_config,
        filter: args.demo_filter,
        brand: args.brand,
        root: args.cwd,
    };

    let report = build_demos(&options).await?;

    output::header(format!("Demos from {}", report.config_path.display()));
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => output::success(format!("{}: {}", outcome.name, path.display())),
            Err(e) => output::error(format!("{}: {e}", outcome.name)),
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        output::dim("Pages that built were kept. Rerun with --verbose for more detail.");
        return Err(CommandError::DemosFailed {
            failed,
            total: report.outcomes.len(),
        });
    }
    Ok(())
}
