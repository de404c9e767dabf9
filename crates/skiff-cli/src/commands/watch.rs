//! `skiff watch`: build, then rebuild on every source change.
//!
//! The first build only arms the watcher. Every later successful rebuild
//! runs the `--exec` command.

use std::time::Duration;

use skiff_bundler::SessionError;
use tokio::process::Command;

use crate::cli::WatchArgs;
use crate::commands::{Project, build};
use crate::error::{CliError, Result};
use crate::ui;
use crate::watch::{SourceWatcher, WatchMode, next_batch};

pub async fn execute(args: WatchArgs) -> Result<()> {
    let project = Project::load(&args.build.project)?.with_build_args(&args.build);
    let exec = args.exec.as_deref().map(parse_command).transpose()?;

    let (_watcher, mut changes) = SourceWatcher::new(
        project.base.clone(),
        project.output_dirs(),
        WatchMode::from_poll(args.poll),
    )?;
    let quiet = Duration::from_millis(args.debounce);

    ui::info("Watch service...");
    rebuild(&project).await?;

    loop {
        ui::info("Waiting for changes ...");
        let batch = tokio::select! {
            batch = next_batch(&mut changes, quiet) => batch,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(batch) = batch else {
            return Ok(());
        };

        tracing::debug!(changed = batch.len(), "sources changed");
        ui::info("Sources changed.");
        if !rebuild(&project).await? {
            continue;
        }
        if let Some(command) = &exec {
            run_downstream(command).await;
        }
    }
}

/// Build once. Compilation errors are reported and the watch continues;
/// anything else ends it. Returns whether the build succeeded.
async fn rebuild(project: &Project) -> Result<bool> {
    match build::run(project).await {
        Ok(outcome) => {
            tracing::debug!(compilations = outcome.results().len(), "rebuild finished");
            Ok(true)
        }
        Err(SessionError::Build { message, .. }) => {
            ui::error(&format!("Compilation failed:\n\n{message}"));
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_command(command: &str) -> Result<Vec<String>> {
    let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        return Err(CliError::InvalidArgument("--exec needs a command".to_string()));
    }
    Ok(parts)
}

async fn run_downstream(command: &[String]) {
    let Some((program, args)) = command.split_first() else {
        return;
    };
    tracing::info!("Invoke {}", command.join(" "));
    match Command::new(program).args(args).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => ui::warning(&format!("`{}` exited with {status}", command.join(" "))),
        Err(err) => ui::warning(&format!("Failed to run `{}`: {err}", command.join(" "))),
    }
}
