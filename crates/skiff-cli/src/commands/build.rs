//! `skiff build`: run every configured build once.

use std::sync::Arc;
use std::time::Instant;

use skiff_bundler::{
    BuildRunner, CommandEngine, Compilation, Session, SessionError, SessionOutcome,
};

use crate::cleanup;
use crate::cli::BuildArgs;
use crate::commands::Project;
use crate::error::Result;
use crate::report::{Manifest, StatsLogger, render_summary};
use crate::ui;

/// Execute the build command.
///
/// 1. Load the configuration and apply command-line overrides
/// 2. Remove stale output directories unless they are kept
/// 3. Run the session
/// 4. Print the external dependency manifest
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start = Instant::now();
    let project = Project::load(&args.project)?.with_build_args(&args);

    match run(&project).await {
        Ok(outcome) => {
            print_outcome(outcome.results(), args.json)?;
            ui::success(&format!(
                "Built {} configuration(s) in {}",
                project.config.builds.len(),
                ui::format_duration(start.elapsed())
            ));
            Ok(())
        }
        Err(SessionError::Build { message, outcome }) => {
            if args.json {
                print_outcome(outcome.results(), true)?;
            }
            Err(SessionError::Build { message, outcome }.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Clean, then build every configuration of `project`.
pub async fn run(project: &Project) -> std::result::Result<SessionOutcome, SessionError> {
    cleanup::cleanup(&project.output_dirs(), project.config.keep_output_directory()).await;

    let logger = StatsLogger::new(project.config.stats_options(), ui::should_use_color());
    let runner = BuildRunner::new(Arc::new(CommandEngine::new()))
        .reporter(Arc::new(move |stats: &Compilation| logger.log(stats)));

    let mut session = Session::new(project.config.command_specs(&project.base));
    if let Some(options) = project.config.session_options() {
        session = session.with_options(options);
    }

    tracing::info!("Bundling {} configuration(s)", project.config.builds.len());
    session.run(&runner).await
}

fn print_outcome(results: &[skiff_bundler::BuildResult], json: bool) -> Result<()> {
    if json {
        println!("{}", Manifest::from_results(results).to_json()?);
    } else {
        print!("{}", render_summary(results, ui::should_use_color()));
    }
    Ok(())
}
