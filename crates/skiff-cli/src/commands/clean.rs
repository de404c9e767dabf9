//! `skiff clean`: remove every build's output directory.

use crate::cleanup::{self, Removal};
use crate::cli::CleanArgs;
use crate::commands::Project;
use crate::error::Result;
use crate::ui;

pub async fn execute(args: CleanArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    let removals = cleanup::remove_output_dirs(&project.output_dirs()).await;

    let mut removed = 0;
    for removal in &removals {
        match removal {
            Removal::Removed(path) => {
                removed += 1;
                ui::info(&format!("Removed {}", path.display()));
            }
            Removal::Missing(_) => {}
            Removal::Failed(path, err) => {
                ui::warning(&format!("Could not remove {}: {err}", path.display()));
            }
        }
    }

    ui::success(&format!("Removed {removed} output director{}", if removed == 1 { "y" } else { "ies" }));
    Ok(())
}
