//! `skiff inspect`: classify the externals of a saved stats file.

use skiff_bundler::{Extractor, parse_stats};

use crate::cli::InspectArgs;
use crate::error::{Result, ResultExt};
use crate::report::{Manifest, render_summary};
use crate::ui;

pub async fn execute(args: InspectArgs) -> Result<()> {
    let json = tokio::fs::read_to_string(&args.stats)
        .await
        .with_path(&args.stats)?;

    let default_output = args
        .stats
        .parent()
        .map(|dir| dir.join(".webpack"))
        .unwrap_or_else(|| ".webpack".into());
    let compilations = parse_stats(&json, &default_output)?.into_vec();

    let extractor = Extractor::new();
    let results = compilations
        .iter()
        .map(|stats| extractor.extract(stats))
        .collect::<skiff_bundler::Result<Vec<_>>>()?;

    if args.json {
        println!("{}", Manifest::from_results(&results).to_json()?);
    } else {
        print!("{}", render_summary(&results, ui::should_use_color()));
        for error in results.iter().filter_map(|r| r.error()) {
            ui::error(error);
        }
    }
    Ok(())
}
