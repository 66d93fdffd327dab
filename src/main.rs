mod apply;
mod cli;
mod common;
mod config;
mod error;
mod fetch;
mod pipeline;
mod query;
mod search;
mod select;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::Cli;
use crate::config::{FileConfig, Settings};
use crate::pipeline::{Outcome, Pipeline};
use crate::ui::prelude::*;

fn main() {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    ui::init(format, !cli.no_color);

    if let Err(err) = run(&cli) {
        emit(Level::Error, "wpchg.error", &format!("Error: {:#}", err), None);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file = FileConfig::load().context("loading config file")?;
    let settings = Settings::resolve(cli, file)?;
    ui::set_verbose(settings.verbose);

    if settings.save_dir_defaulted {
        debug(
            "wpchg.config.save_dir",
            &format!(
                "No save path specified, using temp folder: {}",
                settings.save_dir.display()
            ),
        );
    }

    let pipeline = Pipeline::from_settings(&settings)?;
    let outcome = pipeline.run()?;
    match &outcome {
        Outcome::NoMatch { .. } => debug("wpchg.nomatch", "No acceptable image found"),
        Outcome::Completed { path, .. } => emit(
            Level::Debug,
            "wpchg.completed",
            &format!("Image found! {}", path.display()),
            Some(serde_json::json!({ "path": path.display().to_string() })),
        ),
    }
    debug(
        "wpchg.done",
        &format!("Done in attempts: {}", outcome.scanned()),
    );

    Ok(())
}
