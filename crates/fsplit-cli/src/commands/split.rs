use crate::Cli;
use anyhow::{Context, Result};
use fsplit_render::{HumanWriter, JsonWriter};
use std::io::Write;

pub fn run(cli: &Cli) -> Result<()> {
    let dir = &cli.package_path;
    tracing::info!(dir = %dir.display(), "splitting package");

    let report = fsplit_split::split_package(dir).context("Error running fsplit")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        JsonWriter::new().write_to(&mut out, &report)?;
    } else if !cli.is_quiet() {
        if report.is_noop() && report.skipped.is_empty() {
            writeln!(out, "No Go files in {}", dir.display())?;
        } else {
            HumanWriter::new().write_to(&mut out, &report)?;
        }
    }
    out.flush()?;

    Ok(())
}
