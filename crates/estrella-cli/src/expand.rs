//! `expand` command handler.

use std::path::Path;

use anyhow::Context;
use estrella_core::AppConfig;
use estrella_etl::{expand_table, CsvTable, ExpandOptions};

/// Command-line flags win over configuration.
pub(crate) fn resolve_options(
    config: &AppConfig,
    rows: Option<usize>,
    year: Option<i32>,
    seed: Option<u64>,
) -> ExpandOptions {
    ExpandOptions {
        target_rows: rows.unwrap_or(config.sample_rows),
        year: year.unwrap_or(config.sample_year),
        seed: seed.or(config.rng_seed),
    }
}

/// Read the seed sample, expand it, and write the result.
///
/// # Errors
///
/// Returns an error naming the file if the seed cannot be read or the output
/// cannot be written, or if expansion itself fails.
pub(crate) fn run_expand(
    input: &Path,
    output: &Path,
    options: &ExpandOptions,
) -> anyhow::Result<()> {
    let seed = CsvTable::read_path(input)
        .with_context(|| format!("failed to read seed sample {}", input.display()))?;
    let expanded = expand_table(&seed, options)
        .with_context(|| format!("failed to expand {}", input.display()))?;
    expanded
        .write_path(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "expanded {} seed rows into {} rows -> {}",
        seed.len(),
        expanded.len(),
        output.display()
    );
    Ok(())
}
