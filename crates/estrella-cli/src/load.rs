//! `load` command handler.
//!
//! Builds the star schema from the expanded CSV, then replaces the six tables
//! in one transaction. A dry run stops after the build and prints the
//! data-quality report as JSON.

use std::path::Path;

use anyhow::Context;
use estrella_core::AppConfig;
use estrella_etl::{build_star_schema, CsvTable};

/// Build from `input` and load, or only report when `dry_run` is set.
///
/// # Errors
///
/// Returns an error if the input cannot be read or lacks a required column,
/// if the database is unreachable, or if the replace transaction fails.
pub(crate) async fn run_load(
    config: &AppConfig,
    input: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let table = CsvTable::read_path(input)
        .with_context(|| format!("failed to read expanded CSV {}", input.display()))?;
    let output = build_star_schema(&table)
        .with_context(|| format!("failed to build star schema from {}", input.display()))?;

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
        return Ok(());
    }

    let pool = estrella_db::connect_pool_from_app_config(config).await?;
    let summary =
        estrella_db::replace_star_schema(&pool, &output.schema, config.db_insert_batch_rows)
            .await
            .context("star-schema load failed; previous tables left unchanged")?;
    pool.close().await;

    for table in &summary.tables {
        println!("{:<20} {:>8} rows", table.table, table.rows);
    }
    if !output.report.dropped_rows.is_empty() {
        println!(
            "{} of {} input rows dropped for an unparseable timestamp",
            output.report.dropped_rows.len(),
            output.report.rows_read
        );
    }
    Ok(())
}
