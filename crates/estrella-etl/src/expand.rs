//! Synthetic dataset expansion: random dates, resampling, column renaming.

use chrono::{Datelike, Days, NaiveDate};
use estrella_core::columns::MARCA_DE_TIEMPO;
use estrella_core::translate_column;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EtlError;
use crate::table::CsvTable;
use crate::timestamp::EXPANDED_TIMESTAMP_FORMAT;

pub const DEFAULT_TARGET_ROWS: usize = 10_000;
pub const DEFAULT_SAMPLE_YEAR: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    pub target_rows: usize,
    pub year: i32,
    /// Fixed RNG seed. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            target_rows: DEFAULT_TARGET_ROWS,
            year: DEFAULT_SAMPLE_YEAR,
            seed: None,
        }
    }
}

/// Expand `seed` into a table of `options.target_rows` rows.
///
/// Every seed row first receives a date drawn uniformly from the year, then
/// rows are sampled with replacement and headers translated to Spanish. The
/// date lands in whichever column is named `marca_de_tiempo` after
/// translation, or in a new trailing column when there is none.
///
/// # Errors
///
/// [`EtlError::EmptySeed`] when there is nothing to sample from and
/// [`EtlError::InvalidYear`] when the year has no calendar in chrono's range.
pub fn expand_table(seed: &CsvTable, options: &ExpandOptions) -> Result<CsvTable, EtlError> {
    if seed.is_empty() {
        return Err(EtlError::EmptySeed);
    }
    let (first_day, day_count) = year_bounds(options.year)?;

    let rng_seed = options.seed.unwrap_or_else(rand::random::<u64>);
    let mut rng = StdRng::seed_from_u64(rng_seed);
    tracing::info!(
        seed_rows = seed.len(),
        target_rows = options.target_rows,
        year = options.year,
        rng_seed,
        "expanding sample"
    );

    let mut headers: Vec<String> = seed
        .headers
        .iter()
        .map(|h| translate_column(h).to_string())
        .collect();
    let timestamp_column = match headers.iter().position(|h| h == MARCA_DE_TIEMPO) {
        Some(idx) => idx,
        None => {
            headers.push(MARCA_DE_TIEMPO.to_string());
            headers.len() - 1
        }
    };

    let dated: Vec<Vec<String>> = seed
        .rows
        .iter()
        .map(|row| {
            let offset = rng.random_range(0..day_count);
            let date = first_day + Days::new(offset);
            let mut row = row.clone();
            row.resize(headers.len(), String::new());
            row[timestamp_column] = date.format(EXPANDED_TIMESTAMP_FORMAT).to_string();
            row
        })
        .collect();

    let rows: Vec<Vec<String>> = (0..options.target_rows)
        .map(|_| dated[rng.random_range(0..dated.len())].clone())
        .collect();

    tracing::info!(rows = rows.len(), columns = headers.len(), "sample expanded");
    Ok(CsvTable { headers, rows })
}

/// First day of `year` and the number of days in it.
fn year_bounds(year: i32) -> Result<(NaiveDate, u64), EtlError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(EtlError::InvalidYear(year))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(EtlError::InvalidYear(year))?;
    Ok((first, u64::from(last.ordinal())))
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
