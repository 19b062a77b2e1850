//! In-memory CSV table: a header row plus string cells.
//!
//! Every cell is kept as text; typing happens in the builder. Short rows are
//! padded with empty cells, rows wider than the header are rejected.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::EtlError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Read a headed CSV from `reader`. `context` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::Csv`] on malformed CSV and [`EtlError::RaggedRow`]
    /// when a record has more fields than the header.
    pub fn read_from<R: Read>(reader: R, context: &str) -> Result<Self, EtlError> {
        let csv_err = |source| EtlError::Csv {
            context: context.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_err)?;
            if record.len() > headers.len() {
                return Err(EtlError::RaggedRow {
                    context: context.to_string(),
                    line: record.position().map_or(0, csv::Position::line),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Read a headed CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::Io`] if the file cannot be opened, otherwise the
    /// errors of [`CsvTable::read_from`].
    pub fn read_path(path: &Path) -> Result<Self, EtlError> {
        let file = File::open(path).map_err(|source| EtlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_from(BufReader::new(file), &path.display().to_string())
    }

    /// Write the header row and every data row, comma-delimited, no index.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::Csv`] if any write fails.
    pub fn write_to<W: Write>(&self, writer: W, context: &str) -> Result<(), EtlError> {
        let csv_err = |source| EtlError::Csv {
            context: context.to_string(),
            source,
        };

        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers).map_err(csv_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|e| csv_err(e.into()))?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the table to it.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::Io`] if the file cannot be created, otherwise the
    /// errors of [`CsvTable::write_to`].
    pub fn write_path(&self, path: &Path) -> Result<(), EtlError> {
        let file = File::create(path).map_err(|source| EtlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(BufWriter::new(file), &path.display().to_string())
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve every name in `names` to a column index.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::MissingColumns`] listing every absent name.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, EtlError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push((*name).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(EtlError::MissingColumns(missing))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
