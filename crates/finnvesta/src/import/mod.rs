//! Building register loader for CSV exports.

mod columns;
mod parser;

use crate::valuation::BuildingInput;
use columns::ColumnMapping;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum BuildingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for BuildingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildingImportError::Io(err) => write!(f, "failed to read building register: {}", err),
            BuildingImportError::Csv(err) => write!(f, "invalid building register CSV: {}", err),
            BuildingImportError::MissingColumn(column) => write!(
                f,
                "building register has no column recognised as '{}'",
                column
            ),
        }
    }
}

impl std::error::Error for BuildingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildingImportError::Io(err) => Some(err),
            BuildingImportError::Csv(err) => Some(err),
            BuildingImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for BuildingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BuildingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A data row left out of the register, with the 1-based row number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildingRegister {
    /// Buildings with positive area and construction cost, in file order.
    pub buildings: Vec<BuildingInput>,
    pub skipped: Vec<SkippedRow>,
}

pub struct BuildingRegisterImporter;

impl BuildingRegisterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BuildingRegister, BuildingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a register, skipping rows that cannot be valued.
    ///
    /// The delimiter is `;` when the header line contains one, `,` otherwise.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<BuildingRegister, BuildingImportError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let header_line = content.lines().next().unwrap_or_default();
        let delimiter = if header_line.contains(';') { b';' } else { b',' };

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mapping = ColumnMapping::detect(csv_reader.headers()?.iter());
        if let Some(field) = mapping.missing_required() {
            return Err(BuildingImportError::MissingColumn(field.label()));
        }

        let mut register = BuildingRegister::default();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 1;
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }

            match parser::parse_row(&record, &mapping, row) {
                Ok(building) => match building.validate() {
                    Ok(()) => register.buildings.push(building),
                    Err(reason) => register.skipped.push(SkippedRow {
                        row,
                        reason: reason.to_string(),
                    }),
                },
                Err(issue) => register.skipped.push(SkippedRow {
                    row,
                    reason: issue.describe(),
                }),
            }
        }

        debug!(
            imported = register.buildings.len(),
            skipped = register.skipped.len(),
            "building register loaded"
        );

        Ok(register)
    }
}
