pub mod excel;
pub mod json;

use crate::model::{Catalog, ExportError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    Dump,
}

impl ExportFormat {
    /// Menu answer -> format: `1` spreadsheet, `2` dump.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Spreadsheet),
            "2" => Some(Self::Dump),
            _ => None,
        }
    }
}

/// Hands the finished catalog to exactly one exporter.
pub fn export(
    catalog: &Catalog,
    city: &str,
    format: ExportFormat,
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Spreadsheet => excel::write_report(catalog, city, date, dir),
        ExportFormat::Dump => json::write_dump(catalog, city, date, dir),
    }
}
