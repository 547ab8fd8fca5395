use crate::model::{Catalog, ExportError};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const INDENT: &[u8] = b"    ";

pub fn dump_file_name(city: &str, date: NaiveDate) -> String {
    format!("{} {}.json", city, date.format("%Y-%m-%d"))
}

/// Serializes the catalog as-is, four-space indented, non-ASCII left unescaped.
pub fn to_json_string(catalog: &Catalog) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    catalog.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ExportError::Io(std::io::Error::other(e)))
}

/// Writes `{city} {date}.json` under `dir`, replacing any file of that name.
pub fn write_dump(
    catalog: &Catalog,
    city: &str,
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(dump_file_name(city, date));
    let mut out = BufWriter::new(File::create(&path)?);
    out.write_all(to_json_string(catalog)?.as_bytes())?;
    out.flush()?;
    info!("Saved dump {}", path.display());
    Ok(path)
}

pub fn read_dump(path: &Path) -> Result<Catalog, ExportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
