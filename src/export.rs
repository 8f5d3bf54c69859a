use crate::extract::{Border, Record};
use crate::Error;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV projection of a record. The group only appears as `foldername`.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Border")]
    border: Border,
    #[serde(rename = "Command")]
    command: &'a str,
    foldername: &'a str,
    filename: &'a str,
}
impl<'a> From<&'a Record> for Row<'a> {
    fn from(record: &'a Record) -> Row<'a> {
        Row {
            id: record.id,
            name: &record.name,
            border: record.border,
            command: &record.input_code,
            foldername: &record.group,
            filename: &record.image_filename,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Saved {
    Written { path: PathBuf, rows: usize },
    /// Nothing was extracted, so nothing was written.
    Empty,
}

pub fn save_csv(records: &[Record], path: &Path) -> Result<Saved, Error> {
    if records.is_empty() {
        info!("No data to save.");
        return Ok(Saved::Empty);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(Row::from(record))?;
    }
    writer.flush()?;
    info!("Data saved to {}", path.display());
    Ok(Saved::Written { path: path.to_owned(), rows: records.len() })
}
