//! Source workbook access: bytes on disk to one raw grid per sheet.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use sha2::{Digest, Sha256};

use crate::error::LoadError;
use crate::model::{Cell, RawGrid};

pub struct SourceBytes {
    pub bytes: Vec<u8>,
    pub fingerprint: String,
}

pub struct RawSheet {
    pub name: String,
    pub grid: RawGrid,
}

pub fn read_source(path: &Path) -> Result<SourceBytes, LoadError> {
    if !path.exists() {
        return Err(LoadError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let fingerprint = fingerprint(&bytes);
    Ok(SourceBytes { bytes, fingerprint })
}

pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Reads every sheet in workbook order. Sheets whose range cannot be read are
/// logged and left out.
pub fn read_sheets(path: &Path, bytes: Vec<u8>) -> Result<Vec<RawSheet>, LoadError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| LoadError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut out = Vec::new();
    for name in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&name) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping sheet `{name}`: {e}");
                continue;
            }
        };

        // Anchor the grid at A1 so row positions match the worksheet.
        let (row0, col0) = range.start().unwrap_or((0, 0));
        let width = col0 as usize + range.width();
        let mut grid: RawGrid = (0..row0).map(|_| vec![Cell::Empty; width]).collect();
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; col0 as usize];
            cells.extend(row.iter().map(convert_value));
            grid.push(cells);
        }
        out.push(RawSheet { name, grid });
    }
    Ok(out)
}

fn convert_value(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Error cells carry no grade; treat them as blanks.
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
