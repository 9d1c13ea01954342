use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::LoadError;
use crate::model::StudentRecord;
use crate::sheet::{parse_sheet, SheetTable};
use crate::workbook;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub skipped: bool,
}

/// One fully built snapshot of the source workbook.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub source: PathBuf,
    pub records: HashMap<String, StudentRecord>,
    pub display_columns: Vec<String>,
    pub sheets: Vec<SheetSummary>,
    /// Rows parsed across all sheets, before key collisions.
    pub row_count: usize,
    /// Rows that replaced an earlier row with the same key.
    pub duplicate_keys: usize,
    pub fingerprint: String,
    pub generation: String,
    pub loaded_at: DateTime<Utc>,
}

impl Corpus {
    pub fn get(&self, key: &str) -> Option<&StudentRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads and parses the workbook at `path` into a new corpus. Does not touch
/// any shared state.
pub fn load_data(path: &Path) -> Result<Corpus, LoadError> {
    let source = workbook::read_source(path)?;
    let sheets = workbook::read_sheets(path, source.bytes)?;

    let mut tables: Vec<SheetTable> = Vec::new();
    let mut summaries: Vec<SheetSummary> = Vec::new();
    for sheet in &sheets {
        let table = parse_sheet(&sheet.grid, &sheet.name);
        if table.is_empty() {
            log::info!("sheet `{}` has no CÓDIGO/ALUNO header; skipped", sheet.name);
        } else {
            log::info!("sheet `{}`: {} rows", sheet.name, table.records.len());
        }
        summaries.push(SheetSummary {
            name: sheet.name.clone(),
            rows: table.records.len(),
            skipped: table.is_empty(),
        });
        if !table.is_empty() {
            tables.push(table);
        }
    }

    if tables.is_empty() {
        return Err(LoadError::NoUsableData {
            path: path.to_path_buf(),
        });
    }

    let mut corpus = build_corpus(tables);
    corpus.source = path.to_path_buf();
    corpus.sheets = summaries;
    corpus.fingerprint = source.fingerprint;
    log::info!(
        "loaded {} records from {} ({} rows, {} duplicate keys)",
        corpus.len(),
        path.display(),
        corpus.row_count,
        corpus.duplicate_keys
    );
    Ok(corpus)
}

/// Concatenates parsed tables in order and keys every row. A later row with
/// the same key replaces the earlier one.
pub fn build_corpus(tables: Vec<SheetTable>) -> Corpus {
    let mut display_columns: Vec<String> = Vec::new();
    let mut records: HashMap<String, StudentRecord> = HashMap::new();
    let mut row_count = 0;
    let mut duplicate_keys = 0;
    let mut sheets = Vec::with_capacity(tables.len());

    for table in tables {
        for col in &table.columns {
            if !display_columns.contains(col) {
                display_columns.push(col.clone());
            }
        }
        sheets.push(SheetSummary {
            name: table.class_label.clone(),
            rows: table.records.len(),
            skipped: false,
        });
        for record in table.records {
            row_count += 1;
            let key = record.key();
            if let Some(prev) = records.insert(key.clone(), record) {
                duplicate_keys += 1;
                log::debug!("key `{key}` from `{}` overwritten", prev.class_label);
            }
        }
    }

    Corpus {
        source: PathBuf::new(),
        records,
        display_columns,
        sheets,
        row_count,
        duplicate_keys,
        fingerprint: String::new(),
        generation: Uuid::new_v4().to_string(),
        loaded_at: Utc::now(),
    }
}
