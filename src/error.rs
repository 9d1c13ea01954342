use std::path::PathBuf;

use thiserror::Error;

/// File-level and corpus-level load failures. Sheet-level anomalies never
/// show up here; they are skipped during parsing.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source workbook not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("no sheet in {} has both CÓDIGO and ALUNO columns", path.display())]
    NoUsableData { path: PathBuf },
}

impl LoadError {
    /// Stable code reported over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::SourceNotFound { .. } => "source_not_found",
            LoadError::Read { .. } | LoadError::Workbook { .. } => "workbook_unreadable",
            LoadError::NoUsableData { .. } => "no_usable_data",
        }
    }
}
