use std::path::{Path, PathBuf};

pub const SOURCE_PATH_ENV: &str = "EXCEL_PATH";
pub const DEFAULT_SOURCE_PATH: &str = "data/Controle de Notas 1 BIM.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let source_path = std::env::var_os(SOURCE_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH));
        Self { source_path }
    }

    #[allow(dead_code)]
    pub fn with_source(path: impl AsRef<Path>) -> Self {
        Self {
            source_path: path.as_ref().to_path_buf(),
        }
    }
}
