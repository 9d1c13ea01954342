use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::config::Config;
use crate::corpus::{load_data, Corpus};
use crate::error::LoadError;
use crate::model::StudentRecord;
use crate::normalize::composite_key;
use crate::workbook;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded { generation: String, records: usize },
    Unchanged { generation: String },
}

/// Holds the active corpus snapshot. Readers get an `Arc` to an immutable
/// snapshot; reload swaps the pointer in one step and only after a
/// successful build.
pub struct GradebookService {
    source: PathBuf,
    active: RwLock<Arc<Corpus>>,
    reload_guard: Mutex<()>,
}

impl GradebookService {
    /// Performs the initial load. Failure here means there is nothing to
    /// serve.
    pub fn open(config: &Config) -> Result<Self, LoadError> {
        let corpus = load_data(&config.source_path)?;
        Ok(Self::with_corpus(&config.source_path, corpus))
    }

    pub fn with_corpus(source: &Path, corpus: Corpus) -> Self {
        Self {
            source: source.to_path_buf(),
            active: RwLock::new(Arc::new(corpus)),
            reload_guard: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn snapshot(&self) -> Arc<Corpus> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a complete snapshot.
        let guard = self.active.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn get(&self, key: &str) -> Option<StudentRecord> {
        self.snapshot().get(key).cloned()
    }

    /// Looks a student up by the credentials typed at login.
    pub fn lookup(&self, name: &str, code: &str) -> Option<StudentRecord> {
        self.get(&composite_key(name, code))
    }

    pub fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        let _writer = self.reload_guard.lock().unwrap_or_else(|e| e.into_inner());
        self.rebuild()
    }

    /// Like [`reload`](Self::reload) but skips the rebuild when the source
    /// bytes hash to the active fingerprint.
    pub fn reload_if_changed(&self) -> Result<ReloadOutcome, LoadError> {
        let _writer = self.reload_guard.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.snapshot();
        let source = workbook::read_source(&self.source)?;
        if source.fingerprint == current.fingerprint {
            log::info!("source unchanged; keeping generation {}", current.generation);
            return Ok(ReloadOutcome::Unchanged {
                generation: current.generation.clone(),
            });
        }
        self.rebuild()
    }

    fn rebuild(&self) -> Result<ReloadOutcome, LoadError> {
        let corpus = match load_data(&self.source) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("reload failed, keeping previous corpus: {e}");
                return Err(e);
            }
        };
        let outcome = ReloadOutcome::Reloaded {
            generation: corpus.generation.clone(),
            records: corpus.len(),
        };
        let next = Arc::new(corpus);
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        *active = next;
        Ok(outcome)
    }
}
