use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::models::SubmissionRecord;

/// CSV-backed submission store. Append-only: records are never updated
/// or deleted, and `list_all` returns them in insertion order.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    path: PathBuf,
}

impl SubmissionStore {
    /// Opens the store, creating the backing file with a header row if
    /// it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let store = SubmissionStore { path: path.into() };
        store.ensure_seeded()?;
        Ok(store)
    }

    fn ensure_seeded(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(["Name", "Email", "Skills", "Filename"])?;
        writer.flush()?;
        info!(path = %self.path.display(), "created empty submission store");
        Ok(())
    }

    /// Appends one record. No validation; the store trusts its callers.
    pub fn append(&self, record: &SubmissionRecord) -> Result<(), AppError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Full scan in insertion order.
    pub fn list_all(&self) -> Result<Vec<SubmissionRecord>, AppError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.deserialize::<SubmissionRecord>() {
            records.push(record?);
        }
        Ok(records)
    }
}
