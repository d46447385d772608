use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::models::UserRecord;

/// CSV-backed user store. Every operation is a full-file scan or a blind
/// append; the file is small enough that nothing smarter is warranted.
///
/// The store enforces no constraints of its own: callers that care about
/// email uniqueness must check `exists` before appending. Concurrent
/// appends are not synchronized (accepted limitation).
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Opens the store, creating the backing file with a header row and
    /// one default admin record if it does not exist yet.
    pub fn open(
        path: impl Into<PathBuf>,
        admin_email: &str,
        admin_password: &str,
    ) -> Result<Self, AppError> {
        let store = UserStore { path: path.into() };
        store.ensure_seeded(admin_email, admin_password)?;
        Ok(store)
    }

    fn ensure_seeded(&self, admin_email: &str, admin_password: &str) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.serialize(UserRecord {
            email: admin_email.to_string(),
            password: admin_password.to_string(),
            is_admin: true,
        })?;
        writer.flush()?;
        info!(path = %self.path.display(), "seeded user store with default admin");
        Ok(())
    }

    /// Linear scan; returns the first record matching the email.
    pub fn lookup(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        for record in reader.deserialize::<UserRecord>() {
            let record = record?;
            if record.email == email {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    pub fn exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.lookup(email)?.is_some())
    }

    /// True iff a record matches the email with the admin flag set.
    pub fn is_admin(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.lookup(email)?.map(|u| u.is_admin).unwrap_or(false))
    }

    /// Blind append. Callers check `exists` first; the store does not.
    pub fn append(&self, email: &str, password: &str, is_admin: bool) -> Result<(), AppError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(UserRecord {
            email: email.to_string(),
            password: password.to_string(),
            is_admin,
        })?;
        writer.flush()?;
        Ok(())
    }
}
