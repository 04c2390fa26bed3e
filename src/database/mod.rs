use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::models::{UserDirectory, UserRecord};
use crate::utils::AppError;

/// Store handle shared by the HTTP workers.
pub type SharedStore = actix_web::web::Data<dyn UserStore + Send + Sync>;

/// Persistence seam for the user directory. Every call goes to the backing
/// storage; implementations must not cache between calls.
pub trait UserStore {
    fn load(&self) -> Result<UserDirectory, AppError>;

    /// Overwrites the stored directory with `users` in full.
    fn save(&self, users: &UserDirectory) -> Result<(), AppError>;

    /// Returns the record for `user_id`, provisioning and persisting the
    /// default record first if the id has never been seen.
    fn get_or_create(&self, user_id: &str) -> Result<UserRecord, AppError> {
        let mut users = self.load()?;
        if let Some(record) = users.get(user_id) {
            return Ok(record.clone());
        }

        let record = UserRecord::default();
        users.insert(user_id.to_string(), record.clone());
        self.save(&users)?;
        Ok(record)
    }
}

/// The whole directory lives in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_shared(self) -> SharedStore {
        let store: Arc<dyn UserStore + Send + Sync> = Arc::new(self);
        SharedStore::from(store)
    }

    fn create_empty(&self) -> Result<(), AppError> {
        let bytes = to_pretty_json(&UserDirectory::new())
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        // create_new: never clobber a file another request created meanwhile
        let result = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&bytes));

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(AppError::StorageUnavailable(format!(
                "could not create data file '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn persist_failure(&self, e: impl std::fmt::Display) -> AppError {
        AppError::PersistFailure(format!(
            "could not save data file '{}': {}",
            self.path.display(),
            e
        ))
    }
}

impl UserStore for JsonFileStore {
    fn load(&self) -> Result<UserDirectory, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.create_empty()?;
                return Ok(UserDirectory::new());
            }
            Err(e) => {
                return Err(AppError::StorageUnavailable(format!(
                    "could not read data file '{}': {}",
                    self.path.display(),
                    e
                )))
            }
        };

        // only a zero-byte file counts as empty; stray whitespace is corrupt
        if content.is_empty() {
            return Ok(UserDirectory::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            AppError::StorageCorrupt(format!(
                "could not parse data file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, users: &UserDirectory) -> Result<(), AppError> {
        let bytes = to_pretty_json(users).map_err(|e| self.persist_failure(e))?;

        // Sibling temp file renamed over the data file: the old snapshot
        // stays in place until the rename succeeds.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| self.persist_failure(e))?;
        temp.write_all(&bytes).map_err(|e| self.persist_failure(e))?;
        temp.as_file().sync_all().map_err(|e| self.persist_failure(e))?;
        temp.persist(&self.path).map_err(|e| self.persist_failure(e.error))?;
        Ok(())
    }
}

/// JSON with 4-space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}
