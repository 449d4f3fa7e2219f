// File: src/persistence.rs
//! Durable storage for language profiles.
//!
//! The classifier only needs [`ProfileStore`]; the medium behind it is up to
//! the caller. Two backends ship here: a redb table and a single bincode file.

pub mod codec;
pub mod file_store;
pub mod redb_store;

pub use file_store::FileProfileStore;
pub use redb_store::RedbProfileStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::catalog::ProfileCatalog;
use crate::core::types::{FrequencyProfile, LanguageCode};
use crate::error::StoreError;
use redb::Database;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Result of a bulk load: every readable profile plus how many records were
/// dropped because they could not be decoded.
#[derive(Debug, Default)]
pub struct LoadedProfiles {
    pub catalog: ProfileCatalog,
    pub skipped: usize,
}

impl LoadedProfiles {
    /// Decodes one raw record. A bad key or bad payload is logged and counted,
    /// never fatal.
    pub(crate) fn push_record(&mut self, key: &str, bytes: &[u8]) {
        let code = match LanguageCode::new(key) {
            Ok(code) => code,
            Err(e) => {
                warn!(key, error = %e, "skipping profile with invalid language code");
                self.skipped += 1;
                return;
            }
        };
        match codec::decode(bytes) {
            Ok(profile) => self.catalog.insert(code, Arc::new(profile)),
            Err(e) => {
                warn!(code = %code, error = %e, "skipping corrupt profile record");
                self.skipped += 1;
            }
        }
    }
}

/// Durable code -> profile mapping with insert-or-replace writes.
pub trait ProfileStore: Send + Sync {
    /// Reads every stored profile. Corrupt records are skipped and counted.
    fn load_all(&self) -> Result<LoadedProfiles, StoreError>;

    fn load(&self, code: &LanguageCode) -> Result<Option<FrequencyProfile>, StoreError>;

    /// Stores `profile` under `code`, replacing any previous profile entirely.
    fn save(&self, code: &LanguageCode, profile: &FrequencyProfile) -> Result<(), StoreError>;
}

/// Opens (or creates) a redb database file, creating parent directories.
pub fn open_database(path: &Path) -> Result<Arc<Database>, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(Arc::new(Database::create(path)?))
}

/// Builds the profile store selected by configuration. The redb backend shares
/// `database` with the translation cache.
pub fn open_profile_store(
    storage: &StorageConfig,
    database: &Arc<Database>,
) -> Result<Arc<dyn ProfileStore>, StoreError> {
    match storage.backend {
        StorageBackend::Redb => Ok(Arc::new(RedbProfileStore::new(Arc::clone(database))?)),
        StorageBackend::File => Ok(Arc::new(FileProfileStore::new(storage.profiles_file()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::build_profile;

    #[test]
    fn test_push_record_skips_bad_entries() {
        let good = codec::encode(&build_profile("hello")).unwrap();
        let mut loaded = LoadedProfiles::default();

        loaded.push_record("en", &good);
        loaded.push_record("not a code", &good);
        loaded.push_record("pt", b"garbage");

        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.skipped, 2);
        assert!(loaded.catalog.contains(&LanguageCode::new("en").unwrap()));
    }
}
