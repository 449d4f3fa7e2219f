// File: src/persistence/redb_store.rs
use super::{codec, LoadedProfiles, ProfileStore};
use crate::core::types::{FrequencyProfile, LanguageCode};
use crate::error::StoreError;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

// language code -> encoded profile
const PROFILES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("language_profiles");

/// Profile store backed by a redb table. The database handle may be shared
/// with other tables, such as the translation cache.
pub struct RedbProfileStore {
    db: Arc<Database>,
}

impl RedbProfileStore {
    pub fn new(db: Arc<Database>) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(PROFILES_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::new(super::open_database(path)?)
    }
}

impl ProfileStore for RedbProfileStore {
    fn load_all(&self) -> Result<LoadedProfiles, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PROFILES_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(LoadedProfiles::default()),
            Err(e) => return Err(e.into()),
        };

        let mut loaded = LoadedProfiles::default();
        for item in table.iter()? {
            let (key, value) = item?;
            loaded.push_record(key.value(), value.value());
        }
        Ok(loaded)
    }

    fn load(&self, code: &LanguageCode) -> Result<Option<FrequencyProfile>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PROFILES_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match table.get(code.as_str())? {
            Some(value) => Ok(Some(codec::decode(value.value())?)),
            None => Ok(None),
        }
    }

    fn save(&self, code: &LanguageCode, profile: &FrequencyProfile) -> Result<(), StoreError> {
        let bytes = codec::encode(profile)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PROFILES_TABLE)?;
            table.insert(code.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
