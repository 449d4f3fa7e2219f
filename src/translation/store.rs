// File: src/translation/store.rs
use crate::error::{StoreError, TranslationError};
use crate::persistence::open_database;
use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

// lookup key -> bincode(TranslationRecord)
const TRANSLATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("translations");

const KEY_SEPARATOR: char = '\u{1f}';

/// The triple a translation is looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl LookupKey {
    pub fn new(text: &str, source_lang: &str, target_lang: &str) -> Self {
        Self {
            text: text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        }
    }

    /// Joined with the ASCII unit separator, text last, so two different
    /// triples never share a storage key.
    pub fn storage_key(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.source_lang,
            self.target_lang,
            self.text,
            sep = KEY_SEPARATOR
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub source_text: String,
    pub source_lang: String,
    pub target_text: String,
    pub target_lang: String,
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    pub fn key(&self) -> LookupKey {
        LookupKey::new(&self.source_text, &self.source_lang, &self.target_lang)
    }
}

/// Durable lookup table of past translations.
pub trait TranslationStore: Send + Sync {
    fn find(&self, key: &LookupKey) -> Result<Option<TranslationRecord>, TranslationError>;

    fn insert(&self, record: &TranslationRecord) -> Result<(), TranslationError>;

    /// All records, newest first.
    fn history(&self) -> Result<Vec<TranslationRecord>, TranslationError>;
}

pub struct RedbTranslationStore {
    db: Arc<Database>,
}

impl RedbTranslationStore {
    pub fn new(db: Arc<Database>) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TRANSLATIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::new(open_database(path)?)
    }
}

impl TranslationStore for RedbTranslationStore {
    fn find(&self, key: &LookupKey) -> Result<Option<TranslationRecord>, TranslationError> {
        let read_txn = self.db.begin_read().map_err(StoreError::from)?;
        let table = match read_txn.open_table(TRANSLATIONS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StoreError::from(e).into()),
        };

        let value = table
            .get(key.storage_key().as_str())
            .map_err(StoreError::from)?;
        match value {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes.value())?)),
            None => Ok(None),
        }
    }

    fn insert(&self, record: &TranslationRecord) -> Result<(), TranslationError> {
        let bytes = bincode::serialize(record)?;
        let key = record.key().storage_key();

        let write_txn = self.db.begin_write().map_err(StoreError::from)?;
        {
            let mut table = write_txn
                .open_table(TRANSLATIONS_TABLE)
                .map_err(StoreError::from)?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(StoreError::from)?;
        }
        write_txn.commit().map_err(StoreError::from)?;
        Ok(())
    }

    fn history(&self) -> Result<Vec<TranslationRecord>, TranslationError> {
        let read_txn = self.db.begin_read().map_err(StoreError::from)?;
        let table = match read_txn.open_table(TRANSLATIONS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::from(e).into()),
        };

        let mut records = Vec::new();
        for item in table.iter().map_err(StoreError::from)? {
            let (_, value) = item.map_err(StoreError::from)?;
            match bincode::deserialize::<TranslationRecord>(value.value()) {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "skipping corrupt translation record"),
            }
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn record(text: &str, src: &str, tgt: &str, out: &str, at: DateTime<Utc>) -> TranslationRecord {
        TranslationRecord {
            source_text: text.into(),
            source_lang: src.into(),
            target_text: out.into(),
            target_lang: tgt.into(),
            created_at: at,
        }
    }

    #[test]
    fn test_storage_keys_do_not_collide() {
        // "a_b" + "c" vs "a" + "b_c" would collide under naive "_" joining
        let a = LookupKey::new("x", "a_b", "c");
        let b = LookupKey::new("x", "a", "b_c");
        assert_ne!(a.storage_key(), b.storage_key());
    }

    #[test]
    fn test_find_insert_history() {
        let dir = tempdir().expect("create temp dir");
        let store = RedbTranslationStore::open(&dir.path().join("t.redb")).unwrap();
        let now = Utc::now();

        assert!(store.find(&LookupKey::new("dog", "en", "pt")).unwrap().is_none());

        store.insert(&record("dog", "en", "pt", "cachorro", now - Duration::seconds(10))).unwrap();
        store.insert(&record("cat", "en", "pt", "gato", now)).unwrap();

        let hit = store.find(&LookupKey::new("dog", "en", "pt")).unwrap().unwrap();
        assert_eq!(hit.target_text, "cachorro");
        assert!(store.find(&LookupKey::new("dog", "pt", "en")).unwrap().is_none());

        let history = store.history().unwrap();
        let texts: Vec<&str> = history.iter().map(|r| r.source_text.as_str()).collect();
        assert_eq!(texts, vec!["cat", "dog"]);
    }

    #[test]
    fn test_shares_database_with_profiles() {
        use crate::core::profile::build_profile;
        use crate::core::types::LanguageCode;
        use crate::persistence::{ProfileStore, RedbProfileStore};

        let dir = tempdir().expect("create temp dir");
        let db = open_database(&dir.path().join("shared.redb")).unwrap();
        let profiles = RedbProfileStore::new(Arc::clone(&db)).unwrap();
        let translations = RedbTranslationStore::new(db).unwrap();

        profiles
            .save(&LanguageCode::new("en").unwrap(), &build_profile("hi"))
            .unwrap();
        translations
            .insert(&record("hi", "en", "pt", "olá", Utc::now()))
            .unwrap();

        assert_eq!(profiles.load_all().unwrap().catalog.len(), 1);
        assert_eq!(translations.history().unwrap().len(), 1);
    }
}
