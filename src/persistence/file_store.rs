// File: src/persistence/file_store.rs
use super::{codec, LoadedProfiles, ProfileStore};
use crate::core::types::{FrequencyProfile, LanguageCode};
use crate::error::{CodecError, StoreError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// On-disk layout: one record per language, each payload encoded on its own
/// so a single bad record can be skipped without losing the rest.
#[derive(Default, Serialize, Deserialize)]
struct ProfileFile {
    records: Vec<(String, Vec<u8>)>,
}

/// Profile store kept in a single bincode file, rewritten atomically on save.
pub struct FileProfileStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<ProfileFile, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProfileFile::default()),
            Err(e) => return Err(e.into()),
        };
        bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write_file(&self, contents: &ProfileFile) -> Result<(), StoreError> {
        let parent_dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            bincode::serialize_into(&mut writer, contents).map_err(CodecError::from)?;
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn load_all(&self) -> Result<LoadedProfiles, StoreError> {
        let file = self.read_file()?;
        let mut loaded = LoadedProfiles::default();
        for (key, bytes) in &file.records {
            loaded.push_record(key, bytes);
        }
        Ok(loaded)
    }

    fn load(&self, code: &LanguageCode) -> Result<Option<FrequencyProfile>, StoreError> {
        let file = self.read_file()?;
        file.records
            .iter()
            .find(|(key, _)| key == code.as_str())
            .map(|(_, bytes)| codec::decode(bytes).map_err(StoreError::from))
            .transpose()
    }

    fn save(&self, code: &LanguageCode, profile: &FrequencyProfile) -> Result<(), StoreError> {
        let bytes = codec::encode(profile)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        // A corrupt file is reported rather than overwritten.
        let mut file = self.read_file()?;
        match file.records.iter_mut().find(|(key, _)| key == code.as_str()) {
            Some(record) => record.1 = bytes,
            None => file.records.push((code.as_str().to_string(), bytes)),
        }
        self.write_file(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::build_profile;
    use tempfile::tempdir;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s).unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().expect("create temp dir");
        let store = FileProfileStore::new(dir.path().join("profiles.bin"));
        let loaded = store.load_all().unwrap();
        assert!(loaded.catalog.is_empty());
        assert!(store.load(&code("en")).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("sub").join("profiles.bin");

        let store = FileProfileStore::new(&path);
        store.save(&code("en"), &build_profile("hello")).unwrap();
        store.save(&code("fr"), &build_profile("bonjour")).unwrap();
        store.save(&code("en"), &build_profile("goodbye")).unwrap();

        let reopened = FileProfileStore::new(&path);
        let loaded = reopened.load_all().unwrap();
        assert_eq!(loaded.catalog.len(), 2);
        assert_eq!(
            reopened.load(&code("en")).unwrap(),
            Some(build_profile("goodbye"))
        );
    }

    #[test]
    fn test_corrupt_record_is_skipped() {
        let dir = tempdir().expect("create temp dir");
        let store = FileProfileStore::new(dir.path().join("profiles.bin"));
        let file = ProfileFile {
            records: vec![
                ("en".to_string(), codec::encode(&build_profile("hello")).unwrap()),
                ("pt".to_string(), vec![0xde, 0xad]),
            ],
        };
        store.write_file(&file).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("profiles.bin");
        fs::write(&path, [0xff; 16]).unwrap();

        let store = FileProfileStore::new(&path);
        assert!(matches!(store.load_all(), Err(StoreError::Corrupt(_))));
        assert!(store.save(&code("en"), &build_profile("x")).is_err());
        assert_eq!(fs::read(&path).unwrap(), vec![0xff; 16]);
    }
}
