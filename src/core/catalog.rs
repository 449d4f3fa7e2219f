// --- File: src/core/catalog.rs
use crate::core::types::{FrequencyProfile, LanguageCode};
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory mirror of the persisted profiles, keyed by language code.
///
/// Iteration is in lexicographic code order. Entries are only ever inserted
/// or replaced; nothing is evicted.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: BTreeMap<LanguageCode, Arc<FrequencyProfile>>,
}

impl ProfileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous profile for `code` wholesale.
    pub fn insert(&mut self, code: LanguageCode, profile: Arc<FrequencyProfile>) {
        self.profiles.insert(code, profile);
    }

    pub fn get(&self, code: &LanguageCode) -> Option<&Arc<FrequencyProfile>> {
        self.profiles.get(code)
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.profiles.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &Arc<FrequencyProfile>)> {
        self.profiles.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &LanguageCode> {
        self.profiles.keys()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<(LanguageCode, FrequencyProfile)> for ProfileCatalog {
    fn from_iter<I: IntoIterator<Item = (LanguageCode, FrequencyProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter
                .into_iter()
                .map(|(code, profile)| (code, Arc::new(profile)))
                .collect(),
        }
    }
}
