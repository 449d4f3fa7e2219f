// File: src/learning.rs
use crate::core::catalog::ProfileCatalog;
use crate::core::profile::ProfileBuilder;
use crate::core::types::{FrequencyProfile, LanguageCode};
use crate::error::StoreError;
use crate::persistence::ProfileStore;
use std::sync::Arc;

/// A freshly computed profile waiting to be committed.
pub struct LabeledProfile {
    pub code: LanguageCode,
    pub profile: FrequencyProfile,
}

/// Applies profile updates with write-through ordering: the store first, then
/// the in-memory catalog.
#[derive(Default)]
pub struct LearningEngine {
    builder: ProfileBuilder,
}

impl LearningEngine {
    pub fn new() -> Self {
        Self {
            builder: ProfileBuilder::new(),
        }
    }

    pub fn label(&self, code: LanguageCode, sample_text: &str) -> LabeledProfile {
        LabeledProfile {
            code,
            profile: self.builder.build(sample_text),
        }
    }

    /// Persists `labeled` and then replaces the catalog entry.
    /// If the store rejects the write the catalog is left untouched.
    pub fn learn(
        &self,
        store: &dyn ProfileStore,
        catalog: &mut ProfileCatalog,
        labeled: LabeledProfile,
    ) -> Result<Arc<FrequencyProfile>, StoreError> {
        store.save(&labeled.code, &labeled.profile)?;

        let profile = Arc::new(labeled.profile);
        catalog.insert(labeled.code, Arc::clone(&profile));
        Ok(profile)
    }
}
