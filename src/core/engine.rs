use crate::core::catalog::ProfileCatalog;
use crate::core::distance::euclidean_distance;
use crate::core::profile::ProfileBuilder;
use crate::core::types::{Detection, FrequencyProfile, LanguageCode};
use crate::error::StoreError;
use crate::learning::LearningEngine;
use crate::persistence::ProfileStore;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// What happened when the catalog was loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub loaded: usize,
    /// Records dropped because they could not be decoded
    pub skipped: usize,
    /// Set when the store could not be read at all
    pub degraded: Option<String>,
}

/// Nearest-profile language classifier.
///
/// The catalog is loaded once from the store at construction. Classification is
/// read-only and may run concurrently; [`upsert_profile`](Self::upsert_profile)
/// takes the catalog exclusively while it writes through to the store.
///
/// Catalog iteration is in lexicographic code order and distances are compared
/// with strict less-than, so ties go to the smallest code.
pub struct LanguageClassifier {
    catalog: RwLock<ProfileCatalog>,
    store: Arc<dyn ProfileStore>,
    builder: ProfileBuilder,
    learning_engine: LearningEngine,
    report: BootstrapReport,
}

impl LanguageClassifier {
    /// Loads every stored profile. Never fails: if the store is unavailable the
    /// classifier starts with an empty catalog and the report says why.
    pub fn bootstrap_from(store: Arc<dyn ProfileStore>) -> Self {
        let (catalog, report) = match store.load_all() {
            Ok(loaded) => {
                info!(
                    profiles = loaded.catalog.len(),
                    skipped = loaded.skipped,
                    "loaded language profiles"
                );
                let report = BootstrapReport {
                    loaded: loaded.catalog.len(),
                    skipped: loaded.skipped,
                    degraded: None,
                };
                (loaded.catalog, report)
            }
            Err(e) => {
                warn!(error = %e, "profile store unavailable, starting with an empty catalog");
                let report = BootstrapReport {
                    degraded: Some(e.to_string()),
                    ..BootstrapReport::default()
                };
                (ProfileCatalog::new(), report)
            }
        };

        Self {
            catalog: RwLock::new(catalog),
            store,
            builder: ProfileBuilder::new(),
            learning_engine: LearningEngine::new(),
            report,
        }
    }

    fn read_catalog(&self) -> RwLockReadGuard<'_, ProfileCatalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_catalog(&self) -> RwLockWriteGuard<'_, ProfileCatalog> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the code of the nearest profile, or `Unknown` for an empty catalog.
    /// O(L + N*K).
    pub fn classify(&self, text: &str) -> Detection {
        let input = self.builder.build(text);
        let catalog = self.read_catalog();

        let mut min_distance = f64::INFINITY;
        let mut detected: Option<&LanguageCode> = None;
        for (code, profile) in catalog.iter() {
            let distance = euclidean_distance(&input, profile);
            if distance < min_distance {
                min_distance = distance;
                detected = Some(code);
            }
        }

        match detected {
            Some(code) => {
                debug!(code = %code, distance = min_distance, "classified text");
                Detection::Language(code.clone())
            }
            None => Detection::Unknown,
        }
    }

    /// Every known language with its distance to `text`, nearest first.
    pub fn rank(&self, text: &str) -> Vec<(LanguageCode, f64)> {
        let input = self.builder.build(text);
        let mut scores: Vec<(LanguageCode, f64)> = self
            .read_catalog()
            .iter()
            .map(|(code, profile)| (code.clone(), euclidean_distance(&input, profile)))
            .collect();
        // stable sort keeps code order among equal distances
        scores.sort_by(|a, b| a.1.total_cmp(&b.1));
        scores
    }

    /// Builds a profile from `sample_text` and stores it under `code`, replacing
    /// any previous profile. On a store error nothing in memory changes.
    pub fn upsert_profile(&self, code: &LanguageCode, sample_text: &str) -> Result<(), StoreError> {
        let labeled = self.learning_engine.label(code.clone(), sample_text);
        let mut catalog = self.write_catalog();
        let profile = self
            .learning_engine
            .learn(self.store.as_ref(), &mut catalog, labeled)?;
        info!(code = %code, characters = profile.len(), "stored language profile");
        Ok(())
    }

    pub fn profile(&self, code: &LanguageCode) -> Option<Arc<FrequencyProfile>> {
        self.read_catalog().get(code).cloned()
    }

    pub fn catalog_snapshot(&self) -> ProfileCatalog {
        self.read_catalog().clone()
    }

    pub fn len(&self) -> usize {
        self.read_catalog().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_catalog().is_empty()
    }

    pub fn bootstrap_report(&self) -> &BootstrapReport {
        &self.report
    }
}
