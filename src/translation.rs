// File: src/translation.rs
//! Toy translation workflow built around the classifier: an in-memory cache in
//! front of a durable lookup table in front of a stub phrase dictionary.

pub mod dictionary;
pub mod store;

pub use dictionary::PhraseDictionary;
pub use store::{LookupKey, RedbTranslationStore, TranslationRecord, TranslationStore};

use crate::core::engine::LanguageClassifier;
use crate::core::types::Detection;
use crate::error::TranslationError;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Where a translation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOrigin {
    Cache,
    Store,
    Dictionary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub origin: TranslationOrigin,
}

/// A detection followed by a translation out of the detected language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTranslation {
    pub detected: Detection,
    pub target_lang: String,
    pub translation: Translation,
}

pub struct Translator {
    store: Arc<dyn TranslationStore>,
    dictionary: PhraseDictionary,
    cache: HashMap<LookupKey, String>,
    default_target: String,
}

impl Translator {
    pub fn new(store: Arc<dyn TranslationStore>, default_target: impl Into<String>) -> Self {
        Self {
            store,
            dictionary: PhraseDictionary::new(),
            cache: HashMap::new(),
            default_target: default_target.into(),
        }
    }

    /// Looks in memory, then in the store, and finally asks the dictionary.
    /// A dictionary result is written to the store before it is cached.
    pub fn translate(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation, TranslationError> {
        let key = LookupKey::new(text, source_lang, target_lang);

        if let Some(hit) = self.cache.get(&key) {
            debug!(source_lang, target_lang, "translation served from memory");
            return Ok(Translation {
                text: hit.clone(),
                origin: TranslationOrigin::Cache,
            });
        }

        if let Some(record) = self.store.find(&key)? {
            debug!(source_lang, target_lang, "translation served from store");
            self.cache.insert(key, record.target_text.clone());
            return Ok(Translation {
                text: record.target_text,
                origin: TranslationOrigin::Store,
            });
        }

        let translated = self.dictionary.translate(text, source_lang, target_lang);
        let record = TranslationRecord {
            source_text: text.to_string(),
            source_lang: source_lang.to_string(),
            target_text: translated.clone(),
            target_lang: target_lang.to_string(),
            created_at: Utc::now(),
        };
        self.store.insert(&record)?;
        self.cache.insert(key, translated.clone());

        Ok(Translation {
            text: translated,
            origin: TranslationOrigin::Dictionary,
        })
    }

    /// English goes to Portuguese; everything else goes to the configured
    /// default target.
    pub fn target_for(&self, detected: &Detection) -> String {
        match detected.code() {
            Some(code) if code.as_str() == "en" => "pt".to_string(),
            _ => self.default_target.clone(),
        }
    }

    /// Classifies `text` and translates it out of the detected language.
    /// Empty input yields `None`; whitespace is classified like any other text.
    pub fn detect_and_translate(
        &mut self,
        classifier: &LanguageClassifier,
        text: &str,
    ) -> Result<Option<DetectedTranslation>, TranslationError> {
        if text.is_empty() {
            return Ok(None);
        }

        let detected = classifier.classify(text);
        let target_lang = self.target_for(&detected);
        let translation = self.translate(text, detected.as_str(), &target_lang)?;
        Ok(Some(DetectedTranslation {
            detected,
            target_lang,
            translation,
        }))
    }

    /// Stored translations, newest first.
    pub fn history(&self) -> Result<Vec<TranslationRecord>, TranslationError> {
        self.store.history()
    }
}
