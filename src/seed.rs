// File: src/seed.rs
//! Bundled reference paragraphs used to bootstrap a fresh profile store.

use crate::core::engine::LanguageClassifier;
use crate::core::types::LanguageCode;
use crate::error::DetectorError;
use tracing::{info, warn};

/// `(language code, sample paragraph)` pairs.
pub const REFERENCE_SAMPLES: [(&str, &str); 4] = [
    (
        "en",
        "The quick brown fox jumps over the lazy dog. This is a common pangram used to display \
         all letters of the alphabet. English is a West Germanic language that was first spoken \
         in early medieval England and is now the most widely used language in the world.",
    ),
    (
        "pt",
        "A rápida raposa marrom salta sobre o cão preguiçoso. Este é um pangrama comum usado para \
         exibir todas as letras do alfabeto. O português é uma língua românica originária da \
         Galiza e do norte de Portugal, e é a língua oficial de Portugal, Brasil, Angola, \
         Moçambique, Cabo Verde, Guiné-Bissau, São Tomé e Príncipe e Timor-Leste.",
    ),
    (
        "es",
        "El rápido zorro marrón salta sobre el perro perezoso. Este es un pangrama común \
         utilizado para mostrar todas as letras do alfabeto. El español es una lengua romance, \
         derivada del latín vulgar, que se habla principalmente en España y América Latina.",
    ),
    (
        "fr",
        "Le rapide renard brun saute par-dessus le chien paresseux. Ceci é um pangramme courant \
         utilizado para exibir todas as letras do alfabeto. Le français est une langue romane \
         parlée principalmente en France, au Canada, en Belgique, en Suisse e dans de nombreux \
         pays africains.",
    ),
];

/// Upserts every reference sample. Stops at the first store failure.
pub fn seed_reference_profiles(classifier: &LanguageClassifier) -> Result<usize, DetectorError> {
    for (code, sample) in REFERENCE_SAMPLES {
        let code = LanguageCode::new(code)?;
        classifier.upsert_profile(&code, sample)?;
    }
    info!(count = REFERENCE_SAMPLES.len(), "seeded reference profiles");
    Ok(REFERENCE_SAMPLES.len())
}

/// What [`seed_on_startup`] did.
#[derive(Debug)]
pub enum StartupSeed {
    Seeded(usize),
    AlreadyPopulated,
    /// The store could not be read at bootstrap, so nothing was written.
    StoreDegraded,
    Failed(DetectorError),
}

/// Seeds a fresh store, never failing: a degraded or read-only store leaves
/// the classifier as it is.
pub fn seed_on_startup(classifier: &LanguageClassifier) -> StartupSeed {
    if classifier.bootstrap_report().degraded.is_some() {
        return StartupSeed::StoreDegraded;
    }
    if !classifier.is_empty() {
        return StartupSeed::AlreadyPopulated;
    }
    match seed_reference_profiles(classifier) {
        Ok(count) => StartupSeed::Seeded(count),
        Err(e) => {
            warn!(error = %e, "could not seed reference profiles");
            StartupSeed::Failed(e)
        }
    }
}
