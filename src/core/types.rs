// src/core/types.rs
use crate::error::DetectorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Label returned when no profile can be matched.
pub const UNKNOWN: &str = "unknown";

const MAX_CODE_LEN: usize = 16;

/// Short identifier for a language, e.g. "en" or "pt".
/// This is the primary key of a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: &str) -> Result<Self, DetectorError> {
        let code = code.trim();
        let valid = !code.is_empty()
            && code.len() <= MAX_CODE_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            && !code.eq_ignore_ascii_case(UNKNOWN);
        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(DetectorError::InvalidLanguageCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageCode {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = DetectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized character-frequency distribution of a text sample.
///
/// Keys are case-folded letters and digits; values are probabilities that sum
/// to 1.0 for a non-empty sample. A degenerate sample yields an empty profile.
/// Profiles are never edited in place: an update replaces the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyProfile {
    frequencies: BTreeMap<char, f64>,
}

impl FrequencyProfile {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an already-normalized distribution. Callers are the builder and
    /// the codec, both of which validate what they hand over.
    pub(crate) fn from_map(frequencies: BTreeMap<char, f64>) -> Self {
        Self { frequencies }
    }

    pub fn get(&self, c: char) -> f64 {
        self.frequencies.get(&c).copied().unwrap_or(0.0)
    }

    /// Entries in ascending character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.frequencies.iter().map(|(&c, &p)| (c, p))
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.frequencies.values().sum()
    }
}

/// Outcome of a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Language(LanguageCode),
    Unknown,
}

impl Detection {
    pub fn code(&self) -> Option<&LanguageCode> {
        match self {
            Detection::Language(code) => Some(code),
            Detection::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Detection::Language(code) => code.as_str(),
            Detection::Unknown => UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Detection::Unknown)
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_trims_and_accepts() {
        let code = LanguageCode::new("  pt-BR ").unwrap();
        assert_eq!(code.as_str(), "pt-BR");
        assert_eq!("en".parse::<LanguageCode>().unwrap().to_string(), "en");
    }

    #[test]
    fn test_language_code_rejects_bad_input() {
        for bad in ["", "   ", "en us", "fr!", "Unknown", "abcdefghijklmnopq"] {
            assert!(LanguageCode::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_detection_display() {
        assert_eq!(Detection::Unknown.to_string(), UNKNOWN);
        let en = Detection::Language(LanguageCode::new("en").unwrap());
        assert_eq!(en.to_string(), "en");
        assert_eq!(en.code().map(LanguageCode::as_str), Some("en"));
    }
}
