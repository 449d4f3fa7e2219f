// File: src/core/profile.rs
use crate::core::types::FrequencyProfile;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static LETTERS_OR_DIGITS: OnceLock<Regex> = OnceLock::new();

/// Runs of characters in general category L* or N*.
fn letters_or_digits() -> &'static Regex {
    LETTERS_OR_DIGITS
        .get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("letter/digit pattern is valid"))
}

/// Turns sample text into a [`FrequencyProfile`].
///
/// Text is lowercased, then everything that is not a Unicode letter or digit is
/// dropped. Accented letters and non-Latin scripts are kept as-is; combining
/// marks and symbols (e.g. Devanagari vowel signs, circled letters) are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileBuilder;

impl ProfileBuilder {
    pub fn new() -> Self {
        Self
    }

    /// O(L) in the length of the text.
    pub fn build(&self, text: &str) -> FrequencyProfile {
        let mut counts: BTreeMap<char, u64> = BTreeMap::new();
        let mut total: u64 = 0;

        let lowered = text.to_lowercase();
        for c in letters_or_digits()
            .find_iter(&lowered)
            .flat_map(|m| m.as_str().chars())
        {
            *counts.entry(c).or_insert(0) += 1;
            total += 1;
        }

        if total == 0 {
            return FrequencyProfile::empty();
        }

        let total = total as f64;
        let frequencies = counts
            .into_iter()
            .map(|(c, count)| (c, count as f64 / total))
            .collect();
        FrequencyProfile::from_map(frequencies)
    }
}

pub fn build_profile(text: &str) -> FrequencyProfile {
    ProfileBuilder.build(text)
}
