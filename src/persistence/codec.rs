// File: src/persistence/codec.rs
//! Byte encoding of a single profile.
//!
//! Format v1 is bincode of `{ version, entries }` where `entries` is the list of
//! `(character, probability)` pairs in ascending character order. Probabilities
//! are stored as raw f64 so a decode returns exactly what was encoded.

use crate::core::types::FrequencyProfile;
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const FORMAT_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct EncodedProfile {
    version: u8,
    entries: Vec<(char, f64)>,
}

pub fn encode(profile: &FrequencyProfile) -> Result<Vec<u8>, CodecError> {
    let encoded = EncodedProfile {
        version: FORMAT_VERSION,
        entries: profile.iter().collect(),
    };
    Ok(bincode::serialize(&encoded)?)
}

pub fn decode(bytes: &[u8]) -> Result<FrequencyProfile, CodecError> {
    let encoded: EncodedProfile = bincode::deserialize(bytes)?;
    if encoded.version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(encoded.version));
    }

    let mut frequencies = BTreeMap::new();
    for (character, value) in encoded.entries {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(CodecError::InvalidProbability { character, value });
        }
        if frequencies.insert(character, value).is_some() {
            return Err(CodecError::DuplicateCharacter(character));
        }
    }
    Ok(FrequencyProfile::from_map(frequencies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::build_profile;

    fn raw(version: u8, entries: Vec<(char, f64)>) -> Vec<u8> {
        bincode::serialize(&EncodedProfile { version, entries }).unwrap()
    }

    #[test]
    fn test_round_trip_is_exact() {
        for text in [
            "",
            "The quick brown fox jumps over the lazy dog.",
            "Le français est une langue romane",
            "ü ß 漢字 123",
        ] {
            let profile = build_profile(text);
            let bytes = encode(&profile).unwrap();
            assert_eq!(decode(&bytes).unwrap(), profile, "round trip of {text:?}");
        }
    }

    #[test]
    fn test_rejects_duplicate_character() {
        let bytes = raw(FORMAT_VERSION, vec![('a', 0.5), ('a', 0.5)]);
        assert!(matches!(decode(&bytes), Err(CodecError::DuplicateCharacter('a'))));
    }

    #[test]
    fn test_rejects_bad_probability() {
        for value in [f64::NAN, -0.1, 1.5, f64::INFINITY] {
            let bytes = raw(FORMAT_VERSION, vec![('a', value)]);
            assert!(matches!(
                decode(&bytes),
                Err(CodecError::InvalidProbability { character: 'a', .. })
            ));
        }
    }

    #[test]
    fn test_rejects_unknown_version_and_garbage() {
        let bytes = raw(9, vec![]);
        assert!(matches!(decode(&bytes), Err(CodecError::UnsupportedVersion(9))));
        assert!(decode(&[]).is_err());
        assert!(decode(&[1, 255, 255, 255, 255, 255, 255, 255, 255]).is_err());
    }
}
