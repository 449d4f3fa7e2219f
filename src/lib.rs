// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod persistence;
pub mod seed;
pub mod translation;

pub use crate::core::engine::LanguageClassifier;
pub use crate::core::types::{Detection, FrequencyProfile, LanguageCode, UNKNOWN};
