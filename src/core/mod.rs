// src/core/mod.rs

pub mod catalog;
pub mod distance;
pub mod engine;
pub mod profile;
pub mod types;
