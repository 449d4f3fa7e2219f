// File: src/error.rs
use thiserror::Error;

/// Errors raised while encoding or decoding a stored profile.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("profile encoding failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("unsupported profile format version {0}")]
    UnsupportedVersion(u8),

    #[error("character {0:?} appears more than once")]
    DuplicateCharacter(char),

    #[error("probability {value} for {character:?} is outside [0, 1]")]
    InvalidProbability { character: char, value: f64 },
}

/// Errors raised by a durable store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("store file is corrupt: {0}")]
    Corrupt(String),
}

/// Errors surfaced by the classifier's administration calls.
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("invalid language code {0:?}")]
    InvalidLanguageCode(String),

    #[error("failed to persist profile: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced by the translation workflow.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation cache error: {0}")]
    Store(#[from] StoreError),

    #[error("translation cache record is corrupt: {0}")]
    Codec(#[from] bincode::Error),
}
