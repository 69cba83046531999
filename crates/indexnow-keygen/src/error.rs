use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet must be ASCII, found {0:?}")]
    NonAsciiAlphabet(char),
    #[error("alphabet contains {0:?} more than once")]
    DuplicateCharacter(char),
    #[error("minimum key length {min} exceeds maximum {max}")]
    InvertedBounds { min: usize, max: usize },
    #[error("key length {0} is outside the IndexNow range 8..=128")]
    LengthOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to seed generator from OS entropy: {0}")]
    Entropy(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("failed to create file: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to write key to file: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountError {
    #[error("Invalid input. Please enter a valid number.")]
    Invalid(String),
    #[error("Number of keys must be positive.")]
    NotPositive(i64),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read input: input stream closed")]
    Closed,
}

/// Why a single iteration of a batch did not produce a saved key.
#[derive(Debug, Error)]
pub enum KeyFailure {
    #[error("failed to generate key {index}: {source}")]
    Generate { index: usize, source: KeyError },
    #[error("file already exists: {}", .0.display())]
    Collision(PathBuf),
    #[error("failed to save key {index} to file: {source}")]
    Save { index: usize, source: StoreError },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("{failed} out of {total} keys failed to generate")]
    Partial { failed: usize, total: usize },
}
