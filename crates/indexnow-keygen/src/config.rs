use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// Characters IndexNow accepts in a verification key.
pub const INDEXNOW_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";

pub const DEFAULT_MIN_LENGTH: usize = 64;
pub const DEFAULT_MAX_LENGTH: usize = 96;

/// Key lengths the IndexNow protocol allows.
pub const LENGTH_LIMIT: RangeInclusive<usize> = 8..=128;

/// Alphabet and inclusive length bounds used when generating keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    alphabet: Vec<u8>,
    min_len: usize,
    max_len: usize,
}

impl KeyConfig {
    pub fn new(alphabet: &str, min_len: usize, max_len: usize) -> Result<Self, ConfigError> {
        if alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if let Some(c) = alphabet.chars().find(|c| !c.is_ascii()) {
            return Err(ConfigError::NonAsciiAlphabet(c));
        }
        let bytes = alphabet.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if bytes[..i].contains(&b) {
                return Err(ConfigError::DuplicateCharacter(char::from(b)));
            }
        }
        if min_len > max_len {
            return Err(ConfigError::InvertedBounds {
                min: min_len,
                max: max_len,
            });
        }
        for len in [min_len, max_len] {
            if !LENGTH_LIMIT.contains(&len) {
                return Err(ConfigError::LengthOutOfRange(len));
            }
        }
        Ok(Self {
            alphabet: bytes.to_vec(),
            min_len,
            max_len,
        })
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min_len..=self.max_len
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.alphabet.contains(&(c as u8))
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            alphabet: INDEXNOW_ALPHABET.as_bytes().to_vec(),
            min_len: DEFAULT_MIN_LENGTH,
            max_len: DEFAULT_MAX_LENGTH,
        }
    }
}
