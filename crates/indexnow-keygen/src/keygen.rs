use std::fmt;

use rand::{CryptoRng, Rng, SeedableRng, rngs::StdRng};

use crate::{config::KeyConfig, error::KeyError};

/// A generated verification key. Only produced by the generators below, so its
/// length and characters always satisfy the config it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the file the key is published under.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draw one key from `rng`: a uniform length within the configured bounds,
/// then that many characters picked uniformly from the alphabet.
pub fn generate_key_with<R: CryptoRng>(config: &KeyConfig, rng: &mut R) -> Key {
    let alphabet = config.alphabet();
    let len = rng.random_range(config.lengths());
    let key = (0..len)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect();
    Key(key)
}

/// Generate a key from a generator freshly seeded by the operating system.
pub fn generate_key(config: &KeyConfig) -> Result<Key, KeyError> {
    let mut rng = StdRng::try_from_os_rng().map_err(|e| KeyError::Entropy(e.into()))?;
    Ok(generate_key_with(config, &mut rng))
}

/// Anything that can hand out keys one at a time.
pub trait KeySource {
    fn next_key(&mut self, config: &KeyConfig) -> Result<Key, KeyError>;
}

/// Reseeds from OS entropy for every key; nothing is shared between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeySource;

impl KeySource for OsKeySource {
    fn next_key(&mut self, config: &KeyConfig) -> Result<Key, KeyError> {
        generate_key(config)
    }
}

/// Draws every key from one caller-supplied cryptographic generator.
#[derive(Debug)]
pub struct RngKeySource<R>(pub R);

impl<R: CryptoRng> KeySource for RngKeySource<R> {
    fn next_key(&mut self, config: &KeyConfig) -> Result<Key, KeyError> {
        Ok(generate_key_with(config, &mut self.0))
    }
}
