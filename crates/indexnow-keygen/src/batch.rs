use std::{
    fmt,
    io::{self, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    config::KeyConfig,
    error::{BatchError, KeyFailure, StoreError},
    keygen::{Key, KeySource},
    store,
};

/// Result of one iteration of a batch.
#[derive(Debug)]
pub enum KeyOutcome {
    Saved {
        index: usize,
        key: Key,
        path: PathBuf,
    },
    Failed {
        index: usize,
        reason: KeyFailure,
    },
}

impl KeyOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Saved { index, .. } | Self::Failed { index, .. } => *index,
        }
    }
}

impl fmt::Display for KeyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { index, key, path } => {
                write!(f, "{index}) Key: {key}\n   Saved to: {}", path.display())
            }
            Self::Failed { reason, .. } => write!(f, "- {reason}"),
        }
    }
}

/// Every outcome of a batch, in iteration order.
#[derive(Debug)]
pub struct BatchReport {
    total: usize,
    outcomes: Vec<KeyOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn outcomes(&self) -> &[KeyOutcome] {
        &self.outcomes
    }

    pub fn saved(&self) -> impl Iterator<Item = (&Key, &Path)> {
        self.outcomes.iter().filter_map(|o| match o {
            KeyOutcome::Saved { key, path, .. } => Some((key, path.as_path())),
            KeyOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &KeyFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            KeyOutcome::Failed { reason, .. } => Some(reason),
            KeyOutcome::Saved { .. } => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Write the failure summary; writes nothing when every key was saved.
    pub fn write_summary<W: Write>(&self, mut out: W) -> io::Result<()> {
        let failed = self.failures().count();
        if failed == 0 {
            return Ok(());
        }
        writeln!(out, "\nEncountered {failed} errors during generation:")?;
        for outcome in self
            .outcomes
            .iter()
            .filter(|o| matches!(o, KeyOutcome::Failed { .. }))
        {
            writeln!(out, "{outcome}")?;
        }
        Ok(())
    }

    pub fn into_result(self) -> Result<(), BatchError> {
        match self.failures().count() {
            0 => Ok(()),
            failed => Err(BatchError::Partial {
                failed,
                total: self.total,
            }),
        }
    }
}

/// Generate and persist `count` keys under `dir`. A failed key is recorded and
/// the loop moves on; `on_outcome` sees each outcome as soon as it is known.
pub fn run_batch<S, F>(
    count: NonZeroUsize,
    config: &KeyConfig,
    source: &mut S,
    dir: &Path,
    mut on_outcome: F,
) -> BatchReport
where
    S: KeySource + ?Sized,
    F: FnMut(&KeyOutcome),
{
    let total = count.get();
    // grows per key; `total` is user input and may be enormous
    let mut outcomes = Vec::new();

    for index in 1..=total {
        let outcome = match generate_and_save(index, config, source, dir) {
            Ok((key, path)) => {
                info!(index, path = %path.display(), "saved key");
                KeyOutcome::Saved { index, key, path }
            }
            Err(reason) => {
                warn!(index, error = %reason, "key failed");
                KeyOutcome::Failed { index, reason }
            }
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    BatchReport { total, outcomes }
}

fn generate_and_save<S: KeySource + ?Sized>(
    index: usize,
    config: &KeyConfig,
    source: &mut S,
    dir: &Path,
) -> Result<(Key, PathBuf), KeyFailure> {
    let key = source
        .next_key(config)
        .map_err(|err| KeyFailure::Generate { index, source: err })?;
    match store::save_key(dir, &key) {
        Ok(path) => Ok((key, path)),
        Err(StoreError::AlreadyExists(path)) => Err(KeyFailure::Collision(path)),
        Err(source) => Err(KeyFailure::Save { index, source }),
    }
}
