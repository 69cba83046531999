use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::StoreError, keygen::Key};

/// Directory, relative to the working directory, that keys are written into.
pub const OUTPUT_DIR: &str = "static";

pub fn ensure_output_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(dir = %dir.display(), "created output directory");
    Ok(())
}

pub fn key_path(dir: &Path, key: &Key) -> PathBuf {
    dir.join(key.file_name())
}

/// Write `key` to `<dir>/<key>.txt`, refusing to touch a file that already
/// exists. Existence check and creation happen in one `create_new` open.
pub fn save_key(dir: &Path, key: &Key) -> Result<PathBuf, StoreError> {
    let path = key_path(dir, key);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(StoreError::AlreadyExists(path));
        }
        Err(source) => return Err(StoreError::Create { path, source }),
    };
    write_key(&mut file, key, &path)?;
    Ok(path)
}

fn write_key<W: Write>(mut out: W, key: &Key, path: &Path) -> Result<(), StoreError> {
    out.write_all(key.as_str().as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}
