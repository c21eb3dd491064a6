//! Loading resource files from disk and writing them back.

use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use crate::resources::file::{OpenError, RsrcFile, SaveError};

impl RsrcFile {
    /// Reads and parses the resource file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(RsrcFile::load(data)?)
    }

    /// Writes the current contents to `path`.
    ///
    /// The new contents are written to a temporary file next to the target
    /// and moved into place, so the target never holds a partial file. If
    /// `backup` is set and the target exists, it is first copied to
    /// `<path>.bak`, unless that backup already exists.
    pub fn save(&self, path: impl AsRef<Path>, backup: bool) -> Result<(), SaveError> {
        let path = path.as_ref();
        if backup {
            create_backup(path)?;
        }
        write_file_atomic(path, self.as_bytes())?;
        log::debug!("Wrote {} bytes to {}", self.file_size(), path.display());
        Ok(())
    }
}

/// The path a backup of `path` is written to.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

fn create_backup(path: &Path) -> Result<(), SaveError> {
    let backup = backup_path(path);
    let wrap = |source: io::Error| SaveError::Backup {
        path: backup.clone(),
        source,
    };
    let original = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(wrap(err)),
    };
    match OpenOptions::new().write(true).create_new(true).open(&backup) {
        Ok(mut file) => {
            file.write_all(&original).map_err(wrap)?;
            file.sync_all().map_err(wrap)?;
            log::info!("Backed up {} to {}", path.display(), backup.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            log::debug!("Keeping existing backup {}", backup.display());
            Ok(())
        }
        Err(err) => Err(wrap(err)),
    }
}

fn write_file_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(data)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;
    let file: File = temp_file.persist(path).map_err(|err| err.error)?;
    drop(file);
    Ok(())
}
