//! The file-system operations diagnostics need, behind a trait so setup can be
//! exercised against fakes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// A writable file that can be forced to durable storage.
pub trait DumpFile: Write + Send {
    fn sync(&mut self) -> io::Result<()>;
}

impl DumpFile for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

pub trait FileSystem: Send + Sync {
    /// Stat `path`. `Ok(false)` means it does not exist.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Create `path` and any missing parents.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Open `path` write-only for appending, creating it if missing.
    fn open_append(&self, path: &Path) -> io::Result<Box<dyn DumpFile>>;

    /// Open `path` write-only, creating it if missing and truncating it otherwise.
    fn open_truncate(&self, path: &Path) -> io::Result<Box<dyn DumpFile>>;
}

/// The real file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn open_append(&self, path: &Path) -> io::Result<Box<dyn DumpFile>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Box::new(file))
    }

    fn open_truncate(&self, path: &Path) -> io::Result<Box<dyn DumpFile>> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Box::new(file))
    }
}
