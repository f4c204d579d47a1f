//! Resources that know how to release themselves.

use infra_core::BoxError;
use std::io;
use std::process::Child;
use tempfile::{NamedTempFile, TempDir};

/// A resource with its own release action.
///
/// Registering a `Release` value with
/// [`ResourceManager::manage`](super::ResourceManager::manage) or
/// [`ResourceManager::acquire_managed`](super::ResourceManager::acquire_managed)
/// uses [`release`](Self::release) as its cleanup.
pub trait Release {
    type Error: Into<BoxError>;

    /// Release the resource, consuming it
    fn release(self) -> Result<(), Self::Error>;
}

/// Removes the directory and everything in it
impl Release for TempDir {
    type Error = io::Error;

    fn release(self) -> io::Result<()> {
        self.close()
    }
}

/// Removes the file
impl Release for NamedTempFile {
    type Error = io::Error;

    fn release(self) -> io::Result<()> {
        self.close()
    }
}

/// Kills the process if it is still running and reaps it
impl Release for Child {
    type Error = io::Error;

    fn release(mut self) -> io::Result<()> {
        if self.try_wait()?.is_some() {
            return Ok(());
        }
        self.kill()?;
        self.wait()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_dir_release_removes_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();
        std::fs::write(path.join("data.txt"), "content").unwrap();

        dir.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_named_temp_file_release_removes_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        file.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_exited_child_release_is_ok() {
        let mut child = std::process::Command::new("true").spawn().unwrap();
        child.wait().unwrap();

        assert!(child.release().is_ok());
    }
}
