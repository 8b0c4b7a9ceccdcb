use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use cgroup_props::fsutil;
/// let reader = fsutil::open_file_reader("/sys/fs/cgroup/cgroup.controllers")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Opens an existing file for writing, truncating it.
///
/// The file is never created: cgroup attribute files are provided by the kernel, so a
/// missing file means the attribute does not exist.
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
pub fn open_file_writer(path: impl AsRef<Path>) -> Result<File, FileOpenError> {
    let path = path.as_ref();
    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| FileOpenError {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_open_file_reader_success() {
        let tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        let path = tmp.path();
        let reader = open_file_reader(path).expect("should open test file");
        let metadata = reader.get_ref().metadata().unwrap();
        assert!(metadata.is_file());
    }

    #[test]
    fn test_open_file_reader_error() {
        let result = open_file_reader("/definitely/does/not/exist");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("/definitely/does/not/exist"));
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_file_writer_truncates() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "1073741824\n").unwrap();

        let mut file = open_file_writer(tmp.path()).unwrap();
        io::Write::write_all(&mut file, b"max").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(tmp.path()).unwrap(), "max");
    }

    #[test]
    fn test_open_file_writer_does_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.max");

        let err = open_file_writer(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert!(!path.exists());
    }
}
