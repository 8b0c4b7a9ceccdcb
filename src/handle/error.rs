use std::path::PathBuf;

use crate::fsutil;

/// Errors raised by [`super::CgroupPaths`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no cgroup directory configured for attribute `{key}`")]
    NoDirectory { key: String },
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to read line for file `{path}`: {source}")]
    ReadLine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write cgroup attribute file `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
