use std::path::PathBuf;

use crate::{fsutil, mountinfo};

/// Errors that may occur during capability detection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Mountinfo(#[from] mountinfo::Error),
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to read line for file `{path}`: {source}")]
    ReadLine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
