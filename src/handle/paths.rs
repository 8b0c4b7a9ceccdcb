use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cgroup::Controller;
use crate::fsutil;

use super::{CgroupHandle, Error, Result};

/// A [`CgroupHandle`] backed by a container's cgroup directories on disk.
///
/// On a unified host every attribute lives in one directory. On a v1 or hybrid host
/// each controller has its own directory. Attributes are routed to the v1 directory
/// of their controller when one is registered, and to the unified directory
/// otherwise.
///
/// # Examples
///
/// ```no_run
/// # use cgroup_props::cgroup::Controller;
/// # use cgroup_props::handle::{CgroupHandle, CgroupPaths};
/// let paths = CgroupPaths::default()
///     .with_unified("/sys/fs/cgroup/system.slice/web.service")
///     .with_legacy(Controller::NetPrio, "/sys/fs/cgroup/net_prio/web");
/// let lines = paths.read_attribute("memory.max")?;
/// # Ok::<(), cgroup_props::handle::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CgroupPaths {
    unified: Option<PathBuf>,
    legacy: HashMap<Controller, PathBuf>,
}

impl CgroupPaths {
    /// Sets the container's directory in the unified hierarchy.
    pub fn with_unified(mut self, path: impl Into<PathBuf>) -> Self {
        self.unified = Some(path.into());
        self
    }

    /// Sets the container's directory in the v1 hierarchy of `controller`.
    pub fn with_legacy(mut self, controller: Controller, path: impl Into<PathBuf>) -> Self {
        self.legacy.insert(controller, path.into());
        self
    }

    /// Returns the file backing the attribute `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDirectory`] if neither a v1 directory for the key's controller
    /// nor a unified directory is configured.
    pub fn attribute_path(&self, key: &str) -> Result<PathBuf> {
        let dir = Controller::from_key(key)
            .and_then(|controller| self.legacy.get(&controller))
            .or(self.unified.as_ref())
            .ok_or_else(|| Error::NoDirectory {
                key: key.to_owned(),
            })?;
        Ok(dir.join(key))
    }

    fn read_lines(path: &Path) -> Result<Vec<String>> {
        let reader = fsutil::open_file_reader(path)?;
        reader
            .lines()
            .map(|line| {
                line.map_err(|source| Error::ReadLine {
                    path: path.to_path_buf(),
                    source,
                })
            })
            .collect()
    }
}

impl CgroupHandle for CgroupPaths {
    type Error = Error;

    fn read_attribute(&self, key: &str) -> Result<Vec<String>> {
        let path = self.attribute_path(key)?;
        log::trace!("Reading cgroup attribute file `{}`", path.display());
        Self::read_lines(&path)
    }

    fn write_attribute(&self, key: &str, value: &str) -> Result<()> {
        let path = self.attribute_path(key)?;
        log::trace!("Writing cgroup attribute file `{}`", path.display());
        let mut file = fsutil::open_file_writer(&path)?;
        file.write_all(value.as_bytes())
            .map_err(|source| Error::Write { path, source })
    }
}
