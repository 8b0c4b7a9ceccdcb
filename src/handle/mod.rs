//! Container handles that perform the actual cgroup attribute I/O.
//!
//! [`crate::cgroup::get`] and [`crate::cgroup::set`] never touch the filesystem
//! themselves. They go through a [`CgroupHandle`], which is either provided by the
//! container runtime or is the filesystem-backed [`CgroupPaths`].
mod error;
mod paths;

pub use error::{Error, Result};
pub use paths::CgroupPaths;

/// Reads and writes cgroup attributes of one container.
///
/// Both calls are synchronous. Implementations decide their own concurrency
/// guarantees; concurrent calls for the same attribute are only as safe as the
/// implementation makes them.
pub trait CgroupHandle {
    type Error: std::error::Error + 'static;

    /// Reads the attribute `key`, e.g. `memory.max`, returning its lines.
    fn read_attribute(&self, key: &str) -> std::result::Result<Vec<String>, Self::Error>;

    /// Writes `value` to the attribute `key`.
    fn write_attribute(&self, key: &str, value: &str) -> std::result::Result<(), Self::Error>;
}
