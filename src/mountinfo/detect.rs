use crate::cgroup::HierarchyVersion;
use crate::fsutil;

use super::parser::parse_mount_info_line;
use super::{Error, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A cgroup filesystem mount found in a `mountinfo` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgroupMount {
    /// `V1` for `cgroup` mounts, `V2` for `cgroup2` mounts.
    pub version: HierarchyVersion,
    /// Mount point as seen by the process owning the `mountinfo` file.
    pub mount_point: PathBuf,
    /// Superblock options; for v1 mounts these include the attached controllers.
    pub options: Vec<String>,
}

impl CgroupMount {
    /// Returns true if the mount's superblock options contain `option`.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Lists all cgroup v1 and v2 mounts in the given `mountinfo` file, in file order.
///
/// # Arguments
///
/// * `path` - Path to a Linux mountinfo file (e.g., `/proc/self/mountinfo`).
///
/// # Errors
///
/// - [`Error::FileOpen`] if the file can't be opened.
/// - [`Error::ReadLine`] if reading from the file fails.
/// - [`Error::Parse`] if parsing any line fails.
///
/// # Example
///
/// ```no_run
/// use cgroup_props::mountinfo::detect_cgroup_mounts;
///
/// for mount in detect_cgroup_mounts("/proc/self/mountinfo").unwrap() {
///     println!("{:?} at {}", mount.version, mount.mount_point.display());
/// }
/// ```
pub fn detect_cgroup_mounts(path: impl AsRef<Path>) -> Result<Vec<CgroupMount>> {
    let path = path.as_ref();
    let buf = fsutil::open_file_reader(path)?;

    detect_cgroup_mounts_from_reader(buf, path)
}

/// Internal implementation for collecting cgroup mounts from a reader.
///
/// `origin` is the logical origin of the data, used in error messages.
fn detect_cgroup_mounts_from_reader<R: BufRead>(
    mut reader: R,
    origin: &Path,
) -> Result<Vec<CgroupMount>> {
    let mut line = String::with_capacity(256);
    let mut mounts = Vec::new();

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        let mount_info = parse_mount_info_line(line.as_str()).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let version = match mount_info.fs_type {
            "cgroup" => Some(HierarchyVersion::V1),
            "cgroup2" => Some(HierarchyVersion::V2),
            _ => None,
        };

        if let Some(version) = version {
            log::debug!(
                "Found `{}` mount point with root `{}`: {}",
                mount_info.fs_type,
                mount_info.root,
                mount_info.mount_point
            );
            mounts.push(CgroupMount {
                version,
                mount_point: PathBuf::from(&*mount_info.mount_point),
                options: mount_info.super_options().map(str::to_owned).collect(),
            });
        }

        line.clear();
    }

    Ok(mounts)
}
