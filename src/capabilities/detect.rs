use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::cgroup::{Controller, HierarchyVersion};
use crate::fsutil;
use crate::mountinfo::{self, CgroupMount};

use super::{Capabilities, Error, Result};

/// Detects the hierarchy version of every controller on the host.
///
/// The detection works as follows:
///
/// 1. Every `cgroup` (v1) mount in `mountinfo_path` marks the controllers named in its
///    superblock options as [`HierarchyVersion::V1`].
/// 2. The first `cgroup2` mount marks every controller listed in its
///    `cgroup.controllers` file as [`HierarchyVersion::V2`], unless v1 already claims
///    the controller.
/// 3. `devices` has no entry in `cgroup.controllers`; it is reported as v2 whenever a
///    unified hierarchy is mounted and no v1 devices hierarchy exists.
///
/// Mount points are resolved relative to `rootfs`, so a monitor running in a
/// container can inspect the host through a bind mount.
///
/// # Errors
///
/// - [`Error::Mountinfo`] if the mountinfo file cannot be read or parsed.
/// - [`Error::FileOpen`] or [`Error::ReadLine`] if `cgroup.controllers` of the unified
///   hierarchy cannot be read.
pub fn detect_capabilities(
    rootfs: impl AsRef<Path>,
    mountinfo_path: impl AsRef<Path>,
) -> Result<Capabilities> {
    let mounts = mountinfo::detect_cgroup_mounts(mountinfo_path)?;
    if mounts.is_empty() {
        log::warn!("No cgroup mounts found, all controllers are unavailable");
    }

    let unified_controllers = match unified_mount(&mounts) {
        Some(mount) => {
            let path = host_path(rootfs.as_ref(), &mount.mount_point).join("cgroup.controllers");
            Some(read_controllers(&path)?)
        }
        None => None,
    };

    let caps = capabilities_from_mounts(&mounts, unified_controllers.as_ref());
    log::debug!("Detected cgroup capabilities: {caps:?}");
    Ok(caps)
}

/// Builds [`Capabilities`] from the cgroup mounts and the controllers enabled in the
/// unified hierarchy, if one is mounted.
pub(super) fn capabilities_from_mounts(
    mounts: &[CgroupMount],
    unified_controllers: Option<&HashSet<String>>,
) -> Capabilities {
    let mut caps = Capabilities::default();

    for mount in mounts
        .iter()
        .filter(|mount| mount.version == HierarchyVersion::V1)
    {
        for controller in Controller::ALL {
            if mount.has_option(controller.v1_name()) {
                caps.set(controller, Some(HierarchyVersion::V1));
            }
        }
    }

    let Some(enabled) = unified_controllers else {
        return caps;
    };

    for controller in Controller::ALL {
        if caps.version(controller).is_some() {
            continue;
        }
        let available = match controller.v2_name() {
            Some(name) => enabled.contains(name),
            None => controller == Controller::Devices,
        };
        if available {
            caps.set(controller, Some(HierarchyVersion::V2));
        }
    }

    caps
}

fn unified_mount(mounts: &[CgroupMount]) -> Option<&CgroupMount> {
    mounts
        .iter()
        .find(|mount| mount.version == HierarchyVersion::V2)
}

fn host_path(rootfs: &Path, mount_point: &Path) -> PathBuf {
    rootfs.join(mount_point.strip_prefix("/").unwrap_or(mount_point))
}

/// Reads the space-separated controller names from a `cgroup.controllers` file.
fn read_controllers(path: &Path) -> Result<HashSet<String>> {
    let reader = fsutil::open_file_reader(path)?;
    let mut controllers = HashSet::new();

    for line in reader.lines() {
        let line = line.map_err(|source| Error::ReadLine {
            path: path.to_path_buf(),
            source,
        })?;
        controllers.extend(line.split_whitespace().map(str::to_owned));
    }

    log::trace!(
        "Controllers enabled in `{}`: {:?}",
        path.display(),
        controllers
    );
    Ok(controllers)
}
