use std::env;
use std::path::{Path, PathBuf};

use capabilities::Capabilities;
use cgroup::{ConfigItem, Controller, Property};
use handle::CgroupPaths;

/// cgroup-props: version-agnostic access to cgroup resource-control properties.
///
/// This library lets a container host read and write resource-control knobs (memory
/// limits, CPU shares, PID limits, block-I/O weight, device rules, network priority
/// maps) without knowing whether each controller is mounted under cgroup v1 or v2.
pub mod capabilities;
pub mod cgroup;
pub mod fsutil;
pub mod handle;
pub mod mountinfo;

const USAGE: &str = "usage: cgroup-props [<property> [<value>]]";

/// Runs the `cgroup-props` diagnostic tool.
///
/// Detects the host's cgroup capabilities and then, depending on `args`:
///
/// - no arguments: prints the detected capabilities as JSON;
/// - `<property>`: prints the property's value, one line per output line;
/// - `<property> <value>`: sets the property and prints the applied writes as JSON.
///
/// # Errors
///
/// Possible errors include:
/// - Failure to read `/proc/self/mountinfo` or `cgroup.controllers`.
/// - An unknown property name or invalid arguments.
/// - A property that is not supported on this host.
/// - I/O errors when reading or writing cgroup attribute files.
pub fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let rootfs = env::var_os("ROOTFS_MOUNT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"));
    let mountinfo = env::var_os("CGROUP_PROPS_MOUNTINFO")
        .map(PathBuf::from)
        .unwrap_or_else(|| rootfs.join("proc/self/mountinfo"));
    log::debug!(
        "Using rootfs `{}` and mountinfo `{}`",
        rootfs.display(),
        mountinfo.display()
    );

    let caps = capabilities::detect_capabilities(&rootfs, &mountinfo)?;

    match args {
        [] => println!("{}", serde_json::to_string_pretty(&caps)?),
        [property] => {
            let property: Property = property.parse()?;
            let handle = handle_from_env();
            for line in cgroup::get(&handle, &caps, property)? {
                println!("{line}");
            }
        }
        [property, value] => {
            let property: Property = property.parse()?;
            let handle = handle_from_env();
            let items = set_property(&handle, &caps, property, value)?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

/// Sets `property` through [`cgroup::set`] and returns the writes it applied.
fn set_property(
    handle: &CgroupPaths,
    caps: &Capabilities,
    property: Property,
    value: &str,
) -> Result<Vec<ConfigItem>, Box<dyn std::error::Error>> {
    cgroup::set(handle, property, value, caps)?;
    // resolve is deterministic, so this lists exactly the writes `set` applied
    Ok(cgroup::resolve(property, value, caps)?)
}

/// Builds the container's [`CgroupPaths`] from `CGROUP_PROPS_UNIFIED_PATH` and
/// `CGROUP_PROPS_V1_<CONTROLLER>_PATH`, e.g. `CGROUP_PROPS_V1_NET_PRIO_PATH`.
fn handle_from_env() -> CgroupPaths {
    let mut paths = CgroupPaths::default();
    if let Some(unified) = env::var_os("CGROUP_PROPS_UNIFIED_PATH") {
        paths = paths.with_unified(unified);
    }
    for controller in Controller::ALL {
        let var = format!(
            "CGROUP_PROPS_V1_{}_PATH",
            controller.v1_name().to_ascii_uppercase()
        );
        if let Some(dir) = env::var_os(&var) {
            log::debug!(
                "Using `{}` for the v1 {controller} hierarchy",
                Path::new(&dir).display()
            );
            paths = paths.with_legacy(controller, dir);
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgroup::HierarchyVersion;

    #[test]
    fn test_set_property_writes_and_reports_items() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cpu.weight"), "100\n").unwrap();
        let handle = CgroupPaths::default().with_unified(dir.path());
        let caps = Capabilities::uniform(HierarchyVersion::V2);

        let items = set_property(&handle, &caps, Property::CpuShares, "200").unwrap();
        assert_eq!(
            items,
            vec![ConfigItem::new("cpu.weight", "200", HierarchyVersion::V2)]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("cpu.weight")).unwrap(),
            "200"
        );
    }

    #[test]
    fn test_set_property_fails_on_missing_attribute() {
        let dir = tempfile::tempdir().unwrap();
        let handle = CgroupPaths::default().with_unified(dir.path());
        let caps = Capabilities::uniform(HierarchyVersion::V2);

        let err = set_property(&handle, &caps, Property::MemoryLimit, "1G").unwrap_err();
        assert!(err.to_string().contains("memory.max"));
    }
}
