use std::io::Write;
use std::path::Path;

use cgroup_props::capabilities::{self, Capabilities};
use cgroup_props::cgroup::{self, Controller, Error, HierarchyVersion, Property, ResolveError};
use cgroup_props::handle::{self, CgroupHandle, CgroupPaths};

/// A fake host with memory, cpu and io on the unified hierarchy and pids, devices and
/// net_prio on v1.
struct HybridHost {
    rootfs: tempfile::TempDir,
    mountinfo: tempfile::NamedTempFile,
}

impl HybridHost {
    fn new() -> Self {
        let rootfs = tempfile::tempdir().unwrap();
        let unified = rootfs.path().join("sys/fs/cgroup/unified");
        std::fs::create_dir_all(&unified).unwrap();
        std::fs::write(unified.join("cgroup.controllers"), "cpu io memory pids\n").unwrap();

        let mut mountinfo = tempfile::NamedTempFile::new().unwrap();
        for line in [
            "25 1 0:24 / /proc rw,relatime - proc proc rw",
            "30 24 0:26 / /sys/fs/cgroup/unified rw,nosuid shared:10 - cgroup2 cgroup2 rw,nsdelegate",
            "31 24 0:27 / /sys/fs/cgroup/pids rw,nosuid shared:11 - cgroup cgroup rw,pids",
            "32 24 0:28 / /sys/fs/cgroup/devices rw,nosuid shared:12 - cgroup cgroup rw,devices",
            "33 24 0:29 / /sys/fs/cgroup/net_cls,net_prio rw,nosuid shared:13 - cgroup cgroup rw,net_cls,net_prio",
        ] {
            writeln!(mountinfo, "{line}").unwrap();
        }

        Self { rootfs, mountinfo }
    }

    fn capabilities(&self) -> Capabilities {
        capabilities::detect_capabilities(self.rootfs.path(), self.mountinfo.path()).unwrap()
    }

    /// Creates the container's cgroup directory in `hierarchy` with the given files.
    fn container_dir(&self, hierarchy: &str, files: &[(&str, &str)]) -> std::path::PathBuf {
        let dir = self
            .rootfs
            .path()
            .join("sys/fs/cgroup")
            .join(hierarchy)
            .join("lxc/c1");
        std::fs::create_dir_all(&dir).unwrap();
        for (name, contents) in files {
            std::fs::write(dir.join(name), contents).unwrap();
        }
        dir
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn detects_per_controller_versions() {
    let host = HybridHost::new();
    let caps = host.capabilities();

    assert_eq!(caps.version(Controller::Memory), Some(HierarchyVersion::V2));
    assert_eq!(caps.version(Controller::Cpu), Some(HierarchyVersion::V2));
    assert_eq!(caps.version(Controller::Blkio), Some(HierarchyVersion::V2));
    assert_eq!(caps.version(Controller::Pids), Some(HierarchyVersion::V1));
    assert_eq!(caps.version(Controller::Devices), Some(HierarchyVersion::V1));
    assert_eq!(caps.version(Controller::NetPrio), Some(HierarchyVersion::V1));
    assert_eq!(caps.version(Controller::Cpuacct), None);
}

#[test]
fn reads_and_writes_across_hierarchies() {
    let host = HybridHost::new();
    let caps = host.capabilities();

    let unified = host.container_dir(
        "unified",
        &[
            ("memory.current", "1048576\n"),
            ("memory.max", "max\n"),
            ("cpu.weight", "100\n"),
        ],
    );
    let pids = host.container_dir("pids", &[("pids.current", "3\n"), ("pids.max", "max\n")]);
    let devices = host.container_dir("devices", &[("devices.deny", ""), ("devices.allow", "")]);

    let paths = CgroupPaths::default()
        .with_unified(&unified)
        .with_legacy(Controller::Pids, &pids)
        .with_legacy(Controller::Devices, &devices);

    assert_eq!(
        cgroup::get(&paths, &caps, Property::MemoryCurrent).unwrap(),
        vec!["1048576"]
    );
    assert_eq!(
        cgroup::get(&paths, &caps, Property::PidsCurrent).unwrap(),
        vec!["3"]
    );

    cgroup::set(&paths, Property::MemoryLimit, "268435456", &caps).unwrap();
    cgroup::set(&paths, Property::CpuShares, "200", &caps).unwrap();
    cgroup::set(&paths, Property::PidsMax, "512", &caps).unwrap();
    cgroup::set(&paths, Property::DevicesDeny, "a", &caps).unwrap();

    assert_eq!(read(&unified.join("memory.max")), "268435456");
    assert_eq!(read(&unified.join("cpu.weight")), "200");
    assert_eq!(read(&pids.join("pids.max")), "512");
    assert_eq!(read(&devices.join("devices.deny")), "a");
    assert!(!unified.join("memory.limit_in_bytes").exists());
    assert!(!unified.join("cpu.shares").exists());
}

#[test]
fn reports_unsupported_and_failed_writes() {
    let host = HybridHost::new();
    let caps = host.capabilities();
    let unified = host.container_dir("unified", &[]);
    let paths = CgroupPaths::default().with_unified(&unified);

    let err = cgroup::set(&paths, Property::MemoryMemswLimit, "1G", &caps).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::UnsupportedProperty {
            property: Property::MemoryMemswLimit,
            version: Some(HierarchyVersion::V2),
            ..
        })
    ));

    let err = cgroup::get(&paths, &caps, Property::CpuacctUsage).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::ControllerUnavailable {
            controller: Controller::Cpuacct,
            ..
        })
    ));

    // io.weight is not present in the container directory
    let err = cgroup::set(&paths, Property::BlkioWeight, "100", &caps).unwrap_err();
    match err {
        Error::ApplyFailed { key, source } => {
            assert_eq!(key, "io.weight");
            assert!(matches!(source, handle::Error::FileOpen(_)));
        }
        other => panic!("unexpected error: {other}"),
    }

    // no v1 pids directory was registered, so the key falls back to the unified one
    let err = cgroup::get(&paths, &caps, Property::PidsMax).unwrap_err();
    match err {
        Error::Handle(source) => assert!(matches!(source, handle::Error::FileOpen(_))),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_failures_surface_the_handle_error_unchanged() {
    let host = HybridHost::new();
    let caps = host.capabilities();
    let unified = host.container_dir("unified", &[]);
    let paths = CgroupPaths::default().with_unified(&unified);

    let direct = paths.read_attribute("memory.max").unwrap_err();
    let err = cgroup::get(&paths, &caps, Property::MemoryLimit).unwrap_err();
    assert_eq!(err.to_string(), direct.to_string());
    assert!(matches!(err, Error::Handle(handle::Error::FileOpen(_))));
}
