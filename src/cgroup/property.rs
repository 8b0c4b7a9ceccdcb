//! Version-agnostic identifiers for cgroup resource-control knobs.
//!
//! A [`Property`] names *what* a caller wants to read or write, independent of the
//! attribute file that backs it. Each property is owned by exactly one [`Controller`],
//! and the hierarchy version detected for that controller decides which attribute
//! name is used on the current host.

use std::fmt;
use std::str::FromStr;

/// The two cgroup hierarchy layouts a controller may be mounted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyVersion {
    /// Legacy per-controller hierarchy.
    V1,
    /// Unified hierarchy.
    V2,
}

impl fmt::Display for HierarchyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyVersion::V1 => write!(f, "cgroup v1"),
            HierarchyVersion::V2 => write!(f, "cgroup v2"),
        }
    }
}

/// A cgroup controller whose hierarchy version is detected independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    Pids,
    Memory,
    Cpu,
    Cpuacct,
    Blkio,
    Devices,
    NetPrio,
}

impl Controller {
    /// Every known controller.
    pub const ALL: [Controller; 7] = [
        Controller::Pids,
        Controller::Memory,
        Controller::Cpu,
        Controller::Cpuacct,
        Controller::Blkio,
        Controller::Devices,
        Controller::NetPrio,
    ];

    /// Name of the controller as it appears in the super options of a v1 mount.
    pub fn v1_name(self) -> &'static str {
        match self {
            Controller::Pids => "pids",
            Controller::Memory => "memory",
            Controller::Cpu => "cpu",
            Controller::Cpuacct => "cpuacct",
            Controller::Blkio => "blkio",
            Controller::Devices => "devices",
            Controller::NetPrio => "net_prio",
        }
    }

    /// Name of the controller in `cgroup.controllers` of the unified hierarchy.
    ///
    /// Returns `None` for controllers without a v2 interface file: `devices` is
    /// implemented through BPF programs, while `cpuacct` and `net_prio` do not exist
    /// in v2 at all.
    pub fn v2_name(self) -> Option<&'static str> {
        match self {
            Controller::Pids => Some("pids"),
            Controller::Memory => Some("memory"),
            Controller::Cpu => Some("cpu"),
            Controller::Blkio => Some("io"),
            Controller::Cpuacct | Controller::Devices | Controller::NetPrio => None,
        }
    }

    /// Returns the controller owning the given attribute key, e.g. `memory.max`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cgroup_props::cgroup::Controller;
    /// assert_eq!(Controller::from_key("io.weight"), Some(Controller::Blkio));
    /// assert_eq!(Controller::from_key("cpuacct.usage"), Some(Controller::Cpuacct));
    /// assert_eq!(Controller::from_key("cgroup.procs"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Controller> {
        let (prefix, _) = key.split_once('.')?;
        match prefix {
            "pids" => Some(Controller::Pids),
            "memory" => Some(Controller::Memory),
            "cpu" => Some(Controller::Cpu),
            "cpuacct" => Some(Controller::Cpuacct),
            "blkio" | "io" => Some(Controller::Blkio),
            "devices" => Some(Controller::Devices),
            "net_prio" => Some(Controller::NetPrio),
            _ => None,
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.v1_name())
    }
}

/// Abstract, version-agnostic resource-control property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PidsCurrent,
    PidsMax,
    MemoryCurrent,
    MemoryLimit,
    MemorySoftLimit,
    MemorySwappiness,
    MemoryMemswLimit,
    MemoryMemswUsage,
    MemoryMemswMaxUsage,
    CpuShares,
    CpuCfsPeriod,
    CpuCfsQuota,
    CpuacctUsage,
    BlkioWeight,
    NetPrioIfPrioMap,
    /// Host configuration only, always written through the v1 devices interface.
    DevicesAllow,
    /// Host configuration only, always written through the v1 devices interface.
    DevicesDeny,
}

impl Property {
    pub const ALL: [Property; 17] = [
        Property::PidsCurrent,
        Property::PidsMax,
        Property::MemoryCurrent,
        Property::MemoryLimit,
        Property::MemorySoftLimit,
        Property::MemorySwappiness,
        Property::MemoryMemswLimit,
        Property::MemoryMemswUsage,
        Property::MemoryMemswMaxUsage,
        Property::CpuShares,
        Property::CpuCfsPeriod,
        Property::CpuCfsQuota,
        Property::CpuacctUsage,
        Property::BlkioWeight,
        Property::NetPrioIfPrioMap,
        Property::DevicesAllow,
        Property::DevicesDeny,
    ];

    /// The controller whose detected version selects the attribute name.
    pub fn controller(self) -> Controller {
        match self {
            Property::PidsCurrent | Property::PidsMax => Controller::Pids,
            Property::MemoryCurrent
            | Property::MemoryLimit
            | Property::MemorySoftLimit
            | Property::MemorySwappiness
            | Property::MemoryMemswLimit
            | Property::MemoryMemswUsage
            | Property::MemoryMemswMaxUsage => Controller::Memory,
            Property::CpuShares | Property::CpuCfsPeriod | Property::CpuCfsQuota => {
                Controller::Cpu
            }
            Property::CpuacctUsage => Controller::Cpuacct,
            Property::BlkioWeight => Controller::Blkio,
            Property::NetPrioIfPrioMap => Controller::NetPrio,
            Property::DevicesAllow | Property::DevicesDeny => Controller::Devices,
        }
    }

    /// Stable kebab-case name, e.g. `memory-soft-limit`.
    pub fn name(self) -> &'static str {
        match self {
            Property::PidsCurrent => "pids-current",
            Property::PidsMax => "pids-max",
            Property::MemoryCurrent => "memory-current",
            Property::MemoryLimit => "memory-limit",
            Property::MemorySoftLimit => "memory-soft-limit",
            Property::MemorySwappiness => "memory-swappiness",
            Property::MemoryMemswLimit => "memory-memsw-limit",
            Property::MemoryMemswUsage => "memory-memsw-usage",
            Property::MemoryMemswMaxUsage => "memory-memsw-max-usage",
            Property::CpuShares => "cpu-shares",
            Property::CpuCfsPeriod => "cpu-cfs-period",
            Property::CpuCfsQuota => "cpu-cfs-quota",
            Property::CpuacctUsage => "cpuacct-usage",
            Property::BlkioWeight => "blkio-weight",
            Property::NetPrioIfPrioMap => "net-prio-ifpriomap",
            Property::DevicesAllow => "devices-allow",
            Property::DevicesDeny => "devices-deny",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl serde::Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Error returned when a string does not name a known [`Property`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown cgroup property `{0}`")]
pub struct ParsePropertyError(pub String);

impl FromStr for Property {
    type Err = ParsePropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|property| property.name() == s)
            .ok_or_else(|| ParsePropertyError(s.to_owned()))
    }
}
