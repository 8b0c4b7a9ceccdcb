use crate::capabilities::Capabilities;

use super::error::{Operation, ResolveError};
use super::{HierarchyVersion, Property};

/// One concrete cgroup attribute write.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConfigItem {
    /// Literal attribute name, e.g. `memory.max`.
    pub key: String,
    /// Value written to the attribute, passed through verbatim.
    pub value: String,
    /// Hierarchy version the key belongs to.
    pub version: HierarchyVersion,
}

impl ConfigItem {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        version: HierarchyVersion,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            version,
        }
    }
}

/// Resolves the attribute writes needed to set `property` to `value` on this host.
///
/// The owning controller's detected version selects the attribute name. The value is
/// not validated; the kernel enforces range and format.
///
/// # Errors
///
/// - [`ResolveError::ControllerUnavailable`] if `caps` has no version for the
///   controller owning `property`.
/// - [`ResolveError::UnsupportedProperty`] if `property` is read-only, or has no
///   writable attribute under the detected version.
///
/// # Examples
///
/// ```
/// # use cgroup_props::capabilities::Capabilities;
/// # use cgroup_props::cgroup::{resolve, ConfigItem, Controller, HierarchyVersion, Property};
/// let caps = Capabilities::default().with(Controller::Cpu, HierarchyVersion::V2);
/// let items = resolve(Property::CpuShares, "100", &caps).unwrap();
/// assert_eq!(items, vec![ConfigItem::new("cpu.weight", "100", HierarchyVersion::V2)]);
/// ```
pub fn resolve(
    property: Property,
    value: &str,
    caps: &Capabilities,
) -> Result<Vec<ConfigItem>, ResolveError> {
    let (key, version) = match property {
        Property::PidsMax => select_key(
            property,
            caps,
            Operation::Set,
            Some("pids.max"),
            Some("pids.max"),
        )?,
        Property::MemoryLimit => select_key(
            property,
            caps,
            Operation::Set,
            Some("memory.limit_in_bytes"),
            Some("memory.max"),
        )?,
        Property::MemorySoftLimit => select_key(
            property,
            caps,
            Operation::Set,
            Some("memory.soft_limit_in_bytes"),
            Some("memory.low"),
        )?,
        Property::MemorySwappiness => {
            select_key(property, caps, Operation::Set, Some("memory.swappiness"), None)?
        }
        Property::MemoryMemswLimit => select_key(
            property,
            caps,
            Operation::Set,
            Some("memory.memsw.limit_in_bytes"),
            None,
        )?,
        Property::CpuShares => {
            select_key(property, caps, Operation::Set, Some("cpu.shares"), Some("cpu.weight"))?
        }
        Property::CpuCfsPeriod => {
            select_key(property, caps, Operation::Set, Some("cpu.cfs_period_us"), None)?
        }
        Property::CpuCfsQuota => {
            select_key(property, caps, Operation::Set, Some("cpu.cfs_quota_us"), None)?
        }
        Property::BlkioWeight => {
            select_key(property, caps, Operation::Set, Some("blkio.weight"), Some("io.weight"))?
        }
        Property::NetPrioIfPrioMap => {
            select_key(property, caps, Operation::Set, Some("net_prio.ifpriomap"), None)?
        }
        // Device rules are only applied through the v1 interface.
        Property::DevicesAllow => ("devices.allow", HierarchyVersion::V1),
        Property::DevicesDeny => ("devices.deny", HierarchyVersion::V1),
        // Read-only counters. `pids.current` is rejected here rather than mapped, since
        // the kernel refuses writes to it on both hierarchies.
        Property::PidsCurrent
        | Property::MemoryCurrent
        | Property::MemoryMemswUsage
        | Property::MemoryMemswMaxUsage
        | Property::CpuacctUsage => {
            return Err(ResolveError::UnsupportedProperty {
                property,
                version: None,
                operation: Operation::Set,
            });
        }
    };

    log::trace!("Resolved `{property}` to `{key}` ({version})");
    Ok(vec![ConfigItem::new(key, value, version)])
}

/// Picks the v1 or v2 key of `property` from the version detected for its controller.
///
/// A `None` key marks the property as unsupported under that version.
pub(super) fn select_key(
    property: Property,
    caps: &Capabilities,
    operation: Operation,
    v1: Option<&'static str>,
    v2: Option<&'static str>,
) -> Result<(&'static str, HierarchyVersion), ResolveError> {
    let controller = property.controller();
    let version = caps
        .version(controller)
        .ok_or(ResolveError::ControllerUnavailable {
            property,
            controller,
        })?;

    let key = match version {
        HierarchyVersion::V1 => v1,
        HierarchyVersion::V2 => v2,
    };

    key.map(|key| (key, version))
        .ok_or(ResolveError::UnsupportedProperty {
            property,
            version: Some(version),
            operation,
        })
}
