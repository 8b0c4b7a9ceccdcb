use crate::capabilities::Capabilities;
use crate::handle::CgroupHandle;

use super::error::{Error, Operation, ResolveError, Result};
use super::resolver::{ConfigItem, resolve, select_key};
use super::{HierarchyVersion, Property};

/// Reads `property` from the container behind `handle`.
///
/// Exactly one attribute is read, chosen by the version detected for the property's
/// controller. The lines returned by the handle are passed back unmodified.
///
/// # Errors
///
/// - [`Error::Resolve`] if the property cannot be read on this host.
/// - [`Error::Handle`] carrying the handle's own error, unchanged, if the read fails.
pub fn get<H>(
    handle: &H,
    caps: &Capabilities,
    property: Property,
) -> Result<Vec<String>, H::Error>
where
    H: CgroupHandle + ?Sized,
{
    let (key, version) = read_key(property, caps)?;
    log::trace!("Reading `{key}` for `{property}` ({version})");

    handle.read_attribute(key).map_err(Error::Handle)
}

/// Sets `property` to `value` on the container behind `handle`.
///
/// Resolves the property with [`resolve`] and applies the result with [`apply`].
///
/// # Errors
///
/// - [`Error::Resolve`] if the property cannot be written on this host. Nothing is
///   written in that case.
/// - [`Error::ApplyFailed`] naming the attribute whose write failed.
pub fn set<H>(
    handle: &H,
    property: Property,
    value: &str,
    caps: &Capabilities,
) -> Result<(), H::Error>
where
    H: CgroupHandle + ?Sized,
{
    let items = resolve(property, value, caps)?;
    log::debug!("Applying {} cgroup attribute(s) for `{property}`", items.len());
    apply(handle, &items)
}

/// Writes each item to `handle`, in order.
///
/// The first failing write stops the sequence. Writes that already succeeded are not
/// rolled back.
///
/// # Errors
///
/// Returns [`Error::ApplyFailed`] naming the attribute whose write failed.
pub fn apply<H>(handle: &H, items: &[ConfigItem]) -> Result<(), H::Error>
where
    H: CgroupHandle + ?Sized,
{
    for item in items {
        log::trace!("Writing `{}` = `{}` ({})", item.key, item.value, item.version);
        handle
            .write_attribute(&item.key, &item.value)
            .map_err(|source| {
                log::warn!("Failed to write cgroup attribute `{}`: {source}", item.key);
                Error::ApplyFailed {
                    key: item.key.clone(),
                    source,
                }
            })?;
    }

    Ok(())
}

fn read_key(
    property: Property,
    caps: &Capabilities,
) -> std::result::Result<(&'static str, HierarchyVersion), ResolveError> {
    let (v1, v2) = match property {
        Property::PidsCurrent => (Some("pids.current"), Some("pids.current")),
        Property::PidsMax => (Some("pids.max"), Some("pids.max")),
        Property::MemoryCurrent => (Some("memory.usage_in_bytes"), Some("memory.current")),
        Property::MemoryLimit => (Some("memory.limit_in_bytes"), Some("memory.max")),
        Property::MemorySoftLimit => (Some("memory.soft_limit_in_bytes"), Some("memory.low")),
        Property::MemorySwappiness => (Some("memory.swappiness"), None),
        Property::MemoryMemswLimit => (Some("memory.memsw.limit_in_bytes"), None),
        Property::MemoryMemswUsage => (Some("memory.memsw.usage_in_bytes"), None),
        Property::MemoryMemswMaxUsage => (Some("memory.memsw.max_usage_in_bytes"), None),
        Property::CpuShares => (Some("cpu.shares"), Some("cpu.weight")),
        Property::CpuCfsPeriod => (Some("cpu.cfs_period_us"), None),
        Property::CpuCfsQuota => (Some("cpu.cfs_quota_us"), None),
        Property::CpuacctUsage => (Some("cpuacct.usage"), None),
        Property::BlkioWeight => (Some("blkio.weight"), Some("io.weight")),
        Property::NetPrioIfPrioMap => (Some("net_prio.ifpriomap"), None),
        // write-only
        Property::DevicesAllow | Property::DevicesDeny => {
            return Err(ResolveError::UnsupportedProperty {
                property,
                version: None,
                operation: Operation::Get,
            });
        }
    };

    select_key(property, caps, Operation::Get, v1, v2)
}
