//! Version-agnostic access to cgroup resource-control properties.
//!
//! Callers name a [`Property`] and this module decides which attribute file backs it
//! on the current host. The decision is made per controller: a host may run the
//! memory controller under cgroup v2 while pids is still mounted under v1.
//!
//! # Key Components
//!
//! - [`resolve`]: maps a property and value to the ordered [`ConfigItem`] writes.
//! - [`get`]: reads the single attribute backing a property.
//! - [`set`]: resolves a property and applies its writes through [`apply`].
//!
//! # Attribute names
//!
//! | Property | cgroup v1 | cgroup v2 |
//! |---|---|---|
//! | `memory-current` | `memory.usage_in_bytes` | `memory.current` |
//! | `memory-limit` | `memory.limit_in_bytes` | `memory.max` |
//! | `memory-soft-limit` | `memory.soft_limit_in_bytes` | `memory.low` |
//! | `cpu-shares` | `cpu.shares` | `cpu.weight` |
//! | `blkio-weight` | `blkio.weight` | `io.weight` |
//! | `pids-max` | `pids.max` | `pids.max` |
//! | `devices-allow` / `devices-deny` | `devices.allow` / `devices.deny` | (v1 only) |
//!
//! # Concurrency
//!
//! Everything here is synchronous and stateless. Concurrent access to the same
//! container is only as safe as the [`crate::handle::CgroupHandle`] in use.
mod accessor;
mod error;
mod property;
mod resolver;

pub use accessor::{apply, get, set};
pub use error::{Error, Operation, ResolveError, Result};
pub use property::{Controller, HierarchyVersion, ParsePropertyError, Property};
pub use resolver::{ConfigItem, resolve};
