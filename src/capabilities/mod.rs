//! Host capability detection.
//!
//! Determines, per cgroup controller, whether the host mounts it under the v1 or the
//! v2 hierarchy.
mod descriptor;
mod detect;
mod error;

pub use descriptor::Capabilities;
pub use detect::detect_capabilities;
pub use error::{Error, Result};
