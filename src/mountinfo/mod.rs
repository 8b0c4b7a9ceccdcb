mod detect;
mod error;
mod parser;

pub use detect::{CgroupMount, detect_cgroup_mounts};
pub use error::{Error, Result};
pub use parser::{MountInfoField, ParseError};
