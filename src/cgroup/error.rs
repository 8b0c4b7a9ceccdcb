use std::fmt;

use super::{Controller, HierarchyVersion, Property};

/// Direction of a property access, reported in [`ResolveError::UnsupportedProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Set,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => write!(f, "get"),
            Operation::Set => write!(f, "set"),
        }
    }
}

/// Errors that occur while mapping a [`Property`] to a concrete cgroup attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(
        "cgroup property `{property}` is not supported for {operation} on {}",
        hierarchy_label(.version)
    )]
    UnsupportedProperty {
        property: Property,
        /// Detected version of the owning controller, `None` if the property is
        /// unsupported regardless of version.
        version: Option<HierarchyVersion>,
        operation: Operation,
    },
    #[error("cgroup controller `{controller}` required by property `{property}` is not available")]
    ControllerUnavailable {
        property: Property,
        controller: Controller,
    },
}

fn hierarchy_label(version: &Option<HierarchyVersion>) -> String {
    match version {
        Some(version) => version.to_string(),
        None => "any cgroup hierarchy".to_owned(),
    }
}

/// Errors returned by [`super::get`] and [`super::set`].
///
/// `E` is the error type of the [`crate::handle::CgroupHandle`] the access went
/// through. A failed read surfaces the handle's error as is; a failed write is
/// keyed by the attribute it targeted.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Handle(E),
    #[error("failed to apply cgroup attribute `{key}`: {source}")]
    ApplyFailed {
        key: String,
        #[source]
        source: E,
    },
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
