use crate::cgroup::{Controller, HierarchyVersion};

/// Detected hierarchy version per cgroup controller.
///
/// A controller without a detected version is unavailable on the host. The value
/// is populated once, usually by [`super::detect_capabilities`], and then shared
/// read-only by every property access.
///
/// # Examples
///
/// ```
/// # use cgroup_props::capabilities::Capabilities;
/// # use cgroup_props::cgroup::{Controller, HierarchyVersion};
/// let caps = Capabilities::default()
///     .with(Controller::Memory, HierarchyVersion::V2)
///     .with(Controller::Pids, HierarchyVersion::V1);
/// assert_eq!(caps.version(Controller::Memory), Some(HierarchyVersion::V2));
/// assert_eq!(caps.version(Controller::Cpu), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Capabilities {
    pids: Option<HierarchyVersion>,
    memory: Option<HierarchyVersion>,
    cpu: Option<HierarchyVersion>,
    cpuacct: Option<HierarchyVersion>,
    blkio: Option<HierarchyVersion>,
    devices: Option<HierarchyVersion>,
    net_prio: Option<HierarchyVersion>,
}

impl Capabilities {
    /// Capabilities with every controller reported under the same version.
    pub fn uniform(version: HierarchyVersion) -> Self {
        Controller::ALL
            .into_iter()
            .fold(Self::default(), |caps, controller| caps.with(controller, version))
    }

    /// Returns the detected version of the given controller.
    pub fn version(&self, controller: Controller) -> Option<HierarchyVersion> {
        *self.slot(controller)
    }

    /// Returns a copy with the given controller reported under `version`.
    pub fn with(mut self, controller: Controller, version: HierarchyVersion) -> Self {
        self.set(controller, Some(version));
        self
    }

    /// Records the detected version of a controller, `None` marking it unavailable.
    pub fn set(&mut self, controller: Controller, version: Option<HierarchyVersion>) {
        *self.slot_mut(controller) = version;
    }

    fn slot(&self, controller: Controller) -> &Option<HierarchyVersion> {
        match controller {
            Controller::Pids => &self.pids,
            Controller::Memory => &self.memory,
            Controller::Cpu => &self.cpu,
            Controller::Cpuacct => &self.cpuacct,
            Controller::Blkio => &self.blkio,
            Controller::Devices => &self.devices,
            Controller::NetPrio => &self.net_prio,
        }
    }

    fn slot_mut(&mut self, controller: Controller) -> &mut Option<HierarchyVersion> {
        match controller {
            Controller::Pids => &mut self.pids,
            Controller::Memory => &mut self.memory,
            Controller::Cpu => &mut self.cpu,
            Controller::Cpuacct => &mut self.cpuacct,
            Controller::Blkio => &mut self.blkio,
            Controller::Devices => &mut self.devices,
            Controller::NetPrio => &mut self.net_prio,
        }
    }
}
