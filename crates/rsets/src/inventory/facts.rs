use serde::{Deserialize, Serialize};

use crate::ProcCount;

/// Hardware facts shared by all nodes of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct GlobalResourceFacts {
    pub physical_cores_avail_per_node: ProcCount,
    /// Includes hyperthreads.
    pub logical_cores_avail_per_node: ProcCount,
    /// Check requests against hard core and node ceilings.
    pub enforce_worker_core_bounds: bool,
}

impl GlobalResourceFacts {
    pub fn new(physical_cores: ProcCount, logical_cores: ProcCount) -> Self {
        GlobalResourceFacts {
            physical_cores_avail_per_node: physical_cores,
            logical_cores_avail_per_node: logical_cores,
            enforce_worker_core_bounds: true,
        }
    }

    pub fn cores_avail_per_node(&self, hyperthreads: bool) -> ProcCount {
        if hyperthreads {
            self.logical_cores_avail_per_node
        } else {
            self.physical_cores_avail_per_node
        }
    }
}
