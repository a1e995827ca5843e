//! Resource sets for ensemble runs.
//!
//! A resource set (rset) is the smallest unit of cluster capacity handed to a task.
//! [`inventory::RsetInventory`] splits a node list into resource sets,
//! [`scheduler::ResourceScheduler`] assigns disjoint teams of them to tasks,
//! [`reconcile`] turns a partial process/node request into a complete one for the
//! nodes of a team and [`launch`] writes the artifacts consumed by an MPI launcher.

pub mod common;
pub mod inventory;
pub mod launch;
pub mod reconcile;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::common::error::ConfigError;
pub use crate::common::ids::{GroupId, NodeIndex, RsetId};
pub use crate::common::index::AsIdVec;
pub use crate::common::{Map, Set};

pub use crate::inventory::{GlobalResourceFacts, ResourceSet, RsetInventory, WorkerResources};
pub use crate::reconcile::{TaskPartition, TaskRequest, get_resources, task_partition};
pub use crate::scheduler::{AssignOutcome, ResourceScheduler, SchedulerOptions};

pub type NumOfNodes = u32;
pub type ProcCount = u32;
pub type RsetCount = u32;

pub type Error = crate::common::error::RsetsError;
pub type Result<T> = std::result::Result<T, Error>;
