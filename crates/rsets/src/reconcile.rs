//! Completion and validation of process/node requests.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, GlobalResourceFacts, NumOfNodes, ProcCount, WorkerResources};

/// Requested decomposition of a task. Missing (or zero) values are derived.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct TaskRequest {
    pub num_procs: Option<ProcCount>,
    pub num_nodes: Option<NumOfNodes>,
    pub procs_per_node: Option<ProcCount>,
}

impl TaskRequest {
    pub fn is_empty(&self) -> bool {
        self.num_procs().is_none() && self.num_nodes().is_none() && self.procs_per_node().is_none()
    }

    fn num_procs(&self) -> Option<ProcCount> {
        self.num_procs.filter(|v| *v > 0)
    }

    fn num_nodes(&self) -> Option<NumOfNodes> {
        self.num_nodes.filter(|v| *v > 0)
    }

    fn procs_per_node(&self) -> Option<ProcCount> {
        self.procs_per_node.filter(|v| *v > 0)
    }
}

/// Complete decomposition with `num_procs == num_nodes * procs_per_node`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct TaskPartition {
    pub num_procs: ProcCount,
    pub num_nodes: NumOfNodes,
    pub procs_per_node: ProcCount,
}

/// Derives the missing value of `request` from the other two.
///
/// A machinefile overrides any numeric values; in that case `None` is returned and the
/// file decides the layout.
pub fn task_partition(
    request: &TaskRequest,
    machinefile: Option<&Path>,
) -> crate::Result<Option<TaskPartition>> {
    if machinefile.is_some() {
        if !request.is_empty() {
            log::warn!("Machinefile provided - overriding procs/nodes/procs_per_node");
        }
        return Ok(None);
    }
    complete_partition(
        request.num_procs(),
        request.num_nodes(),
        request.procs_per_node(),
    )
    .map(Some)
}

fn complete_partition(
    num_procs: Option<ProcCount>,
    num_nodes: Option<NumOfNodes>,
    procs_per_node: Option<ProcCount>,
) -> crate::Result<TaskPartition> {
    let (num_procs, num_nodes, procs_per_node) = match (num_procs, num_nodes, procs_per_node) {
        (None, Some(num_nodes), Some(procs_per_node)) => {
            let num_procs =
                num_nodes
                    .checked_mul(procs_per_node)
                    .ok_or(ConfigError::ProcCountOverflow {
                        num_nodes,
                        procs_per_node,
                    })?;
            (num_procs, num_nodes, procs_per_node)
        }
        (Some(num_procs), None, Some(procs_per_node)) => {
            (num_procs, num_procs / procs_per_node, procs_per_node)
        }
        (Some(num_procs), Some(num_nodes), None) => {
            (num_procs, num_nodes, num_procs / num_nodes)
        }
        (Some(num_procs), Some(num_nodes), Some(procs_per_node)) => {
            (num_procs, num_nodes, procs_per_node)
        }
        _ => return Err(ConfigError::MissingDecomposition.into()),
    };

    if u64::from(num_procs) != u64::from(num_nodes) * u64::from(procs_per_node) {
        return Err(ConfigError::InconsistentDecomposition {
            num_procs,
            num_nodes,
            procs_per_node,
        }
        .into());
    }
    Ok(TaskPartition {
        num_procs,
        num_nodes,
        procs_per_node,
    })
}

/// Reconciles `request` with the resources of `worker`.
///
/// Values that are not given are filled in from the worker's capacity: all of its cores
/// on all of its nodes when nothing is requested. With `enforce_worker_core_bounds` the
/// result is checked against the nodes and cores the worker actually holds.
pub fn get_resources(
    worker: &WorkerResources,
    facts: &GlobalResourceFacts,
    request: &TaskRequest,
    hyperthreads: bool,
) -> crate::Result<TaskPartition> {
    if worker.local_nodelist().is_empty() {
        return Err(ConfigError::EmptyNodeList.into());
    }
    let local_node_count = worker.local_node_count();
    let cores_avail_per_node = facts.cores_avail_per_node(hyperthreads);

    let slot_count = worker
        .slot_count()
        .ok_or_else(|| ConfigError::UnevenSlots(worker.slots_description()))?;
    let cores_avail_per_node_per_worker = cores_avail_per_node
        .checked_div(worker.max_rsets_per_node())
        .unwrap_or(0)
        .saturating_mul(slot_count);

    let num_procs = request.num_procs();
    let mut num_nodes = request.num_nodes();
    let mut procs_per_node = request.procs_per_node();

    match (num_procs, num_nodes, procs_per_node) {
        (None, _, None) => {
            if cores_avail_per_node_per_worker == 0 {
                return Err(ConfigError::LessThanOneCorePerRset.into());
            }
            procs_per_node = Some(cores_avail_per_node_per_worker);
            if num_nodes.is_none() {
                num_nodes = Some(local_node_count);
                log::debug!(
                    "No decomposition supplied - using all available resource. Nodes: {local_node_count}  procs_per_node {cores_avail_per_node_per_worker}"
                );
            }
        }
        (Some(procs), None, None) => {
            num_nodes = Some(if procs <= cores_avail_per_node_per_worker {
                1
            } else {
                local_node_count
            });
        }
        (None, None, Some(_)) => {
            num_nodes = Some(local_node_count);
        }
        _ => {}
    }

    let partition = complete_partition(num_procs, num_nodes, procs_per_node)?;

    if facts.enforce_worker_core_bounds {
        check_bounds(
            &partition,
            local_node_count,
            cores_avail_per_node,
            cores_avail_per_node_per_worker,
        )?;
    }

    if partition.num_nodes < local_node_count {
        log::warn!(
            "User constraints mean fewer nodes being used than available. {} nodes used. {} nodes available",
            partition.num_nodes,
            local_node_count
        );
    }
    Ok(partition)
}

fn check_bounds(
    partition: &TaskPartition,
    local_node_count: NumOfNodes,
    cores_avail_per_node: ProcCount,
    cores_avail_per_node_per_worker: ProcCount,
) -> Result<(), ConfigError> {
    if partition.num_nodes > local_node_count {
        return Err(ConfigError::NotEnoughNodes {
            requested: partition.num_nodes,
            available: local_node_count,
        });
    }
    if partition.procs_per_node > cores_avail_per_node {
        return Err(ConfigError::NotEnoughCoresPerNode {
            requested: partition.procs_per_node,
            available: cores_avail_per_node,
        });
    }
    if partition.procs_per_node > cores_avail_per_node_per_worker {
        return Err(ConfigError::NotEnoughCoresPerWorker {
            requested: partition.procs_per_node,
            available: cores_avail_per_node_per_worker,
        });
    }
    let cores_avail = u64::from(cores_avail_per_node) * u64::from(local_node_count);
    if u64::from(partition.num_procs) > cores_avail {
        return Err(ConfigError::NotEnoughCores {
            requested: u64::from(partition.num_procs),
            available: cores_avail,
        });
    }
    Ok(())
}
