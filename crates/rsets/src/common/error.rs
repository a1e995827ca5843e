use thiserror::Error;

use crate::{NumOfNodes, ProcCount, RsetCount, RsetId};

/// Request or inventory that can never be satisfied as stated.
///
/// Retrying the same request will fail the same way, the caller has to change it.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("Need num_procs, num_nodes/procs_per_node, or machinefile")]
    MissingDecomposition,
    #[error(
        "num_procs does not equal num_nodes*procs_per_node ({num_procs} != {num_nodes}*{procs_per_node})"
    )]
    InconsistentDecomposition {
        num_procs: ProcCount,
        num_nodes: NumOfNodes,
        procs_per_node: ProcCount,
    },
    #[error("num_nodes*procs_per_node does not fit into a process count ({num_nodes}*{procs_per_node})")]
    ProcCountOverflow {
        num_nodes: NumOfNodes,
        procs_per_node: ProcCount,
    },
    #[error("Node list is empty - aborting")]
    EmptyNodeList,
    #[error("Uneven distribution of node resources not yet supported. Nodes and slots are: {0}")]
    UnevenSlots(String),
    #[error(
        "There is less than one core per resource set. Provide num_procs or num_nodes/procs_per_node to oversubscribe"
    )]
    LessThanOneCorePerRset,
    #[error("Not enough nodes to honor arguments. Requested {requested}. Only {available} available")]
    NotEnoughNodes {
        requested: NumOfNodes,
        available: NumOfNodes,
    },
    #[error(
        "Not enough processors on a node to honor arguments. Requested {requested}. Only {available} available"
    )]
    NotEnoughCoresPerNode {
        requested: ProcCount,
        available: ProcCount,
    },
    #[error(
        "Not enough processors per worker to honor arguments. Requested {requested}. Only {available} available"
    )]
    NotEnoughCoresPerWorker {
        requested: ProcCount,
        available: ProcCount,
    },
    #[error("Not enough procs to honor arguments. Requested {requested}. Only {available} available")]
    NotEnoughCores { requested: u64, available: u64 },
    #[error("Invalid inventory: {0}")]
    InvalidInventory(String),
    #[error("Resource set {0} does not exist")]
    UnknownRset(RsetId),
    #[error("Resource set {0} is not assigned")]
    RsetNotAssigned(RsetId),
    #[error("Resource set {0} is listed more than once")]
    DuplicateRset(RsetId),
}

#[derive(Debug, Error)]
pub enum RsetsError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("More resource sets requested {requested} than exist {total}")]
    CapacityError { requested: RsetCount, total: RsetCount },
}

impl RsetsError {
    /// Returns the configuration error kind, if this is one.
    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            RsetsError::ConfigError(e) => Some(e),
            _ => None,
        }
    }
}
