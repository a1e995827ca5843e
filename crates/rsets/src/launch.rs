//! Artifacts handed to an MPI launcher.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::utils::format_comma_delimited;
use crate::{NumOfNodes, TaskPartition, WorkerResources};

pub const DEFAULT_MACHINEFILE: &str = "machinefile";

fn first_nodes(worker: &WorkerResources, num_nodes: Option<NumOfNodes>) -> &[String] {
    let nodes = worker.local_nodelist();
    match num_nodes {
        Some(n) => &nodes[..(n as usize).min(nodes.len())],
        None => nodes,
    }
}

/// Writes a machinefile listing each of the first `partition.num_nodes` nodes of the
/// worker `partition.procs_per_node` times, one hostname per line.
///
/// A file already present at `path` (or [`DEFAULT_MACHINEFILE`]) is replaced. Returns
/// whether a non-empty machinefile exists afterwards.
pub fn create_machinefile(
    worker: &WorkerResources,
    path: Option<&Path>,
    partition: &TaskPartition,
) -> crate::Result<bool> {
    let path = path.unwrap_or(Path::new(DEFAULT_MACHINEFILE));
    if path.is_file() {
        if let Err(error) = std::fs::remove_file(path) {
            log::warn!("Could not remove existing machinefile: {error}");
        }
    }

    log::debug!(
        "Creating machinefile with {} nodes and {} ranks per node",
        partition.num_nodes,
        partition.procs_per_node
    );
    let file = File::create(path)?;
    let mut file = BufWriter::new(file);
    for node in first_nodes(worker, Some(partition.num_nodes)) {
        for _ in 0..partition.procs_per_node {
            file.write_all(node.as_bytes())?;
            file.write_all(b"\n")?;
        }
    }
    file.flush()?;
    drop(file);

    Ok(std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0))
}

/// Comma separated names of the first `num_nodes` nodes of the worker (all nodes when
/// `None`).
pub fn get_hostlist(worker: &WorkerResources, num_nodes: Option<NumOfNodes>) -> String {
    format_comma_delimited(first_nodes(worker, num_nodes))
}
