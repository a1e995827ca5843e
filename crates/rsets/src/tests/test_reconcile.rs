use std::path::Path;

use crate::tests::utils::{ClusterBuilder, nodes, rset_ids};
use crate::{
    ConfigError, GlobalResourceFacts, TaskPartition, TaskRequest, WorkerResources, get_resources,
    task_partition,
};

fn request(
    num_procs: Option<u32>,
    num_nodes: Option<u32>,
    procs_per_node: Option<u32>,
) -> TaskRequest {
    TaskRequest {
        num_procs,
        num_nodes,
        procs_per_node,
    }
}

fn partition(num_procs: u32, num_nodes: u32, procs_per_node: u32) -> TaskPartition {
    TaskPartition {
        num_procs,
        num_nodes,
        procs_per_node,
    }
}

fn worker_on(cluster: ClusterBuilder, team: &[u32]) -> (WorkerResources, GlobalResourceFacts) {
    let (scheduler, facts) = cluster.build();
    let worker = WorkerResources::new(scheduler.inventory(), rset_ids(team)).unwrap();
    (worker, facts)
}

fn config_error(r: crate::Result<TaskPartition>) -> ConfigError {
    r.unwrap_err().config_error().cloned().unwrap()
}

#[test]
fn test_task_partition_fills_missing_value() {
    let expected = Some(partition(8, 4, 2));
    assert_eq!(task_partition(&request(None, Some(4), Some(2)), None).unwrap(), expected);
    assert_eq!(task_partition(&request(Some(8), Some(4), None), None).unwrap(), expected);
    assert_eq!(task_partition(&request(Some(8), None, Some(2)), None).unwrap(), expected);
    assert_eq!(
        task_partition(&request(Some(8), Some(4), Some(2)), None).unwrap(),
        expected
    );
}

#[test]
fn test_task_partition_inconsistent() {
    let r = task_partition(&request(Some(7), Some(3), None), None);
    assert_eq!(
        r.unwrap_err().config_error(),
        Some(&ConfigError::InconsistentDecomposition {
            num_procs: 7,
            num_nodes: 3,
            procs_per_node: 2
        })
    );
    let r = task_partition(&request(Some(8), Some(4), Some(3)), None);
    assert!(matches!(
        r.unwrap_err().config_error(),
        Some(ConfigError::InconsistentDecomposition { .. })
    ));
}

#[test]
fn test_task_partition_missing_values() {
    for req in [
        request(None, None, None),
        request(Some(8), None, None),
        request(None, Some(2), None),
        request(None, None, Some(4)),
        // Zero counts as not given
        request(Some(8), Some(0), None),
    ] {
        let r = task_partition(&req, None);
        assert_eq!(
            r.unwrap_err().config_error(),
            Some(&ConfigError::MissingDecomposition)
        );
    }
}

#[test]
fn test_task_partition_overflow() {
    let r = task_partition(&request(None, Some(u32::MAX), Some(2)), None);
    assert!(matches!(
        r.unwrap_err().config_error(),
        Some(ConfigError::ProcCountOverflow { .. })
    ));
}

#[test]
fn test_task_partition_with_machinefile() {
    let mfile = Path::new("machinefile");
    assert_eq!(
        task_partition(&request(Some(7), Some(3), None), Some(mfile)).unwrap(),
        None
    );
    assert_eq!(task_partition(&TaskRequest::default(), Some(mfile)).unwrap(), None);
}

#[test]
fn test_get_resources_defaults_to_whole_worker() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false).unwrap();
    // 16 cores shared by 4 resource sets per node, 2 of them held on each node
    assert_eq!(r, partition(16, 2, 8));

    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 2, 3]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false).unwrap();
    assert_eq!(r, partition(16, 1, 16));
}

#[test]
fn test_get_resources_hyperthreads() {
    let cluster = ClusterBuilder::default()
        .nodes(2)
        .rsets(8)
        .physical_cores(16)
        .logical_cores(32);
    let (worker, facts) = worker_on(cluster, &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), true).unwrap();
    assert_eq!(r, partition(32, 2, 16));
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false).unwrap();
    assert_eq!(r, partition(16, 2, 8));
}

#[test]
fn test_get_resources_partial_requests() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 4, 5]);
    let get = |req: TaskRequest| get_resources(&worker, &facts, &req, false).unwrap();

    // Fits on one node
    assert_eq!(get(request(Some(6), None, None)), partition(6, 1, 6));
    assert_eq!(get(request(Some(12), None, None)), partition(12, 2, 6));
    assert_eq!(get(request(None, None, Some(4))), partition(8, 2, 4));
    assert_eq!(get(request(None, Some(1), None)), partition(8, 1, 8));
    assert_eq!(get(request(Some(4), Some(2), None)), partition(4, 2, 2));
    assert_eq!(get(request(None, Some(2), Some(3))), partition(6, 2, 3));
}

#[test]
fn test_get_resources_inconsistent_request() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &request(Some(7), Some(2), None), false);
    assert!(matches!(
        config_error(r),
        ConfigError::InconsistentDecomposition { .. }
    ));
}

#[test]
fn test_get_resources_bounds() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 4, 5]);

    let r = get_resources(&worker, &facts, &request(None, Some(3), None), false);
    assert_eq!(
        config_error(r),
        ConfigError::NotEnoughNodes {
            requested: 3,
            available: 2
        }
    );
    let r = get_resources(&worker, &facts, &request(None, Some(2), Some(20)), false);
    assert_eq!(
        config_error(r),
        ConfigError::NotEnoughCoresPerNode {
            requested: 20,
            available: 16
        }
    );
    let r = get_resources(&worker, &facts, &request(None, Some(2), Some(10)), false);
    assert_eq!(
        config_error(r),
        ConfigError::NotEnoughCoresPerWorker {
            requested: 10,
            available: 8
        }
    );
}

#[test]
fn test_get_resources_without_bounds() {
    let cluster = ClusterBuilder::default()
        .nodes(2)
        .rsets(8)
        .enforce_bounds(false);
    let (worker, facts) = worker_on(cluster, &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &request(None, Some(3), None), false).unwrap();
    assert_eq!(r, partition(24, 3, 8));
    let r = get_resources(&worker, &facts, &request(None, Some(2), Some(20)), false).unwrap();
    assert_eq!(r, partition(40, 2, 20));
}

#[test]
fn test_get_resources_less_than_one_core_per_rset() {
    let cluster = ClusterBuilder::default().nodes(2).rsets(8).physical_cores(2);
    let (worker, facts) = worker_on(cluster, &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false);
    assert_eq!(config_error(r), ConfigError::LessThanOneCorePerRset);

    let r = get_resources(&worker, &facts, &request(Some(4), None, None), false);
    assert_eq!(
        config_error(r),
        ConfigError::NotEnoughCoresPerWorker {
            requested: 2,
            available: 0
        }
    );

    // Oversubscription is allowed when bounds are not enforced
    let cluster = ClusterBuilder::default()
        .nodes(2)
        .rsets(8)
        .physical_cores(2)
        .enforce_bounds(false);
    let (worker, facts) = worker_on(cluster, &[0, 1, 4, 5]);
    let r = get_resources(&worker, &facts, &request(Some(4), None, None), false).unwrap();
    assert_eq!(r, partition(4, 2, 2));
}

#[test]
fn test_get_resources_uneven_slots() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(2).rsets(8), &[0, 1, 4]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false);
    assert_eq!(
        config_error(r),
        ConfigError::UnevenSlots("n1: [0,1],n2: [0]".to_string())
    );
}

#[test]
fn test_get_resources_empty_nodelist() {
    let facts = ClusterBuilder::default().facts();
    let worker = WorkerResources::uniform(vec![], 1, 1);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false);
    assert_eq!(config_error(r), ConfigError::EmptyNodeList);
}

#[test]
fn test_get_resources_multi_node_rset() {
    let (worker, facts) = worker_on(ClusterBuilder::default().nodes(4).rsets(2), &[1]);
    assert_eq!(worker.local_nodelist(), &nodes(4)[2..]);
    let r = get_resources(&worker, &facts, &TaskRequest::default(), false).unwrap();
    assert_eq!(r, partition(32, 2, 16));
}
