use derive_builder::Builder;

use crate::{
    AsIdVec, GlobalResourceFacts, ResourceScheduler, RsetCount, RsetId, RsetInventory, SchedulerOptions,
};

/// `n1`, `n2`, ... `n{count}`
pub fn nodes(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("n{i}")).collect()
}

pub fn rset_ids(ids: &[u32]) -> Vec<RsetId> {
    ids.to_vec().to_ids()
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(name = "finish"))]
pub struct Cluster {
    #[builder(default = "2")]
    nodes: usize,
    #[builder(default = "8")]
    rsets: RsetCount,
    #[builder(default = "16")]
    physical_cores: u32,
    #[builder(default, setter(strip_option))]
    logical_cores: Option<u32>,
    #[builder(default = "true")]
    enforce_bounds: bool,
    #[builder(default = "true")]
    split2fit: bool,
    /// Resource sets marked as assigned before the scheduler is created.
    #[builder(default)]
    assigned: Vec<u32>,
}

impl ClusterBuilder {
    pub fn inventory(self) -> RsetInventory {
        self.finish().unwrap().inventory()
    }

    pub fn facts(self) -> GlobalResourceFacts {
        self.finish().unwrap().facts()
    }

    pub fn scheduler(self) -> ResourceScheduler {
        let cluster = self.finish().unwrap();
        ResourceScheduler::new(
            cluster.inventory(),
            SchedulerOptions {
                split2fit: cluster.split2fit,
            },
        )
    }

    /// Scheduler together with the facts of the same cluster.
    pub fn build(self) -> (ResourceScheduler, GlobalResourceFacts) {
        let cluster = self.finish().unwrap();
        let facts = cluster.facts();
        let scheduler = ResourceScheduler::new(
            cluster.inventory(),
            SchedulerOptions {
                split2fit: cluster.split2fit,
            },
        );
        (scheduler, facts)
    }
}

impl Cluster {
    fn inventory(&self) -> RsetInventory {
        let mut inventory = RsetInventory::new(nodes(self.nodes), self.rsets).unwrap();
        for id in &self.assigned {
            inventory.set_assigned(RsetId::new(*id), true);
        }
        inventory
    }

    fn facts(&self) -> GlobalResourceFacts {
        GlobalResourceFacts {
            physical_cores_avail_per_node: self.physical_cores,
            logical_cores_avail_per_node: self.logical_cores.unwrap_or(self.physical_cores),
            enforce_worker_core_bounds: self.enforce_bounds,
        }
    }
}
