use rsets::{GlobalResourceFacts, ResourceScheduler, RsetInventory, SchedulerOptions};

pub fn create_scheduler(node_count: usize, rsets_per_node: u32) -> ResourceScheduler {
    let nodes = (0..node_count).map(|i| format!("node{i}")).collect();
    let inventory = RsetInventory::new(nodes, node_count as u32 * rsets_per_node).unwrap();
    ResourceScheduler::new(inventory, SchedulerOptions::default())
}

pub fn create_facts(cores_per_node: u32) -> GlobalResourceFacts {
    GlobalResourceFacts::new(cores_per_node, cores_per_node * 2)
}
