use crate::common::utils::format_comma_delimited;
use crate::{ConfigError, Map, NodeIndex, NumOfNodes, RsetCount, RsetId, RsetInventory};

/// Part of the inventory held by one worker: the nodes its team of resource sets
/// touches and the slots it occupies on each of them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WorkerResources {
    rset_team: Vec<RsetId>,
    local_nodelist: Vec<String>,
    // Parallel to `local_nodelist`
    slots: Vec<Vec<u32>>,
    max_rsets_per_node: RsetCount,
}

impl WorkerResources {
    /// Creates the view of a worker holding `rset_team`.
    ///
    /// Nodes are listed in order of their first appearance in the team.
    pub fn new(inventory: &RsetInventory, rset_team: Vec<RsetId>) -> crate::Result<Self> {
        let mut positions: Map<NodeIndex, usize> = Map::default();
        let mut local_nodes: Vec<NodeIndex> = Vec::new();
        let mut slots: Vec<Vec<u32>> = Vec::new();
        let mut max_rsets_per_node = 0;

        for rset_id in &rset_team {
            let rset = inventory
                .get_rset(*rset_id)
                .ok_or(ConfigError::UnknownRset(*rset_id))?;
            max_rsets_per_node = max_rsets_per_node.max(inventory.group_size(rset.group()));
            for node in rset.nodes() {
                let position = *positions.entry(*node).or_insert_with(|| {
                    local_nodes.push(*node);
                    slots.push(Vec::new());
                    local_nodes.len() - 1
                });
                slots[position].push(rset.slot());
            }
        }

        Ok(WorkerResources {
            rset_team,
            local_nodelist: local_nodes
                .into_iter()
                .map(|node| inventory.node_name(node).to_string())
                .collect(),
            slots,
            max_rsets_per_node,
        })
    }

    /// View of a worker that occupies `slots_per_node` slots on every node of
    /// `local_nodelist`, where each node hosts `rsets_per_node` resource sets.
    pub fn uniform(
        local_nodelist: Vec<String>,
        slots_per_node: u32,
        rsets_per_node: RsetCount,
    ) -> Self {
        let slots = vec![(0..slots_per_node).collect(); local_nodelist.len()];
        WorkerResources {
            rset_team: Vec::new(),
            local_nodelist,
            slots,
            max_rsets_per_node: rsets_per_node,
        }
    }

    #[inline]
    pub fn rset_team(&self) -> &[RsetId] {
        &self.rset_team
    }

    #[inline]
    pub fn local_nodelist(&self) -> &[String] {
        &self.local_nodelist
    }

    #[inline]
    pub fn local_node_count(&self) -> NumOfNodes {
        self.local_nodelist.len() as NumOfNodes
    }

    /// Maximum number of resource sets hosted by any node of this worker.
    #[inline]
    pub fn max_rsets_per_node(&self) -> RsetCount {
        self.max_rsets_per_node
    }

    /// Slots held on every node, `None` if nodes differ.
    pub fn slot_count(&self) -> Option<u32> {
        let first = self.slots.first()?.len();
        if self.slots.iter().all(|s| s.len() == first) {
            Some(first as u32)
        } else {
            None
        }
    }

    #[inline]
    pub fn even_slots(&self) -> bool {
        self.slot_count().is_some()
    }

    /// Human readable `node: [slots]` listing.
    pub fn slots_description(&self) -> String {
        format_comma_delimited(
            self.local_nodelist
                .iter()
                .zip(&self.slots)
                .map(|(node, slots)| format!("{node}: [{}]", format_comma_delimited(slots))),
        )
    }
}
