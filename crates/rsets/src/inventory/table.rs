use serde::Serialize;
use smallvec::SmallVec;

use crate::common::index::IndexVec;
use crate::{ConfigError, GroupId, NodeIndex, NumOfNodes, RsetCount, RsetId, Set};

/// Smallest allocatable unit of capacity.
///
/// A sub-node resource set occupies one slot of a single node, a multi-node resource set
/// spans several whole nodes (and always has slot 0).
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct ResourceSet {
    group: GroupId,
    slot: u32,
    nodes: SmallVec<[NodeIndex; 1]>,
    assigned: bool,
}

impl ResourceSet {
    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }

    #[inline]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }
}

/// Catalog of all resource sets of a run.
///
/// Assignment flags are only changed by the scheduler that owns the inventory.
#[derive(Debug, Clone)]
pub struct RsetInventory {
    nodelist: IndexVec<NodeIndex, String>,
    rsets: IndexVec<RsetId, ResourceSet>,
    group_sizes: IndexVec<GroupId, RsetCount>,
    rsets_per_node: RsetCount,
}

impl RsetInventory {
    /// Splits `nodelist` into `num_rsets` resource sets.
    ///
    /// With at least as many resource sets as nodes, every node hosts
    /// `ceil(num_rsets / num_nodes)` resource sets (the last used node may host fewer)
    /// and each node forms one group. Otherwise the nodes are split into `num_rsets`
    /// contiguous chunks differing in size by at most one and every resource set is its
    /// own group.
    pub fn new(nodelist: Vec<String>, num_rsets: RsetCount) -> crate::Result<Self> {
        if nodelist.is_empty() {
            return Err(ConfigError::EmptyNodeList.into());
        }
        if num_rsets == 0 {
            return Err(ConfigError::InvalidInventory(
                "At least one resource set is required".to_string(),
            )
            .into());
        }
        {
            let mut seen = Set::with_capacity_and_hasher(nodelist.len(), Default::default());
            if let Some(name) = nodelist.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(ConfigError::InvalidInventory(format!(
                    "Node {name} is listed more than once"
                ))
                .into());
            }
        }
        let num_nodes = nodelist.len() as NumOfNodes;

        let mut rsets: IndexVec<RsetId, ResourceSet> = IndexVec::default();
        let mut group_sizes: IndexVec<GroupId, RsetCount> = IndexVec::default();
        if num_rsets >= num_nodes {
            let per_node = num_rsets.div_ceil(num_nodes);
            for i in 0..num_rsets {
                let node = i / per_node;
                if node as usize == group_sizes.len() {
                    group_sizes.push(0);
                }
                group_sizes[GroupId::new(node)] += 1;
                rsets.push(ResourceSet {
                    group: GroupId::new(node),
                    slot: i % per_node,
                    nodes: SmallVec::from_elem(NodeIndex::new(node), 1),
                    assigned: false,
                });
            }
        } else {
            let chunk = num_nodes / num_rsets;
            let extra = num_nodes % num_rsets;
            let mut start = 0;
            for i in 0..num_rsets {
                let size = chunk + u32::from(i < extra);
                rsets.push(ResourceSet {
                    group: GroupId::new(i),
                    slot: 0,
                    nodes: (start..start + size).map(NodeIndex::new).collect(),
                    assigned: false,
                });
                group_sizes.push(1);
                start += size;
            }
        }

        let rsets_per_node = group_sizes.iter().copied().max().unwrap_or(0);
        log::debug!(
            "Inventory created: {} nodes, {} resource sets in {} groups ({} per node)",
            num_nodes,
            num_rsets,
            group_sizes.len(),
            rsets_per_node
        );
        Ok(RsetInventory {
            nodelist: nodelist.into(),
            rsets,
            group_sizes,
            rsets_per_node,
        })
    }

    pub fn nodelist(&self) -> &[String] {
        &self.nodelist
    }

    #[inline]
    pub fn node_name(&self, node: NodeIndex) -> &str {
        &self.nodelist[node]
    }

    #[inline]
    pub fn num_rsets(&self) -> RsetCount {
        self.rsets.len() as RsetCount
    }

    /// Counts unassigned resource sets by walking the table.
    pub fn rsets_free(&self) -> RsetCount {
        self.rsets.iter().filter(|rset| !rset.assigned).count() as RsetCount
    }

    #[inline]
    pub fn num_groups(&self) -> u32 {
        self.group_sizes.len() as u32
    }

    /// Capacity of the largest group.
    #[inline]
    pub fn rsets_per_node(&self) -> RsetCount {
        self.rsets_per_node
    }

    /// True when every group holds the same number of resource sets.
    pub fn even_groups(&self) -> bool {
        self.group_sizes.iter().all(|size| *size == self.rsets_per_node)
    }

    #[inline]
    pub fn group_size(&self, group: GroupId) -> RsetCount {
        self.group_sizes.get(group).copied().unwrap_or(0)
    }

    #[inline]
    pub fn get_rset(&self, rset_id: RsetId) -> Option<&ResourceSet> {
        self.rsets.get(rset_id)
    }

    /// Resource sets in id order.
    pub fn rsets(&self) -> impl Iterator<Item = (RsetId, &ResourceSet)> {
        self.rsets.iter_enumerated()
    }

    /// Returns the group of the resource set.
    pub(crate) fn set_assigned(&mut self, rset_id: RsetId, assigned: bool) -> GroupId {
        let rset = &mut self.rsets[rset_id];
        rset.assigned = assigned;
        rset.group
    }
}
