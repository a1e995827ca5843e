use std::cmp::Reverse;

use crate::common::index::IndexVec;
use crate::{GroupId, RsetCount, RsetId, RsetInventory};

/// Free resource sets of every group, each list sorted by id.
///
/// E.g. 8 resource sets on 2 nodes with nothing assigned:
/// group 0: [0, 1, 2, 3]
/// group 1: [4, 5, 6, 7]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvailRsetsByGroup {
    groups: IndexVec<GroupId, Vec<RsetId>>,
}

impl AvailRsetsByGroup {
    pub(crate) fn from_inventory(inventory: &RsetInventory) -> Self {
        let mut groups: IndexVec<GroupId, Vec<RsetId>> =
            (0..inventory.num_groups()).map(|_| Vec::new()).collect();
        for (rset_id, rset) in inventory.rsets() {
            if !rset.is_assigned() {
                groups[rset.group()].push(rset_id);
            }
        }
        AvailRsetsByGroup { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[RsetId])> {
        self.groups
            .iter_enumerated()
            .map(|(group, rsets)| (group, rsets.as_slice()))
    }

    pub fn total_free(&self) -> RsetCount {
        self.groups.iter().map(|g| g.len() as RsetCount).sum()
    }

    /// Free sizes of all groups, largest first.
    pub(crate) fn sorted_lens(&self) -> Vec<RsetCount> {
        let mut lens: Vec<RsetCount> = self.groups.iter().map(|g| g.len() as RsetCount).collect();
        lens.sort_unstable_by_key(|len| Reverse(*len));
        lens
    }

    /// Picks a group for `rsets_per_group` resource sets, skipping groups in `chosen`.
    ///
    /// An exactly fitting group wins immediately, otherwise the smallest group that is
    /// larger than needed and smaller than `max_upper_bound`.
    pub(crate) fn find_candidate(
        &self,
        chosen: &[GroupId],
        rsets_per_group: RsetCount,
        max_upper_bound: RsetCount,
    ) -> Option<GroupId> {
        let mut candidate = None;
        let mut upper_bound = max_upper_bound;
        for (group, rsets) in self.iter() {
            if chosen.contains(&group) {
                continue;
            }
            let n_free = rsets.len() as RsetCount;
            if n_free == rsets_per_group {
                return Some(group);
            }
            if rsets_per_group < n_free && n_free < upper_bound {
                candidate = Some(group);
                upper_bound = n_free;
            }
        }
        candidate
    }

    /// Removes the `count` lowest free ids of `group`.
    pub(crate) fn take(&mut self, group: GroupId, count: RsetCount) -> Vec<RsetId> {
        let rsets = &mut self.groups[group];
        let count = (count as usize).min(rsets.len());
        rsets.drain(..count).collect()
    }

    pub(crate) fn insert(&mut self, group: GroupId, rset_id: RsetId) {
        let rsets = &mut self.groups[group];
        if let Err(position) = rsets.binary_search(&rset_id) {
            rsets.insert(position, rset_id);
        }
    }
}
