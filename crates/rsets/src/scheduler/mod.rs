mod groups;
mod split;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::common::error::RsetsError;
use crate::common::utils::format_comma_delimited;
use crate::scheduler::split::{GroupSplit, even_split, split_to_fit};
use crate::{ConfigError, GroupId, RsetCount, RsetId, RsetInventory, Set};

pub use groups::AvailRsetsByGroup;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct SchedulerOptions {
    /// When the ideal even split does not fit the currently free capacity, search for
    /// another exact split over more groups.
    pub split2fit: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        SchedulerOptions { split2fit: true }
    }
}

/// Result of a successful assignment attempt.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AssignOutcome {
    /// Sorted ids of the assigned team. May hold more ids than requested when the
    /// request was extended to obtain an even split.
    Assigned(Vec<RsetId>),
    /// Not enough free capacity at the moment; nothing was changed.
    Insufficient,
}

impl AssignOutcome {
    pub fn team(&self) -> Option<&[RsetId]> {
        match self {
            AssignOutcome::Assigned(team) => Some(team.as_slice()),
            AssignOutcome::Insufficient => None,
        }
    }

    pub fn into_team(self) -> Option<Vec<RsetId>> {
        match self {
            AssignOutcome::Assigned(team) => Some(team),
            AssignOutcome::Insufficient => None,
        }
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignOutcome::Assigned(_))
    }
}

/// Placement computed on a copy of the free index, applied only as a whole.
struct AssignmentPlan {
    avail: AvailRsetsByGroup,
    team: Vec<RsetId>,
}

/// Assigns disjoint teams of resource sets to tasks.
///
/// The scheduler owns the inventory and is the only component that changes assignment
/// flags. A team is spread evenly over the smallest possible number of groups; if the
/// request cannot be split evenly it is rounded up.
#[derive(Debug)]
pub struct ResourceScheduler {
    inventory: RsetInventory,
    rsets_free: RsetCount,
    // Built on first use
    avail_rsets_by_group: Option<AvailRsetsByGroup>,
    options: SchedulerOptions,
}

impl ResourceScheduler {
    pub fn new(inventory: RsetInventory, options: SchedulerOptions) -> Self {
        if !inventory.even_groups() {
            log::warn!(
                "Resource sets are not evenly spread over {} groups, scheduling assumes {} per group",
                inventory.num_groups(),
                inventory.rsets_per_node()
            );
        }
        ResourceScheduler {
            rsets_free: inventory.rsets_free(),
            inventory,
            avail_rsets_by_group: None,
            options,
        }
    }

    #[inline]
    pub fn inventory(&self) -> &RsetInventory {
        &self.inventory
    }

    #[inline]
    pub fn rsets_free(&self) -> RsetCount {
        self.rsets_free
    }

    #[inline]
    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Free resource sets per group, built from the inventory on first use.
    pub fn get_avail_rsets_by_group(&mut self) -> &AvailRsetsByGroup {
        let inventory = &self.inventory;
        self.avail_rsets_by_group
            .get_or_insert_with(|| AvailRsetsByGroup::from_inventory(inventory))
    }

    /// Tries to assign `rsets_req` resource sets.
    ///
    /// Requesting more resource sets than the inventory holds is an error. When the free
    /// capacity cannot hold the request, `Insufficient` is returned and the state is left
    /// untouched.
    pub fn assign_resources(&mut self, rsets_req: RsetCount) -> crate::Result<AssignOutcome> {
        let num_rsets = self.inventory.num_rsets();
        if rsets_req > num_rsets {
            return Err(RsetsError::CapacityError {
                requested: rsets_req,
                total: num_rsets,
            });
        }
        if rsets_req > self.rsets_free {
            log::debug!(
                "Request for {rsets_req} resource sets exceeds {} free",
                self.rsets_free
            );
            return Ok(AssignOutcome::Insufficient);
        }
        if rsets_req == 0 {
            return Ok(AssignOutcome::Assigned(Vec::new()));
        }

        Ok(match self.plan_assignment(rsets_req) {
            Some(plan) => AssignOutcome::Assigned(self.apply_plan(plan)),
            None => AssignOutcome::Insufficient,
        })
    }

    fn plan_assignment(&mut self, rsets_req: RsetCount) -> Option<AssignmentPlan> {
        let max_grpsize = self.inventory.rsets_per_node();
        let max_groups = self.inventory.num_groups();
        let split2fit = self.options.split2fit;
        let avail = self.get_avail_rsets_by_group();

        let mut split = even_split(rsets_req, max_grpsize, max_groups, true);
        if split2fit {
            split = Self::fit_free_groups(split, avail, max_groups)?;
        }

        log::debug!(
            "Looking for {} resource sets in {} groups of {}",
            split.rsets_req,
            split.num_groups,
            split.rsets_per_group
        );

        let mut avail = avail.clone();
        let mut chosen: SmallVec<[GroupId; 4]> = SmallVec::new();
        let mut team: Vec<RsetId> = Vec::with_capacity(split.rsets_req as usize);
        let max_upper_bound = max_grpsize + 1;
        for _ in 0..split.num_groups {
            let Some(group) =
                avail.find_candidate(&chosen, split.rsets_per_group, max_upper_bound)
            else {
                log::debug!(
                    "No group with {} free resource sets left",
                    split.rsets_per_group
                );
                break;
            };
            team.extend(avail.take(group, split.rsets_per_group));
            chosen.push(group);
        }

        if team.len() as RsetCount != split.rsets_req {
            return None;
        }
        team.sort_unstable();
        Some(AssignmentPlan { avail, team })
    }

    /// Checks the split against the free sizes of the groups and searches for another
    /// exact split when the preferred one does not fit.
    fn fit_free_groups(
        split: GroupSplit,
        avail: &AvailRsetsByGroup,
        max_groups: u32,
    ) -> Option<GroupSplit> {
        let sorted_lens = avail.sorted_lens();
        let max_even_grpsize = split
            .num_groups
            .checked_sub(1)
            .and_then(|rank| sorted_lens.get(rank as usize))
            .copied()
            .unwrap_or(0);
        if max_even_grpsize == 0 {
            return None;
        }
        if max_even_grpsize >= split.rsets_per_group {
            return Some(split);
        }
        let fitted = split_to_fit(
            GroupSplit {
                rsets_per_group: max_even_grpsize,
                ..split
            },
            &sorted_lens,
            max_groups,
        );
        if fitted.is_none() {
            log::debug!(
                "No even split of {} resource sets fits free groups [{}]",
                split.rsets_req,
                format_comma_delimited(&sorted_lens)
            );
        }
        fitted
    }

    fn apply_plan(&mut self, plan: AssignmentPlan) -> Vec<RsetId> {
        let AssignmentPlan { avail, team } = plan;
        for rset_id in &team {
            self.inventory.set_assigned(*rset_id, true);
        }
        self.rsets_free -= team.len() as RsetCount;
        debug_assert_eq!(avail.total_free(), self.rsets_free);
        self.avail_rsets_by_group = Some(avail);
        log::debug!(
            "Assigned resource sets [{}], {} free",
            format_comma_delimited(&team),
            self.rsets_free
        );
        team
    }

    /// Returns a team obtained from [`ResourceScheduler::assign_resources`] to the free
    /// capacity.
    ///
    /// The whole team is validated first; an unknown, unassigned or repeated id fails
    /// the call without releasing anything.
    pub fn release_resources(&mut self, team: &[RsetId]) -> crate::Result<()> {
        let mut seen: Set<RsetId> = Set::with_capacity_and_hasher(team.len(), Default::default());
        for rset_id in team {
            let rset = self
                .inventory
                .get_rset(*rset_id)
                .ok_or(ConfigError::UnknownRset(*rset_id))?;
            if !rset.is_assigned() {
                return Err(ConfigError::RsetNotAssigned(*rset_id).into());
            }
            if !seen.insert(*rset_id) {
                return Err(ConfigError::DuplicateRset(*rset_id).into());
            }
        }

        for rset_id in team {
            let group = self.inventory.set_assigned(*rset_id, false);
            if let Some(avail) = self.avail_rsets_by_group.as_mut() {
                avail.insert(group, *rset_id);
            }
        }
        self.rsets_free += team.len() as RsetCount;
        log::debug!(
            "Released resource sets [{}], {} free",
            format_comma_delimited(team),
            self.rsets_free
        );
        Ok(())
    }
}
