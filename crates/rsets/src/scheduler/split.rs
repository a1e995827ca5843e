use crate::RsetCount;
use crate::common::utils::div_round_up;

/// How a request is spread over groups: `num_groups` slices of `rsets_per_group`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct GroupSplit {
    pub rsets_req: RsetCount,
    pub num_groups: u32,
    pub rsets_per_group: RsetCount,
}

impl GroupSplit {
    const EMPTY: GroupSplit = GroupSplit {
        rsets_req: 0,
        num_groups: 0,
        rsets_per_group: 0,
    };
}

/// Even breakdown of `rsets_req` over groups of capacity `max_grpsize`, assuming all
/// resource sets were free.
///
/// Uses the fewest groups that divide the request evenly. When no group count up to
/// `max_groups` does, `extend` rounds the request up so that every group gets the same
/// share; without it the share is capped at `max_grpsize`. The scheduler always
/// extends.
pub(crate) fn even_split(
    rsets_req: RsetCount,
    max_grpsize: RsetCount,
    max_groups: u32,
    extend: bool,
) -> GroupSplit {
    if rsets_req == 0 {
        return GroupSplit::EMPTY;
    }
    let num_groups = div_round_up(rsets_req, max_grpsize);
    if num_groups <= 1 {
        return GroupSplit {
            rsets_req,
            num_groups,
            rsets_per_group: rsets_req,
        };
    }

    if let Some(even_groups) = (num_groups..=max_groups).find(|n| rsets_req % n == 0) {
        return GroupSplit {
            rsets_req,
            num_groups: even_groups,
            rsets_per_group: rsets_req / even_groups,
        };
    }

    if extend {
        let rsets_per_group = div_round_up(rsets_req, num_groups);
        let extended = num_groups * rsets_per_group;
        log::warn!(
            "Increasing resource requirement to obtain an even partition of resource sets to nodes. \
             rsets_req {extended} (requested {rsets_req}) num_groups_req {num_groups} rsets_req_per_group {rsets_per_group}"
        );
        GroupSplit {
            rsets_req: extended,
            num_groups,
            rsets_per_group,
        }
    } else {
        GroupSplit {
            rsets_req,
            num_groups,
            rsets_per_group: max_grpsize,
        }
    }
}

/// Searches for an exact split of `split.rsets_req` that fits the currently free group
/// sizes `sorted_lens` (sorted in descending order).
///
/// Starts with `split.rsets_per_group` per group and alternates between shrinking the
/// share when the product overshoots and taking one more group (with a share equal to
/// its free size) when it undershoots.
pub(crate) fn split_to_fit(
    split: GroupSplit,
    sorted_lens: &[RsetCount],
    max_groups: u32,
) -> Option<GroupSplit> {
    let GroupSplit {
        rsets_req,
        mut num_groups,
        mut rsets_per_group,
    } = split;
    if rsets_req == 0 {
        return Some(GroupSplit::EMPTY);
    }
    loop {
        let total = u64::from(rsets_per_group) * u64::from(num_groups);
        if total == u64::from(rsets_req) {
            break;
        }
        if total > u64::from(rsets_req) {
            rsets_per_group -= 1;
        } else {
            num_groups += 1;
            if num_groups > max_groups {
                return None;
            }
            rsets_per_group = sorted_lens
                .get(num_groups as usize - 1)
                .copied()
                .unwrap_or(0);
        }
    }
    Some(GroupSplit {
        rsets_req,
        num_groups,
        rsets_per_group,
    })
}
