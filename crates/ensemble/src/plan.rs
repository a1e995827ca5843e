//! Commands driving the resource set pipeline: scheduler, reconciler and launcher
//! artifacts.

use std::path::PathBuf;

use serde::Serialize;

use rsets::common::utils::format_comma_delimited;
use rsets::launch::{create_machinefile, get_hostlist};
use rsets::{
    AssignOutcome, ResourceScheduler, RsetCount, RsetId, TaskPartition, WorkerResources,
    get_resources,
};

use crate::common::cli::{OutputMode, PlanOpts};
use crate::common::error::error;
use crate::config::EnsembleConfig;

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub struct ScheduleEntry {
    pub requested: RsetCount,
    /// `None` when the request did not fit the free resource sets
    pub team: Option<Vec<RsetId>>,
}

/// Assigns `requests` one after another; teams are kept for the whole run.
pub fn schedule_requests(
    scheduler: &mut ResourceScheduler,
    requests: &[RsetCount],
) -> crate::Result<Vec<ScheduleEntry>> {
    let mut entries = Vec::with_capacity(requests.len());
    for &requested in requests {
        let outcome = scheduler.assign_resources(requested)?;
        if let AssignOutcome::Assigned(team) = &outcome {
            if team.len() as RsetCount > requested {
                log::info!(
                    "Request for {requested} resource sets was extended to {}",
                    team.len()
                );
            }
        }
        entries.push(ScheduleEntry {
            requested,
            team: outcome.into_team(),
        });
    }
    log::debug!(
        "{} resource sets free after {} requests",
        scheduler.rsets_free(),
        requests.len()
    );
    Ok(entries)
}

pub fn format_schedule(entries: &[ScheduleEntry], mode: OutputMode) -> crate::Result<String> {
    Ok(match mode {
        OutputMode::Cli => entries
            .iter()
            .map(|entry| match &entry.team {
                Some(team) => {
                    format!("{}: {}", entry.requested, format_comma_delimited(team))
                }
                None => format!("{}: insufficient", entry.requested),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Json => serde_json::to_string_pretty(entries)?,
    })
}

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Launch {
    Machinefile { path: PathBuf, built: bool },
    Hostlist { hosts: String },
}

/// Layout of a single task.
#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub struct TaskPlan {
    pub team: Vec<RsetId>,
    pub nodes: Vec<String>,
    pub partition: TaskPartition,
    pub launch: Launch,
}

/// Assigns resource sets for one task on a fresh cluster and reconciles the requested
/// decomposition with them.
pub fn plan_task(config: &EnsembleConfig, opts: &PlanOpts) -> crate::Result<TaskPlan> {
    let mut scheduler = config.scheduler()?;
    let team = match scheduler.assign_resources(opts.rsets)? {
        AssignOutcome::Assigned(team) => team,
        AssignOutcome::Insufficient => {
            return error(format!(
                "Resource sets cannot be split evenly for a request of {}",
                opts.rsets
            ));
        }
    };

    let worker = WorkerResources::new(scheduler.inventory(), team)?;
    let partition = get_resources(
        &worker,
        &config.facts(),
        &opts.task_request(),
        opts.hyperthreads,
    )?;

    let launch = match &opts.machinefile {
        Some(path) => {
            let built = create_machinefile(&worker, Some(path.as_path()), &partition)?;
            if !built {
                log::warn!("Machinefile {} is empty", path.display());
            }
            Launch::Machinefile {
                path: path.clone(),
                built,
            }
        }
        None => Launch::Hostlist {
            hosts: get_hostlist(&worker, Some(partition.num_nodes)),
        },
    };

    Ok(TaskPlan {
        team: worker.rset_team().to_vec(),
        nodes: worker.local_nodelist().to_vec(),
        partition,
        launch,
    })
}

pub fn format_plan(plan: &TaskPlan, mode: OutputMode) -> crate::Result<String> {
    Ok(match mode {
        OutputMode::Cli => {
            let TaskPartition {
                num_procs,
                num_nodes,
                procs_per_node,
            } = plan.partition;
            let mut lines = vec![
                format!("Resource sets: {}", format_comma_delimited(&plan.team)),
                format!("Nodes: {}", plan.nodes.join(",")),
                format!("Processes: {num_procs} ({num_nodes} nodes x {procs_per_node} per node)"),
            ];
            lines.push(match &plan.launch {
                Launch::Machinefile { path, built: true } => {
                    format!("Machinefile: {}", path.display())
                }
                Launch::Machinefile { path, built: false } => {
                    format!("Machinefile: {} (empty)", path.display())
                }
                Launch::Hostlist { hosts } => format!("Hostlist: {hosts}"),
            });
            lines.join("\n")
        }
        OutputMode::Json => serde_json::to_string_pretty(plan)?,
    })
}
