use std::path::Path;

use serde::{Deserialize, Serialize};

use rsets::{
    GlobalResourceFacts, ProcCount, ResourceScheduler, RsetCount, RsetInventory, SchedulerOptions,
};

use crate::common::error::EnsembleError;

fn default_true() -> bool {
    true
}

/// Description of the cluster an ensemble runs on.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnsembleConfig {
    pub nodes: Vec<String>,

    pub num_resource_sets: RsetCount,

    pub physical_cores_per_node: ProcCount,

    /// Defaults to `physical_cores_per_node`
    pub logical_cores_per_node: Option<ProcCount>,

    #[serde(default = "default_true")]
    pub enforce_worker_core_bounds: bool,

    #[serde(default)]
    pub scheduler: SchedulerOptions,
}

impl EnsembleConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.nodes.is_empty() {
            return Err(EnsembleError::DeserializationError(
                "At least one node has to be defined".into(),
            ));
        }
        if self.num_resource_sets == 0 {
            return Err(EnsembleError::DeserializationError(
                "'num_resource_sets' has to be positive".into(),
            ));
        }
        if self.physical_cores_per_node == 0 {
            return Err(EnsembleError::DeserializationError(
                "'physical_cores_per_node' has to be positive".into(),
            ));
        }
        if self.logical_cores_per_node() < self.physical_cores_per_node {
            return Err(EnsembleError::DeserializationError(format!(
                "'logical_cores_per_node' ({}) cannot be smaller than 'physical_cores_per_node' ({})",
                self.logical_cores_per_node(),
                self.physical_cores_per_node
            )));
        }
        Ok(())
    }

    pub fn parse(str: &str) -> crate::Result<EnsembleConfig> {
        let config: EnsembleConfig = toml::from_str(str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> crate::Result<EnsembleConfig> {
        let content = std::fs::read_to_string(path).map_err(|error| {
            EnsembleError::GenericError(format!(
                "Cannot read configuration {}: {error}",
                path.display()
            ))
        })?;
        log::debug!("Loading configuration from {}", path.display());
        Self::parse(&content)
    }

    pub fn logical_cores_per_node(&self) -> ProcCount {
        self.logical_cores_per_node
            .unwrap_or(self.physical_cores_per_node)
    }

    pub fn facts(&self) -> GlobalResourceFacts {
        GlobalResourceFacts {
            physical_cores_avail_per_node: self.physical_cores_per_node,
            logical_cores_avail_per_node: self.logical_cores_per_node(),
            enforce_worker_core_bounds: self.enforce_worker_core_bounds,
        }
    }

    pub fn inventory(&self) -> crate::Result<RsetInventory> {
        Ok(RsetInventory::new(
            self.nodes.clone(),
            self.num_resource_sets,
        )?)
    }

    /// Fresh scheduler owning a new inventory of this cluster.
    pub fn scheduler(&self) -> crate::Result<ResourceScheduler> {
        Ok(ResourceScheduler::new(self.inventory()?, self.scheduler))
    }
}
