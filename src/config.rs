use crate::scheduler::node_name::NodeNameFilter;
use crate::scheduler::plugins::Filter;
use crate::scheduler::pod_scheduler::PodScheduler;
use crate::scheduler::resolver::StorageResolver;
use crate::scheduler::unschedulable::UnschedulableFilter;
use crate::scheduler::volume_binding::VolumeBinding;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumString};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("filter {0} is listed more than once")]
    DuplicateFilter(FilterName),
    #[error("no filters enabled")]
    NoFilters,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Hash)]
pub enum FilterName {
    NodeName,
    NodeUnschedulable,
    VolumeBinding,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// filters to run, in order
    #[serde(default = "default_filters")]
    pub filters: Vec<FilterName>,
}

fn default_filters() -> Vec<FilterName> {
    vec![
        FilterName::NodeName,
        FilterName::NodeUnschedulable,
        FilterName::VolumeBinding,
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filters: default_filters(),
        }
    }
}

impl Config {
    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.filters.is_empty() {
            return Err(ConfigError::NoFilters);
        }
        if let Some(dup) = self.filters.iter().duplicates().next() {
            return Err(ConfigError::DuplicateFilter(*dup));
        }
        Ok(())
    }

    pub fn build_scheduler(&self, resolver: Arc<dyn StorageResolver>) -> PodScheduler {
        let filters = self
            .filters
            .iter()
            .map(|name| -> Box<dyn Filter> {
                match name {
                    FilterName::NodeName => Box::new(NodeNameFilter {}),
                    FilterName::NodeUnschedulable => Box::new(UnschedulableFilter {}),
                    FilterName::VolumeBinding => Box::new(VolumeBinding::new(resolver.clone())),
                }
            })
            .collect();
        PodScheduler::new(filters)
    }
}
