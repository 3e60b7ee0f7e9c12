use crate::spec::node_helpers::node_name;
use k8s_openapi::api::core::v1::{Node, Pod};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug)]
pub enum ResolverError {
    #[error("{0}")]
    Message(String),
    #[error("no recorded volume resolution for node {0}")]
    NoRecord(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Answer of a volume resolution query for one pod on one node.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VolumeFit {
    /// every unbound claim can be matched with available storage usable from the node
    pub unbound_satisfied: bool,
    /// every bound claim's volume is usable from the node
    pub bound_satisfied: bool,
}

impl VolumeFit {
    pub fn new(unbound_satisfied: bool, bound_satisfied: bool) -> Self {
        Self {
            unbound_satisfied,
            bound_satisfied,
        }
    }

    pub fn satisfied(&self) -> bool {
        self.unbound_satisfied && self.bound_satisfied
    }
}

/// Looks up whether a pod's claims can be satisfied on a node. How claims get matched to volumes
/// is entirely up to the implementation.
pub trait StorageResolver: Send + Sync {
    fn find_pod_volumes(&self, pod: &Pod, node: &Node) -> Result<VolumeFit, ResolverError>;
}

fn satisfied() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RecordedResolution {
    #[serde(default = "satisfied")]
    pub bound_satisfied: bool,
    #[serde(default = "satisfied")]
    pub unbound_satisfied: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RecordedResolutions {
    #[serde(default)]
    pub nodes: BTreeMap<String, RecordedResolution>,
}

/// Replays previously recorded answers, keyed by node name. The pod is not looked at.
#[derive(Clone, Debug, Default)]
pub struct RecordedResolver {
    resolutions: RecordedResolutions,
}

impl RecordedResolver {
    pub fn new(resolutions: RecordedResolutions) -> Self {
        Self { resolutions }
    }

    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        let resolutions: RecordedResolutions = serde_yaml::from_str(s)?;
        Ok(Self::new(resolutions))
    }
}

impl StorageResolver for RecordedResolver {
    fn find_pod_volumes(&self, _pod: &Pod, node: &Node) -> Result<VolumeFit, ResolverError> {
        let name = node_name(node);
        let recorded = self
            .resolutions
            .nodes
            .get(name)
            .ok_or_else(|| ResolverError::NoRecord(name.to_string()))?;

        if let Some(err) = &recorded.error {
            debug!("replaying recorded error for node {}", name);
            return Err(ResolverError::Message(err.clone()));
        }

        Ok(VolumeFit::new(
            recorded.unbound_satisfied,
            recorded.bound_satisfied,
        ))
    }
}
