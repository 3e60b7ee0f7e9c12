pub mod node_name;
pub mod plugins;
pub mod pod_scheduler;
pub mod resolver;
pub mod status;
pub mod unschedulable;
pub mod volume_binding;

use crate::scheduler::status::Code;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum SchedulerError {
    #[error("scheduling cycle cancelled")]
    Cancelled,
    #[error("no filter plugins configured")]
    NoFilters,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RejectedNode {
    /// position in the candidate list, names are not guaranteed to be unique
    #[serde(skip)]
    pub index: usize,
    pub node_name: String,
    /// the filter that turned the node down
    pub plugin: String,
    pub code: Code,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct NodeSelection {
    pub feasible: Vec<String>,
    pub rejected: Vec<RejectedNode>,
}
