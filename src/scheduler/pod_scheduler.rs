use crate::scheduler::plugins::{CycleContext, CycleState, Filter};
use crate::scheduler::status::Verdict;
use crate::scheduler::{NodeSelection, RejectedNode, SchedulerError};
use crate::spec::pod_helpers::pod_name;
use crate::state::node_info::NodeInfo;
use itertools::{Either, Itertools};
use k8s_openapi::api::core::v1::Pod;
use log::{debug, warn};

pub struct PodScheduler {
    filters: Vec<Box<dyn Filter>>,
}

impl PodScheduler {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Runs the filters in order and returns the first one that did not admit the pod, along
    /// with its verdict. None means every filter admitted.
    pub fn run_filters(
        &self,
        ctx: &CycleContext,
        state: &CycleState,
        pod: &Pod,
        node: &NodeInfo,
    ) -> Option<(&str, Verdict)> {
        for filter in &self.filters {
            let verdict = filter.filter(ctx, state, pod, node);
            if !verdict.is_admit() {
                return Some((filter.name(), verdict));
            }
        }
        None
    }

    pub fn find_feasible_nodes(
        &self,
        ctx: &CycleContext,
        pod: &Pod,
        nodes: &[NodeInfo],
    ) -> Result<NodeSelection, SchedulerError> {
        if self.filters.is_empty() {
            return Err(SchedulerError::NoFilters);
        }

        let state = CycleState::new();
        let mut outcomes = Vec::with_capacity(nodes.len());
        for n in nodes {
            if ctx.is_done() {
                warn!(
                    "scheduling cycle for {} cancelled after {} of {} nodes",
                    pod_name(pod),
                    outcomes.len(),
                    nodes.len()
                );
                return Err(SchedulerError::Cancelled);
            }
            outcomes.push((n, self.run_filters(ctx, &state, pod, n)));
        }

        let (feasible, rejected): (Vec<_>, Vec<_>) =
            outcomes
                .into_iter()
                .enumerate()
                .partition_map(|(index, (n, outcome))| match outcome {
                    None => Either::Left(n.node_name().to_string()),
                    Some((plugin, verdict)) => {
                        debug!(
                            "{} rejected {} on {}: {:?}",
                            plugin,
                            pod_name(pod),
                            n.node_name(),
                            verdict
                        );
                        Either::Right(RejectedNode {
                            index,
                            node_name: n.node_name().to_string(),
                            plugin: plugin.to_string(),
                            code: verdict.code(),
                            reasons: verdict.reasons().to_vec(),
                            message: verdict.message().map(str::to_string),
                        })
                    }
                });

        Ok(NodeSelection { feasible, rejected })
    }
}
