use crate::scheduler::plugins::{CycleContext, CycleState, Filter, Plugin};
use crate::scheduler::status::Verdict;
use crate::scheduler::volume_binding::ERR_NODE_NOT_FOUND;
use crate::spec::node_helpers::{is_unschedulable, TAINT_EFFECT_NO_SCHEDULE, TAINT_NODE_UNSCHEDULABLE};
use crate::spec::pod_helpers::tolerates_taint;
use crate::state::node_info::NodeInfo;
use k8s_openapi::api::core::v1::Pod;

pub const NAME: &str = "NodeUnschedulable";

pub const ERR_REASON: &str = "node(s) were unschedulable";

pub(crate) struct UnschedulableFilter {}

impl Plugin for UnschedulableFilter {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl Filter for UnschedulableFilter {
    fn filter(&self, _: &CycleContext, _: &CycleState, pod: &Pod, node: &NodeInfo) -> Verdict {
        let node = match node.node() {
            Some(node) => node,
            None => return Verdict::error(ERR_NODE_NOT_FOUND),
        };
        if !is_unschedulable(node) {
            return Verdict::Admit;
        }
        // cordoned nodes still take pods that tolerate the cordon taint
        if tolerates_taint(pod, TAINT_NODE_UNSCHEDULABLE, TAINT_EFFECT_NO_SCHEDULE) {
            return Verdict::Admit;
        }
        Verdict::reject(ERR_REASON)
    }
}
