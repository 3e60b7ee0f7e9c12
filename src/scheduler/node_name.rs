use crate::scheduler::plugins::{CycleContext, CycleState, Filter, Plugin};
use crate::scheduler::status::Verdict;
use crate::scheduler::volume_binding::ERR_NODE_NOT_FOUND;
use crate::spec::node_helpers::node_name;
use crate::state::node_info::NodeInfo;
use k8s_openapi::api::core::v1::{Node, Pod};

pub const NAME: &str = "NodeName";

pub const ERR_REASON: &str = "node(s) didn't match the requested node name";

pub(crate) struct NodeNameFilter {}

impl Plugin for NodeNameFilter {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl Filter for NodeNameFilter {
    fn filter(&self, _: &CycleContext, _: &CycleState, pod: &Pod, node: &NodeInfo) -> Verdict {
        let node = match node.node() {
            Some(node) => node,
            None => return Verdict::error(ERR_NODE_NOT_FOUND),
        };
        if !fits(pod, node) {
            return Verdict::reject(ERR_REASON);
        }
        Verdict::Admit
    }
}

pub fn fits(pod: &Pod, node: &Node) -> bool {
    let requested = pod
        .spec
        .as_ref()
        .and_then(|spec| spec.node_name.as_deref())
        .unwrap_or_default();

    requested.is_empty() || requested == node_name(node)
}
