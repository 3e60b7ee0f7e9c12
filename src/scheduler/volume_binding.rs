use crate::scheduler::plugins::{CycleContext, CycleState, Filter, Plugin};
use crate::scheduler::resolver::StorageResolver;
use crate::scheduler::status::{Reasons, Verdict};
use crate::spec::node_helpers::node_name;
use crate::spec::pod_helpers::{pod_has_pvcs, pod_name, pvc_claim_names};
use crate::state::node_info::NodeInfo;
use k8s_openapi::api::core::v1::Pod;
use log::debug;
use std::sync::Arc;

pub const NAME: &str = "VolumeBinding";

/// A bound claim's volume is not usable from the node.
pub const ERR_REASON_NODE_CONFLICT: &str = "node(s) had volume node affinity conflict";
/// Some unbound claim can't be matched with storage usable from the node.
pub const ERR_REASON_BIND_CONFLICT: &str = "node(s) didn't find available persistent volumes to bind";

pub const ERR_NODE_NOT_FOUND: &str = "node not found";

/// Checks that a pod's persistent volume claims can be satisfied on a node, both the ones that
/// are already bound and the ones still waiting for a volume.
///
/// The actual matching of claims to volumes is delegated to a [`StorageResolver`], this plugin only
/// turns its answer into a verdict.
#[derive(Clone)]
pub struct VolumeBinding {
    resolver: Arc<dyn StorageResolver>,
}

impl VolumeBinding {
    pub fn new(resolver: Arc<dyn StorageResolver>) -> Self {
        Self { resolver }
    }
}

impl Plugin for VolumeBinding {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl Filter for VolumeBinding {
    fn filter(&self, _ctx: &CycleContext, _state: &CycleState, pod: &Pod, node: &NodeInfo) -> Verdict {
        let node = match node.node() {
            Some(node) => node,
            None => return Verdict::error(ERR_NODE_NOT_FOUND),
        };

        // pods without claims always fit
        if !pod_has_pvcs(pod) {
            return Verdict::Admit;
        }

        let fit = match self.resolver.find_pod_volumes(pod, node) {
            Ok(fit) => fit,
            Err(e) => {
                debug!(
                    "{}: resolving claims {:?} of {} on {} failed: {}",
                    NAME,
                    pvc_claim_names(pod),
                    pod_name(pod),
                    node_name(node),
                    e
                );
                return Verdict::error(e.to_string());
            }
        };

        if fit.satisfied() {
            return Verdict::Admit;
        }

        let conflicts = [
            (!fit.bound_satisfied, ERR_REASON_NODE_CONFLICT),
            (!fit.unbound_satisfied, ERR_REASON_BIND_CONFLICT),
        ];
        let reasons = match Reasons::new(conflicts.into_iter().filter(|(c, _)| *c).map(|(_, r)| r)) {
            Some(reasons) => reasons,
            None => return Verdict::Admit,
        };

        debug!(
            "{}: claims {:?} of {} do not fit on {}: {:?}",
            NAME,
            pvc_claim_names(pod),
            pod_name(pod),
            node_name(node),
            reasons.as_slice()
        );
        Verdict::reject(reasons)
    }
}
