use crate::spec::node_helpers::node_name;
use k8s_openapi::api::core::v1::Node;

/// The scheduler's view of one candidate node. The node object may be missing, for instance
/// when a candidate was named but could not be looked up.
#[derive(Clone, Debug)]
pub struct NodeInfo {
    name: String,
    node: Option<Node>,
}

impl NodeInfo {
    pub fn new(name: &str, node: Option<Node>) -> Self {
        Self {
            name: name.to_string(),
            node,
        }
    }

    pub fn missing(name: &str) -> Self {
        Self::new(name, None)
    }

    pub fn node(&self) -> Option<&Node> {
        self.node.as_ref()
    }

    /// the name the candidate is known by, whether or not the node object exists
    pub fn node_name(&self) -> &str {
        self.name.as_str()
    }
}

impl From<Node> for NodeInfo {
    fn from(node: Node) -> Self {
        let name = node_name(&node).to_string();
        Self {
            name,
            node: Some(node),
        }
    }
}
