use crate::config::Config;
use crate::errors::VolumeBindError;
use crate::scheduler::plugins::CycleContext;
use crate::scheduler::resolver::RecordedResolver;
use crate::scheduler::status::Code;
use crate::scheduler::NodeSelection;
use crate::spec::node_helpers::node_name;
use crate::spec::pod_helpers::pod_name;
use crate::state::node_info::NodeInfo;
use anyhow::anyhow;
use clap::Args;
use k8s_openapi::api::core::v1::{Node, Pod};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    #[arg(long, long_help = "Pod manifest to place.")]
    pub pod: String,
    #[arg(long, long_help = "Node manifests, one YAML document per node.")]
    pub nodes: String,
    #[arg(long, long_help = "Recorded volume resolutions, keyed by node name.")]
    pub resolutions: String,
    #[arg(long, long_help = "Scheduler configuration. Defaults to all filters.")]
    pub config: Option<String>,
    #[arg(long = "node", long_help = "Only consider these nodes. Names without a manifest count as missing nodes.")]
    pub node_names: Vec<String>,
    #[arg(long, long_help = "Give up after this many milliseconds.")]
    pub timeout_ms: Option<u64>,
    #[arg(long, long_help = "Print JSON instead of a table.")]
    pub json: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    pub node_name: String,
    pub code: Code,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Tabled)]
#[tabled(rename_all = "UPPERCASE")]
struct NodeReportRow {
    node: String,
    status: String,
    plugin: String,
    reasons: String,
}

impl From<&NodeReport> for NodeReportRow {
    fn from(r: &NodeReport) -> Self {
        let reasons = match &r.message {
            Some(message) => message.clone(),
            None => r.reasons.join(", "),
        };
        NodeReportRow {
            node: r.node_name.clone(),
            status: r.code.to_string(),
            plugin: r.plugin.clone().unwrap_or("-".to_string()),
            reasons,
        }
    }
}

#[derive(Debug)]
pub struct FilterOutput {
    pub reports: Vec<NodeReport>,
    pub rendered: String,
}

impl FilterOutput {
    pub fn any_feasible(&self) -> bool {
        self.reports.iter().any(|r| r.code == Code::Success)
    }
}

async fn read_file(path: &str) -> Result<String, VolumeBindError> {
    let expanded = shellexpand::tilde(path).to_string();
    tokio::fs::read_to_string(&expanded)
        .await
        .map_err(|e| anyhow!("failed to read {}: {}", expanded, e).into())
}

/// parses a stream of YAML documents into nodes, empty documents are skipped
pub fn parse_nodes(s: &str) -> Result<Vec<Node>, VolumeBindError> {
    let mut nodes = vec![];
    for doc in serde_yaml::Deserializer::from_str(s) {
        let value = serde_yaml::Value::deserialize(doc)?;
        if value.is_null() {
            continue;
        }
        nodes.push(serde_yaml::from_value::<Node>(value)?);
    }
    Ok(nodes)
}

/// the candidates to evaluate: every node, or only the requested names in the requested order
pub fn candidates(nodes: Vec<Node>, names: &[String]) -> Vec<NodeInfo> {
    if names.is_empty() {
        return nodes.into_iter().map(NodeInfo::from).collect();
    }
    names
        .iter()
        .map(|name| {
            let node = nodes.iter().find(|n| node_name(n) == name).cloned();
            if node.is_none() {
                debug!("no manifest for node {}", name);
            }
            NodeInfo::new(name, node)
        })
        .collect()
}

/// one report per candidate, matched by position since names may repeat
pub fn reports(candidates: &[NodeInfo], selection: &NodeSelection) -> Vec<NodeReport> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, c)| match selection.rejected.iter().find(|r| r.index == index) {
            Some(r) => NodeReport {
                node_name: r.node_name.clone(),
                code: r.code,
                plugin: Some(r.plugin.clone()),
                reasons: r.reasons.clone(),
                message: r.message.clone(),
            },
            None => NodeReport {
                node_name: c.node_name().to_string(),
                code: Code::Success,
                plugin: None,
                reasons: vec![],
                message: None,
            },
        })
        .collect()
}

pub fn render(reports: &[NodeReport], json: bool) -> Result<String, VolumeBindError> {
    if json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }
    let rows: Vec<NodeReportRow> = reports.iter().map(NodeReportRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::blank());
    Ok(table.to_string())
}

pub struct Filter {}

impl Filter {
    pub async fn filter(&self, args: FilterArgs) -> Result<FilterOutput, VolumeBindError> {
        let config = match &args.config {
            Some(path) => Config::from_yaml(&read_file(path).await?)?,
            None => Config::default(),
        };

        let pod: Pod = serde_yaml::from_str(&read_file(&args.pod).await?)?;
        let nodes = parse_nodes(&read_file(&args.nodes).await?)?;
        let resolver = RecordedResolver::from_yaml(&read_file(&args.resolutions).await?)?;

        let scheduler = config.build_scheduler(Arc::new(resolver));
        let candidates = candidates(nodes, &args.node_names);

        let ctx = match args.timeout_ms {
            Some(ms) => CycleContext::with_deadline(Instant::now() + Duration::from_millis(ms)),
            None => CycleContext::new(),
        };

        info!(
            "filtering {} nodes for {} with {:?}",
            candidates.len(),
            pod_name(&pod),
            scheduler.filter_names()
        );
        let selection = scheduler.find_feasible_nodes(&ctx, &pod, &candidates)?;
        info!(
            "{} feasible, {} rejected",
            selection.feasible.len(),
            selection.rejected.len()
        );

        let reports = reports(&candidates, &selection);
        let rendered = render(&reports, args.json)?;
        Ok(FilterOutput { reports, rendered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerError;
    use crate::scheduler::volume_binding::{ERR_REASON_BIND_CONFLICT, ERR_REASON_NODE_CONFLICT};
    use std::path::PathBuf;

    const POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: web
  namespace: default
spec:
  containers:
    - name: web
      image: nginx
  volumes:
    - name: data
      persistentVolumeClaim:
        claimName: web-data
"#;

    const NODES: &str = r#"
apiVersion: v1
kind: Node
metadata:
  name: node-a
---
apiVersion: v1
kind: Node
metadata:
  name: node-b
---
apiVersion: v1
kind: Node
metadata:
  name: node-c
spec:
  unschedulable: true
"#;

    const RESOLUTIONS: &str = r#"
nodes:
  node-a: {}
  node-b:
    bound-satisfied: false
    unbound-satisfied: false
  node-c: {}
"#;

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("volumebind-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            for (name, contents) in [
                ("pod.yaml", POD),
                ("nodes.yaml", NODES),
                ("resolutions.yaml", RESOLUTIONS),
            ] {
                std::fs::write(dir.join(name), contents).unwrap();
            }
            Fixture { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.join(name).to_string_lossy().to_string()
        }

        fn args(&self) -> FilterArgs {
            FilterArgs {
                pod: self.path("pod.yaml"),
                nodes: self.path("nodes.yaml"),
                resolutions: self.path("resolutions.yaml"),
                config: None,
                node_names: vec![],
                timeout_ms: None,
                json: false,
            }
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn should_parse_multi_document_nodes() -> Result<(), VolumeBindError> {
        let nodes = parse_nodes(&format!("---\n{}\n---\n", NODES))?;
        let names: Vec<_> = nodes.iter().map(node_name).collect();
        assert_eq!(names, vec!["node-a", "node-b", "node-c"]);
        Ok(())
    }

    #[test]
    fn should_pick_requested_candidates() -> Result<(), VolumeBindError> {
        let nodes = parse_nodes(NODES)?;
        let picked = candidates(nodes, &["node-b".to_string(), "node-x".to_string()]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].node_name(), "node-b");
        assert!(picked[0].node().is_some());
        assert_eq!(picked[1].node_name(), "node-x");
        assert!(picked[1].node().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn should_report_every_candidate() -> Result<(), VolumeBindError> {
        let fixture = Fixture::new();
        let output = Filter {}.filter(fixture.args()).await?;

        assert!(output.any_feasible());
        assert_eq!(output.reports.len(), 3);

        assert_eq!(output.reports[0].node_name, "node-a");
        assert_eq!(output.reports[0].code, Code::Success);

        assert_eq!(output.reports[1].plugin.as_deref(), Some("VolumeBinding"));
        assert_eq!(
            output.reports[1].reasons,
            vec![
                ERR_REASON_NODE_CONFLICT.to_string(),
                ERR_REASON_BIND_CONFLICT.to_string()
            ]
        );

        assert_eq!(output.reports[2].plugin.as_deref(), Some("NodeUnschedulable"));
        assert!(output.rendered.contains("NODE"));
        assert!(output.rendered.contains("node(s) were unschedulable"));
        Ok(())
    }

    #[tokio::test]
    async fn should_report_missing_nodes_as_errors() -> Result<(), VolumeBindError> {
        let fixture = Fixture::new();
        let mut args = fixture.args();
        args.node_names = vec!["node-x".to_string()];
        args.json = true;

        let output = Filter {}.filter(args).await?;
        assert!(!output.any_feasible());
        assert_eq!(output.reports[0].code, Code::Error);
        assert_eq!(output.reports[0].message.as_deref(), Some("node not found"));

        let json: serde_json::Value = serde_json::from_str(&output.rendered)?;
        assert_eq!(json[0]["code"], "Error");
        assert_eq!(json[0]["message"], "node not found");
        Ok(())
    }

    #[tokio::test]
    async fn should_honour_config() -> Result<(), VolumeBindError> {
        let fixture = Fixture::new();
        std::fs::write(fixture.dir.join("config.yaml"), "filters: [VolumeBinding]")?;
        let mut args = fixture.args();
        args.config = Some(fixture.path("config.yaml"));

        let output = Filter {}.filter(args).await?;
        // node-c is cordoned but nothing checks for that any more
        assert_eq!(output.reports[2].code, Code::Success);
        Ok(())
    }

    #[tokio::test]
    async fn should_report_nodes_sharing_a_name_separately() -> Result<(), VolumeBindError> {
        let fixture = Fixture::new();
        std::fs::write(
            fixture.dir.join("stateless.yaml"),
            "apiVersion: v1\nkind: Pod\nmetadata:\n  name: stateless\nspec:\n  containers: []\n",
        )?;
        std::fs::write(
            fixture.dir.join("twins.yaml"),
            "apiVersion: v1\nkind: Node\nmetadata:\n  name: twin\nspec:\n  unschedulable: true\n---\napiVersion: v1\nkind: Node\nmetadata:\n  name: twin\n",
        )?;
        let mut args = fixture.args();
        args.pod = fixture.path("stateless.yaml");
        args.nodes = fixture.path("twins.yaml");

        let output = Filter {}.filter(args).await?;
        assert!(output.any_feasible());

        let codes: Vec<_> = output.reports.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![Code::UnschedulableAndUnresolvable, Code::Success]);
        assert_eq!(output.reports[0].plugin.as_deref(), Some("NodeUnschedulable"));
        assert_eq!(output.reports[1].plugin, None);
        Ok(())
    }

    #[tokio::test]
    async fn should_give_up_after_the_timeout() {
        let fixture = Fixture::new();
        let mut args = fixture.args();
        args.timeout_ms = Some(0);

        let err = Filter {}.filter(args).await.unwrap_err();
        assert!(matches!(err, VolumeBindError::Scheduler(SchedulerError::Cancelled)));
        assert!(err.to_string().contains("scheduling cycle cancelled"), "got: {}", err);
    }

    #[tokio::test]
    async fn should_fail_on_missing_files() {
        let fixture = Fixture::new();
        let mut args = fixture.args();
        args.pod = fixture.path("nope.yaml");

        let err = Filter {}.filter(args).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"), "got: {}", err);
    }
}
