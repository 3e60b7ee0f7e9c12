use k8s_openapi::api::core::v1::{
    EmptyDirVolumeSource, Node, NodeSpec, PersistentVolumeClaimVolumeSource, Pod, PodSpec,
    Toleration, Volume,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

#[allow(unused)]
pub fn pod(name: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec::default()),
        status: None,
    }
}

#[allow(unused)]
pub fn node(name: &str) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(NodeSpec::default()),
        status: None,
    }
}

fn push_volume(mut pod: Pod, volume: Volume) -> Pod {
    let spec = pod.spec.get_or_insert_with(PodSpec::default);
    spec.volumes.get_or_insert_with(Vec::new).push(volume);
    pod
}

pub trait WithVolumes {
    #[allow(unused)]
    fn with_pvc(self, volume: &str, claim: &str) -> Self;
    #[allow(unused)]
    fn with_empty_dir(self, volume: &str) -> Self;
}

impl WithVolumes for Pod {
    fn with_pvc(self, volume: &str, claim: &str) -> Self {
        push_volume(
            self,
            Volume {
                name: volume.to_string(),
                persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                    claim_name: claim.to_string(),
                    read_only: None,
                }),
                ..Default::default()
            },
        )
    }

    fn with_empty_dir(self, volume: &str) -> Self {
        push_volume(
            self,
            Volume {
                name: volume.to_string(),
                empty_dir: Some(EmptyDirVolumeSource::default()),
                ..Default::default()
            },
        )
    }
}

pub trait WithTolerations {
    #[allow(unused)]
    fn with_toleration(self, key: Option<&str>, operator: &str, effect: Option<&str>) -> Self;
}

impl WithTolerations for Pod {
    fn with_toleration(mut self, key: Option<&str>, operator: &str, effect: Option<&str>) -> Self {
        let spec = self.spec.get_or_insert_with(PodSpec::default);
        spec.tolerations.get_or_insert_with(Vec::new).push(Toleration {
            key: key.map(str::to_string),
            operator: Some(operator.to_string()),
            effect: effect.map(str::to_string),
            ..Default::default()
        });
        self
    }
}

pub trait PinnedTo {
    #[allow(unused)]
    fn pinned_to(self, node_name: &str) -> Self;
}

impl PinnedTo for Pod {
    fn pinned_to(mut self, node_name: &str) -> Self {
        self.spec.get_or_insert_with(PodSpec::default).node_name = Some(node_name.to_string());
        self
    }
}

pub trait Cordon {
    #[allow(unused)]
    fn cordoned(self) -> Self;
}

impl Cordon for Node {
    fn cordoned(mut self) -> Self {
        self.spec.get_or_insert_with(NodeSpec::default).unschedulable = Some(true);
        self
    }
}
