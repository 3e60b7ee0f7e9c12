use k8s_openapi::api::core::v1::{Pod, Toleration};
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespacedName {
    pub name: String,
    pub namespace: String,
}

impl NamespacedName {
    pub fn new(name: &str, namespace: &str) -> Self {
        NamespacedName {
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

impl Display for NamespacedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{}.{}", self.name, self.namespace).as_str())
    }
}

/// name and namespace of a pod, namespace falls back to "default"
pub fn pod_name(pod: &Pod) -> NamespacedName {
    let name = pod.metadata.name.as_deref().unwrap_or_default();
    let ns = pod.metadata.namespace.as_deref().unwrap_or("default");
    NamespacedName::new(name, ns)
}

/// true if any of the pod's volumes is backed by a persistent volume claim, bound or not
pub fn pod_has_pvcs(pod: &Pod) -> bool {
    pod.spec
        .as_ref()
        .and_then(|spec| spec.volumes.as_ref())
        .is_some_and(|volumes| volumes.iter().any(|v| v.persistent_volume_claim.is_some()))
}

/// claim names referenced by the pod's volumes, in volume order
pub fn pvc_claim_names(pod: &Pod) -> Vec<String> {
    pod.spec
        .as_ref()
        .and_then(|spec| spec.volumes.as_ref())
        .map(|volumes| {
            volumes
                .iter()
                .filter_map(|v| v.persistent_volume_claim.as_ref())
                .map(|pvc| pvc.claim_name.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn toleration_matches(t: &Toleration, key: &str, effect: &str) -> bool {
    let effect_ok = match t.effect.as_deref() {
        None | Some("") => true,
        Some(e) => e == effect,
    };
    if !effect_ok {
        return false;
    }

    match t.operator.as_deref() {
        // an empty key with Exists tolerates everything
        Some("Exists") => t.key.as_deref().is_none_or(|k| k.is_empty() || k == key),
        _ => t.key.as_deref() == Some(key) && t.value.as_deref().unwrap_or_default().is_empty(),
    }
}

/// whether the pod tolerates a value-less taint with the given key and effect
pub fn tolerates_taint(pod: &Pod, key: &str, effect: &str) -> bool {
    pod.spec
        .as_ref()
        .and_then(|spec| spec.tolerations.as_ref())
        .is_some_and(|tolerations| tolerations.iter().any(|t| toleration_matches(t, key, effect)))
}
