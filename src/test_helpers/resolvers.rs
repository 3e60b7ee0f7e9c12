use crate::scheduler::resolver::{ResolverError, StorageResolver, VolumeFit};
use k8s_openapi::api::core::v1::{Node, Pod};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fails the test if it is ever asked anything.
pub struct PanicResolver {}

impl StorageResolver for PanicResolver {
    fn find_pod_volumes(&self, _pod: &Pod, _node: &Node) -> Result<VolumeFit, ResolverError> {
        panic!("storage resolver must not be called")
    }
}

/// Always gives the same answer and counts how often it was asked.
pub struct FixedResolver {
    fit: VolumeFit,
    calls: AtomicUsize,
}

impl FixedResolver {
    pub fn new(fit: VolumeFit) -> Self {
        Self {
            fit,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StorageResolver for FixedResolver {
    fn find_pod_volumes(&self, _pod: &Pod, _node: &Node) -> Result<VolumeFit, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.fit)
    }
}

pub struct FailingResolver {
    message: String,
}

impl FailingResolver {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl StorageResolver for FailingResolver {
    fn find_pod_volumes(&self, _pod: &Pod, _node: &Node) -> Result<VolumeFit, ResolverError> {
        Err(ResolverError::Message(self.message.clone()))
    }
}
