use crate::scheduler::status::Verdict;
use crate::state::node_info::NodeInfo;
use k8s_openapi::api::core::v1::Pod;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

//*
// NOTE: the plugin system is inspired by the Kubernetes scheduler plugin system.

// Copyright 2019 The Kubernetes Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// */

pub trait Plugin {
    fn name(&self) -> &str;
}

/// These plugins are used to filter out nodes that cannot run the Pod. For each node, the scheduler
/// will call filter plugins in their configured order. If any filter plugin marks the node as
/// infeasible, the remaining plugins will not be called for that node.
///
/// Filters may be called concurrently for different nodes and pods, so they must not keep
/// per-call mutable state.
pub trait Filter: Plugin + Send + Sync {
    fn filter(&self, ctx: &CycleContext, state: &CycleState, pod: &Pod, node: &NodeInfo) -> Verdict;
}

/// Cancellation and deadline shared by every plugin call of one scheduling cycle.
/// Plugins are free to ignore it.
#[derive(Clone, Debug, Default)]
pub struct CycleContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CycleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_done(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Scratch space for plugins to share data within one scheduling cycle.
#[derive(Default)]
pub struct CycleState {
    data: RwLock<HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write<T: Any + Send + Sync>(&self, key: &str, value: T) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), Box::new(value));
    }

    /// Returns None if the key is missing or holds a different type.
    pub fn read<T: Any + Clone>(&self, key: &str) -> Option<T> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.get(key).and_then(|v| v.downcast_ref::<T>()).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().map(|d| d.is_empty()).unwrap_or(true)
    }
}
