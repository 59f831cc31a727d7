//! Doubles for the collaborators, used by this crate's tests and by dependents.

use crate::{
    loader::{BufferAllocator, ModuleLoader},
    node::DeviceNode,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::ffi::CStr;
use spin::Mutex;

/// A device node given by literal values.
#[derive(Debug, Clone, Default)]
pub struct StaticNode {
    /// Name printed in the `N` field.
    pub name: String,
    /// Device type; empty when the node has none.
    pub device_type: String,
    /// Compatible entries, in order.
    pub compatible: Vec<String>,
}

impl StaticNode {
    /// Build a node from borrowed values.
    pub fn new(name: &str, device_type: &str, compatible: &[&str]) -> StaticNode {
        StaticNode {
            name: name.to_string(),
            device_type: device_type.to_string(),
            compatible: compatible.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl DeviceNode for StaticNode {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn device_type(&self) -> &str {
        &self.device_type
    }

    fn for_each_compatible(&self, f: &mut dyn FnMut(&str)) {
        self.compatible.iter().for_each(|c| f(c));
    }
}

/// Loader that records every requested name and answers with a fixed code.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    requests: Mutex<Vec<String>>,
    result: i32,
}

impl RecordingLoader {
    /// A loader whose requests all succeed.
    pub fn new() -> RecordingLoader {
        Self::with_result(0)
    }

    /// A loader answering every request with `result`.
    pub fn with_result(result: i32) -> RecordingLoader {
        RecordingLoader {
            requests: Mutex::new(Vec::new()),
            result,
        }
    }

    /// Names requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl ModuleLoader for RecordingLoader {
    fn request_module(&self, name: &CStr) -> i32 {
        self.requests
            .lock()
            .push(name.to_string_lossy().into_owned());
        self.result
    }
}

/// Allocator that always reports exhaustion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingAllocator;

impl BufferAllocator for FailingAllocator {
    fn allocate(&self, _size: usize) -> Option<Vec<u8>> {
        None
    }
}
