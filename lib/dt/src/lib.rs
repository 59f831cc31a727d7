//! In-memory device tree.
//!
//! Nodes live in an arena owned by [node::DeviceTree] and are addressed by index.
//! Properties keep their raw value bytes; typed views are produced on demand.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod node;
pub mod prop;
