//! Open Firmware modalias construction and module requests.
//!
//! A modalias identifies a device by its device tree node:
//! `of:N<name>T<device_type>C<compatible0>C<compatible1>...`.
//! Driver alias tables match against this exact grammar, so the format is stable.
//!
//! [alias::compute_or_write] measures and writes the alias into caller-supplied memory,
//! [request::AliasBuilder] turns it into an owned string and hands it to a [loader::ModuleLoader].

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
extern crate alloc;

pub mod alias;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod node;
pub mod of;
pub mod request;
pub mod sysfs;
pub mod testing;
pub mod uevent;

pub use alias::compute_or_write;
pub use error::ModaliasError;
pub use node::DeviceNode;
pub use request::AliasBuilder;
