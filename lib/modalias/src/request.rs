//! Module requests driven by a node's modalias.

use crate::{
    alias::compute_or_write,
    error::ModaliasError,
    loader::{BufferAllocator, HeapAllocator, ModuleLoader},
    node::DeviceNode,
};
use alloc::{string::String, vec::Vec};
use core::ffi::CStr;
use log::warn;
use utils::debug_ex;

/// Builds owned modalias strings and forwards them to a module loader.
///
/// Holds no state between calls; concurrent requests only share the collaborators.
#[derive(Debug, Default)]
pub struct AliasBuilder<L, A = HeapAllocator> {
    loader: L,
    allocator: A,
}

impl<L: ModuleLoader> AliasBuilder<L> {
    /// Use `loader` with heap-backed buffers.
    pub fn new(loader: L) -> AliasBuilder<L> {
        Self::with_allocator(loader, HeapAllocator)
    }
}

impl<L: ModuleLoader, A: BufferAllocator> AliasBuilder<L, A> {
    /// Use `loader`, taking alias buffers from `allocator`.
    pub fn with_allocator(loader: L, allocator: A) -> AliasBuilder<L, A> {
        AliasBuilder { loader, allocator }
    }

    /// The injected module loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// See [compute_or_write].
    pub fn compute_or_write<N: DeviceNode + ?Sized>(
        &self,
        node: &N,
        buffer: Option<&mut [u8]>,
        capacity: isize,
    ) -> Result<usize, ModaliasError> {
        compute_or_write(node, buffer, capacity)
    }

    /// Measure, allocate and fill a NUL-terminated alias buffer for `node`.
    fn alias_buffer<N: DeviceNode + ?Sized>(&self, node: &N) -> Result<Vec<u8>, ModaliasError> {
        let size = compute_or_write(node, None, 0)?;
        let len = size.checked_add(1).ok_or(ModaliasError::OutOfMemory)?;
        let capacity = isize::try_from(len).map_err(|_| ModaliasError::OutOfMemory)?;

        let mut buf = self
            .allocator
            .allocate(len)
            .filter(|buf| buf.len() == len)
            .ok_or(ModaliasError::OutOfMemory)?;
        let filled = compute_or_write(node, Some(&mut buf[..]), capacity)?;
        // Terminate even if the node changed between the two passes.
        buf[size] = 0;
        // A stable node fills exactly `size` bytes; an earlier NUL came from a field.
        if filled == size && buf[..size].contains(&0) {
            return Err(ModaliasError::InvalidArgument);
        }
        Ok(buf)
    }

    /// The modalias of `node` as an owned string.
    pub fn modalias<N: DeviceNode + ?Sized>(&self, node: &N) -> Result<String, ModaliasError> {
        let buf = self.alias_buffer(node)?;
        let alias = CStr::from_bytes_until_nul(&buf).map_err(|_| ModaliasError::InvalidArgument)?;
        Ok(alias.to_string_lossy().into_owned())
    }

    /// Ask the loader for the module matching `node`'s modalias.
    ///
    /// Returns the loader's result code when it is not negative. Fails with
    /// [ModaliasError::NoDevice] without a node, [ModaliasError::InvalidArgument] if a
    /// field of the alias contains a NUL, [ModaliasError::OutOfMemory] if the alias
    /// buffer cannot be allocated, and [ModaliasError::LoaderFailure] carrying a negative
    /// loader code. The alias buffer is released before returning in every case.
    pub fn request_driver_load<N: DeviceNode + ?Sized>(
        &self,
        node: Option<&N>,
    ) -> Result<i32, ModaliasError> {
        let node = node.ok_or(ModaliasError::NoDevice)?;
        let buf = self.alias_buffer(node)?;
        let name = CStr::from_bytes_until_nul(&buf).map_err(|_| ModaliasError::InvalidArgument)?;

        debug_ex!("Requesting module for '{}'.", name.to_string_lossy());
        let ret = self.loader.request_module(name);
        if ret < 0 {
            warn!(
                "Module request for '{}' failed: {}.",
                name.to_string_lossy(),
                ret
            );
            return Err(ModaliasError::LoaderFailure(ret));
        }
        Ok(ret)
    }
}
