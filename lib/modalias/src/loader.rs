//! Collaborators used when requesting a module: the loader and the buffer allocator.

use alloc::{vec, vec::Vec};
use core::ffi::CStr;

/// Something that can load the module matching an alias.
pub trait ModuleLoader {
    /// Request the module named `name`.
    ///
    /// Returns `0` on success and a negative error code on failure. The call may block.
    fn request_module(&self, name: &CStr) -> i32;
}

impl<T: ModuleLoader + ?Sized> ModuleLoader for &T {
    fn request_module(&self, name: &CStr) -> i32 {
        (**self).request_module(name)
    }
}

/// Source of the scratch buffers holding an alias.
///
/// Buffers are released by dropping them.
pub trait BufferAllocator {
    /// Allocate a zeroed buffer of exactly `size` bytes, or `None` if memory is exhausted.
    fn allocate(&self, size: usize) -> Option<Vec<u8>>;
}

/// Allocates from the global heap, reporting exhaustion instead of aborting.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&self, size: usize) -> Option<Vec<u8>> {
        let mut buf = vec![];
        buf.try_reserve_exact(size).ok()?;
        buf.resize(size, 0);
        Some(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_allocation_is_exact_and_zeroed() {
        let buf = HeapAllocator.allocate(17).unwrap();
        assert_eq!(buf.len(), 17);
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn heap_exhaustion_is_reported() {
        assert!(HeapAllocator.allocate(usize::MAX).is_none());
    }
}
