//! Modalias measurement and writing.

use crate::{
    config::MODALIAS_PREFIX, error::ModaliasError, format::bounded_format, node::DeviceNode,
};
use core::{fmt, mem};

/// Write the modalias of `node` into the first `capacity` bytes of `buffer`.
///
/// Returns the length of the complete alias, which may exceed `capacity`; the written
/// part is always NUL-terminated when `capacity > 0` and never extends past `capacity`.
/// A call with `capacity == 0` only measures, and accepts a missing buffer.
///
/// Spaces inside compatible entries are written as `_`; this does not change the length.
///
/// Fails with [ModaliasError::InvalidArgument] if `capacity` is negative, if it is
/// positive without a buffer, or if it exceeds the buffer's length.
pub fn compute_or_write<N: DeviceNode + ?Sized>(
    node: &N,
    buffer: Option<&mut [u8]>,
    capacity: isize,
) -> Result<usize, ModaliasError> {
    let capacity = usize::try_from(capacity).map_err(|_| ModaliasError::InvalidArgument)?;
    let window: &mut [u8] = match buffer {
        Some(buffer) => buffer
            .get_mut(..capacity)
            .ok_or(ModaliasError::InvalidArgument)?,
        None if capacity == 0 => &mut [],
        None => return Err(ModaliasError::InvalidArgument),
    };
    Ok(build(node, window))
}

/// Length of the modalias of `node`, NUL excluded.
pub fn modalias_len<N: DeviceNode + ?Sized>(node: &N) -> usize {
    build(node, &mut [])
}

fn build<N: DeviceNode + ?Sized>(node: &N, window: &mut [u8]) -> usize {
    let mut cursor = AliasCursor { window, total: 0 };
    cursor.push(
        format_args!(
            "{}N{}T{}",
            MODALIAS_PREFIX,
            node.display_name(),
            node.device_type()
        ),
        false,
    );
    node.for_each_compatible(&mut |compat| cursor.push(format_args!("C{}", compat), true));
    cursor.total
}

/// Remaining output window and the accumulated logical length.
struct AliasCursor<'a> {
    window: &'a mut [u8],
    total: usize,
}

impl AliasCursor<'_> {
    fn push(&mut self, args: fmt::Arguments<'_>, sanitize: bool) {
        let remaining = self.window.len();
        let size = bounded_format(&mut *self.window, args);
        self.total += size;

        // A truncated field keeps what it wrote; the NUL stays as the last byte of the window.
        let consumed = if size < remaining {
            size
        } else {
            remaining.saturating_sub(1)
        };
        let (written, rest) = mem::take(&mut self.window).split_at_mut(consumed);
        if sanitize {
            written
                .iter_mut()
                .filter(|b| **b == b' ')
                .for_each(|b| *b = b'_');
        }
        self.window = rest;
    }
}
