//! Uevent environment carrying the modalias of a device.

use crate::{
    alias::compute_or_write,
    config::{UEVENT_BUFFER_SIZE, UEVENT_NUM_ENVP},
    error::ModaliasError,
    format::bounded_format,
    node::DeviceNode,
};
use alloc::{vec, vec::Vec};
use core::{fmt, str};
use log::warn;

/// `KEY=value` variables packed NUL-separated into a fixed-size buffer.
pub struct UeventEnv {
    buf: Vec<u8>,
    buflen: usize,
    envp: Vec<usize>,
}

impl UeventEnv {
    /// An empty environment.
    pub fn new() -> UeventEnv {
        UeventEnv {
            buf: vec![0; UEVENT_BUFFER_SIZE],
            buflen: 0,
            envp: Vec::with_capacity(UEVENT_NUM_ENVP),
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.envp.len()
    }

    /// Whether no variable has been added.
    pub fn is_empty(&self) -> bool {
        self.envp.is_empty()
    }

    /// Bytes of the buffer in use, NULs included.
    pub fn buflen(&self) -> usize {
        self.buflen
    }

    /// Append one variable.
    ///
    /// Fails with [ModaliasError::OutOfMemory], leaving the environment unchanged, when the
    /// variable table is full or the formatted variable does not fit.
    pub fn add_var(&mut self, args: fmt::Arguments<'_>) -> Result<(), ModaliasError> {
        if self.envp.len() >= UEVENT_NUM_ENVP {
            warn!("Too many uevent variables.");
            return Err(ModaliasError::OutOfMemory);
        }
        let window = &mut self.buf[self.buflen..];
        let room = window.len();
        let len = bounded_format(window, args);
        if len >= room {
            warn!("Uevent buffer too small.");
            return Err(ModaliasError::OutOfMemory);
        }
        self.envp.push(self.buflen);
        self.buflen += len + 1;
        Ok(())
    }

    /// Append `MODALIAS=<alias>` for `node`.
    ///
    /// The alias is written straight into the buffer after the key. Fails with
    /// [ModaliasError::NoDevice] without a node and [ModaliasError::OutOfMemory] if the
    /// variable does not fit; the environment is unchanged on failure.
    pub fn add_modalias<N: DeviceNode + ?Sized>(
        &mut self,
        node: Option<&N>,
    ) -> Result<(), ModaliasError> {
        let node = node.ok_or(ModaliasError::NoDevice)?;
        let mark = (self.buflen, self.envp.len());
        self.add_var(format_args!("MODALIAS="))?;

        // Continue over the NUL that ended "MODALIAS=".
        let start = self.buflen - 1;
        let room = self.buf.len() - self.buflen;
        let written = isize::try_from(room)
            .map_err(|_| ModaliasError::InvalidArgument)
            .and_then(|capacity| compute_or_write(node, Some(&mut self.buf[start..]), capacity));
        match written {
            Ok(len) if len < room => {
                self.buflen += len;
                Ok(())
            }
            other => {
                self.buflen = mark.0;
                self.envp.truncate(mark.1);
                warn!("Uevent buffer too small for modalias.");
                Err(other.err().unwrap_or(ModaliasError::OutOfMemory))
            }
        }
    }

    /// The variables in insertion order.
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.envp.iter().map(|start| {
            let rest = &self.buf[*start..self.buflen];
            let end = rest.iter().position(|b| *b == 0).unwrap_or(rest.len());
            str::from_utf8(&rest[..end]).unwrap_or_default()
        })
    }
}

impl Default for UeventEnv {
    fn default() -> Self {
        Self::new()
    }
}
