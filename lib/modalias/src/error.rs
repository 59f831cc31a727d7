//! Errors reported by the modalias builders.

use core::fmt::{self, Display, Write};
use utils::error::{Message, MessageError};

/// Invalid argument.
pub const EINVAL: i32 = 22;
/// No such device.
pub const ENODEV: i32 = 19;
/// Out of memory.
pub const ENOMEM: i32 = 12;

/// Failure of a modalias operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModaliasError {
    /// The buffer and capacity do not describe a usable window.
    InvalidArgument,
    /// No device node was supplied.
    NoDevice,
    /// A buffer could not be allocated, or the output did not fit.
    OutOfMemory,
    /// The module loader returned the contained negative code.
    LoaderFailure(i32),
}

impl ModaliasError {
    /// Kernel-style negative error number.
    pub fn errno(&self) -> i32 {
        match self {
            ModaliasError::InvalidArgument => -EINVAL,
            ModaliasError::NoDevice => -ENODEV,
            ModaliasError::OutOfMemory => -ENOMEM,
            ModaliasError::LoaderFailure(code) => *code,
        }
    }
}

impl MessageError for ModaliasError {
    fn print_to_writer(&self, f: &mut dyn Write) -> fmt::Result {
        match self {
            ModaliasError::InvalidArgument => f.write_str("invalid buffer or capacity"),
            ModaliasError::NoDevice => f.write_str("no device node"),
            ModaliasError::OutOfMemory => f.write_str("out of memory"),
            ModaliasError::LoaderFailure(code) => write!(f, "module loader failed ({})", code),
        }
    }
}

impl Display for ModaliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Message(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_values() {
        assert_eq!(ModaliasError::InvalidArgument.errno(), -22);
        assert_eq!(ModaliasError::NoDevice.errno(), -19);
        assert_eq!(ModaliasError::OutOfMemory.errno(), -12);
        assert_eq!(ModaliasError::LoaderFailure(-2).errno(), -2);
    }

    #[test]
    fn display() {
        assert_eq!(
            ModaliasError::LoaderFailure(-2).to_string(),
            "module loader failed (-2)"
        );
        assert_eq!(ModaliasError::NoDevice.to_string(), "no device node");
    }
}
