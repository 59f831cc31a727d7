//! This module defines traits for some commonly used error types

use core::fmt::{self, Debug, Write};

/// An error that can be printed to a string device
pub trait MessageError: Debug {
    /// Print the error message to a writer
    fn print_to_writer(&self, f: &mut dyn Write) -> fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

/// Adapter that renders any [MessageError] through [core::fmt::Display].
pub struct Message<'a>(pub &'a dyn MessageError);

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.print_to_writer(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Plain;
    impl MessageError for Plain {}

    #[derive(Debug)]
    struct Custom(u32);
    impl MessageError for Custom {
        fn print_to_writer(&self, f: &mut dyn Write) -> fmt::Result {
            write!(f, "custom error #{}", self.0)
        }
    }

    #[test]
    fn default_message_uses_debug() {
        assert_eq!(format!("{}", Message(&Plain)), "Plain");
    }

    #[test]
    fn overridden_message() {
        assert_eq!(format!("{}", Message(&Custom(7))), "custom error #7");
    }
}
