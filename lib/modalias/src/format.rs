//! Bounded formatting into a byte window.
//!
//! [bounded_format] behaves like `snprintf`: it writes at most `window.len() - 1`
//! bytes followed by a NUL, and returns the length the output would have had
//! without truncation. An empty window is never touched.

use core::{
    cmp::min,
    fmt::{self, Write},
};

/// [Write] sink that counts every byte but stores only what fits.
pub struct BoundedWriter<'a> {
    window: &'a mut [u8],
    needed: usize,
}

impl<'a> BoundedWriter<'a> {
    /// Start writing at the beginning of `window`.
    pub fn new(window: &'a mut [u8]) -> BoundedWriter<'a> {
        BoundedWriter { window, needed: 0 }
    }

    /// Bytes written so far, NUL excluded.
    pub fn written(&self) -> usize {
        min(self.needed, self.window.len().saturating_sub(1))
    }

    /// Terminate the output and return the untruncated length.
    pub fn finish(self) -> usize {
        let end = self.written();
        if let Some(nul) = self.window.get_mut(end) {
            *nul = 0;
        }
        self.needed
    }
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.window.len().saturating_sub(1);
        if self.needed < room {
            let count = min(bytes.len(), room - self.needed);
            self.window[self.needed..self.needed + count].copy_from_slice(&bytes[..count]);
        }
        self.needed += bytes.len();
        Ok(())
    }
}

/// Format `args` into `window` and return the full length of the output.
pub fn bounded_format(window: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let mut writer = BoundedWriter::new(window);
    // The sink itself never fails; an argument whose `Display` errors just ends the output.
    let _ = writer.write_fmt(args);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits() {
        let mut buf = [0xaau8; 8];
        assert_eq!(bounded_format(&mut buf, format_args!("C{}", "abc")), 4);
        assert_eq!(&buf[..5], b"Cabc\0");
        assert_eq!(buf[5], 0xaa);
    }

    #[test]
    fn exact_fit_needs_room_for_nul() {
        let mut buf = [0xaau8; 4];
        assert_eq!(bounded_format(&mut buf, format_args!("C{}", "abc")), 4);
        assert_eq!(&buf, b"Cab\0");
    }

    #[test]
    fn truncated_across_pieces() {
        let mut buf = [0xaau8; 6];
        let len = bounded_format(&mut buf, format_args!("of:N{}T{}", "uart", "serial"));
        assert_eq!(len, 15);
        assert_eq!(&buf, b"of:Nu\0");
    }

    #[test]
    fn single_byte_window_only_terminates() {
        let mut buf = [0xaau8; 1];
        assert_eq!(bounded_format(&mut buf, format_args!("abc")), 3);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn empty_window_measures() {
        assert_eq!(bounded_format(&mut [], format_args!("of:N{}", "x")), 5);
    }

    #[test]
    fn written_tracks_stored_bytes() {
        let mut buf = [0u8; 3];
        let mut writer = BoundedWriter::new(&mut buf);
        writer.write_str("abcdef").unwrap();
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.finish(), 6);
        assert_eq!(&buf, b"ab\0");
    }
}
