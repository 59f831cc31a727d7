use alloc::{boxed::Box, vec::Vec};
use core::{fmt::Write, str};
use utils::error::MessageError;

pub struct Property {
    pub name: Box<str>,
    pub data: Box<[u8]>,
}

impl Property {
    pub fn new(name: impl AsRef<str>, data: impl Into<Box<[u8]>>) -> Property {
        Property {
            name: name.as_ref().into(),
            data: data.into(),
        }
    }

    /// Create a string property, stored NUL-terminated.
    pub fn from_str(name: impl AsRef<str>, value: &str) -> Property {
        Self::from_strlist(name, &[value])
    }

    /// Create a string-list property: every entry is stored NUL-terminated, in order.
    pub fn from_strlist(name: impl AsRef<str>, values: &[&str]) -> Property {
        let mut data = Vec::with_capacity(values.iter().map(|v| v.len() + 1).sum());
        for value in values {
            data.extend_from_slice(value.as_bytes());
            data.push(0);
        }
        Self::new(name, data)
    }
}

impl Property {
    pub fn value_as_str(&self) -> Result<&str, PropertyError> {
        let end = self
            .data
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.data.len());
        str::from_utf8(&self.data[..end]).map_err(|_| PropertyError::InvalidPropFormat)
    }

    pub fn value_as_strlist(&self) -> Result<Vec<&str>, PropertyError> {
        self.strings().collect()
    }

    /// Iterate over the entries of a string-list value.
    ///
    /// The iterator is lazy and borrows the property, so calling this again restarts
    /// from the first entry. A trailing entry without a terminating NUL is still yielded.
    pub fn strings(&self) -> StrListIter<'_> {
        StrListIter { rest: &self.data }
    }
}

pub struct StrListIter<'a> {
    rest: &'a [u8],
}

impl<'a> StrListIter<'a> {
    /// Iterate over raw NUL-separated string-list bytes.
    pub fn from_bytes(data: &'a [u8]) -> StrListIter<'a> {
        StrListIter { rest: data }
    }
}

impl<'a> Iterator for StrListIter<'a> {
    type Item = Result<&'a str, PropertyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (entry, rest) = match self.rest.iter().position(|b| *b == 0) {
            Some(end) => (&self.rest[..end], &self.rest[end + 1..]),
            None => (self.rest, &self.rest[self.rest.len()..]),
        };
        self.rest = rest;
        Some(str::from_utf8(entry).map_err(|_| PropertyError::InvalidPropFormat))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyError {
    InvalidPropFormat,
}

impl MessageError for PropertyError {
    fn print_to_writer(&self, f: &mut dyn Write) -> core::fmt::Result {
        match self {
            PropertyError::InvalidPropFormat => f.write_str("invalid property format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strlist_keeps_order() {
        let prop = Property::from_strlist("compatible", &["acme,chip-v1", "acme,chip"]);
        assert_eq!(&*prop.data, b"acme,chip-v1\0acme,chip\0");
        assert_eq!(
            prop.value_as_strlist().unwrap(),
            vec!["acme,chip-v1", "acme,chip"]
        );
    }

    #[test]
    fn strings_is_restartable() {
        let prop = Property::from_strlist("compatible", &["a", "b"]);
        assert_eq!(prop.strings().count(), 2);
        assert_eq!(prop.strings().next(), Some(Ok("a")));
    }

    #[test]
    fn unterminated_tail_is_yielded() {
        let prop = Property::new("compatible", &b"first\0second"[..]);
        assert_eq!(prop.value_as_strlist().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn empty_value_has_no_entries() {
        let prop = Property::new("compatible", Vec::new());
        assert!(prop.value_as_strlist().unwrap().is_empty());
        assert_eq!(prop.value_as_str(), Ok(""));
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let prop = Property::new("device_type", &[0xffu8, 0xfe, 0][..]);
        assert_eq!(prop.value_as_str(), Err(PropertyError::InvalidPropFormat));
        assert_eq!(
            prop.value_as_strlist(),
            Err(PropertyError::InvalidPropFormat)
        );
    }

    #[test]
    fn single_string() {
        let prop = Property::from_str("device_type", "serial");
        assert_eq!(prop.value_as_str(), Ok("serial"));
    }
}
