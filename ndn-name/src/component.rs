use std::fmt;

use crate::uri;

/// One opaque segment of a [`Name`](crate::Name).
///
/// Comparison and hashing use the raw bytes. The string form used in URIs and by regex matchers
/// is [`to_escaped_string()`](Component::to_escaped_string).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Component {
    value: Vec<u8>,
}

impl Component {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.value
    }

    /// The canonical escaped form.
    ///
    /// Bytes `0-9 A-Z a-z + - . _` are kept, all others are written as `%XX`. A value made only
    /// of periods gets three extra periods so that it survives a round trip through
    /// [`from_escaped_str()`](Component::from_escaped_str).
    ///
    /// ```
    /// use ndn_name::Component;
    ///
    /// assert_eq!(Component::from("ucla.edu").to_escaped_string(), "ucla.edu");
    /// assert_eq!(Component::from("a b").to_escaped_string(), "a%20b");
    /// assert_eq!(Component::from("").to_escaped_string(), "...");
    /// assert_eq!(Component::from("..").to_escaped_string(), ".....");
    /// ```
    pub fn to_escaped_string(&self) -> String {
        let mut s = String::with_capacity(self.value.len());
        uri::escape_into(&self.value, &mut s);
        s
    }

    /// Parses one escaped component.
    ///
    /// Returns `None` for the illegal values `""`, `"."` and `".."` (after unescaping).
    ///
    /// ```
    /// use ndn_name::Component;
    ///
    /// assert_eq!(Component::from_escaped_str("a%2Fb"), Some(Component::from("a/b")));
    /// assert_eq!(Component::from_escaped_str("...."), Some(Component::from(".")));
    /// assert_eq!(Component::from_escaped_str(".."), None);
    /// ```
    pub fn from_escaped_str(escaped: &str) -> Option<Self> {
        let value = uri::unescape(uri::trim(escaped).as_bytes());
        if value.iter().all(|&b| b == b'.') {
            if value.len() <= 2 {
                return None;
            }
            return Some(Self::new(&value[3..]));
        }
        Some(Self { value })
    }
}

impl From<&str> for Component {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Component {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for Component {
    fn from(value: Vec<u8>) -> Self {
        Self { value }
    }
}

impl AsRef<[u8]> for Component {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_escaped_string())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self)
    }
}
