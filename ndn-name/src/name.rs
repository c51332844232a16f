use std::{
    convert::Infallible,
    fmt,
    ops::{Index, Range},
    str::FromStr,
};

use crate::{uri, Component};

/// An ordered, 0-indexed sequence of [`Component`]s.
///
/// ## Example
/// ```
/// use ndn_name::{Component, Name};
///
/// let mut name = Name::from("/a/b");
/// name.append("c");
/// assert_eq!(name.to_uri(), "/a/b/c");
/// assert_eq!(name.sub_name(1, 5), Name::from("/b/c"));
/// assert_eq!(&name[0..2], &[Component::from("a"), Component::from("b")]);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    components: Vec<Component>,
}

impl Name {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URI like `/ndn/ucla.edu` or `ndn:/ndn/ucla.edu`.
    ///
    /// - Leading and trailing whitespace is ignored.
    /// - A scheme is dropped if its colon comes before the first `/`.
    /// - An authority after `//` is dropped.
    /// - Illegal components (`.` and `..`, and the empty component after a trailing `/`) are
    ///   skipped.
    ///
    /// Parsing never fails.
    pub fn from_uri(uri: &str) -> Self {
        let mut uri = uri::trim(uri);
        if uri.is_empty() {
            return Self::new();
        }

        if let Some(colon) = uri::find_byte(uri.as_bytes(), b':') {
            let before_slash = match uri::find_byte(uri.as_bytes(), b'/') {
                Some(slash) => colon < slash,
                None => true,
            };
            if before_slash {
                uri = uri::trim(&uri[colon + 1..]);
            }
        }

        if let Some(rest) = uri.strip_prefix("//") {
            match uri::find_byte(rest.as_bytes(), b'/') {
                Some(slash) => uri = uri::trim(&rest[slash + 1..]),
                // Only an authority
                None => return Self::new(),
            }
        } else if let Some(rest) = uri.strip_prefix('/') {
            uri = uri::trim(rest);
        }

        let mut name = Self::new();
        let mut rest = uri;
        loop {
            let (component, next) = match uri::find_byte(rest.as_bytes(), b'/') {
                Some(slash) => (&rest[..slash], Some(&rest[slash + 1..])),
                None => (rest, None),
            };
            if let Some(component) = Component::from_escaped_str(component) {
                name.components.push(component);
            }
            match next {
                Some(next) => rest = next,
                None => break,
            }
        }
        name
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Component> {
        self.components.get(i)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    pub fn append(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    pub fn append_name(&mut self, name: &Name) -> &mut Self {
        self.components.extend_from_slice(&name.components);
        self
    }

    /// Returns `n` components starting at `start`, clamped to the end of the name.
    pub fn sub_name(&self, start: usize, n: usize) -> Name {
        let start = start.min(self.len());
        let end = start.saturating_add(n).min(self.len());
        self.components[start..end].iter().cloned().collect()
    }

    /// Returns the first `n` components (or the whole name if it is shorter).
    pub fn prefix(&self, n: usize) -> Name {
        self.sub_name(0, n)
    }

    /// Returns `true` if every component of `self` equals the component at the same position in
    /// `other`. The empty name is a prefix of every name.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.len() <= other.len() && other.components.starts_with(&self.components)
    }

    pub fn to_uri(&self) -> String {
        if self.is_empty() {
            return "/".to_string();
        }
        let mut s = String::new();
        for component in &self.components {
            s.push('/');
            uri::escape_into(component.as_bytes(), &mut s);
        }
        s
    }
}

impl From<&str> for Name {
    fn from(uri: &str) -> Self {
        Self::from_uri(uri)
    }
}

impl FromStr for Name {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uri(s))
    }
}

impl From<Vec<Component>> for Name {
    fn from(components: Vec<Component>) -> Self {
        Self { components }
    }
}

impl From<&[Component]> for Name {
    fn from(components: &[Component]) -> Self {
        Self {
            components: components.to_vec(),
        }
    }
}

impl FromIterator<Component> for Name {
    fn from_iter<T: IntoIterator<Item = Component>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl Extend<Component> for Name {
    fn extend<T: IntoIterator<Item = Component>>(&mut self, iter: T) {
        self.components.extend(iter);
    }
}

impl IntoIterator for Name {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl Index<usize> for Name {
    type Output = Component;

    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

impl Index<Range<usize>> for Name {
    type Output = [Component];

    fn index(&self, index: Range<usize>) -> &Self::Output {
        &self.components[index]
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}
