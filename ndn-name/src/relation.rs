use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::Name;

/// A relation between two names, as used by trust rules.
///
/// ```
/// use ndn_name::{Name, NameRelation};
///
/// let relation: NameRelation = "is-strict-prefix-of".parse().unwrap();
/// assert!(relation.check(&Name::from("/a"), &Name::from("/a/b")));
/// assert!(!relation.check(&Name::from("/a"), &Name::from("/a")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRelation {
    /// Both names are equal.
    Equal,
    /// The first name is a prefix of (or equal to) the second.
    IsPrefixOf,
    /// The first name is a prefix of the second and strictly shorter.
    IsStrictPrefixOf,
}

impl NameRelation {
    pub fn check(self, first: &Name, second: &Name) -> bool {
        match self {
            NameRelation::Equal => first == second,
            NameRelation::IsPrefixOf => first.is_prefix_of(second),
            NameRelation::IsStrictPrefixOf => {
                first.len() < second.len() && first.is_prefix_of(second)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NameRelation::Equal => "equal",
            NameRelation::IsPrefixOf => "is-prefix-of",
            NameRelation::IsStrictPrefixOf => "is-strict-prefix-of",
        }
    }
}

impl fmt::Display for NameRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string is not one of `equal`, `is-prefix-of` or `is-strict-prefix-of`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported name relation {0:?}")]
pub struct ParseNameRelationError(pub String);

impl FromStr for NameRelation {
    type Err = ParseNameRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            NameRelation::Equal,
            NameRelation::IsPrefixOf,
            NameRelation::IsStrictPrefixOf,
        ]
        .into_iter()
        .find(|relation| relation.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseNameRelationError(s.to_string()))
    }
}
