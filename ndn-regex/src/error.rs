use ndn_name::ParseNameRelationError;
use thiserror::Error;

/// A malformed name regex.
///
/// `pattern` is always the sub-expression that was being compiled when the error occurred,
/// which may be a fragment of the whole expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("bracket mismatch in {pattern:?}")]
    BracketMismatch { pattern: String },

    #[error("unexpected syntax {found:?} in {pattern:?}")]
    UnexpectedSyntax { pattern: String, found: String },

    #[error("missing right brace in {pattern:?}")]
    MissingRightBrace { pattern: String },

    #[error("unrecognized repetition {quantifier:?} in {pattern:?}")]
    Repetition { pattern: String, quantifier: String },

    #[error("repetition min {min} is greater than max {max} in {pattern:?}")]
    RepetitionBounds {
        pattern: String,
        min: usize,
        max: usize,
    },

    #[error("repetition bound {bound:?} overflows in {pattern:?}")]
    RepetitionOverflow { pattern: String, bound: String },

    #[error("invalid component regex {pattern:?}")]
    ComponentRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CompileError {
    pub(crate) fn bracket_mismatch(pattern: &str) -> Self {
        Self::BracketMismatch {
            pattern: pattern.to_string(),
        }
    }

    pub(crate) fn unexpected(pattern: &str, found: &str) -> Self {
        Self::UnexpectedSyntax {
            pattern: pattern.to_string(),
            found: found.to_string(),
        }
    }
}

/// A malformed expand template, or a back reference that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("malformed expand template {template:?} at offset {offset}")]
    Syntax { template: String, offset: usize },

    /// `index` is the `\N` number, `count` the number of back references available.
    #[error("back reference \\{index} is out of range ({count} available)")]
    BackrefOutOfRange { index: usize, count: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Relation(#[from] ParseNameRelationError),
}
