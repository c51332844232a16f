use ndn_name::Name;

use super::{slots::Slots, MatcherArena, MatcherId};
use crate::error::{CompileError, ExpandError};

/// Back references of one matcher tree, numbered in registration order from 0.
///
/// Entries are plain [`MatcherId`]s: the registry never owns the nodes it refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackrefRegistry {
    refs: Vec<MatcherId>,
}

impl BackrefRegistry {
    /// Appends `id` and returns its index.
    pub fn push(&mut self, id: MatcherId) -> usize {
        self.refs.push(id);
        self.refs.len() - 1
    }

    pub fn pop(&mut self) -> Option<MatcherId> {
        self.refs.pop()
    }

    /// The node registered at 0-based `index`.
    ///
    /// The error reports the `\N` number of the reference, i.e. `index + 1`.
    pub fn get(&self, index: usize) -> Result<MatcherId, ExpandError> {
        self.refs
            .get(index)
            .copied()
            .ok_or(ExpandError::BackrefOutOfRange {
                index: index.saturating_add(1),
                count: self.refs.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MatcherId> + '_ {
        self.refs.iter().copied()
    }
}

/// `(...)`: delegates to the pattern list inside the parentheses.
#[derive(Debug, Clone)]
pub(crate) struct BackrefMatcher {
    inner: MatcherId,
}

impl BackrefMatcher {
    pub fn compile(arena: &mut MatcherArena, expr: &str) -> Result<Self, CompileError> {
        let inner = expr
            .strip_prefix('(')
            .and_then(|expr| expr.strip_suffix(')'))
            .ok_or_else(|| CompileError::bracket_mismatch(expr))?;
        Ok(Self {
            inner: arena.pattern_list(inner)?,
        })
    }

    pub fn is_match(
        &self,
        arena: &MatcherArena,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        arena.is_match_at(self.inner, name, offset, len, slots)
    }
}
