use ndn_name::Name;

use super::{slots::Slots, MatcherArena, MatcherId};
use crate::error::CompileError;

/// A sequence of groups and (repeated) component sets.
#[derive(Debug, Clone)]
pub(crate) struct PatternListMatcher {
    children: Vec<MatcherId>,
}

impl PatternListMatcher {
    pub fn compile(arena: &mut MatcherArena, expr: &str) -> Result<Self, CompileError> {
        let mut children = Vec::new();
        let mut index = 0;
        while index < expr.len() {
            let (child, end) = extract_pattern(arena, expr, index)?;
            children.push(child);
            index = end;
        }
        Ok(Self { children })
    }

    pub fn is_match(
        &self,
        arena: &MatcherArena,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        self.match_from(0, arena, name, offset, len, slots)
    }

    /// Longest first for each child, backtracking into the previous child on failure.
    fn match_from(
        &self,
        child: usize,
        arena: &MatcherArena,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        let Some(&id) = self.children.get(child) else {
            return len == 0;
        };
        (0..=len).rev().any(|tried| {
            arena.is_match_at(id, name, offset, tried, slots)
                && self.match_from(child + 1, arena, name, offset + tried, len - tried, slots)
        })
    }
}

/// Compiles the item starting at `expr[index]` and returns it with the index past its end.
fn extract_pattern(
    arena: &mut MatcherArena,
    expr: &str,
    index: usize,
) -> Result<(MatcherId, usize), CompileError> {
    let start = index;
    let (left, right) = match expr.as_bytes()[index] {
        b'(' => (b'(', b')'),
        b'<' => (b'<', b'>'),
        b'[' => (b'[', b']'),
        _ => {
            let found = expr[index..].chars().next().map_or("", |c| {
                &expr[index..index + c.len_utf8()]
            });
            return Err(CompileError::unexpected(expr, found));
        }
    };
    let indicator = extract_sub_pattern(expr, left, right, index + 1)?;
    let end = extract_repetition(expr, indicator)?;

    let id = if left == b'(' && indicator == end {
        arena.backref(&expr[start..end])?
    } else {
        arena.repeat(&expr[start..end], indicator - start)?
    };
    Ok((id, end))
}

fn extract_sub_pattern(
    expr: &str,
    left: u8,
    right: u8,
    mut index: usize,
) -> Result<usize, CompileError> {
    let mut left_count = 1;
    let mut right_count = 0;
    while left_count > right_count {
        match expr.as_bytes().get(index) {
            Some(&b) if b == left => left_count += 1,
            Some(&b) if b == right => right_count += 1,
            Some(_) => {}
            None => return Err(CompileError::bracket_mismatch(expr)),
        }
        index += 1;
    }
    Ok(index)
}

/// Returns the index past the quantifier at `expr[index..]`, if any.
fn extract_repetition(expr: &str, index: usize) -> Result<usize, CompileError> {
    match expr.as_bytes().get(index) {
        Some(b'+' | b'?' | b'*') => Ok(index + 1),
        Some(b'{') => expr[index..]
            .find('}')
            .map(|close| index + close + 1)
            .ok_or_else(|| CompileError::MissingRightBrace {
                pattern: expr.to_string(),
            }),
        _ => Ok(index),
    }
}
