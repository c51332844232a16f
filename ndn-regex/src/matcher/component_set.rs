use ndn_name::Name;

use super::{slots::Slots, MatcherArena, MatcherId};
use crate::error::CompileError;

#[derive(Debug, Clone)]
pub(crate) struct ComponentSetMatcher {
    components: Vec<MatcherId>,
    /// `false` for `[^...]`.
    inclusion: bool,
}

impl ComponentSetMatcher {
    pub fn compile(arena: &mut MatcherArena, expr: &str) -> Result<Self, CompileError> {
        if expr.len() < 2 {
            return Err(CompileError::unexpected(expr, expr));
        }

        let bytes = expr.as_bytes();
        match bytes[0] {
            b'<' => {
                let end = extract_component(expr, 1)?;
                if end != expr.len() {
                    return Err(CompileError::unexpected(expr, &expr[end..]));
                }
                Ok(Self {
                    components: vec![arena.component(&expr[1..end - 1])?],
                    inclusion: true,
                })
            }
            b'[' => {
                let last = expr.len() - 1;
                if bytes[last] != b']' {
                    return Err(CompileError::bracket_mismatch(expr));
                }
                let (inclusion, start) = match bytes[1] {
                    b'^' => (false, 2),
                    _ => (true, 1),
                };
                Ok(Self {
                    components: compile_multiple(arena, expr, start, last)?,
                    inclusion,
                })
            }
            _ => Err(CompileError::unexpected(
                expr,
                &expr[..expr.chars().next().map_or(0, char::len_utf8)],
            )),
        }
    }

    pub fn is_match(
        &self,
        arena: &MatcherArena,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        if len != 1 {
            return false;
        }

        let found = self
            .components
            .iter()
            .any(|&component| arena.is_match_at(component, name, offset, len, slots));
        found == self.inclusion
    }
}

/// `<...>` members of `expr[start..last]`.
fn compile_multiple(
    arena: &mut MatcherArena,
    expr: &str,
    start: usize,
    last: usize,
) -> Result<Vec<MatcherId>, CompileError> {
    let mut components = Vec::new();
    let mut index = start;
    while index < last {
        if expr.as_bytes()[index] != b'<' {
            return Err(CompileError::unexpected(expr, &expr[index..last]));
        }
        let begin = index + 1;
        index = extract_component(expr, begin)?;
        components.push(arena.component(&expr[begin..index - 1])?);
    }
    if index != last {
        return Err(CompileError::bracket_mismatch(expr));
    }
    Ok(components)
}

/// Returns the index just past the `>` that closes the `<` before `index`.
pub(crate) fn extract_component(expr: &str, mut index: usize) -> Result<usize, CompileError> {
    let mut left = 1;
    let mut right = 0;
    while left > right {
        match expr.as_bytes().get(index) {
            Some(b'<') => left += 1,
            Some(b'>') => right += 1,
            Some(_) => {}
            None => return Err(CompileError::bracket_mismatch(expr)),
        }
        index += 1;
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(expr: &str) -> (MatcherArena, MatcherId) {
        let mut arena = MatcherArena::new();
        let id = arena.component_set(expr).unwrap();
        (arena, id)
    }

    #[test]
    fn single() {
        let (arena, id) = set("<a>");
        let name = Name::from("/a/b/c");
        let captures = arena.match_at(id, &name, 0, 1).unwrap();
        assert_eq!(captures.match_result(), Name::from("/a").components());
        assert!(arena.match_at(id, &name, 1, 1).is_none());
    }

    #[test]
    fn inclusion() {
        let (arena, id) = set("[<a><b><c>]");
        let name = Name::from("/a/b/c/d/ab");
        assert!(arena.match_at(id, &name, 0, 1).is_some());
        assert!(arena.match_at(id, &name, 1, 1).is_some());
        assert!(arena.match_at(id, &name, 2, 1).is_some());
        assert!(arena.match_at(id, &name, 3, 1).is_none());
        assert!(arena.match_at(id, &name, 4, 1).is_none());
        assert!(arena.match_at(id, &name, 0, 2).is_none());
    }

    #[test]
    fn exclusion() {
        let (include, include_id) = set("[<a><b><c>]");
        let (exclude, exclude_id) = set("[^<a><b><c>]");
        let name = Name::from("/a/b/c/d/ab");
        for offset in 0..name.len() {
            assert_ne!(
                include.match_at(include_id, &name, offset, 1).is_some(),
                exclude.match_at(exclude_id, &name, offset, 1).is_some(),
                "{offset}"
            );
        }
        assert!(exclude.match_at(exclude_id, &name, 0, 2).is_none());
    }

    #[test]
    fn empty_sets() {
        let name = Name::from("/a");
        let (arena, id) = set("[]");
        assert!(arena.match_at(id, &name, 0, 1).is_none());
        let (arena, id) = set("[^]");
        assert!(arena.match_at(id, &name, 0, 1).is_some());
    }

    #[test]
    fn nested_brackets() {
        let (arena, id) = set("[<a<b>c><d>]");
        let name = Name::from("/d");
        assert!(arena.match_at(id, &name, 0, 1).is_some());
    }

    #[test]
    fn exclusion_captures_nothing() {
        let (arena, id) = set("[^<(a)>]");
        let name = Name::from("/b");
        let captures = arena.match_at(id, &name, 0, 1).unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures.get(1), Some(&[][..]));
    }

    #[test]
    fn errors() {
        let mut arena = MatcherArena::new();
        for expr in ["", "<", "a", "<a", "<a>b", "[<a>", "[^", "[a]", "[<a>b]", "[<a]", "名字"] {
            assert!(arena.component_set(expr).is_err(), "{expr}");
        }
    }
}
