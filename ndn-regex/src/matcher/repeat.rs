use ndn_name::Name;

use super::{slots::Slots, MatcherArena, MatcherId};
use crate::error::CompileError;

/// Upper bound of `+`, `*` and `{n,}`.
pub(crate) const UNBOUNDED: usize = usize::MAX;

/// A component set or a group repeated `min..=max` times.
#[derive(Debug, Clone)]
pub(crate) struct RepeatMatcher {
    inner: MatcherId,
    /// The inner matcher is a component set, which never consumes other than one component.
    single: bool,
    min: usize,
    max: usize,
}

/// One repetition in progress.
struct Frame {
    offset: usize,
    len: usize,
    /// The next number of components to try for this repetition.
    tried: Option<usize>,
}

impl RepeatMatcher {
    pub fn compile(
        arena: &mut MatcherArena,
        expr: &str,
        indicator: usize,
    ) -> Result<Self, CompileError> {
        let (Some(atom), Some(quantifier)) = (expr.get(..indicator), expr.get(indicator..)) else {
            return Err(CompileError::unexpected(expr, expr));
        };
        let single = !atom.starts_with('(');
        let inner = if single {
            arena.component_set(atom)?
        } else {
            arena.backref(atom)?
        };
        let (min, max) = parse_repetition(expr, quantifier)?;
        Ok(Self {
            inner,
            single,
            min,
            max,
        })
    }

    /// Greedy backtracking over the number of components each repetition consumes.
    ///
    /// Repetitions are kept on an explicit stack, so long names cannot overflow the call stack.
    /// Running out of components before `min` repetitions fails. A repetition may consume
    /// nothing only while `min` is not yet reached and components remain.
    pub fn is_match(
        &self,
        arena: &MatcherArena,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        if self.min == 0 && len == 0 {
            return true;
        }

        let mut frames: Vec<Frame> = Vec::new();
        let mut next = Some((offset, len));
        loop {
            if let Some((offset, len)) = next.take() {
                let repeat = frames.len();
                if len == 0 {
                    if repeat >= self.min {
                        return true;
                    }
                } else if repeat < self.max {
                    frames.push(Frame {
                        offset,
                        len,
                        tried: Some(if self.single { 1 } else { len }),
                    });
                }
            }

            let Some(repeat) = frames.len().checked_sub(1) else {
                return false;
            };
            let lowest = if repeat < self.min { 0 } else { 1 };
            let frame = &mut frames[repeat];
            match frame.tried {
                Some(tried) if tried >= lowest => {
                    frame.tried = tried.checked_sub(1);
                    if arena.is_match_at(self.inner, name, frame.offset, tried, slots) {
                        next = Some((frame.offset + tried, frame.len - tried));
                    }
                }
                _ => {
                    frames.pop();
                }
            }
        }
    }
}

/// `""`, `?`, `+`, `*`, `{n}`, `{n,}`, `{,m}` or `{n,m}`.
pub(crate) fn parse_repetition(
    expr: &str,
    quantifier: &str,
) -> Result<(usize, usize), CompileError> {
    let unrecognized = || CompileError::Repetition {
        pattern: expr.to_string(),
        quantifier: quantifier.to_string(),
    };
    let bound = |s: &str| -> Result<usize, CompileError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unrecognized());
        }
        s.parse().map_err(|_| CompileError::RepetitionOverflow {
            pattern: expr.to_string(),
            bound: s.to_string(),
        })
    };

    let (min, max) = match quantifier {
        "" => (1, 1),
        "?" => (0, 1),
        "+" => (1, UNBOUNDED),
        "*" => (0, UNBOUNDED),
        _ => {
            let body = quantifier
                .strip_prefix('{')
                .and_then(|q| q.strip_suffix('}'))
                .ok_or_else(unrecognized)?;
            match body.split_once(',') {
                None => {
                    let n = bound(body)?;
                    (n, n)
                }
                Some(("", max)) => (0, bound(max)?),
                Some((min, "")) => (bound(min)?, UNBOUNDED),
                Some((min, max)) => (bound(min)?, bound(max)?),
            }
        }
    };
    if min > max {
        return Err(CompileError::RepetitionBounds {
            pattern: expr.to_string(),
            min,
            max,
        });
    }
    Ok((min, max))
}
