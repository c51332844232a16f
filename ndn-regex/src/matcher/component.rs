use ndn_name::{Component, Name};
use regex::RegexBuilder;

use super::{
    slots::{Capture, Slots},
    MatcherArena, MatcherId,
};
use crate::error::CompileError;

/// A character regex that must match the whole escaped form of one component.
#[derive(Debug, Clone)]
pub(crate) struct ComponentMatcher {
    /// `None` for the empty expression, which matches any component.
    regex: Option<regex::Regex>,
    /// One pseudo matcher per capture group, in group order.
    pseudo: Vec<MatcherId>,
}

impl ComponentMatcher {
    pub fn compile(arena: &mut MatcherArena, expr: &str) -> Result<Self, CompileError> {
        if expr.is_empty() {
            return Ok(Self {
                regex: None,
                pseudo: Vec::new(),
            });
        }

        let regex = RegexBuilder::new(&format!(r"\A(?:{expr})\z"))
            .case_insensitive(arena.case_insensitive())
            .build()
            .map_err(|source| CompileError::ComponentRegex {
                pattern: expr.to_string(),
                source,
            })?;
        let pseudo = (1..regex.captures_len()).map(|_| arena.pseudo()).collect();
        Ok(Self {
            regex: Some(regex),
            pseudo,
        })
    }

    pub fn is_match(&self, name: &Name, offset: usize, len: usize, slots: &mut Slots) -> bool {
        if len != 1 {
            return false;
        }
        let Some(component) = name.get(offset) else {
            return false;
        };
        let Some(regex) = &self.regex else {
            return true;
        };

        let escaped = component.to_escaped_string();
        let Some(caps) = regex.captures(&escaped) else {
            return false;
        };
        for (i, &pseudo) in self.pseudo.iter().enumerate() {
            // A group that did not participate captures the empty component
            let value = caps.get(i + 1).map_or("", |m| m.as_str());
            slots.set(pseudo, Capture::Value(Component::from(value)));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatcherKind;

    #[test]
    fn component() {
        let mut arena = MatcherArena::new();
        let id = arena.component("a").unwrap();
        let name = Name::from("/a/b/c");

        let captures = arena.match_at(id, &name, 0, 1).unwrap();
        assert_eq!(captures.match_result(), &[Component::from("a")]);
        assert!(arena.match_at(id, &name, 1, 1).is_none());
        assert!(arena.match_at(id, &name, 0, 2).is_none());
        assert!(arena.match_at(id, &name, 0, 0).is_none());
    }

    #[test]
    fn exact_match() {
        let mut arena = MatcherArena::new();
        let id = arena.component("a").unwrap();
        assert!(arena.match_at(id, &Name::from("/ab"), 0, 1).is_none());
        assert!(arena.match_at(id, &Name::from("/ba"), 0, 1).is_none());

        let id = arena.component("a|ab").unwrap();
        assert!(arena.match_at(id, &Name::from("/ab"), 0, 1).is_some());
    }

    #[test]
    fn empty_expression() {
        let mut arena = MatcherArena::new();
        let id = arena.component("").unwrap();
        let name = Name::from("/anything");
        let captures = arena.match_at(id, &name, 0, 1).unwrap();
        assert_eq!(captures.match_result(), name.components());
        assert!(arena.match_at(id, &name, 0, 0).is_none());
    }

    #[test]
    fn escaped_form() {
        let mut arena = MatcherArena::new();
        let id = arena.component("a%20b").unwrap();
        let mut name = Name::new();
        name.append("a b");
        assert!(arena.match_at(id, &name, 0, 1).is_some());

        let id = arena.component(r"\.\.\.").unwrap();
        name.append("");
        assert!(arena.match_at(id, &name, 1, 1).is_some());
    }

    #[test]
    fn pseudo_groups() {
        let mut arena = MatcherArena::new();
        let id = arena.component(r"(.*)\.(.*)").unwrap();
        assert_eq!(arena.backrefs().len(), 2);
        for pseudo in arena.backrefs().iter() {
            assert_eq!(arena.kind(pseudo), Some(MatcherKind::Pseudo));
        }

        let name = Name::from("/ucla.edu");
        let captures = arena.match_at(id, &name, 0, 1).unwrap();
        assert_eq!(captures.get(1).unwrap(), &[Component::from("ucla")]);
        assert_eq!(captures.get(2).unwrap(), &[Component::from("edu")]);

        let id = arena.component("(x)?y").unwrap();
        let captures = arena.match_at(id, &Name::from("/y"), 0, 1).unwrap();
        assert_eq!(captures.get(3).unwrap(), &[Component::default()]);
    }

    #[test]
    fn invalid_regex() {
        let mut arena = MatcherArena::new();
        assert!(matches!(
            arena.component("(a"),
            Err(CompileError::ComponentRegex { .. })
        ));
    }
}
