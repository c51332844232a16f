/*!
The matcher tree of a compiled name regex.

All nodes of one tree live in a [`MatcherArena`] and refer to each other by [`MatcherId`].
The arena also owns the [`BackrefRegistry`] of the tree, which maps back reference numbers to
the nodes that capture them.

| Kind | Syntax | Consumes |
|------|--------|----------|
| [`Component`](MatcherKind::Component) | `expr` inside `<...>` | exactly one component |
| [`ComponentSet`](MatcherKind::ComponentSet) | `<expr>`, `[<a><b>]`, `[^<a><b>]` | exactly one component |
| [`Backref`](MatcherKind::Backref) | `(...)` | whatever its pattern list consumes |
| [`Repeat`](MatcherKind::Repeat) | a set or a group, plus `?`, `+`, `*`, `{n,m}` | a run of repetitions |
| [`PatternList`](MatcherKind::PatternList) | a sequence of the above | the concatenation |
| [`Pseudo`](MatcherKind::Pseudo) | a `(...)` group inside a component regex | nothing, it only captures |

## Example
```
use ndn_name::Name;
use ndn_regex::matcher::{MatcherArena, MatcherKind};

let mut arena = MatcherArena::new();
let list = arena.pattern_list("(<a>(<b>))<c>*").unwrap();
assert_eq!(arena.kind(list), Some(MatcherKind::PatternList));
assert_eq!(arena.backrefs().len(), 2);

let name = Name::from("/a/b/c/c");
let captures = arena.match_at(list, &name, 0, name.len()).unwrap();
assert_eq!(captures.get(1).unwrap(), Name::from("/a/b").components());
assert_eq!(captures.get(2).unwrap(), Name::from("/b").components());
```
*/
use bon::Builder;
use ndn_name::Name;
use tracing::trace;

use crate::{error::CompileError, expand::Captures};

use backref::BackrefMatcher;
use component::ComponentMatcher;
use component_set::ComponentSetMatcher;
use pattern_list::PatternListMatcher;
use repeat::RepeatMatcher;
use slots::{Capture, Slots};

mod backref;
mod component;
mod component_set;
mod pattern_list;
mod repeat;
pub(crate) mod slots;

pub use backref::BackrefRegistry;

/// Index of a node in its [`MatcherArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatcherId(usize);

impl MatcherId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    Pseudo,
    Component,
    ComponentSet,
    Backref,
    Repeat,
    PatternList,
}

#[derive(Debug, Clone)]
struct Node {
    pattern: String,
    body: Body,
}

#[derive(Debug, Clone)]
enum Body {
    /// A back reference that is registered but still compiling its pattern list.
    Reserved,
    Pseudo,
    Component(ComponentMatcher),
    ComponentSet(ComponentSetMatcher),
    Backref(BackrefMatcher),
    Repeat(RepeatMatcher),
    PatternList(PatternListMatcher),
}

impl Body {
    fn kind(&self) -> MatcherKind {
        match self {
            Body::Reserved | Body::Backref(_) => MatcherKind::Backref,
            Body::Pseudo => MatcherKind::Pseudo,
            Body::Component(_) => MatcherKind::Component,
            Body::ComponentSet(_) => MatcherKind::ComponentSet,
            Body::Repeat(_) => MatcherKind::Repeat,
            Body::PatternList(_) => MatcherKind::PatternList,
        }
    }
}

/// Owner of the nodes of one matcher tree and of its back reference registry.
///
/// Compiling a node compiles its whole subtree. A failed compile leaves the arena usable, but
/// the nodes allocated before the failure stay behind unreferenced.
#[derive(Builder, Debug, Clone, Default)]
pub struct MatcherArena {
    #[builder(skip)]
    nodes: Vec<Node>,
    #[builder(skip)]
    backrefs: BackrefRegistry,
    /// Match component regexes case-insensitively.
    #[builder(default)]
    case_insensitive: bool,
}

impl MatcherArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: MatcherId) -> Option<MatcherKind> {
        self.nodes.get(id.index()).map(|node| node.body.kind())
    }

    /// The sub-expression a node was compiled from. Empty for pseudo matchers.
    pub fn pattern(&self, id: MatcherId) -> Option<&str> {
        self.nodes.get(id.index()).map(|node| node.pattern.as_str())
    }

    pub fn backrefs(&self) -> &BackrefRegistry {
        &self.backrefs
    }

    pub(crate) fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn alloc(&mut self, pattern: &str, body: Body) -> MatcherId {
        let id = MatcherId::new(self.nodes.len());
        trace!(id = id.index(), kind = ?body.kind(), pattern, "compiled matcher");
        self.nodes.push(Node {
            pattern: pattern.to_string(),
            body,
        });
        id
    }

    /// Allocates a pseudo matcher and registers it as the next back reference.
    pub(crate) fn pseudo(&mut self) -> MatcherId {
        let id = self.alloc("", Body::Pseudo);
        self.backrefs.push(id);
        id
    }

    /// A component regex, matched against the escaped form of one component.
    ///
    /// Every capture group of the regex becomes a registered pseudo matcher.
    pub fn component(&mut self, expr: &str) -> Result<MatcherId, CompileError> {
        let matcher = ComponentMatcher::compile(self, expr)?;
        Ok(self.alloc(expr, Body::Component(matcher)))
    }

    /// `<expr>`, `[<a><b>...]` or `[^<a><b>...]`.
    pub fn component_set(&mut self, expr: &str) -> Result<MatcherId, CompileError> {
        let matcher = ComponentSetMatcher::compile(self, expr)?;
        Ok(self.alloc(expr, Body::ComponentSet(matcher)))
    }

    /// `(...)`, registered before its inner pattern list is compiled so that outer groups are
    /// numbered before the groups they contain.
    ///
    /// On failure the registry is unwound to its previous length.
    pub fn backref(&mut self, expr: &str) -> Result<MatcherId, CompileError> {
        let registered = self.backrefs.len();
        let id = self.alloc(expr, Body::Reserved);
        self.backrefs.push(id);
        match BackrefMatcher::compile(self, expr) {
            Ok(matcher) => {
                self.nodes[id.index()].body = Body::Backref(matcher);
                Ok(id)
            }
            Err(e) => {
                while self.backrefs.len() > registered {
                    self.backrefs.pop();
                }
                Err(e)
            }
        }
    }

    /// A component set or a group at `expr[..indicator]`, quantified by `expr[indicator..]`.
    pub fn repeat(&mut self, expr: &str, indicator: usize) -> Result<MatcherId, CompileError> {
        let matcher = RepeatMatcher::compile(self, expr, indicator)?;
        Ok(self.alloc(expr, Body::Repeat(matcher)))
    }

    pub fn pattern_list(&mut self, expr: &str) -> Result<MatcherId, CompileError> {
        let matcher = PatternListMatcher::compile(self, expr)?;
        Ok(self.alloc(expr, Body::PatternList(matcher)))
    }

    /// Matches node `id` against exactly `name[offset..offset + len]`.
    pub fn match_at(
        &self,
        id: MatcherId,
        name: &Name,
        offset: usize,
        len: usize,
    ) -> Option<Captures> {
        let mut slots = Slots::new(self.len());
        let matched = self.is_match_at(id, name, offset, len, &mut slots);
        trace!(id = id.index(), %name, offset, len, matched, "match");
        if !matched {
            return None;
        }
        let groups = self
            .backrefs
            .iter()
            .map(|backref| slots.resolve(backref, name))
            .collect();
        Some(Captures::new(
            name.components()[offset..offset + len].to_vec(),
            groups,
        ))
    }

    pub(crate) fn is_match_at(
        &self,
        id: MatcherId,
        name: &Name,
        offset: usize,
        len: usize,
        slots: &mut Slots,
    ) -> bool {
        if offset.checked_add(len).map_or(true, |end| end > name.len()) {
            return false;
        }
        let Some(node) = self.nodes.get(id.index()) else {
            return false;
        };
        match &node.body {
            Body::Reserved | Body::Pseudo => false,
            Body::Component(m) => m.is_match(name, offset, len, slots),
            Body::ComponentSet(m) => m.is_match(self, name, offset, len, slots),
            Body::Backref(m) => {
                slots.clear(id);
                let matched = m.is_match(self, name, offset, len, slots);
                if matched {
                    slots.set(id, Capture::Span(offset..offset + len));
                }
                matched
            }
            Body::Repeat(m) => m.is_match(self, name, offset, len, slots),
            Body::PatternList(m) => m.is_match(self, name, offset, len, slots),
        }
    }
}
