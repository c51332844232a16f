/*!
Expand templates: building a new [`Name`] from the captures of a match.

A template is a sequence of:
- `<literal>`: one new component whose raw bytes are `literal`. Angle brackets inside
  `literal` must be balanced.
- `\N`: `\0` is the whole match, `\1..` are back references in registration order.
  A group keeps the result of its last match call, and expands to nothing if that call failed
  or never happened.

## Example
```
use ndn_name::Name;
use ndn_regex::Regex;

let re = Regex::new("^<ndn><(.*)\\.(.*)><DNS>(<>*)<>").unwrap();
let captures = re.captures(&Name::from("/ndn/ucla.edu/DNS/yingdi/mac/ksk-1")).unwrap();
assert_eq!(
    captures.expand(r"<ndn>\2\1\3").unwrap(),
    Name::from("/ndn/edu/ucla/yingdi/mac")
);
```
*/
use logos::{Lexer, Logos};
use ndn_name::{Component, Name};

use crate::error::ExpandError;

#[derive(Logos, Debug, PartialEq)]
pub(crate) enum ExpandToken<'t> {
    /// `\N`, saturated at `usize::MAX`.
    #[regex(r"\\[0-9]+", |lex| lex.slice()[1..].parse::<usize>().unwrap_or(usize::MAX))]
    Backref(usize),

    /// `<literal>`, without the outermost brackets.
    #[token("<", literal)]
    Literal(&'t str),
}

/// Consumes up to the `>` that balances the opening `<`.
fn literal<'t>(lex: &mut Lexer<'t, ExpandToken<'t>>) -> Option<&'t str> {
    let rest = lex.remainder();
    let mut depth = 1usize;
    for (i, b) in rest.bytes().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return Some(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// The owned result of a successful match.
///
/// Back references are numbered by the registry of the matcher tree that produced the match,
/// so a secondary match may number its groups differently from a primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    result: Vec<Component>,
    groups: Vec<Vec<Component>>,
    secondary: bool,
}

impl Captures {
    pub(crate) fn new(result: Vec<Component>, groups: Vec<Vec<Component>>) -> Self {
        Self {
            result,
            groups,
            secondary: false,
        }
    }

    /// No match, with `groups` empty back references.
    pub(crate) fn unmatched(groups: usize) -> Self {
        Self::new(Vec::new(), vec![Vec::new(); groups])
    }

    pub(crate) fn secondary(mut self) -> Self {
        self.secondary = true;
        self
    }

    /// The matched components.
    pub fn match_result(&self) -> &[Component] {
        &self.result
    }

    /// `get(0)` is the whole match, `get(n)` is back reference `\n`.
    pub fn get(&self, i: usize) -> Option<&[Component]> {
        match i {
            0 => Some(&self.result),
            i => self.groups.get(i - 1).map(Vec::as_slice),
        }
    }

    /// The number of back references plus one for the whole match.
    pub fn len(&self) -> usize {
        self.groups.len() + 1
    }

    /// Whether the match came from the implicit `<.*>*` prefix of an expression without `^`.
    pub fn is_secondary(&self) -> bool {
        self.secondary
    }

    /// Builds a new name from `template`.
    pub fn expand(&self, template: &str) -> Result<Name, ExpandError> {
        let mut name = Name::new();
        let mut lex = ExpandToken::lexer(template);
        while let Some(token) = lex.next() {
            match token {
                Ok(ExpandToken::Literal(literal)) => {
                    name.append(literal);
                }
                Ok(ExpandToken::Backref(i)) => {
                    let group = self.get(i).ok_or(ExpandError::BackrefOutOfRange {
                        index: i,
                        count: self.groups.len(),
                    })?;
                    name.extend(group.iter().cloned());
                }
                Err(()) => {
                    return Err(ExpandError::Syntax {
                        template: template.to_string(),
                        offset: lex.span().start,
                    })
                }
            }
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(template: &str) -> Vec<Result<ExpandToken<'_>, ()>> {
        ExpandToken::lexer(template).collect()
    }

    fn captures() -> Captures {
        Captures::new(
            Name::from("/a/b/c").into_iter().collect(),
            vec![
                Name::from("/a").into_iter().collect(),
                Name::from("/b/c").into_iter().collect(),
                Vec::new(),
            ],
        )
    }

    #[test]
    fn lexer() {
        assert_eq!(
            tokens(r"<a>\1<b<c>>\23"),
            vec![
                Ok(ExpandToken::Literal("a")),
                Ok(ExpandToken::Backref(1)),
                Ok(ExpandToken::Literal("b<c>")),
                Ok(ExpandToken::Backref(23)),
            ]
        );
        assert_eq!(tokens("<>"), vec![Ok(ExpandToken::Literal(""))]);
        assert!(tokens(r"\").iter().any(Result::is_err));
        assert!(tokens("<a").iter().any(Result::is_err));
        assert!(tokens("a").iter().any(Result::is_err));
        assert_eq!(
            tokens(r"\99999999999999999999999"),
            vec![Ok(ExpandToken::Backref(usize::MAX))]
        );
    }

    #[test]
    fn expand() {
        let captures = captures();
        assert_eq!(captures.len(), 4);
        assert_eq!(captures.expand(r"\0").unwrap(), Name::from("/a/b/c"));
        assert_eq!(captures.expand(r"\2\1").unwrap(), Name::from("/b/c/a"));
        assert_eq!(captures.expand(r"<x>\3<y>").unwrap(), Name::from("/x/y"));
        assert_eq!(captures.expand("").unwrap(), Name::new());
    }

    #[test]
    fn literal_is_raw() {
        let name = captures().expand("<a%20b>").unwrap();
        assert_eq!(name[0].as_bytes(), b"a%20b");
    }

    #[test]
    fn errors() {
        let captures = captures();
        assert_eq!(
            captures.expand(r"\4"),
            Err(ExpandError::BackrefOutOfRange { index: 4, count: 3 })
        );
        assert_eq!(
            captures.expand(r"<a>\"),
            Err(ExpandError::Syntax {
                template: r"<a>\".to_string(),
                offset: 3
            })
        );
        assert!(matches!(
            captures.expand("<a><b"),
            Err(ExpandError::Syntax { offset: 3, .. })
        ));
        assert!(captures.expand(" <a>").is_err());
        assert_eq!(
            captures.expand(r"<a>\99999999999999999999999"),
            Err(ExpandError::BackrefOutOfRange {
                index: usize::MAX,
                count: 3
            })
        );
    }

    #[test]
    fn unmatched() {
        let captures = Captures::unmatched(2);
        assert!(!captures.is_secondary());
        assert_eq!(captures.expand(r"\0\1\2").unwrap(), Name::new());
        assert!(captures.expand(r"\3").is_err());
    }
}
