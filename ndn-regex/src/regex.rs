use std::fmt;

use bon::bon;
use itertools::Itertools;
use ndn_name::{Component, Name};
use tracing::{debug, trace};

use crate::{
    error::{CompileError, ExpandError},
    expand::Captures,
    matcher::{MatcherArena, MatcherId},
};

/// One compiled pattern list with its own arena and back reference registry.
#[derive(Debug, Clone)]
struct Program {
    arena: MatcherArena,
    root: MatcherId,
}

impl Program {
    fn compile(expr: &str, case_insensitive: bool) -> Result<Self, CompileError> {
        let mut arena = MatcherArena::builder()
            .case_insensitive(case_insensitive)
            .build();
        let root = arena.pattern_list(expr)?;
        Ok(Self { arena, root })
    }

    fn captures(&self, name: &Name) -> Option<Captures> {
        self.arena.match_at(self.root, name, 0, name.len())
    }
}

/// A compiled name regex.
///
/// - Without a leading `^`, the expression may match after any number of leading components.
/// - Without a trailing `$`, the expression may match before any number of trailing components.
///
/// An expression without `^` is compiled twice: the primary form anchored at the start, and a
/// secondary form prefixed with `<.*>*` that is only tried when the primary form fails. The two
/// forms number their back references independently.
///
/// # Example
/// ```
/// use ndn_name::Name;
/// use ndn_regex::Regex;
///
/// let re = Regex::new("^<a><b><c>")?;
/// let name = Name::from("/a/b/c/d");
/// assert!(re.is_match(&name));
/// assert_eq!(re.captures(&name).unwrap().match_result(), name.components());
///
/// assert!(!Regex::new("<b><c>$")?.is_match(&name));
/// assert!(Regex::new("<b><c><d>$")?.is_match(&name));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Expansion
/// ```
/// use ndn_name::Name;
/// use ndn_regex::Regex;
///
/// let mut re = Regex::with_expand("(<a>)(<b>)", r"\2\1")?;
/// assert!(re.match_name(&Name::from("/a/b")));
/// assert_eq!(re.expand("")?, Name::from("/b/a"));
/// assert_eq!(re.expand(r"<x>\1")?, Name::from("/x/a"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Case insensitivity
/// ```
/// use ndn_name::Name;
/// use ndn_regex::Regex;
///
/// let re = Regex::builder().case_insensitive(true).build("^<ndn><KEY>$").unwrap();
/// assert!(re.is_match(&Name::from("/NDN/key")));
/// ```
#[derive(Debug, Clone)]
pub struct Regex {
    expr: String,
    expand: String,
    primary: Program,
    secondary: Option<Program>,
    /// Result of the last [`match_name()`](Regex::match_name).
    last: Captures,
}

#[bon]
impl Regex {
    pub fn new(expr: &str) -> Result<Self, CompileError> {
        Self::builder().build(expr)
    }

    /// `expand` is the default template of [`expand()`](Regex::expand).
    pub fn with_expand(expr: &str, expand: &str) -> Result<Self, CompileError> {
        Self::builder().expand(expand).build(expr)
    }

    #[builder(builder_type = Builder, finish_fn = build)]
    pub fn builder(
        #[builder(finish_fn)] expr: &str,
        /// Default template of [`expand()`](Regex::expand).
        #[builder(default, into)]
        expand: String,
        /// Match component regexes case-insensitively.
        #[builder(default)]
        case_insensitive: bool,
    ) -> Result<Self, CompileError> {
        let body = match expr.strip_suffix('$') {
            Some(body) => body.to_string(),
            None => format!("{expr}<.*>*"),
        };
        let (primary, secondary) = match body.strip_prefix('^') {
            Some(anchored) => (Program::compile(anchored, case_insensitive)?, None),
            None => (
                Program::compile(&body, case_insensitive)?,
                Some(Program::compile(
                    &format!("<.*>*{body}"),
                    case_insensitive,
                )?),
            ),
        };
        debug!(
            expr,
            secondary = secondary.is_some(),
            primary_groups = primary.arena.backrefs().len(),
            secondary_groups = secondary.as_ref().map(|s| s.arena.backrefs().len()),
            "compiled name regex"
        );

        Ok(Self {
            expr: expr.to_string(),
            expand,
            last: Captures::unmatched(primary.arena.backrefs().len()),
            primary,
            secondary,
        })
    }

    /// A regex that matches exactly `name` from its start, and nothing after it if `has_anchor`.
    ///
    /// ```
    /// use ndn_name::Name;
    /// use ndn_regex::Regex;
    ///
    /// let name = Name::from("/ndn/a.b/%2A");
    /// let re = Regex::from_name(&name, true)?;
    /// assert_eq!(re.as_str(), r"^<ndn><a\.b><%2A>$");
    /// assert_eq!(re.captures(&name).unwrap().match_result(), name.components());
    /// assert!(!re.is_match(&Name::from("/ndn/aXb/%2A")));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_name(name: &Name, has_anchor: bool) -> Result<Self, CompileError> {
        let expr = format!(
            "^{}{}",
            name.iter()
                .map(|component| format!("<{}>", regex::escape(&component.to_escaped_string())))
                .join(""),
            if has_anchor { "$" } else { "" }
        );
        Self::new(&expr)
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }

    /// The default expand template.
    pub fn expand_template(&self) -> &str {
        &self.expand
    }

    pub fn is_match(&self, name: &Name) -> bool {
        self.captures(name).is_some()
    }

    /// Matches the whole `name`, trying the primary form first.
    pub fn captures(&self, name: &Name) -> Option<Captures> {
        let captures = match self.primary.captures(name) {
            Some(captures) => Some(captures),
            None => self
                .secondary
                .as_ref()
                .and_then(|secondary| secondary.captures(name))
                .map(Captures::secondary),
        };
        trace!(expr = self.expr.as_str(), %name, matched = captures.is_some(), "match name");
        captures
    }

    /// Like [`captures()`](Regex::captures), but keeps the result for
    /// [`match_result()`](Regex::match_result) and [`expand()`](Regex::expand).
    ///
    /// A failed match clears the previous result.
    pub fn match_name(&mut self, name: &Name) -> bool {
        match self.captures(name) {
            Some(captures) => {
                self.last = captures;
                true
            }
            None => {
                self.last = Captures::unmatched(self.primary.arena.backrefs().len());
                false
            }
        }
    }

    /// The components matched by the last [`match_name()`](Regex::match_name).
    pub fn match_result(&self) -> &[Component] {
        self.last.match_result()
    }

    pub fn last_captures(&self) -> &Captures {
        &self.last
    }

    /// Expands `template` (or the default template if it is empty) with the result of the last
    /// [`match_name()`](Regex::match_name).
    pub fn expand(&self, template: &str) -> Result<Name, ExpandError> {
        let template = if template.is_empty() {
            self.expand.as_str()
        } else {
            template
        };
        self.last.expand(template)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(uri: &str) -> Vec<Component> {
        Name::from(uri).into_iter().collect()
    }

    #[test]
    fn top_matcher() {
        let mut re = Regex::new("^<a><b><c>").unwrap();
        assert!(re.match_name(&Name::from("/a/b/c/d")));
        assert_eq!(re.match_result(), components("/a/b/c/d"));
        assert!(!re.last_captures().is_secondary());

        let mut re = Regex::new("<b><c>").unwrap();
        assert!(re.match_name(&Name::from("/a/b/c/d")));
        assert_eq!(re.match_result(), components("/a/b/c/d"));
        assert!(re.last_captures().is_secondary());

        let mut re = Regex::new("<a><b><c>$").unwrap();
        assert!(re.match_name(&Name::from("/x/a/b/c")));
        assert!(!re.match_name(&Name::from("/a/b/c/d")));
        assert!(re.match_result().is_empty());

        let mut re = Regex::new("^<a><b><c>$").unwrap();
        assert!(re.match_name(&Name::from("/a/b/c")));
        assert!(!re.match_name(&Name::from("/a/b/c/d")));
        assert!(!re.match_name(&Name::from("/x/a/b/c")));
    }

    #[test]
    fn end_anchor() {
        let name = Name::from("/a/b/c/d");
        assert!(!Regex::new("<b><c>$").unwrap().is_match(&name));
        let re = Regex::new("<b><c><d>$").unwrap();
        assert_eq!(re.captures(&name).unwrap().match_result(), name.components());
    }

    #[test]
    fn empty_expressions() {
        let name = Name::from("/a/b");
        assert!(Regex::new("").unwrap().is_match(&name));
        assert!(Regex::new("^").unwrap().is_match(&name));
        assert!(Regex::new("$").unwrap().is_match(&Name::new()));
        assert!(!Regex::new("^$").unwrap().is_match(&name));
        assert!(Regex::new("^$").unwrap().is_match(&Name::new()));
    }

    #[test]
    fn repeated_match_is_stable() {
        let mut re = Regex::new("^(<a>*)<b>(<c>?)").unwrap();
        let name = Name::from("/a/a/b/c/d");
        for _ in 0..2 {
            assert!(re.match_name(&name));
            assert_eq!(re.match_result(), name.components());
            assert_eq!(re.expand(r"\1").unwrap(), Name::from("/a/a"));
            assert_eq!(re.expand(r"\2").unwrap(), Name::from("/c"));
        }

        // Nothing survives from the previous match
        assert!(re.match_name(&Name::from("/b")));
        assert_eq!(re.expand(r"\1\2").unwrap(), Name::new());
    }

    #[test]
    fn expand_backrefs() {
        let mut re = Regex::with_expand("^(<a>)(<b>)", r"\2\1").unwrap();
        assert!(re.match_name(&Name::from("/a/b")));
        assert_eq!(re.expand("").unwrap(), Name::from("/b/a"));
        assert_eq!(re.expand(r"\0").unwrap(), Name::from("/a/b"));
        assert_eq!(
            re.expand(r"\3"),
            Err(ExpandError::BackrefOutOfRange { index: 3, count: 2 })
        );
    }

    #[test]
    fn advanced_expansion() {
        let cases = [
            ("^(<.*>*)<.*>", r"\1", "/n/a/b/c", "/n/a/b"),
            ("^(<.*>*)<.*><c>(<.*>)<.*>", r"\1\2", "/n/a/b/c/d/e", "/n/a/d"),
            ("(<.*>*)<.*>$", r"\1", "/n/a/b/c", "/n/a/b"),
            ("<.*>(<.*>*)<.*>$", r"\1", "/n/a/b/c", "/a/b"),
            ("<a>(<>*)<>$", r"\1", "/n/a/b/c", "/b"),
            (
                "^<ndn><(.*)\\.(.*)><DNS>(<>*)<>",
                r"<ndn>\2\1\3",
                "/ndn/ucla.edu/DNS/yingdi/mac/ksk-1",
                "/ndn/edu/ucla/yingdi/mac",
            ),
        ];
        for (expr, expand, name, expanded) in cases {
            let mut re = Regex::with_expand(expr, expand).unwrap();
            assert!(re.match_name(&Name::from(name)), "{expr}");
            assert_eq!(re.expand("").unwrap(), Name::from(expanded), "{expr}");
        }
    }

    #[test]
    fn repetition_needs_components() {
        let re = Regex::new("^<a>(<b>?){2}$").unwrap();
        assert!(!re.is_match(&Name::from("/a")));
        assert!(re.is_match(&Name::from("/a/b")));
        assert!(re.is_match(&Name::from("/a/b/b")));
        assert!(!re.is_match(&Name::from("/a/b/b/b")));
    }

    #[test]
    fn abandoned_group_expansion() {
        let mut re = Regex::new("^[<a>]?(<a>)?<a><b>$").unwrap();
        assert!(re.match_name(&Name::from("/a/b")));
        assert_eq!(re.expand(r"\1").unwrap(), Name::from("/a"));
    }

    #[test]
    fn secondary_numbering() {
        let re = Regex::new("(<b>)<c>").unwrap();
        let captures = re.captures(&Name::from("/a/b/c")).unwrap();
        assert!(captures.is_secondary());
        assert_eq!(captures.get(1).unwrap(), components("/b"));
    }

    #[test]
    fn from_name() {
        let mut name = Name::from("/ndn/ucla.edu/a+b");
        name.append("(x)").append("").append(&b"\xff*"[..]);
        for has_anchor in [false, true] {
            let mut re = Regex::from_name(&name, has_anchor).unwrap();
            assert!(re.match_name(&name), "{re}");
            assert_eq!(re.match_result(), name.components());
        }

        let mut longer = name.clone();
        longer.append("z");
        assert!(Regex::from_name(&name, false).unwrap().is_match(&longer));
        assert!(!Regex::from_name(&name, true).unwrap().is_match(&longer));
        assert!(!Regex::from_name(&name, false)
            .unwrap()
            .is_match(&Name::from("/ndn/uclaXedu/a+b")));
    }

    #[test]
    fn display() {
        let re = Regex::new("^<a>(<b>)*$").unwrap();
        assert_eq!(re.as_str(), "^<a>(<b>)*$");
        assert_eq!(re.to_string(), "^<a>(<b>)*$");
        assert_eq!(Regex::from_name(&Name::new(), true).unwrap().as_str(), "^$");
    }

    #[test]
    fn compile_errors() {
        for expr in ["<a", "(<a>", "<a>{1,2", "<a>{2,1}", "a", "<(a>", "[<a>"] {
            assert!(Regex::new(expr).is_err(), "{expr}");
        }
        assert!(matches!(
            Regex::new("<a>{1,2"),
            Err(CompileError::MissingRightBrace { .. })
        ));
    }

    #[test]
    fn builder() {
        let mut re = Regex::builder()
            .expand(r"<x>\1")
            .case_insensitive(true)
            .build("^(<A>)")
            .unwrap();
        assert_eq!(re.expand_template(), r"<x>\1");
        assert!(re.match_name(&Name::from("/a/b")));
        assert_eq!(re.expand("").unwrap(), Name::from("/x/a"));
    }
}
