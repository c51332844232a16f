//! Regular expressions over NDN names.
/*!
A name regex matches a [`Name`](ndn_name::Name) component by component. Each `<...>` is a
character regex (as in the [regex](https://docs.rs/regex) crate) that must match the whole
escaped form of one component:

```
use ndn_name::Name;
use ndn_regex::Regex;

let mut re = Regex::with_expand("^<ndn><(.*)\\.(.*)><DNS>(<>*)<>", r"<ndn>\2\1\3").unwrap();
assert!(re.match_name(&Name::from("/ndn/ucla.edu/DNS/yingdi/mac/ksk-1")));
assert_eq!(re.expand("").unwrap(), Name::from("/ndn/edu/ucla/yingdi/mac"));
```

## Syntax
```text
pattern    := ['^'] item* ['$']
item       := (component | set | group) [quantifier]
component  := '<' regex '>'
set        := '[' ['^'] component* ']'
group      := '(' item* ')'
quantifier := '?' | '+' | '*' | '{n}' | '{n,}' | '{,m}' | '{n,m}'
```
- `<>` matches any one component, `<.*>*` any number of components.
- `[<a><b>]` matches `a` or `b`, `[^<a><b>]` any other single component.
- Groups are numbered by their opening parenthesis. Capture groups inside a component regex,
  like `<(.*)\.(.*)>`, are numbered in the same sequence.
- Matching is greedy backtracking: every item takes as many components as it can while the rest
  of the pattern still matches.
- Without `^` the pattern may start anywhere, without `$` it may end anywhere.

Matched groups can be rearranged into a new name with an [expand template](expand).

## Usage
- [`Regex`]: compile once, then [`is_match()`](Regex::is_match) and
  [`captures()`](Regex::captures) from as many places as needed, or
  [`match_name()`](Regex::match_name) + [`expand()`](Regex::expand) for a stateful API.
- [`HyperRelation`]: relates the expansions of a packet name and a key name.
- [`matcher`]: the individual matchers, for building and matching sub-patterns.

## Logging
Compilation and matching emit [`tracing`] events (`debug` for compiled regexes and rejected
hyper relations, `trace` for every matcher). No subscriber is installed by this crate.

## Crate features
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]
pub mod error;
pub mod expand;
pub mod matcher;
pub mod regex;
pub mod relation;

pub use crate::regex::Regex;
pub use error::{CompileError, Error, ExpandError};
pub use expand::Captures;
pub use relation::HyperRelation;
