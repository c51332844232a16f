//! NDN names.
/*!
A [`Name`] is an ordered sequence of opaque [`Component`]s, written as a URI like
`/ndn/ucla.edu/DNS`. Each component has a raw byte value and a canonical escaped
string form, which is what regex matchers see.

## Features
- URI parsing with `%XX` unescaping, scheme (`ndn:`) and authority stripping
- Canonical [escaping](Component::to_escaped_string), including the
  all-periods special case
- Prefix and sub-name operations
- [`NameRelation`] checks (`equal`, `is-prefix-of`, `is-strict-prefix-of`)

## Example
```
use ndn_name::{Component, Name};

let name: Name = "ndn:/ndn/ucla.edu/%7Eyingdi".parse().unwrap();
assert_eq!(name.len(), 3);
assert_eq!(name[2], Component::from("~yingdi"));
assert_eq!(name.to_uri(), "/ndn/ucla.edu/%7Eyingdi");
assert!(Name::from("/ndn").is_prefix_of(&name));
```

## Crate features
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]
pub mod component;
pub mod name;
pub mod relation;
mod uri;

pub use component::Component;
pub use name::Name;
pub use relation::{NameRelation, ParseNameRelationError};
