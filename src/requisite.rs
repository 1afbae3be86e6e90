//! Parsing of free-text enrollment requirements into [`Requirement`] trees.
//!
//! Requisite text is split into categories ([`RequisiteKind`]), each category
//! into sentences, and each sentence is parsed on its own:
//!
//! 1. parenthesized sub-text is pulled out into numbered groups
//!    ([`group_parens`]),
//! 2. each group, then the remaining text, is matched against a priority
//!    table of patterns ([`parse_group`]) whose handlers may recurse,
//! 3. results are stored in a per-sentence [`ParseContext`] so that later
//!    text can refer to them as `@N`.
//!
//! Parsing never fails: text that isn't recognized becomes
//! [`Requirement::Other`].
//!
//! [`Requirement`]: crate::domain::Requirement
//! [`Requirement::Other`]: crate::domain::Requirement::Other

mod chunk;
mod context;
mod extractor;
mod grouper;
mod matcher;

pub use chunk::{parse_chunk, parse_requisite_text};
pub use context::{ParseContext, ParseEnv};
pub use extractor::{RequisiteKind, Requisites, extract, parse_requisites};
pub use grouper::group_parens;
pub use matcher::{Matcher, matchers, parse_group};
