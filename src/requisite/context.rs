use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{Registry, Requirement};

static GROUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\d+)").expect("valid regex"));

/// Read-only inputs shared by every chunk of one course.
#[derive(Debug, Clone, Copy)]
pub struct ParseEnv<'a> {
    /// Courses that course codes resolve against.
    pub registry: &'a Registry,
    /// Catalog year resolution prefers.
    pub catalog_year: &'a str,
    /// Grade given to course references that don't state one.
    pub default_grade: &'a str,
}

#[derive(Debug)]
struct Group {
    text: String,
    /// Paren groups expand back into `(text)`; substituted phrases expand
    /// into bare text.
    parenthesized: bool,
}

/// Per-chunk parse state.
///
/// Group `N` is the text behind the back-reference `@N`; its parsed result is
/// stored at the same index. Groups are append-only, so a reference can only
/// name a group created before it.
#[derive(Debug)]
pub struct ParseContext<'a> {
    env: ParseEnv<'a>,
    groups: Vec<Group>,
    parsed: Vec<Option<Requirement>>,
}

impl<'a> ParseContext<'a> {
    /// Creates a context over the paren groups of one chunk.
    #[must_use]
    pub fn new(env: ParseEnv<'a>, paren_groups: Vec<String>) -> Self {
        let parsed = vec![None; paren_groups.len()];
        let groups = paren_groups
            .into_iter()
            .map(|text| Group {
                text,
                parenthesized: true,
            })
            .collect();
        Self {
            env,
            groups,
            parsed,
        }
    }

    /// The shared inputs.
    #[must_use]
    pub const fn env(&self) -> ParseEnv<'a> {
        self.env
    }

    /// Number of groups allocated so far.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Raw text of a group.
    #[must_use]
    pub fn group_text(&self, index: usize) -> Option<&str> {
        self.groups.get(index).map(|group| group.text.as_str())
    }

    /// Records the parsed result of a group.
    pub fn store(&mut self, index: usize, requirement: Requirement) {
        if let Some(slot) = self.parsed.get_mut(index) {
            *slot = Some(requirement);
        }
    }

    /// The parsed result behind `@index`. Unknown or not-yet-parsed groups
    /// resolve to [`Requirement::Throwaway`].
    #[must_use]
    pub fn reference(&self, index: usize) -> Requirement {
        self.parsed
            .get(index)
            .and_then(Option::as_ref)
            .cloned()
            .unwrap_or(Requirement::Throwaway)
    }

    /// Allocates a group for an already-parsed phrase and returns the `@N`
    /// token that stands for it.
    pub fn allocate(&mut self, phrase: &str, requirement: Requirement) -> String {
        let index = self.groups.len();
        self.groups.push(Group {
            text: phrase.to_string(),
            parenthesized: false,
        });
        self.parsed.push(Some(requirement));
        format!("@{index}")
    }

    /// Replaces every back-reference in `text` with the text it stands for,
    /// recursively, so the result reads like the original catalog text.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        self.expand_below(text.trim(), self.groups.len())
    }

    /// Group `N` only ever refers to groups below `N`, which bounds the
    /// recursion.
    fn expand_below(&self, text: &str, limit: usize) -> String {
        GROUP_TAG
            .replace_all(text, |captures: &Captures<'_>| {
                let group = captures[1]
                    .parse::<usize>()
                    .ok()
                    .filter(|&index| index < limit)
                    .and_then(|index| self.groups.get(index).map(|group| (index, group)));
                match group {
                    Some((index, group)) => {
                        let inner = self.expand_below(&group.text, index);
                        if group.parenthesized {
                            format!("({inner})")
                        } else {
                            inner
                        }
                    }
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }
}
