use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{chunk::parse_requisite_text, context::ParseEnv};
use crate::domain::{Collection, Course, requirement::tagged};

static EITHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)((?:Prerequisites? or corequisites?|Corequisites? or prerequisites?):(.*))",
    )
    .expect("valid regex")
});
static PREREQUISITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Prerequisites?:(.*))").expect("valid regex"));
static COREQUISITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Corequisites?:(.*))").expect("valid regex"));

/// The three requisite categories, in the order they're matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequisiteKind {
    /// May be taken before or alongside the course.
    Either,
    /// Must be completed before the course.
    Prerequisite,
    /// Must be taken alongside the course.
    Corequisite,
}

impl RequisiteKind {
    /// All categories, in matching order.
    pub const ALL: [Self; 3] = [Self::Either, Self::Prerequisite, Self::Corequisite];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Either => &EITHER,
            Self::Prerequisite => &PREREQUISITE,
            Self::Corequisite => &COREQUISITE,
        }
    }

    /// The text of this category in `source`, with any other category's text
    /// removed. `None` if the category doesn't appear.
    #[must_use]
    pub fn text_in(self, source: &str) -> Option<String> {
        // "Prerequisite or corequisite:" also contains "corequisite:".
        let source = match self {
            Self::Either => source.to_string(),
            Self::Prerequisite | Self::Corequisite => match EITHER.captures(source) {
                Some(either) => source.replace(&either[1], ""),
                None => source.to_string(),
            },
        };
        let captures = self.pattern().captures(&source)?;
        let mut text = captures[2].to_string();
        for kind in Self::ALL {
            if let Some(nested) = kind.pattern().captures(&text) {
                let outer = nested[1].to_string();
                text = text.replace(&outer, "");
            }
        }
        Some(text.trim().to_string())
    }
}

/// Parsed requisites of one course.
///
/// Serializes with the same field names and tagging as a [`Course`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Requisites {
    /// Requisites that may be taken before or alongside.
    #[serde(with = "tagged::option")]
    pub co_or_pre_requisites: Option<Collection>,
    /// Requisites that must be completed before.
    #[serde(with = "tagged::option")]
    pub prerequisites: Option<Collection>,
    /// Requisites that must be taken alongside.
    #[serde(with = "tagged::option")]
    pub corequisites: Option<Collection>,
}

impl Requisites {
    /// Stores the parsed trees on the course.
    pub fn apply(self, course: &mut Course) {
        course.co_or_pre_requisites = self.co_or_pre_requisites;
        course.prerequisites = self.prerequisites;
        course.corequisites = self.corequisites;
    }

    fn slot(&mut self, kind: RequisiteKind) -> &mut Option<Collection> {
        match kind {
            RequisiteKind::Either => &mut self.co_or_pre_requisites,
            RequisiteKind::Prerequisite => &mut self.prerequisites,
            RequisiteKind::Corequisite => &mut self.corequisites,
        }
    }
}

/// Parses every requisite category found in `source`.
#[must_use]
pub fn parse_requisites(source: &str, env: ParseEnv<'_>) -> Requisites {
    let mut requisites = Requisites::default();
    for kind in RequisiteKind::ALL {
        if let Some(text) = kind.text_in(source) {
            *requisites.slot(kind) = parse_requisite_text(&text, env);
        }
    }
    requisites
}

/// Parses a course's requisites from its enrollment requirements, or from its
/// description when it has none.
#[must_use]
pub fn extract(course: &Course, env: ParseEnv<'_>) -> Requisites {
    let env = ParseEnv {
        catalog_year: &course.catalog_year,
        ..env
    };
    let requisites = parse_requisites(course.requisite_source(), env);
    tracing::debug!(
        course = %course.code(),
        prerequisites = requisites.prerequisites.is_some(),
        corequisites = requisites.corequisites.is_some(),
        either = requisites.co_or_pre_requisites.is_some(),
        "parsed requisites"
    );
    requisites
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{
        domain::{CourseCode, Registry, Requirement},
        requisite::matcher::tests::registry,
    };

    fn env(registry: &Registry) -> ParseEnv<'_> {
        ParseEnv {
            registry,
            catalog_year: "23",
            default_grade: "F",
        }
    }

    #[test_case(RequisiteKind::Prerequisite, Some("CS 1337."); "prerequisite")]
    #[test_case(RequisiteKind::Corequisite, Some("CS 1337L."); "corequisite")]
    #[test_case(RequisiteKind::Either, None; "either absent")]
    fn splits_categories(kind: RequisiteKind, expected: Option<&str>) {
        let source = "Prerequisite: CS 1337. Corequisite: CS 1337L.";
        assert_eq!(kind.text_in(source).as_deref(), expected);
    }

    #[test]
    fn either_category_does_not_leak_into_corequisites() {
        let source = "Prerequisite or corequisite: MATH 2413.";
        assert_eq!(
            RequisiteKind::Either.text_in(source).as_deref(),
            Some("MATH 2413.")
        );
        assert_eq!(RequisiteKind::Corequisite.text_in(source), None);
        assert_eq!(RequisiteKind::Prerequisite.text_in(source), None);
    }

    #[test]
    fn prerequisite_and_corequisite_trees_are_distinct() {
        let registry = registry();
        let requisites =
            parse_requisites("Prerequisite: CS 1337. Corequisite: CS 1337L.", env(&registry));
        assert_eq!(
            requisites.prerequisites,
            Some(Collection::requisites(vec![Requirement::course("CS1337", "F")]))
        );
        assert_eq!(
            requisites.corequisites,
            Some(Collection::requisites(vec![Requirement::other("CS 1337L")]))
        );
        assert_eq!(requisites.co_or_pre_requisites, None);
    }

    #[test]
    fn requisites_serialize_like_course_fields() {
        let registry = registry();
        let requisites = parse_requisites("Prerequisite: CS 1337.", env(&registry));
        let value = serde_json::to_value(&requisites).unwrap();
        assert_eq!(value["prerequisites"]["type"], "collection");
        assert_eq!(value["prerequisites"]["options"][0]["type"], "course");
        assert!(value["corequisites"].is_null());
        assert!(value["co_or_pre_requisites"].is_null());
    }

    #[test]
    fn extract_prefers_enrollment_requirements() {
        let registry = registry();
        let code = CourseCode::new("CS", "2336").unwrap();
        let mut course = Course::new(&code, "CS2336".to_string(), "23".to_string());
        course.description = "Prerequisite: MATH 2413.".to_string();
        course.enrollment_reqs = Some("Prerequisite: CS 1337.".to_string());

        extract(&course, env(&registry)).apply(&mut course);
        assert_eq!(
            course.prerequisites,
            Some(Collection::requisites(vec![Requirement::course("CS1337", "F")]))
        );

        course.enrollment_reqs = None;
        extract(&course, env(&registry)).apply(&mut course);
        assert_eq!(
            course.prerequisites,
            Some(Collection::requisites(vec![Requirement::course("MATH2413", "F")]))
        );
    }

    #[test]
    fn course_without_requisites_gets_none() {
        let registry = registry();
        let code = CourseCode::new("CS", "1136").unwrap();
        let mut course = Course::new(&code, "CS1136".to_string(), "23".to_string());
        course.description = "Introduction to programming. (1-0) S".to_string();
        extract(&course, env(&registry)).apply(&mut course);
        assert_eq!(course.prerequisites, None);
        assert_eq!(course.corequisites, None);
        assert_eq!(course.co_or_pre_requisites, None);
    }
}
