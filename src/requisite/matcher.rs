//! The priority-ordered pattern table and the recursive group parser.
//!
//! Each [`Matcher`] pairs a pattern with a handler. [`parse_group`] tries the
//! table top to bottom and hands the first match to its handler. Handlers fall
//! into a few families:
//!
//! - splitting handlers break text on `and` / `or` and parse each piece,
//! - substitution handlers parse a recognized phrase, allocate a group for the
//!   result and re-parse the surrounding text with the phrase replaced by its
//!   back-reference,
//! - terminal handlers build one typed node from the captures,
//! - the back-reference handler returns an earlier group's result.
//!
//! Text no pattern recognizes becomes [`Requirement::Other`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::context::ParseContext;
use crate::domain::{Collection, CourseCode, Requirement};

type Handler = fn(&str, &Captures<'_>, &mut ParseContext<'_>) -> Requirement;

/// One entry of the pattern table.
pub struct Matcher {
    name: &'static str,
    pattern: Regex,
    handler: Handler,
}

impl Matcher {
    fn new(name: &'static str, pattern: &str, handler: Handler) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            handler,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("valid regex"));
static OR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+or\s+").expect("valid regex"));
static COURSE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2,4}\s*[0-9V]{4}(?:\s*,\s*[A-Z]{2,4}\s*[0-9V]{4})+\s*,?$")
        .expect("valid regex")
});

/// Most specific first.
static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    vec![
        Matcher::new("throwaway", r"^(?i)(?:better|\d-\d|same as.+)$", throwaway),
        Matcher::new(
            "class standing",
            r"(?i).+(?:freshman|sophomores|juniors|seniors)\s+only$",
            other,
        ),
        Matcher::new(
            "majors and minors",
            r"(?i)(([A-Z]+)\s+majors\s+and\s+minors\s+only)",
            majors_and_minors,
        ),
        Matcher::new(
            "core completion",
            r"(?i)(Completion\s+of\s+(?:an?\s+)?(\d{3}).+core(?:\s+course)?)",
            core_completion,
        ),
        Matcher::new(
            "choice",
            r"(?i)(Credit\s+cannot\s+be\s+received\s+for\s+both\s+(?:courses)?,?(.+))",
            choice,
        ),
        Matcher::new("and", r"(?i)\s+and\s+", and),
        Matcher::new(
            "or better",
            r"(?i)(([A-Z]{2,4})\s*([0-9V]{4})\s+with\s+a(?:\s+grade\s+of)?\s+([ABCDF][+-]?)\s+or\s+better)",
            course_or_better,
        ),
        Matcher::new("or", r"(?i)\s+or\s+", or),
        Matcher::new(
            "course with minimum grade",
            r"^(?i)([A-Z]{2,4})\s*([0-9V]{4})\s+with\s+a\s+(?:minimum\s+)?grade\s+of\s+(?:at\s+least\s+)?(?:an?\s+)?([ABCDF][+-]?)$",
            course_with_grade,
        ),
        Matcher::new(
            "grade in course",
            r"^(?i)a\s+grade\s+of\s+at\s+least(?:\s+an?)?\s+([ABCDF][+-]?)\s+in\s+([A-Z]{2,4})\s*([0-9V]{4})$",
            grade_in_course,
        ),
        Matcher::new("course", r"^([A-Z]{2,4})\s*([0-9V]{4})$", course),
        Matcher::new("consent", r"^(?i)(.+)\s+consent\s+required$", consent),
        Matcher::new(
            "limit",
            r"^(?i)(\d+)\s+semester\s+credit\s+hours\s+maximum$",
            limit,
        ),
        Matcher::new(
            "repeat limit",
            r"^(?:[A-Z]{2,4}\s+[0-9V]{4}\s+)?Repeat\s+Limit\s+-\s+(?:[A-Z]{2,4}\s+[0-9V]{4}|This\s+course)\s+may\s+only\s+be\s+repeated\s+for(?:\s+a\s+maximum\s+of)?\s+(\d+)\s+semester\s+cre?dit\s+hours(?:\s+maximum)?$",
            limit,
        ),
        Matcher::new(
            "hours",
            r"^(?i)(?:at\s+least\s+(\d+)|(\d+)\s*-\s*(\d+)|(\d+))\s+semester\s+credit\s+hours?$",
            hours,
        ),
        Matcher::new("major", r"^(?i)(.+)\s+majors?(?:\s+only)?$", major),
        Matcher::new("minor", r"^(?i)(.+)\s+minors?(?:\s+only)?$", minor),
        Matcher::new(
            "core",
            r"^(?i)any\s+(\d+)\s+semester\s+credit\s+hours?\s+(\d{3})(?:\s+@\d+)?\s+core(?:\s+course)?$",
            core,
        ),
        Matcher::new("gpa", r"^(?i)(?:minimum\s+)?GPA\s+of\s+([0-9.]+)$", gpa),
        Matcher::new("gpa suffix", r"^(?i)([0-9.]+)\s+GPA$", gpa),
        Matcher::new(
            "grade point average",
            r"^(?i)a(?:\s+university)?\s+grade\s+point\s+average\s+of(?:\s+at\s+least)?\s+([0-9.]+)$",
            gpa,
        ),
        Matcher::new("back-reference", r"^@(\d+)$", back_reference),
    ]
});

/// The pattern table, in priority order.
#[must_use]
pub fn matchers() -> &'static [Matcher] {
    &MATCHERS
}

/// Parses one group of text into a requirement.
///
/// Always produces a node: text no pattern recognizes becomes
/// [`Requirement::Other`] with its back-references expanded, and empty text
/// becomes [`Requirement::Throwaway`].
pub fn parse_group(text: &str, context: &mut ParseContext<'_>) -> Requirement {
    let text = text.trim().trim_end_matches(')').trim_end();
    if text.is_empty() {
        return Requirement::Throwaway;
    }
    for matcher in matchers() {
        if let Some(captures) = matcher.pattern.captures(text) {
            let requirement = (matcher.handler)(text, &captures, context);
            tracing::trace!(group = text, matcher = matcher.name, result = requirement.kind());
            return requirement;
        }
    }
    tracing::trace!(group = text, result = "other", "no matcher");
    Requirement::other(context.expand(text))
}

fn throwaway(_: &str, _: &Captures<'_>, _: &mut ParseContext<'_>) -> Requirement {
    Requirement::Throwaway
}

fn other(text: &str, _: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    Requirement::other(context.expand(text))
}

/// Replaces `phrase` in `text` with a fresh back-reference to `requirement`
/// and parses the result.
fn substitute(
    text: &str,
    phrase: &str,
    requirement: Requirement,
    context: &mut ParseContext<'_>,
) -> Requirement {
    let token = context.allocate(phrase, requirement);
    let substituted = text.replace(phrase, &token);
    parse_group(&substituted, context)
}

fn majors_and_minors(
    text: &str,
    captures: &Captures<'_>,
    context: &mut ParseContext<'_>,
) -> Requirement {
    let field = &captures[2];
    let requirement = Collection::or(vec![Requirement::major(field), Requirement::minor(field)]);
    substitute(text, &captures[1], requirement.into(), context)
}

fn core_completion(
    text: &str,
    captures: &Captures<'_>,
    context: &mut ParseContext<'_>,
) -> Requirement {
    let requirement = Requirement::Core {
        core_flag: captures[2].to_string(),
        hours: None,
    };
    substitute(text, &captures[1], requirement, context)
}

fn choice(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    let choices = match parse_group(&captures[2], context) {
        Requirement::Collection(collection) => collection,
        Requirement::Throwaway => return other(text, captures, context),
        single => Collection::or(vec![single]),
    };
    substitute(text, &captures[1], Requirement::Choice { choices }, context)
}

fn course_or_better(
    text: &str,
    captures: &Captures<'_>,
    context: &mut ParseContext<'_>,
) -> Requirement {
    let phrase = &captures[1];
    let requirement = course_requirement(&captures[2], &captures[3], &captures[4], context)
        .unwrap_or_else(|| Requirement::other(context.expand(phrase)));
    substitute(text, phrase, requirement, context)
}

fn and(text: &str, _: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    split(text, &AND, Collection::and, context)
}

fn or(text: &str, _: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    split(text, &OR, Collection::or, context)
}

/// Splits `text` on `delimiter`, parses each piece and joins the results.
///
/// Throwaways are dropped and runs of adjacent [`Requirement::Other`] are
/// merged back into one, joined by the delimiter that separated them. A lone
/// survivor is returned as-is.
fn split(
    text: &str,
    delimiter: &Regex,
    junction: fn(Vec<Requirement>) -> Collection,
    context: &mut ParseContext<'_>,
) -> Requirement {
    let mut options: Vec<Requirement> = Vec::new();
    for piece in pieces(text, delimiter) {
        let requirement = match parse_group(&piece.text, context) {
            Requirement::Throwaway => continue,
            Requirement::Other { condition, .. } => Requirement::Other {
                description: context.expand(&piece.raw),
                condition,
            },
            requirement => requirement,
        };
        if let Requirement::Other {
            description: next, ..
        } = &requirement
        {
            if let Some(Requirement::Other { description, .. }) = options.last_mut() {
                description.push_str(piece.separator.as_deref().unwrap_or(" "));
                description.push_str(next);
                continue;
            }
        }
        options.push(requirement);
    }

    match options.len() {
        0 => Requirement::Throwaway,
        1 => options.swap_remove(0),
        _ => junction(options).into(),
    }
}

/// Text between two delimiter matches.
struct Piece {
    /// Delimiter text preceding the piece, `None` for the first.
    separator: Option<String>,
    /// The piece without trailing list punctuation, as it is parsed.
    text: String,
    /// The piece as written, used when it is kept as free text.
    raw: String,
}

/// The pieces between matches of `delimiter`. Comma-separated course lists
/// become one piece per course.
fn pieces(text: &str, delimiter: &Regex) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut separator = None;
    let mut last = 0;
    let ends = delimiter
        .find_iter(text)
        .map(|m| (m.start(), m.end(), Some(m.as_str().to_string())))
        .chain(std::iter::once((text.len(), text.len(), None)));
    for (start, end, next_separator) in ends {
        let raw = text[last..start].trim();
        let stripped = raw.trim_end_matches([',', ';']).trim_end();
        if COURSE_LIST.is_match(stripped) {
            let trailing = &raw[stripped.len()..];
            let codes: Vec<&str> = stripped
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .collect();
            let count = codes.len();
            for (i, code) in codes.into_iter().enumerate() {
                let joined = if i == 0 {
                    separator.take()
                } else {
                    Some(", ".to_string())
                };
                let raw = if i + 1 == count {
                    format!("{code}{trailing}")
                } else {
                    code.to_string()
                };
                pieces.push(Piece {
                    separator: joined,
                    text: code.to_string(),
                    raw,
                });
            }
        } else {
            pieces.push(Piece {
                separator: separator.take(),
                text: stripped.to_string(),
                raw: raw.to_string(),
            });
        }
        separator = next_separator;
        last = end;
    }
    pieces
}

/// Resolves a course reference, or `None` if the code is malformed or the
/// course isn't in the registry.
fn course_requirement(
    subject: &str,
    number: &str,
    grade: &str,
    context: &ParseContext<'_>,
) -> Option<Requirement> {
    let code = CourseCode::normalized(subject, number).ok()?;
    let env = context.env();
    let reference = env.registry.resolve(&code, env.catalog_year)?;
    Some(Requirement::course(reference, grade.to_uppercase()))
}

fn course_with_grade(
    text: &str,
    captures: &Captures<'_>,
    context: &mut ParseContext<'_>,
) -> Requirement {
    course_requirement(&captures[1], &captures[2], &captures[3], context)
        .unwrap_or_else(|| other(text, captures, context))
}

fn grade_in_course(
    text: &str,
    captures: &Captures<'_>,
    context: &mut ParseContext<'_>,
) -> Requirement {
    course_requirement(&captures[2], &captures[3], &captures[1], context)
        .unwrap_or_else(|| other(text, captures, context))
}

fn course(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    let grade = context.env().default_grade;
    course_requirement(&captures[1], &captures[2], grade, context)
        .unwrap_or_else(|| other(text, captures, context))
}

fn consent(_: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    Requirement::Consent {
        granter: phrase(&captures[1], context),
    }
}

fn limit(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    match captures[1].parse() {
        Ok(max_hours) => Requirement::Limit { max_hours },
        Err(_) => other(text, captures, context),
    }
}

fn hours(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    let number = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let (minimum, maximum) = match (number(1), number(2), number(3), number(4)) {
        (Some(at_least), ..) => (Some(at_least), None),
        (_, Some(low), Some(high), _) => (Some(low), Some(high)),
        (.., Some(exact)) => (Some(exact), None),
        _ => return other(text, captures, context),
    };
    Requirement::Hours {
        minimum,
        maximum,
        options: Vec::new(),
    }
}

fn major(_: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    named(&captures[1], context, |field: &str| Requirement::major(field))
}

fn minor(_: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    named(&captures[1], context, |field: &str| Requirement::minor(field))
}

/// The group index of a capture that is nothing but `@N`.
fn bare_reference(capture: &str) -> Option<usize> {
    capture.trim().strip_prefix('@')?.parse().ok()
}

/// A captured phrase as catalog text. A lone back-reference reads as the
/// group's own text, without its parentheses.
fn phrase(capture: &str, context: &ParseContext<'_>) -> String {
    match bare_reference(capture).and_then(|index| context.group_text(index)) {
        Some(group) => context.expand(group),
        None => context.expand(capture),
    }
}

/// A major or minor requirement. A back-reference to a parsed requirement
/// stands for it; "(A or B)" names several fields, any of which will do.
fn named(
    capture: &str,
    context: &ParseContext<'_>,
    build: fn(&str) -> Requirement,
) -> Requirement {
    if let Some(index) = bare_reference(capture) {
        match context.reference(index) {
            Requirement::Other { .. } | Requirement::Throwaway => {}
            structured => return structured,
        }
    }
    let phrase = phrase(capture, context);
    let fields: Vec<Requirement> = OR
        .split(&phrase)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(build)
        .collect();
    match fields.len() {
        0 => Requirement::Throwaway,
        1 => build(&phrase),
        _ => Collection::or(fields).into(),
    }
}

fn core(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    match captures[1].parse() {
        Ok(hours) => Requirement::Core {
            core_flag: captures[2].to_string(),
            hours: Some(hours),
        },
        Err(_) => other(text, captures, context),
    }
}

fn gpa(text: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    match captures[1].parse::<f64>() {
        Ok(minimum) if minimum.is_finite() => Requirement::Gpa {
            minimum,
            subset: String::new(),
        },
        _ => other(text, captures, context),
    }
}

fn back_reference(_: &str, captures: &Captures<'_>, context: &mut ParseContext<'_>) -> Requirement {
    captures[1]
        .parse()
        .map_or(Requirement::Throwaway, |index| context.reference(index))
}

#[cfg(test)]
pub(crate) mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{
        domain::{Course, Registry},
        requisite::{context::ParseEnv, grouper::group_parens},
    };

    pub(crate) fn registry() -> Registry {
        let mut registry = Registry::new();
        for (subject, number) in [
            ("CS", "1136"),
            ("CS", "1336"),
            ("CS", "1337"),
            ("CS", "2305"),
            ("CS", "2336"),
            ("MATH", "2413"),
            ("MATH", "2417"),
        ] {
            let code = CourseCode::new(subject, number).unwrap();
            registry.insert_course(Course::new(&code, code.compact(), "23".to_string()));
        }
        registry
    }

    fn parse(text: &str, registry: &Registry) -> Requirement {
        let env = ParseEnv {
            registry,
            catalog_year: "23",
            default_grade: "F",
        };
        let (text, groups) = group_parens(text);
        let mut context = ParseContext::new(env, groups);
        for index in 0..context.group_count() {
            let group = context.group_text(index).unwrap_or_default().to_string();
            let requirement = parse_group(&group, &mut context);
            context.store(index, requirement);
        }
        parse_group(&text, &mut context)
    }

    #[test_case("CS 1337", "F"; "bare course gets default grade")]
    #[test_case("CS1337", "F"; "compact code")]
    #[test_case("CS 1337 with a grade of at least a C", "C"; "at least a grade")]
    #[test_case("CS 1337 with a minimum grade of B-", "B-"; "minimum grade")]
    #[test_case("cs 1337 with a grade of c+", "C+"; "lowercase")]
    #[test_case("A grade of at least a C in CS 1337", "C"; "grade first")]
    #[test_case("CS 1337 with a C or better", "C"; "or better")]
    #[test_case("CS 1337 with a grade of B or better", "B"; "grade of or better")]
    fn resolves_course_references(text: &str, grade: &str) {
        assert_eq!(parse(text, &registry()), Requirement::course("CS1337", grade));
    }

    #[test]
    fn unknown_course_is_other() {
        assert_eq!(parse("CS 9999", &registry()), Requirement::other("CS 9999"));
    }

    #[test]
    fn or_split_requires_one() {
        let expected = Collection::or(vec![
            Requirement::course("CS1337", "F"),
            Requirement::course("CS2336", "F"),
        ]);
        assert_eq!(parse("CS 1337 or CS 2336", &registry()), expected.into());
    }

    #[test]
    fn parenthesized_or_inside_and() {
        let expected = Collection::and(vec![
            Collection::or(vec![
                Requirement::course("CS1337", "F"),
                Requirement::course("CS2336", "F"),
            ])
            .into(),
            Requirement::major("Math"),
        ]);
        assert_eq!(
            parse("(CS 1337 or CS 2336) and Math majors only", &registry()),
            expected.into()
        );
    }

    #[test]
    fn comma_list_expands_under_junction() {
        let Requirement::Collection(collection) =
            parse("CS 1136, CS 1336, or CS 1337", &registry())
        else {
            panic!("expected a collection");
        };
        assert_eq!(collection.name, "OR");
        assert_eq!(collection.required, 1);
        assert_eq!(collection.options.len(), 3);
    }

    #[test]
    fn adjacent_others_are_merged() {
        let expected = Collection::and(vec![
            Requirement::other("Sophomore standing and department approval"),
            Requirement::course("CS1337", "F"),
        ]);
        assert_eq!(
            parse("Sophomore standing and department approval and CS 1337", &registry()),
            expected.into()
        );
    }

    #[test_case("CS 9998, CS 9999, or Sophomore standing"; "unknown course list")]
    #[test_case("Sophomore standing; or department approval"; "semicolon")]
    #[test_case("Sophomore standing, and department approval"; "comma before and")]
    fn merged_others_keep_list_punctuation(text: &str) {
        assert_eq!(parse(text, &registry()), Requirement::other(text));
    }

    #[test]
    fn all_others_collapse_to_one() {
        assert_eq!(
            parse("Sophomore standing or (junior standing)", &registry()),
            Requirement::other("Sophomore standing or (junior standing)")
        );
    }

    #[test]
    fn throwaways_are_dropped_from_splits() {
        assert_eq!(
            parse("CS 1337 and same as SE 1337", &registry()),
            Requirement::course("CS1337", "F")
        );
        assert_eq!(parse("better", &registry()), Requirement::Throwaway);
        assert_eq!(parse("3-0", &registry()), Requirement::Throwaway);
    }

    #[test]
    fn majors_and_minors_substitution() {
        let expected = Collection::and(vec![
            Requirement::course("CS1337", "F"),
            Collection::or(vec![Requirement::major("JSOM"), Requirement::minor("JSOM")]).into(),
        ]);
        assert_eq!(
            parse("CS 1337, and JSOM majors and minors only", &registry()),
            expected.into()
        );
    }

    #[test]
    fn choice_wraps_collection() {
        let expected = Requirement::Choice {
            choices: Collection::and(vec![
                Requirement::course("CS1337", "F"),
                Requirement::course("CS1136", "F"),
            ]),
        };
        assert_eq!(
            parse("Credit cannot be received for both courses, CS 1337 and CS 1136", &registry()),
            expected
        );
    }

    #[test]
    fn core_completion_and_hours() {
        assert_eq!(
            parse("Completion of a 090 core course", &registry()),
            Requirement::Core {
                core_flag: "090".to_string(),
                hours: None
            }
        );
        assert_eq!(
            parse("any 3 semester credit hour 090 core course", &registry()),
            Requirement::Core {
                core_flag: "090".to_string(),
                hours: Some(3)
            }
        );
    }

    #[test_case("at least 30 semester credit hours", Some(30), None; "at least")]
    #[test_case("12-15 semester credit hours", Some(12), Some(15); "range")]
    #[test_case("60 semester credit hours", Some(60), None; "bare count")]
    fn hours_bounds(text: &str, minimum: Option<u32>, maximum: Option<u32>) {
        assert_eq!(
            parse(text, &registry()),
            Requirement::Hours {
                minimum,
                maximum,
                options: Vec::new()
            }
        );
    }

    #[test_case("9 semester credit hours maximum", 9; "limit")]
    #[test_case(
        "CS 4V98 Repeat Limit - This course may only be repeated for a maximum of 9 semester credit hours",
        9;
        "repeat limit"
    )]
    fn limits(text: &str, max_hours: u32) {
        assert_eq!(parse(text, &registry()), Requirement::Limit { max_hours });
    }

    #[test_case("minimum GPA of 2.5"; "gpa of")]
    #[test_case("2.5 GPA"; "gpa suffix")]
    #[test_case("a university grade point average of at least 2.5"; "spelled out")]
    fn gpa_forms(text: &str) {
        assert_eq!(
            parse(text, &registry()),
            Requirement::Gpa {
                minimum: 2.5,
                subset: String::new()
            }
        );
    }

    #[test]
    fn malformed_gpa_is_other() {
        assert_eq!(parse("GPA of 2.5.1", &registry()), Requirement::other("GPA of 2.5.1"));
    }

    #[test]
    fn consent_and_standing() {
        assert_eq!(
            parse("Instructor consent required", &registry()),
            Requirement::Consent {
                granter: "Instructor".to_string()
            }
        );
        assert_eq!(
            parse("Sophomore standing", &registry()),
            Requirement::other("Sophomore standing")
        );
        assert_eq!(
            parse("Open to juniors and seniors only", &registry()),
            Requirement::other("Open to juniors and seniors only")
        );
    }

    #[test_case(
        "Department (or instructor) consent required",
        "Department (or instructor)";
        "aside inside phrase"
    )]
    #[test_case(
        "(Instructor or department) consent required",
        "Instructor or department";
        "whole phrase parenthesized"
    )]
    fn consent_phrases_expand_groups(text: &str, granter: &str) {
        assert_eq!(
            parse(text, &registry()),
            Requirement::Consent {
                granter: granter.to_string()
            }
        );
    }

    #[test_case(
        "(CS or SE) majors only",
        Collection::or(vec![Requirement::major("CS"), Requirement::major("SE")]).into();
        "grouped majors"
    )]
    #[test_case(
        "(Arts and Humanities) minors",
        Requirement::minor("Arts and Humanities");
        "grouped minor"
    )]
    #[test_case(
        "Computer Science (or Software Engineering) majors only",
        Requirement::major("Computer Science (or Software Engineering)");
        "aside inside major"
    )]
    fn grouped_fields_expand(text: &str, expected: Requirement) {
        assert_eq!(parse(text, &registry()), expected);
    }

    #[test]
    fn dangling_back_reference_is_throwaway() {
        assert_eq!(parse("@4", &registry()), Requirement::Throwaway);
    }

    #[test]
    fn trailing_close_paren_is_trimmed() {
        assert_eq!(parse("CS 1337)", &registry()), Requirement::course("CS1337", "F"));
    }

    #[test]
    fn unmatched_text_round_trips() {
        let text = "Department approval (see advisor (room 2.4))";
        assert_eq!(parse(text, &registry()), Requirement::other(text));
    }
}
