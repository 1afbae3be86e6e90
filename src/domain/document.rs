//! Scraped per-section catalog pages.
//!
//! A [`SectionDocument`] is the flat label → text map captured from one
//! section's catalog page. Labels keep their trailing colon (`"Schedule:"`).
//! Everything the registry needs is pulled out of it here, so the registry
//! never has to look at raw text.

use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    CourseCode, code,
    section::{AcademicSession, InvalidSessionError, Location, Meeting},
};

/// `"<class number> / <internal course number>"`.
pub const CLASS_COURSE_NUMBER: &str = "Class/Course Number:";
/// `"CS1337.001.23F"`.
pub const CLASS_SECTION: &str = "Class Section:";
/// Term, session dates and meeting times.
pub const SCHEDULE: &str = "Schedule:";
/// `Name ・ Role ・ email` triples.
pub const INSTRUCTORS: &str = "Instructor(s):";
/// `Name ・ Role ・ email` triples.
pub const ASSISTANTS: &str = "TA/RA(s):";

const DATE_FORMAT: &str = "%B %d, %Y";
const TIME_FORMAT: &str = "%I:%M%p";

static COURSE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4})([0-9V]{4})").expect("valid regex"));
static SECTION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[A-Z]{2,4}[0-9V]{4}\.([0-9A-Za-z]+)").expect("valid regex")
});
static CONTACT_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+)-([0-9]+)\)\s+([SUFY]+)").expect("valid regex"));
static CORE_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3}").expect("valid regex"));
static PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*([\w ]+)\s+・\s+([A-Za-z ]+)\s+・\s+([\w@.]+)").expect("valid regex")
});
static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Term: ([0-9]+[SUF])").expect("valid regex"));
static SESSION_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Start|End)s: ([A-Za-z]+ [0-9]{1,2}, [0-9]{4})").expect("valid regex")
});
static MEETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"([A-Za-z]+ [0-9]+, [0-9]{4})-([A-Za-z]+ [0-9]+, [0-9]{4})",
        r"\W+((?:(?:Mon|Tues|Wednes|Thurs|Fri|Satur|Sun)day(?:, )?)+)",
        r"\W+([0-9]+:[0-9]+(?:am|pm))-([0-9]+:[0-9]+(?:am|pm))",
        r"(?:\W+([A-Z][A-Z0-9]*) ([0-9]+\.[0-9A-Za-z]+))?",
    ))
    .expect("valid regex")
});

/// Errors raised while reading a scraped section document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A field every section page carries is absent.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field is present but doesn't have the expected shape.
    #[error("malformed field '{field}': '{value}'")]
    Malformed {
        /// Label of the field.
        field: String,
        /// Offending text.
        value: String,
    },

    /// The section id doesn't carry a valid course code.
    #[error(transparent)]
    Code(#[from] code::Error),

    /// The term name doesn't identify a catalog year.
    #[error(transparent)]
    Session(#[from] InvalidSessionError),

    /// A date or time in the schedule couldn't be parsed.
    #[error("invalid date or time '{value}': {source}")]
    Date {
        /// Offending text.
        value: String,
        /// Underlying parse failure.
        source: chrono::ParseError,
    },
}

/// A person listed on a section page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// First word of the listed name.
    pub first_name: String,
    /// Last word of the listed name.
    pub last_name: String,
    /// Listed role, e.g. `Primary Instructor`.
    pub role: String,
    /// Listed email.
    pub email: String,
}

/// Contact hours and offering frequency printed as `(3-0) S` in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactHours {
    /// Weekly lecture hours.
    pub lecture: String,
    /// Weekly laboratory hours.
    pub laboratory: String,
    /// Terms offered.
    pub frequency: String,
}

/// One scraped section page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionDocument {
    fields: BTreeMap<String, String>,
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectionDocument {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SectionDocument {
    /// The trimmed text of a field, if present.
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(|value| value.trim())
    }

    /// The trimmed text of a field.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::MissingField`] if the field is absent.
    pub fn require(&self, label: &str) -> Result<&str, DocumentError> {
        self.field(label)
            .ok_or_else(|| DocumentError::MissingField(label.to_string()))
    }

    /// The text of a field, or empty if absent.
    #[must_use]
    pub fn text(&self, label: &str) -> String {
        self.field(label).unwrap_or_default().to_string()
    }

    /// The public class number and the internal course number.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is absent or not of the form
    /// `"<class> / <course>"`.
    pub fn class_and_course_numbers(&self) -> Result<(String, String), DocumentError> {
        let value = self.require(CLASS_COURSE_NUMBER)?;
        value
            .split_once(" / ")
            .map(|(class, course)| (class.trim().to_string(), course.trim().to_string()))
            .filter(|(class, course)| !class.is_empty() && !course.is_empty())
            .ok_or_else(|| malformed(CLASS_COURSE_NUMBER, value))
    }

    /// The course code leading the section id.
    ///
    /// # Errors
    ///
    /// Returns an error if the section id is absent or doesn't start with a
    /// course code.
    pub fn course_code(&self) -> Result<CourseCode, DocumentError> {
        let value = self.require(CLASS_SECTION)?;
        let captures = COURSE_PREFIX
            .captures(value)
            .ok_or_else(|| malformed(CLASS_SECTION, value))?;
        Ok(CourseCode::new(&captures[1], &captures[2])?)
    }

    /// The section number following the course code in the section id.
    ///
    /// # Errors
    ///
    /// Returns an error if the section id is absent or has no section number.
    pub fn section_number(&self) -> Result<String, DocumentError> {
        let value = self.require(CLASS_SECTION)?;
        SECTION_NUMBER
            .captures(value)
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| malformed(CLASS_SECTION, value))
    }

    /// The term the section runs in, with its published dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule has no term or a date is unreadable.
    pub fn academic_session(&self) -> Result<AcademicSession, DocumentError> {
        let schedule = self.require(SCHEDULE)?;
        let name = TERM
            .captures(schedule)
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| malformed(SCHEDULE, schedule))?;
        let mut session = AcademicSession::new(name);
        let mut dates = SESSION_DATE
            .captures_iter(schedule)
            .map(|captures| parse_date(&captures[1]));
        session.start_date = dates.next().transpose()?;
        session.end_date = dates.next().transpose()?;
        Ok(session)
    }

    /// Scheduled meetings. A page without a schedule has none.
    ///
    /// # Errors
    ///
    /// Returns an error if a matched date or time is unreadable.
    pub fn meetings(&self) -> Result<Vec<Meeting>, DocumentError> {
        let Some(schedule) = self.field(SCHEDULE) else {
            return Ok(Vec::new());
        };
        MEETING
            .captures_iter(schedule)
            .map(|captures| {
                let location = match (captures.get(6), captures.get(7)) {
                    (Some(building), Some(room)) => Some(Location {
                        building: building.as_str().to_string(),
                        room: room.as_str().to_string(),
                        map_uri: format!(
                            "https://locator.utdallas.edu/{}_{}",
                            building.as_str(),
                            room.as_str()
                        ),
                    }),
                    _ => None,
                };
                Ok(Meeting {
                    start_date: parse_date(&captures[1])?,
                    end_date: parse_date(&captures[2])?,
                    meeting_days: captures[3]
                        .split(", ")
                        .map(|day| day.trim_end_matches(',').to_string())
                        .filter(|day| !day.is_empty())
                        .collect(),
                    start_time: parse_time(&captures[4])?,
                    end_time: parse_time(&captures[5])?,
                    modality: String::new(),
                    location,
                })
            })
            .collect()
    }

    /// People listed in a `Name ・ Role ・ email` field. Absent fields list
    /// nobody.
    #[must_use]
    pub fn people(&self, label: &str) -> Vec<Person> {
        let Some(text) = self.field(label) else {
            return Vec::new();
        };
        PERSON
            .captures_iter(text)
            .filter_map(|captures| {
                let mut names = captures[1].split_whitespace();
                let first_name = names.next()?.to_string();
                let last_name = names
                    .next_back()
                    .map_or_else(|| first_name.clone(), str::to_string);
                Some(Person {
                    first_name,
                    last_name,
                    role: captures[2].trim().to_string(),
                    email: captures[3].to_string(),
                })
            })
            .collect()
    }

    /// Three digit core curriculum codes.
    #[must_use]
    pub fn core_flags(&self) -> Vec<String> {
        self.field("Core:")
            .map(|text| {
                CORE_FLAG
                    .find_iter(text)
                    .map(|flag| flag.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ContactHours {
    /// Finds the first `(L-L) F` group in a course description.
    #[must_use]
    pub fn find(description: &str) -> Option<Self> {
        CONTACT_HOURS.captures(description).map(|captures| Self {
            lecture: captures[1].to_string(),
            laboratory: captures[2].to_string(),
            frequency: captures[3].to_string(),
        })
    }
}

fn malformed(field: &str, value: &str) -> DocumentError {
    DocumentError::Malformed {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, DocumentError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| DocumentError::Date {
        value: value.to_string(),
        source,
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, DocumentError> {
    NaiveTime::parse_from_str(&value.to_uppercase(), TIME_FORMAT).map_err(|source| {
        DocumentError::Date {
            value: value.to_string(),
            source,
        }
    })
}
