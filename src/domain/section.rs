use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One offering of a course in an academic session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Synthetic identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Section number within the course, e.g. `001`.
    pub section_number: String,
    /// The course this section belongs to.
    pub course_reference: Uuid,
    /// Term the section runs in.
    pub academic_session: AcademicSession,
    /// Instructors of record.
    pub professors: Vec<Uuid>,
    /// Teaching and research assistants.
    pub teaching_assistants: Vec<Assistant>,
    /// The catalog system's class number.
    pub internal_class_number: String,
    /// Face-to-face, online, hybrid, etc.
    pub instruction_mode: String,
    /// Scheduled meetings.
    pub meetings: Vec<Meeting>,
    /// Three digit core curriculum codes the section satisfies.
    pub core_flags: Vec<String>,
    /// Link to the syllabus, if published.
    pub syllabus_uri: String,
}

/// An academic term, e.g. `23F` for fall 2023.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcademicSession {
    /// Term name: two digit year followed by `F`, `S` or `U`.
    pub name: String,
    /// First day of the term, if published.
    pub start_date: Option<NaiveDate>,
    /// Last day of the term, if published.
    pub end_date: Option<NaiveDate>,
}

/// Error returned when a term name doesn't identify a catalog year.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid academic session '{0}': expected a two digit year followed by F, S or U")]
pub struct InvalidSessionError(String);

impl AcademicSession {
    /// Creates a session with no published dates.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// The catalog year the session belongs to.
    ///
    /// Catalogs start in the fall, so spring and summer terms belong to the
    /// previous year's catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the name isn't a two digit year followed by `F`,
    /// `S` or `U`.
    pub fn catalog_year(&self) -> Result<String, InvalidSessionError> {
        let invalid = || InvalidSessionError(self.name.clone());
        let year: u32 = self
            .name
            .get(0..2)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(invalid)?;
        match self.name.get(2..3) {
            Some("F") => Ok(format!("{year:02}")),
            Some("S" | "U") => {
                let previous = year.checked_sub(1).ok_or_else(invalid)?;
                Ok(format!("{previous:02}"))
            }
            _ => Err(invalid()),
        }
    }
}

/// A teaching or research assistant assigned to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assistant role, e.g. `Teaching Assistant`.
    pub role: String,
    /// Contact email.
    pub email: String,
}

/// A physical location on campus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Building code.
    pub building: String,
    /// Room number.
    pub room: String,
    /// Link to the campus map.
    pub map_uri: String,
}

/// A recurring meeting of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// First date the meeting occurs.
    pub start_date: NaiveDate,
    /// Last date the meeting occurs.
    pub end_date: NaiveDate,
    /// Weekdays the meeting occurs on, e.g. `Monday`.
    pub meeting_days: Vec<String>,
    /// Start time of each meeting.
    pub start_time: NaiveTime,
    /// End time of each meeting.
    pub end_time: NaiveTime,
    /// Delivery mode of the meeting.
    #[serde(default)]
    pub modality: String,
    /// Where the meeting takes place, if assigned.
    pub location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("23F", "23"; "fall is same year")]
    #[test_case("24S", "23"; "spring is previous year")]
    #[test_case("24U", "23"; "summer is previous year")]
    #[test_case("10S", "09"; "keeps two digits")]
    fn catalog_year_from_session(name: &str, expected: &str) {
        assert_eq!(AcademicSession::new(name).catalog_year().unwrap(), expected);
    }

    #[test_case("23W"; "unknown semester")]
    #[test_case("2F"; "short year")]
    #[test_case("F23"; "letters first")]
    #[test_case("00S"; "year underflow")]
    #[test_case(""; "empty")]
    fn catalog_year_rejects_bad_names(name: &str) {
        assert!(AcademicSession::new(name).catalog_year().is_err());
    }
}
