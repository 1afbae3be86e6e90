use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    CourseCode,
    requirement::{Collection, tagged},
};

/// A catalog course in one catalog year.
///
/// Courses are deduplicated by subject prefix, course number and catalog
/// year; each offering of the course in a term is a [`Section`].
///
/// [`Section`]: crate::domain::Section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier assigned when the course record is created.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Subject prefix, e.g. `CS`.
    pub subject_prefix: String,
    /// Course number, e.g. `1337`.
    pub course_number: String,
    /// Course title.
    pub title: String,
    /// Free-text catalog description.
    pub description: String,
    /// Structured enrollment requirements text, when the catalog provides it.
    pub enrollment_reqs: Option<String>,
    /// Owning school or college.
    pub school: String,
    /// Credit hours, as printed (may be a range).
    pub credit_hours: String,
    /// Undergraduate or graduate level.
    pub class_level: String,
    /// Lecture, laboratory, etc.
    pub activity_type: String,
    /// Grading basis.
    pub grading: String,
    /// The catalog system's internal identifier for the course.
    pub internal_course_number: String,
    /// Parsed prerequisites.
    #[serde(default, with = "tagged::option")]
    pub prerequisites: Option<Collection>,
    /// Parsed corequisites.
    #[serde(default, with = "tagged::option")]
    pub corequisites: Option<Collection>,
    /// Parsed requisites that may be taken before or alongside this course.
    #[serde(default, with = "tagged::option")]
    pub co_or_pre_requisites: Option<Collection>,
    /// Sections offered for this course.
    pub sections: Vec<Uuid>,
    /// Weekly lecture contact hours.
    pub lecture_contact_hours: String,
    /// Weekly laboratory contact hours.
    pub laboratory_contact_hours: String,
    /// Terms the course is offered in, e.g. `S` or `FS`.
    pub offering_frequency: String,
    /// Two digit catalog year, e.g. `23`.
    pub catalog_year: String,
}

impl Course {
    /// Creates a course with a fresh identifier and empty catalog details.
    #[must_use]
    pub fn new(code: &CourseCode, internal_course_number: String, catalog_year: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_prefix: code.subject().to_string(),
            course_number: code.number().to_string(),
            title: String::new(),
            description: String::new(),
            enrollment_reqs: None,
            school: String::new(),
            credit_hours: String::new(),
            class_level: String::new(),
            activity_type: String::new(),
            grading: String::new(),
            internal_course_number,
            prerequisites: None,
            corequisites: None,
            co_or_pre_requisites: None,
            sections: Vec::new(),
            lecture_contact_hours: String::new(),
            laboratory_contact_hours: String::new(),
            offering_frequency: String::new(),
            catalog_year,
        }
    }

    /// The key courses are deduplicated by.
    #[must_use]
    pub fn key(&self) -> CourseKey {
        CourseKey {
            subject_prefix: self.subject_prefix.clone(),
            course_number: self.course_number.clone(),
            catalog_year: self.catalog_year.clone(),
        }
    }

    /// The course code, e.g. `CS 1337`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{} {}", self.subject_prefix, self.course_number)
    }

    /// The text requisites are extracted from: the structured enrollment
    /// requirements if present, otherwise the description.
    #[must_use]
    pub fn requisite_source(&self) -> &str {
        self.enrollment_reqs.as_deref().unwrap_or(&self.description)
    }
}

/// Deduplication key for courses.
///
/// Ordered by subject, then number, then catalog year, so all catalog years of
/// one course are adjacent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseKey {
    /// Subject prefix.
    pub subject_prefix: String,
    /// Course number.
    pub course_number: String,
    /// Catalog year.
    pub catalog_year: String,
}

impl CourseKey {
    /// Creates a key for the given code in the given catalog year.
    #[must_use]
    pub fn new(code: &CourseCode, catalog_year: &str) -> Self {
        Self {
            subject_prefix: code.subject().to_string(),
            course_number: code.number().to_string(),
            catalog_year: catalog_year.to_string(),
        }
    }
}
