//! Cross-record integrity checks run once every document has been folded in.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::Registry;

/// One integrity violation found in a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Two courses share subject, number and catalog year.
    #[error("duplicate course {code} (catalog year {catalog_year}): {first} and {second}")]
    DuplicateCourse {
        /// `SUBJ NUMBER`.
        code: String,
        /// Shared catalog year.
        catalog_year: String,
        /// Identifier of one course.
        first: Uuid,
        /// Identifier of the other course.
        second: Uuid,
    },

    /// Two sections share section number, course and academic session.
    #[error("duplicate section {section_number} ({session}): {first} and {second}")]
    DuplicateSection {
        /// Shared section number.
        section_number: String,
        /// Shared session name.
        session: String,
        /// Identifier of one section.
        first: Uuid,
        /// Identifier of the other section.
        second: Uuid,
    },

    /// Two professors share first name, last name and profile link.
    #[error("duplicate professor {name}: {first} and {second}")]
    DuplicateProfessor {
        /// Shared full name.
        name: String,
        /// Identifier of one professor.
        first: Uuid,
        /// Identifier of the other professor.
        second: Uuid,
    },

    /// A course lists a section that doesn't exist.
    #[error("course {course} references nonexistent section {section}")]
    MissingSection {
        /// Identifier of the course.
        course: Uuid,
        /// Dangling section identifier.
        section: Uuid,
    },

    /// A course lists a section that points at a different course.
    #[error(
        "course {course} references section {section}, which references course {section_course}"
    )]
    SectionCourseMismatch {
        /// Identifier of the course.
        course: Uuid,
        /// Identifier of the section.
        section: Uuid,
        /// Course the section points at.
        section_course: Uuid,
    },

    /// A section points at a course that doesn't exist.
    #[error("section {section} references nonexistent course {course}")]
    MissingCourse {
        /// Identifier of the section.
        section: Uuid,
        /// Dangling course identifier.
        course: Uuid,
    },

    /// A section points at a course that doesn't list it.
    #[error("section {section} references course {course}, which does not list it")]
    CourseMissingBacklink {
        /// Identifier of the section.
        section: Uuid,
        /// Identifier of the course.
        course: Uuid,
    },

    /// A section lists a professor that doesn't exist.
    #[error("section {section} references nonexistent professor {professor}")]
    MissingProfessor {
        /// Identifier of the section.
        section: Uuid,
        /// Dangling professor identifier.
        professor: Uuid,
    },

    /// A section lists a professor that doesn't list it back.
    #[error("section {section} references professor {professor}, who does not list it")]
    ProfessorMissingBacklink {
        /// Identifier of the section.
        section: Uuid,
        /// Identifier of the professor.
        professor: Uuid,
    },
}

/// Validation failed; carries every issue found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed with {} issue(s){}", .issues.len(), list(.issues))]
pub struct ValidationError {
    /// The violations, courses first, then sections, then professors.
    pub issues: Vec<ValidationIssue>,
}

/// One indented line per issue.
fn list(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|issue| format!("\n  {issue}")).collect()
}

/// Collects every integrity violation in the registry.
#[must_use]
pub fn issues(registry: &Registry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    course_issues(registry, &mut issues);
    section_issues(registry, &mut issues);
    professor_issues(registry, &mut issues);
    issues
}

/// Checks the registry's integrity.
///
/// # Errors
///
/// Returns every violation found, if any.
pub fn validate(registry: &Registry) -> Result<(), ValidationError> {
    let issues = issues(registry);
    if issues.is_empty() {
        tracing::info!("validation passed");
        Ok(())
    } else {
        tracing::info!(issues = issues.len(), "validation failed");
        Err(ValidationError { issues })
    }
}

fn course_issues(registry: &Registry, issues: &mut Vec<ValidationIssue>) {
    let courses = registry.courses();
    for (i, first) in courses.iter().enumerate() {
        for second in &courses[i + 1..] {
            if first.key() == second.key() {
                issues.push(ValidationIssue::DuplicateCourse {
                    code: first.code(),
                    catalog_year: first.catalog_year.clone(),
                    first: first.id,
                    second: second.id,
                });
            }
        }
    }

    for course in &courses {
        for &section in &course.sections {
            match registry.section(section) {
                None => issues.push(ValidationIssue::MissingSection {
                    course: course.id,
                    section,
                }),
                Some(found) if found.course_reference != course.id => {
                    issues.push(ValidationIssue::SectionCourseMismatch {
                        course: course.id,
                        section,
                        section_course: found.course_reference,
                    });
                }
                Some(_) => {}
            }
        }
    }
}

fn section_issues(registry: &Registry, issues: &mut Vec<ValidationIssue>) {
    let sections = registry.sections();
    for (i, first) in sections.iter().enumerate() {
        for second in &sections[i + 1..] {
            if first.section_number == second.section_number
                && first.course_reference == second.course_reference
                && first.academic_session == second.academic_session
            {
                issues.push(ValidationIssue::DuplicateSection {
                    section_number: first.section_number.clone(),
                    session: first.academic_session.name.clone(),
                    first: first.id,
                    second: second.id,
                });
            }
        }
    }

    for section in &sections {
        match registry.course(section.course_reference) {
            None => issues.push(ValidationIssue::MissingCourse {
                section: section.id,
                course: section.course_reference,
            }),
            Some(course) if !course.sections.contains(&section.id) => {
                issues.push(ValidationIssue::CourseMissingBacklink {
                    section: section.id,
                    course: course.id,
                });
            }
            Some(_) => {}
        }

        for &professor in &section.professors {
            match registry.professor(professor) {
                None => issues.push(ValidationIssue::MissingProfessor {
                    section: section.id,
                    professor,
                }),
                Some(found) if !found.sections.contains(&section.id) => {
                    issues.push(ValidationIssue::ProfessorMissingBacklink {
                        section: section.id,
                        professor,
                    });
                }
                Some(_) => {}
            }
        }
    }
}

fn professor_issues(registry: &Registry, issues: &mut Vec<ValidationIssue>) {
    let professors = registry.professors();
    for (i, first) in professors.iter().enumerate() {
        for second in &professors[i + 1..] {
            if first.first_name == second.first_name
                && first.last_name == second.last_name
                && first.profile_uri == second.profile_uri
            {
                issues.push(ValidationIssue::DuplicateProfessor {
                    name: first.name(),
                    first: first.id,
                    second: second.id,
                });
            }
        }
    }
}
