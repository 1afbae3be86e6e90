//! In-memory store of the courses, sections and professors of one ingestion
//! run.
//!
//! The [`Registry`] knows nothing about the filesystem. Records are stored by
//! identifier, with separate key indexes for deduplication while documents are
//! folded in and for course-number resolution while requisites are parsed.

use std::collections::{BTreeMap, HashMap};

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    Config, CourseCode,
    course::{Course, CourseKey},
    document::{self, ContactHours, DocumentError, SectionDocument},
    professor::{Professor, ProfessorKey},
    section::{Assistant, Section},
};

/// Courses, sections and professors, keyed by identifier.
#[derive(Debug, Default)]
pub struct Registry {
    courses: HashMap<Uuid, Course>,

    /// First course inserted for each key. `BTreeMap` so every catalog year
    /// of a course can be found with one range query.
    course_keys: BTreeMap<CourseKey, Uuid>,

    sections: HashMap<Uuid, Section>,

    professors: HashMap<Uuid, Professor>,

    /// First professor inserted for each name.
    professor_keys: HashMap<ProfessorKey, Uuid>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a course record as-is.
    ///
    /// A second course with the same key is stored too, so the validator can
    /// report it; lookups by key keep returning the first.
    pub fn insert_course(&mut self, course: Course) -> Uuid {
        let id = course.id;
        self.course_keys.entry(course.key()).or_insert(id);
        self.courses.insert(id, course);
        id
    }

    /// Inserts a section record as-is.
    pub fn insert_section(&mut self, section: Section) -> Uuid {
        let id = section.id;
        self.sections.insert(id, section);
        id
    }

    /// Inserts a professor record as-is.
    pub fn insert_professor(&mut self, professor: Professor) -> Uuid {
        let id = professor.id;
        self.professor_keys.entry(professor.key()).or_insert(id);
        self.professors.insert(id, professor);
        id
    }

    /// Folds one scraped section page into the registry.
    ///
    /// The course is created on first sight of its (subject, number, catalog
    /// year) and reused afterwards. A new section is always created, and its
    /// instructors are created or linked by name. Returns the new section's
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the registry untouched, if the page is
    /// missing a required field or a field is malformed.
    #[instrument(
        level = "debug",
        skip_all,
        fields(section = document.field(document::CLASS_SECTION))
    )]
    pub fn fold_document(
        &mut self,
        document: &SectionDocument,
        config: &Config,
    ) -> Result<Uuid, DocumentError> {
        let (class_number, course_number) = document.class_and_course_numbers()?;
        let session = document.academic_session()?;
        let catalog_year = session.catalog_year()?;
        let code = document.course_code()?;
        let section_number = document.section_number()?;
        let meetings = document.meetings()?;

        let course_id = match self.course_keys.get(&CourseKey::new(&code, &catalog_year)) {
            Some(id) => *id,
            None => {
                let course = new_course(document, config, &code, course_number, catalog_year);
                tracing::debug!(course = %code, year = %course.catalog_year, "created course");
                self.insert_course(course)
            }
        };

        let section_id = Uuid::new_v4();
        let mut professors = Vec::new();
        for person in document.people(document::INSTRUCTORS) {
            let key = ProfessorKey {
                first_name: person.first_name,
                last_name: person.last_name,
            };
            let existing = self
                .professor_keys
                .get(&key)
                .and_then(|id| self.professors.get_mut(id));
            if let Some(professor) = existing {
                professor.sections.push(section_id);
                professors.push(professor.id);
                continue;
            }
            let mut professor = Professor::new(key.first_name, key.last_name);
            professor.titles.push(person.role);
            professor.email = person.email;
            professor.sections.push(section_id);
            professors.push(self.insert_professor(professor));
        }

        let teaching_assistants = document
            .people(document::ASSISTANTS)
            .into_iter()
            .map(|person| Assistant {
                first_name: person.first_name,
                last_name: person.last_name,
                role: person.role,
                email: person.email,
            })
            .collect();

        self.insert_section(Section {
            id: section_id,
            section_number,
            course_reference: course_id,
            academic_session: session,
            professors,
            teaching_assistants,
            internal_class_number: class_number,
            instruction_mode: document.text("Instruction Mode:"),
            meetings,
            core_flags: document.core_flags(),
            syllabus_uri: document.text("Syllabus:"),
        });
        if let Some(course) = self.courses.get_mut(&course_id) {
            course.sections.push(section_id);
        }
        Ok(section_id)
    }

    /// Resolves a course code to an internal course number.
    ///
    /// Prefers the course in `catalog_year`; otherwise takes the most recent
    /// catalog year the course appears in.
    #[must_use]
    pub fn resolve(&self, code: &CourseCode, catalog_year: &str) -> Option<&str> {
        let exact = CourseKey::new(code, catalog_year);
        let id = self.course_keys.get(&exact).or_else(|| {
            self.course_keys
                .range(CourseKey::new(code, "")..)
                .take_while(|(key, _)| {
                    key.subject_prefix == code.subject() && key.course_number == code.number()
                })
                .last()
                .map(|(_, id)| id)
        })?;
        self.courses
            .get(id)
            .map(|course| course.internal_course_number.as_str())
    }

    /// Looks up a course by identifier.
    #[must_use]
    pub fn course(&self, id: Uuid) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Looks up a course by identifier for modification.
    pub fn course_mut(&mut self, id: Uuid) -> Option<&mut Course> {
        self.courses.get_mut(&id)
    }

    /// Looks up a section by identifier.
    #[must_use]
    pub fn section(&self, id: Uuid) -> Option<&Section> {
        self.sections.get(&id)
    }

    /// Looks up a professor by identifier.
    #[must_use]
    pub fn professor(&self, id: Uuid) -> Option<&Professor> {
        self.professors.get(&id)
    }

    /// All courses, ordered by key and then identifier.
    #[must_use]
    pub fn courses(&self) -> Vec<&Course> {
        let mut courses: Vec<_> = self.courses.values().collect();
        courses.sort_by(|a, b| a.key().cmp(&b.key()).then(a.id.cmp(&b.id)));
        courses
    }

    /// All sections, ordered by session, section number and identifier.
    #[must_use]
    pub fn sections(&self) -> Vec<&Section> {
        let mut sections: Vec<_> = self.sections.values().collect();
        sections.sort_by(|a, b| {
            a.academic_session
                .name
                .cmp(&b.academic_session.name)
                .then_with(|| a.section_number.cmp(&b.section_number))
                .then(a.id.cmp(&b.id))
        });
        sections
    }

    /// All professors, ordered by name and identifier.
    #[must_use]
    pub fn professors(&self) -> Vec<&Professor> {
        let mut professors: Vec<_> = self.professors.values().collect();
        professors.sort_by(|a, b| a.key().cmp(&b.key()).then(a.id.cmp(&b.id)));
        professors
    }

    /// Identifiers of every course, in [`Registry::courses`] order.
    #[must_use]
    pub fn course_ids(&self) -> Vec<Uuid> {
        self.courses().into_iter().map(|course| course.id).collect()
    }

    /// Number of courses.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of professors.
    #[must_use]
    pub fn professor_count(&self) -> usize {
        self.professors.len()
    }
}

fn new_course(
    document: &SectionDocument,
    config: &Config,
    code: &CourseCode,
    internal_course_number: String,
    catalog_year: String,
) -> Course {
    let mut course = Course::new(code, internal_course_number, catalog_year);
    course.title = document.text("Course Title:");
    course.description = document.text(config.description_field());
    course.enrollment_reqs = document
        .field(config.enrollment_field())
        .map(ToString::to_string);
    course.school = document.text("College:");
    course.credit_hours = document.text("Semester Credit Hours:");
    course.class_level = document.text("Class Level:");
    course.activity_type = document.text("Activity Type:");
    course.grading = document.text("Grading:");
    if let Some(contact) = ContactHours::find(&course.description) {
        course.lecture_contact_hours = contact.lecture;
        course.laboratory_contact_hours = contact.laboratory;
        course.offering_frequency = contact.frequency;
    }
    course
}
