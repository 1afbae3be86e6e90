//! Domain models for catalog ingestion.
//!
//! This module contains the catalog records (courses, sections, professors),
//! the requirement tree attached to courses, the in-memory registry that
//! holds one run's records, and configuration.

/// Requirement tree model.
pub mod requirement;
pub use requirement::{Collection, Requirement};

mod config;
pub use config::Config;

/// Course codes and subject prefixes.
pub mod code;
pub use code::{CourseCode, Error as CodeError, SubjectPrefix};

mod course;
pub use course::{Course, CourseKey};

mod section;
pub use section::{AcademicSession, Assistant, InvalidSessionError, Location, Meeting, Section};

mod professor;
pub use professor::{Professor, ProfessorKey};

/// Scraped section pages.
pub mod document;
pub use document::{DocumentError, SectionDocument};

mod registry;
pub use registry::Registry;

/// Cross-record integrity checks.
pub mod validation;
pub use validation::{ValidationError, ValidationIssue};
