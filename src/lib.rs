//! Course catalog ingestion and enrollment requisite parsing.
//!
//! Scraped section pages are folded into course, section and professor
//! records. The free-text enrollment requirements of each course are then
//! parsed into typed [`Requirement`] trees.

pub mod domain;
pub use domain::{
    Collection, Config, Course, CourseCode, Professor, Registry, Requirement, Section,
    ValidationError,
};

pub mod requisite;
pub use requisite::{ParseEnv, parse_requisite_text, parse_requisites};

pub mod storage;

pub mod ingest;
pub use ingest::{Options, Summary};
