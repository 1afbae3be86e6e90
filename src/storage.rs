//! Reading scraped data from disk and writing the parsed records back out.

/// Scraped document and profile loading.
pub mod documents;
mod output;

pub use documents::{LoadError, collect_document_paths, load_document, load_profiles};
pub use output::{COURSES_FILE, PROFESSORS_FILE, SECTIONS_FILE, SaveError, write_registry};
