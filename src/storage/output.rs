use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::domain::Registry;

/// File the courses are written to.
pub const COURSES_FILE: &str = "Courses.json";
/// File the sections are written to.
pub const SECTIONS_FILE: &str = "Sections.json";
/// File the professors are written to.
pub const PROFESSORS_FILE: &str = "Professors.json";

/// Errors that can occur when writing output.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// An I/O error occurred.
    #[error("failed to write {path}: {source}")]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize {path}: {source}")]
    Json {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Writes every record in the registry to `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or a file can't be written.
pub fn write_registry(registry: &Registry, out_dir: &Path, pretty: bool) -> Result<(), SaveError> {
    fs::create_dir_all(out_dir).map_err(|source| SaveError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    write_json(&out_dir.join(COURSES_FILE), &registry.courses(), pretty)?;
    write_json(&out_dir.join(SECTIONS_FILE), &registry.sections(), pretty)?;
    write_json(&out_dir.join(PROFESSORS_FILE), &registry.professors(), pretty)?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<(), SaveError> {
    let io_error = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let result = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };
    result.map_err(|source| SaveError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}
