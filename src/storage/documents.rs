use std::{
    ffi::OsStr,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::domain::{Professor, SectionDocument};

/// Errors that can occur when loading scraped data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file was not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Paths of every scraped section document under `root`, sorted.
///
/// Documents are `.json` files at any depth. The profile dump named
/// `profiles_file` is not a section document and is skipped.
#[must_use]
pub fn collect_document_paths(root: &Path, profiles_file: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("json")))
        .filter(|entry| entry.file_name() != OsStr::new(profiles_file))
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}

/// Loads one scraped section document.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a JSON object of
/// strings.
pub fn load_document(path: &Path) -> Result<SectionDocument, LoadError> {
    read_json(path)
}

/// Loads the professor profile dump `profiles_file` from `root`.
///
/// A missing dump is not an error: there are simply no profiles.
///
/// # Errors
///
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_profiles(root: &Path, profiles_file: &str) -> Result<Vec<Professor>, LoadError> {
    match read_json(&root.join(profiles_file)) {
        Ok(profiles) => Ok(profiles),
        Err(LoadError::NotFound(path)) => {
            tracing::info!("no profile dump at {}, skipping profile load", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
