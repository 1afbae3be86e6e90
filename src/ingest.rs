//! The ingestion pipeline.
//!
//! Ingestion runs in two phases separated by a barrier. First every scraped
//! document is folded into a [`Registry`]; only once every record exists are
//! requisites parsed, course by course and in parallel, since requisite text
//! may name any course in the catalog.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{Config, Registry, validation},
    requisite::{self, ParseEnv, Requisites},
    storage,
};

/// Settings for one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Directory holding the scraped section documents.
    pub input: PathBuf,
    /// Directory the output files are written to.
    pub output: PathBuf,
    /// Configuration file. Defaults to `config.toml` in the input directory.
    pub config: Option<PathBuf>,
    /// Skip the integrity checks before writing output.
    pub skip_validation: bool,
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Courses written.
    pub courses: usize,
    /// Sections written.
    pub sections: usize,
    /// Professors written.
    pub professors: usize,
    /// Documents that could not be loaded or folded.
    pub skipped_documents: usize,
}

impl Summary {
    fn new(registry: &Registry, skipped_documents: usize) -> Self {
        Self {
            courses: registry.course_count(),
            sections: registry.section_count(),
            professors: registry.professor_count(),
            skipped_documents,
        }
    }
}

/// Loads the configuration for a run.
///
/// An explicit path must exist and parse. Without one, `config.toml` in the
/// input directory is used if present.
///
/// # Errors
///
/// Returns an error if an explicit configuration file can't be loaded.
pub fn load_config(input: &Path, explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(Config::load_or_default(input)),
    }
}

/// Builds a registry from the profile dump and every section document under
/// `input`.
///
/// Documents that can't be read or are missing required fields are logged
/// and skipped. Returns the registry and the number of skipped documents.
///
/// # Errors
///
/// Returns an error if the profile dump exists but can't be loaded.
#[instrument(level = "debug", skip(config))]
pub fn build_registry(input: &Path, config: &Config) -> anyhow::Result<(Registry, usize)> {
    let mut registry = Registry::new();

    let profiles = storage::load_profiles(input, config.profiles_file())
        .context("failed to load professor profiles")?;
    for professor in profiles {
        registry.insert_professor(professor);
    }

    let paths = storage::collect_document_paths(input, config.profiles_file());
    let documents: Vec<_> = paths
        .par_iter()
        .map(|path| (path, storage::load_document(path)))
        .collect();

    let mut skipped = 0;
    for (path, document) in documents {
        let folded = document
            .map_err(anyhow::Error::from)
            .and_then(|document| {
                registry
                    .fold_document(&document, config)
                    .map_err(anyhow::Error::from)
            });
        if let Err(e) = folded {
            tracing::warn!("skipping {}: {e}", path.display());
            skipped += 1;
        }
    }

    tracing::info!(
        courses = registry.course_count(),
        sections = registry.section_count(),
        professors = registry.professor_count(),
        skipped,
        "documents loaded"
    );
    Ok((registry, skipped))
}

/// Parses the requisites of every course in the registry and stores them on
/// the courses.
#[instrument(level = "debug", skip_all)]
pub fn parse_requisites(registry: &mut Registry, config: &Config) {
    let ids = registry.course_ids();
    let parsed: Vec<(Uuid, Requisites)> = {
        let registry = &*registry;
        let env = ParseEnv {
            registry,
            catalog_year: "",
            default_grade: config.default_minimum_grade(),
        };
        ids.par_iter()
            .filter_map(|id| {
                let course = registry.course(*id)?;
                Some((*id, requisite::extract(course, env)))
            })
            .collect()
    };

    let count = parsed.len();
    for (id, requisites) in parsed {
        if let Some(course) = registry.course_mut(id) {
            requisites.apply(course);
        }
    }
    tracing::info!(courses = count, "requisites parsed");
}

/// Runs the full pipeline: load, parse requisites, validate and write.
///
/// # Errors
///
/// Returns an error if the configuration or profiles can't be loaded, if
/// validation fails, or if the output can't be written.
#[instrument(skip_all, fields(input = %options.input.display()))]
pub fn run(options: &Options) -> anyhow::Result<Summary> {
    let config = load_config(&options.input, options.config.as_deref())?;
    let (mut registry, skipped) = build_registry(&options.input, &config)?;

    parse_requisites(&mut registry, &config);

    if options.skip_validation {
        tracing::info!("validation skipped");
    } else {
        validation::validate(&registry)?;
    }

    storage::write_registry(&registry, &options.output, config.pretty_output)
        .with_context(|| format!("failed to write output to {}", options.output.display()))?;

    Ok(Summary::new(&registry, skipped))
}
