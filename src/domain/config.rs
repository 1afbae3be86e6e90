use std::path::Path;

use serde::Deserialize;

/// Configuration for a coursebook ingestion run.
///
/// Controls which catalog fields carry requisite text, how bare course
/// references are graded, and how output is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Label of the structured enrollment requirements field.
    ///
    /// When a course has this field, requisites are read from it instead of
    /// the free-text description.
    enrollment_field: String,

    /// Label of the free-text course description field.
    description_field: String,

    /// Minimum grade recorded for a course reference that does not state one.
    default_minimum_grade: String,

    /// File name of the optional professor profile dump in the input
    /// directory.
    profiles_file: String,

    /// Whether output JSON is pretty-printed.
    pub pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enrollment_field: default_enrollment_field(),
            description_field: default_description_field(),
            default_minimum_grade: default_minimum_grade(),
            profiles_file: default_profiles_file(),
            pretty_output: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `config.toml` from the given directory, falling back to the
    /// default configuration if it is missing or invalid.
    #[must_use]
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join("config.toml");
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {e}", path.display());
            Self::default()
        })
    }

    /// Label of the structured enrollment requirements field.
    #[must_use]
    pub fn enrollment_field(&self) -> &str {
        &self.enrollment_field
    }

    /// Label of the free-text description field.
    #[must_use]
    pub fn description_field(&self) -> &str {
        &self.description_field
    }

    /// Grade recorded for course references without an explicit minimum.
    #[must_use]
    pub fn default_minimum_grade(&self) -> &str {
        &self.default_minimum_grade
    }

    /// File name of the professor profile dump.
    #[must_use]
    pub fn profiles_file(&self) -> &str {
        &self.profiles_file
    }
}

fn default_enrollment_field() -> String {
    "Enrollment Reqs:".to_string()
}

fn default_description_field() -> String {
    "Description:".to_string()
}

fn default_minimum_grade() -> String {
    "F".to_string()
}

fn default_profiles_file() -> String {
    "Profiles.json".to_string()
}

const fn default_pretty_output() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_enrollment_field")]
        enrollment_field: String,

        #[serde(default = "default_description_field")]
        description_field: String,

        #[serde(default = "default_minimum_grade")]
        default_minimum_grade: String,

        #[serde(default = "default_profiles_file")]
        profiles_file: String,

        #[serde(default = "default_pretty_output")]
        pretty_output: bool,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                enrollment_field,
                description_field,
                default_minimum_grade,
                profiles_file,
                pretty_output,
            } => Self {
                enrollment_field,
                description_field,
                default_minimum_grade: default_minimum_grade.to_uppercase(),
                profiles_file,
                pretty_output,
            },
        }
    }
}
