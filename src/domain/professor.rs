use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::section::{Location, Meeting};

/// An instructor, deduplicated by first and last name.
///
/// Records come either from a section's instructor listing or from a
/// previously scraped profile dump; fields the source doesn't provide default
/// to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Identifier assigned when the record is created.
    #[serde(rename = "_id", default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Academic titles.
    #[serde(default)]
    pub titles: Vec<String>,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,
    /// Office location.
    #[serde(default)]
    pub office: Location,
    /// Link to the public profile page.
    #[serde(default)]
    pub profile_uri: String,
    /// Link to a profile photo.
    #[serde(default)]
    pub image_uri: String,
    /// Published office hours.
    #[serde(default)]
    pub office_hours: Vec<Meeting>,
    /// Sections taught.
    #[serde(default)]
    pub sections: Vec<Uuid>,
}

impl Professor {
    /// Creates a professor with a fresh identifier.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            titles: Vec::new(),
            email: String::new(),
            phone_number: String::new(),
            office: Location::default(),
            profile_uri: String::new(),
            image_uri: String::new(),
            office_hours: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// The key professors are deduplicated by while ingesting.
    #[must_use]
    pub fn key(&self) -> ProfessorKey {
        ProfessorKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Full display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Deduplication key for professors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfessorKey {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_dump_fills_missing_fields() {
        let professor: Professor = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","email":"ada@example.edu"}"#,
        )
        .unwrap();
        assert_eq!(professor.name(), "Ada Lovelace");
        assert_eq!(professor.email, "ada@example.edu");
        assert!(professor.sections.is_empty());
        assert!(professor.profile_uri.is_empty());
    }
}
