//! The typed requirement tree produced by the requisite parser.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One node of a requirement expression tree.
///
/// Serialized with a `type` discriminator. [`Requirement::Throwaway`] only
/// exists during parsing to keep back-reference numbering stable; it is never
/// persisted and serializing one is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Requirement {
    /// Completion of a course with at least the given grade.
    Course {
        /// Internal course number of the referenced course.
        class_reference: String,
        /// Lowest passing grade, e.g. `C-`.
        minimum_grade: String,
    },
    /// Enrollment in a specific section.
    Section {
        /// Identifier of the referenced section.
        section_reference: Uuid,
    },
    /// A minimum score on an exam.
    Exam {
        /// Identifier of the referenced exam.
        exam_reference: String,
        /// Lowest accepted score.
        minimum_score: f64,
    },
    /// Declared major.
    Major {
        /// Name of the major.
        major: String,
    },
    /// Declared minor.
    Minor {
        /// Name of the minor.
        minor: String,
    },
    /// Minimum grade point average.
    Gpa {
        /// Lowest accepted GPA.
        minimum: f64,
        /// Subset of coursework the GPA is computed over; empty for overall.
        subset: String,
    },
    /// Consent from someone, e.g. an instructor or department.
    Consent {
        /// Who grants consent.
        granter: String,
    },
    /// Text that was not recognized, kept verbatim.
    Other {
        /// Literal requisite text.
        description: String,
        /// Additional condition text, empty when unused.
        condition: String,
    },
    /// A group of requirements of which some number must be met.
    Collection(Collection),
    /// A number of credit hours, optionally restricted to a set of courses.
    ///
    /// Catalog text does not say whether a bare count is exact or a floor, so
    /// both bounds are kept and neither is assumed from the other.
    Hours {
        /// Fewest hours accepted, if stated.
        minimum: Option<u32>,
        /// Most hours accepted, if stated.
        maximum: Option<u32>,
        /// Courses the hours must come from; empty for any course.
        options: Vec<Requirement>,
    },
    /// Credit can be received for only one of the choices.
    Choice {
        /// The mutually exclusive options.
        #[serde(with = "tagged")]
        choices: Collection,
    },
    /// A cap on the credit hours a course may be repeated for.
    Limit {
        /// Maximum total credit hours.
        max_hours: u32,
    },
    /// Completion of a core curriculum area.
    Core {
        /// Three digit core area code, e.g. `090`.
        core_flag: String,
        /// Required hours in the area; absent when the whole area is required.
        hours: Option<u32>,
    },
    /// Recognized noise. Dropped before output.
    #[serde(skip)]
    Throwaway,
}

impl Requirement {
    /// A course requirement.
    #[must_use]
    pub fn course(class_reference: impl Into<String>, minimum_grade: impl Into<String>) -> Self {
        Self::Course {
            class_reference: class_reference.into(),
            minimum_grade: minimum_grade.into(),
        }
    }

    /// A major requirement.
    #[must_use]
    pub fn major(major: impl Into<String>) -> Self {
        Self::Major {
            major: major.into(),
        }
    }

    /// A minor requirement.
    #[must_use]
    pub fn minor(minor: impl Into<String>) -> Self {
        Self::Minor {
            minor: minor.into(),
        }
    }

    /// A free-text requirement with no condition.
    #[must_use]
    pub fn other(description: impl Into<String>) -> Self {
        Self::Other {
            description: description.into(),
            condition: String::new(),
        }
    }

    /// Whether this node is a throwaway.
    #[must_use]
    pub const fn is_throwaway(&self) -> bool {
        matches!(self, Self::Throwaway)
    }

    /// The serialized discriminator of this node.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Course { .. } => "course",
            Self::Section { .. } => "section",
            Self::Exam { .. } => "exam",
            Self::Major { .. } => "major",
            Self::Minor { .. } => "minor",
            Self::Gpa { .. } => "gpa",
            Self::Consent { .. } => "consent",
            Self::Other { .. } => "other",
            Self::Collection(_) => "collection",
            Self::Hours { .. } => "hours",
            Self::Choice { .. } => "choice",
            Self::Limit { .. } => "limit",
            Self::Core { .. } => "core",
            Self::Throwaway => "throwaway",
        }
    }
}

impl From<Collection> for Requirement {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

/// A named group of requirements, `required` of which must be satisfied.
///
/// `required == 1` is a logical OR, `required == options.len()` a logical AND,
/// anything in between is "choose N of M".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// What produced the group: `AND`, `OR` or `REQUISITES`.
    pub name: String,
    /// How many options must be satisfied.
    pub required: usize,
    /// The grouped requirements, in source order.
    pub options: Vec<Requirement>,
}

impl Collection {
    /// All options must be satisfied.
    #[must_use]
    pub fn and(options: Vec<Requirement>) -> Self {
        Self {
            name: "AND".to_string(),
            required: options.len(),
            options,
        }
    }

    /// Any one option must be satisfied.
    #[must_use]
    pub fn or(options: Vec<Requirement>) -> Self {
        Self {
            name: "OR".to_string(),
            required: options.len().min(1),
            options,
        }
    }

    /// The sentences of one requisite category, all of which apply.
    #[must_use]
    pub fn requisites(options: Vec<Requirement>) -> Self {
        Self {
            name: "REQUISITES".to_string(),
            required: options.len(),
            options,
        }
    }
}

/// Serde adapter writing a standalone [`Collection`] in the same
/// `{"type": "collection", ...}` form it has inside a [`Requirement`].
///
/// Use with `#[serde(with = "tagged")]`, or `tagged::option` for optional
/// fields.
pub mod tagged {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Collection;

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Borrowed<'a> {
        Collection(&'a Collection),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Owned {
        Collection(Collection),
    }

    /// Serializes a collection with its `type` tag.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<S: Serializer>(
        collection: &Collection,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        Borrowed::Collection(collection).serialize(serializer)
    }

    /// Deserializes a tagged collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the value isn't a `collection` object.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Collection, D::Error> {
        let Owned::Collection(collection) = Owned::deserialize(deserializer)?;
        Ok(collection)
    }

    /// The same adapter for `Option<Collection>`; `None` is `null`.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::{Borrowed, Collection, Owned};

        /// Serializes an optional collection with its `type` tag.
        ///
        /// # Errors
        ///
        /// Returns the serializer's error.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            collection: &Option<Collection>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            collection
                .as_ref()
                .map(Borrowed::Collection)
                .serialize(serializer)
        }

        /// Deserializes an optional tagged collection.
        ///
        /// # Errors
        ///
        /// Returns an error if the value is neither `null` nor a `collection`
        /// object.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Collection>, D::Error> {
            let owned = Option::<Owned>::deserialize(deserializer)?;
            Ok(owned.map(|Owned::Collection(collection)| collection))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_type_discriminator() {
        let requirement = Requirement::course("000061", "C");
        let value = serde_json::to_value(&requirement).unwrap();
        assert_eq!(
            value,
            json!({"type": "course", "class_reference": "000061", "minimum_grade": "C"})
        );
    }

    #[test]
    fn collection_flattens_into_tagged_object() {
        let tree = Requirement::from(Collection::or(vec![
            Requirement::major("Math"),
            Requirement::minor("Math"),
        ]));
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "collection",
                "name": "OR",
                "required": 1,
                "options": [
                    {"type": "major", "major": "Math"},
                    {"type": "minor", "minor": "Math"},
                ],
            })
        );
    }

    #[test]
    fn optional_bounds_serialize_as_null() {
        let hours = Requirement::Hours {
            minimum: Some(30),
            maximum: None,
            options: Vec::new(),
        };
        let value = serde_json::to_value(&hours).unwrap();
        assert_eq!(
            value,
            json!({"type": "hours", "minimum": 30, "maximum": null, "options": []})
        );
    }

    #[test]
    fn throwaway_cannot_be_serialized() {
        assert!(serde_json::to_string(&Requirement::Throwaway).is_err());
    }

    #[test]
    fn deserializes_persisted_tree() {
        let text = r#"{"type":"choice","choices":{"type":"collection","name":"AND","required":2,"options":[
            {"type":"gpa","minimum":2.5,"subset":""},
            {"type":"limit","max_hours":9}]}}"#;
        let requirement: Requirement = serde_json::from_str(text).unwrap();
        let Requirement::Choice { choices } = requirement else {
            panic!("expected a choice");
        };
        assert_eq!(choices.required, 2);
        assert_eq!(choices.options[1], Requirement::Limit { max_hours: 9 });
    }

    #[test]
    fn choice_keeps_the_collection_tag() {
        let choice = Requirement::Choice {
            choices: Collection::or(vec![Requirement::major("CS"), Requirement::major("SE")]),
        };
        let value = serde_json::to_value(&choice).unwrap();
        assert_eq!(value["type"], "choice");
        assert_eq!(value["choices"]["type"], "collection");
        assert_eq!(value["choices"]["required"], 1);

        let back: Requirement = serde_json::from_value(value).unwrap();
        assert_eq!(back, choice);
    }

    #[test]
    fn untagged_choices_are_rejected() {
        let text = r#"{"type":"choice","choices":{"name":"OR","required":1,"options":[]}}"#;
        assert!(serde_json::from_str::<Requirement>(text).is_err());
    }

    #[test]
    fn junction_constructors_set_required() {
        let options = vec![Requirement::major("CS"), Requirement::major("SE")];
        assert_eq!(Collection::and(options.clone()).required, 2);
        assert_eq!(Collection::or(options.clone()).required, 1);
        assert_eq!(Collection::requisites(options).required, 2);
        assert_eq!(Collection::or(Vec::new()).required, 0);
    }

    #[test]
    fn kind_matches_discriminator() {
        let requirement = Requirement::Core {
            core_flag: "090".to_string(),
            hours: None,
        };
        let value = serde_json::to_value(&requirement).unwrap();
        assert_eq!(value["type"], requirement.kind());
        assert!(!requirement.is_throwaway());
        assert!(Requirement::Throwaway.is_throwaway());
    }
}
