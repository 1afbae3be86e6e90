use std::{fmt, ops::Deref};

use non_empty_string::NonEmptyString;

/// A validated subject prefix: two to four uppercase letters (`CS`, `MATH`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubjectPrefix(NonEmptyString);

impl SubjectPrefix {
    /// Creates a new `SubjectPrefix` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSubjectError` if the string is not two to four
    /// uppercase ASCII letters.
    pub fn new(s: String) -> Result<Self, InvalidSubjectError> {
        if !(2..=4).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidSubjectError(s));
        }
        let non_empty = NonEmptyString::new(s).map_err(InvalidSubjectError)?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for SubjectPrefix {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a subject prefix isn't two to four uppercase letters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid subject prefix '{0}': must be 2-4 uppercase letters (A-Z)")]
pub struct InvalidSubjectError(String);

/// A catalog course code such as `CS 1337`.
///
/// The number is four characters drawn from digits and `V` (variable-credit
/// courses, e.g. `CS 4V98`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseCode {
    subject: SubjectPrefix,
    number: String,
}

impl CourseCode {
    /// Creates a course code from a subject and a number.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is malformed.
    pub fn new(subject: &str, number: &str) -> Result<Self, Error> {
        let subject = SubjectPrefix::new(subject.to_string())?;
        if number.len() != 4 || !number.chars().all(|c| c.is_ascii_digit() || c == 'V') {
            return Err(Error::Number(number.to_string()));
        }
        Ok(Self {
            subject,
            number: number.to_string(),
        })
    }

    /// Creates a course code from catalog text, normalizing case first.
    ///
    /// Requisite text is inconsistent about capitalization (`cs 1337`), so
    /// this is the constructor used at the parsing boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is malformed after normalization.
    pub fn normalized(subject: &str, number: &str) -> Result<Self, Error> {
        Self::new(&subject.trim().to_uppercase(), &number.trim().to_uppercase())
    }

    /// The subject prefix.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// The course number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The code without a separating space, e.g. `CS1337`.
    #[must_use]
    pub fn compact(&self) -> String {
        format!("{}{}", self.subject, self.number)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

/// Errors that can occur while building a course code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The number is not four characters of digits or `V`.
    #[error("Invalid course number '{0}': expected four digits or 'V'")]
    Number(String),

    /// The subject prefix is malformed.
    #[error(transparent)]
    Subject(#[from] InvalidSubjectError),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("CS", "1337"; "two letter subject")]
    #[test_case("MATH", "2413"; "four letter subject")]
    #[test_case("CS", "4V98"; "variable credit")]
    fn accepts_valid_codes(subject: &str, number: &str) {
        let code = CourseCode::new(subject, number).unwrap();
        assert_eq!(code.subject(), subject);
        assert_eq!(code.number(), number);
    }

    #[test_case("cs"; "lowercase subject")]
    #[test_case("C"; "short subject")]
    #[test_case("CSEEE"; "long subject")]
    #[test_case("C5"; "digit in subject")]
    fn rejects_bad_subjects(subject: &str) {
        assert!(matches!(
            CourseCode::new(subject, "1337"),
            Err(Error::Subject(_))
        ));
    }

    #[test_case("133"; "short number")]
    #[test_case("1337L"; "suffixed number")]
    #[test_case("13X7"; "letter in number")]
    #[test_case("4v98"; "lowercase variable credit")]
    fn rejects_bad_numbers(number: &str) {
        assert!(matches!(CourseCode::new("CS", number), Err(Error::Number(_))));
    }

    #[test_case(" cs ", " 4v98", "CS 4V98"; "mixed case and whitespace")]
    #[test_case("Math", "2413", "MATH 2413"; "title case subject")]
    fn normalized_accepts_catalog_text(subject: &str, number: &str, expected: &str) {
        let code = CourseCode::normalized(subject, number).unwrap();
        assert_eq!(code.to_string(), expected);
    }

    #[test]
    fn display_and_compact() {
        let code = CourseCode::new("CS", "1337").unwrap();
        assert_eq!(code.to_string(), "CS 1337");
        assert_eq!(code.compact(), "CS1337");
    }

    #[test]
    fn error_display() {
        let error = CourseCode::new("CS", "12").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "Invalid course number '12': expected four digits or 'V'"
        );

        let error = CourseCode::new("cs", "1337").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "Invalid subject prefix 'cs': must be 2-4 uppercase letters (A-Z)"
        );
    }
}
