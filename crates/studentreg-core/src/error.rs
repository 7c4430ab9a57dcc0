//! # Validation Errors
//!
//! Structured error types for registration validation, built with `thiserror`.
//!
//! Each [`FieldError`] renders the exact user-facing sentence shown by the
//! registration form. [`ValidationErrors`] keeps them in the order the rules
//! were evaluated so that the joined display string is stable.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single failed validation rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// `fullName` is missing or blank.
    #[error("Full Name is required.")]
    FullNameRequired,

    /// `program` is missing or blank.
    #[error("Program of Study is required.")]
    ProgramRequired,

    /// `email` is missing, blank, or not a well-formed address.
    #[error("A valid Email Address is required.")]
    InvalidEmail,

    /// `phoneNumber` is missing or blank.
    #[error("Phone Number is required.")]
    PhoneNumberRequired,

    /// `courseSelection` has no usable entry.
    #[error("At least one course must be selected.")]
    NoCourseSelected,

    /// `duesPaid` was not affirmatively checked.
    #[error("Confirmation of dues payment is required.")]
    DuesNotConfirmed,

    /// `admissionYear` is missing or not an integer (new students).
    #[error("Admission Year is required and must be a valid number.")]
    InvalidAdmissionYear,

    /// `previousSchool` is missing or blank (new students).
    #[error("Previous School Attended is required.")]
    PreviousSchoolRequired,

    /// `studentId` is missing or blank (continuing students).
    #[error("Student ID is required.")]
    StudentIdRequired,

    /// `yearOfStudy` is missing or blank (continuing students).
    #[error("Year of Study is required.")]
    YearOfStudyRequired,

    /// Neither student-type signal was recognized. Replaces every
    /// variant-specific rule.
    #[error("Invalid student type detected.")]
    UnknownStudentType,
}

impl FieldError {
    /// Machine-readable name of the submission field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::FullNameRequired => "fullName",
            Self::ProgramRequired => "program",
            Self::InvalidEmail => "email",
            Self::PhoneNumberRequired => "phoneNumber",
            Self::NoCourseSelected => "courseSelection",
            Self::DuesNotConfirmed => "duesPaid",
            Self::InvalidAdmissionYear => "admissionYear",
            Self::PreviousSchoolRequired => "previousSchool",
            Self::StudentIdRequired => "studentId",
            Self::YearOfStudyRequired => "yearOfStudy",
            Self::UnknownStudentType => "studentType",
        }
    }

    /// Whether this is the student-type catch-all rather than a field rule.
    pub fn is_variant_error(&self) -> bool {
        matches!(self, Self::UnknownStudentType)
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered, non-empty collection of failed rules.
///
/// Only constructed by the validator when at least one rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub(crate) Vec<FieldError>);

impl ValidationErrors {
    /// Wrap a list of failures. Returns `None` for an empty list.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// The failures in evaluation order.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Number of failures (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a specific rule failed.
    pub fn contains(&self, error: FieldError) -> bool {
        self.0.contains(&error)
    }

    /// The user-facing message of every failure, in order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Append another set of failures after this one.
    pub fn followed_by(mut self, other: ValidationErrors) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Join every message into a single display string.
    pub fn join(&self, delimiter: &str) -> String {
        self.messages().join(delimiter)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Top-level outcome of rejecting a registration request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The request did not use the write method. Short-circuits validation.
    #[error("Invalid request method.")]
    InvalidMethod {
        /// The method that was actually used.
        method: String,
    },

    /// One or more validation rules failed.
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
}

impl RegistrationError {
    /// The user-facing messages for this rejection, in order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidMethod { .. } => vec![self.to_string()],
            Self::Invalid(errors) => errors.messages(),
        }
    }
}
