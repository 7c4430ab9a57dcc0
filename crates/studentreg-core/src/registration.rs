//! # Registration Records
//!
//! The student-type discriminant, the variant-specific field group, and the
//! normalized record produced by a successful validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::submission::RawSubmission;

/// Which optional field group a registration must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentType {
    /// First-time applicant: admission year and previous school.
    New,
    /// Returning student: student id and year of study.
    Continuing,
    /// No recognizable signal. Always a validation failure.
    Unknown,
}

impl StudentType {
    /// Determine the student type of a submission.
    ///
    /// An explicit, non-blank `studentType` decides on its own (`new` or
    /// `continuing`, any case; any other value is [`StudentType::Unknown`]).
    /// Otherwise the presence of `admissionYear` means new and the presence
    /// of `studentId` means continuing. When both are present the submission
    /// is treated as new.
    pub fn detect(raw: &RawSubmission) -> Self {
        if let Some(declared) = raw
            .student_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return Self::parse(declared);
        }

        match (raw.admission_year.is_some(), raw.student_id.is_some()) {
            (true, true) => {
                tracing::debug!("both admissionYear and studentId present; treating as new student");
                Self::New
            }
            (true, false) => Self::New,
            (false, true) => Self::Continuing,
            (false, false) => Self::Unknown,
        }
    }

    /// Parse a discriminant value. Unrecognized values map to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Self::New,
            "continuing" => Self::Continuing,
            _ => Self::Unknown,
        }
    }

    /// Return the wire representation of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Continuing => "continuing",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StudentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific fields of a valid registration.
///
/// Serialized with a `studentType` tag so that a flattened record reads
/// `{"studentType": "new", "admissionYear": 2024, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "studentType", rename_all = "lowercase")]
pub enum StudentDetails {
    /// Fields supplied by a new student.
    #[serde(rename_all = "camelCase")]
    New {
        /// Year of admission.
        admission_year: i32,
        /// Previously attended school (sanitized).
        previous_school: String,
    },
    /// Fields supplied by a continuing student.
    #[serde(rename_all = "camelCase")]
    Continuing {
        /// Existing student id (sanitized).
        student_id: String,
        /// Current year of study (sanitized).
        year_of_study: String,
    },
}

impl StudentDetails {
    /// The student type these details belong to. Never `Unknown`.
    pub fn student_type(&self) -> StudentType {
        match self {
            Self::New { .. } => StudentType::New,
            Self::Continuing { .. } => StudentType::Continuing,
        }
    }
}

/// A fully validated, sanitized registration.
///
/// Only produced by [`crate::validate`] when every rule passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRegistration {
    /// Applicant's full name.
    pub full_name: String,
    /// Program of study.
    pub program: String,
    /// Well-formed contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Selected courses; never empty.
    pub courses: Vec<String>,
    /// Always `true` on a valid record.
    pub dues_paid: bool,
    /// Student-type specific fields, tagged with `studentType`.
    #[serde(flatten)]
    pub details: StudentDetails,
}

impl NormalizedRegistration {
    /// The student type of this registration.
    pub fn student_type(&self) -> StudentType {
        self.details.student_type()
    }
}

/// Identifier assigned to a registration once it has been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Create a new random registration identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a registration identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
