//! # Raw Submission
//!
//! The untrusted input to the validator, deserializable from either an
//! urlencoded form body or JSON. Every field is optional at this layer;
//! presence rules are enforced by [`crate::validate`].

use serde::{Deserialize, Serialize};

/// Checkbox-style indicator as delivered by a form or a JSON client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Checkbox {
    /// A JSON boolean.
    Flag(bool),
    /// A form value such as `on`, `1` or `yes`.
    Text(String),
}

impl Checkbox {
    /// Whether the box was affirmatively checked.
    pub fn is_checked(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => crate::sanitize::parse_checkbox(text),
        }
    }
}

/// An unvalidated registration form submission.
///
/// Field names follow the form's camelCase names. Course selections are
/// accepted under both `courseSelection` and the bracketed
/// `courseSelection[]` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    /// Applicant's full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Program of study.
    #[serde(default)]
    pub program: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Selected course names, possibly empty.
    #[serde(default, alias = "courseSelection[]")]
    pub course_selection: Vec<String>,
    /// Dues-paid confirmation checkbox.
    #[serde(default)]
    pub dues_paid: Option<Checkbox>,
    /// Explicit student-type discriminant (`new` or `continuing`).
    #[serde(default)]
    pub student_type: Option<String>,
    /// Admission year (new students). Presence signals a new student.
    #[serde(default)]
    pub admission_year: Option<String>,
    /// Previously attended school (new students).
    #[serde(default)]
    pub previous_school: Option<String>,
    /// Existing student id (continuing students). Presence signals a
    /// continuing student.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Current year of study (continuing students).
    #[serde(default)]
    pub year_of_study: Option<String>,
}

impl RawSubmission {
    /// Whether the dues-paid checkbox was affirmatively checked.
    /// A missing checkbox is unchecked.
    pub fn dues_paid(&self) -> bool {
        self.dues_paid.as_ref().is_some_and(Checkbox::is_checked)
    }
}
