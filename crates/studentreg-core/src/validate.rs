//! # Registration Request Validator
//!
//! Turns a [`RawSubmission`] into a [`NormalizedRegistration`] or an ordered
//! list of [`FieldError`]s. Every rule runs; nothing short-circuits except
//! the request-method precondition in [`validate_request`].
//!
//! ## Rule order
//!
//! | # | Rule                                    | Error                              |
//! |---|-----------------------------------------|------------------------------------|
//! | 1 | full name non-empty                     | [`FieldError::FullNameRequired`]   |
//! | 2 | program non-empty                       | [`FieldError::ProgramRequired`]    |
//! | 3 | email non-empty and well-formed         | [`FieldError::InvalidEmail`]       |
//! | 4 | phone number non-empty                  | [`FieldError::PhoneNumberRequired`]|
//! | 5 | at least one course                     | [`FieldError::NoCourseSelected`]   |
//! | 6 | dues-paid checked                       | [`FieldError::DuesNotConfirmed`]   |
//! | 7 | variant rules, or the unknown catch-all | see [`StudentType`]                |

use crate::error::{FieldError, RegistrationError, ValidationErrors};
use crate::registration::{NormalizedRegistration, StudentDetails, StudentType};
use crate::sanitize::{escape_text, is_valid_email, parse_integer, sanitize_courses, sanitize_email};
use crate::submission::RawSubmission;

/// The only request method a registration may be submitted with.
pub const WRITE_METHOD: &str = "POST";

/// Validate a submission together with the method it was delivered by.
///
/// Any method other than [`WRITE_METHOD`] (compared case-insensitively) is
/// rejected before the fields are looked at.
pub fn validate_request(
    method: &str,
    raw: &RawSubmission,
) -> Result<NormalizedRegistration, RegistrationError> {
    check_method(method)?;
    validate(raw).map_err(RegistrationError::from)
}

/// Reject any method other than [`WRITE_METHOD`].
///
/// Hosts call this before reading the request body.
pub fn check_method(method: &str) -> Result<(), RegistrationError> {
    if method.eq_ignore_ascii_case(WRITE_METHOD) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidMethod {
            method: method.to_string(),
        })
    }
}

/// Validate and normalize a submission.
///
/// Pure: the same input always yields the same output.
pub fn validate(raw: &RawSubmission) -> Result<NormalizedRegistration, ValidationErrors> {
    let full_name = sanitized_text(raw.full_name.as_deref());
    let program = sanitized_text(raw.program.as_deref());
    let email = raw.email.as_deref().map(sanitize_email).unwrap_or_default();
    let phone_number = sanitized_text(raw.phone_number.as_deref());
    let courses = sanitize_courses(&raw.course_selection);
    let dues_paid = raw.dues_paid();
    let student_type = StudentType::detect(raw);

    let mut errors = Vec::new();

    if full_name.is_empty() {
        errors.push(FieldError::FullNameRequired);
    }
    if program.is_empty() {
        errors.push(FieldError::ProgramRequired);
    }
    if !is_valid_email(&email) {
        errors.push(FieldError::InvalidEmail);
    }
    if phone_number.is_empty() {
        errors.push(FieldError::PhoneNumberRequired);
    }
    // Counts submitted entries; a blank entry still counts as a selection.
    if courses.is_empty() {
        errors.push(FieldError::NoCourseSelected);
    }
    if !dues_paid {
        errors.push(FieldError::DuesNotConfirmed);
    }

    let details = match student_type {
        StudentType::New => new_student_details(raw),
        StudentType::Continuing => continuing_student_details(raw),
        StudentType::Unknown => Err(ValidationErrors(vec![FieldError::UnknownStudentType])),
    };

    match (details, ValidationErrors::from_vec(errors)) {
        (Ok(details), None) => Ok(NormalizedRegistration {
            full_name,
            program,
            email,
            phone_number,
            courses,
            dues_paid,
            details,
        }),
        (Ok(_), Some(errors)) => Err(errors),
        (Err(variant_errors), None) => Err(variant_errors),
        (Err(variant_errors), Some(errors)) => Err(errors.followed_by(variant_errors)),
    }
}

fn sanitized_text(value: Option<&str>) -> String {
    value.map(escape_text).unwrap_or_default()
}

fn required_text(value: Option<&str>, error: FieldError) -> Result<String, FieldError> {
    let text = sanitized_text(value);
    if text.is_empty() {
        Err(error)
    } else {
        Ok(text)
    }
}

fn new_student_details(raw: &RawSubmission) -> Result<StudentDetails, ValidationErrors> {
    // Zero is not an admission year.
    let admission_year = raw
        .admission_year
        .as_deref()
        .and_then(parse_integer)
        .filter(|year| *year != 0)
        .ok_or(FieldError::InvalidAdmissionYear);
    let previous_school = required_text(
        raw.previous_school.as_deref(),
        FieldError::PreviousSchoolRequired,
    );

    match (admission_year, previous_school) {
        (Ok(admission_year), Ok(previous_school)) => Ok(StudentDetails::New {
            admission_year,
            previous_school,
        }),
        (year, school) => Err(ValidationErrors(
            year.err().into_iter().chain(school.err()).collect(),
        )),
    }
}

fn continuing_student_details(raw: &RawSubmission) -> Result<StudentDetails, ValidationErrors> {
    let student_id = required_text(raw.student_id.as_deref(), FieldError::StudentIdRequired);
    let year_of_study = required_text(raw.year_of_study.as_deref(), FieldError::YearOfStudyRequired);

    match (student_id, year_of_study) {
        (Ok(student_id), Ok(year_of_study)) => Ok(StudentDetails::Continuing {
            student_id,
            year_of_study,
        }),
        (id, year) => Err(ValidationErrors(
            id.err().into_iter().chain(year.err()).collect(),
        )),
    }
}
