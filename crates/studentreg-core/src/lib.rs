#![deny(missing_docs)]

//! # studentreg-core: Registration Request Validation
//!
//! Pure validation and normalization of student registration submissions.
//! The crate performs no I/O: a [`RawSubmission`] goes in, and either a
//! [`NormalizedRegistration`] or an ordered list of [`FieldError`]s comes out.
//! Hosting (HTTP, persistence) lives in `studentreg-api`.
//!
//! ## Pipeline
//!
//! ```text
//! method check → sanitize scalars → sanitize courses → parse dues checkbox
//!   → detect StudentType → run every rule (no short-circuit) → record | errors
//! ```
//!
//! ## Design Principles
//!
//! 1. **All-or-nothing.** A [`NormalizedRegistration`] only exists when no
//!    rule failed. Errors are never returned alongside a record.
//!
//! 2. **Every failure is reported.** Rules run in a fixed order and all
//!    failures are collected, so the order of [`ValidationErrors`] is stable.
//!
//! 3. **Variant fields are a tagged union.** [`StudentDetails`] carries the
//!    fields of exactly one student type; the unknown type has no details
//!    and can never be normalized.

pub mod error;
pub mod registration;
pub mod sanitize;
pub mod submission;
pub mod validate;

pub use error::{FieldError, RegistrationError, ValidationErrors};
pub use registration::{NormalizedRegistration, RegistrationId, StudentDetails, StudentType};
pub use submission::{Checkbox, RawSubmission};
pub use validate::{check_method, validate, validate_request, WRITE_METHOD};
