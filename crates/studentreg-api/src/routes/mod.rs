//! # API Route Modules
//!
//! - `registrations`: student registration intake (form and JSON) and
//!   read-back of stored registrations.

pub mod registrations;
