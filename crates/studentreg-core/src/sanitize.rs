//! # Input Sanitization
//!
//! Converts untrusted form text into a form that is safe to render as HTML
//! without changing what a valid value means.
//!
//! - Free text (names, program, phone, school, ids) is HTML-escaped.
//! - Email addresses are stripped of characters that can never appear in an
//!   address; a well-formed address passes through unchanged.
//! - Checkbox and integer parsing follow the lenient conventions of HTML
//!   forms (`on`, `yes`, `1`, `true`; optional sign, no leading zeros).

use validator::ValidateEmail;

/// HTML-escape a value and trim surrounding whitespace.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with entities. Nothing is removed,
/// so the escaped value always decodes back to the trimmed input.
pub fn escape_text(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Characters, beyond ASCII letters and digits, that may appear in an email.
const EMAIL_PUNCTUATION: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Strip every character that is not permitted in an email address.
pub fn sanitize_email(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_PUNCTUATION.contains(*c))
        .collect()
}

/// Standard email format check (RFC 5322 local part, hostname or literal domain).
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.validate_email()
}

/// Interpret a checkbox-style text value.
///
/// `1`, `true`, `on` and `yes` (any case, surrounding whitespace ignored) are
/// truthy. Everything else, including the empty string, is falsy.
pub fn parse_checkbox(input: &str) -> bool {
    matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Parse a strict decimal integer as typed into a form.
///
/// Accepts an optional leading `+` or `-`, then one or more ASCII digits with
/// no leading zeros (a lone `0` is allowed). Surrounding whitespace is
/// ignored. Returns `None` for anything else.
///
/// The range is deliberately narrowed to `i32`: admission years are stored
/// in an `INTEGER` column, so larger values are rejected here rather than at
/// insert time.
pub fn parse_integer(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    trimmed.parse::<i32>().ok()
}

/// Sanitize a course list entry by entry.
///
/// The output has one entry per input entry, in the same order. Unsafe
/// characters are escaped; no entry is ever dropped, blank ones included.
pub fn sanitize_courses<S: AsRef<str>>(courses: &[S]) -> Vec<String> {
    courses
        .iter()
        .map(|course| escape_text(course.as_ref()))
        .collect()
}
