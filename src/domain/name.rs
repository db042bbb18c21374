//! Identifier sanitization
//!
//! Grade identifiers are free-form strings and can contain characters
//! that are unsafe in filenames. `valid_name` maps an identifier to a
//! name made of ASCII letters, digits, underscores and dashes only.

/// Returns a filename-safe version of `name`
///
/// A name without any ASCII letter is prefixed with `Task_` first, so the
/// result always contains at least one letter. Every character outside
/// `[A-Za-z0-9_-]` is replaced with an underscore.
pub fn valid_name(name: &str) -> String {
    let name = if name.chars().any(|c| c.is_ascii_alphabetic()) {
        name.to_string()
    } else {
        format!("Task_{}", name)
    };

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
