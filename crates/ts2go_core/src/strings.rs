//! Pure string helpers shared by the frontend and the emitter.

/// Upper-case the first character of `input`, leaving the rest untouched.
///
/// This is the exported-name convention of the target language; it is applied unconditionally
/// and does not check for collisions.
///
/// ## Examples
/// ```rust
/// use ts2go_core::strings::first_letter_to_upper;
///
/// assert_eq!(first_letter_to_upper("info"), "Info");
/// assert_eq!(first_letter_to_upper(""), "");
/// ```
pub fn first_letter_to_upper(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Return `true` if the first character of `input` is an ASCII digit.
pub fn starts_with_digit(input: &str) -> bool {
    input.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Return `true` if `input` is wrapped in matching single or double quotes.
pub fn is_quoted(input: &str) -> bool {
    input.len() >= 2
        && ((input.starts_with('"') && input.ends_with('"')) || (input.starts_with('\'') && input.ends_with('\'')))
}
