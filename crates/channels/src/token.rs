//! Filesystem-safe token suffixes for channel artifacts.

/// Renders a channel version string as a token usable in filenames and
/// Homebrew identifiers.
///
/// The string is lowercased, every run of characters outside `[a-z0-9]`
/// becomes a single `_`, and leading/trailing underscores are trimmed.
///
/// ```
/// use tapgen_channels::token_suffix;
///
/// assert_eq!(token_suffix("1.2.3-alpha.1"), "1_2_3_alpha_1");
/// assert_eq!(token_suffix("1.0.0---alpha---"), "1_0_0_alpha");
/// ```
#[must_use]
pub fn token_suffix(version: &str) -> String {
    let mut token = String::with_capacity(version.len());
    let mut pending_separator = false;

    for c in version.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.push(c);
        } else {
            pending_separator = true;
        }
    }

    token
}
