//! Line-based comment stripping for generated Ruby files.

/// Line comment marker for Ruby.
pub const COMMENT_MARKER: char = '#';

/// Returns true when the line is blank or holds only a comment.
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Removes every blank or comment-only line.
///
/// Only whole lines are considered; a `#` after code (including Ruby
/// `#{...}` interpolation) is left alone. A trailing newline on the input
/// is kept.
#[must_use]
pub fn strip_comment_lines(text: &str) -> String {
    let mut out = text
        .lines()
        .filter(|line| !is_comment_line(line))
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_header_comments() {
        let input = "# This file was generated by GoReleaser. DO NOT EDIT.\n# typed: false\n# frozen_string_literal: true\ncask \"sentrie\" do\nend\n";
        assert_eq!(strip_comment_lines(input), "cask \"sentrie\" do\nend\n");
    }

    #[test]
    fn test_strips_indented_comments_and_blank_lines() {
        let input = "class Sentrie < Formula\n  # Indented comment\n\n   \n  desc \"x\"\nend";
        assert_eq!(strip_comment_lines(input), "class Sentrie < Formula\n  desc \"x\"\nend");
    }

    #[test]
    fn test_keeps_mid_line_markers() {
        let input = "  system \"#{bin}/sentrie\", \"version\" # smoke test\n";
        assert_eq!(strip_comment_lines(input), input);
    }

    #[test]
    fn test_handles_crlf() {
        let input = "# header\r\ncask \"sentrie\" do\r\nend\r\n";
        assert_eq!(strip_comment_lines(input), "cask \"sentrie\" do\nend\n");
    }

    #[test]
    fn test_all_comments_yields_empty() {
        assert_eq!(strip_comment_lines("# a\n# b\n"), "");
        assert_eq!(strip_comment_lines(""), "");
    }

    #[test]
    fn test_is_comment_line() {
        assert!(is_comment_line("# x"));
        assert!(is_comment_line("    #x"));
        assert!(is_comment_line("   "));
        assert!(!is_comment_line("  binary \"sentrie\" # pinned"));
    }
}
