use alloc::borrow::ToOwned;
use alloc::string::String;
use std::sync::LazyLock;

use regex::Regex;

// -----------------------------------------------------------------------------
// Patterns

/// The `/**` opener and the `*/` closer of a block comment.
static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*/\*\*|\*/\s*\z").expect("delimiter pattern is valid"));

/// A leading alignment asterisk together with the blanks around it.
static ALIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]*\*+[^\S\n]?").expect("alignment pattern is valid"));

/// An `@tag` at line start or after a blank, up to the end of that line only.
static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\S\n])@\S+.*$").expect("tag pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// -----------------------------------------------------------------------------
// Block helpers

/// Removes the comment delimiters and the per-line alignment asterisks,
/// keeping line structure intact.
pub(super) fn unwrap_block(raw: &str) -> String {
    let inner = DELIMITERS.replace_all(raw, "");
    ALIGNMENT.replace_all(&inner, "").into_owned()
}

// -----------------------------------------------------------------------------
// doc_comment

/// Returns a member's documentation comment, optionally reduced to its prose.
///
/// - `None` stays `None`: a member without a comment has no documentation,
///   which is different from an empty one.
/// - Without `strip_tags` the raw block is returned byte for byte.
/// - With `strip_tags` the delimiters and alignment asterisks are removed,
///   and every `@tag` is cut off together with the rest of its line. Then
///   whitespace runs collapse into single spaces and the result is trimmed.
///   An `@` glued to a preceding word, as in an e-mail address, is prose.
///
/// Tag removal works one line at a time. A tag whose text wraps onto a
/// following line without its own `@` only loses its first line; the
/// continuation stays in the output as ordinary prose.
///
/// # Examples
///
/// ```
/// use vc_reflector::docs::doc_comment;
///
/// let raw = "/**\n * Summary line.\n * @param string $x desc\n */";
///
/// assert_eq!(doc_comment(Some(raw), false).as_deref(), Some(raw));
/// assert_eq!(doc_comment(Some(raw), true).as_deref(), Some("Summary line."));
/// assert_eq!(doc_comment(None, true), None);
/// ```
pub fn doc_comment(raw: Option<&str>, strip_tags: bool) -> Option<String> {
    let raw = raw?;
    if !strip_tags {
        return Some(raw.to_owned());
    }

    let body = unwrap_block(raw);
    let prose = TAG_LINE.replace_all(&body, "");
    let collapsed = WHITESPACE.replace_all(&prose, " ");
    Some(collapsed.trim().to_owned())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{doc_comment, unwrap_block};

    #[test]
    fn multi_paragraph_prose() {
        let raw = concat!(
            "/**\n     * First line\n     *   continues here.\n",
            "     *\n     * Second paragraph.\n     */",
        );
        assert_eq!(
            doc_comment(Some(raw), true).as_deref(),
            Some("First line continues here. Second paragraph.")
        );
    }

    #[test]
    fn every_tag_line_is_removed() {
        let raw = concat!(
            "/**\n * Does things.\n * @param int $a first\n",
            " * @return void\n * @deprecated\n */",
        );
        assert_eq!(doc_comment(Some(raw), true).as_deref(), Some("Does things."));
    }

    #[test]
    fn wrapped_tag_keeps_continuation() {
        let raw = "/**\n * Summary.\n * @param string $x a long\n *   wrapped description\n */";
        assert_eq!(
            doc_comment(Some(raw), true).as_deref(),
            Some("Summary. wrapped description")
        );
    }

    #[test]
    fn inline_at_sign_is_prose() {
        let raw = "/** Mail admin@example.com for help. */";
        assert_eq!(
            doc_comment(Some(raw), true).as_deref(),
            Some("Mail admin@example.com for help.")
        );
    }

    #[test]
    fn trailing_tag_in_one_line_block() {
        let raw = "/** Sends mail. @return void */";
        assert_eq!(doc_comment(Some(raw), true).as_deref(), Some("Sends mail."));

        let raw = "/**\n * Sends mail to admin@example.com. @see Mailer\n * Retries once.\n */";
        assert_eq!(
            doc_comment(Some(raw), true).as_deref(),
            Some("Sends mail to admin@example.com. Retries once.")
        );
    }

    #[test]
    fn single_line_tag_only() {
        let raw = "/** @param string $name desc here */";
        assert_eq!(doc_comment(Some(raw), true).as_deref(), Some(""));
        assert_eq!(doc_comment(Some(raw), false).as_deref(), Some(raw));
    }

    #[test]
    fn unwrap_keeps_lines() {
        let raw = "/**\n * a\n * b\n */";
        assert_eq!(unwrap_block(raw), "\na\nb\n ");
    }
}
