use alloc::borrow::ToOwned;
use alloc::string::String;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::comment::unwrap_block;

// -----------------------------------------------------------------------------
// Patterns

/// `@param <type> [&][...]$<name> [description]`, one tag per line, at line
/// start or after a blank.
static PARAM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\S\n])@param[^\S\n]+(\S+)[^\S\n]+&?(?:\.\.\.)?\$(\w+)(.*)$")
        .expect("param tag pattern is valid")
});

// -----------------------------------------------------------------------------
// DocTag

/// The documented type and description of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// The type token exactly as written, e.g. `string` or `int|null`.
    pub doc_type: String,
    /// The remaining text of the tag line, `None` if there is none.
    pub description: Option<String>,
}

/// Documented parameters keyed by name (without the `$` sigil), in tag order.
pub type DocTagMap = IndexMap<String, DocTag>;

// -----------------------------------------------------------------------------
// param_tags

/// Collects the `@param` tags of a raw doc comment.
///
/// Each tag is read from a single line: the type is the first
/// non-whitespace token, the name the identifier after `$` (a by-reference
/// `&` or variadic `...` in front of it is accepted), and the description
/// the trimmed rest of the line. Lines that do not fit this shape are
/// skipped. When a name is documented twice the later tag wins.
///
/// # Examples
///
/// ```
/// use vc_reflector::docs::param_tags;
///
/// let tags = param_tags("/**\n * @param string $name Who to greet.\n * @param int $times\n */");
///
/// let name = &tags["name"];
/// assert_eq!(name.doc_type, "string");
/// assert_eq!(name.description.as_deref(), Some("Who to greet."));
///
/// assert_eq!(tags["times"].description, None);
/// ```
pub fn param_tags(raw: &str) -> DocTagMap {
    let body = unwrap_block(raw);
    let mut tags = DocTagMap::new();

    for caps in PARAM_TAG.captures_iter(&body) {
        let doc_type = caps[1].to_owned();
        let name = caps[2].to_owned();
        let description = caps
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        tags.insert(
            name,
            DocTag {
                doc_type,
                description,
            },
        );
    }

    tags
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::param_tags;

    #[test]
    fn single_line_block() {
        let tags = param_tags("/** @param string $name desc here */");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["name"].doc_type, "string");
        assert_eq!(tags["name"].description.as_deref(), Some("desc here"));
    }

    #[test]
    fn trailing_tag_after_prose() {
        let tags = param_tags("/** Sends mail. @param string $to Recipient */");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["to"].doc_type, "string");
        assert_eq!(tags["to"].description.as_deref(), Some("Recipient"));

        assert!(param_tags("/** Ask ops@param.io about $x */").is_empty());
    }

    #[test]
    fn reference_and_variadic_names() {
        let raw = "/**\n * @param array &$out Collected rows.\n * @param mixed ...$rest\n */";
        let tags = param_tags(raw);
        assert_eq!(tags["out"].doc_type, "array");
        assert_eq!(tags["out"].description.as_deref(), Some("Collected rows."));
        assert_eq!(tags["rest"].doc_type, "mixed");
        assert_eq!(tags["rest"].description, None);
    }

    #[test]
    fn malformed_tags_are_skipped() {
        let raw = "/**\n * @param $untyped no type given\n * @param int\n * @return int $x\n */";
        assert!(param_tags(raw).is_empty());
    }

    #[test]
    fn later_tag_wins() {
        let raw = "/**\n * @param int $a first\n * @param string $a second\n */";
        let tags = param_tags(raw);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["a"].doc_type, "string");
        assert_eq!(tags["a"].description.as_deref(), Some("second"));
    }

    #[test]
    fn union_types_and_order() {
        let raw = concat!(
            "/**\n * Summary.\n *\n * @param int|null $b\n",
            " * @param \\App\\Model $a The model.\n */",
        );
        let tags = param_tags(raw);
        let names: Vec<&str> = tags.keys().map(String::as_str).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(tags["b"].doc_type, "int|null");
        assert_eq!(tags["a"].doc_type, "\\App\\Model");
    }
}
