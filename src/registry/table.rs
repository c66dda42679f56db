//! Element Table
//!
//! The compile-time registry of WebRelease2 elements, plus the fixed word
//! lists used by attribute validation: reserved keywords, comparison and
//! logical operators, and the built-in condition functions.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::spec::{ElementKind, ElementSpec};

const NO_ATTRS: &[&str] = &[];

/// All known elements, keyed by full tag name.
static ELEMENTS: LazyLock<HashMap<&'static str, ElementSpec>> = LazyLock::new(|| {
    let specs = [
        // Conditional rendering
        ElementSpec {
            name: "wr-if",
            required: &["condition"],
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-then",
            required: NO_ATTRS,
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: Some("wr-if"),
        },
        ElementSpec {
            name: "wr-else",
            required: NO_ATTRS,
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: Some("wr-if"),
        },
        ElementSpec {
            name: "wr-switch",
            required: &["value"],
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-case",
            required: &["value"],
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: Some("wr-switch"),
        },
        ElementSpec {
            name: "wr-default",
            required: NO_ATTRS,
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: Some("wr-switch"),
        },
        ElementSpec {
            name: "wr-conditional",
            required: NO_ATTRS,
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-cond",
            required: &["condition"],
            optional: NO_ATTRS,
            kind: ElementKind::Container,
            required_ancestor: Some("wr-conditional"),
        },
        // Iteration
        ElementSpec {
            name: "wr-for",
            required: &["variable"],
            optional: &["list", "string", "times"],
            kind: ElementKind::Container,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-break",
            required: NO_ATTRS,
            optional: &["condition"],
            kind: ElementKind::SelfClosing,
            required_ancestor: Some("wr-for"),
        },
        // Variable manipulation
        ElementSpec {
            name: "wr-variable",
            required: &["name"],
            optional: &["value"],
            kind: ElementKind::SelfClosing,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-append",
            required: &["variable"],
            optional: &["value"],
            kind: ElementKind::SelfClosing,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-clear",
            required: &["variable"],
            optional: NO_ATTRS,
            kind: ElementKind::SelfClosing,
            required_ancestor: None,
        },
        // Generation control
        ElementSpec {
            name: "wr-error",
            required: NO_ATTRS,
            optional: &["condition", "message"],
            kind: ElementKind::Container,
            required_ancestor: None,
        },
        ElementSpec {
            name: "wr-return",
            required: NO_ATTRS,
            optional: &["value"],
            kind: ElementKind::SelfClosing,
            required_ancestor: None,
        },
    ];
    specs.into_iter().map(|spec| (spec.name, spec)).collect()
});

/// Element base names, without the `wr-` prefix. Variable and loop-variable
/// names must not collide with these.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "if",
    "then",
    "else",
    "switch",
    "case",
    "default",
    "conditional",
    "cond",
    "for",
    "break",
    "variable",
    "append",
    "clear",
    "error",
    "return",
];

/// Comparison and logical operators accepted inside `condition` values.
/// Two-character operators come first so containment checks see them before
/// their one-character prefixes.
pub const CONDITION_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "<", ">", "&&", "||"];

/// Built-in functions commonly used in `condition` values. The set is not
/// exhaustive; unknown names are still accepted because templates may call
/// functions defined by the site.
pub const CONDITION_FUNCTIONS: &[&str] = &[
    "isNull",
    "notNull",
    "length",
    "exists",
    "contains",
    "startsWith",
    "endsWith",
];

/// Look up the specification for a full tag name such as "wr-if".
///
/// Lookup is case-sensitive; WebRelease2 tag names are lowercase.
pub fn lookup(name: &str) -> Option<&'static ElementSpec> {
    ELEMENTS.get(name)
}

/// Check whether `word` collides with a reserved keyword, ignoring ASCII
/// case.
pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_elements() {
        let spec = lookup("wr-if").unwrap();
        assert_eq!(spec.required, &["condition"]);
        assert!(spec.is_container());

        let spec = lookup("wr-break").unwrap();
        assert!(spec.is_self_closing());
        assert_eq!(spec.required_ancestor, Some("wr-for"));
    }

    #[test]
    fn test_lookup_unknown_element() {
        assert!(lookup("wr-bogus").is_none());
        assert!(lookup("div").is_none());
        // Lookup expects the full tag name.
        assert!(lookup("if").is_none());
    }

    #[test]
    fn test_control_elements_take_optional_attributes() {
        assert_eq!(lookup("wr-break").unwrap().optional, &["condition"]);
        assert_eq!(lookup("wr-return").unwrap().optional, &["value"]);
        assert_eq!(lookup("wr-error").unwrap().optional, &["condition", "message"]);
    }

    #[test]
    fn test_every_element_base_name_is_reserved() {
        for name in ELEMENTS.keys() {
            let base = name.trim_start_matches("wr-");
            assert!(is_reserved_keyword(base), "{base} missing from keywords");
        }
    }

    #[test]
    fn test_reserved_keyword_is_case_insensitive() {
        assert!(is_reserved_keyword("IF"));
        assert!(is_reserved_keyword("Switch"));
        assert!(!is_reserved_keyword("page"));
    }

    #[test]
    fn test_ancestor_requirements() {
        assert_eq!(lookup("wr-case").unwrap().required_ancestor, Some("wr-switch"));
        assert_eq!(lookup("wr-default").unwrap().required_ancestor, Some("wr-switch"));
        assert_eq!(lookup("wr-cond").unwrap().required_ancestor, Some("wr-conditional"));
        assert_eq!(lookup("wr-then").unwrap().required_ancestor, Some("wr-if"));
        assert_eq!(lookup("wr-for").unwrap().required_ancestor, None);
    }
}
