//! Element Specification Types
//!
//! Static descriptions of the WebRelease2 template elements: which attributes
//! they take and whether they enclose a body.

/// How an element relates to its closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Encloses a body and requires a matching `</wr-*>` tag.
    Container,
    /// Never takes a closing tag; written `<wr-* .../>` or as a bare tag.
    SelfClosing,
}

/// Specification of one known `wr-*` element.
///
/// One instance exists per element name, in the compile-time table in
/// [`super::table`]. Instances are never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpec {
    /// Full tag name, e.g. "wr-if".
    pub name: &'static str,
    /// Attributes that must be present on every occurrence.
    pub required: &'static [&'static str],
    /// Attributes that may be present.
    pub optional: &'static [&'static str],
    pub kind: ElementKind,
    /// Element that must appear somewhere on the open-element stack for this
    /// element to be legal, e.g. `wr-case` requires `wr-switch`.
    pub required_ancestor: Option<&'static str>,
}

impl ElementSpec {
    pub fn is_container(&self) -> bool {
        self.kind == ElementKind::Container
    }

    pub fn is_self_closing(&self) -> bool {
        self.kind == ElementKind::SelfClosing
    }

    /// Check whether `attribute` is in the union of required and optional
    /// attributes for this element.
    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.required.contains(&attribute) || self.optional.contains(&attribute)
    }

    /// Required attributes that do not appear in `found`, in declaration
    /// order.
    pub fn missing_required(&self, found: &[(String, String)]) -> Vec<&'static str> {
        self.required
            .iter()
            .filter(|name| !found.iter().any(|(k, _)| k == *name))
            .copied()
            .collect()
    }
}
