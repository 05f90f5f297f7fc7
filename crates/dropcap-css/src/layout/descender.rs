//! Descender classification for drop-cap letters.
//!
//! A float sized to the cap-height span clips any stroke below the baseline,
//! so letters with descenders need extra float height. Classification is a
//! pure function over the element's rendered text content and an optional
//! author marker class; it is deterministic and holds no state.

use dropcap_dom::{Document, NodeId};

/// Class name an author puts on a drop cap to force descender treatment for
/// characters outside the automatic set (swash capitals, non-Latin letters).
pub const DESCENDER_MARKER_CLASS: &str = "dropcap-descender";

/// Letters whose standard forms descend below the baseline.
const DESCENDING_CHARS: &str = "gjpqQ";

/// How a drop-cap letter was classified for descender compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescenderClass {
    /// The text content is a single character from the known descending set.
    /// Takes priority over the author marker.
    Character,
    /// The author marked the element with [`DESCENDER_MARKER_CLASS`].
    Marker,
    /// No descender treatment applies.
    None,
}

/// Classify an element's drop-cap letter.
#[must_use]
pub fn classify(doc: &Document, node: NodeId) -> DescenderClass {
    if is_descending_char(doc, node) {
        return DescenderClass::Character;
    }
    if has_descender_marker(doc, node) {
        return DescenderClass::Marker;
    }
    DescenderClass::None
}

/// True when the rendered text is exactly one character from the descending
/// set.
fn is_descending_char(doc: &Document, node: NodeId) -> bool {
    let text = doc.text_content(node);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => DESCENDING_CHARS.contains(c),
        _ => false,
    }
}

/// True when the author marked the element for descender treatment.
fn has_descender_marker(doc: &Document, node: NodeId) -> bool {
    doc.as_element(node)
        .is_some_and(|element| element.has_class(DESCENDER_MARKER_CLASS))
}
