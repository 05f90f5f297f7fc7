//! Resolved styles and the computed-style collaborator contract.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! The layout engine never inspects raw declarations; it consumes a
//! [`ResolvedStyle`] — the handful of used values drop-cap geometry depends
//! on — from a [`ComputedStyleProvider`]. Hosts with a full style system
//! implement the trait over their own cascade; the bundled
//! [`InlineStyleResolver`] resolves from the document's inline styles with
//! inheritance, which is all the engine's own probes and tests require.

pub mod values;

use dropcap_dom::{Document, NodeId};
use serde::Serialize;
use strum_macros::Display;

use values::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, parse_px_length};

/// [§ 3.3 'direction'](https://www.w3.org/TR/css-writing-modes-4/#direction)
///
/// "This property specifies the inline base direction or directionality of
/// any bidi paragraph."
///
/// Only the float-direction decision consumes this; no bidi resolution is
/// performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// "Left-to-right directionality."
    #[default]
    Ltr,
    /// "Right-to-left directionality."
    Rtl,
}

/// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
///
/// The used line-height of a style: the `normal` keyword, or a resolved px
/// length. `normal` is resolved to a px value only inside
/// [`crate::layout::LineMetrics`], using
/// [`values::LINE_HEIGHT_NORMAL_RATIO`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value
    /// based on the font of the element."
    Normal,
    /// A resolved length in px.
    Px(f64),
}

/// The resolved style values the drop-cap engine reads from an element.
///
/// [§ 4.5 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// "The computed value is the result of resolving the specified value...
/// generally absolutizing it in preparation for inheritance."
///
/// Lengths are px. All reads happen before any style write within one
/// layout call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    /// Effective font family, quotes stripped.
    pub font_family: String,
    /// Used font size in px.
    pub font_size: f64,
    /// Used line-height.
    pub line_height: LineHeight,
    /// Inline base direction; decides the float side.
    pub direction: Direction,
    /// Used margin-top in px (non-inherited; 0 when unset).
    pub margin_top: f64,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE_PX,
            line_height: LineHeight::Normal,
            direction: Direction::Ltr,
            margin_top: 0.0,
        }
    }
}

/// The computed-style and used-geometry queries the engine asks of its host.
///
/// Both answers come from the same place in any real host — the layout
/// engine that owns the document — so they share one trait. The
/// `offset_top` query exists for the metrics prober: the top offset of a
/// zero-font-size inline box coincides with its parent's baseline
/// ([CSS 2.1 § 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height)),
/// which is how the baseline ratio is measured without any font-table
/// access.
pub trait ComputedStyleProvider {
    /// Resolve the effective style values for a node.
    fn resolved_style(&self, doc: &Document, node: NodeId) -> ResolvedStyle;

    /// Distance in px from the top border edge of a node's offset parent to
    /// the node's own top edge, after layout.
    fn offset_top(&self, doc: &Document, node: NodeId) -> f64;
}

/// Resolves styles from the document's inline declarations.
///
/// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// "Some properties are inherited from an ancestor element to its
/// descendants."
///
/// Font family, font size, line-height and direction inherit; margin-top
/// does not. Unset properties fall back to the UA defaults. This covers the
/// probe markup the engine builds for itself; hosts with author stylesheets
/// resolve through their own cascade instead.
#[derive(Debug, Clone, Default)]
pub struct InlineStyleResolver;

impl InlineStyleResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve the style values for a node from inline declarations.
    #[must_use]
    pub fn resolve(&self, doc: &Document, node: NodeId) -> ResolvedStyle {
        let font_size = self
            .inherited(doc, node, "font-size")
            .and_then(parse_px_length)
            .unwrap_or(DEFAULT_FONT_SIZE_PX);

        let line_height = self
            .inherited(doc, node, "line-height")
            .map_or(LineHeight::Normal, |raw| {
                resolve_line_height(raw, font_size)
            });

        let font_family = self
            .inherited(doc, node, "font-family")
            .map_or_else(|| DEFAULT_FONT_FAMILY.to_string(), strip_family_quotes);

        let direction = match self.inherited(doc, node, "direction") {
            Some(value) if value.eq_ignore_ascii_case("rtl") => Direction::Rtl,
            _ => Direction::Ltr,
        };

        let margin_top = doc
            .style_property(node, "margin-top")
            .and_then(parse_px_length)
            .unwrap_or(0.0);

        ResolvedStyle {
            font_family,
            font_size,
            line_height,
            direction,
            margin_top,
        }
    }

    /// Look a property up on the node, then up the ancestor chain.
    fn inherited<'doc>(
        &self,
        doc: &'doc Document,
        node: NodeId,
        property: &str,
    ) -> Option<&'doc str> {
        doc.style_property(node, property).or_else(|| {
            doc.ancestors(node)
                .find_map(|ancestor| doc.style_property(ancestor, property))
        })
    }
}

/// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
///
/// "`<number>`: The used value is this number multiplied by the element's
/// own font size."
fn resolve_line_height(raw: &str, font_size: f64) -> LineHeight {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("normal") {
        return LineHeight::Normal;
    }
    if let Ok(multiplier) = raw.parse::<f64>() {
        return LineHeight::Px(multiplier * font_size);
    }
    match parse_px_length(raw) {
        Some(px) => LineHeight::Px(px),
        None => LineHeight::Normal,
    }
}

/// Strip the quotes from a quoted `font-family` value.
///
/// [§ 3.1](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
/// "Font family names other than generic families must... be quoted as
/// strings."
fn strip_family_quotes(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_string()
}
