//! The drop-cap layout engine.
//!
//! [CSS 2.1 § 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! "A float is a box that is shifted to the left or right on the current
//! line... content may flow along its side."
//!
//! A drop cap is a float whose height and font size are derived so that the
//! glyph's own cap height — not its full em box — spans from the cap line of
//! the paragraph's first line to the baseline of the `baseline_pos`-th line.
//! The engine reconciles the paragraph's line-box geometry with the measured
//! font metrics of both the paragraph and the drop cap into a single set of
//! inline-style mutations.

use std::collections::HashMap;

use dropcap_dom::{Document, NodeId};
use strum_macros::Display;

use super::descender::{self, DescenderClass};
use super::line::LineMetrics;
use crate::error::DropcapError;
use crate::metrics::{PixelRasterizer, probe_font_metrics};
use crate::style::values::to_px_length;
use crate::style::{ComputedStyleProvider, Direction};

/// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
///
/// "left: The element generates a block box that is floated to the left.
///  right: Similar to 'left', except the box is floated to the right."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FloatSide {
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to 'left', except the box is floated to the right."
    Right,
}

/// The inline-style properties the engine owns on a managed element.
///
/// Reset clears exactly this set; `height` and the strut deliberately
/// survive a reset, matching the engine's style contract.
const ENGINE_PROPERTIES: [&str; 5] =
    ["float", "padding", "font-size", "line-height", "margin-top"];

/// Zero length written for cleared padding and line-height.
const ZERO_PX: &str = "0px";

/// Per-element bookkeeping for managed drop caps.
#[derive(Debug, Default)]
struct ManagedState {
    /// Whether engine styling is currently applied.
    styled: bool,
    /// The strut child, created once and reused on every later layout.
    strut: Option<NodeId>,
}

/// Lays out drop caps and tracks which elements it manages.
///
/// Two states per element: **Reset** (no custom styling; entered when
/// `height_in_lines == 1 && baseline_pos == 1`) and **Styled** (float sizing
/// applied). Elements never touched by the engine are left entirely alone.
#[derive(Debug, Default)]
pub(crate) struct LayoutEngine {
    managed: HashMap<NodeId, ManagedState>,
}

impl LayoutEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Size and position one drop-cap element, or reset it.
    ///
    /// Bounds (`height_in_lines >= 1`, `baseline_pos >= 1`) are validated by
    /// the public API before dispatch. All style reads happen before any
    /// style write: mutations can invalidate the host's cached layout
    /// geometry mid-computation.
    pub(crate) fn layout_one(
        &mut self,
        doc: &mut Document,
        styles: &dyn ComputedStyleProvider,
        rasterizer: &dyn PixelRasterizer,
        target: NodeId,
        height_in_lines: u32,
        baseline_pos: u32,
    ) -> Result<(), DropcapError> {
        if height_in_lines == 1 && baseline_pos == 1 {
            // One line tall on the first baseline: no float needed, clear
            // anything we applied earlier and let the host lay it out.
            self.reset(doc, target);
            return Ok(());
        }

        let parent = doc
            .parent(target)
            .filter(|&p| doc.as_element(p).is_some())
            .ok_or_else(|| DropcapError::InvalidTarget {
                reason: "drop cap has no parent element to size against".to_string(),
            })?;

        // Reads: styles, metrics, classification. The probes mutate the
        // document transiently but never touch the target or its parent.
        let dcap_style = styles.resolved_style(doc, target);
        let par_style = styles.resolved_style(doc, parent);
        let dcap_metrics = probe_font_metrics(doc, styles, rasterizer, &dcap_style.font_family)?;
        let par_metrics = probe_font_metrics(doc, styles, rasterizer, &par_style.font_family)?;
        let line = LineMetrics::from_style(&par_style);
        let descender = descender::classify(doc, target);

        // The drop cap extends from the cap line of the first line to the
        // baseline of the nth line. Its height is the stack of n line boxes
        // minus the parts of the first and last that lie outside that span:
        // the half-leadings, the space between ascender line and cap line,
        // and the space below the nth baseline.
        let ascend =
            (par_metrics.baseline_ratio - par_metrics.cap_height_ratio) * line.font_size;

        let dcap_height = f64::from(height_in_lines) * line.line_height
            - line.leading
            - ascend
            - (1.0 - par_metrics.baseline_ratio) * line.font_size;

        // Scale so the glyph's own cap height fills the span.
        let dcap_font_size = dcap_height / dcap_metrics.cap_height_ratio;

        // Push the float down by the first line's half-leading plus the
        // cap-line-to-ascender gap, then drag it up one line box per line of
        // raise.
        let raise = f64::from(height_in_lines) - f64::from(baseline_pos);
        let vertical_offset = line.leading / 2.0 + ascend - raise * line.line_height;

        // Writes.
        let side = match dcap_style.direction {
            Direction::Rtl => FloatSide::Right,
            Direction::Ltr => FloatSide::Left,
        };
        doc.set_style_property(target, "float", side.to_string());
        doc.set_style_property(target, "padding", ZERO_PX);
        doc.set_style_property(target, "font-size", to_px_length(dcap_font_size));
        doc.set_style_property(target, "line-height", ZERO_PX);
        doc.set_style_property(target, "margin-top", to_px_length(vertical_offset));

        // A raised cap is dragged above its paragraph; push the paragraph
        // down by the same amount so the remaining text does not overlap it.
        if height_in_lines > baseline_pos {
            doc.set_style_property(
                parent,
                "margin-top",
                to_px_length(par_style.margin_top - vertical_offset),
            );
        }

        let descend_adjust = match descender {
            // Estimate the space the descender needs below the baseline.
            DescenderClass::Character => {
                dcap_font_size * (1.0 - dcap_metrics.baseline_ratio)
            }
            // Author override: grow the float to the full font size. This is
            // approximate and may overshoot.
            DescenderClass::Marker => dcap_font_size - dcap_height,
            DescenderClass::None => 0.0,
        };
        doc.set_style_property(target, "height", to_px_length(dcap_height + descend_adjust));

        // The baseline of an empty inline-block is its bottom margin edge,
        // and the float's formatting context keeps such a box from bleeding
        // outside its boundary like an anonymous inline glyph can. The strut
        // pulls the drop-cap glyph's baseline down to the bottom of the
        // cap-height span so descender compensation lines up.
        let strut = self.ensure_strut(doc, target);
        doc.set_style_property(strut, "height", to_px_length(dcap_height));

        self.managed.entry(target).or_default().styled = true;
        Ok(())
    }

    /// Clear engine styling from a previously managed element.
    ///
    /// No-op for elements this engine never styled; idempotent otherwise.
    fn reset(&mut self, doc: &mut Document, target: NodeId) {
        if let Some(state) = self.managed.get_mut(&target)
            && state.styled
        {
            for property in ENGINE_PROPERTIES {
                doc.remove_style_property(target, property);
            }
            state.styled = false;
        }
    }

    /// Get the element's strut child, creating it on first use.
    fn ensure_strut(&mut self, doc: &mut Document, target: NodeId) -> NodeId {
        let state = self.managed.entry(target).or_default();
        if let Some(strut) = state.strut {
            return strut;
        }
        let strut = doc.create_element("span");
        doc.set_style_property(strut, "display", "inline-block");
        doc.append_child(target, strut);
        if let Some(state) = self.managed.get_mut(&target) {
            state.strut = Some(strut);
        }
        strut
    }
}
