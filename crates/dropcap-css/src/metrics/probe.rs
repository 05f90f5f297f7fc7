//! Font-metrics probing by rendering and pixel-inspecting test glyphs.
//!
//! For one font family the prober measures two ratios of the em square:
//!
//! - **baseline ratio** — the fraction above the baseline. A zero-font-size
//!   inline box's top edge sits on its parent's baseline
//!   ([CSS 2.1 § 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height)),
//!   so the offset-top of a zero-size test glyph inside a probe block of a
//!   known size measures it without any font-table access.
//! - **cap-height ratio** — the fraction between cap line and baseline
//!   ([CSS Inline Layout § 3.2](https://www.w3.org/TR/css-inline-3/#baseline-types)),
//!   found by rasterizing a capital `E` (flat top and bottom strokes) and
//!   scanning the central pixel column from both ends.
//!
//! The baseline is measured in the live document and the cap height on the
//! rasterizer's surface because a host may not position the two baselines
//! identically; using `E` for both scans cancels any such skew.

use dropcap_dom::{Document, NodeId};

use super::cache;
use super::raster::{GlyphBitmap, PixelRasterizer};
use super::FontMetrics;
use crate::error::DropcapError;
use crate::style::ComputedStyleProvider;

/// Probe block size in px. Large enough that one pixel of scan error stays
/// under 1% of the measured ratios.
pub const TEST_SIZE: f64 = 100.0;

/// Probe block size as a px length string.
const TEST_SIZE_PX: &str = "100px";

/// The zero length written on probe styles and the zero-size glyph.
const ZERO_PX: &str = "0px";

/// Text content of the probe glyph spans.
const TEST_GLYPH: &str = "X";

/// Glyph rasterized for the cap-height scan; chosen for its flat top and
/// bottom strokes.
const CAP_PROBE_GLYPH: char = 'E';

/// The transient probe markup, attached to the live document:
///
/// ```text
/// <div style="position:fixed; padding:0px; opacity:0; line-height:1;
///             font-size:100px; font-family:...">
///     <span style="font-size:0px">X</span>
///     <span>X</span>
/// </div>
/// ```
///
/// Out of flow (`position: fixed`) and invisible (`opacity: 0`) but attached,
/// because layout metrics only exist for attached boxes; `display: none`
/// would produce no box at all.
struct ProbeBlock {
    container: NodeId,
    zero_glyph: NodeId,
}

impl ProbeBlock {
    fn create(doc: &mut Document, font_family: &str) -> Self {
        let container = doc.create_element("div");
        doc.set_style_property(container, "position", "fixed");
        doc.set_style_property(container, "padding", ZERO_PX);
        doc.set_style_property(container, "opacity", "0");
        doc.set_style_property(container, "font-size", TEST_SIZE_PX);
        doc.set_style_property(container, "line-height", "1");
        doc.set_style_property(container, "font-family", font_family);
        doc.append_child(doc.root(), container);

        let zero_glyph = new_test_glyph(doc, container);
        doc.set_style_property(zero_glyph, "font-size", ZERO_PX);
        let _full_glyph = new_test_glyph(doc, container);

        Self {
            container,
            zero_glyph,
        }
    }

    /// Detach the probe markup from the document.
    fn destroy(self, doc: &mut Document) {
        doc.remove_child(doc.root(), self.container);
    }
}

fn new_test_glyph(doc: &mut Document, container: NodeId) -> NodeId {
    let span = doc.create_element("span");
    let text = doc.create_text(TEST_GLYPH);
    doc.append_child(span, text);
    doc.append_child(container, span);
    span
}

/// Compute the [`FontMetrics`] for a font family, memoized per process.
///
/// Probe nodes are created in `doc` for the duration of the call and removed
/// on every exit path, including rasterizer failure. Successful results are
/// stored in the metrics cache before returning; the rasterizer is invoked
/// only on the first probe of a family.
///
/// # Errors
/// - [`DropcapError::MetricsProbeFailed`] when the rasterizer cannot produce
///   a surface for the family;
/// - [`DropcapError::UndetectableMetric`] when the scan finds no ink, which
///   would otherwise poison later geometry with a nonsense divisor.
pub fn probe_font_metrics(
    doc: &mut Document,
    styles: &dyn ComputedStyleProvider,
    rasterizer: &dyn PixelRasterizer,
    font_family: &str,
) -> Result<FontMetrics, DropcapError> {
    if let Some(metrics) = cache::cached(font_family) {
        return Ok(metrics);
    }

    let block = ProbeBlock::create(doc, font_family);

    let baseline_ratio = styles.offset_top(doc, block.zero_glyph) / TEST_SIZE;
    let raster_result = rasterizer.rasterize(font_family, CAP_PROBE_GLYPH, TEST_SIZE);

    // Probe resources are released before any error below propagates.
    block.destroy(doc);

    let bitmap =
        raster_result.map_err(|source| DropcapError::MetricsProbeFailed { source })?;
    let cap_height_ratio = scan_cap_height_ratio(&bitmap).ok_or_else(|| {
        DropcapError::UndetectableMetric {
            font_family: font_family.to_string(),
        }
    })?;

    let metrics = FontMetrics {
        baseline_ratio,
        cap_height_ratio,
    };
    cache::store(font_family, metrics);
    Ok(metrics)
}

/// Scan the central pixel column of a rasterized `E`.
///
/// Bottom-up, the first ink row is the baseline row; top-down, the first ink
/// row is the cap-height row. The ratio spans both rows inclusive, over the
/// surface height (= the probe size). `None` when no ink is found in the
/// column.
fn scan_cap_height_ratio(bitmap: &GlyphBitmap) -> Option<f64> {
    let width = bitmap.width();
    let height = bitmap.height();
    if width == 0 || height == 0 {
        return None;
    }

    let column = width.div_ceil(2).min(width - 1);

    let baseline_row = (0..height).rev().find(|&y| bitmap.is_ink(column, y))?;
    let cap_row = (0..height).find(|&y| bitmap.is_ink(column, y))?;

    Some(f64::from(baseline_row - cap_row + 1) / f64::from(height))
}
