//! Fontdue-backed implementations of the engine's host collaborators.
//!
//! [`FontHost`] answers both of the contracts the drop-cap engine consumes:
//! computed-style/used-geometry queries ([`ComputedStyleProvider`]) and glyph
//! rasterization ([`PixelRasterizer`]). Styles resolve from the document's
//! inline declarations; geometry comes from fontdue's per-face line metrics
//! with CSS half-leading applied.

use std::path::Path;

use anyhow::Result;
use dropcap_css::{
    ComputedStyleProvider, GlyphBitmap, InlineStyleResolver, LINE_HEIGHT_NORMAL_RATIO, LineHeight,
    PixelRasterizer, RasterError, ResolvedStyle,
};
use dropcap_dom::{Document, NodeId};
use image::{GrayImage, Luma};

use crate::fonts::FontStore;

/// Baseline position as a fraction of font size when no font data is
/// available.
///
/// [CSS 2.1 § 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Without a face to ask, 0.8 is a serviceable approximation for Latin text
/// faces; it is only used when the store has no font at all.
const APPROX_BASELINE_RATIO: f64 = 0.8;

/// Style and rasterization host over a [`FontStore`].
pub struct FontHost<'a> {
    store: &'a FontStore,
    resolver: InlineStyleResolver,
}

impl<'a> FontHost<'a> {
    /// Create a host over a font store.
    #[must_use]
    pub fn new(store: &'a FontStore) -> Self {
        Self {
            store,
            resolver: InlineStyleResolver::new(),
        }
    }

    /// Ascent of a family at a size, in px.
    fn ascent(&self, family: &str, font_size: f64) -> f64 {
        if font_size <= 0.0 {
            return 0.0;
        }
        self.line_extents(family, font_size)
            .map_or(APPROX_BASELINE_RATIO * font_size, |(ascent, _)| ascent)
    }

    /// `(ascent, descent)` of a family at a size, in px. Descent is
    /// reported as a positive depth below the baseline.
    #[allow(clippy::cast_possible_truncation)]
    fn line_extents(&self, family: &str, font_size: f64) -> Option<(f64, f64)> {
        let font = self.store.font_for(family)?;
        let line = font.horizontal_line_metrics(font_size as f32)?;
        Some((f64::from(line.ascent), f64::from(-line.descent)))
    }

    /// Baseline position inside a line box, measured from the box top.
    ///
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "The leading is L = line-height - AD; half the leading is added above
    /// A and the other half below D." The baseline therefore sits at
    /// half-leading + ascent.
    fn baseline_position(&self, style: &ResolvedStyle) -> f64 {
        let line_height = match style.line_height {
            LineHeight::Normal => LINE_HEIGHT_NORMAL_RATIO * style.font_size,
            LineHeight::Px(px) => px,
        };

        match self.line_extents(&style.font_family, style.font_size) {
            Some((ascent, descent)) => (line_height - (ascent + descent)) / 2.0 + ascent,
            None => {
                (line_height - style.font_size) / 2.0 + APPROX_BASELINE_RATIO * style.font_size
            }
        }
    }
}

impl ComputedStyleProvider for FontHost<'_> {
    fn resolved_style(&self, doc: &Document, node: NodeId) -> ResolvedStyle {
        self.resolver.resolve(doc, node)
    }

    /// Top offset of an inline box inside its parent's line box.
    ///
    /// The box top sits at the parent baseline minus the box's own ascent;
    /// a zero-font-size box has no ascent, so its top coincides with the
    /// parent baseline — the property the metrics prober relies on.
    fn offset_top(&self, doc: &Document, node: NodeId) -> f64 {
        let Some(parent) = doc.parent(node) else {
            return 0.0;
        };
        let style = self.resolver.resolve(doc, node);
        let parent_style = self.resolver.resolve(doc, parent);

        let baseline = self.baseline_position(&parent_style);
        baseline - self.ascent(&style.font_family, style.font_size)
    }
}

impl PixelRasterizer for FontHost<'_> {
    /// Rasterize a glyph into a surface sized width = glyph advance,
    /// height = requested size, with the glyph placed on its baseline the
    /// way a text renderer places it (baseline-relative bitmap offsets).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn rasterize(
        &self,
        font_family: &str,
        glyph: char,
        size_px: f64,
    ) -> Result<GlyphBitmap, RasterError> {
        let font = self.store.font_for(font_family).ok_or_else(|| {
            RasterError::new(format!("no font available for family '{font_family}'"))
        })?;
        let size = size_px as f32;
        let line = font.horizontal_line_metrics(size).ok_or_else(|| {
            RasterError::new(format!("font for '{font_family}' has no horizontal metrics"))
        })?;

        let (metrics, coverage) = font.rasterize(glyph, size);

        let width = metrics.advance_width.ceil().max(1.0) as u32;
        let height = size_px.ceil().max(1.0) as u32;
        let mut surface = GlyphBitmap::new(width, height);

        // fontdue reports the bitmap bounds baseline-relative with y up;
        // convert to surface rows with the baseline at the face ascent.
        let baseline_y = line.ascent.round() as i32;
        let top = baseline_y - (metrics.height as i32 + metrics.ymin);
        let left = metrics.xmin.max(0);

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let darkness = coverage[gy * metrics.width + gx];
                if darkness == 0 {
                    continue;
                }
                let px = left + gx as i32;
                let py = top + gy as i32;
                if px >= 0 && py >= 0 {
                    surface.set_darkness(px as u32, py as u32, darkness);
                }
            }
        }

        Ok(surface)
    }
}

/// Save a probe surface as a grayscale image, ink dark on white.
///
/// Diagnostic aid for inspecting what the cap-height scan saw.
///
/// # Errors
/// Returns an error if the image cannot be written to the given path.
pub fn save_probe_surface(surface: &GlyphBitmap, path: &Path) -> Result<()> {
    let width = surface.width().max(1);
    let height = surface.height().max(1);
    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Luma([255 - surface.darkness(x, y)]));
        }
    }
    img.save(path)
        .map_err(|e| anyhow::anyhow!("failed to save probe surface to '{}': {e}", path.display()))
}
