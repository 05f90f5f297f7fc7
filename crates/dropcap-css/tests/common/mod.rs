//! Shared fake collaborators for dropcap-css integration tests.
//!
//! The fakes script what a real host would measure: per-family baseline
//! offsets for the style provider and per-family pixel grids for the
//! rasterizer. Geometry becomes fully deterministic.

#![allow(dead_code, clippy::new_without_default)]

use std::cell::Cell;
use std::collections::HashMap;

use dropcap_css::{
    ComputedStyleProvider, GlyphBitmap, InlineStyleResolver, NoNativeInitialLetter,
    PixelRasterizer, RasterError, ResolvedStyle, TEST_SIZE, to_px_length,
};
use dropcap_dom::{Document, NodeId};

/// Float comparison tolerance for geometry assertions.
pub const EPSILON: f64 = 1e-9;

/// True when two px quantities agree within [`EPSILON`].
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Style host that resolves inline styles and scripts per-family baseline
/// offsets for the probe's zero-size glyph.
pub struct FakeHost {
    resolver: InlineStyleResolver,
    baseline_ratios: HashMap<String, f64>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            resolver: InlineStyleResolver::new(),
            baseline_ratios: HashMap::new(),
        }
    }

    /// Script the baseline ratio reported for a family's probe block.
    pub fn with_baseline(mut self, family: &str, baseline_ratio: f64) -> Self {
        let _ = self
            .baseline_ratios
            .insert(family.to_string(), baseline_ratio);
        self
    }
}

impl ComputedStyleProvider for FakeHost {
    fn resolved_style(&self, doc: &Document, node: NodeId) -> ResolvedStyle {
        self.resolver.resolve(doc, node)
    }

    /// The probe queries the zero-size glyph inside its probe block; answer
    /// with the scripted baseline offset of the block's font family.
    fn offset_top(&self, doc: &Document, node: NodeId) -> f64 {
        let family = doc
            .parent(node)
            .and_then(|parent| doc.style_property(parent, "font-family"))
            .unwrap_or_default();
        self.baseline_ratios
            .get(family)
            .copied()
            .unwrap_or(0.8)
            * TEST_SIZE
    }
}

/// Rasterizer returning scripted pixel grids, counting invocations.
pub struct ScriptedRasterizer {
    surfaces: HashMap<String, GlyphBitmap>,
    calls: Cell<usize>,
}

impl ScriptedRasterizer {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    /// Script the surface returned for a family.
    pub fn with_surface(mut self, family: &str, surface: GlyphBitmap) -> Self {
        let _ = self.surfaces.insert(family.to_string(), surface);
        self
    }

    /// How many times `rasterize` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PixelRasterizer for ScriptedRasterizer {
    fn rasterize(
        &self,
        font_family: &str,
        _glyph: char,
        _size_px: f64,
    ) -> Result<GlyphBitmap, RasterError> {
        self.calls.set(self.calls.get() + 1);
        self.surfaces
            .get(font_family)
            .cloned()
            .ok_or_else(|| RasterError::new(format!("no scripted surface for '{font_family}'")))
    }
}

/// Build a surface with ink on every column from `cap_row` through
/// `baseline_row` inclusive, like the flat strokes of an `E`.
pub fn column_glyph(height: u32, cap_row: u32, baseline_row: u32) -> GlyphBitmap {
    let width = 60;
    let mut surface = GlyphBitmap::new(width, height);
    for y in cap_row..=baseline_row {
        for x in 0..width {
            surface.set_darkness(x, y, u8::MAX);
        }
    }
    surface
}

/// A ready-to-layout scene: `<p><span>letter</span>text</p>` plus fakes
/// scripted with the standard test metrics
/// (paragraph `{0.8, 0.7}`, drop cap `{0.75, 0.65}`).
pub struct Fixture {
    pub doc: Document,
    pub paragraph: NodeId,
    pub dcap: NodeId,
    pub host: FakeHost,
    pub rasterizer: ScriptedRasterizer,
    pub caps: NoNativeInitialLetter,
    pub par_family: String,
    pub dcap_family: String,
}

/// Build a fixture. `tag` must be unique per test: the metrics cache is
/// process-wide and keyed by family name.
pub fn fixture(tag: &str, letter: &str) -> Fixture {
    let par_family = format!("Paragraph {tag}");
    let dcap_family = format!("Dropcap {tag}");

    let host = FakeHost::new()
        .with_baseline(&par_family, 0.8)
        .with_baseline(&dcap_family, 0.75);

    // Cap rows 20..=89 span 70 rows (ratio 0.7); 25..=89 span 65 (0.65).
    let rasterizer = ScriptedRasterizer::new()
        .with_surface(&par_family, column_glyph(100, 20, 89))
        .with_surface(&dcap_family, column_glyph(100, 25, 89));

    let mut doc = Document::new();
    let paragraph = doc.create_element("p");
    doc.set_style_property(paragraph, "font-family", par_family.as_str());
    doc.set_style_property(paragraph, "font-size", "16px");
    doc.set_style_property(paragraph, "line-height", "24px");
    doc.append_child(doc.root(), paragraph);

    let dcap = doc.create_element("span");
    doc.set_style_property(dcap, "font-family", dcap_family.as_str());
    let text = doc.create_text(letter);
    doc.append_child(dcap, text);
    doc.append_child(paragraph, dcap);

    let rest = doc.create_text("orem ipsum dolor sit amet");
    doc.append_child(paragraph, rest);

    Fixture {
        doc,
        paragraph,
        dcap,
        host,
        rasterizer,
        caps: NoNativeInitialLetter,
        par_family,
        dcap_family,
    }
}

/// Read an element's inline-style property as px.
pub fn style_px(doc: &Document, node: NodeId, property: &str) -> Option<f64> {
    doc.style_property(node, property)
        .and_then(dropcap_css::parse_px_length)
}

/// Shorthand for asserting a style property holds a px value.
pub fn assert_style_px(doc: &Document, node: NodeId, property: &str, expected: f64) {
    let actual = style_px(doc, node, property)
        .unwrap_or_else(|| panic!("expected '{property}' to be set in px"));
    assert!(
        approx(actual, expected),
        "expected {property} ≈ {}, got {}",
        to_px_length(expected),
        to_px_length(actual)
    );
}
