//! Integration tests for the font-metrics prober: measured ratios,
//! memoization, and probe teardown on every exit path.

mod common;

use common::{FakeHost, ScriptedRasterizer, approx, column_glyph};
use dropcap_css::{DropcapError, GlyphBitmap, probe_font_metrics};
use dropcap_dom::Document;

#[test]
fn test_probe_measures_baseline_and_cap_height() {
    let family = "Probe Basic";
    let host = FakeHost::new().with_baseline(family, 0.8);
    // Ink rows 20..=89: 70 of 100 rows.
    let rasterizer = ScriptedRasterizer::new().with_surface(family, column_glyph(100, 20, 89));
    let mut doc = Document::new();

    let metrics = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect("probe should succeed");

    assert!(approx(metrics.baseline_ratio, 0.8));
    assert!(approx(metrics.cap_height_ratio, 0.7));
}

#[test]
fn test_probe_is_memoized_per_family() {
    let family = "Probe Memoized";
    let host = FakeHost::new().with_baseline(family, 0.8);
    let rasterizer = ScriptedRasterizer::new().with_surface(family, column_glyph(100, 20, 89));
    let mut doc = Document::new();

    let first = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect("first probe should succeed");
    let second = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect("second probe should succeed");

    assert_eq!(first, second);
    // The rasterizer runs only on the first call.
    assert_eq!(rasterizer.calls(), 1);
}

#[test]
fn test_probe_cache_key_is_exact_family_string() {
    let host = FakeHost::new()
        .with_baseline("Probe Exact", 0.8)
        .with_baseline("probe exact", 0.8);
    let rasterizer = ScriptedRasterizer::new()
        .with_surface("Probe Exact", column_glyph(100, 20, 89))
        .with_surface("probe exact", column_glyph(100, 20, 89));
    let mut doc = Document::new();

    let _ = probe_font_metrics(&mut doc, &host, &rasterizer, "Probe Exact")
        .expect("probe should succeed");
    let _ = probe_font_metrics(&mut doc, &host, &rasterizer, "probe exact")
        .expect("probe should succeed");

    // Differently-cased families are distinct cache keys.
    assert_eq!(rasterizer.calls(), 2);
}

#[test]
fn test_probe_removes_probe_nodes_on_success() {
    let family = "Probe Teardown Success";
    let host = FakeHost::new().with_baseline(family, 0.8);
    let rasterizer = ScriptedRasterizer::new().with_surface(family, column_glyph(100, 20, 89));
    let mut doc = Document::new();

    let children_before = doc.children(doc.root()).len();
    let _ = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect("probe should succeed");

    assert_eq!(doc.children(doc.root()).len(), children_before);
}

#[test]
fn test_probe_failure_reports_cause_and_tears_down() {
    let family = "Probe Raster Failure";
    let host = FakeHost::new().with_baseline(family, 0.8);
    // No scripted surface: the rasterizer fails for this family.
    let rasterizer = ScriptedRasterizer::new();
    let mut doc = Document::new();

    let children_before = doc.children(doc.root()).len();
    let err = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect_err("probe should fail");

    assert!(matches!(err, DropcapError::MetricsProbeFailed { .. }));
    assert!(err.to_string().contains("error computing font metrics"));
    // Probe nodes are released even on the failure path.
    assert_eq!(doc.children(doc.root()).len(), children_before);
}

#[test]
fn test_probe_with_no_ink_is_undetectable() {
    let family = "Probe Blank Surface";
    let host = FakeHost::new().with_baseline(family, 0.8);
    let rasterizer =
        ScriptedRasterizer::new().with_surface(family, GlyphBitmap::new(60, 100));
    let mut doc = Document::new();

    let children_before = doc.children(doc.root()).len();
    let err = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect_err("probe should fail");

    assert!(matches!(err, DropcapError::UndetectableMetric { .. }));
    assert_eq!(doc.children(doc.root()).len(), children_before);
}

#[test]
fn test_failed_probe_is_not_cached() {
    let family = "Probe Failure Not Cached";
    let host = FakeHost::new().with_baseline(family, 0.8);
    let rasterizer =
        ScriptedRasterizer::new().with_surface(family, GlyphBitmap::new(60, 100));
    let mut doc = Document::new();

    let _ = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect_err("first probe should fail");
    let _ = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect_err("second probe should fail");

    // Both calls reached the rasterizer: failures never enter the cache.
    assert_eq!(rasterizer.calls(), 2);
}

#[test]
fn test_probe_ignores_antialiased_fringe_rows() {
    let family = "Probe Antialiased";
    let host = FakeHost::new().with_baseline(family, 0.8);

    // Partial-coverage rows above the cap line and below the baseline, as
    // rasterizers produce at stroke edges.
    let mut surface = column_glyph(100, 20, 89);
    for x in 0..surface.width() {
        surface.set_darkness(x, 19, 128);
        surface.set_darkness(x, 90, 128);
    }
    let rasterizer = ScriptedRasterizer::new().with_surface(family, surface);
    let mut doc = Document::new();

    let metrics = probe_font_metrics(&mut doc, &host, &rasterizer, family)
        .expect("probe should succeed");

    // Only fully dark rows count: still 70 of 100 rows.
    assert!(approx(metrics.cap_height_ratio, 0.7));
}
