//! Integration tests for the drop-cap layout engine: geometry, raised caps,
//! descender compensation, strut maintenance, and reset.
//!
//! Standard fixture metrics: paragraph `{baseline 0.8, cap 0.7}` at
//! 16px/24px lines (leading 8), drop cap `{baseline 0.75, cap 0.65}`.
//! Worked geometry for a 3-line cap:
//!
//! ```text
//! ascend          = (0.8 - 0.7) * 16                      = 1.6
//! dcap_height     = 3*24 - 8 - 1.6 - (1 - 0.8)*16         = 59.2
//! dcap_font_size  = 59.2 / 0.65                           ≈ 91.0769
//! vertical_offset = 8/2 + 1.6                             = 5.6
//! ```

mod common;

use common::{assert_style_px, fixture, style_px};
use dropcap_css::Dropcap;

const DCAP_HEIGHT: f64 = 59.2;
const DCAP_FONT_SIZE: f64 = 59.2 / 0.65;
const VERTICAL_OFFSET: f64 = 5.6;

#[test]
fn test_layout_applies_worked_example_geometry() {
    let mut f = fixture("layout basic", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    assert_eq!(f.doc.style_property(f.dcap, "float"), Some("left"));
    assert_eq!(f.doc.style_property(f.dcap, "padding"), Some("0px"));
    assert_eq!(f.doc.style_property(f.dcap, "line-height"), Some("0px"));
    assert_style_px(&f.doc, f.dcap, "font-size", DCAP_FONT_SIZE);
    assert_style_px(&f.doc, f.dcap, "margin-top", VERTICAL_OFFSET);
    assert_style_px(&f.doc, f.dcap, "height", DCAP_HEIGHT);
    // Not raised: the paragraph's margin is untouched.
    assert_eq!(f.doc.style_property(f.paragraph, "margin-top"), None);
}

#[test]
fn test_layout_defaults_baseline_pos_to_height() {
    let mut f = fixture("layout default baseline", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, None)
        .expect("layout should succeed");

    assert_style_px(&f.doc, f.dcap, "margin-top", VERTICAL_OFFSET);
    assert_eq!(f.doc.style_property(f.paragraph, "margin-top"), None);
}

#[test]
fn test_raised_cap_drops_offset_by_one_line_and_pushes_parent() {
    let mut f = fixture("layout raised", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    // Baseline on the 4th line first: the non-raised reference.
    dropcap
        .layout(&mut f.doc, f.dcap, 4, Some(4))
        .expect("layout should succeed");
    let reference_offset =
        style_px(&f.doc, f.dcap, "margin-top").expect("margin-top should be set");

    // Raise by one line: same height, baseline one line up.
    dropcap
        .layout(&mut f.doc, f.dcap, 4, Some(3))
        .expect("layout should succeed");
    let raised_offset =
        style_px(&f.doc, f.dcap, "margin-top").expect("margin-top should be set");

    // The offset decreases by exactly one line box.
    assert!(common::approx(reference_offset - raised_offset, 24.0));
    // The paragraph is pushed down by the negated offset.
    assert_style_px(&f.doc, f.paragraph, "margin-top", -raised_offset);
}

#[test]
fn test_rtl_direction_floats_right() {
    let mut f = fixture("layout rtl", "L");
    f.doc.set_style_property(f.paragraph, "direction", "rtl");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    assert_eq!(f.doc.style_property(f.dcap, "float"), Some("right"));
}

// ---------------------------------------------------------------------------
// Descender compensation
// ---------------------------------------------------------------------------

#[test]
fn test_descending_character_grows_float_height() {
    let mut f = fixture("layout descender g", "g");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    // height + font_size * (1 - dcap baseline ratio)
    let expected = DCAP_HEIGHT + DCAP_FONT_SIZE * 0.25;
    assert_style_px(&f.doc, f.dcap, "height", expected);
    // The strut keeps the un-compensated span.
    let strut = element_child(&f);
    assert_style_px(&f.doc, strut, "height", DCAP_HEIGHT);
}

#[test]
fn test_descender_marker_grows_float_to_font_size() {
    let mut f = fixture("layout descender marker", "L");
    let _ = f
        .doc
        .as_element_mut(f.dcap)
        .expect("element data")
        .attrs
        .insert("class".to_string(), "dropcap-descender".to_string());
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    // height + (font_size - height) = the full font size.
    assert_style_px(&f.doc, f.dcap, "height", DCAP_FONT_SIZE);
}

#[test]
fn test_descending_character_takes_priority_over_marker() {
    let mut f = fixture("layout descender priority", "g");
    let _ = f
        .doc
        .as_element_mut(f.dcap)
        .expect("element data")
        .attrs
        .insert("class".to_string(), "dropcap-descender".to_string());
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    // The character-based formula wins even with the marker present.
    let expected = DCAP_HEIGHT + DCAP_FONT_SIZE * 0.25;
    assert_style_px(&f.doc, f.dcap, "height", expected);
}

#[test]
fn test_descender_classification_table() {
    use dropcap_css::DescenderClass;
    use dropcap_css::layout::classify;

    let mut doc = dropcap_dom::Document::new();
    let root = doc.root();

    let cases = [
        ("g", DescenderClass::Character),
        ("j", DescenderClass::Character),
        ("p", DescenderClass::Character),
        ("q", DescenderClass::Character),
        ("Q", DescenderClass::Character),
        // Lowercase-only rule: 'G' does not descend.
        ("G", DescenderClass::None),
        ("L", DescenderClass::None),
        // Multi-character content never matches the character set.
        ("gh", DescenderClass::None),
        ("", DescenderClass::None),
    ];

    for (text, expected) in cases {
        let el = doc.create_element("span");
        let content = doc.create_text(text);
        doc.append_child(el, content);
        doc.append_child(root, el);
        assert_eq!(classify(&doc, el), expected, "text {text:?}");
    }
}

// ---------------------------------------------------------------------------
// Strut maintenance
// ---------------------------------------------------------------------------

/// The single element child of the drop cap (the strut).
fn element_child(f: &common::Fixture) -> dropcap_dom::NodeId {
    let elements: Vec<_> = f
        .doc
        .children(f.dcap)
        .iter()
        .copied()
        .filter(|&c| f.doc.as_element(c).is_some())
        .collect();
    assert_eq!(elements.len(), 1, "exactly one strut child expected");
    elements[0]
}

#[test]
fn test_strut_is_created_with_span_height() {
    let mut f = fixture("layout strut", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");

    let strut = element_child(&f);
    assert_eq!(f.doc.style_property(strut, "display"), Some("inline-block"));
    assert_style_px(&f.doc, strut, "height", DCAP_HEIGHT);
}

#[test]
fn test_strut_is_reused_across_layouts() {
    let mut f = fixture("layout strut reuse", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");
    let strut = element_child(&f);

    dropcap
        .layout(&mut f.doc, f.dcap, 4, Some(4))
        .expect("layout should succeed");

    // Same node, updated height: 4*24 - 8 - 1.6 - 3.2 = 83.2.
    assert_eq!(element_child(&f), strut);
    assert_style_px(&f.doc, strut, "height", 83.2);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[test]
fn test_one_by_one_resets_engine_styling() {
    let mut f = fixture("layout reset", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");
    dropcap
        .layout(&mut f.doc, f.dcap, 1, Some(1))
        .expect("reset should succeed");

    for property in ["float", "padding", "font-size", "line-height", "margin-top"] {
        assert_eq!(
            f.doc.style_property(f.dcap, property),
            None,
            "{property} should be cleared"
        );
    }
    // Exactly the engine set is cleared: height and the strut survive.
    assert_style_px(&f.doc, f.dcap, "height", DCAP_HEIGHT);
    let strut = element_child(&f);
    assert_style_px(&f.doc, strut, "height", DCAP_HEIGHT);
}

#[test]
fn test_reset_is_idempotent() {
    let mut f = fixture("layout reset idempotent", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 3, Some(3))
        .expect("layout should succeed");
    dropcap
        .layout(&mut f.doc, f.dcap, 1, Some(1))
        .expect("reset should succeed");
    let snapshot = f.doc.clone();

    dropcap
        .layout(&mut f.doc, f.dcap, 1, Some(1))
        .expect("repeated reset should succeed");

    let before: Vec<_> = snapshot
        .as_element(f.dcap)
        .expect("element data")
        .style
        .properties()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
    let after: Vec<_> = f
        .doc
        .as_element(f.dcap)
        .expect("element data")
        .style
        .properties()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_reset_on_unmanaged_element_is_a_no_op() {
    let mut f = fixture("layout reset unmanaged", "L");
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, f.dcap, 1, Some(1))
        .expect("reset should succeed");

    assert!(
        f.doc
            .as_element(f.dcap)
            .expect("element data")
            .style
            .properties()
            .all(|(name, _)| name == "font-family"),
        "only the fixture's own declaration should remain"
    );
    // No probing happens for a never-styled reset.
    assert_eq!(f.rasterizer.calls(), 0);
}

// ---------------------------------------------------------------------------
// Collections and memoization across layouts
// ---------------------------------------------------------------------------

#[test]
fn test_collection_lays_out_each_element_in_order() {
    let mut f = fixture("layout collection", "L");

    // A second paragraph with its own drop cap, same families.
    let paragraph2 = f.doc.create_element("p");
    f.doc
        .set_style_property(paragraph2, "font-family", f.par_family.as_str());
    f.doc.set_style_property(paragraph2, "font-size", "16px");
    f.doc.set_style_property(paragraph2, "line-height", "24px");
    let root = f.doc.root();
    f.doc.append_child(root, paragraph2);
    let dcap2 = f.doc.create_element("span");
    f.doc
        .set_style_property(dcap2, "font-family", f.dcap_family.as_str());
    let letter = f.doc.create_text("M");
    f.doc.append_child(dcap2, letter);
    f.doc.append_child(paragraph2, dcap2);

    let targets = vec![f.dcap, dcap2];
    let mut dropcap = Dropcap::new(&f.host, &f.rasterizer, &f.caps);

    dropcap
        .layout(&mut f.doc, &targets, 3, Some(3))
        .expect("layout should succeed");

    assert_style_px(&f.doc, f.dcap, "font-size", DCAP_FONT_SIZE);
    assert_style_px(&f.doc, dcap2, "font-size", DCAP_FONT_SIZE);
    // Two families probed once each, shared across both elements.
    assert_eq!(f.rasterizer.calls(), 2);
}
