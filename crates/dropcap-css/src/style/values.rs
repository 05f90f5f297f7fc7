//! CSS length values and px parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! The engine's entire style contract is written in px
//! ([§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths):
//! "1px = 1/96th of 1in"), so only px lengths are resolved here. Other units
//! are reported through the warning system and treated as unset.

use dropcap_common::warning::warn_once;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// User agent default font family keyword, resolved by the font host.
/// [§ 3.1 font-family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Used value for `line-height: normal`, as a multiple of font size.
///
/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// "We recommend a used value for 'normal' between 1.0 and 1.2."
///
/// 1.15 matches the Blink fallback the original measurements were calibrated
/// against.
pub const LINE_HEIGHT_NORMAL_RATIO: f64 = 1.15;

/// Format a px quantity as a CSS length string (`"59.2px"`).
#[must_use]
pub fn to_px_length(value: f64) -> String {
    format!("{value}px")
}

/// Parse a CSS length string as px.
///
/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Accepts `<number>px` and the unitless zero
/// ([§ 6.1](https://www.w3.org/TR/css-values-4/#absolute-lengths): "a zero
/// length may be written without a unit"). Any other unit is unsupported and
/// yields `None` after a deduplicated warning.
#[must_use]
pub fn parse_px_length(value: &str) -> Option<f64> {
    let value = value.trim();

    if let Some(number) = strip_px_suffix(value) {
        return number.parse::<f64>().ok();
    }

    if value == "0" {
        return Some(0.0);
    }

    if value.parse::<f64>().is_ok() {
        warn_once("Style", &format!("length '{value}' is missing a unit"));
    } else {
        warn_once(
            "Style",
            &format!("unsupported length '{value}' (only px lengths are resolved)"),
        );
    }
    None
}

/// Split off a trailing `px` unit (ASCII case-insensitive), if present.
fn strip_px_suffix(value: &str) -> Option<&str> {
    let split = value.len().checked_sub(2)?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (number, unit) = value.split_at(split);
    unit.eq_ignore_ascii_case("px").then_some(number)
}
