//! Paragraph line-box metrics.
//!
//! [CSS 2.1 § 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
//!
//! "The leading is L = line-height - AD; half the leading is added above A
//! and the other half below D."

use serde::Serialize;

use crate::style::values::LINE_HEIGHT_NORMAL_RATIO;
use crate::style::{LineHeight, ResolvedStyle};

/// Line-box quantities of a paragraph, in px.
///
/// Derived per layout call from a live resolved style and never cached —
/// paragraph styles can change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineMetrics {
    /// Used font size.
    pub font_size: f64,
    /// Used line-box height.
    pub line_height: f64,
    /// Extra vertical space beyond the font size
    /// (`line_height - font_size`).
    pub leading: f64,
}

impl LineMetrics {
    /// Derive line metrics from a resolved style.
    ///
    /// `line-height: normal` resolves to
    /// [`LINE_HEIGHT_NORMAL_RATIO`] × font size.
    #[must_use]
    pub fn from_style(style: &ResolvedStyle) -> Self {
        let font_size = style.font_size;
        let line_height = match style.line_height {
            LineHeight::Normal => LINE_HEIGHT_NORMAL_RATIO * font_size,
            LineHeight::Px(px) => px,
        };

        Self {
            font_size,
            line_height,
            leading: line_height - font_size,
        }
    }
}
