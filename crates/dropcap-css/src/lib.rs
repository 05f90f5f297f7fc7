//! Font-metrics probing and drop-cap layout for the dropcap engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Font Metrics Probing** ([CSS 2.1 § 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height))
//!   - baseline ratio via a zero-font-size probe glyph's offset-top
//!   - cap-height ratio via pixel scans of a rasterized capital `E`
//!   - process-wide memoization keyed by exact font-family string
//!
//! - **Line Metrics** ([§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading))
//!   - font size, line height, and leading from a resolved style
//!   - `line-height: normal` fallback ratio
//!
//! - **Drop Cap Layout** ([CSS 2.1 § 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats),
//!   [CSS Inline Layout Level 3](https://www.w3.org/TR/css-inline-3/#initial-letter-styling))
//!   - float sizing so the glyph's cap height spans N text lines
//!   - raised caps with parent-margin compensation
//!   - descender compensation (automatic character set + author marker)
//!   - baseline strut maintenance inside the float
//!
//! - **Public API**
//!   - request validation, single/collection dispatch, native
//!     initial-letter short-circuit
//!
//! # Not Implemented
//!
//! - Stylesheet parsing or cascade: styles are consumed through the
//!   [`ComputedStyleProvider`] collaborator
//! - Rasterization: pixels are consumed through the [`PixelRasterizer`]
//!   collaborator
//! - Text shaping, multi-letter drop caps, bidi resolution beyond the
//!   float-direction flag

/// Public layout API: validation, dispatch, capability short-circuit.
pub mod api;
/// Error types surfaced by the API and the prober.
pub mod error;
/// Drop-cap layout per [CSS 2.1 § 9.5](https://www.w3.org/TR/CSS2/visuren.html#floats).
pub mod layout;
/// Font-metrics probing per [CSS 2.1 § 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height).
pub mod metrics;
/// Resolved styles and the computed-style contract per
/// [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;

// Re-exports for convenience
pub use api::{Dropcap, DropcapOptions, HostCapabilities, NoNativeInitialLetter, Target};
pub use error::DropcapError;
pub use layout::{DESCENDER_MARKER_CLASS, DescenderClass, FloatSide, LineMetrics};
pub use metrics::{
    FontMetrics, GlyphBitmap, PixelRasterizer, RasterError, TEST_SIZE, clear_cache,
    probe_font_metrics,
};
pub use style::values::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, LINE_HEIGHT_NORMAL_RATIO, parse_px_length,
    to_px_length,
};
pub use style::{ComputedStyleProvider, Direction, InlineStyleResolver, LineHeight, ResolvedStyle};
