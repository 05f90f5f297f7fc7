//! Drop-cap layout: line metrics, descender classification, and the engine.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 § 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//! - [CSS 2.1 § 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//! - [CSS Inline Layout Level 3 § Initial Letters](https://www.w3.org/TR/css-inline-3/#initial-letter-styling)
//!
//! # Module Structure
//!
//! - [`line`] - line-box quantities derived from a paragraph's style
//! - [`descender`] - decides whether a letter needs extra float height
//! - [`engine`] - the sizing/positioning algorithm and managed-element state

pub mod descender;
pub(crate) mod engine;
pub mod line;

pub use descender::{DESCENDER_MARKER_CLASS, DescenderClass, classify};
pub use engine::FloatSide;
pub use line::LineMetrics;
