//! Per-font visual metrics: probing, caching, and the rasterizer contract.
//!
//! [CSS 2.1 § 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! No host API exposes those metrics for an arbitrary family, so this module
//! measures them: see [`probe`] for the measurement procedure, [`cache`] for
//! the process-wide memoization, and [`raster`] for the pixel-surface
//! contract the prober consumes.

pub mod cache;
pub mod probe;
pub mod raster;

pub use cache::clear_cache;
pub use probe::{TEST_SIZE, probe_font_metrics};
pub use raster::{GlyphBitmap, INK_DARKNESS, PixelRasterizer, RasterError};

use serde::Serialize;

/// Measured visual metrics for one font family, as fractions of an em.
///
/// Immutable once computed; shared read-only by all layout calls through the
/// metrics cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontMetrics {
    /// Fraction of the em square above the text baseline, in `(0, 1]`.
    pub baseline_ratio: f64,
    /// Fraction of the em square between cap line and baseline, in `(0, 1]`.
    pub cap_height_ratio: f64,
}
