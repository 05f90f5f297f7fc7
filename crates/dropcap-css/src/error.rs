//! Error types for the dropcap engine.
//!
//! Every failure is reported once, synchronously, to the direct caller.
//! There are no retries and no internal recovery.

use thiserror::Error;

use crate::metrics::RasterError;

/// Errors surfaced by the public layout API and the metrics prober.
#[derive(Debug, Error)]
pub enum DropcapError {
    /// The requested height or baseline position is below 1.
    #[error("layout expects the baseline position and height to be 1 or above (got {value})")]
    InvalidRange {
        /// The offending value.
        value: u32,
    },

    /// The layout target does not resolve to a usable element.
    #[error("layout expects an element of this document: {reason}")]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// The pixel rasterizer could not be used; probe resources were released
    /// before this error propagated.
    #[error("error computing font metrics: {source}")]
    MetricsProbeFailed {
        /// The underlying rasterizer failure.
        #[source]
        source: RasterError,
    },

    /// The probe scan found no ink, so the cap-height ratio is undetectable.
    ///
    /// Escalated to a hard error rather than reporting a sentinel ratio that
    /// would later be used as a divisor and produce a negative font size.
    #[error("no ink detected while probing '{font_family}'; cap height is undetectable")]
    UndetectableMetric {
        /// The font family whose probe glyph produced no ink.
        font_family: String,
    },
}
