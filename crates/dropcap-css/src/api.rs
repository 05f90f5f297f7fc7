//! Public layout API.
//!
//! One entry point: [`Dropcap::layout`]. It validates the request, applies
//! the optional native-support short-circuit, and dispatches to the layout
//! engine for a single element or for each element of an ordered collection.

use dropcap_dom::{Document, NodeId};

use crate::error::DropcapError;
use crate::layout::engine::LayoutEngine;
use crate::metrics::PixelRasterizer;
use crate::style::ComputedStyleProvider;

/// Configuration for a [`Dropcap`] instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropcapOptions {
    /// When set, a host that advertises native oversized-initial-letter
    /// support ([CSS Inline Layout § 3.4
    /// `initial-letter`](https://www.w3.org/TR/css-inline-3/#sizing-drop-initials))
    /// makes `layout` an idempotent no-op.
    pub defer_to_native_initial_letter: bool,
}

/// Capability queries answered by the host environment.
///
/// Modeled as a collaborator so the algorithm stays decoupled from any
/// particular host's property-support probing and naming quirks.
pub trait HostCapabilities {
    /// Whether the host natively supports oversized initial letters.
    fn supports_initial_letter(&self) -> bool;
}

/// The default capability set: no native initial-letter support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeInitialLetter;

impl HostCapabilities for NoNativeInitialLetter {
    fn supports_initial_letter(&self) -> bool {
        false
    }
}

/// A layout target: one element or an ordered collection of elements.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A single element.
    One(NodeId),
    /// An ordered collection, laid out independently and in order.
    Many(&'a [NodeId]),
}

impl From<NodeId> for Target<'_> {
    fn from(id: NodeId) -> Self {
        Target::One(id)
    }
}

impl<'a> From<&'a [NodeId]> for Target<'a> {
    fn from(ids: &'a [NodeId]) -> Self {
        Target::Many(ids)
    }
}

impl<'a> From<&'a Vec<NodeId>> for Target<'a> {
    fn from(ids: &'a Vec<NodeId>) -> Self {
        Target::Many(ids.as_slice())
    }
}

/// Drop-cap layout entry point.
///
/// Owns the engine's managed-element state and borrows the host
/// collaborators: a style provider, a pixel rasterizer, and the capability
/// set. Execution is single-threaded and synchronous; every call runs to
/// completion before returning.
pub struct Dropcap<'a> {
    styles: &'a dyn ComputedStyleProvider,
    rasterizer: &'a dyn PixelRasterizer,
    capabilities: &'a dyn HostCapabilities,
    options: DropcapOptions,
    engine: LayoutEngine,
}

impl<'a> Dropcap<'a> {
    /// Create an instance with default options.
    #[must_use]
    pub fn new(
        styles: &'a dyn ComputedStyleProvider,
        rasterizer: &'a dyn PixelRasterizer,
        capabilities: &'a dyn HostCapabilities,
    ) -> Self {
        Self::with_options(styles, rasterizer, capabilities, DropcapOptions::default())
    }

    /// Create an instance with explicit options.
    #[must_use]
    pub fn with_options(
        styles: &'a dyn ComputedStyleProvider,
        rasterizer: &'a dyn PixelRasterizer,
        capabilities: &'a dyn HostCapabilities,
        options: DropcapOptions,
    ) -> Self {
        Self {
            styles,
            rasterizer,
            capabilities,
            options,
            engine: LayoutEngine::new(),
        }
    }

    /// Lay out one drop cap or a collection of drop caps.
    ///
    /// The drop cap spans `height_in_lines` text lines, with its baseline on
    /// the `baseline_pos`-th line; `baseline_pos` defaults to
    /// `height_in_lines`. A `1`/`1` request resets previously applied
    /// styling instead.
    ///
    /// # Errors
    /// - [`DropcapError::InvalidRange`] if `height_in_lines < 1`, or
    ///   `baseline_pos` is supplied and `< 1`;
    /// - [`DropcapError::InvalidTarget`] if a target node is not an element
    ///   of `doc`, or has no parent element to size against;
    /// - [`DropcapError::MetricsProbeFailed`] /
    ///   [`DropcapError::UndetectableMetric`] from the font-metrics probe.
    pub fn layout<'t>(
        &mut self,
        doc: &mut Document,
        target: impl Into<Target<'t>>,
        height_in_lines: u32,
        baseline_pos: Option<u32>,
    ) -> Result<(), DropcapError> {
        if height_in_lines < 1 {
            return Err(DropcapError::InvalidRange {
                value: height_in_lines,
            });
        }
        if let Some(pos) = baseline_pos
            && pos < 1
        {
            return Err(DropcapError::InvalidRange { value: pos });
        }
        let baseline_pos = baseline_pos.unwrap_or(height_in_lines);

        let target = target.into();
        validate_target(doc, target)?;

        if self.options.defer_to_native_initial_letter
            && self.capabilities.supports_initial_letter()
        {
            // The host will size the initial letter itself; repeating the
            // call stays a no-op.
            return Ok(());
        }

        match target {
            Target::One(id) => {
                self.engine
                    .layout_one(doc, self.styles, self.rasterizer, id, height_in_lines, baseline_pos)
            }
            Target::Many(ids) => {
                for &id in ids {
                    self.engine.layout_one(
                        doc,
                        self.styles,
                        self.rasterizer,
                        id,
                        height_in_lines,
                        baseline_pos,
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Check that every target node resolves to an element before any styling
/// is applied.
fn validate_target(doc: &Document, target: Target<'_>) -> Result<(), DropcapError> {
    let check = |id: NodeId| -> Result<(), DropcapError> {
        if doc.as_element(id).is_some() {
            Ok(())
        } else {
            Err(DropcapError::InvalidTarget {
                reason: format!("node {} is not an element of this document", id.0),
            })
        }
    };

    match target {
        Target::One(id) => check(id),
        Target::Many(ids) => {
            for &id in ids {
                check(id)?;
            }
            Ok(())
        }
    }
}
