//! Fontdue-backed host collaborators for the dropcap engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Font Loading** - fonts by family name from explicit files or
//!   well-known system locations, with a default-family fallback
//! - **Pixel Rasterization** - the [`dropcap_css::PixelRasterizer`] contract
//!   implemented with fontdue glyph rasterization
//! - **Style Host** - the [`dropcap_css::ComputedStyleProvider`] contract
//!   implemented over inline styles and fontdue line metrics
//! - **Probe Diagnostics** - grayscale dumps of probe surfaces
//!
//! The engine itself lives in `dropcap-css`; this crate only supplies the
//! capabilities a real host environment would.

pub mod fonts;
pub mod host;

pub use fonts::FontStore;
pub use host::{FontHost, save_probe_surface};
