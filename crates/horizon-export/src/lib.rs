//! horizon-export: Pure serializers for extraction output (sans-IO)
//!
//! Converts boundary point sets into output artifacts: the plain-text
//! points format consumed by downstream tooling, and a PNG overlay that
//! marks each point on the source image. All functions here return
//! strings or byte buffers; the `horizon` binary does the writing.

pub mod overlay;
pub mod points;

pub use overlay::{OverlayError, overlay_png, render_overlay};
pub use points::{PointsParseError, parse_points_text, to_points_text};
