//! Contact shadow: a floor-aligned quad that shrinks as its anchor rises.
//!
//! # Invariants
//! - The shadow lies on `y = floor_height` with no rotation or shear.
//! - Side size is `base_size / |anchor_height - floor_height|`, with the
//!   denominator clamped to [`HEIGHT_EPSILON`] so the matrix stays finite.
//! - The matrix is only rebuilt when the anchor moved (or on request).

mod projector;

pub use projector::{ContactShadowProjector, HEIGHT_EPSILON, ShadowConfig, ShadowState, side_size};

pub fn crate_info() -> &'static str {
    "lagoon-shadow v0.1.0"
}
