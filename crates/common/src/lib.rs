//! Shared boundary types between the lagoon core and its host renderer.
//!
//! # Invariants
//! - The core never owns host meshes; it writes through [`SurfaceMesh`].
//! - Construction-time mistakes surface as [`ConfigError`], never as panics.

mod error;
mod mesh;
mod types;

pub use error::{ConfigError, ensure_finite, ensure_positive};
pub use mesh::{GpuVertex, SurfaceMesh};
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "lagoon-common v0.1.0"
}
