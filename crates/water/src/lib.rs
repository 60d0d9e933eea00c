//! Water surface: radially attenuated height displacement of a flat mesh.
//!
//! # Invariants
//! - Only the `y` component of a vertex is written; `x`/`z` are inputs.
//! - Vertex count and ordering never change.
//! - NaN inputs propagate into heights; nothing is rejected per frame.

mod grid;
mod simulator;

pub use grid::GridMesh;
pub use simulator::{WaterParams, WaterSurfaceSimulator, attenuation};

pub fn crate_info() -> &'static str {
    "lagoon-water v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("water"));
    }
}
