//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - A renderer reads the level after its update pass and never mutates it.
//! - Render output derives from level state and view only.
//!
//! The debug text renderer stands in for the host renderer in headless runs
//! and tests; a GPU host implements the same trait.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "lagoon-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
