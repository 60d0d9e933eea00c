//! Level kernel: owns the level state and the per-frame update pass.
//!
//! # Invariants
//! - Time enters only through [`Level::step`]; nothing reads a global clock.
//! - A seed fully determines the level: same seed and same `dt` sequence
//!   produce identical state.
//! - Each component writes only the buffer it owns.

pub mod clock;
pub mod config;
pub mod focal;
pub mod level;

pub use clock::FrameClock;
pub use config::{FocalConfig, LevelConfig, LevelError, WaterConfig};
pub use focal::FocalObject;
pub use level::Level;
