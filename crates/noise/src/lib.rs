//! Noise synthesis: a fixed table of sine octaves summed into a scalar signal.
//!
//! # Invariants
//! - The octave table is drawn exactly once, at construction.
//! - `evaluate` is pure; a synthesizer can be shared across threads.
//!
//! The same synthesizer serves as a time-domain oscillator (pass elapsed
//! seconds) and as a 1D height field (pass a spatial coordinate).

mod synth;

pub use synth::{DEFAULT_FREQUENCY_GROWTH, NoiseConfig, NoiseSynthesizer, Octave};

pub fn crate_info() -> &'static str {
    "lagoon-noise v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("noise"));
    }
}
