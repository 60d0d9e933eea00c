use lagoon_common::{ConfigError, ensure_finite};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Frequency ratio between consecutive octaves when none is given.
pub const DEFAULT_FREQUENCY_GROWTH: f64 = 1.3;

/// One sine term of the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Construction parameters for a [`NoiseSynthesizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Amplitudes are drawn uniformly from `[-base_amplitude, base_amplitude]`.
    pub base_amplitude: f64,
    /// Frequency of octave 0.
    pub base_frequency: f64,
    pub octave_count: usize,
    /// Octave `i` runs at `base_frequency * frequency_growth^i`.
    pub frequency_growth: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            base_amplitude: 1.0,
            base_frequency: 1.0,
            octave_count: 4,
            frequency_growth: DEFAULT_FREQUENCY_GROWTH,
        }
    }
}

impl NoiseConfig {
    pub fn new(base_amplitude: f64, base_frequency: f64, octave_count: usize) -> Self {
        Self {
            base_amplitude,
            base_frequency,
            octave_count,
            frequency_growth: DEFAULT_FREQUENCY_GROWTH,
        }
    }

    pub fn with_growth(mut self, frequency_growth: f64) -> Self {
        self.frequency_growth = frequency_growth;
        self
    }

    /// Check every parameter is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("base_amplitude", self.base_amplitude)?;
        ensure_finite("base_frequency", self.base_frequency)?;
        ensure_finite("frequency_growth", self.frequency_growth)?;
        Ok(())
    }
}

/// Multi-octave sine oscillator with a randomly drawn, immutable octave table.
///
/// Deserialized tables go through the same checks as [`NoiseSynthesizer::from_octaves`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OctaveTable")]
pub struct NoiseSynthesizer {
    octaves: Vec<Octave>,
}

#[derive(Deserialize)]
struct OctaveTable {
    octaves: Vec<Octave>,
}

impl TryFrom<OctaveTable> for NoiseSynthesizer {
    type Error = ConfigError;

    fn try_from(table: OctaveTable) -> Result<Self, Self::Error> {
        Self::from_octaves(table.octaves)
    }
}

impl NoiseSynthesizer {
    /// Build from the thread-local RNG.
    pub fn new(
        base_amplitude: f64,
        base_frequency: f64,
        octave_count: usize,
        frequency_growth: f64,
    ) -> Result<Self, ConfigError> {
        let config = NoiseConfig {
            base_amplitude,
            base_frequency,
            octave_count,
            frequency_growth,
        };
        Self::from_config(&config, &mut rand::thread_rng())
    }

    /// Build with amplitudes drawn from `rng`. A seeded RNG reproduces the table.
    pub fn with_rng<R: Rng + ?Sized>(
        base_amplitude: f64,
        base_frequency: f64,
        octave_count: usize,
        frequency_growth: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let config = NoiseConfig {
            base_amplitude,
            base_frequency,
            octave_count,
            frequency_growth,
        };
        Self::from_config(&config, rng)
    }

    pub fn from_config<R: Rng + ?Sized>(
        config: &NoiseConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        // Draw in [-1, 1] and scale so huge amplitudes cannot overflow the range width.
        let amplitude = config.base_amplitude.abs();
        let mut frequency = config.base_frequency;
        let mut octaves = Vec::with_capacity(config.octave_count);
        for _ in 0..config.octave_count {
            octaves.push(Octave {
                frequency,
                amplitude: rng.gen_range(-1.0_f64..=1.0) * amplitude,
            });
            frequency *= config.frequency_growth;
        }

        tracing::debug!(
            octaves = octaves.len(),
            base_amplitude = config.base_amplitude,
            base_frequency = config.base_frequency,
            "noise synthesizer built"
        );
        Self::from_octaves(octaves)
    }

    /// Build from an explicit octave table.
    pub fn from_octaves(octaves: Vec<Octave>) -> Result<Self, ConfigError> {
        for octave in &octaves {
            ensure_finite("octave frequency", octave.frequency)?;
            ensure_finite("octave amplitude", octave.amplitude)?;
        }
        Ok(Self { octaves })
    }

    /// A synthesizer that always evaluates to `0.0`.
    pub fn silent() -> Self {
        Self {
            octaves: Vec::new(),
        }
    }

    /// `Σ amplitude_i * sin(t * frequency_i)`.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.octaves
            .iter()
            .map(|o| o.amplitude * (t * o.frequency).sin())
            .sum()
    }

    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    pub fn len(&self) -> usize {
        self.octaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.octaves.is_empty()
    }

    /// Upper bound on `|evaluate(t)|` for any `t`.
    pub fn amplitude_bound(&self) -> f64 {
        self.octaves.iter().map(|o| o.amplitude.abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: &NoiseConfig, seed: u64) -> NoiseSynthesizer {
        NoiseSynthesizer::from_config(config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn zero_octaves_is_silent() {
        let synth = NoiseSynthesizer::new(2.0, 1.0, 0, DEFAULT_FREQUENCY_GROWTH).unwrap();
        assert!(synth.is_empty());
        for t in [-100.0, -1.0, 0.0, 0.5, 3.0, 1e6] {
            assert_eq!(synth.evaluate(t), 0.0);
        }
        assert_eq!(NoiseSynthesizer::silent().evaluate(7.0), 0.0);
    }

    #[test]
    fn frequencies_grow_geometrically() {
        let synth = seeded(&NoiseConfig::new(1.0, 2.0, 4).with_growth(1.5), 1);
        let freqs: Vec<f64> = synth.octaves().iter().map(|o| o.frequency).collect();
        assert_eq!(freqs, vec![2.0, 3.0, 4.5, 6.75]);
    }

    #[test]
    fn amplitudes_stay_in_range() {
        let synth = seeded(&NoiseConfig::new(0.25, 1.0, 64), 9);
        assert_eq!(synth.len(), 64);
        assert!(synth.octaves().iter().all(|o| o.amplitude.abs() <= 0.25));
    }

    #[test]
    fn negative_base_amplitude_draws_same_interval() {
        let synth = seeded(&NoiseConfig::new(-0.5, 1.0, 32), 3);
        assert!(synth.octaves().iter().all(|o| o.amplitude.abs() <= 0.5));
    }

    #[test]
    fn evaluate_at_zero_is_bounded_and_repeatable() {
        for seed in 0..16 {
            let synth = seeded(&NoiseConfig::new(1.5, 0.7, 6), seed);
            let a = synth.evaluate(0.0);
            assert!(a.abs() <= synth.amplitude_bound());
            assert_eq!(a, synth.evaluate(0.0));
        }
    }

    #[test]
    fn evaluate_is_bounded_everywhere() {
        let synth = seeded(&NoiseConfig::new(1.0, 0.3, 8), 5);
        let bound = synth.amplitude_bound();
        for i in -200..200 {
            let t = i as f64 * 0.173;
            assert!(synth.evaluate(t).abs() <= bound + 1e-12);
        }
    }

    #[test]
    fn matches_explicit_sine_sum() {
        let synth = NoiseSynthesizer::from_octaves(vec![
            Octave {
                frequency: 1.0,
                amplitude: 0.5,
            },
            Octave {
                frequency: 2.0,
                amplitude: -0.25,
            },
        ])
        .unwrap();
        let t: f64 = 0.8;
        let expected = 0.5 * t.sin() - 0.25 * (2.0 * t).sin();
        assert!((synth.evaluate(t) - expected).abs() < 1e-12);
    }

    #[test]
    fn unit_growth_collapses_frequencies() {
        let synth = seeded(&NoiseConfig::new(1.0, 3.0, 5).with_growth(1.0), 2);
        assert!(synth.octaves().iter().all(|o| o.frequency == 3.0));
    }

    #[test]
    fn same_seed_same_table() {
        let config = NoiseConfig::default();
        assert_eq!(seeded(&config, 42), seeded(&config, 42));
        assert_ne!(seeded(&config, 1), seeded(&config, 2));
    }

    #[test]
    fn non_finite_parameters_rejected() {
        assert!(matches!(
            NoiseSynthesizer::new(f64::NAN, 1.0, 2, 1.3),
            Err(ConfigError::NonFinite {
                name: "base_amplitude",
                ..
            })
        ));
        assert!(NoiseSynthesizer::new(1.0, f64::INFINITY, 2, 1.3).is_err());
        assert!(NoiseSynthesizer::new(1.0, 1.0, 2, f64::NAN).is_err());
        assert!(
            NoiseSynthesizer::from_octaves(vec![Octave {
                frequency: 1.0,
                amplitude: f64::NAN,
            }])
            .is_err()
        );
    }

    #[test]
    fn deserialized_table_is_validated() {
        let bad = "octaves:\n  - frequency: .nan\n    amplitude: .inf\n";
        assert!(serde_yaml::from_str::<NoiseSynthesizer>(bad).is_err());

        let good = "octaves:\n  - frequency: 2.0\n    amplitude: 0.5\n";
        let synth: NoiseSynthesizer = serde_yaml::from_str(good).unwrap();
        assert_eq!(
            synth.octaves(),
            &[Octave {
                frequency: 2.0,
                amplitude: 0.5
            }]
        );
    }

    #[test]
    fn serialized_table_loads_back() {
        let synth = seeded(&NoiseConfig::new(0.5, 1.0, 3), 13);
        let text = serde_yaml::to_string(&synth).unwrap();
        let loaded: NoiseSynthesizer = serde_yaml::from_str(&text).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn nan_input_propagates() {
        let synth = seeded(&NoiseConfig::new(1.0, 1.0, 3), 4);
        assert!(synth.evaluate(f64::NAN).is_nan());
    }

    #[test]
    fn shared_across_threads() {
        let synth = std::sync::Arc::new(seeded(&NoiseConfig::default(), 11));
        let expected = synth.evaluate(1.25);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = synth.clone();
                std::thread::spawn(move || s.evaluate(1.25))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
