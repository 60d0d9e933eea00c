use glam::{DMat4, DVec3};
use lagoon_common::SurfaceMesh;
use lagoon_noise::NoiseSynthesizer;
use lagoon_shadow::ContactShadowProjector;
use lagoon_water::{GridMesh, WaterSurfaceSimulator};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::FrameClock;
use crate::config::{LevelConfig, LevelError};
use crate::focal::FocalObject;

/// The level state advanced by the host once per frame.
///
/// Owns the water mesh, the focal object, the contact shadow and the ambient
/// signal. The host calls [`Level::step`] before rendering and then reads the
/// outputs; nothing here is driven by render callbacks.
#[derive(Debug, Clone)]
pub struct Level {
    clock: FrameClock,
    seed: u64,
    surface: GridMesh,
    water: WaterSurfaceSimulator,
    focal: FocalObject,
    shadow: ContactShadowProjector,
    ambient: NoiseSynthesizer,
    ambient_level: f64,
}

impl Level {
    /// Build a level from the default config.
    pub fn new() -> Result<Self, LevelError> {
        Self::from_config(&LevelConfig::default())
    }

    /// Default config with a specific seed.
    pub fn with_seed(seed: u64) -> Result<Self, LevelError> {
        Self::from_config(&LevelConfig {
            seed,
            ..LevelConfig::default()
        })
    }

    /// Build a level. Octave tables are drawn from a `StdRng` seeded with
    /// `config.seed` in a fixed order: x-noise, z-noise, ambient, hover.
    pub fn from_config(config: &LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let x_noise = NoiseSynthesizer::from_config(&config.x_noise, &mut rng)?;
        let z_noise = NoiseSynthesizer::from_config(&config.z_noise, &mut rng)?;
        let ambient = NoiseSynthesizer::from_config(&config.ambient, &mut rng)?;
        let hover = NoiseSynthesizer::from_config(&config.focal.hover, &mut rng)?;

        let water = WaterSurfaceSimulator::with_params(x_noise, z_noise, config.water.params)?;
        let mut surface = config.water.build_mesh()?;
        // Frame zero shows the surface as it is at t = 0.
        water.update(&mut surface, 0.0);

        let focal = FocalObject::new(
            DVec3::new(0.0, config.focal.hover_height, 0.0),
            config.focal.spin_rate,
            hover,
        );
        let mut shadow = ContactShadowProjector::new(config.shadow, focal.position())?;
        shadow.refresh();

        tracing::info!(
            seed = config.seed,
            vertices = surface.vertex_count(),
            "level built"
        );

        Ok(Self {
            clock: FrameClock::new(),
            seed: config.seed,
            surface,
            water,
            focal,
            shadow,
            ambient_level: ambient.evaluate(0.0),
            ambient,
        })
    }

    /// Run one update pass, `dt` seconds after the previous one.
    ///
    /// Order: clock, focal object, water, shadow, ambient. The water and
    /// shadow touch disjoint state and do not depend on each other.
    pub fn step(&mut self, dt: f64) {
        let _span = tracing::info_span!("level_step", frame = self.clock.frame() + 1).entered();

        self.clock.advance(dt);
        let elapsed = self.clock.elapsed();

        self.focal.update(elapsed, dt);
        self.water.update(&mut self.surface, elapsed);

        self.shadow.set_anchor_position(self.focal.position());
        self.shadow.refresh();

        self.ambient_level = self.ambient.evaluate(elapsed);

        tracing::trace!(
            elapsed,
            anchor_height = self.focal.position().y,
            side_size = self.shadow.side_size(),
            ambient = self.ambient_level,
            "level step complete"
        );
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn surface(&self) -> &GridMesh {
        &self.surface
    }

    /// Mutable access for the host's upload step (e.g. [`GridMesh::take_dirty`]).
    pub fn surface_mut(&mut self) -> &mut GridMesh {
        &mut self.surface
    }

    pub fn water(&self) -> &WaterSurfaceSimulator {
        &self.water
    }

    pub fn focal(&self) -> &FocalObject {
        &self.focal
    }

    pub fn shadow(&self) -> &ContactShadowProjector {
        &self.shadow
    }

    /// World transform of the shadow quad.
    pub fn shadow_transform(&self) -> DMat4 {
        self.shadow.transform()
    }

    /// Ambient signal at the current time, for the host audio system.
    pub fn ambient_level(&self) -> f64 {
        self.ambient_level
    }

    /// Deterministic hash of the frame outputs, for replay comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.clock.frame().to_le_bytes());
        mix(&mut h, &self.clock.elapsed().to_le_bytes());
        mix(&mut h, &self.seed.to_le_bytes());
        for p in self.surface.positions() {
            mix(&mut h, &p.y.to_le_bytes());
        }
        for v in self.shadow.transform().to_cols_array() {
            mix(&mut h, &v.to_le_bytes());
        }
        mix(&mut h, &self.ambient_level.to_le_bytes());
        h
    }
}
