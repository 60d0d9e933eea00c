use glam::DVec3;
use lagoon_common::{ConfigError, SurfaceMesh, ensure_finite, ensure_positive};
use lagoon_noise::NoiseSynthesizer;
use serde::{Deserialize, Serialize};

/// Simulation constants for the water surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    /// Multiplier from elapsed seconds to ocean time.
    pub time_dilation: f64,
    /// Distance from the origin at which attenuation reaches zero.
    pub radius: f64,
    pub falloff_exponent: f64,
    /// Flatten vertices past `radius` instead of letting attenuation go negative.
    pub clamp_attenuation: bool,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            time_dilation: 1.5,
            radius: 50.0,
            falloff_exponent: 0.5,
            clamp_attenuation: false,
        }
    }
}

impl WaterParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("time_dilation", self.time_dilation)?;
        ensure_positive("radius", self.radius)?;
        ensure_finite("falloff_exponent", self.falloff_exponent)?;
        Ok(())
    }
}

/// Radial falloff `1 - (distance / radius)^falloff_exponent`.
///
/// Negative past `radius` unless `clamp_attenuation` is set. NaN stays NaN.
pub fn attenuation(distance: f64, params: &WaterParams) -> f64 {
    let atten = 1.0 - (distance / params.radius).powf(params.falloff_exponent);
    if params.clamp_attenuation && atten < 0.0 {
        0.0
    } else {
        atten
    }
}

/// Displaces vertex heights with two noise fields, one per horizontal axis.
#[derive(Debug, Clone)]
pub struct WaterSurfaceSimulator {
    x_noise: NoiseSynthesizer,
    z_noise: NoiseSynthesizer,
    params: WaterParams,
}

impl WaterSurfaceSimulator {
    /// Simulator with default [`WaterParams`].
    pub fn new(x_noise: NoiseSynthesizer, z_noise: NoiseSynthesizer) -> Self {
        Self {
            x_noise,
            z_noise,
            params: WaterParams::default(),
        }
    }

    pub fn with_params(
        x_noise: NoiseSynthesizer,
        z_noise: NoiseSynthesizer,
        params: WaterParams,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            x_noise,
            z_noise,
            params,
        })
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    pub fn x_noise(&self) -> &NoiseSynthesizer {
        &self.x_noise
    }

    pub fn z_noise(&self) -> &NoiseSynthesizer {
        &self.z_noise
    }

    /// Surface height at `(x, z)` after `elapsed` seconds.
    pub fn height_at(&self, x: f64, z: f64, elapsed: f64) -> f64 {
        let ocean_time = elapsed * self.params.time_dilation;
        self.height_at_ocean_time(x, z, ocean_time)
    }

    fn height_at_ocean_time(&self, x: f64, z: f64, ocean_time: f64) -> f64 {
        let distance = (x * x + z * z).sqrt();
        let raw = self.x_noise.evaluate(x) * ocean_time.sin()
            + self.z_noise.evaluate(z + ocean_time);
        raw * attenuation(distance, &self.params)
    }

    /// Write heights into a raw position buffer. Only `y` is touched.
    pub fn displace(&self, positions: &mut [DVec3], elapsed: f64) {
        let ocean_time = elapsed * self.params.time_dilation;
        for p in positions.iter_mut() {
            p.y = self.height_at_ocean_time(p.x, p.z, ocean_time);
        }
    }

    /// Per-frame entry point: displace, rebuild normals, flag for upload.
    pub fn update<M: SurfaceMesh + ?Sized>(&self, mesh: &mut M, elapsed: f64) {
        self.displace(mesh.positions_mut(), elapsed);
        mesh.recompute_normals();
        mesh.mark_dirty();

        if tracing::enabled!(tracing::Level::TRACE) {
            let (lo, hi) = mesh
                .positions()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p.y), hi.max(p.y))
                });
            tracing::trace!(
                vertices = mesh.positions().len(),
                elapsed,
                min_height = lo,
                max_height = hi,
                "water surface updated"
            );
        }
    }
}
