use glam::{DMat4, DVec3, DVec4};
use lagoon_common::{ConfigError, ensure_finite};
use serde::{Deserialize, Serialize};

/// Smallest anchor-to-floor gap used when sizing the shadow.
pub const HEIGHT_EPSILON: f64 = 1e-6;

/// Fixed projector constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub floor_height: f64,
    /// Side size of the shadow when the anchor is one unit above the floor.
    pub base_size: f64,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            floor_height: -1.0,
            base_size: 0.5,
        }
    }
}

impl ShadowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("floor_height", self.floor_height)?;
        ensure_finite("base_size", self.base_size)?;
        Ok(())
    }
}

/// Whether the cached transform matches the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowState {
    Clean,
    /// The anchor moved since the last recomputation.
    Dirty,
}

/// `base_size / max(|anchor_height - floor_height|, HEIGHT_EPSILON)`.
///
/// A NaN gap is not clamped and yields a NaN size.
pub fn side_size(anchor_height: f64, floor_height: f64, base_size: f64) -> f64 {
    let gap = (anchor_height - floor_height).abs();
    let gap = if gap < HEIGHT_EPSILON { HEIGHT_EPSILON } else { gap };
    base_size / gap
}

/// Owns the shadow quad's world transform and keeps it in step with an anchor.
#[derive(Debug, Clone)]
pub struct ContactShadowProjector {
    config: ShadowConfig,
    anchor: DVec3,
    state: ShadowState,
    transform: DMat4,
    side_size: f64,
    recompute_count: u64,
}

impl ContactShadowProjector {
    /// Attach to an anchor currently at `anchor`. Starts dirty.
    pub fn new(config: ShadowConfig, anchor: DVec3) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            floor_height = config.floor_height,
            base_size = config.base_size,
            "contact shadow attached"
        );
        Ok(Self {
            config,
            anchor,
            state: ShadowState::Dirty,
            transform: DMat4::IDENTITY,
            side_size: 0.0,
            recompute_count: 0,
        })
    }

    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    pub fn state(&self) -> ShadowState {
        self.state
    }

    pub fn anchor(&self) -> DVec3 {
        self.anchor
    }

    /// Last computed transform. Stale while the state is [`ShadowState::Dirty`].
    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    /// Side size from the last recomputation.
    pub fn side_size(&self) -> f64 {
        self.side_size
    }

    /// Number of times the transform has been rebuilt.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Record the anchor's world position. Any change marks the shadow dirty.
    pub fn set_anchor_position(&mut self, position: DVec3) {
        if position != self.anchor {
            self.anchor = position;
            self.state = ShadowState::Dirty;
        }
    }

    pub fn set_anchor_height(&mut self, height: f64) {
        self.set_anchor_position(DVec3::new(self.anchor.x, height, self.anchor.z));
    }

    /// Move the anchor to `anchor_height` and return the up-to-date transform,
    /// rebuilding it only if the anchor moved since the last call.
    pub fn recompute(&mut self, anchor_height: f64) -> DMat4 {
        self.set_anchor_height(anchor_height);
        self.refresh()
    }

    /// Rebuild only if dirty.
    pub fn refresh(&mut self) -> DMat4 {
        if self.state == ShadowState::Dirty {
            self.rebuild();
        }
        self.transform
    }

    /// Rebuild regardless of state.
    pub fn force_recompute(&mut self) -> DMat4 {
        self.rebuild();
        self.transform
    }

    fn rebuild(&mut self) {
        let size = side_size(self.anchor.y, self.config.floor_height, self.config.base_size);
        // X/Z scaled, Y collapsed onto the floor, no rotation.
        self.transform = DMat4::from_cols(
            DVec4::new(size, 0.0, 0.0, 0.0),
            DVec4::ZERO,
            DVec4::new(0.0, 0.0, size, 0.0),
            DVec4::new(self.anchor.x, self.config.floor_height, self.anchor.z, 1.0),
        );
        self.side_size = size;
        self.state = ShadowState::Clean;
        self.recompute_count += 1;
        tracing::trace!(
            anchor_height = self.anchor.y,
            side_size = size,
            "contact shadow recomputed"
        );
    }
}
