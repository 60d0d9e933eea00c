use glam::DVec3;
use lagoon_kernel::Level;
use lagoon_shadow::ShadowState;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: DVec3,
    /// Point the camera is looking at.
    pub target: DVec3,
    /// Field of view in degrees.
    pub fov_degrees: f64,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: DVec3::new(0.0, 0.0, 2.0),
            target: DVec3::ZERO,
            fov_degrees: 90.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the level after [`Level::step`] and produces output.
/// It never mutates the level.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given level state and view.
    fn render(&self, level: &Level, view: &RenderView) -> Self::Output;
}

/// Debug text renderer: a human-readable frame summary.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, level: &Level, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Level (frame={}, elapsed={:.3}s, seed={}) ===\n",
            level.frame(),
            level.elapsed(),
            level.seed()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        let surface = level.surface();
        let (lo, hi) = surface.height_range();
        out.push_str(&format!(
            "Water: vertices={} height=[{:.4}, {:.4}]\n",
            surface.vertex_count(),
            lo,
            hi
        ));

        let focal = level.focal();
        let world = focal.world_matrix();
        let p = world.transform_point3(DVec3::ZERO);
        let facing = world.transform_vector3(DVec3::X);
        out.push_str(&format!(
            "Focal: pos=({:.3}, {:.3}, {:.3}) facing=({:.3}, {:.3}, {:.3}) yaw={:.3}\n",
            p.x,
            p.y,
            p.z,
            facing.x,
            facing.y,
            facing.z,
            focal.yaw()
        ));

        let shadow = level.shadow();
        let state = match shadow.state() {
            ShadowState::Clean => "clean",
            ShadowState::Dirty => "dirty",
        };
        out.push_str(&format!(
            "Shadow: side={:.4} floor={:.2} state={} rebuilds={}\n",
            shadow.side_size(),
            shadow.config().floor_height,
            state,
            shadow.recompute_count()
        ));
        out.push_str(&format!("Ambient: level={:.4}\n", level.ambient_level()));

        tracing::trace!(frame = level.frame(), bytes = out.len(), "debug frame rendered");
        out
    }
}
