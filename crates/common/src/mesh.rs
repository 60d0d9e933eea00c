use bytemuck::{Pod, Zeroable};
use glam::DVec3;

/// Host-owned vertex storage the core writes into.
///
/// Implementations keep the vertex count fixed for the lifetime of the mesh;
/// writers may change component values but never resize the buffer.
pub trait SurfaceMesh {
    /// Current vertex positions.
    fn positions(&self) -> &[DVec3];

    /// Mutable access to vertex positions. The slice length is fixed.
    fn positions_mut(&mut self) -> &mut [DVec3];

    /// Rebuild normals from the current positions. Flat or smoothed is the
    /// implementation's choice.
    fn recompute_normals(&mut self);

    /// Flag the buffer for upload before the next render.
    fn mark_dirty(&mut self);
}

/// Vertex layout uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GpuVertex {
    /// Narrow a double-precision position/normal pair to the upload layout.
    pub fn new(position: DVec3, normal: DVec3) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
        }
    }
}
