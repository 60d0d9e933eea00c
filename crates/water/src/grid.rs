use glam::DVec3;
use lagoon_common::{ConfigError, GpuVertex, SurfaceMesh, ensure_positive};

/// Flat plane mesh in the XZ plane, centred on the origin.
///
/// Vertices are laid out row-major: `(width_segments + 1)` per row along X,
/// `(depth_segments + 1)` rows along Z. Each cell is two triangles wound so
/// the rest normal points up (+Y).
#[derive(Debug, Clone)]
pub struct GridMesh {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    indices: Vec<u32>,
    columns: usize,
    rows: usize,
    dirty: bool,
}

impl GridMesh {
    pub fn new(
        width: f64,
        depth: f64,
        width_segments: usize,
        depth_segments: usize,
    ) -> Result<Self, ConfigError> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        if width_segments == 0 || depth_segments == 0 {
            return Err(ConfigError::InvalidMesh(format!(
                "grid needs at least one segment per side, got {width_segments}x{depth_segments}"
            )));
        }

        // Indices are u32; the last vertex index must fit.
        let too_large = || {
            ConfigError::InvalidMesh(format!(
                "{width_segments}x{depth_segments} grid exceeds the u32 index range"
            ))
        };
        let columns = width_segments.checked_add(1).ok_or_else(too_large)?;
        let rows = depth_segments.checked_add(1).ok_or_else(too_large)?;
        let vertex_count = columns
            .checked_mul(rows)
            .filter(|&n| n - 1 <= u32::MAX as usize)
            .ok_or_else(too_large)?;
        let step_x = width / width_segments as f64;
        let step_z = depth / depth_segments as f64;

        let mut positions = Vec::with_capacity(vertex_count);
        for iz in 0..rows {
            for ix in 0..columns {
                positions.push(DVec3::new(
                    -width * 0.5 + ix as f64 * step_x,
                    0.0,
                    -depth * 0.5 + iz as f64 * step_z,
                ));
            }
        }

        let mut indices = Vec::with_capacity(width_segments * depth_segments * 6);
        for iz in 0..depth_segments {
            for ix in 0..width_segments {
                let a = (iz * columns + ix) as u32;
                let b = a + 1;
                let c = a + columns as u32;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        let normals = vec![DVec3::Y; positions.len()];
        Ok(Self {
            positions,
            normals,
            indices,
            columns,
            rows,
            dirty: true,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices per row (along X) and number of rows (along Z).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Row-major vertex index for grid coordinate `(ix, iz)`.
    pub fn index_of(&self, ix: usize, iz: usize) -> Option<usize> {
        (ix < self.columns && iz < self.rows).then_some(iz * self.columns + ix)
    }

    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return whether the buffer needs uploading and clear the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Interleaved vertex data for upload.
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| GpuVertex::new(*p, *n))
            .collect()
    }

    /// Lowest and highest vertex heights, ignoring NaN.
    pub fn height_range(&self) -> (f64, f64) {
        self.positions
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }
}

impl SurfaceMesh for GridMesh {
    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [DVec3] {
        &mut self.positions
    }

    /// Smoothed normals: area-weighted sum of adjacent face normals.
    fn recompute_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = DVec3::ZERO);
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = self.positions[a];
            let face = (self.positions[b] - p0).cross(self.positions[c] - p0);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for n in &mut self.normals {
            *n = n.try_normalize().unwrap_or(DVec3::Y);
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
