//! UV-sphere mesh generation and surface noise
//!
//! Meshes are plain CPU-side data; the renderer uploads them once at startup.
//! Noise is applied per position component, not per vertex, so a perturbed
//! sphere loses its symmetry in all three axes independently.

use glam::Vec3;
use rand::Rng;

/// Triangle mesh with per-vertex positions and normals
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a UV sphere of the given radius with `segments` longitude
    /// divisions and `rings` latitude divisions. Vertex count is
    /// (rings + 1) * (segments + 1); seam and pole vertices are duplicated.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let seg = segments as usize;
        let ring = rings as usize;

        let mut positions = Vec::with_capacity((ring + 1) * (seg + 1));
        let mut normals = Vec::with_capacity((ring + 1) * (seg + 1));

        for r in 0..=ring {
            let phi = std::f32::consts::PI * r as f32 / ring as f32;
            let y = phi.cos();
            let ring_r = phi.sin();

            for s in 0..=seg {
                let theta = std::f32::consts::TAU * s as f32 / seg as f32;
                let n = Vec3::new(ring_r * theta.cos(), y, ring_r * theta.sin());
                positions.push(n * radius);
                normals.push(n);
            }
        }

        let mut indices = Vec::with_capacity(ring * seg * 6);
        for r in 0..ring as u32 {
            let curr = r * (segments + 1);
            let next = curr + segments + 1;
            // CCW from outside, so face normals point outward
            for s in 0..segments {
                indices.push(curr + s);
                indices.push(curr + s + 1);
                indices.push(next + s);

                indices.push(curr + s + 1);
                indices.push(next + s + 1);
                indices.push(next + s);
            }
        }

        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Perturb every position component by an independent uniform offset in
    /// [-span/2, +span/2], then recompute normals to match the new surface.
    /// One-time operation; the noise is baked into the vertex data.
    pub fn apply_surface_noise(&mut self, span: f32, rng: &mut impl Rng) {
        for pos in &mut self.positions {
            pos.x += (rng.random::<f32>() - 0.5) * span;
            pos.y += (rng.random::<f32>() - 0.5) * span;
            pos.z += (rng.random::<f32>() - 0.5) * span;
        }
        self.recompute_normals();
    }

    /// Rebuild normals from face geometry (area-weighted accumulation).
    /// Required after any vertex mutation.
    pub fn recompute_normals(&mut self) {
        for n in &mut self.normals {
            *n = Vec3::ZERO;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for n in &mut self.normals {
            *n = n.normalize_or_zero();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_uv_sphere_vertex_count() {
        let mesh = SphereMesh::uv_sphere(1.0, 32, 32);
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert_eq!(mesh.indices.len(), 32 * 32 * 6);
    }

    #[test]
    fn test_uv_sphere_on_surface() {
        let mesh = SphereMesh::uv_sphere(2.5, 16, 16);
        for pos in &mesh.positions {
            assert!((pos.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_noise_bounded_per_component() {
        let clean = SphereMesh::uv_sphere(1.0, 32, 32);
        let mut noised = clean.clone();
        let mut rng = Pcg32::seed_from_u64(7);
        noised.apply_surface_noise(0.1, &mut rng);

        let mut any_changed = false;
        for (a, b) in clean.positions.iter().zip(&noised.positions) {
            let d = *b - *a;
            assert!(d.x.abs() <= 0.05 + 1e-6);
            assert!(d.y.abs() <= 0.05 + 1e-6);
            assert!(d.z.abs() <= 0.05 + 1e-6);
            if d != Vec3::ZERO {
                any_changed = true;
            }
        }
        assert!(any_changed, "noise must actually perturb the surface");
    }

    #[test]
    fn test_noise_seed_reproducible() {
        let mut a = SphereMesh::uv_sphere(1.0, 8, 8);
        let mut b = SphereMesh::uv_sphere(1.0, 8, 8);
        a.apply_surface_noise(0.1, &mut Pcg32::seed_from_u64(42));
        b.apply_surface_noise(0.1, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_recomputed_normals_unit_length() {
        let mut mesh = SphereMesh::uv_sphere(1.0, 16, 16);
        let mut rng = Pcg32::seed_from_u64(3);
        mesh.apply_surface_noise(0.1, &mut rng);
        // Poles and seams aside, normals must come back normalized
        for n in &mesh.normals {
            let len = n.length();
            assert!(len < 1.0 + 1e-4);
            if len > 0.0 {
                assert!((len - 1.0).abs() < 1e-4);
            }
        }
    }
}
