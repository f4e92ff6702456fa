//! Body-centered cubic lattice enumeration
//!
//! Integer coordinates (x, y, z) each run -size/2 ..= size/2. Two placement
//! rules are checked independently for every triple:
//! - corner: all coordinates even
//! - center: at least one coordinate odd and x + y + z even
//!
//! The parity constraints make the rules mutually exclusive, so a triple
//! yields at most one body.

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

use super::body::Body;

/// Rejected lattice parameters; generation has no partial-result path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LatticeError {
    #[error("lattice size must be non-negative, got {0}")]
    InvalidSize(i32),
    #[error("lattice spacing must be positive and finite")]
    InvalidSpacing,
}

/// True when (x, y, z) is a cube corner point
#[inline]
pub fn is_corner(x: i32, y: i32, z: i32) -> bool {
    x % 2 == 0 && y % 2 == 0 && z % 2 == 0
}

/// True when (x, y, z) carries a cube center point (offset by half a step)
#[inline]
pub fn is_center(x: i32, y: i32, z: i32) -> bool {
    (x % 2 != 0 || y % 2 != 0 || z % 2 != 0) && (x + y + z) % 2 == 0
}

/// Enumerate the BCC lattice and place one freshly built body per point, in
/// x-outermost iteration order. Fails fast on invalid parameters.
pub fn generate_lattice(
    size: i32,
    spacing: f32,
    rng: &mut impl Rng,
) -> Result<Vec<Body>, LatticeError> {
    if size < 0 {
        return Err(LatticeError::InvalidSize(size));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(LatticeError::InvalidSpacing);
    }

    let half = size / 2;
    let mut bodies = Vec::new();

    for x in -half..=half {
        for y in -half..=half {
            for z in -half..=half {
                if is_corner(x, y, z) {
                    let pos = Vec3::new(x as f32, y as f32, z as f32) * spacing;
                    bodies.push(Body::new_at(pos, rng));
                }

                if is_center(x, y, z) {
                    let pos = Vec3::new(
                        (x as f32 + 0.5) * spacing,
                        (y as f32 + 0.5) * spacing,
                        (z as f32 + 0.5) * spacing,
                    );
                    bodies.push(Body::new_at(pos, rng));
                }
            }
        }
    }

    log::debug!(
        "generated {} bodies (size={}, spacing={})",
        bodies.len(),
        size,
        spacing
    );

    Ok(bodies)
}
