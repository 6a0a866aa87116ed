// sphere sampling, spike displacement and blending between the two

use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use rand::Rng;

use crate::config::{DISPLACEMENT_MIN, DISPLACEMENT_SPAN};
use crate::error::MorphError;
use super::PointSequence;

/// Reads the vertex positions of `mesh` in vertex order.
/// # Returns an empty sequence when the mesh has no `Float32x3` position attribute.
pub fn sample(mesh: &Mesh) -> PointSequence {
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => {
            positions.iter().map(|p| Vec3::from_array(*p)).collect()
        }
        _ => Vec::new(),
    }
}

// the sphere is centred at the origin, so each point is also its own outward normal
pub fn displace_with(base: &[Vec3], mut magnitude: impl FnMut(usize) -> f32) -> PointSequence {
    base.iter()
        .enumerate()
        .map(|(i, v)| *v + v.normalize_or_zero() * magnitude(i))
        .collect()
}

/// Maps a uniform draw `u` in `[0, 1)` onto the spike length range `[2, 5)`.
pub fn spike_magnitude(u: f32) -> f32 {
    // f32 rounding sends the largest draws to exactly 5, keep the range half-open
    let ceiling = f32::from_bits((DISPLACEMENT_MIN + DISPLACEMENT_SPAN).to_bits() - 1);
    (DISPLACEMENT_MIN + DISPLACEMENT_SPAN * u).min(ceiling)
}

/// Pushes every point outward by an independent magnitude in `[2, 5)`.
pub fn displace<R: Rng>(base: &[Vec3], rng: &mut R) -> PointSequence {
    displace_with(base, |_| spike_magnitude(rng.random::<f32>()))
}

/// Per-index linear blend, `a` at `t = 0` and `b` at `t = 1`.
/// `t` is not clamped, values outside `[0, 1]` extrapolate.
pub fn interpolate(a: &[Vec3], b: &[Vec3], t: f32) -> Result<PointSequence, MorphError> {
    if a.len() != b.len() {
        return Err(MorphError::LengthMismatch { left: a.len(), right: b.len() });
    }

    // weighted form keeps both endpoints bit-exact
    Ok(a.iter().zip(b).map(|(from, to)| *from * (1.0 - t) + *to * t).collect())
}
