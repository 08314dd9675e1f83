//! Per-vertex reconstruction of the deformed position and lighting normal.
//!
//! Samples the displacement field at the vertex and one step below it,
//! estimates the local surface slope by finite difference, rebuilds the
//! vertex in the skirt's local cylindrical frame, then moves position and
//! normal into the shared rendering spaces.

use glam::{Vec3, Vec4};

use crate::displacement::Displacement;
use crate::params::DeformParams;
use crate::transforms::FrameTransforms;

/// One skirt vertex in its authored parameter encoding: the angle around the
/// cylinder axis (radians) and the signed height below the waistband.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamVertex {
    pub angle: f32,
    pub height: f32,
}

impl ParamVertex {
    pub fn new(angle: f32, height: f32) -> Self {
        Self { angle, height }
    }
}

/// Deformed position and unit normal in the skirt's local cylindrical frame,
/// before any camera transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Everything the rasterizer and lighting stages consume for one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedVertex {
    /// Clip-space position, for rasterization.
    pub clip_position: Vec4,
    /// View-space position, for lighting.
    pub view_position: Vec3,
    /// Unit view-space normal.
    pub view_normal: Vec3,
    /// Flat color, forwarded unchanged.
    pub color: Vec4,
}

/// Rebuild one deformed vertex in the local cylindrical frame.
///
/// The slope angle comes from the offsets at the vertex and one `y_step`
/// below it: `alpha = atan2(y_step, dr − prev_dr)`. At zero slope this is
/// π/2 and the normal comes out purely radial, the rest normal of a
/// cylinder wall.
pub fn reconstruct(
    field: &Displacement,
    vertex: ParamVertex,
    radius: f32,
    y_step: f32,
) -> LocalVertex {
    let dr = field.sample(vertex.height, vertex.angle);
    let prev_dr = field.sample(vertex.height - y_step, vertex.angle);
    let alpha = y_step.atan2(dr - prev_dr);

    let (sin_a, cos_a) = vertex.angle.sin_cos();
    let (sin_t, cos_t) = alpha.sin_cos();
    let sr = radius + dr;

    LocalVertex {
        // The skirt is authored with its height axis pointing down, so the
        // local frame negates it.
        position: Vec3::new(cos_a * sr, -vertex.height, sin_a * sr),
        normal: Vec3::new(cos_a * sin_t, cos_t, sin_a * sin_t),
    }
}

/// The full per-vertex routine: displacement, reconstruction, and the
/// transforms into view and clip space.
pub fn shade_vertex(
    vertex: ParamVertex,
    params: &DeformParams,
    transforms: &FrameTransforms,
) -> ShadedVertex {
    let field = Displacement::from_params(params);
    let local = reconstruct(&field, vertex, params.radius, params.y_step);

    ShadedVertex {
        clip_position: transforms.model_view_projection * local.position.extend(1.0),
        view_position: transforms.model_view.transform_point3(local.position),
        view_normal: (transforms.normal * local.normal).normalize(),
        color: params.color,
    }
}
