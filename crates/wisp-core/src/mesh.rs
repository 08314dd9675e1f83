//! Skirt grid in cylinder parameter space, and whole-grid deformation.
//!
//! The skirt is authored as rings of quads over the (angle, height) parameter
//! plane; the grid stores one shared vertex per grid point and indexed
//! triangles, two per quad. Deformation maps every parameter vertex through
//! the per-vertex routine with one shared parameter/transform block.

#[cfg(feature = "threading")]
use rayon::prelude::*;
use thiserror::Error;

use crate::displacement::Displacement;
use crate::params::DeformParams;
use crate::transforms::FrameTransforms;
use crate::vertex::{reconstruct, shade_vertex, LocalVertex, ParamVertex, ShadedVertex};

/// Subdivisions per full turn used by the stock skirt.
pub const DEFAULT_DETAILS: usize = 20;
/// Height extent below the waistband covered by the stock skirt.
pub const DEFAULT_EXTENT: f32 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("subdivision count must be non-zero")]
    ZeroDetails,
    #[error("height extent must be positive, got {0}")]
    NonPositiveExtent(f32),
}

/// Indexed triangle grid over the cylinder's parameter plane.
///
/// Ring 0 is the attachment ring at height 0 (the waistband); ring `rings`
/// is the hem. Columns wrap around the axis, so column `details - 1`
/// shares its right edge with column 0.
#[derive(Debug, Clone)]
pub struct SkirtGrid {
    pub vertices: Vec<ParamVertex>,
    /// Triangle indices into `vertices`, two triangles per grid quad,
    /// sharing the quad's winding.
    pub indices: Vec<u32>,
    /// Columns per full turn.
    pub details: usize,
    /// Quad rings between waistband and hem.
    pub rings: usize,
    /// Angle covered by one column.
    pub angle_step: f32,
    /// Height covered by one ring. Also the natural finite-difference step
    /// for this grid's density.
    pub y_step: f32,
}

impl SkirtGrid {
    /// Build a grid with `details` subdivisions per turn covering `extent`
    /// of height below the waistband.
    ///
    /// The vertical step is coupled to the subdivision count (`2 / details`,
    /// the authored ratio), and the extent is quantized to whole rings.
    pub fn new(details: usize, extent: f32) -> Result<Self, GridError> {
        if details == 0 {
            return Err(GridError::ZeroDetails);
        }
        if extent <= 0.0 {
            return Err(GridError::NonPositiveExtent(extent));
        }
        Ok(Self::build(details, extent))
    }

    fn build(details: usize, extent: f32) -> Self {
        let angle_step = std::f32::consts::TAU / details as f32;
        let y_step = 2.0 / details as f32;
        let rings = ((extent / y_step).round() as usize).max(1);

        let mut vertices = Vec::with_capacity((rings + 1) * details);
        for ring in 0..=rings {
            let height = ring as f32 * y_step;
            for col in 0..details {
                vertices.push(ParamVertex::new(col as f32 * angle_step, height));
            }
        }

        let mut indices = Vec::with_capacity(rings * details * 6);
        for ring in 0..rings {
            let base = (ring * details) as u32;
            let next = ((ring + 1) * details) as u32;
            for col in 0..details as u32 {
                let right = (col + 1) % details as u32;
                // Quad corners in authored order: (angle, h), (angle+Δ, h),
                // (angle+Δ, h+Δ), (angle, h+Δ).
                let a = base + col;
                let b = base + right;
                let c = next + right;
                let d = next + col;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }

        Self { vertices, indices, details, rings, angle_step, y_step }
    }

    /// The stock ghost-skirt grid: 20 subdivisions per turn, 0.5 extent.
    pub fn stock() -> Self {
        Self::build(DEFAULT_DETAILS, DEFAULT_EXTENT)
    }

    /// Deform every vertex in the skirt's local frame, without any camera
    /// transform. This is what offline baking consumes.
    pub fn deform_local(&self, params: &DeformParams) -> Vec<LocalVertex> {
        let field = Displacement::from_params(params);
        let run = |v: &ParamVertex| reconstruct(&field, *v, params.radius, params.y_step);

        #[cfg(feature = "threading")]
        {
            self.vertices.par_iter().map(run).collect()
        }
        #[cfg(not(feature = "threading"))]
        {
            self.vertices.iter().map(run).collect()
        }
    }

    /// Run every vertex through the full per-vertex routine.
    ///
    /// All evaluations share the same read-only blocks and are independent,
    /// so the parallel path (under the `threading` feature) produces output
    /// identical to the serial one.
    pub fn deform(&self, params: &DeformParams, transforms: &FrameTransforms) -> Vec<ShadedVertex> {
        let run = |v: &ParamVertex| shade_vertex(*v, params, transforms);

        #[cfg(feature = "threading")]
        {
            self.vertices.par_iter().map(run).collect()
        }
        #[cfg(not(feature = "threading"))]
        {
            self.vertices.iter().map(run).collect()
        }
    }
}
