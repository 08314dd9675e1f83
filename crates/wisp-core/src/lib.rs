//! Procedural skirt ripple animation for real-time characters.
//!
//! Deforms a cylindrical skirt mesh into a rippling, time-driven wave shape,
//! producing displaced vertex positions and matching lighting normals. The
//! host rendering pipeline supplies per-vertex attributes and the frame's
//! transform matrices; this crate returns the clip-space position and the
//! view-space position/normal/color set it should feed to rasterization and
//! lighting.
//!
//! Every evaluation is a pure function of its inputs: no state is shared
//! between vertices or retained between frames, so whole batches can be
//! mapped in parallel (enable the `threading` feature for a rayon-backed
//! grid deformation).

pub mod displacement;
pub mod envelope;
pub mod mesh;
pub mod params;
pub mod transforms;
pub mod vertex;

pub use displacement::Displacement;
pub use envelope::{flare_bias, FlarePhase};
pub use mesh::{GridError, SkirtGrid};
pub use params::DeformParams;
pub use transforms::FrameTransforms;
pub use vertex::{reconstruct, shade_vertex, LocalVertex, ParamVertex, ShadedVertex};
