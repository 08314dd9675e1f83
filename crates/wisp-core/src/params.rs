use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Per-frame animation parameters.
///
/// One block is built per frame and shared read-only by every vertex
/// evaluation in that frame's batch; nothing here mutates mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeformParams {
    /// Base cylinder radius the skirt rests on when undeformed.
    pub radius: f32,
    /// Vertical step used for the finite-difference slope estimate.
    pub y_step: f32,
    /// Linear outward/inward tilt of the whole skirt, usually driven by the
    /// flare envelope. Positive flares the hem out, negative pulls it in.
    pub flare: f32,
    /// Seconds elapsed since the animation started.
    pub time: f32,
    /// Flat mesh color (RGBA), forwarded unchanged to the lighting stage.
    pub color: Vec4,
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            radius: 0.45,
            y_step: 0.1,
            flare: 0.0,
            time: 0.0,
            color: Vec4::ONE,
        }
    }
}
