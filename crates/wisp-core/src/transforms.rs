//! Per-frame transform block.
//!
//! The host camera/scene code owns these matrices; they are captured once per
//! frame and shared read-only across the whole vertex batch.

use glam::{Mat3, Mat4};

/// The camera-dependent matrices for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    /// Local → view space.
    pub model_view: Mat4,
    /// Normal-correction matrix: inverse-transpose of the model-view upper
    /// 3×3. Equals the rotation block for rigid transforms.
    pub normal: Mat3,
    /// Local → clip space.
    pub model_view_projection: Mat4,
}

impl FrameTransforms {
    /// Identity block: outputs equal local-frame values. Useful for tests
    /// and for baking the deformation in object space.
    pub fn identity() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            normal: Mat3::IDENTITY,
            model_view_projection: Mat4::IDENTITY,
        }
    }

    /// Derive the full block from a model-view and projection pair.
    pub fn from_model_view(model_view: Mat4, projection: Mat4) -> Self {
        Self {
            model_view,
            normal: Mat3::from_mat4(model_view).inverse().transpose(),
            model_view_projection: projection * model_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec3, Vec4};

    #[test]
    fn rigid_normal_matrix_is_the_rotation_block() {
        let rotation = Mat4::from_rotation_y(0.8) * Mat4::from_rotation_x(-0.3);
        let mv = Mat4::from_translation(Vec3::new(1.0, -2.0, 5.0)) * rotation;
        let t = FrameTransforms::from_model_view(mv, Mat4::IDENTITY);

        let expected = Mat3::from_mat4(rotation);
        for col in 0..3 {
            let a = t.normal.col(col);
            let b = expected.col(col);
            assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn mvp_composes_projection_after_model_view() {
        let mv = Mat4::from_translation(Vec3::new(0.5, 0.0, -3.0));
        let proj = Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 100.0);
        let t = FrameTransforms::from_model_view(mv, proj);
        assert_eq!(t.model_view_projection, proj * mv);
    }

    #[test]
    fn scaled_view_still_corrects_normals() {
        // Non-uniform scale shears naive transformed normals; the
        // inverse-transpose keeps them perpendicular to the surface.
        let mv = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let t = FrameTransforms::from_model_view(mv, Mat4::IDENTITY);

        // A plane with normal (1, 1, 0)/√2 contains direction (1, -1, 0);
        // after scaling, the transformed normal must stay perpendicular to
        // the transformed in-plane direction.
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        let d = Vec3::new(1.0, -1.0, 0.0);
        let n2 = (t.normal * n).normalize();
        let d2 = (mv * Vec4::new(d.x, d.y, d.z, 0.0)).truncate();
        assert_relative_eq!(n2.dot(d2), 0.0, epsilon = 1e-5);
    }
}
