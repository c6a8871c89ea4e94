/// Homogeneous transform builders (translate, rotate, scale)
///
/// Angles are in degrees. Matrices act on column vectors: `m * v`.
use crate::error::{MathError, MathResult};
use crate::matrix::{Mat3, Mat4};
use crate::vector::{Vec3, Vector};

/// Convert degrees to radians
pub fn radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Transform builder for 2D and 3D homogeneous transformations
pub struct Transform;

impl Transform {
    /// Create a 4x4 translation matrix
    pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a 3x3 translation matrix for 2D affine work
    pub fn translate_2d(x: f32, y: f32) -> Mat3 {
        Mat3::from_rows([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    /// Rotate `angle` degrees counter-clockwise around an arbitrary axis
    /// (Rodrigues' formula). The axis is normalized first; a zero axis is
    /// rejected. Agrees with `rotate_x`/`rotate_y`/`rotate_z` on the
    /// coordinate axes.
    pub fn rotate(angle: f32, axis: Vec3) -> MathResult<Mat4> {
        let axis = axis
            .normalize(false)
            .map_err(|_| MathError::degenerate("rotate: axis has zero length"))?;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());

        let (s, c) = radians(angle).sin_cos();
        let omc = 1.0 - c;

        Ok(Mat4::from_rows([
            [x * x * omc + c, x * y * omc - z * s, x * z * omc + y * s, 0.0],
            [x * y * omc + z * s, y * y * omc + c, y * z * omc - x * s, 0.0],
            [x * z * omc - y * s, y * z * omc + x * s, z * z * omc + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    pub fn rotate_x(angle: f32) -> Mat4 {
        let (s, c) = radians(angle).sin_cos();
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotate_y(angle: f32) -> Mat4 {
        let (s, c) = radians(angle).sin_cos();
        Mat4::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotate_z(angle: f32) -> Mat4 {
        let (s, c) = radians(angle).sin_cos();
        Mat4::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a 4x4 non-uniform scale matrix
    pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Legacy uniform scaling of a vector's components. Prefer `v * k`.
    pub fn scale_vector<const N: usize>(k: f32, v: &Vector<N>) -> Vector<N> {
        v.scale(k)
    }

    /// Multiply left to right; an empty list yields the identity
    pub fn compose(matrices: &[Mat4]) -> Mat4 {
        matrices
            .iter()
            .fold(Mat4::identity(), |acc, m| acc.mul_matrix(m))
    }

    /// Create a model-view-projection matrix
    pub fn model_view_projection(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        *projection * *view * *model
    }
}
