/// MV3D Core - vector/matrix kernel for WebGL-style rendering
///
/// Fixed-size vectors and square matrices, determinants and inverses,
/// transform and camera/projection builders, and packing into the flat
/// float layout expected by graphics uniform uploads.

pub mod error;
pub mod interop;
pub mod literal;
pub mod matrix;
pub mod pack;
pub mod projection;
pub mod transform;
pub mod value;
pub mod vector;

// Re-export commonly used types
pub use error::{MathError, MathResult};
pub use matrix::{Mat2, Mat3, Mat4, Matrix};
pub use pack::{pack_floats, FloatBuffer, Pack};
pub use projection::{look_at, ortho, perspective, Camera, ProjectionMode};
pub use transform::{radians, Transform};
pub use value::Value;
pub use vector::{mix_scalar, Vec2, Vec3, Vec4, Vector, EPSILON};
