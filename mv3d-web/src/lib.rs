/// MV3D Web - WASM bindings for the vector/matrix kernel
///
/// Exposes 4x4 transform building and column-major packing to JavaScript.
/// Packed results arrive as `Float32Array`, ready for `uniformMatrix4fv`.
use mv3d_core::{literal, look_at, ortho, pack_floats, perspective, Mat4, Transform, Value, Vec3};
use wasm_bindgen::prelude::*;

/// A 4x4 transform handle for JavaScript callers
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform4 {
    matrix: Mat4,
}

impl Transform4 {
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

impl From<Mat4> for Transform4 {
    fn from(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

#[wasm_bindgen]
impl Transform4 {
    /// The identity transform
    #[wasm_bindgen(constructor)]
    pub fn new() -> Transform4 {
        Mat4::identity().into()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn look_at(
        eye_x: f32,
        eye_y: f32,
        eye_z: f32,
        at_x: f32,
        at_y: f32,
        at_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
    ) -> Result<Transform4, JsError> {
        let eye = Vec3::from_xyz(eye_x, eye_y, eye_z);
        let at = Vec3::from_xyz(at_x, at_y, at_z);
        let up = Vec3::from_xyz(up_x, up_y, up_z);
        Ok(look_at(&eye, &at, &up)?.into())
    }

    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Result<Transform4, JsError> {
        Ok(perspective(fovy, aspect, near, far)?.into())
    }

    pub fn ortho(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<Transform4, JsError> {
        Ok(ortho(left, right, bottom, top, near, far)?.into())
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Transform4 {
        Transform::translate(x, y, z).into()
    }

    pub fn rotation(angle: f32, axis_x: f32, axis_y: f32, axis_z: f32) -> Result<Transform4, JsError> {
        Ok(Transform::rotate(angle, Vec3::from_xyz(axis_x, axis_y, axis_z))?.into())
    }

    pub fn rotation_x(angle: f32) -> Transform4 {
        Transform::rotate_x(angle).into()
    }

    pub fn rotation_y(angle: f32) -> Transform4 {
        Transform::rotate_y(angle).into()
    }

    pub fn rotation_z(angle: f32) -> Transform4 {
        Transform::rotate_z(angle).into()
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Transform4 {
        Transform::scale(x, y, z).into()
    }

    /// `self * other`
    pub fn multiply(&self, other: &Transform4) -> Transform4 {
        (self.matrix * other.matrix).into()
    }

    pub fn then_translate(&self, x: f32, y: f32, z: f32) -> Transform4 {
        self.multiply(&Self::translation(x, y, z))
    }

    pub fn then_rotate_y(&self, angle: f32) -> Transform4 {
        self.multiply(&Self::rotation_y(angle))
    }

    pub fn then_scale(&self, x: f32, y: f32, z: f32) -> Transform4 {
        self.multiply(&Self::scaling(x, y, z))
    }

    pub fn inverse(&self) -> Result<Transform4, JsError> {
        Ok(self.matrix.inverse()?.into())
    }

    /// Column-major floats for a uniform upload
    pub fn packed(&self) -> Vec<f32> {
        pack_floats(&self.matrix)
    }

    /// Column-major 3x3 normal matrix for a uniform upload
    pub fn normal_matrix_packed(&self) -> Result<Vec<f32>, JsError> {
        Ok(pack_floats(&self.matrix.normal_matrix()?))
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_literal(&self) -> String {
        self.matrix.to_string()
    }
}

impl Default for Transform4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `vecN(...)`/`matN(...)` literal and pack it. Matrices come out
/// column-major.
#[wasm_bindgen]
pub fn pack_literal(text: &str) -> Result<Vec<f32>, JsError> {
    let value: Value = literal::parse_value(text)?;
    let packed = pack_floats(&value);
    log::debug!("Packed {} literal into {} floats", value.kind(), packed.len());
    Ok(packed)
}

/// Parse a whitespace-separated list of same-kind literals and pack them
/// back to back, e.g. the vertex positions of a mesh.
#[wasm_bindgen]
pub fn pack_literals(text: &str) -> Result<Vec<f32>, JsError> {
    let values = literal::parse_values(text)?;
    Ok(Value::pack_sequence(&values)?)
}
