/// Run-time tagged vectors and matrices
///
/// The typed API ([`Vector`], [`Matrix`]) catches shape errors at compile
/// time. `Value` covers data whose shape is only known at run time, such as
/// parsed literals or values crossing the JavaScript boundary. Every
/// operation checks kind and dimensionality and returns `TypeMismatch`
/// instead of coercing.

use std::fmt;

use crate::error::{MathError, MathResult};
use crate::matrix::{Mat2, Mat3, Mat4, Matrix};
use crate::pack::Pack;
use crate::vector::{Vec2, Vec3, Vec4, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Apply `$body` to two operands of the same shape, wrapping the result in
/// the same variant
macro_rules! same_shape {
    ($op:literal, $a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {
        match ($a, $b) {
            (Value::Vec2($x), Value::Vec2($y)) => Ok(Value::Vec2($body)),
            (Value::Vec3($x), Value::Vec3($y)) => Ok(Value::Vec3($body)),
            (Value::Vec4($x), Value::Vec4($y)) => Ok(Value::Vec4($body)),
            (Value::Mat2($x), Value::Mat2($y)) => Ok(Value::Mat2($body)),
            (Value::Mat3($x), Value::Mat3($y)) => Ok(Value::Mat3($body)),
            (Value::Mat4($x), Value::Mat4($y)) => Ok(Value::Mat4($body)),
            (a, b) => Err(MathError::type_mismatch($op, a.kind(), b.kind())),
        }
    };
}

/// Apply `$body` to two vectors of the same dimension
macro_rules! same_vector {
    ($op:literal, $a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {
        match ($a, $b) {
            (Value::Vec2($x), Value::Vec2($y)) => Ok($body),
            (Value::Vec3($x), Value::Vec3($y)) => Ok($body),
            (Value::Vec4($x), Value::Vec4($y)) => Ok($body),
            (a, b) => Err(MathError::type_mismatch($op, a.kind(), b.kind())),
        }
    };
}

impl Value {
    /// Build a vector of `dim` components. No components gives the zero
    /// vector; otherwise exactly `dim` are required.
    pub fn vector(dim: usize, components: &[f32]) -> MathResult<Self> {
        if !(2..=4).contains(&dim) {
            return Err(MathError::invalid(format!("unsupported vector dimension {dim}")));
        }
        if components.is_empty() {
            return Self::vector(dim, &[0.0; 4][..dim]);
        }
        match dim {
            2 => Ok(Value::Vec2(Vec2::from_components(components)?)),
            3 => Ok(Value::Vec3(Vec3::from_components(components)?)),
            _ => Ok(Value::Vec4(Vec4::from_components(components)?)),
        }
    }

    /// Copy a vector of the same dimension, or promote a `vec3` to a
    /// homogeneous `vec4` with `w = 1`
    pub fn vector_from(dim: usize, source: &Value) -> MathResult<Self> {
        match (dim, *source) {
            (2, Value::Vec2(v)) => Ok(Value::Vec2(v)),
            (3, Value::Vec3(v)) => Ok(Value::Vec3(v)),
            (4, Value::Vec4(v)) => Ok(Value::Vec4(v)),
            (4, Value::Vec3(v)) => Ok(Value::Vec4(Vec4::from_vec3(&v))),
            (dim, source) => Err(MathError::invalid(format!(
                "cannot build vec{dim} from {}",
                source.kind()
            ))),
        }
    }

    /// Build a `dim x dim` matrix. No values gives the identity; otherwise
    /// exactly `dim * dim` values are required, in row-major order.
    pub fn matrix(dim: usize, values: &[f32]) -> MathResult<Self> {
        match (dim, values.is_empty()) {
            (2, true) => Ok(Value::Mat2(Mat2::identity())),
            (3, true) => Ok(Value::Mat3(Mat3::identity())),
            (4, true) => Ok(Value::Mat4(Mat4::identity())),
            (2, false) => Ok(Value::Mat2(Mat2::from_row_major(values)?)),
            (3, false) => Ok(Value::Mat3(Mat3::from_row_major(values)?)),
            (4, false) => Ok(Value::Mat4(Mat4::from_row_major(values)?)),
            _ => Err(MathError::invalid(format!("unsupported matrix dimension {dim}"))),
        }
    }

    /// Copy a matrix of the same size
    pub fn matrix_from(dim: usize, source: &Value) -> MathResult<Self> {
        match (dim, *source) {
            (2, m @ Value::Mat2(_)) | (3, m @ Value::Mat3(_)) | (4, m @ Value::Mat4(_)) => Ok(m),
            (dim, source) => Err(MathError::invalid(format!(
                "cannot build mat{dim} from {}",
                source.kind()
            ))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Vec2(_) => Vec2::kind(),
            Value::Vec3(_) => Vec3::kind(),
            Value::Vec4(_) => Vec4::kind(),
            Value::Mat2(_) => Mat2::kind(),
            Value::Mat3(_) => Mat3::kind(),
            Value::Mat4(_) => Mat4::kind(),
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            Value::Vec2(_) | Value::Mat2(_) => 2,
            Value::Vec3(_) | Value::Mat3(_) => 3,
            Value::Vec4(_) | Value::Mat4(_) => 4,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_))
    }

    pub fn is_matrix(&self) -> bool {
        !self.is_vector()
    }

    pub fn add(&self, other: &Value) -> MathResult<Value> {
        same_shape!("add", *self, *other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Value) -> MathResult<Value> {
        same_shape!("subtract", *self, *other, |a, b| a - b)
    }

    /// Scale every component by `k`
    pub fn multiply_scalar(&self, k: f32) -> Value {
        match *self {
            Value::Vec2(v) => Value::Vec2(v * k),
            Value::Vec3(v) => Value::Vec3(v * k),
            Value::Vec4(v) => Value::Vec4(v * k),
            Value::Mat2(m) => Value::Mat2(m * k),
            Value::Mat3(m) => Value::Mat3(m * k),
            Value::Mat4(m) => Value::Mat4(m * k),
        }
    }

    /// Matrix x vector, matrix x matrix, or componentwise vector x vector
    pub fn multiply(&self, other: &Value) -> MathResult<Value> {
        match (*self, *other) {
            (Value::Mat2(m), Value::Vec2(v)) => Ok(Value::Vec2(m * v)),
            (Value::Mat3(m), Value::Vec3(v)) => Ok(Value::Vec3(m * v)),
            (Value::Mat4(m), Value::Vec4(v)) => Ok(Value::Vec4(m * v)),
            (Value::Mat2(a), Value::Mat2(b)) => Ok(Value::Mat2(a * b)),
            (Value::Mat3(a), Value::Mat3(b)) => Ok(Value::Mat3(a * b)),
            (Value::Mat4(a), Value::Mat4(b)) => Ok(Value::Mat4(a * b)),
            (Value::Vec2(a), Value::Vec2(b)) => Ok(Value::Vec2(a.mul_componentwise(&b))),
            (Value::Vec3(a), Value::Vec3(b)) => Ok(Value::Vec3(a.mul_componentwise(&b))),
            (Value::Vec4(a), Value::Vec4(b)) => Ok(Value::Vec4(a.mul_componentwise(&b))),
            (a, b) => Err(MathError::type_mismatch("multiply", a.kind(), b.kind())),
        }
    }

    pub fn dot(&self, other: &Value) -> MathResult<f32> {
        same_vector!("dot", *self, *other, |a, b| a.dot(&b))
    }

    /// Defined for two `vec3` operands only
    pub fn cross(&self, other: &Value) -> MathResult<Value> {
        match (*self, *other) {
            (Value::Vec3(a), Value::Vec3(b)) => Ok(Value::Vec3(a.cross(&b))),
            (a, b) => Err(MathError::type_mismatch("cross", a.kind(), b.kind())),
        }
    }

    pub fn negate(&self) -> Value {
        self.multiply_scalar(-1.0)
    }

    pub fn length(&self) -> MathResult<f32> {
        self.dot(self)
            .map(f32::sqrt)
            .map_err(|_| MathError::unsupported("length", self.kind()))
    }

    pub fn normalize(&self, exclude_last: bool) -> MathResult<Value> {
        match *self {
            Value::Vec2(v) => Ok(Value::Vec2(v.normalize(exclude_last)?)),
            Value::Vec3(v) => Ok(Value::Vec3(v.normalize(exclude_last)?)),
            Value::Vec4(v) => Ok(Value::Vec4(v.normalize(exclude_last)?)),
            m => Err(MathError::unsupported("normalize", m.kind())),
        }
    }

    /// Linear interpolation between two vectors of the same dimension
    pub fn mix(&self, other: &Value, s: f32) -> MathResult<Value> {
        match (*self, *other) {
            (Value::Vec2(a), Value::Vec2(b)) => Ok(Value::Vec2(a.mix(&b, s))),
            (Value::Vec3(a), Value::Vec3(b)) => Ok(Value::Vec3(a.mix(&b, s))),
            (Value::Vec4(a), Value::Vec4(b)) => Ok(Value::Vec4(a.mix(&b, s))),
            (a, b) => Err(MathError::type_mismatch("mix", a.kind(), b.kind())),
        }
    }

    /// Exact componentwise equality. Differing kinds are an error, not
    /// `false`.
    pub fn equal(&self, other: &Value) -> MathResult<bool> {
        if self.kind() != other.kind() {
            return Err(MathError::type_mismatch("equal", self.kind(), other.kind()));
        }
        Ok(self == other)
    }

    pub fn transpose(&self) -> MathResult<Value> {
        match *self {
            Value::Mat2(m) => Ok(Value::Mat2(m.transpose())),
            Value::Mat3(m) => Ok(Value::Mat3(m.transpose())),
            Value::Mat4(m) => Ok(Value::Mat4(m.transpose())),
            v => Err(MathError::unsupported("transpose", v.kind())),
        }
    }

    pub fn determinant(&self) -> MathResult<f32> {
        match *self {
            Value::Mat2(m) => Ok(m.determinant()),
            Value::Mat3(m) => Ok(m.determinant()),
            Value::Mat4(m) => Ok(m.determinant()),
            v => Err(MathError::unsupported("determinant", v.kind())),
        }
    }

    pub fn inverse(&self) -> MathResult<Value> {
        match *self {
            Value::Mat2(m) => Ok(Value::Mat2(m.inverse()?)),
            Value::Mat3(m) => Ok(Value::Mat3(m.inverse()?)),
            Value::Mat4(m) => Ok(Value::Mat4(m.inverse()?)),
            v => Err(MathError::unsupported("inverse", v.kind())),
        }
    }

    /// `inverse(transpose(m))` of a `mat4`, reduced to its upper-left 3x3
    /// block when `return_mat3` is set
    pub fn normal_matrix(&self, return_mat3: bool) -> MathResult<Value> {
        match *self {
            Value::Mat4(m) if return_mat3 => Ok(Value::Mat3(m.normal_matrix()?)),
            Value::Mat4(m) => Ok(Value::Mat4(m.normal_matrix4()?)),
            v => Err(MathError::unsupported("normal_matrix", v.kind())),
        }
    }

    /// Pack a sequence of values back to back, each in its own layout
    /// (vectors in order, matrices column-major). All elements must share
    /// one kind.
    pub fn pack_sequence(values: &[Value]) -> MathResult<Vec<f32>> {
        let Some(first) = values.first() else {
            return Ok(Vec::new());
        };
        if let Some(other) = values.iter().find(|v| v.kind() != first.kind()) {
            return Err(MathError::type_mismatch("pack", first.kind(), other.kind()));
        }

        let mut out = Vec::with_capacity(values.len() * first.component_count());
        for value in values {
            value.pack_into(&mut out);
        }
        log::trace!("Packed {} {} values into {} floats", values.len(), first.kind(), out.len());
        Ok(out)
    }
}

macro_rules! impl_value_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = MathError;

                fn try_from(value: Value) -> MathResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(MathError::type_mismatch(
                            "convert",
                            other.kind(),
                            <$ty>::kind(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_value_conversions! {
    Vec2 => Vector<2>,
    Vec3 => Vector<3>,
    Vec4 => Vector<4>,
    Mat2 => Matrix<2>,
    Mat3 => Matrix<3>,
    Mat4 => Matrix<4>,
}

impl Pack for Value {
    fn component_count(&self) -> usize {
        match self {
            Value::Vec2(v) => v.component_count(),
            Value::Vec3(v) => v.component_count(),
            Value::Vec4(v) => v.component_count(),
            Value::Mat2(m) => m.component_count(),
            Value::Mat3(m) => m.component_count(),
            Value::Mat4(m) => m.component_count(),
        }
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        match self {
            Value::Vec2(v) => v.pack_into(out),
            Value::Vec3(v) => v.pack_into(out),
            Value::Vec4(v) => v.pack_into(out),
            Value::Mat2(m) => m.pack_into(out),
            Value::Mat3(m) => m.pack_into(out),
            Value::Mat4(m) => m.pack_into(out),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Vec2(v) => fmt::Display::fmt(v, f),
            Value::Vec3(v) => fmt::Display::fmt(v, f),
            Value::Vec4(v) => fmt::Display::fmt(v, f),
            Value::Mat2(m) => fmt::Display::fmt(m, f),
            Value::Mat3(m) => fmt::Display::fmt(m, f),
            Value::Mat4(m) => fmt::Display::fmt(m, f),
        }
    }
}
