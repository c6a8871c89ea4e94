/// Conversions to and from `nalgebra` fixed-size types
///
/// Indexing is preserved: `m[(i, j)]` here equals `m[(i, j)]` on the
/// nalgebra side, regardless of how either stores its data.

use nalgebra::{Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4};

use crate::matrix::Matrix;
use crate::vector::Vector;

macro_rules! impl_nalgebra_conversions {
    ($($n:literal => $na_vec:ident, $na_mat:ident;)*) => {
        $(
            impl From<Vector<$n>> for $na_vec<f32> {
                fn from(v: Vector<$n>) -> Self {
                    $na_vec::from(v.to_array())
                }
            }

            impl From<$na_vec<f32>> for Vector<$n> {
                fn from(v: $na_vec<f32>) -> Self {
                    Vector::new(std::array::from_fn(|i| v[i]))
                }
            }

            impl From<Matrix<$n>> for $na_mat<f32> {
                fn from(m: Matrix<$n>) -> Self {
                    $na_mat::from_fn(|i, j| m[(i, j)])
                }
            }

            impl From<$na_mat<f32>> for Matrix<$n> {
                fn from(m: $na_mat<f32>) -> Self {
                    Matrix::from_rows(std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)])))
                }
            }
        )*
    };
}

impl_nalgebra_conversions! {
    2 => Vector2, Matrix2;
    3 => Vector3, Matrix3;
    4 => Vector4, Matrix4;
}
