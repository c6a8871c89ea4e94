/// Square matrices stored as rows of rows
///
/// `Matrix<N>` is row-major in memory: `m[(i, j)]` is row `i`, column `j`.
/// Graphics upload wants column-major data, which is handled by
/// [`crate::pack`], not here.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::error::{MathError, MathResult};
use crate::vector::{write_components, Vec4, Vector};

/// An `N x N` matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    rows: [[f32; N]; N],
}

pub type Mat2 = Matrix<2>;
pub type Mat3 = Matrix<3>;
pub type Mat4 = Matrix<4>;

impl<const N: usize> Matrix<N> {
    pub const fn from_rows(rows: [[f32; N]; N]) -> Self {
        Self { rows }
    }

    pub fn identity() -> Self {
        Self {
            rows: std::array::from_fn(|i| std::array::from_fn(|j| if i == j { 1.0 } else { 0.0 })),
        }
    }

    pub const fn zero() -> Self {
        Self {
            rows: [[0.0; N]; N],
        }
    }

    /// Fill from `N * N` values in row-major order
    pub fn from_row_major(values: &[f32]) -> MathResult<Self> {
        if values.len() != N * N {
            return Err(MathError::invalid(format!(
                "{} expects {} values, got {}",
                Self::kind(),
                N * N,
                values.len()
            )));
        }
        Ok(Self {
            rows: std::array::from_fn(|i| std::array::from_fn(|j| values[i * N + j])),
        })
    }

    /// Shape name used in diagnostics (`mat2`, `mat3`, `mat4`)
    pub fn kind() -> &'static str {
        match N {
            2 => "mat2",
            3 => "mat3",
            4 => "mat4",
            _ => "mat",
        }
    }

    pub const fn dim(&self) -> usize {
        N
    }

    pub fn rows(&self) -> &[[f32; N]; N] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Vector<N> {
        Vector::new(self.rows[i])
    }

    pub fn column(&self, j: usize) -> Vector<N> {
        Vector::new(std::array::from_fn(|i| self.rows[i][j]))
    }

    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            rows: self.rows.map(|row| row.map(&f)),
        }
    }

    pub fn zip_map(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            rows: std::array::from_fn(|i| {
                std::array::from_fn(|j| f(self.rows[i][j], other.rows[i][j]))
            }),
        }
    }

    pub fn scale(&self, k: f32) -> Self {
        self.map(|c| c * k)
    }

    pub fn transpose(&self) -> Self {
        Self {
            rows: std::array::from_fn(|i| std::array::from_fn(|j| self.rows[j][i])),
        }
    }

    pub fn mul_matrix(&self, other: &Self) -> Self {
        Self {
            rows: std::array::from_fn(|i| {
                std::array::from_fn(|j| (0..N).map(|k| self.rows[i][k] * other.rows[k][j]).sum::<f32>())
            }),
        }
    }

    pub fn mul_vector(&self, v: &Vector<N>) -> Vector<N> {
        Vector::new(std::array::from_fn(|i| self.row(i).dot(v)))
    }

    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Round every component to `places` decimals, for debug printing.
    ///
    /// `places` is clamped to the range an `f32` power of ten can hold;
    /// components too large to scale are returned unchanged.
    pub fn rounded(&self, places: i32) -> Self {
        let factor = 10f32.powi(places.clamp(-37, 37));
        self.map(|c| {
            let scaled = c * factor;
            if scaled.is_finite() {
                scaled.round() / factor
            } else {
                c
            }
        })
    }
}

/// Copy `src` without row `row` and column `col`. `M` must be `N - 1`.
fn minor_of<const N: usize, const M: usize>(src: &[[f32; N]; N], row: usize, col: usize) -> [[f32; M]; M] {
    debug_assert_eq!(M + 1, N);
    let mut out = [[0.0; M]; M];
    for (r, src_r) in (0..N).filter(|&r| r != row).enumerate() {
        for (c, src_c) in (0..N).filter(|&c| c != col).enumerate() {
            out[r][c] = src[src_r][src_c];
        }
    }
    out
}

/// Classical adjoint over determinant. `minor_det(r, c)` is the determinant
/// of the minor obtained by deleting row `r` and column `c`.
fn cofactor_inverse<const N: usize>(det: f32, minor_det: impl Fn(usize, usize) -> f32) -> MathResult<Matrix<N>> {
    if det == 0.0 {
        log::debug!("Rejecting inverse of singular {}", Matrix::<N>::kind());
        return Err(MathError::SingularMatrix);
    }
    Ok(Matrix::from_rows(std::array::from_fn(|i| {
        std::array::from_fn(|j| {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            sign * minor_det(j, i) / det
        })
    })))
}

impl Matrix<2> {
    pub fn determinant(&self) -> f32 {
        let m = &self.rows;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    pub fn inverse(&self) -> MathResult<Self> {
        let d = self.determinant();
        if d == 0.0 {
            log::debug!("Rejecting inverse of singular mat2");
            return Err(MathError::SingularMatrix);
        }
        let m = &self.rows;
        Ok(Self::from_rows([
            [m[1][1] / d, -m[0][1] / d],
            [-m[1][0] / d, m[0][0] / d],
        ]))
    }
}

impl Matrix<3> {
    pub fn minor(&self, row: usize, col: usize) -> Mat2 {
        Mat2::from_rows(minor_of(&self.rows, row, col))
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn inverse(&self) -> MathResult<Self> {
        cofactor_inverse(self.determinant(), |r, c| self.minor(r, c).determinant())
    }
}

impl Matrix<4> {
    pub fn from_row_vectors(rows: [Vec4; 4]) -> Self {
        Self::from_rows(rows.map(Vector::to_array))
    }

    pub fn minor(&self, row: usize, col: usize) -> Mat3 {
        Mat3::from_rows(minor_of(&self.rows, row, col))
    }

    /// Cofactor expansion along the first row
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|j| {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.rows[0][j] * self.minor(0, j).determinant()
            })
            .sum()
    }

    pub fn inverse(&self) -> MathResult<Self> {
        cofactor_inverse(self.determinant(), |r, c| self.minor(r, c).determinant())
    }

    /// The upper-left 3x3 block
    pub fn upper_left(&self) -> Mat3 {
        Mat3::from_rows(std::array::from_fn(|i| std::array::from_fn(|j| self.rows[i][j])))
    }

    /// `inverse(transpose(m))` reduced to 3x3, for transforming normals
    /// under non-uniform scale
    pub fn normal_matrix(&self) -> MathResult<Mat3> {
        Ok(self.normal_matrix4()?.upper_left())
    }

    /// `inverse(transpose(m))` without the reduction to 3x3
    pub fn normal_matrix4(&self) -> MathResult<Self> {
        self.transpose().inverse()
    }
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Index<(usize, usize)> for Matrix<N> {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        &self.rows[i][j]
    }
}

impl<const N: usize> Index<usize> for Matrix<N> {
    type Output = [f32; N];

    fn index(&self, i: usize) -> &[f32; N] {
        &self.rows[i]
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Matrix<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        self.scale(k)
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl<const N: usize> Mul<Vector<N>> for Matrix<N> {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Vector<N> {
        self.mul_vector(&v)
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", Self::kind())?;
        let flat: Vec<f32> = self.rows.iter().flatten().copied().collect();
        write_components(f, &flat)?;
        write!(f, ")")
    }
}
