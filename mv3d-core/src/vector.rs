/// Fixed-size vectors
///
/// `Vector<N>` is a plain `Copy` value of `N` floats. Dimensionality is part
/// of the type, so mixing a `Vec3` with a `Vec4` is a compile error rather
/// than a run-time check. Every operation returns a new vector.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::error::{MathError, MathResult};

/// Default tolerance used by `approx_eq` callers
pub const EPSILON: f32 = 1e-6;

/// An `N`-component vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    components: [f32; N],
}

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

impl<const N: usize> Vector<N> {
    pub const fn new(components: [f32; N]) -> Self {
        Self { components }
    }

    pub const fn zero() -> Self {
        Self {
            components: [0.0; N],
        }
    }

    /// Build a vector from a slice holding exactly `N` components
    pub fn from_components(components: &[f32]) -> MathResult<Self> {
        let components: [f32; N] = components.try_into().map_err(|_| {
            MathError::invalid(format!(
                "{} expects {} components, got {}",
                Self::kind(),
                N,
                components.len()
            ))
        })?;
        Ok(Self { components })
    }

    /// Shape name used in diagnostics (`vec2`, `vec3`, `vec4`)
    pub fn kind() -> &'static str {
        match N {
            2 => "vec2",
            3 => "vec3",
            4 => "vec4",
            _ => "vec",
        }
    }

    pub const fn dim(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.components
    }

    pub fn to_array(self) -> [f32; N] {
        self.components
    }

    /// Apply `f` to every component
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            components: self.components.map(f),
        }
    }

    /// Combine two vectors component by component
    pub fn zip_map(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            components: std::array::from_fn(|i| f(self.components[i], other.components[i])),
        }
    }

    pub fn scale(&self, k: f32) -> Self {
        self.map(|c| c * k)
    }

    /// Componentwise product. This is not the dot product.
    pub fn mul_componentwise(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a * b)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Divide by the Euclidean norm.
    ///
    /// With `exclude_last`, the norm is taken over the first `N - 1`
    /// components and the last component (typically homogeneous `w`) is
    /// left untouched.
    pub fn normalize(&self, exclude_last: bool) -> MathResult<Self> {
        let counted = if exclude_last { N - 1 } else { N };
        // Scale by the largest magnitude first so squaring cannot overflow or underflow
        let counted_components = &self.components[..counted];
        let scale = counted_components.iter().fold(0.0f32, |m, c| m.max(c.abs()));
        if scale == 0.0 || !counted_components.iter().all(|c| c.is_finite()) {
            return Err(MathError::degenerate(format!(
                "cannot normalize {} with zero or non-finite length",
                Self::kind()
            )));
        }
        let scaled_len = counted_components
            .iter()
            .map(|c| (c / scale) * (c / scale))
            .sum::<f32>()
            .sqrt();

        let mut components = self.components;
        for c in &mut components[..counted] {
            *c = *c / scale / scaled_len;
        }
        Ok(Self { components })
    }

    /// Linear interpolation `(1 - s) * self + s * other`
    pub fn mix(&self, other: &Self, s: f32) -> Self {
        self.zip_map(other, |a, b| mix_scalar(a, b, s))
    }

    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

/// Linear interpolation between two scalars
pub fn mix_scalar(a: f32, b: f32, s: f32) -> f32 {
    (1.0 - s) * a + s * b
}

impl Vector<2> {
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Self::new([x, y])
    }

    pub fn x(&self) -> f32 {
        self.components[0]
    }

    pub fn y(&self) -> f32 {
        self.components[1]
    }
}

impl Vector<3> {
    pub const fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new([x, y, z])
    }

    pub fn x(&self) -> f32 {
        self.components[0]
    }

    pub fn y(&self) -> f32 {
        self.components[1]
    }

    pub fn z(&self) -> f32 {
        self.components[2]
    }

    pub fn cross(&self, other: &Self) -> Self {
        let [ux, uy, uz] = self.components;
        let [vx, vy, vz] = other.components;
        Self::from_xyz(uy * vz - uz * vy, uz * vx - ux * vz, ux * vy - uy * vx)
    }

    /// Append a fourth component
    pub fn extend(&self, w: f32) -> Vec4 {
        let [x, y, z] = self.components;
        Vec4::from_xyzw(x, y, z, w)
    }
}

impl Vector<4> {
    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::new([x, y, z, w])
    }

    /// Promote a 3-vector to homogeneous coordinates (`w = 1`)
    pub fn from_vec3(v: &Vec3) -> Self {
        v.extend(1.0)
    }

    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::from_xyzw(x, y, z, 1.0)
    }

    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::from_xyzw(x, y, z, 0.0)
    }

    pub fn x(&self) -> f32 {
        self.components[0]
    }

    pub fn y(&self) -> f32 {
        self.components[1]
    }

    pub fn z(&self) -> f32 {
        self.components[2]
    }

    pub fn w(&self) -> f32 {
        self.components[3]
    }

    /// Drop the fourth component
    pub fn truncate(&self) -> Vec3 {
        let [x, y, z, _] = self.components;
        Vec3::from_xyz(x, y, z)
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(components: [f32; N]) -> Self {
        Self::new(components)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.components[index]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        self.scale(k)
    }
}

impl<const N: usize> Mul<Vector<N>> for f32 {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Vector<N> {
        v.scale(self)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", Self::kind())?;
        write_components(f, &self.components)?;
        write!(f, ")")
    }
}

/// Comma-separated components, honouring any `{:.N}` precision
pub(crate) fn write_components(f: &mut fmt::Formatter<'_>, components: &[f32]) -> fmt::Result {
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, c)?,
            None => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Vec3::default(), Vec3::from_xyz(0.0, 0.0, 0.0));
        assert_eq!(Vec4::zero().as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_from_components_checks_length() {
        let v = Vec3::from_components(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, Vec3::from_xyz(1.0, 2.0, 3.0));

        let err = Vec3::from_components(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, MathError::InvalidArgument(_)));
        assert!(Vec2::from_components(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_homogeneous_promotion() {
        let v = Vec4::from_vec3(&Vec3::from_xyz(1.0, 2.0, 3.0));
        assert_eq!(v, Vec4::from_xyzw(1.0, 2.0, 3.0, 1.0));
        assert_eq!(v.truncate(), Vec3::from_xyz(1.0, 2.0, 3.0));
        assert_eq!(Vec4::direction(1.0, 0.0, 0.0).w(), 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec3::from_xyz(1.0, 2.0, 3.0);
        let b = Vec3::from_xyz(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::from_xyz(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::from_xyz(3.0, 3.0, 3.0));
        assert_eq!(-a, Vec3::from_xyz(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(a.mul_componentwise(&b), Vec3::from_xyz(4.0, 10.0, 18.0));
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    fn test_cross_product() {
        let x = Vec3::from_xyz(1.0, 0.0, 0.0);
        let y = Vec3::from_xyz(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::from_xyz(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vec3::from_xyz(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        let vs = [
            Vec4::from_xyzw(1.0, 2.0, 3.0, 4.0),
            Vec4::from_xyzw(-0.5, 0.0, 10.0, 0.25),
            Vec4::from_xyzw(0.0, 0.0, 0.0, 3.0),
        ];
        for v in vs {
            let n = v.normalize(false).unwrap();
            assert!((n.length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        for x in [1e20, 1e-25, -3e38] {
            let n = Vec3::from_xyz(x, 0.0, 0.0).normalize(false).unwrap();
            assert_eq!(n, Vec3::from_xyz(x.signum(), 0.0, 0.0));
        }

        let n = Vec3::from_xyz(3e-30, 4e-30, 0.0).normalize(false).unwrap();
        assert!(n.approx_eq(&Vec3::from_xyz(0.6, 0.8, 0.0), 1e-6));

        let n = Vec4::from_xyzw(3e25, 0.0, 4e25, 2.0).normalize(true).unwrap();
        assert!(n.approx_eq(&Vec4::from_xyzw(0.6, 0.0, 0.8, 2.0), 1e-6));
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        for v in [Vec3::from_xyz(f32::INFINITY, 1.0, 0.0), Vec3::from_xyz(f32::NAN, 1.0, 0.0)] {
            assert!(matches!(v.normalize(false), Err(MathError::DegenerateInput(_))));
        }
    }

    #[test]
    fn test_normalize_exclude_last() {
        let v = Vec4::from_xyzw(3.0, 0.0, 4.0, 7.0);
        let n = v.normalize(true).unwrap();
        assert!(n.approx_eq(&Vec4::from_xyzw(0.6, 0.0, 0.8, 7.0), EPSILON));
    }

    #[test]
    fn test_normalize_zero_is_degenerate() {
        let err = Vec3::zero().normalize(false).unwrap_err();
        assert!(matches!(err, MathError::DegenerateInput(_)));

        // Only w is set, so the spatial part has no length
        let err = Vec4::from_xyzw(0.0, 0.0, 0.0, 1.0).normalize(true).unwrap_err();
        assert!(matches!(err, MathError::DegenerateInput(_)));
    }

    #[test]
    fn test_mix() {
        let a = Vec2::from_xy(0.0, 10.0);
        let b = Vec2::from_xy(10.0, 20.0);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
        assert_eq!(a.mix(&b, 0.5), Vec2::from_xy(5.0, 15.0));
        assert_eq!(mix_scalar(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn test_display() {
        let v = Vec3::from_xyz(1.0, 0.5, -2.0);
        assert_eq!(v.to_string(), "vec3(1, 0.5, -2)");
        assert_eq!(format!("{:.2}", v), "vec3(1.00, 0.50, -2.00)");
    }
}
