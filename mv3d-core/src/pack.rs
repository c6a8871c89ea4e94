/// Flat `f32` packing for graphics uploads
///
/// Two layouts coexist and are easy to mix up:
///
/// - a single matrix is written column-major (`buf[i * N + j] = m[(j, i)]`),
///   because uniform uploads consume columns while [`Matrix`] stores rows;
/// - a sequence of vectors is written one vector after another with no
///   transposition, which is what vertex attribute buffers expect.

use crate::error::{MathError, MathResult};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Values that can be serialized into a flat float buffer
pub trait Pack {
    /// Number of floats `pack_into` will append
    fn component_count(&self) -> usize;

    fn pack_into(&self, out: &mut Vec<f32>);
}

impl<const N: usize> Pack for Vector<N> {
    fn component_count(&self) -> usize {
        N
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(self.as_slice());
    }
}

impl<const N: usize> Pack for Matrix<N> {
    fn component_count(&self) -> usize {
        N * N
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        for i in 0..N {
            for j in 0..N {
                out.push(self[(j, i)]);
            }
        }
    }
}

impl<const N: usize> Pack for [Vector<N>] {
    fn component_count(&self) -> usize {
        self.len() * N
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        for v in self {
            v.pack_into(out);
        }
    }
}

impl<const N: usize, const K: usize> Pack for [Vector<N>; K] {
    fn component_count(&self) -> usize {
        self.as_slice().component_count()
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        self.as_slice().pack_into(out);
    }
}

impl<const N: usize> Pack for Vec<Vector<N>> {
    fn component_count(&self) -> usize {
        self.as_slice().component_count()
    }

    fn pack_into(&self, out: &mut Vec<f32>) {
        self.as_slice().pack_into(out);
    }
}

/// Pack a vector, a matrix or a vector sequence into a new buffer
pub fn pack_floats<P: Pack + ?Sized>(value: &P) -> Vec<f32> {
    let mut out = Vec::with_capacity(value.component_count());
    value.pack_into(&mut out);
    log::trace!("Packed {} floats", out.len());
    out
}

/// A float buffer with a fixed capacity chosen up front.
///
/// `push` appends packed data and fails with `BufferOverflow` rather than
/// growing past the capacity, so the buffer can be sized once to match a
/// GPU allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatBuffer {
    data: Vec<f32>,
    capacity: usize,
}

impl FloatBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value` using the same layout as [`pack_floats`]
    pub fn push<P: Pack + ?Sized>(&mut self, value: &P) -> MathResult<()> {
        let required = self.data.len() + value.component_count();
        if required > self.capacity {
            return Err(MathError::BufferOverflow {
                capacity: self.capacity,
                required,
            });
        }
        value.pack_into(&mut self.data);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Native-endian bytes, ready for a buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
