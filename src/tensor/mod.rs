//! Minimal N-dimensional array
//!
//! This module provides a shape-aware flat-buffer tensor with strided
//! indexing, elementwise arithmetic and comparisons, and the small set of
//! structural operations (reshape, transpose, sum) that the Hopfield
//! dynamics are built on. It is deliberately a teaching-scale kernel:
//! no broadcasting beyond scalar-or-same-length operands, no views, no
//! parallelism.

pub mod ops;

use rand::Rng;
use thiserror::Error;

/// Errors raised by tensor construction and operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Operand dimensions disagree for the requested operation
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// A multi-index does not resolve inside the array bounds
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },
    /// A buffer's length does not match the product of the requested shape
    #[error("cannot shape a buffer of {len} elements as {shape:?}")]
    InvalidShape { shape: Vec<usize>, len: usize },
}

pub type Result<T> = std::result::Result<T, TensorError>;

/// Right-hand side of an elementwise operation: a scalar applied at every
/// position, or another array zipped position-wise.
///
/// Built via `From`, so call sites can pass `2.0` or `&other` directly.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Array(&'a NdArray),
}

impl From<f64> for Operand<'static> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a NdArray> for Operand<'a> {
    fn from(array: &'a NdArray) -> Self {
        Operand::Array(array)
    }
}

/// An N-dimensional array of `f64` values
///
/// The data lives in a single owned row-major buffer; `shape` describes the
/// logical extents and `strides` map a multi-index to a flat offset
/// (`strides[i]` is the product of the trailing extents). The invariant
/// `data.len() == shape.iter().product()` holds at all times; rank 0 is a
/// single element.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<f64>,
}

fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut accum = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = accum;
        accum *= shape[i];
    }
    strides
}

impl NdArray {
    /// Create an array from an explicit shape and a row-major flat buffer
    ///
    /// Fails with [`TensorError::InvalidShape`] if the buffer length does
    /// not equal the product of the shape.
    pub fn from_vec(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(TensorError::InvalidShape {
                shape: shape.to_vec(),
                len: data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            data,
        })
    }

    /// Create an array with every element set to `value`
    pub fn fill(shape: &[usize], value: f64) -> Self {
        let size: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            data: vec![value; size],
        }
    }

    /// Create an array by calling `f` with each flat (row-major) offset
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(usize) -> f64) -> Self {
        let size: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            data: (0..size).map(&mut f).collect(),
        }
    }

    /// Create an array of zeros
    pub fn zeros(shape: &[usize]) -> Self {
        Self::fill(shape, 0.0)
    }

    /// Create a rank-1 array from a slice
    pub fn vector(values: &[f64]) -> Self {
        Self {
            shape: vec![values.len()],
            strides: vec![1],
            data: values.to_vec(),
        }
    }

    /// Create an array of samples drawn uniformly from `[0, 1)`
    pub fn random_uniform<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        Self::from_fn(shape, |_| rng.gen::<f64>())
    }

    /// Logical extents, one per axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The flat row-major buffer
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Resolve a multi-index to a flat offset through the strides
    ///
    /// The index must supply exactly one coordinate per axis, each within
    /// that axis's extent; anything else is [`TensorError::IndexOutOfBounds`].
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.shape.len()
            || index.iter().zip(&self.shape).any(|(&i, &extent)| i >= extent)
        {
            return Err(TensorError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(index.iter().zip(&self.strides).map(|(&i, &s)| i * s).sum())
    }

    /// Read the element at a multi-index
    pub fn get(&self, index: &[usize]) -> Result<f64> {
        Ok(self.data[self.offset(index)?])
    }

    /// Write the element at a multi-index
    pub fn set(&mut self, index: &[usize], value: f64) -> Result<()> {
        let offset = self.offset(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Extract the single element of a size-1 array (e.g. a rank-0 dot result)
    pub fn item(&self) -> Result<f64> {
        if self.data.len() != 1 {
            return Err(TensorError::ShapeMismatch(format!(
                "item() needs a single-element array, shape is {:?}",
                self.shape
            )));
        }
        Ok(self.data[0])
    }

    fn zip_with(&self, rhs: Operand<'_>, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        let data = match rhs {
            Operand::Scalar(s) => self.data.iter().map(|&a| f(a, s)).collect(),
            Operand::Array(b) => {
                if b.data.len() != self.data.len() {
                    return Err(TensorError::ShapeMismatch(format!(
                        "elementwise op on {} and {} elements",
                        self.data.len(),
                        b.data.len()
                    )));
                }
                self.data
                    .iter()
                    .zip(&b.data)
                    .map(|(&a, &b)| f(a, b))
                    .collect()
            }
        };
        Ok(Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            data,
        })
    }

    /// Position-wise addition; returns a new array with this array's shape
    pub fn add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Self> {
        self.zip_with(rhs.into(), |a, b| a + b)
    }

    /// Position-wise subtraction; returns a new array
    pub fn sub<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Self> {
        self.zip_with(rhs.into(), |a, b| a - b)
    }

    /// Position-wise multiplication; returns a new array
    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Self> {
        self.zip_with(rhs.into(), |a, b| a * b)
    }

    /// Position-wise division; returns a new array
    ///
    /// Division by zero keeps IEEE semantics (infinity/NaN), it is not an
    /// error.
    pub fn div<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Self> {
        self.zip_with(rhs.into(), |a, b| a / b)
    }

    /// Apply `f` to every element, returning a new array
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Apply `f` to every element in place
    pub fn map_inplace(&mut self, f: impl Fn(f64) -> f64) {
        for x in &mut self.data {
            *x = f(*x);
        }
    }

    fn compare(&self, rhs: Operand<'_>, f: impl Fn(f64, f64) -> bool) -> Result<Mask> {
        let data = match rhs {
            Operand::Scalar(s) => self.data.iter().map(|&a| f(a, s)).collect(),
            Operand::Array(b) => {
                if b.data.len() != self.data.len() {
                    return Err(TensorError::ShapeMismatch(format!(
                        "comparison on {} and {} elements",
                        self.data.len(),
                        b.data.len()
                    )));
                }
                self.data
                    .iter()
                    .zip(&b.data)
                    .map(|(&a, &b)| f(a, b))
                    .collect()
            }
        };
        Ok(Mask {
            shape: self.shape.clone(),
            data,
        })
    }

    /// Position-wise `<` against a scalar or same-length array
    pub fn less<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Mask> {
        self.compare(rhs.into(), |a, b| a < b)
    }

    /// Position-wise `>` against a scalar or same-length array
    pub fn greater<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Mask> {
        self.compare(rhs.into(), |a, b| a > b)
    }

    /// Position-wise `>=` against a scalar or same-length array
    pub fn greater_equal<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Mask> {
        self.compare(rhs.into(), |a, b| a >= b)
    }

    /// Sum of all elements
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Reinterpret the buffer under a new shape of equal size
    ///
    /// Metadata-only: the returned array carries the same row-major data in
    /// the same order. Fails with [`TensorError::InvalidShape`] if the
    /// products differ.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        let size: usize = new_shape.iter().product();
        if size != self.data.len() {
            return Err(TensorError::InvalidShape {
                shape: new_shape.to_vec(),
                len: self.data.len(),
            });
        }
        Ok(Self {
            shape: new_shape.to_vec(),
            strides: compute_strides(new_shape),
            data: self.data.clone(),
        })
    }

    /// Reverse the axis order, metadata only
    ///
    /// The buffer is NOT physically reordered: only the shape is reversed
    /// and the strides recomputed for the new shape. For a symmetric matrix
    /// (the only rank-2 case the Hopfield dynamics transpose) this is exact;
    /// callers must not rely on it producing physically transposed data for
    /// anything else.
    pub fn transpose(&self) -> Self {
        let mut shape = self.shape.clone();
        shape.reverse();
        let strides = compute_strides(&shape);
        Self {
            shape,
            strides,
            data: self.data.clone(),
        }
    }
}

/// A boolean array produced by the position-wise comparisons
///
/// Shares the shape of the array it was compared from.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    shape: Vec<usize>,
    data: Vec<bool>,
}

impl Mask {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// True if any position is set
    pub fn any(&self) -> bool {
        self.data.iter().any(|&b| b)
    }

    /// True if every position is set
    pub fn all(&self) -> bool {
        self.data.iter().all(|&b| b)
    }

    /// Position-wise select: `if_true` where the mask is set, `if_false`
    /// elsewhere; either branch may be a scalar or a same-length array.
    /// Returns a new array with the mask's shape.
    pub fn select<'a, 'b>(
        &self,
        if_true: impl Into<Operand<'a>>,
        if_false: impl Into<Operand<'b>>,
    ) -> Result<NdArray> {
        let branch = |operand: Operand<'_>| -> Result<Vec<f64>> {
            match operand {
                Operand::Scalar(s) => Ok(vec![s; self.data.len()]),
                Operand::Array(a) => {
                    if a.data.len() != self.data.len() {
                        return Err(TensorError::ShapeMismatch(format!(
                            "select branch has {} elements, mask has {}",
                            a.data.len(),
                            self.data.len()
                        )));
                    }
                    Ok(a.data.clone())
                }
            }
        };
        let yes = branch(if_true.into())?;
        let no = branch(if_false.into())?;
        let data = self
            .data
            .iter()
            .zip(yes.iter().zip(&no))
            .map(|(&m, (&y, &n))| if m { y } else { n })
            .collect();
        NdArray::from_vec(&self.shape, data)
    }
}
