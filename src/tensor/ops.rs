//! Outer product and generalized contraction
//!
//! Both operations are built purely on [`NdArray::get`]/[`NdArray::set`],
//! so they stay correct for any rank the index resolution supports. This
//! is all the linear algebra the Hopfield dynamics need: `outer(V, V)` for
//! Hebbian covariance accumulation and `dot(W, V)` for local fields.

use super::{NdArray, Result, TensorError};

/// Outer product of two rank-1 arrays
///
/// `outer(a, b)[i, j] = a[i] * b[j]`, shape `[a.size(), b.size()]`.
pub fn outer(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    if a.rank() != 1 || b.rank() != 1 {
        return Err(TensorError::ShapeMismatch(format!(
            "outer product needs rank-1 operands, got ranks {} and {}",
            a.rank(),
            b.rank()
        )));
    }
    let (m, n) = (a.size(), b.size());
    let mut c = NdArray::zeros(&[m, n]);
    for i in 0..m {
        for j in 0..n {
            c.set(&[i, j], a.get(&[i])? * b.get(&[j])?)?;
        }
    }
    Ok(c)
}

/// Generalized contraction over `a`'s last axis and `b`'s first axis
///
/// The output shape is `a.shape()` without its last axis followed by
/// `b.shape()` without its first axis; the two dropped axes must agree.
/// Two rank-1 operands therefore contract to a rank-0 array whose single
/// element (see [`NdArray::item`]) is the scalar inner product.
pub fn dot(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    let (ra, rb) = (a.rank(), b.rank());
    if ra == 0 || rb == 0 {
        return Err(TensorError::ShapeMismatch(
            "dot needs operands of rank >= 1".to_string(),
        ));
    }
    let m = a.shape()[ra - 1];
    if b.shape()[0] != m {
        return Err(TensorError::ShapeMismatch(format!(
            "cannot contract {:?} with {:?}: shared axis {} vs {}",
            a.shape(),
            b.shape(),
            m,
            b.shape()[0]
        )));
    }

    let out_shape: Vec<usize> = a.shape()[..ra - 1]
        .iter()
        .chain(&b.shape()[1..])
        .copied()
        .collect();
    let mut out = NdArray::zeros(&out_shape);

    // left indices come first in the output ordering, so the output index
    // splits at a's dropped axis
    let split = ra - 1;
    let mut index = vec![0usize; out_shape.len()];
    let mut idx_a = vec![0usize; ra];
    let mut idx_b = vec![0usize; rb];
    for _ in 0..out.size() {
        idx_a[..split].copy_from_slice(&index[..split]);
        idx_b[1..].copy_from_slice(&index[split..]);
        let mut value = 0.0;
        for j in 0..m {
            idx_a[split] = j;
            idx_b[0] = j;
            value += a.get(&idx_a)? * b.get(&idx_b)?;
        }
        out.set(&index, value)?;
        next_index(&mut index, &out_shape);
    }
    Ok(out)
}

/// Row-major odometer increment; returns `false` on wraparound back to all
/// zeros (one full cycle through the shape).
pub(crate) fn next_index(index: &mut [usize], shape: &[usize]) -> bool {
    for i in (0..index.len()).rev() {
        index[i] += 1;
        if index[i] < shape[i] {
            return true;
        }
        index[i] = 0;
    }
    false
}
