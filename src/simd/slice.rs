//! Slice kernels driven by a vector type.
//!
//! Each kernel walks the input in full blocks of `V::LANES` elements and
//! finishes with one masked block for the remainder, so no element past the
//! end of a slice is ever read or written.

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::error::{length_mismatch, Result};
use crate::simd::mask::SimdMask;
use crate::simd::traits::SimdVector;

/// Number of vector blocks handed to one rayon task.
pub const PARALLEL_BLOCKS: usize = 1024;

#[inline(always)]
fn tail_mask<V: SimdVector>(len: usize) -> V::Mask {
    V::Mask::first_n(len % V::LANES)
}

/// Writes `f` applied to `input` into `output`, one vector at a time.
///
/// Returns [`SimdError::LengthMismatch`](crate::error::SimdError::LengthMismatch)
/// when the slices differ in length.
pub fn map_unary<V, F>(input: &[V::Scalar], output: &mut [V::Scalar], f: F) -> Result<()>
where
    V: SimdVector,
    F: Fn(V) -> V,
{
    if input.len() != output.len() {
        return Err(length_mismatch(input.len(), output.len()));
    }

    let step = V::LANES;
    let full = input.len() - input.len() % step;

    for (src, dst) in input[..full]
        .chunks_exact(step)
        .zip(output[..full].chunks_exact_mut(step))
    {
        f(V::from_slice(src)).write_to_slice(dst);
    }

    if full < input.len() {
        let mask = tail_mask::<V>(input.len());
        // SAFETY: the mask selects exactly the `len - full` remaining elements
        unsafe {
            let block = V::zero().load_masked(mask, input.as_ptr().add(full));
            f(block).store_masked(mask, output.as_mut_ptr().add(full));
        }
    }

    Ok(())
}

/// Writes `f(a, b)` lane by lane into `output`.
pub fn map_binary<V, F>(
    a: &[V::Scalar],
    b: &[V::Scalar],
    output: &mut [V::Scalar],
    f: F,
) -> Result<()>
where
    V: SimdVector,
    F: Fn(V, V) -> V,
{
    if a.len() != b.len() {
        return Err(length_mismatch(a.len(), b.len()));
    }
    if a.len() != output.len() {
        return Err(length_mismatch(a.len(), output.len()));
    }

    let step = V::LANES;
    let full = a.len() - a.len() % step;

    for ((lhs, rhs), dst) in a[..full]
        .chunks_exact(step)
        .zip(b[..full].chunks_exact(step))
        .zip(output[..full].chunks_exact_mut(step))
    {
        f(V::from_slice(lhs), V::from_slice(rhs)).write_to_slice(dst);
    }

    if full < a.len() {
        let mask = tail_mask::<V>(a.len());
        // SAFETY: the mask selects exactly the remaining elements of all three slices
        unsafe {
            let lhs = V::zero().load_masked(mask, a.as_ptr().add(full));
            let rhs = V::zero().load_masked(mask, b.as_ptr().add(full));
            f(lhs, rhs).store_masked(mask, output.as_mut_ptr().add(full));
        }
    }

    Ok(())
}

/// Parallel [`map_unary`]: the slices are split into tasks of
/// [`PARALLEL_BLOCKS`] vectors, so only the last task has a masked tail.
pub fn par_map_unary<V, F>(input: &[V::Scalar], output: &mut [V::Scalar], f: F) -> Result<()>
where
    V: SimdVector,
    F: Fn(V) -> V + Send + Sync,
{
    if input.len() != output.len() {
        return Err(length_mismatch(input.len(), output.len()));
    }

    let chunk = V::LANES * PARALLEL_BLOCKS;
    input
        .par_chunks(chunk)
        .zip(output.par_chunks_mut(chunk))
        .try_for_each(|(src, dst)| map_unary(src, dst, &f))
}

/// Sum of all elements.
///
/// Accumulates one vector per block and reduces once at the end, so the
/// summation order differs from a sequential scalar loop.
pub fn sum<V: SimdVector>(input: &[V::Scalar]) -> V::Scalar {
    let step = V::LANES;
    let full = input.len() - input.len() % step;

    let mut acc = V::zero();
    for block in input[..full].chunks_exact(step) {
        acc.add_assign(V::from_slice(block));
    }

    if full < input.len() {
        let mask = tail_mask::<V>(input.len());
        // SAFETY: the mask selects only the remaining elements
        let tail = unsafe { V::zero().load_masked(mask, input.as_ptr().add(full)) };
        acc.add_assign(tail);
    }

    acc.hadd()
}
