//! Emulated transcendental functions.
//!
//! No target in this crate has vector `exp`, `log`, `sin` or `cos`
//! instructions, so these are computed from operations every target does
//! have: fused multiply-add, rounding, comparisons, `select`, IEEE bit
//! reinterpretation and unsigned integer shifts. Every function is generic
//! over [`SimdFloat`] and runs a fixed number of steps regardless of the
//! input. Domain boundaries (non-positive log input, exp overflow, infinite
//! sin argument) are handled with masks, never with per-lane branches. The
//! one exception is sin/cos past the reduction limit, where the affected
//! lanes are recomputed by the scalar reference and blended back in.
//!
//! The shape of each algorithm is the classic one:
//!
//! 1. split the argument into a reduced part and an integer exponent or
//!    quadrant by bit manipulation or Cody-Waite reduction,
//! 2. evaluate a fixed-degree minimax polynomial on the reduced part,
//! 3. recombine with the exponent or quadrant,
//! 4. patch special lanes with `select`.

mod consts;
mod exp;
mod log;
mod trig;

pub use consts::Coefficients;
pub use exp::exp;
pub use log::{log, log10, log2};
pub use trig::{cos, sin, sin_cos};

use crate::simd::element::{FloatElement, IntElement};
use crate::simd::traits::{SimdFloat, SimdInt, SimdVector};

/// Evaluates `coeffs[0] + x * (coeffs[1] + x * (..))` with fused steps.
#[inline(always)]
pub(crate) fn horner<V, T>(x: V, coeffs: &[T]) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let (last, rest) = match coeffs.split_last() {
        Some(split) => split,
        None => return V::zero(),
    };
    rest.iter()
        .rev()
        .fold(V::splat(*last), |acc, &c| acc.mul_add(x, V::splat(c)))
}

/// Splats an unsigned bit pattern into the unsigned sibling of `V`.
#[inline(always)]
pub(crate) fn splat_bits<V, T>(bits: u64) -> V::UInt
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    <V::UInt as SimdVector>::splat(IntElement::from_u64_wrapping(bits))
}

/// `2^n` for integral `n` in the normal exponent range, built directly
/// from the exponent field.
#[inline(always)]
pub(crate) fn pow2<V, T>(n: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let biased = n.add(V::splat(T::EXPONENT_BIAS_F)).to_uint();
    V::from_bits(biased.shl_scalar(T::MANTISSA_BITS))
}

/// `x * 2^k` for integral `k`, in two exact steps so that results in the
/// subnormal range and overflow to infinity round only once.
#[inline(always)]
pub(crate) fn scale_by_pow2<V, T>(x: V, k: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let half = V::splat(T::ONE / (T::ONE + T::ONE));
    let first = k.mul(half).floor();
    let second = k.sub(first);
    x.mul(pow2(first)).mul(pow2(second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::fallback::Vector;

    #[test]
    fn test_horner_matches_scalar_polynomial() {
        let x = Vector::<f64, 4>::from_array([0.0, 1.0, 2.0, -0.5]);
        let poly = horner(x, &[1.0, 2.0, 3.0]);
        let expected = [1.0, 6.0, 17.0, 0.75];
        assert_eq!(poly.to_array(), expected);
    }

    #[test]
    fn test_horner_empty_is_zero() {
        let x = Vector::<f32, 4>::splat(3.0);
        assert_eq!(horner(x, &[]).to_array(), [0.0; 4]);
    }

    #[test]
    fn test_pow2_builds_exact_powers() {
        let n = Vector::<f32, 4>::from_array([0.0, 1.0, -3.0, 127.0]);
        assert_eq!(pow2(n).to_array(), [1.0, 2.0, 0.125, 2f32.powi(127)]);
    }

    #[test]
    fn test_scale_by_pow2_reaches_subnormals_and_infinity() {
        let x = Vector::<f64, 4>::splat(1.5);
        let k = Vector::<f64, 4>::from_array([-1074.0, -1022.0, 1023.0, 1024.0]);
        let scaled = scale_by_pow2(x, k).to_array();
        assert_eq!(scaled[0], 1.5 * f64::from_bits(1));
        assert_eq!(scaled[1], 1.5 * f64::MIN_POSITIVE);
        assert_eq!(scaled[2], 1.5 * 2f64.powi(1023));
        assert_eq!(scaled[3], f64::INFINITY);
    }
}
