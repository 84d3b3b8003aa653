use crate::simd::element::FloatElement;
use crate::simd::emulation::{horner, splat_bits};
use crate::simd::traits::{SimdFloat, SimdInt, SimdVector};

/// Result of splitting `x = 2^k * (1 + f)` with `1 + f` in `[sqrt(1/2), sqrt(2))`.
struct LogSplit<V> {
    k: V,
    f: V,
    hfsq: V,
    /// `s * (hfsq + R(s^2))` with `s = f / (2 + f)`
    tail: V,
}

impl<V> LogSplit<V>
where
    V: SimdVector,
{
    /// `ln(1 + f)`, without the `k * ln2` term.
    #[inline(always)]
    fn log_mantissa(&self) -> V {
        self.tail.sub(self.hfsq).add(self.f)
    }
}

#[inline(always)]
fn split<V, T>(x: V) -> LogSplit<V>
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let one = V::splat(T::ONE);
    let half = V::splat(T::ONE / (T::ONE + T::ONE));

    // subnormals are brought into the normal range first
    let tiny = x.cmp_lt(V::splat(T::min_positive_value()));
    let scaled = V::select(tiny, x.mul(V::splat(T::SUBNORMAL_SCALE)), x);
    let k_adjust = V::select(tiny, V::splat(-T::SUBNORMAL_EXPONENT), V::zero());

    // Moving the mantissa boundary from 1 to sqrt(1/2) lets the exponent
    // field absorb the carry, so k and m fall out of two integer ops
    let offset = splat_bits::<V, T>(T::ONE_BITS.wrapping_sub(T::SQRT_HALF_BITS));
    let sqrt_half = splat_bits::<V, T>(T::SQRT_HALF_BITS);
    let mantissa_mask = splat_bits::<V, T>((1u64 << T::MANTISSA_BITS) - 1);

    let ix = scaled.to_bits().add(offset);
    let exponent = V::from_uint(ix.shr_scalar(T::MANTISSA_BITS));
    let k = exponent.sub(V::splat(T::EXPONENT_BIAS_F)).add(k_adjust);
    let m = V::from_bits(ix.and(mantissa_mask).add(sqrt_half));

    let f = m.sub(one);
    let s = f.div(one.add(one).add(f));
    let z = s.mul(s);
    let r = z.mul(horner(z, T::LOG_POLY));
    let hfsq = half.mul(f).mul(f);
    let tail = s.mul(hfsq.add(r));

    LogSplit { k, f, hfsq, tail }
}

/// Patches the lanes where the split is meaningless.
///
/// `±0 -> -inf`, negative (including `-inf`) `-> NaN`, `+inf -> +inf`, NaN passes through.
#[inline(always)]
fn fix_domain<V, T>(x: V, result: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let zero = V::zero();
    let result = V::select(x.cmp_eq(zero), V::splat(T::neg_infinity()), result);
    let result = V::select(x.cmp_lt(zero), V::splat(T::nan()), result);
    let result = V::select(x.cmp_eq(V::splat(T::infinity())), x, result);
    V::select(x.is_nan(), x, result)
}

/// Lane-wise natural logarithm.
///
/// `x` is split into `2^k * (1 + f)`; with `s = f / (2 + f)` the identity
/// `ln(1 + f) = 2s + 2s^3/3 + ..` becomes `f - hfsq + s * (hfsq + R(s^2))`
/// with `hfsq = f^2 / 2` and `R` a minimax polynomial. `k * ln2` is added
/// in two parts, the low part first.
#[inline(always)]
pub fn log<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let parts = split(x);
    let with_lo = parts.tail.add(parts.k.mul(V::splat(T::LOG_LN2_LO)));
    let result = with_lo
        .sub(parts.hfsq)
        .add(parts.f)
        .add(parts.k.mul(V::splat(T::LOG_LN2_HI)));
    fix_domain(x, result)
}

/// Lane-wise base-2 logarithm.
///
/// `k` is added exactly, so powers of two give exact integers.
#[inline(always)]
pub fn log2<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let parts = split(x);
    let result = parts
        .log_mantissa()
        .mul_add(V::splat(T::LOG2_E), parts.k);
    fix_domain(x, result)
}

/// Lane-wise base-10 logarithm.
#[inline(always)]
pub fn log10<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let parts = split(x);
    let result = parts
        .log_mantissa()
        .mul_add(V::splat(T::LOG10_E), parts.k.mul(V::splat(T::LOG10_2)));
    fix_domain(x, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::fallback::Vector;

    fn ulp_diff_f64(a: f64, b: f64) -> u64 {
        (a.to_bits() as i128 - b.to_bits() as i128).unsigned_abs() as u64
    }

    mod special_value_tests {
        use super::*;

        #[test]
        fn test_log_domain_boundaries() {
            let x = Vector::<f32, 8>::from_array([
                0.0,
                -0.0,
                -1.0,
                f32::NEG_INFINITY,
                f32::INFINITY,
                f32::NAN,
                1.0,
                f32::MIN_POSITIVE,
            ]);
            let out = log(x).to_array();
            assert_eq!(out[0], f32::NEG_INFINITY);
            assert_eq!(out[1], f32::NEG_INFINITY);
            assert!(out[2].is_nan());
            assert!(out[3].is_nan());
            assert_eq!(out[4], f32::INFINITY);
            assert!(out[5].is_nan());
            assert_eq!(out[6], 0.0);
            assert!((out[7] - f32::MIN_POSITIVE.ln()).abs() <= 1e-5);
        }

        #[test]
        fn test_log2_exact_at_powers_of_two() {
            let x = Vector::<f64, 4>::from_array([1.0, 1024.0, 0.125, f64::from_bits(1)]);
            assert_eq!(log2(x).to_array(), [0.0, 10.0, -3.0, -1074.0]);
        }

        #[test]
        fn test_log10_of_powers_of_ten() {
            let x = Vector::<f64, 4>::from_array([1.0, 10.0, 1000.0, 1e-5]);
            let out = log10(x).to_array();
            let expected = [0.0, 1.0, 3.0, -5.0];
            for (y, e) in out.iter().zip(expected) {
                assert!(ulp_diff_f64(*y, e) <= 4, "{y} vs {e}");
            }
        }
    }

    mod accuracy_tests {
        use super::*;

        #[test]
        fn test_log_f64_close_to_std() {
            let inputs = [0.5, 0.70710678, 1.41421356, 2.0, 3.0, 1e-300, 1e300, 123.456];
            for chunk in inputs.chunks(4) {
                let x = Vector::<f64, 4>::from_slice(chunk);
                for (input, y) in chunk.iter().zip(log(x).to_array()) {
                    let ulp = ulp_diff_f64(y, input.ln());
                    assert!(ulp <= 2, "log({input}) = {y}, std = {}", input.ln());
                }
            }
        }

        #[test]
        fn test_log_f64_subnormal_inputs() {
            let inputs = [f64::from_bits(1), f64::from_bits(12345), 1e-310, 2.5e-320];
            let out = log(Vector::<f64, 4>::from_array(inputs)).to_array();
            for (input, y) in inputs.iter().zip(out) {
                assert!(ulp_diff_f64(y, input.ln()) <= 2, "log({input}) = {y}");
            }
        }
    }
}
