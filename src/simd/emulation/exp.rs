use crate::simd::element::FloatElement;
use crate::simd::emulation::{horner, scale_by_pow2};
use crate::simd::traits::SimdFloat;

/// Lane-wise `e^x`.
///
/// Reduction `x = k * ln2 + r` with `|r| <= ln2 / 2`, where `k * ln2` is
/// subtracted in two parts so the reduced argument stays exact. On `r` the
/// rational form
///
/// ```text
/// c      = r - r^2 * P(r^2)
/// e^r    = 1 - ((lo - r * c / (2 - c)) - hi)
/// ```
///
/// is accurate to well under one ULP. The result is scaled by `2^k` in two
/// exact steps. Arguments are clamped beforehand so `k` stays in range; the
/// clamp bounds are already past underflow to 0 and overflow to +inf.
///
/// Special values: `exp(NaN) = NaN`, `exp(+inf) = +inf`, `exp(-inf) = 0`,
/// `exp(0) = 1` exactly.
#[inline(always)]
pub fn exp<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let one = V::splat(T::ONE);
    let two = one.add(one);

    let clamped = x
        .max(V::splat(T::EXP_MIN_ARG))
        .min(V::splat(T::EXP_MAX_ARG));

    let k = clamped.mul(V::splat(T::LOG2_E)).round();
    let hi = k.mul_add(V::splat(-T::EXP_LN2_HI), clamped);
    let lo = k.mul(V::splat(T::EXP_LN2_LO));
    let r = hi.sub(lo);

    let rr = r.mul(r);
    let c = r.sub(rr.mul(horner(rr, T::EXP_POLY)));
    let ratio = r.mul(c).div(two.sub(c));
    let y = one.sub(lo.sub(ratio).sub(hi));

    let result = scale_by_pow2(y, k);

    // the clamp swallowed NaN lanes
    V::select(x.is_nan(), x, result)
}
