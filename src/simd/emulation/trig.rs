use crate::simd::element::FloatElement;
use crate::simd::emulation::{horner, splat_bits};
use crate::simd::mask::SimdMask;
use crate::simd::traits::{SimdFloat, SimdInt, SimdVector};

/// Reduced argument and octant information shared by sin and cos.
struct Octant<V: SimdVector> {
    /// `sin(r)` for the reduced argument `r` in `[-pi/4, pi/4]`.
    sin_r: V,
    /// `cos(r)`
    cos_r: V,
    /// Set where the octant is odd after rounding up to even, meaning the
    /// sine and cosine kernels swap roles.
    swap: V::Mask,
    /// Set where the octant lies in the lower half plane.
    lower: V::Mask,
}

#[inline(always)]
fn reduce<V, T>(x: V) -> Octant<V>
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let one = V::splat(T::ONE);
    let two = one.add(one);
    let half = V::splat(T::ONE / (T::ONE + T::ONE));

    let ax = x.abs();
    let y = ax.mul(V::splat(T::FOUR_OVER_PI)).floor();
    let odd = y.sub(y.mul(half).floor().mul(two)).cmp_eq(one);
    let y = V::select(odd, y.add(one), y);

    let j = y.to_uint();
    let zero_bits = <V::UInt as SimdVector>::zero();
    let swap = j.and(splat_bits::<V, T>(2)).cmp_ne(zero_bits);
    let lower = j.and(splat_bits::<V, T>(4)).cmp_ne(zero_bits);

    // three-part Cody-Waite: r = |x| - y * pi/4
    let r = y.mul_add(V::splat(-T::PIO4_A), ax);
    let r = y.mul_add(V::splat(-T::PIO4_B), r);
    let r = y.mul_add(V::splat(-T::PIO4_C), r);

    let z = r.mul(r);
    let sin_r = z.mul(r).mul_add(horner(z, T::SIN_POLY), r);
    let cos_r = horner(z, T::COS_POLY);

    Octant {
        sin_r,
        cos_r,
        swap,
        lower,
    }
}

#[inline(always)]
fn sin_from<V, T>(x: V, octant: &Octant<V>) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let value = V::select(octant.swap, octant.cos_r, octant.sin_r);
    let negate = octant.lower.xor(x.is_sign_negative());
    let signed = V::select(negate, value.neg(), value);
    V::select(x.is_finite(), signed, V::splat(T::nan()))
}

#[inline(always)]
fn cos_from<V, T>(x: V, octant: &Octant<V>) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let value = V::select(octant.swap, octant.sin_r, octant.cos_r);
    let negate = octant.swap.xor(octant.lower);
    let signed = V::select(negate, value.neg(), value);
    V::select(x.is_finite(), signed, V::splat(T::nan()))
}

/// Lanes whose `|x|` exceeds `TRIG_REDUCTION_LIMIT`. The reduction loses the
/// low bits of `x - y * pi/4` past that point, so those lanes are computed
/// by the scalar reference instead.
#[inline(always)]
fn large_lanes<V, T>(x: V) -> V::Mask
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    x.abs().cmp_gt(V::splat(T::TRIG_REDUCTION_LIMIT))
}

/// Replaces the `large` lanes of `fast` with `reference` applied to `x`.
#[inline(always)]
fn patch_lanes<V, T>(x: V, large: V::Mask, fast: V, reference: impl Fn(T) -> T) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    if large.none() {
        return fast;
    }
    let mut lanes = x.to_array();
    for lane in lanes.as_mut() {
        *lane = reference(*lane);
    }
    V::select(large, V::from_array(lanes), fast)
}

/// Lane-wise sine.
///
/// `|x|` is reduced by the nearest even multiple `y` of `pi/4` below it,
/// giving `r` in `[-pi/4, pi/4]` and octant bits that pick the kernel
/// (`sin(r)` or `cos(r)`) and the sign. `sin(±0) = ±0`; infinities and NaN
/// give NaN. Past `|x| = 8192` (`f32`) or `2^20` (`f64`) the three-part
/// reduction runs out of precision, and those lanes take the scalar
/// reference, so the error bound holds over every finite input.
#[inline(always)]
pub fn sin<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let fast = sin_from(x, &reduce(x));
    patch_lanes(x, large_lanes(x), fast, T::sin)
}

/// Lane-wise cosine; `cos(0) = 1`, infinities and NaN give NaN. Large
/// arguments are handled as in [`sin`].
#[inline(always)]
pub fn cos<V, T>(x: V) -> V
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let fast = cos_from(x, &reduce(x));
    patch_lanes(x, large_lanes(x), fast, T::cos)
}

/// `(sin(x), cos(x))` from a single reduction.
#[inline(always)]
pub fn sin_cos<V, T>(x: V) -> (V, V)
where
    V: SimdFloat<Scalar = T>,
    T: FloatElement,
{
    let octant = reduce(x);
    let large = large_lanes(x);
    (
        patch_lanes(x, large, sin_from(x, &octant), T::sin),
        patch_lanes(x, large, cos_from(x, &octant), T::cos),
    )
}
