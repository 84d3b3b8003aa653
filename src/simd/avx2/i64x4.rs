//! AVX2 4-lane 64-bit integer vectors.
//!
//! AVX2 lacks a 64-bit low multiply, 64-bit `min`/`max`/`abs` and an
//! unsigned 64-bit compare. The multiply is assembled from three
//! `vpmuludq` partial products, the rest from `vpcmpgtq` plus blends;
//! unsigned order flips the sign bit of both operands first.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use crate::simd::avx2::{mask_from_epi64, mask_to_epi64, AVX_ALIGNMENT};
use crate::simd::element::Element;
use crate::simd::mask::Mask;
use crate::simd::swizzle::Swizzle;
use crate::simd::traits::{SimdDegrade, SimdInt, SimdVector};
use crate::simd::{I32x4, U32x4};

#[inline(always)]
fn signed_greater(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_cmpgt_epi64(a, b) }
}

#[inline(always)]
fn unsigned_greater(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let bias = _mm256_set1_epi64x(i64::MIN);
        _mm256_cmpgt_epi64(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
    }
}

#[inline(always)]
fn signed_abs(a: __m256i) -> __m256i {
    unsafe {
        let zero = _mm256_setzero_si256();
        let negative = _mm256_cmpgt_epi64(zero, a);
        _mm256_blendv_epi8(a, _mm256_sub_epi64(zero, a), negative)
    }
}

/// Low 64 bits of the lane products: `lo*lo + ((hi*lo + lo*hi) << 32)`.
#[inline(always)]
fn mullo_epi64(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let low = _mm256_mul_epu32(a, b);
        let cross = _mm256_add_epi64(
            _mm256_mul_epu32(_mm256_srli_epi64::<32>(a), b),
            _mm256_mul_epu32(a, _mm256_srli_epi64::<32>(b)),
        );
        _mm256_add_epi64(low, _mm256_slli_epi64::<32>(cross))
    }
}

/// Picks lanes 0, 2, 4 and 6 of the 32-bit view, the low halves of each 64-bit lane.
#[inline(always)]
fn low_halves(a: __m256i) -> __m128i {
    unsafe {
        let order = _mm256_setr_epi32(0, 2, 4, 6, 0, 2, 4, 6);
        _mm256_castsi256_si128(_mm256_permutevar8x32_epi32(a, order))
    }
}

macro_rules! impl_int64x4 {
    (
        $(#[$meta:meta])*
        $name:ident, $scalar:ty,
        sibling = ($signed:ident, $unsigned:ident),
        narrow = ($narrow:ident, $narrow_scalar:ty),
        greater = $greater:path,
        abs = $abs:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone)]
        #[repr(transparent)]
        pub struct $name {
            pub(crate) elements: __m256i,
        }

        impl $name {
            #[inline(always)]
            pub(crate) fn from_register(elements: __m256i) -> Self {
                Self { elements }
            }

            #[inline(always)]
            fn gather_offsets(indices: &Swizzle<4>) -> __m128i {
                unsafe { _mm_loadu_si128(indices.as_ptr() as *const __m128i) }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.to_array()).finish()
            }
        }

        impl SimdVector for $name {
            type Scalar = $scalar;
            type Array = [$scalar; 4];
            type Mask = Mask<4>;
            type Swizzle = Swizzle<4>;

            const LANES: usize = 4;
            const ALIGNMENT: usize = AVX_ALIGNMENT;

            #[inline(always)]
            fn zero() -> Self {
                Self::from_register(unsafe { _mm256_setzero_si256() })
            }

            #[inline(always)]
            fn splat(value: $scalar) -> Self {
                Self::from_register(unsafe { _mm256_set1_epi64x(value as i64) })
            }

            #[inline(always)]
            fn from_array(lanes: [$scalar; 4]) -> Self {
                Self::from_register(unsafe { _mm256_loadu_si256(lanes.as_ptr() as *const __m256i) })
            }

            #[inline(always)]
            fn to_array(self) -> [$scalar; 4] {
                let mut lanes = [0 as $scalar; 4];
                unsafe { _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, self.elements) };
                lanes
            }

            #[inline(always)]
            unsafe fn load(ptr: *const $scalar) -> Self {
                Self::from_register(_mm256_loadu_si256(ptr as *const __m256i))
            }

            #[inline(always)]
            unsafe fn loada(ptr: *const $scalar) -> Self {
                debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
                Self::from_register(_mm256_load_si256(ptr as *const __m256i))
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut $scalar) {
                _mm256_storeu_si256(ptr as *mut __m256i, self.elements)
            }

            #[inline(always)]
            unsafe fn storea(self, ptr: *mut $scalar) {
                debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
                _mm256_store_si256(ptr as *mut __m256i, self.elements)
            }

            #[inline(always)]
            unsafe fn load_masked(self, mask: Mask<4>, ptr: *const $scalar) -> Self {
                let lanes = mask_to_epi64(mask);
                let loaded = _mm256_maskload_epi64(ptr as *const i64, lanes);
                Self::from_register(_mm256_blendv_epi8(self.elements, loaded, lanes))
            }

            #[inline(always)]
            unsafe fn store_masked(self, mask: Mask<4>, ptr: *mut $scalar) {
                _mm256_maskstore_epi64(ptr as *mut i64, mask_to_epi64(mask), self.elements)
            }

            #[inline(always)]
            fn select(mask: Mask<4>, if_true: Self, if_false: Self) -> Self {
                let lanes = mask_to_epi64(mask);
                Self::from_register(unsafe {
                    _mm256_blendv_epi8(if_false.elements, if_true.elements, lanes)
                })
            }

            #[inline(always)]
            unsafe fn gather(base: *const $scalar, indices: Swizzle<4>) -> Self {
                let offsets = Self::gather_offsets(&indices);
                Self::from_register(_mm256_i32gather_epi64::<8>(base as *const i64, offsets))
            }

            #[inline(always)]
            unsafe fn gather_masked(self, mask: Mask<4>, base: *const $scalar, indices: Swizzle<4>) -> Self {
                Self::from_register(_mm256_mask_i32gather_epi64::<8>(
                    self.elements,
                    base as *const i64,
                    Self::gather_offsets(&indices),
                    mask_to_epi64(mask),
                ))
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_add_epi64(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_sub_epi64(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self::from_register(mullo_epi64(self.elements, rhs.elements))
            }

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                let (lhs, rhs) = (self.to_array(), rhs.to_array());
                Self::from_array(std::array::from_fn(|i| lhs[i].lane_div(rhs[i])))
            }

            #[inline(always)]
            fn neg(self) -> Self {
                Self::zero().sub(self)
            }

            #[inline(always)]
            fn abs(self) -> Self {
                let abs: fn(__m256i) -> __m256i = $abs;
                Self::from_register(abs(self.elements))
            }

            #[inline(always)]
            fn min(self, rhs: Self) -> Self {
                let greater = $greater(self.elements, rhs.elements);
                Self::from_register(unsafe { _mm256_blendv_epi8(self.elements, rhs.elements, greater) })
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                let greater = $greater(self.elements, rhs.elements);
                Self::from_register(unsafe { _mm256_blendv_epi8(rhs.elements, self.elements, greater) })
            }

            #[inline(always)]
            fn mul_add(self, a: Self, b: Self) -> Self {
                self.mul(a).add(b)
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> Mask<4> {
                mask_from_epi64(unsafe { _mm256_cmpeq_epi64(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> Mask<4> {
                mask_from_epi64($greater(self.elements, rhs.elements))
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> Mask<4> {
                mask_from_epi64($greater(rhs.elements, self.elements))
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> Mask<4> {
                self.cmp_lt(rhs).not()
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> Mask<4> {
                self.cmp_gt(rhs).not()
            }
        }

        impl SimdInt for $name {
            type Signed = $signed;
            type Unsigned = $unsigned;

            #[inline(always)]
            fn and(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_and_si256(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn or(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_or_si256(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn xor(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_xor_si256(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn not(self) -> Self {
                Self::from_register(unsafe { _mm256_xor_si256(self.elements, _mm256_set1_epi64x(-1)) })
            }

            #[inline(always)]
            fn and_not(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_andnot_si256(rhs.elements, self.elements) })
            }

            #[inline(always)]
            fn shl(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_sllv_epi64(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn shr(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_srlv_epi64(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn shl_scalar(self, amount: u32) -> Self {
                Self::from_register(unsafe {
                    _mm256_sll_epi64(self.elements, _mm_set_epi64x(0, amount as i64))
                })
            }

            #[inline(always)]
            fn shr_scalar(self, amount: u32) -> Self {
                Self::from_register(unsafe {
                    _mm256_srl_epi64(self.elements, _mm_set_epi64x(0, amount as i64))
                })
            }

            #[inline(always)]
            fn to_signed(self) -> $signed {
                $signed::from_register(self.elements)
            }

            #[inline(always)]
            fn to_unsigned(self) -> $unsigned {
                $unsigned::from_register(self.elements)
            }
        }

        impl SimdDegrade for $name {
            type Narrow = $narrow;

            #[inline(always)]
            fn degrade(self) -> $narrow {
                let mut lanes = [0 as $narrow_scalar; 4];
                unsafe {
                    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, low_halves(self.elements))
                };
                $narrow::from_array(lanes)
            }
        }
    };
}

impl_int64x4! {
    /// Four packed `i64` lanes in one AVX2 register.
    I64x4, i64,
    sibling = (I64x4, U64x4),
    narrow = (I32x4, i32),
    greater = signed_greater,
    abs = signed_abs,
}

impl_int64x4! {
    /// Four packed `u64` lanes in one AVX2 register.
    U64x4, u64,
    sibling = (I64x4, U64x4),
    narrow = (U32x4, u32),
    greater = unsigned_greater,
    abs = |a| a,
}
