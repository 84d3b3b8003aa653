//! AVX2 8-lane 32-bit integer vectors.
//!
//! `I32x8` and `U32x8` share the `__m256i` register layout and every
//! sign-agnostic instruction (wrapping add, sub and low multiply, bitwise
//! ops, variable shifts, masked memory access). They differ only in
//! comparisons, `min`/`max` and `abs`, which are passed to the generating
//! macro. Division has no AVX2 instruction and runs lane by lane.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use crate::simd::avx2::{mask_from_epi32, mask_to_epi32, I64x4, U64x4, AVX_ALIGNMENT};
use crate::simd::element::Element;
use crate::simd::mask::Mask;
use crate::simd::swizzle::Swizzle;
use crate::simd::traits::{SimdInt, SimdPack, SimdPromote, SimdVector};
use crate::simd::{I64x8, U64x8};

/// Flips the sign bit so unsigned order can use the signed compare.
#[inline(always)]
fn bias(value: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(value, _mm256_set1_epi32(i32::MIN)) }
}

macro_rules! impl_int32x8 {
    (
        $(#[$meta:meta])*
        $name:ident, $scalar:ty,
        sibling = ($signed:ident, $unsigned:ident),
        greater = $greater:expr,
        min = $min:path,
        max = $max:path,
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

            /// Lanes where `self > rhs` as all-ones.
            #[inline(always)]
            fn greater(self, rhs: Self) -> __m256i {
                let greater: fn(__m256i, __m256i) -> __m256i = $greater;
                greater(self.elements, rhs.elements)
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
            type Array = [$scalar; 8];
            type Mask = Mask<8>;
            type Swizzle = Swizzle<8>;

            const LANES: usize = 8;
            const ALIGNMENT: usize = AVX_ALIGNMENT;

            #[inline(always)]
            fn zero() -> Self {
                Self::from_register(unsafe { _mm256_setzero_si256() })
            }

            #[inline(always)]
            fn splat(value: $scalar) -> Self {
                Self::from_register(unsafe { _mm256_set1_epi32(value as i32) })
            }

            #[inline(always)]
            fn from_array(lanes: [$scalar; 8]) -> Self {
                Self::from_register(unsafe { _mm256_loadu_si256(lanes.as_ptr() as *const __m256i) })
            }

            #[inline(always)]
            fn to_array(self) -> [$scalar; 8] {
                let mut lanes = [0 as $scalar; 8];
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
            unsafe fn load_masked(self, mask: Mask<8>, ptr: *const $scalar) -> Self {
                let lanes = mask_to_epi32(mask);
                let loaded = _mm256_maskload_epi32(ptr as *const i32, lanes);
                Self::from_register(_mm256_blendv_epi8(self.elements, loaded, lanes))
            }

            #[inline(always)]
            unsafe fn store_masked(self, mask: Mask<8>, ptr: *mut $scalar) {
                _mm256_maskstore_epi32(ptr as *mut i32, mask_to_epi32(mask), self.elements)
            }

            #[inline(always)]
            fn select(mask: Mask<8>, if_true: Self, if_false: Self) -> Self {
                let lanes = mask_to_epi32(mask);
                Self::from_register(unsafe {
                    _mm256_blendv_epi8(if_false.elements, if_true.elements, lanes)
                })
            }

            #[inline(always)]
            fn permute(self, swizzle: Swizzle<8>) -> Self {
                unsafe {
                    let indices = _mm256_loadu_si256(swizzle.as_ptr() as *const __m256i);
                    let indices = _mm256_and_si256(indices, _mm256_set1_epi32(7));
                    Self::from_register(_mm256_permutevar8x32_epi32(self.elements, indices))
                }
            }

            #[inline(always)]
            unsafe fn gather(base: *const $scalar, indices: Swizzle<8>) -> Self {
                let offsets = _mm256_loadu_si256(indices.as_ptr() as *const __m256i);
                Self::from_register(_mm256_i32gather_epi32::<4>(base as *const i32, offsets))
            }

            #[inline(always)]
            unsafe fn gather_masked(self, mask: Mask<8>, base: *const $scalar, indices: Swizzle<8>) -> Self {
                let offsets = _mm256_loadu_si256(indices.as_ptr() as *const __m256i);
                Self::from_register(_mm256_mask_i32gather_epi32::<4>(
                    self.elements,
                    base as *const i32,
                    offsets,
                    mask_to_epi32(mask),
                ))
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_add_epi32(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_sub_epi32(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_mullo_epi32(self.elements, rhs.elements) })
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
                Self::from_register(unsafe { $min(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                Self::from_register(unsafe { $max(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn mul_add(self, a: Self, b: Self) -> Self {
                self.mul(a).add(b)
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> Mask<8> {
                mask_from_epi32(unsafe { _mm256_cmpeq_epi32(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> Mask<8> {
                mask_from_epi32(self.greater(rhs))
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> Mask<8> {
                mask_from_epi32(rhs.greater(self))
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> Mask<8> {
                self.cmp_lt(rhs).not()
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> Mask<8> {
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
                Self::from_register(unsafe { _mm256_xor_si256(self.elements, _mm256_set1_epi32(-1)) })
            }

            #[inline(always)]
            fn and_not(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_andnot_si256(rhs.elements, self.elements) })
            }

            /// `vpsllvd` already yields zero for counts of 32 or more.
            #[inline(always)]
            fn shl(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_sllv_epi32(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn shr(self, rhs: Self) -> Self {
                Self::from_register(unsafe { _mm256_srlv_epi32(self.elements, rhs.elements) })
            }

            #[inline(always)]
            fn shl_scalar(self, amount: u32) -> Self {
                Self::from_register(unsafe {
                    _mm256_sll_epi32(self.elements, _mm_cvtsi32_si128(amount as i32))
                })
            }

            #[inline(always)]
            fn shr_scalar(self, amount: u32) -> Self {
                Self::from_register(unsafe {
                    _mm256_srl_epi32(self.elements, _mm_cvtsi32_si128(amount as i32))
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
    };
}

impl_int32x8! {
    /// Eight packed `i32` lanes in one AVX2 register.
    I32x8, i32,
    sibling = (I32x8, U32x8),
    greater = |a, b| unsafe { _mm256_cmpgt_epi32(a, b) },
    min = _mm256_min_epi32,
    max = _mm256_max_epi32,
    abs = |a| unsafe { _mm256_abs_epi32(a) },
}

impl_int32x8! {
    /// Eight packed `u32` lanes in one AVX2 register.
    U32x8, u32,
    sibling = (I32x8, U32x8),
    greater = |a, b| unsafe { _mm256_cmpgt_epi32(bias(a), bias(b)) },
    min = _mm256_min_epu32,
    max = _mm256_max_epu32,
    abs = |a| a,
}

impl SimdPromote for I32x8 {
    type Wide = I64x8;

    #[inline(always)]
    fn promote(self) -> I64x8 {
        unsafe {
            let low = _mm256_cvtepi32_epi64(_mm256_castsi256_si128(self.elements));
            let high = _mm256_cvtepi32_epi64(_mm256_extracti128_si256::<1>(self.elements));
            I64x8::pack(I64x4::from_register(low), I64x4::from_register(high))
        }
    }
}

impl SimdPromote for U32x8 {
    type Wide = U64x8;

    #[inline(always)]
    fn promote(self) -> U64x8 {
        unsafe {
            let low = _mm256_cvtepu32_epi64(_mm256_castsi256_si128(self.elements));
            let high = _mm256_cvtepu32_epi64(_mm256_extracti128_si256::<1>(self.elements));
            U64x8::pack(U64x4::from_register(low), U64x4::from_register(high))
        }
    }
}
