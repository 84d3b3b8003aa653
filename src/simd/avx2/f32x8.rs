//! AVX2 8-lane f32 vector.
//!
//! `F32x8` wraps an `__m256` register. Arithmetic, rounding, comparisons,
//! masked memory access, permutes and gathers map onto single AVX2/FMA
//! instructions. Float to integer conversions are built from `cvttps`
//! plus the fix-ups that make out-of-range and NaN lanes saturate the same
//! way the scalar `as` casts do.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use crate::simd::avx2::{mask_to_epi32, F64x4, I32x8, U32x8, AVX_ALIGNMENT};
use crate::simd::mask::Mask;
use crate::simd::swizzle::Swizzle;
use crate::simd::traits::{SimdFloat, SimdPack, SimdPromote, SimdVector};
use crate::simd::F64x8;

/// Eight packed `f32` lanes in one AVX2 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x8 {
    pub(crate) elements: __m256,
}

impl F32x8 {
    #[inline(always)]
    pub(crate) fn from_register(elements: __m256) -> Self {
        Self { elements }
    }

    #[inline(always)]
    fn compare<const PREDICATE: i32>(self, rhs: Self) -> Mask<8> {
        unsafe {
            let lanes = _mm256_cmp_ps::<PREDICATE>(self.elements, rhs.elements);
            Mask::from_bits(_mm256_movemask_ps(lanes) as u32)
        }
    }

    #[inline(always)]
    fn sign_bit() -> __m256 {
        unsafe { _mm256_set1_ps(-0.0) }
    }
}

impl Default for F32x8 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for F32x8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x8").field(&self.to_array()).finish()
    }
}

impl SimdVector for F32x8 {
    type Scalar = f32;
    type Array = [f32; 8];
    type Mask = Mask<8>;
    type Swizzle = Swizzle<8>;

    const LANES: usize = 8;
    const ALIGNMENT: usize = AVX_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        Self::from_register(unsafe { _mm256_setzero_ps() })
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::from_register(unsafe { _mm256_set1_ps(value) })
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 8]) -> Self {
        Self::from_register(unsafe { _mm256_loadu_ps(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 8] {
        let mut lanes = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self::from_register(_mm256_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn loada(ptr: *const f32) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        Self::from_register(_mm256_load_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn storea(self, ptr: *mut f32) {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        _mm256_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: Mask<8>, ptr: *const f32) -> Self {
        // maskload zeroes unselected lanes and never touches their memory
        let lanes = mask_to_epi32(mask);
        let loaded = _mm256_maskload_ps(ptr, lanes);
        Self::from_register(_mm256_blendv_ps(self.elements, loaded, _mm256_castsi256_ps(lanes)))
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Mask<8>, ptr: *mut f32) {
        _mm256_maskstore_ps(ptr, mask_to_epi32(mask), self.elements)
    }

    #[inline(always)]
    fn select(mask: Mask<8>, if_true: Self, if_false: Self) -> Self {
        unsafe {
            let lanes = _mm256_castsi256_ps(mask_to_epi32(mask));
            Self::from_register(_mm256_blendv_ps(if_false.elements, if_true.elements, lanes))
        }
    }

    #[inline(always)]
    fn permute(self, swizzle: Swizzle<8>) -> Self {
        unsafe {
            let indices = _mm256_loadu_si256(swizzle.as_ptr() as *const __m256i);
            let indices = _mm256_and_si256(indices, _mm256_set1_epi32(7));
            Self::from_register(_mm256_permutevar8x32_ps(self.elements, indices))
        }
    }

    #[inline(always)]
    unsafe fn gather(base: *const f32, indices: Swizzle<8>) -> Self {
        let offsets = _mm256_loadu_si256(indices.as_ptr() as *const __m256i);
        Self::from_register(_mm256_i32gather_ps::<4>(base, offsets))
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: Mask<8>, base: *const f32, indices: Swizzle<8>) -> Self {
        let offsets = _mm256_loadu_si256(indices.as_ptr() as *const __m256i);
        let lanes = _mm256_castsi256_ps(mask_to_epi32(mask));
        Self::from_register(_mm256_mask_i32gather_ps::<4>(self.elements, base, offsets, lanes))
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_add_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_sub_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_mul_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_div_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_register(unsafe { _mm256_xor_ps(self.elements, Self::sign_bit()) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_register(unsafe { _mm256_andnot_ps(Self::sign_bit(), self.elements) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        // minps yields its second operand when either is NaN; keep self for NaN rhs
        unsafe {
            let min = _mm256_min_ps(self.elements, rhs.elements);
            let rhs_nan = _mm256_cmp_ps::<_CMP_UNORD_Q>(rhs.elements, rhs.elements);
            Self::from_register(_mm256_blendv_ps(min, self.elements, rhs_nan))
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe {
            let max = _mm256_max_ps(self.elements, rhs.elements);
            let rhs_nan = _mm256_cmp_ps::<_CMP_UNORD_Q>(rhs.elements, rhs.elements);
            Self::from_register(_mm256_blendv_ps(max, self.elements, rhs_nan))
        }
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self::from_register(unsafe { _mm256_fmadd_ps(self.elements, a.elements, b.elements) })
    }

    #[inline(always)]
    fn mul_sub(self, a: Self, b: Self) -> Self {
        Self::from_register(unsafe { _mm256_fmsub_ps(self.elements, a.elements, b.elements) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_EQ_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_NEQ_UQ>(rhs)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_GT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_LT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_GE_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Mask<8> {
        self.compare::<_CMP_LE_OQ>(rhs)
    }

    /// Same halving order as the portable reduction: lanes `i + 4`, then
    /// `i + 2`, then `i + 1` are folded into lane `i`.
    #[inline(always)]
    fn hadd(self) -> f32 {
        unsafe {
            let low = _mm256_castps256_ps128(self.elements);
            let high = _mm256_extractf128_ps::<1>(self.elements);
            let quad = _mm_add_ps(low, high);
            let pair = _mm_add_ps(quad, _mm_movehl_ps(quad, quad));
            let single = _mm_add_ss(pair, _mm_shuffle_ps::<0b01>(pair, pair));
            _mm_cvtss_f32(single)
        }
    }
}

const TWO_POW_31: f32 = 2_147_483_648.0;
const TWO_POW_32: f32 = 4_294_967_296.0;

impl SimdFloat for F32x8 {
    type Int = I32x8;
    type UInt = U32x8;

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::from_register(unsafe { _mm256_sqrt_ps(self.elements) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        Self::from_register(unsafe {
            _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.elements)
        })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::from_register(unsafe { _mm256_floor_ps(self.elements) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::from_register(unsafe { _mm256_ceil_ps(self.elements) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::from_register(unsafe {
            _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.elements)
        })
    }

    /// `cvttps` returns `i32::MIN` for NaN and every out-of-range lane; the
    /// positive overflow lanes are flipped to `i32::MAX` and NaN lanes cleared.
    #[inline(always)]
    fn to_int(self) -> I32x8 {
        unsafe {
            let x = self.elements;
            let truncated = _mm256_cvttps_epi32(x);
            let too_big = _mm256_cmp_ps::<_CMP_GE_OQ>(x, _mm256_set1_ps(TWO_POW_31));
            let nan = _mm256_cmp_ps::<_CMP_UNORD_Q>(x, x);
            let saturated = _mm256_xor_si256(truncated, _mm256_castps_si256(too_big));
            I32x8::from_register(_mm256_andnot_si256(_mm256_castps_si256(nan), saturated))
        }
    }

    /// Lanes in `[2^31, 2^32)` are shifted down by `2^31` before the signed
    /// conversion and get the top bit back afterwards.
    #[inline(always)]
    fn to_uint(self) -> U32x8 {
        unsafe {
            let x = self.elements;
            let high = _mm256_cmp_ps::<_CMP_GE_OQ>(x, _mm256_set1_ps(TWO_POW_31));
            let shifted = _mm256_sub_ps(x, _mm256_and_ps(high, _mm256_set1_ps(TWO_POW_31)));
            let truncated = _mm256_cvttps_epi32(shifted);
            let top_bit = _mm256_and_si256(_mm256_castps_si256(high), _mm256_set1_epi32(i32::MIN));
            let value = _mm256_xor_si256(truncated, top_bit);

            let overflow = _mm256_cmp_ps::<_CMP_GE_OQ>(x, _mm256_set1_ps(TWO_POW_32));
            let value = _mm256_or_si256(value, _mm256_castps_si256(overflow));

            // negative and NaN lanes become zero
            let positive = _mm256_cmp_ps::<_CMP_GT_OQ>(x, _mm256_setzero_ps());
            U32x8::from_register(_mm256_and_si256(value, _mm256_castps_si256(positive)))
        }
    }

    #[inline(always)]
    fn from_int(value: I32x8) -> Self {
        Self::from_register(unsafe { _mm256_cvtepi32_ps(value.elements) })
    }

    /// Both 16-bit halves convert exactly; the fused recombination rounds once.
    #[inline(always)]
    fn from_uint(value: U32x8) -> Self {
        unsafe {
            let high = _mm256_cvtepi32_ps(_mm256_srli_epi32::<16>(value.elements));
            let low = _mm256_cvtepi32_ps(_mm256_and_si256(value.elements, _mm256_set1_epi32(0xffff)));
            Self::from_register(_mm256_fmadd_ps(high, _mm256_set1_ps(65536.0), low))
        }
    }

    #[inline(always)]
    fn to_bits(self) -> U32x8 {
        U32x8::from_register(unsafe { _mm256_castps_si256(self.elements) })
    }

    #[inline(always)]
    fn from_bits(bits: U32x8) -> Self {
        Self::from_register(unsafe { _mm256_castsi256_ps(bits.elements) })
    }

    #[inline(always)]
    fn is_nan(self) -> Mask<8> {
        self.compare::<_CMP_UNORD_Q>(self)
    }
}

impl SimdPromote for F32x8 {
    type Wide = F64x8;

    #[inline(always)]
    fn promote(self) -> F64x8 {
        unsafe {
            let low = _mm256_cvtps_pd(_mm256_castps256_ps128(self.elements));
            let high = _mm256_cvtps_pd(_mm256_extractf128_ps::<1>(self.elements));
            F64x8::pack(F64x4::from_register(low), F64x4::from_register(high))
        }
    }
}
