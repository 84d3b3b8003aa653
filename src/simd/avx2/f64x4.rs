//! AVX2 4-lane f64 vector.
//!
//! `F64x4` wraps an `__m256d` register. AVX2 has no conversion between
//! `f64` and 64-bit integers and no cross-lane 64-bit float permute, so
//! those go through the lane arrays with the scalar reference.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use crate::simd::avx2::{mask_to_epi64, I64x4, U64x4, AVX_ALIGNMENT};
use crate::simd::element::FloatElement;
use crate::simd::mask::Mask;
use crate::simd::swizzle::Swizzle;
use crate::simd::traits::{SimdDegrade, SimdFloat, SimdVector};
use crate::simd::F32x4;

/// Four packed `f64` lanes in one AVX2 register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x4 {
    pub(crate) elements: __m256d,
}

impl F64x4 {
    #[inline(always)]
    pub(crate) fn from_register(elements: __m256d) -> Self {
        Self { elements }
    }

    #[inline(always)]
    fn compare<const PREDICATE: i32>(self, rhs: Self) -> Mask<4> {
        unsafe {
            let lanes = _mm256_cmp_pd::<PREDICATE>(self.elements, rhs.elements);
            Mask::from_bits(_mm256_movemask_pd(lanes) as u32)
        }
    }

    #[inline(always)]
    fn sign_bit() -> __m256d {
        unsafe { _mm256_set1_pd(-0.0) }
    }

    #[inline(always)]
    fn gather_offsets(indices: &Swizzle<4>) -> __m128i {
        unsafe { _mm_loadu_si128(indices.as_ptr() as *const __m128i) }
    }
}

impl Default for F64x4 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for F64x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F64x4").field(&self.to_array()).finish()
    }
}

impl SimdVector for F64x4 {
    type Scalar = f64;
    type Array = [f64; 4];
    type Mask = Mask<4>;
    type Swizzle = Swizzle<4>;

    const LANES: usize = 4;
    const ALIGNMENT: usize = AVX_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        Self::from_register(unsafe { _mm256_setzero_pd() })
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self::from_register(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn from_array(lanes: [f64; 4]) -> Self {
        Self::from_register(unsafe { _mm256_loadu_pd(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 4] {
        let mut lanes = [0.0f64; 4];
        unsafe { _mm256_storeu_pd(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        Self::from_register(_mm256_loadu_pd(ptr))
    }

    #[inline(always)]
    unsafe fn loada(ptr: *const f64) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        Self::from_register(_mm256_load_pd(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn storea(self, ptr: *mut f64) {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        _mm256_store_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: Mask<4>, ptr: *const f64) -> Self {
        let lanes = mask_to_epi64(mask);
        let loaded = _mm256_maskload_pd(ptr, lanes);
        Self::from_register(_mm256_blendv_pd(self.elements, loaded, _mm256_castsi256_pd(lanes)))
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Mask<4>, ptr: *mut f64) {
        _mm256_maskstore_pd(ptr, mask_to_epi64(mask), self.elements)
    }

    #[inline(always)]
    fn select(mask: Mask<4>, if_true: Self, if_false: Self) -> Self {
        unsafe {
            let lanes = _mm256_castsi256_pd(mask_to_epi64(mask));
            Self::from_register(_mm256_blendv_pd(if_false.elements, if_true.elements, lanes))
        }
    }

    #[inline(always)]
    unsafe fn gather(base: *const f64, indices: Swizzle<4>) -> Self {
        Self::from_register(_mm256_i32gather_pd::<8>(base, Self::gather_offsets(&indices)))
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: Mask<4>, base: *const f64, indices: Swizzle<4>) -> Self {
        let lanes = _mm256_castsi256_pd(mask_to_epi64(mask));
        let offsets = Self::gather_offsets(&indices);
        Self::from_register(_mm256_mask_i32gather_pd::<8>(self.elements, base, offsets, lanes))
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_add_pd(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_sub_pd(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_mul_pd(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_register(unsafe { _mm256_div_pd(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_register(unsafe { _mm256_xor_pd(self.elements, Self::sign_bit()) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_register(unsafe { _mm256_andnot_pd(Self::sign_bit(), self.elements) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe {
            let min = _mm256_min_pd(self.elements, rhs.elements);
            let rhs_nan = _mm256_cmp_pd::<_CMP_UNORD_Q>(rhs.elements, rhs.elements);
            Self::from_register(_mm256_blendv_pd(min, self.elements, rhs_nan))
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe {
            let max = _mm256_max_pd(self.elements, rhs.elements);
            let rhs_nan = _mm256_cmp_pd::<_CMP_UNORD_Q>(rhs.elements, rhs.elements);
            Self::from_register(_mm256_blendv_pd(max, self.elements, rhs_nan))
        }
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self::from_register(unsafe { _mm256_fmadd_pd(self.elements, a.elements, b.elements) })
    }

    #[inline(always)]
    fn mul_sub(self, a: Self, b: Self) -> Self {
        Self::from_register(unsafe { _mm256_fmsub_pd(self.elements, a.elements, b.elements) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_EQ_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_NEQ_UQ>(rhs)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_GT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_LT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_GE_OQ>(rhs)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Mask<4> {
        self.compare::<_CMP_LE_OQ>(rhs)
    }

    /// Folds lanes `i + 2` then `i + 1` into lane `i`, as the portable tree does.
    #[inline(always)]
    fn hadd(self) -> f64 {
        unsafe {
            let low = _mm256_castpd256_pd128(self.elements);
            let high = _mm256_extractf128_pd::<1>(self.elements);
            let pair = _mm_add_pd(low, high);
            _mm_cvtsd_f64(_mm_add_sd(pair, _mm_unpackhi_pd(pair, pair)))
        }
    }
}

impl SimdFloat for F64x4 {
    type Int = I64x4;
    type UInt = U64x4;

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::from_register(unsafe { _mm256_sqrt_pd(self.elements) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        Self::from_register(unsafe {
            _mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.elements)
        })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::from_register(unsafe { _mm256_floor_pd(self.elements) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::from_register(unsafe { _mm256_ceil_pd(self.elements) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::from_register(unsafe {
            _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.elements)
        })
    }

    #[inline(always)]
    fn to_int(self) -> I64x4 {
        I64x4::from_array(self.to_array().map(f64::lane_to_int))
    }

    #[inline(always)]
    fn to_uint(self) -> U64x4 {
        U64x4::from_array(self.to_array().map(f64::lane_to_uint))
    }

    #[inline(always)]
    fn from_int(value: I64x4) -> Self {
        Self::from_array(value.to_array().map(f64::lane_from_int))
    }

    #[inline(always)]
    fn from_uint(value: U64x4) -> Self {
        Self::from_array(value.to_array().map(f64::lane_from_uint))
    }

    #[inline(always)]
    fn to_bits(self) -> U64x4 {
        U64x4::from_register(unsafe { _mm256_castpd_si256(self.elements) })
    }

    #[inline(always)]
    fn from_bits(bits: U64x4) -> Self {
        Self::from_register(unsafe { _mm256_castsi256_pd(bits.elements) })
    }

    #[inline(always)]
    fn is_nan(self) -> Mask<4> {
        self.compare::<_CMP_UNORD_Q>(self)
    }
}

impl SimdDegrade for F64x4 {
    type Narrow = F32x4;

    /// `cvtpd2ps` rounds with the current mode, round-to-nearest-even.
    #[inline(always)]
    fn degrade(self) -> F32x4 {
        let mut lanes = [0.0f32; 4];
        unsafe { _mm_storeu_ps(lanes.as_mut_ptr(), _mm256_cvtpd_ps(self.elements)) };
        F32x4::from_array(lanes)
    }
}
