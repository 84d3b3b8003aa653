//! AVX2 + FMA target.
//!
//! Native 256-bit specializations selected by `build.rs` when the build host
//! reports both `avx2` and `fma`:
//!
//! | type    | register  | lanes        |
//! |---------|-----------|--------------|
//! | `F32x8` | `__m256`  | 8 × f32      |
//! | `F64x4` | `__m256d` | 4 × f64      |
//! | `I32x8` | `__m256i` | 8 × i32      |
//! | `U32x8` | `__m256i` | 8 × u32      |
//! | `I64x4` | `__m256i` | 4 × i64      |
//! | `U64x4` | `__m256i` | 4 × u64      |
//!
//! Masks stay in the portable [`Mask`] bit form; they are expanded into a
//! full-width lane mask right before a blend, masked load or masked store,
//! and compressed back with `movemask` after a comparison.
//!
//! Operations AVX2 has no instruction for (integer division, float to
//! 64-bit integer conversions, 64-bit lane permutes, scatter) fall back to
//! the lane-wise reference inside the specialization, so results stay
//! identical to the portable target.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::mask::Mask;

mod f32x8;
mod f64x4;
mod i32x8;
mod i64x4;

pub use f32x8::F32x8;
pub use f64x4::F64x4;
pub use i32x8::{I32x8, U32x8};
pub use i64x4::{I64x4, U64x4};

/// Alignment required by the aligned loads and stores of every AVX2 type.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Expands an 8-lane mask into all-ones / all-zeros 32-bit lanes.
#[inline(always)]
pub(crate) fn mask_to_epi32(mask: Mask<8>) -> __m256i {
    unsafe {
        let bits = _mm256_set1_epi32(mask.bits() as i32);
        let lane_bits = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
        _mm256_cmpeq_epi32(_mm256_and_si256(bits, lane_bits), lane_bits)
    }
}

/// Expands a 4-lane mask into all-ones / all-zeros 64-bit lanes.
#[inline(always)]
pub(crate) fn mask_to_epi64(mask: Mask<4>) -> __m256i {
    unsafe {
        let bits = _mm256_set1_epi64x(mask.bits() as i64);
        let lane_bits = _mm256_setr_epi64x(1, 2, 4, 8);
        _mm256_cmpeq_epi64(_mm256_and_si256(bits, lane_bits), lane_bits)
    }
}

/// Collects the sign bit of each 32-bit lane.
#[inline(always)]
pub(crate) fn mask_from_epi32(lanes: __m256i) -> Mask<8> {
    unsafe { Mask::from_bits(_mm256_movemask_ps(_mm256_castsi256_ps(lanes)) as u32) }
}

/// Collects the sign bit of each 64-bit lane.
#[inline(always)]
pub(crate) fn mask_from_epi64(lanes: __m256i) -> Mask<4> {
    unsafe { Mask::from_bits(_mm256_movemask_pd(_mm256_castsi256_pd(lanes)) as u32) }
}
