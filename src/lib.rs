//! # simdlane
//!
//! Portable explicit vectorization: fixed-width vector types (`F32x8`,
//! `I64x4`, ...) with one operation contract on every target, lane masks
//! and swizzles, masked forms of every operation, vectorized `exp`/`log`/
//! `sin`/`cos`, and conversions between lane widths.
//!
//! The hardware target is chosen when the crate is built (see
//! [`simd::TARGET`]): AVX2 + FMA hosts get native 256-bit specializations,
//! everything else gets the portable fallback. Results agree across targets.
//!
//! ```rust
//! use simdlane::simd::traits::{SimdFloat, SimdVector};
//! use simdlane::simd::{F64x4, Mask};
//!
//! let x = F64x4::from_array([1.0, -4.0, 9.0, 16.0]);
//! let positive = x.cmp_gt(F64x4::zero());
//! let roots = x.sqrt_masked(positive);
//! assert_eq!(roots.to_array(), [1.0, -4.0, 3.0, 4.0]);
//! assert_eq!(positive, Mask::new([true, false, true, true]));
//! ```

pub mod error;
pub mod simd;
pub mod utils;

pub use error::{Result, SimdError};
pub use utils::AlignedBuffer;
