//! Fixed-width vector types and the operations they share.
//!
//! The names re-exported here (`F32x8`, `I64x4`, ...) are the selection
//! surface: each resolves at compile time to exactly one concrete type,
//! the native specialization when the build target has one and the
//! portable [`fallback::Vector`] otherwise. Code written against these
//! names and the [`traits`] compiles and behaves the same on every target.
//!
//! ```rust
//! use simdlane::simd::traits::{SimdFloat, SimdVector};
//! use simdlane::simd::F32x8;
//!
//! let x = F32x8::splat(0.0);
//! assert_eq!(x.exp().to_array(), [1.0; 8]);
//! ```

#[cfg(avx2)]
pub mod avx2;

pub mod convert;
pub mod element;
pub mod emulation;
pub mod fallback;
pub mod mask;
pub mod ops;
pub mod slice;
pub mod swizzle;
pub mod traits;

pub use element::{Element, FloatElement, IntElement};
pub use mask::{Mask, SimdMask};
pub use swizzle::{SimdSwizzle, Swizzle};
pub use traits::{
    SimdDegrade, SimdFloat, SimdFromScalar, SimdInt, SimdPack, SimdPromote, SimdVector,
};

#[cfg(avx2)]
pub use avx2::{F32x8, F64x4, I32x8, I64x4, U32x8, U64x4};

#[cfg(not(avx2))]
pub use fallback::{F32x8, F64x4, I32x8, I64x4, U32x8, U64x4};

pub use fallback::{F32x4, F64x2, F64x8, I32x4, I64x2, I64x8, U32x4, U64x2, U64x8};

/// Hardware target the vector types were compiled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// 256-bit AVX2 + FMA specializations.
    Avx2,
    /// Portable lane-by-lane implementation.
    Fallback,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Avx2 => "avx2",
            Target::Fallback => "fallback",
        }
    }
}

#[cfg(avx2)]
pub const TARGET: Target = Target::Avx2;

#[cfg(not(avx2))]
pub const TARGET: Target = Target::Fallback;

/// Reports the compile-time target through the `log` facade.
pub fn log_target() {
    log::debug!(
        "simd target: {} (F32x8 = {})",
        TARGET.name(),
        std::any::type_name::<F32x8>()
    );
}
