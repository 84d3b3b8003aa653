//! Cross-width relations between the selected vector types.
//!
//! Every relation names the types re-exported by [`crate::simd`], so code
//! written against them type-checks the same way on every target. Lane-wise
//! conversions here go through the lane arrays; the AVX2 target supplies
//! its own instruction sequences for the 256-bit sources it owns.

use crate::simd::traits::{SimdDegrade, SimdPack, SimdPromote, SimdVector};
use crate::simd::{
    F32x4, F32x8, F64x2, F64x4, F64x8, I32x4, I32x8, I64x2, I64x4, I64x8, U32x4, U32x8, U64x2,
    U64x4, U64x8,
};

macro_rules! impl_lanewise_cast {
    ($($(#[$attr:meta])* $trait:ident::$method:ident, $assoc:ident: $from:ident => $to:ident as $scalar:ty;)*) => {
        $(
            $(#[$attr])*
            impl $trait for $from {
                type $assoc = $to;

                #[inline(always)]
                fn $method(self) -> $to {
                    $to::from_array(self.to_array().map(|lane| lane as $scalar))
                }
            }
        )*
    };
}

macro_rules! impl_pack {
    ($($full:ident => $half:ident;)*) => {
        $(
            impl SimdPack for $full {
                type Half = $half;
            }
        )*
    };
}

impl_lanewise_cast! {
    SimdPromote::promote, Wide: F32x4 => F64x4 as f64;
    #[cfg(not(avx2))]
    SimdPromote::promote, Wide: F32x8 => F64x8 as f64;
    SimdPromote::promote, Wide: I32x4 => I64x4 as i64;
    #[cfg(not(avx2))]
    SimdPromote::promote, Wide: I32x8 => I64x8 as i64;
    SimdPromote::promote, Wide: U32x4 => U64x4 as u64;
    #[cfg(not(avx2))]
    SimdPromote::promote, Wide: U32x8 => U64x8 as u64;

    #[cfg(not(avx2))]
    SimdDegrade::degrade, Narrow: F64x4 => F32x4 as f32;
    SimdDegrade::degrade, Narrow: F64x8 => F32x8 as f32;
    #[cfg(not(avx2))]
    SimdDegrade::degrade, Narrow: I64x4 => I32x4 as i32;
    SimdDegrade::degrade, Narrow: I64x8 => I32x8 as i32;
    #[cfg(not(avx2))]
    SimdDegrade::degrade, Narrow: U64x4 => U32x4 as u32;
    SimdDegrade::degrade, Narrow: U64x8 => U32x8 as u32;
}

impl_pack! {
    F32x8 => F32x4;
    F64x4 => F64x2;
    F64x8 => F64x4;
    I32x8 => I32x4;
    U32x8 => U32x4;
    I64x4 => I64x2;
    I64x8 => I64x4;
    U64x4 => U64x2;
    U64x8 => U64x4;
}
