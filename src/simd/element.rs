//! Scalar lane types.
//!
//! Every vector lane holds one [`Element`]. The per-lane operations defined
//! here are the scalar reference of the whole vector layer: the fallback
//! target is built from them lane by lane, and every native specialization
//! reproduces exactly what they compute.

use std::fmt::Debug;

use num::{Float, PrimInt};

use crate::simd::emulation::Coefficients;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can live in a vector lane.
///
/// Implemented for `f32`, `f64`, `i32`, `u32`, `i64` and `u64`; the trait is
/// sealed so the set of lane types stays closed.
pub trait Element:
    sealed::Sealed + Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static
{
    /// Additive identity, the fill value of masked `hadd`.
    const ZERO: Self;
    /// Multiplicative identity, the fill value of masked `hmul`.
    const ONE: Self;
    /// Fill value of masked `hmax` (`-inf` for floats, `MIN` for integers).
    const REDUCE_MAX_IDENTITY: Self;
    /// Fill value of masked `hmin` (`+inf` for floats, `MAX` for integers).
    const REDUCE_MIN_IDENTITY: Self;

    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;
    /// Integer division by zero yields zero; `MIN / -1` wraps.
    fn lane_div(self, rhs: Self) -> Self;
    fn lane_neg(self) -> Self;
    fn lane_abs(self) -> Self;
    /// Returns `self` when `rhs` is NaN and `rhs` on ties.
    fn lane_min(self, rhs: Self) -> Self;
    /// Returns `self` when `rhs` is NaN and `rhs` on ties.
    fn lane_max(self, rhs: Self) -> Self;
    /// `self * a + b`, fused for floats, wrapping for integers.
    fn lane_mul_add(self, a: Self, b: Self) -> Self;
}

/// Floating-point lane types.
pub trait FloatElement: Element + Float + Coefficients {
    /// Signed integer of the same bit width.
    type Int: IntElement;
    /// Unsigned integer of the same bit width, also the bit-pattern type.
    type UInt: IntElement;

    /// Number of explicitly stored mantissa bits.
    const MANTISSA_BITS: u32;
    /// Exponent bias of the IEEE-754 encoding.
    const EXPONENT_BIAS: i32;
    /// Bit pattern of the sign bit.
    const SIGN_MASK: u64;
    /// Bit pattern of `1.0`.
    const ONE_BITS: u64;

    fn lane_to_bits(self) -> Self::UInt;
    fn lane_from_bits(bits: Self::UInt) -> Self;

    /// Round to nearest integer, ties to even.
    fn lane_round(self) -> Self;

    /// Truncates toward zero, saturating at the integer range; NaN becomes 0.
    fn lane_to_int(self) -> Self::Int;
    /// Truncates toward zero, saturating at the integer range; NaN and
    /// negative values become 0.
    fn lane_to_uint(self) -> Self::UInt;
    fn lane_from_int(value: Self::Int) -> Self;
    fn lane_from_uint(value: Self::UInt) -> Self;
}

/// Integer lane types.
pub trait IntElement: Element + PrimInt {
    type Signed: IntElement;
    type Unsigned: IntElement;

    const BITS: u32;

    /// Builds a lane value from the low bits of `value`.
    fn from_u64_wrapping(value: u64) -> Self;

    fn to_signed_bits(self) -> Self::Signed;
    fn to_unsigned_bits(self) -> Self::Unsigned;

    /// Interprets the lane as an unsigned shift or rotate amount.
    ///
    /// Values that do not fit a `u32` saturate to `u32::MAX`, so they still
    /// shift everything out.
    fn lane_amount(self) -> u32;

    /// Logical shift left; amounts `>= BITS` yield zero.
    #[inline(always)]
    fn lane_shl(self, amount: u32) -> Self {
        if amount >= Self::BITS {
            Self::ZERO
        } else {
            self.unsigned_shl(amount)
        }
    }

    /// Logical shift right; amounts `>= BITS` yield zero.
    #[inline(always)]
    fn lane_shr(self, amount: u32) -> Self {
        if amount >= Self::BITS {
            Self::ZERO
        } else {
            self.unsigned_shr(amount)
        }
    }

    /// Rotate left by `amount` modulo `BITS`.
    #[inline(always)]
    fn lane_rotl(self, amount: u32) -> Self {
        self.rotate_left(amount % Self::BITS)
    }

    /// Rotate right by `amount` modulo `BITS`.
    #[inline(always)]
    fn lane_rotr(self, amount: u32) -> Self {
        self.rotate_right(amount % Self::BITS)
    }
}

macro_rules! impl_float_element {
    ($float:ty, $int:ty, $uint:ty, mantissa = $mantissa:expr, bias = $bias:expr, one = $one:expr) => {
        impl sealed::Sealed for $float {}

        impl Element for $float {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const REDUCE_MAX_IDENTITY: Self = <$float>::NEG_INFINITY;
            const REDUCE_MIN_IDENTITY: Self = <$float>::INFINITY;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                -self
            }

            #[inline(always)]
            fn lane_abs(self) -> Self {
                <$float>::abs(self)
            }

            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                if rhs.is_nan() || self < rhs {
                    self
                } else {
                    rhs
                }
            }

            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                if rhs.is_nan() || self > rhs {
                    self
                } else {
                    rhs
                }
            }

            #[inline(always)]
            fn lane_mul_add(self, a: Self, b: Self) -> Self {
                <$float>::mul_add(self, a, b)
            }
        }

        impl FloatElement for $float {
            type Int = $int;
            type UInt = $uint;

            const MANTISSA_BITS: u32 = $mantissa;
            const EXPONENT_BIAS: i32 = $bias;
            const SIGN_MASK: u64 = 1 << (<$uint>::BITS - 1);
            const ONE_BITS: u64 = $one;

            #[inline(always)]
            fn lane_to_bits(self) -> $uint {
                self.to_bits()
            }

            #[inline(always)]
            fn lane_from_bits(bits: $uint) -> Self {
                <$float>::from_bits(bits)
            }

            #[inline(always)]
            fn lane_round(self) -> Self {
                self.round_ties_even()
            }

            #[inline(always)]
            fn lane_to_int(self) -> $int {
                self as $int
            }

            #[inline(always)]
            fn lane_to_uint(self) -> $uint {
                self as $uint
            }

            #[inline(always)]
            fn lane_from_int(value: $int) -> Self {
                value as $float
            }

            #[inline(always)]
            fn lane_from_uint(value: $uint) -> Self {
                value as $float
            }
        }
    };
}

macro_rules! impl_int_element {
    (@abs signed, $value:expr) => {
        $value.wrapping_abs()
    };
    (@abs unsigned, $value:expr) => {
        $value
    };
    ($int:ty, $kind:ident, signed = $signed:ty, unsigned = $unsigned:ty) => {
        impl sealed::Sealed for $int {}

        impl Element for $int {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const REDUCE_MAX_IDENTITY: Self = <$int>::MIN;
            const REDUCE_MIN_IDENTITY: Self = <$int>::MAX;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                if rhs == 0 {
                    0
                } else {
                    self.wrapping_div(rhs)
                }
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }

            #[inline(always)]
            fn lane_abs(self) -> Self {
                impl_int_element!(@abs $kind, self)
            }

            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                if self < rhs {
                    self
                } else {
                    rhs
                }
            }

            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                if self > rhs {
                    self
                } else {
                    rhs
                }
            }

            #[inline(always)]
            fn lane_mul_add(self, a: Self, b: Self) -> Self {
                self.wrapping_mul(a).wrapping_add(b)
            }
        }

        impl IntElement for $int {
            type Signed = $signed;
            type Unsigned = $unsigned;

            const BITS: u32 = <$int>::BITS;

            #[inline(always)]
            fn from_u64_wrapping(value: u64) -> Self {
                value as $int
            }

            #[inline(always)]
            fn to_signed_bits(self) -> $signed {
                self as $signed
            }

            #[inline(always)]
            fn to_unsigned_bits(self) -> $unsigned {
                self as $unsigned
            }

            #[inline(always)]
            fn lane_amount(self) -> u32 {
                u32::try_from(self as $unsigned).unwrap_or(u32::MAX)
            }
        }
    };
}

impl_float_element!(f32, i32, u32, mantissa = 23, bias = 127, one = 0x3f80_0000);
impl_float_element!(f64, i64, u64, mantissa = 52, bias = 1023, one = 0x3ff0_0000_0000_0000);

impl_int_element!(i32, signed, signed = i32, unsigned = u32);
impl_int_element!(u32, unsigned, signed = i32, unsigned = u32);
impl_int_element!(i64, signed, signed = i64, unsigned = u64);
impl_int_element!(u64, unsigned, signed = i64, unsigned = u64);
