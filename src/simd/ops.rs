//! Operator sugar.
//!
//! Every operator forwards to the named contract method, so `a + b` and
//! `a.add(b)` are the same operation on every target.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::simd::element::{Element, IntElement};
use crate::simd::fallback::Vector;
use crate::simd::traits::{SimdInt, SimdVector};

macro_rules! impl_binary_op {
    ([$($generics:tt)*] $ty:ty, $contract:ident::$method:ident, $op_trait:ident::$op:ident, $assign_trait:ident::$assign:ident) => {
        impl<$($generics)*> $op_trait for $ty {
            type Output = Self;

            #[inline(always)]
            fn $op(self, rhs: Self) -> Self {
                $contract::$method(self, rhs)
            }
        }

        impl<$($generics)*> $assign_trait for $ty {
            #[inline(always)]
            fn $assign(&mut self, rhs: Self) {
                *self = $contract::$method(*self, rhs);
            }
        }
    };
}

macro_rules! impl_arith_ops {
    ([$($generics:tt)*] $ty:ty) => {
        impl_binary_op!([$($generics)*] $ty, SimdVector::add, Add::add, AddAssign::add_assign);
        impl_binary_op!([$($generics)*] $ty, SimdVector::sub, Sub::sub, SubAssign::sub_assign);
        impl_binary_op!([$($generics)*] $ty, SimdVector::mul, Mul::mul, MulAssign::mul_assign);
        impl_binary_op!([$($generics)*] $ty, SimdVector::div, Div::div, DivAssign::div_assign);

        impl<$($generics)*> Neg for $ty {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                SimdVector::neg(self)
            }
        }
    };
}

macro_rules! impl_bit_ops {
    ([$($generics:tt)*] $ty:ty) => {
        impl_binary_op!([$($generics)*] $ty, SimdInt::and, BitAnd::bitand, BitAndAssign::bitand_assign);
        impl_binary_op!([$($generics)*] $ty, SimdInt::or, BitOr::bitor, BitOrAssign::bitor_assign);
        impl_binary_op!([$($generics)*] $ty, SimdInt::xor, BitXor::bitxor, BitXorAssign::bitxor_assign);

        impl<$($generics)*> Not for $ty {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                SimdInt::not(self)
            }
        }

        /// Shifts every lane by the same amount.
        impl<$($generics)*> Shl<u32> for $ty {
            type Output = Self;

            #[inline(always)]
            fn shl(self, amount: u32) -> Self {
                SimdInt::shl_scalar(self, amount)
            }
        }

        impl<$($generics)*> ShlAssign<u32> for $ty {
            #[inline(always)]
            fn shl_assign(&mut self, amount: u32) {
                *self = SimdInt::shl_scalar(*self, amount);
            }
        }

        /// Logical right shift of every lane by the same amount.
        impl<$($generics)*> Shr<u32> for $ty {
            type Output = Self;

            #[inline(always)]
            fn shr(self, amount: u32) -> Self {
                SimdInt::shr_scalar(self, amount)
            }
        }

        impl<$($generics)*> ShrAssign<u32> for $ty {
            #[inline(always)]
            fn shr_assign(&mut self, amount: u32) {
                *self = SimdInt::shr_scalar(*self, amount);
            }
        }
    };
}

impl_arith_ops!([T: Element, const N: usize] Vector<T, N>);
impl_bit_ops!([T: IntElement, const N: usize] Vector<T, N>);

#[cfg(avx2)]
mod native {
    use super::*;
    use crate::simd::avx2::{F32x8, F64x4, I32x8, I64x4, U32x8, U64x4};

    impl_arith_ops!([] F32x8);
    impl_arith_ops!([] F64x4);
    impl_arith_ops!([] I32x8);
    impl_arith_ops!([] U32x8);
    impl_arith_ops!([] I64x4);
    impl_arith_ops!([] U64x4);

    impl_bit_ops!([] I32x8);
    impl_bit_ops!([] U32x8);
    impl_bit_ops!([] I64x4);
    impl_bit_ops!([] U64x4);
}
