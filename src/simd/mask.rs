//! Per-lane boolean masks.
//!
//! A [`Mask<N>`] gates every conditional vector operation: lane `i` set means
//! lane `i` takes part in the operation, cleared means it keeps its previous
//! value. Lanes are packed into the low `N` bits of a `u32`, which is the same
//! layout AVX2 `movemask` instructions produce.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// `N` boolean lanes, lane `i` stored in bit `i`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Mask<const N: usize> {
    bits: u32,
}

impl<const N: usize> Mask<N> {
    /// Bits that belong to a lane.
    const LANE_BITS: u32 = {
        assert!(N > 0 && N <= 32, "masks hold between 1 and 32 lanes");
        if N == 32 {
            u32::MAX
        } else {
            (1u32 << N) - 1
        }
    };

    #[inline(always)]
    pub fn new(lanes: [bool; N]) -> Self {
        let mut bits = 0;
        for (i, lane) in lanes.iter().enumerate() {
            if *lane {
                bits |= 1 << i;
            }
        }
        Self { bits }
    }

    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        if value {
            Self::all_true()
        } else {
            Self::all_false()
        }
    }

    #[inline(always)]
    pub fn all_true() -> Self {
        Self {
            bits: Self::LANE_BITS,
        }
    }

    #[inline(always)]
    pub fn all_false() -> Self {
        Self { bits: 0 }
    }

    /// Builds a mask from a bitmask; bits above lane `N - 1` are discarded.
    #[inline(always)]
    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & Self::LANE_BITS,
        }
    }

    /// Mask with the first `min(n, N)` lanes set, used for partial loads and stores.
    #[inline(always)]
    pub fn first_n(n: usize) -> Self {
        if n >= N {
            Self::all_true()
        } else {
            Self::from_bits((1u32 << n) - 1)
        }
    }

    #[inline(always)]
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Reads lane `lane % N`.
    #[inline(always)]
    pub fn test(self, lane: usize) -> bool {
        self.bits & (1 << (lane % N)) != 0
    }

    /// Writes lane `lane % N`.
    #[inline(always)]
    pub fn set(&mut self, lane: usize, value: bool) {
        let bit = 1 << (lane % N);
        if value {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
    }

    #[inline(always)]
    pub fn all(self) -> bool {
        self.bits == Self::LANE_BITS
    }

    #[inline(always)]
    pub fn any(self) -> bool {
        self.bits != 0
    }

    #[inline(always)]
    pub fn none(self) -> bool {
        self.bits == 0
    }

    /// Number of set lanes.
    #[inline(always)]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline(always)]
    pub fn and(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }

    #[inline(always)]
    pub fn or(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }

    #[inline(always)]
    pub fn xor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits ^ rhs.bits,
        }
    }

    #[inline(always)]
    pub fn not(self) -> Self {
        Self {
            bits: !self.bits & Self::LANE_BITS,
        }
    }

    /// Lanes set in `self` and clear in `rhs`.
    #[inline(always)]
    pub fn and_not(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & !rhs.bits,
        }
    }

    pub fn to_array(self) -> [bool; N] {
        std::array::from_fn(|i| self.test(i))
    }
}

impl<const N: usize> Default for Mask<N> {
    fn default() -> Self {
        Self::all_false()
    }
}

impl<const N: usize> From<[bool; N]> for Mask<N> {
    fn from(lanes: [bool; N]) -> Self {
        Self::new(lanes)
    }
}

impl<const N: usize> fmt::Debug for Mask<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

impl<const N: usize> BitAnd for Mask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Mask::and(self, rhs)
    }
}

impl<const N: usize> BitOr for Mask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Mask::or(self, rhs)
    }
}

impl<const N: usize> BitXor for Mask<N> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Mask::xor(self, rhs)
    }
}

impl<const N: usize> Not for Mask<N> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Mask::not(self)
    }
}

impl<const N: usize> BitAndAssign for Mask<N> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = Mask::and(*self, rhs);
    }
}

impl<const N: usize> BitOrAssign for Mask<N> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = Mask::or(*self, rhs);
    }
}

impl<const N: usize> BitXorAssign for Mask<N> {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = Mask::xor(*self, rhs);
    }
}

/// Mask surface visible to code that is generic over vector types.
pub trait SimdMask: Copy + Eq + fmt::Debug + Default + Send + Sync + 'static {
    const LANES: usize;

    fn splat(value: bool) -> Self;
    fn from_bits(bits: u32) -> Self;
    fn first_n(n: usize) -> Self;
    fn bits(self) -> u32;
    fn test(self, lane: usize) -> bool;
    fn set(&mut self, lane: usize, value: bool);
    fn all(self) -> bool;
    fn any(self) -> bool;
    fn none(self) -> bool;
    fn count(self) -> u32;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;
    fn and_not(self, rhs: Self) -> Self;
}

impl<const N: usize> SimdMask for Mask<N> {
    const LANES: usize = N;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        Mask::splat(value)
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        Mask::from_bits(bits)
    }

    #[inline(always)]
    fn first_n(n: usize) -> Self {
        Mask::first_n(n)
    }

    #[inline(always)]
    fn bits(self) -> u32 {
        Mask::bits(self)
    }

    #[inline(always)]
    fn test(self, lane: usize) -> bool {
        Mask::test(self, lane)
    }

    #[inline(always)]
    fn set(&mut self, lane: usize, value: bool) {
        Mask::set(self, lane, value)
    }

    #[inline(always)]
    fn all(self) -> bool {
        Mask::all(self)
    }

    #[inline(always)]
    fn any(self) -> bool {
        Mask::any(self)
    }

    #[inline(always)]
    fn none(self) -> bool {
        Mask::none(self)
    }

    #[inline(always)]
    fn count(self) -> u32 {
        Mask::count(self)
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Mask::and(self, rhs)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Mask::or(self, rhs)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Mask::xor(self, rhs)
    }

    #[inline(always)]
    fn not(self) -> Self {
        Mask::not(self)
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        Mask::and_not(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_sets_matching_bits() {
            let mask = Mask::new([true, false, true, true]);
            assert_eq!(mask.bits(), 0b1101);
            assert_eq!(mask.to_array(), [true, false, true, true]);
        }

        #[test]
        fn test_from_bits_discards_high_bits() {
            let mask = Mask::<4>::from_bits(0xffff_fff5);
            assert_eq!(mask.bits(), 0b0101);
        }

        #[test]
        fn test_splat_and_full_width() {
            assert!(Mask::<8>::splat(true).all());
            assert!(Mask::<8>::splat(false).none());
            assert_eq!(Mask::<32>::all_true().bits(), u32::MAX);
            assert_eq!(Mask::<32>::all_true().count(), 32);
        }

        #[test]
        fn test_first_n() {
            assert_eq!(Mask::<8>::first_n(0).bits(), 0);
            assert_eq!(Mask::<8>::first_n(3).bits(), 0b111);
            assert!(Mask::<8>::first_n(8).all());
            assert!(Mask::<8>::first_n(100).all());
        }
    }

    mod lane_tests {
        use super::*;

        #[test]
        fn test_set_and_test() {
            let mut mask = Mask::<4>::default();
            mask.set(2, true);
            assert!(mask.test(2));
            assert!(!mask.test(1));
            mask.set(2, false);
            assert!(mask.none());
        }

        #[test]
        fn test_lane_index_wraps_modulo_n() {
            let mut mask = Mask::<4>::default();
            mask.set(5, true);
            assert!(mask.test(1));
            assert!(mask.test(9));
        }

        #[test]
        fn test_queries() {
            let mask = Mask::new([true, false, false, true]);
            assert!(mask.any());
            assert!(!mask.all());
            assert!(!mask.none());
            assert_eq!(mask.count(), 2);
        }
    }

    mod logic_tests {
        use super::*;

        #[test]
        fn test_boolean_algebra() {
            let a = Mask::new([true, true, false, false]);
            let b = Mask::new([true, false, true, false]);
            assert_eq!((a & b).to_array(), [true, false, false, false]);
            assert_eq!((a | b).to_array(), [true, true, true, false]);
            assert_eq!((a ^ b).to_array(), [false, true, true, false]);
            assert_eq!((!a).to_array(), [false, false, true, true]);
            assert_eq!(a.and_not(b).to_array(), [false, true, false, false]);
        }

        #[test]
        fn test_not_stays_within_lanes() {
            assert_eq!((!Mask::<2>::all_false()).bits(), 0b11);
            assert!((!Mask::<2>::all_true()).none());
        }

        #[test]
        fn test_assign_operators() {
            let mut mask = Mask::new([true, true, false, false]);
            mask &= Mask::new([true, false, true, false]);
            assert_eq!(mask.bits(), 0b0001);
            mask |= Mask::from_bits(0b0100);
            assert_eq!(mask.bits(), 0b0101);
            mask ^= Mask::all_true();
            assert_eq!(mask.bits(), 0b1010);
        }

        #[test]
        fn test_generic_surface_matches_inherent() {
            fn flip<M: SimdMask>(mask: M) -> M {
                mask.not()
            }
            let mask = Mask::<8>::from_bits(0b1010_0101);
            assert_eq!(flip(mask).bits(), 0b0101_1010);
            assert_eq!(<Mask<8> as SimdMask>::LANES, 8);
        }

        #[test]
        fn test_debug_lists_lanes() {
            let mask = Mask::new([true, false]);
            assert_eq!(format!("{mask:?}"), "[true, false]");
        }
    }
}
