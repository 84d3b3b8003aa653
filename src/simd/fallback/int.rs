use crate::simd::element::IntElement;
use crate::simd::fallback::Vector;
use crate::simd::traits::SimdInt;

impl<T: IntElement, const N: usize> SimdInt for Vector<T, N> {
    type Signed = Vector<T::Signed, N>;
    type Unsigned = Vector<T::Unsigned, N>;

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, |a, b| a & b)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, |a, b| a | b)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, |a, b| a ^ b)
    }

    #[inline(always)]
    fn not(self) -> Self {
        self.map_lanes(|a| !a)
    }

    #[inline(always)]
    fn shl(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, |a, b| a.lane_shl(b.lane_amount()))
    }

    #[inline(always)]
    fn shr(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, |a, b| a.lane_shr(b.lane_amount()))
    }

    #[inline(always)]
    fn shl_scalar(self, amount: u32) -> Self {
        self.map_lanes(|a| a.lane_shl(amount))
    }

    #[inline(always)]
    fn shr_scalar(self, amount: u32) -> Self {
        self.map_lanes(|a| a.lane_shr(amount))
    }

    #[inline(always)]
    fn rotl_scalar(self, amount: u32) -> Self {
        self.map_lanes(|a| a.lane_rotl(amount))
    }

    #[inline(always)]
    fn rotr_scalar(self, amount: u32) -> Self {
        self.map_lanes(|a| a.lane_rotr(amount))
    }

    #[inline(always)]
    fn to_signed(self) -> Self::Signed {
        Vector {
            lanes: self.lanes.map(T::to_signed_bits),
        }
    }

    #[inline(always)]
    fn to_unsigned(self) -> Self::Unsigned {
        Vector {
            lanes: self.lanes.map(T::to_unsigned_bits),
        }
    }
}
