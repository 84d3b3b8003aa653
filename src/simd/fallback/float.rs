use num::Float;

use crate::simd::element::FloatElement;
use crate::simd::fallback::Vector;
use crate::simd::traits::SimdFloat;

impl<T: FloatElement, const N: usize> SimdFloat for Vector<T, N> {
    type Int = Vector<T::Int, N>;
    type UInt = Vector<T::UInt, N>;

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map_lanes(Float::sqrt)
    }

    #[inline(always)]
    fn round(self) -> Self {
        self.map_lanes(T::lane_round)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map_lanes(Float::floor)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        self.map_lanes(Float::ceil)
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        self.map_lanes(Float::trunc)
    }

    #[inline(always)]
    fn to_int(self) -> Self::Int {
        Vector {
            lanes: self.lanes.map(T::lane_to_int),
        }
    }

    #[inline(always)]
    fn to_uint(self) -> Self::UInt {
        Vector {
            lanes: self.lanes.map(T::lane_to_uint),
        }
    }

    #[inline(always)]
    fn from_int(value: Self::Int) -> Self {
        Vector {
            lanes: value.lanes.map(T::lane_from_int),
        }
    }

    #[inline(always)]
    fn from_uint(value: Self::UInt) -> Self {
        Vector {
            lanes: value.lanes.map(T::lane_from_uint),
        }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::UInt {
        Vector {
            lanes: self.lanes.map(T::lane_to_bits),
        }
    }

    #[inline(always)]
    fn from_bits(bits: Self::UInt) -> Self {
        Vector {
            lanes: bits.lanes.map(T::lane_from_bits),
        }
    }
}
