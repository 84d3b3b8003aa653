//! Array-backed vector implementing the whole contract lane by lane.

use std::fmt;

use crate::simd::element::Element;
use crate::simd::mask::Mask;
use crate::simd::swizzle::Swizzle;
use crate::simd::traits::SimdVector;

/// `N` lanes of `T` stored as a plain array.
///
/// Every operation runs the scalar reference from
/// [`Element`](crate::simd::element::Element) on each lane, so this type
/// defines the observable semantics every native specialization reproduces.
/// The memory layout is exactly `[T; N]`.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Vector<T, const N: usize> {
    pub(crate) lanes: [T; N],
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Applies `f` to every lane.
    #[inline(always)]
    pub fn map_lanes(self, f: impl Fn(T) -> T) -> Self {
        Self {
            lanes: self.lanes.map(f),
        }
    }

    /// Applies `f` lane by lane to `self` and `rhs`.
    #[inline(always)]
    pub fn zip_lanes(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self {
            lanes: std::array::from_fn(|i| f(self.lanes[i], rhs.lanes[i])),
        }
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(&T, &T) -> bool) -> Mask<N> {
        let mut mask = Mask::all_false();
        for i in 0..N {
            if f(&self.lanes[i], &rhs.lanes[i]) {
                mask.set(i, true);
            }
        }
        mask
    }
}

impl<T: Element, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self { lanes: [T::ZERO; N] }
    }
}

impl<T: Element, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector").field(&self.lanes).finish()
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(lanes: [T; N]) -> Self {
        Self { lanes }
    }
}

impl<T: Element, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(vector: Vector<T, N>) -> Self {
        vector.lanes
    }
}

impl<T: Element, const N: usize> SimdVector for Vector<T, N> {
    type Scalar = T;
    type Array = [T; N];
    type Mask = Mask<N>;
    type Swizzle = Swizzle<N>;

    const LANES: usize = N;
    const ALIGNMENT: usize = N * std::mem::size_of::<T>();

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self { lanes: [value; N] }
    }

    #[inline(always)]
    fn from_array(lanes: [T; N]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    fn to_array(self) -> [T; N] {
        self.lanes
    }

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        Self {
            lanes: ptr.cast::<[T; N]>().read_unaligned(),
        }
    }

    #[inline(always)]
    unsafe fn loada(ptr: *const T) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        Self::load(ptr)
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut T) {
        ptr.cast::<[T; N]>().write_unaligned(self.lanes)
    }

    #[inline(always)]
    unsafe fn storea(self, ptr: *mut T) {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        self.store(ptr)
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: Mask<N>, ptr: *const T) -> Self {
        let mut lanes = self.lanes;
        for (i, lane) in lanes.iter_mut().enumerate() {
            if mask.test(i) {
                *lane = ptr.add(i).read_unaligned();
            }
        }
        Self { lanes }
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Mask<N>, ptr: *mut T) {
        for (i, lane) in self.lanes.iter().enumerate() {
            if mask.test(i) {
                ptr.add(i).write_unaligned(*lane);
            }
        }
    }

    #[inline(always)]
    fn select(mask: Mask<N>, if_true: Self, if_false: Self) -> Self {
        Self {
            lanes: std::array::from_fn(|i| {
                if mask.test(i) {
                    if_true.lanes[i]
                } else {
                    if_false.lanes[i]
                }
            }),
        }
    }

    #[inline(always)]
    fn permute(self, swizzle: Swizzle<N>) -> Self {
        Self {
            lanes: std::array::from_fn(|i| self.lanes[swizzle.get(i) as usize % N]),
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_sub)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_mul)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_div)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        self.map_lanes(T::lane_neg)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map_lanes(T::lane_abs)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip_lanes(rhs, T::lane_max)
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            lanes: std::array::from_fn(|i| self.lanes[i].lane_mul_add(a.lanes[i], b.lanes[i])),
        }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Mask<N> {
        self.compare(rhs, T::eq)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Mask<N> {
        self.compare(rhs, T::gt)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Mask<N> {
        self.compare(rhs, T::lt)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Mask<N> {
        self.compare(rhs, T::ge)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Mask<N> {
        self.compare(rhs, T::le)
    }
}
