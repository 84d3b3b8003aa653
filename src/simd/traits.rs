//! The vector operation contract.
//!
//! Every concrete vector type, native or emulated, implements these traits
//! with identical observable semantics. Each producing operation comes in
//! three forms:
//!
//! - unmasked (`add`): applies to all lanes;
//! - masked by value (`add_masked`): returns a new vector whose unselected
//!   lanes equal `self`;
//! - masked assign (`add_assign_masked`): the same, written back into `self`.
//!
//! Masked and assign forms are provided methods built on [`SimdVector::select`],
//! so an algorithm written with unmasked forms produces bit-identical
//! results to the same algorithm run with an all-true mask, on every target.

use std::fmt::Debug;

use num::Float;

use crate::error::{length_mismatch, Result};
use crate::simd::element::{Element, FloatElement, IntElement};
use crate::simd::emulation;
use crate::simd::mask::SimdMask;
use crate::simd::swizzle::SimdSwizzle;

/// Generates masked-by-value, assign and masked-assign forms of binary operations.
macro_rules! binary_forms {
    ($($op:ident => $masked:ident, $assign:ident, $assign_masked:ident;)*) => {
        $(
            #[doc = concat!("Masked [`", stringify!($op), "`](Self::", stringify!($op), "); unselected lanes keep `self`.")]
            #[inline(always)]
            fn $masked(self, mask: Self::Mask, rhs: Self) -> Self {
                Self::select(mask, self.$op(rhs), self)
            }

            #[doc = concat!("In-place [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign(&mut self, rhs: Self) {
                *self = self.$op(rhs);
            }

            #[doc = concat!("In-place masked [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign_masked(&mut self, mask: Self::Mask, rhs: Self) {
                *self = self.$masked(mask, rhs);
            }
        )*
    };
}

/// Generates masked-by-value, assign and masked-assign forms of unary operations.
macro_rules! unary_forms {
    ($($op:ident => $masked:ident, $assign:ident, $assign_masked:ident;)*) => {
        $(
            #[doc = concat!("Masked [`", stringify!($op), "`](Self::", stringify!($op), "); unselected lanes keep `self`.")]
            #[inline(always)]
            fn $masked(self, mask: Self::Mask) -> Self {
                Self::select(mask, self.$op(), self)
            }

            #[doc = concat!("In-place [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign(&mut self) {
                *self = self.$op();
            }

            #[doc = concat!("In-place masked [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign_masked(&mut self, mask: Self::Mask) {
                *self = self.$masked(mask);
            }
        )*
    };
}

/// Generates masked-by-value, assign and masked-assign forms of `self op a op b`.
macro_rules! ternary_forms {
    ($($op:ident => $masked:ident, $assign:ident, $assign_masked:ident;)*) => {
        $(
            #[doc = concat!("Masked [`", stringify!($op), "`](Self::", stringify!($op), "); unselected lanes keep `self`.")]
            #[inline(always)]
            fn $masked(self, mask: Self::Mask, a: Self, b: Self) -> Self {
                Self::select(mask, self.$op(a, b), self)
            }

            #[doc = concat!("In-place [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign(&mut self, a: Self, b: Self) {
                *self = self.$op(a, b);
            }

            #[doc = concat!("In-place masked [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign_masked(&mut self, mask: Self::Mask, a: Self, b: Self) {
                *self = self.$masked(mask, a, b);
            }
        )*
    };
}

/// Generates masked-by-value, assign and masked-assign forms of scalar-amount operations.
macro_rules! scalar_amount_forms {
    ($($op:ident => $masked:ident, $assign:ident, $assign_masked:ident;)*) => {
        $(
            #[doc = concat!("Masked [`", stringify!($op), "`](Self::", stringify!($op), "); unselected lanes keep `self`.")]
            #[inline(always)]
            fn $masked(self, mask: Self::Mask, amount: u32) -> Self {
                Self::select(mask, self.$op(amount), self)
            }

            #[doc = concat!("In-place [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign(&mut self, amount: u32) {
                *self = self.$op(amount);
            }

            #[doc = concat!("In-place masked [`", stringify!($op), "`](Self::", stringify!($op), ").")]
            #[inline(always)]
            fn $assign_masked(&mut self, mask: Self::Mask, amount: u32) {
                *self = self.$masked(mask, amount);
            }
        )*
    };
}

/// Folds lanes pairwise as a halving tree: `lane[i] op lane[i + width / 2]`
/// until one lane is left.
///
/// Native reductions follow the same order so results match bit for bit.
#[inline(always)]
pub(crate) fn reduce_tree<T: Copy>(lanes: &mut [T], op: impl Fn(T, T) -> T) -> T {
    let mut width = lanes.len();
    while width > 1 {
        if width % 2 == 1 {
            lanes[0] = op(lanes[0], lanes[width - 1]);
            width -= 1;
        }
        let half = width / 2;
        for i in 0..half {
            lanes[i] = op(lanes[i], lanes[i + half]);
        }
        width = half;
    }
    lanes[0]
}

/// Operations shared by every vector type.
///
/// # Memory contract
///
/// `load`/`store` accept any pointer valid for `LANES` elements. `loada`/`storea`
/// additionally require the pointer to be aligned to [`SimdVector::ALIGNMENT`];
/// violating this is a caller error that is not checked in release builds.
/// In memory a vector is `LANES` contiguous scalars in lane order, on every target.
pub trait SimdVector: Copy + Debug + Default + Send + Sync + 'static {
    /// Lane element type.
    type Scalar: Element;
    /// `[Self::Scalar; LANES]`.
    type Array: Copy + Debug + AsRef<[Self::Scalar]> + AsMut<[Self::Scalar]>;
    /// Per-lane boolean mask.
    type Mask: SimdMask;
    /// Lane index vector used by permutes, gathers and scatters.
    type Swizzle: SimdSwizzle;

    /// Number of lanes.
    const LANES: usize;
    /// Alignment in bytes required by `loada`/`storea`: the full vector width.
    const ALIGNMENT: usize;

    #[inline(always)]
    fn length() -> usize {
        Self::LANES
    }

    #[inline(always)]
    fn alignment() -> usize {
        Self::ALIGNMENT
    }

    /// Returns `true` if `ptr` satisfies the `loada`/`storea` alignment.
    #[inline(always)]
    fn is_aligned(ptr: *const Self::Scalar) -> bool {
        (ptr as usize) % Self::ALIGNMENT == 0
    }

    // ----- construction -----

    /// All lanes zero.
    #[inline(always)]
    fn zero() -> Self {
        Self::splat(<Self::Scalar as Element>::ZERO)
    }

    /// Replicates `value` into every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Builds a vector from `LANES` scalars in lane order.
    fn from_array(lanes: Self::Array) -> Self;

    /// Copies the lanes out in lane order.
    fn to_array(self) -> Self::Array;

    /// Loads the first `LANES` elements of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `slice` holds fewer than `LANES` elements.
    #[inline(always)]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        assert!(
            slice.len() >= Self::LANES,
            "slice holds {} elements, {} required",
            slice.len(),
            Self::LANES
        );
        // SAFETY: the slice is valid for at least LANES reads
        unsafe { Self::load(slice.as_ptr()) }
    }

    /// Checked form of [`SimdVector::from_slice`].
    #[inline(always)]
    fn try_from_slice(slice: &[Self::Scalar]) -> Result<Self> {
        if slice.len() < Self::LANES {
            return Err(length_mismatch(Self::LANES, slice.len()));
        }
        // SAFETY: the slice is valid for at least LANES reads
        Ok(unsafe { Self::load(slice.as_ptr()) })
    }

    /// Stores the lanes into the first `LANES` elements of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `slice` holds fewer than `LANES` elements.
    #[inline(always)]
    fn write_to_slice(self, slice: &mut [Self::Scalar]) {
        assert!(
            slice.len() >= Self::LANES,
            "slice holds {} elements, {} required",
            slice.len(),
            Self::LANES
        );
        // SAFETY: the slice is valid for at least LANES writes
        unsafe { self.store(slice.as_mut_ptr()) }
    }

    // ----- memory -----

    /// Loads `LANES` elements from `ptr`, no alignment assumed.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` elements.
    unsafe fn load(ptr: *const Self::Scalar) -> Self;

    /// Loads `LANES` elements from an aligned `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` elements and aligned to `ALIGNMENT`.
    unsafe fn loada(ptr: *const Self::Scalar) -> Self;

    /// Stores all lanes to `ptr`, no alignment assumed.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` elements.
    unsafe fn store(self, ptr: *mut Self::Scalar);

    /// Stores all lanes to an aligned `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` elements and aligned to `ALIGNMENT`.
    unsafe fn storea(self, ptr: *mut Self::Scalar);

    /// Loads the selected lanes from `ptr`; unselected lanes keep `self` and
    /// their memory is not read.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reading for every selected lane `i`.
    unsafe fn load_masked(self, mask: Self::Mask, ptr: *const Self::Scalar) -> Self;

    /// Aligned form of [`SimdVector::load_masked`].
    ///
    /// # Safety
    ///
    /// As for `load_masked`, and `ptr` must be aligned to `ALIGNMENT`.
    #[inline(always)]
    unsafe fn loada_masked(self, mask: Self::Mask, ptr: *const Self::Scalar) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        self.load_masked(mask, ptr)
    }

    /// In-place [`SimdVector::load_masked`].
    ///
    /// # Safety
    ///
    /// As for `load_masked`.
    #[inline(always)]
    unsafe fn load_assign_masked(&mut self, mask: Self::Mask, ptr: *const Self::Scalar) {
        *self = self.load_masked(mask, ptr);
    }

    /// Stores the selected lanes to `ptr`; memory of unselected lanes is
    /// neither read nor written.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writing for every selected lane `i`.
    unsafe fn store_masked(self, mask: Self::Mask, ptr: *mut Self::Scalar);

    /// Aligned form of [`SimdVector::store_masked`].
    ///
    /// # Safety
    ///
    /// As for `store_masked`, and `ptr` must be aligned to `ALIGNMENT`.
    #[inline(always)]
    unsafe fn storea_masked(self, mask: Self::Mask, ptr: *mut Self::Scalar) {
        debug_assert!(Self::is_aligned(ptr), "pointer is not {} byte aligned", Self::ALIGNMENT);
        self.store_masked(mask, ptr)
    }

    // ----- lanes -----

    /// Reads lane `lane % LANES`.
    #[inline(always)]
    fn extract(self, lane: usize) -> Self::Scalar {
        self.to_array().as_ref()[lane % Self::LANES]
    }

    /// Returns a copy with lane `lane % LANES` replaced by `value`.
    #[inline(always)]
    fn insert(self, lane: usize, value: Self::Scalar) -> Self {
        let mut lanes = self.to_array();
        lanes.as_mut()[lane % Self::LANES] = value;
        Self::from_array(lanes)
    }

    /// In-place [`SimdVector::insert`].
    #[inline(always)]
    fn insert_assign(&mut self, lane: usize, value: Self::Scalar) {
        *self = self.insert(lane, value);
    }

    /// Lane `i` is `if_true[i]` where the mask is set, `if_false[i]` elsewhere.
    fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self;

    /// Keeps `self` in the selected lanes and takes `other` elsewhere.
    #[inline(always)]
    fn blend(self, mask: Self::Mask, other: Self) -> Self {
        Self::select(mask, self, other)
    }

    /// Lane `i` of the result is lane `swizzle[i] % LANES` of `self`.
    #[inline(always)]
    fn permute(self, swizzle: Self::Swizzle) -> Self {
        let source = self.to_array();
        let mut lanes = source;
        let indices = swizzle.as_slice();
        for (i, lane) in lanes.as_mut().iter_mut().enumerate() {
            *lane = source.as_ref()[indices[i] as usize % Self::LANES];
        }
        Self::from_array(lanes)
    }

    /// Masked [`SimdVector::permute`]; unselected lanes keep `self`.
    #[inline(always)]
    fn permute_masked(self, mask: Self::Mask, swizzle: Self::Swizzle) -> Self {
        Self::select(mask, self.permute(swizzle), self)
    }

    // ----- gather / scatter -----

    /// Lane `i` reads `*base.add(indices[i])`.
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reading for every lane.
    #[inline(always)]
    unsafe fn gather(base: *const Self::Scalar, indices: Self::Swizzle) -> Self {
        Self::zero().gather_masked(<Self::Mask as SimdMask>::splat(true), base, indices)
    }

    /// Gathers the selected lanes; unselected lanes keep `self` and read nothing.
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reading for every selected lane.
    #[inline(always)]
    unsafe fn gather_masked(
        self,
        mask: Self::Mask,
        base: *const Self::Scalar,
        indices: Self::Swizzle,
    ) -> Self {
        let offsets = indices.as_slice();
        let mut lanes = self.to_array();
        for (i, lane) in lanes.as_mut().iter_mut().enumerate() {
            if mask.test(i) {
                *lane = base.add(offsets[i] as usize).read();
            }
        }
        Self::from_array(lanes)
    }

    /// [`SimdVector::gather`] addressed by an in-memory index array.
    ///
    /// # Safety
    ///
    /// As for `gather`. Panics if `indices` holds fewer than `LANES` values.
    #[inline(always)]
    unsafe fn gather_from(base: *const Self::Scalar, indices: &[u32]) -> Self {
        Self::gather(base, Self::Swizzle::from_slice(indices))
    }

    /// [`SimdVector::gather_masked`] addressed by an in-memory index array.
    ///
    /// # Safety
    ///
    /// As for `gather_masked`. Panics if `indices` holds fewer than `LANES` values.
    #[inline(always)]
    unsafe fn gather_from_masked(
        self,
        mask: Self::Mask,
        base: *const Self::Scalar,
        indices: &[u32],
    ) -> Self {
        self.gather_masked(mask, base, Self::Swizzle::from_slice(indices))
    }

    /// Lane `i` is written to `*base.add(indices[i])`, in lane order.
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writing for every lane.
    #[inline(always)]
    unsafe fn scatter(self, base: *mut Self::Scalar, indices: Self::Swizzle) {
        self.scatter_masked(<Self::Mask as SimdMask>::splat(true), base, indices)
    }

    /// Scatters the selected lanes; nothing is written for unselected lanes.
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writing for every selected lane.
    #[inline(always)]
    unsafe fn scatter_masked(self, mask: Self::Mask, base: *mut Self::Scalar, indices: Self::Swizzle) {
        let offsets = indices.as_slice();
        let lanes = self.to_array();
        for (i, lane) in lanes.as_ref().iter().enumerate() {
            if mask.test(i) {
                base.add(offsets[i] as usize).write(*lane);
            }
        }
    }

    /// [`SimdVector::scatter`] addressed by an in-memory index array.
    ///
    /// # Safety
    ///
    /// As for `scatter`. Panics if `indices` holds fewer than `LANES` values.
    #[inline(always)]
    unsafe fn scatter_to(self, base: *mut Self::Scalar, indices: &[u32]) {
        self.scatter(base, Self::Swizzle::from_slice(indices))
    }

    /// [`SimdVector::scatter_masked`] addressed by an in-memory index array.
    ///
    /// # Safety
    ///
    /// As for `scatter_masked`. Panics if `indices` holds fewer than `LANES` values.
    #[inline(always)]
    unsafe fn scatter_to_masked(self, mask: Self::Mask, base: *mut Self::Scalar, indices: &[u32]) {
        self.scatter_masked(mask, base, Self::Swizzle::from_slice(indices))
    }

    // ----- arithmetic -----

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    /// Float lanes follow IEEE-754; integer division by zero yields 0.
    fn div(self, rhs: Self) -> Self;
    fn neg(self) -> Self;
    fn abs(self) -> Self;
    /// Lane-wise minimum; a NaN in `rhs` yields `self`, ties yield `rhs`.
    fn min(self, rhs: Self) -> Self;
    /// Lane-wise maximum; a NaN in `rhs` yields `self`, ties yield `rhs`.
    fn max(self, rhs: Self) -> Self;

    /// `self * a + b`, with a single rounding for floats.
    fn mul_add(self, a: Self, b: Self) -> Self;

    /// `self * a - b`, with a single rounding for floats.
    #[inline(always)]
    fn mul_sub(self, a: Self, b: Self) -> Self {
        self.mul_add(a, b.neg())
    }

    /// `(self + a) * b`
    #[inline(always)]
    fn add_mul(self, a: Self, b: Self) -> Self {
        self.add(a).mul(b)
    }

    /// `(self - a) * b`
    #[inline(always)]
    fn sub_mul(self, a: Self, b: Self) -> Self {
        self.sub(a).mul(b)
    }

    binary_forms! {
        add => add_masked, add_assign, add_assign_masked;
        sub => sub_masked, sub_assign, sub_assign_masked;
        mul => mul_masked, mul_assign, mul_assign_masked;
        div => div_masked, div_assign, div_assign_masked;
        min => min_masked, min_assign, min_assign_masked;
        max => max_masked, max_assign, max_assign_masked;
    }

    unary_forms! {
        neg => neg_masked, neg_assign, neg_assign_masked;
        abs => abs_masked, abs_assign, abs_assign_masked;
    }

    ternary_forms! {
        mul_add => mul_add_masked, mul_add_assign, mul_add_assign_masked;
        mul_sub => mul_sub_masked, mul_sub_assign, mul_sub_assign_masked;
        add_mul => add_mul_masked, add_mul_assign, add_mul_assign_masked;
        sub_mul => sub_mul_masked, sub_mul_assign, sub_mul_assign_masked;
    }

    // ----- comparisons -----

    fn cmp_eq(self, rhs: Self) -> Self::Mask;

    /// Negation of `cmp_eq`, so NaN lanes compare not-equal.
    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self::Mask {
        self.cmp_eq(rhs).not()
    }

    fn cmp_gt(self, rhs: Self) -> Self::Mask;
    fn cmp_lt(self, rhs: Self) -> Self::Mask;
    fn cmp_ge(self, rhs: Self) -> Self::Mask;
    fn cmp_le(self, rhs: Self) -> Self::Mask;

    /// `true` if every lane compares equal.
    #[inline(always)]
    fn is_equal(self, rhs: Self) -> bool {
        self.cmp_eq(rhs).all()
    }

    // ----- reductions -----

    /// Sum of all lanes, folded as a halving tree.
    #[inline(always)]
    fn hadd(self) -> Self::Scalar {
        let mut lanes = self.to_array();
        reduce_tree(lanes.as_mut(), Element::lane_add)
    }

    /// Product of all lanes, folded as a halving tree.
    #[inline(always)]
    fn hmul(self) -> Self::Scalar {
        let mut lanes = self.to_array();
        reduce_tree(lanes.as_mut(), Element::lane_mul)
    }

    /// Maximum lane.
    #[inline(always)]
    fn hmax(self) -> Self::Scalar {
        let mut lanes = self.to_array();
        reduce_tree(lanes.as_mut(), Element::lane_max)
    }

    /// Minimum lane.
    #[inline(always)]
    fn hmin(self) -> Self::Scalar {
        let mut lanes = self.to_array();
        reduce_tree(lanes.as_mut(), Element::lane_min)
    }

    /// Sum of the selected lanes; unselected lanes count as 0.
    #[inline(always)]
    fn hadd_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::ZERO)).hadd()
    }

    /// Product of the selected lanes; unselected lanes count as 1.
    #[inline(always)]
    fn hmul_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::ONE)).hmul()
    }

    /// Maximum of the selected lanes; unselected lanes count as `-inf` (`MIN`).
    #[inline(always)]
    fn hmax_masked(self, mask: Self::Mask) -> Self::Scalar {
        let fill = Self::splat(<Self::Scalar as Element>::REDUCE_MAX_IDENTITY);
        Self::select(mask, self, fill).hmax()
    }

    /// Minimum of the selected lanes; unselected lanes count as `+inf` (`MAX`).
    #[inline(always)]
    fn hmin_masked(self, mask: Self::Mask) -> Self::Scalar {
        let fill = Self::splat(<Self::Scalar as Element>::REDUCE_MIN_IDENTITY);
        Self::select(mask, self, fill).hmin()
    }
}

/// Floating-point vectors.
///
/// The transcendental family (`exp`, `log`, `log2`, `log10`, `sin`, `cos`)
/// is provided by the emulation layer; a specialization with a native
/// instruction overrides only the operations it has.
pub trait SimdFloat: SimdVector<Scalar: FloatElement> {
    /// Signed integer vector with the same lane count and bit width.
    type Int: SimdInt<Mask = Self::Mask, Swizzle = Self::Swizzle>;
    /// Unsigned integer vector with the same lane count and bit width.
    type UInt: SimdInt<Mask = Self::Mask, Swizzle = Self::Swizzle>;

    /// `1 / self`, computed as an exact IEEE division.
    #[inline(always)]
    fn recip(self) -> Self {
        Self::splat(<Self::Scalar as Element>::ONE).div(self)
    }

    fn sqrt(self) -> Self;

    /// Round to nearest integer, ties to even.
    fn round(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;

    /// Truncates toward zero. Out-of-range lanes saturate to `MIN`/`MAX`,
    /// NaN lanes become 0.
    fn to_int(self) -> Self::Int;

    /// Truncates toward zero. Lanes above the range saturate to `MAX`,
    /// negative and NaN lanes become 0.
    fn to_uint(self) -> Self::UInt;

    /// Rounds to nearest (ties to even), then converts like [`SimdFloat::to_int`].
    #[inline(always)]
    fn round_to_int(self) -> Self::Int {
        self.round().to_int()
    }

    /// Converts each lane to the nearest representable float.
    fn from_int(value: Self::Int) -> Self;

    /// Converts each lane to the nearest representable float.
    fn from_uint(value: Self::UInt) -> Self;

    /// Reinterprets the IEEE-754 bit patterns.
    fn to_bits(self) -> Self::UInt;

    /// Reinterprets bit patterns as IEEE-754 floats.
    fn from_bits(bits: Self::UInt) -> Self;

    #[inline(always)]
    fn is_nan(self) -> Self::Mask {
        self.cmp_ne(self)
    }

    #[inline(always)]
    fn is_infinite(self) -> Self::Mask {
        self.abs()
            .cmp_eq(Self::splat(<Self::Scalar as Float>::infinity()))
    }

    /// Neither infinite nor NaN.
    #[inline(always)]
    fn is_finite(self) -> Self::Mask {
        self.abs()
            .cmp_lt(Self::splat(<Self::Scalar as Float>::infinity()))
    }

    /// Lanes whose sign bit is set, including `-0.0` and negative NaNs.
    #[inline(always)]
    fn is_sign_negative(self) -> Self::Mask {
        let sign = <Self::UInt as SimdVector>::splat(IntElement::from_u64_wrapping(
            <Self::Scalar as FloatElement>::SIGN_MASK,
        ));
        self.to_bits()
            .and(sign)
            .cmp_ne(<Self::UInt as SimdVector>::zero())
    }

    /// Magnitude of `self` with the sign of `sign`.
    #[inline(always)]
    fn copysign(self, sign: Self) -> Self {
        let sign_bit = <Self::UInt as SimdVector>::splat(IntElement::from_u64_wrapping(
            <Self::Scalar as FloatElement>::SIGN_MASK,
        ));
        let magnitude = self.to_bits().and_not(sign_bit);
        Self::from_bits(magnitude.or(sign.to_bits().and(sign_bit)))
    }

    /// `e^x`, at most 2 ULP from the scalar reference.
    #[inline(always)]
    fn exp(self) -> Self {
        emulation::exp(self)
    }

    /// Natural logarithm, at most 2 ULP from the scalar reference.
    #[inline(always)]
    fn log(self) -> Self {
        emulation::log(self)
    }

    /// Base-2 logarithm, exact at powers of two.
    #[inline(always)]
    fn log2(self) -> Self {
        emulation::log2(self)
    }

    #[inline(always)]
    fn log10(self) -> Self {
        emulation::log10(self)
    }

    #[inline(always)]
    fn sin(self) -> Self {
        emulation::sin(self)
    }

    #[inline(always)]
    fn cos(self) -> Self {
        emulation::cos(self)
    }

    /// `(sin(self), cos(self))` sharing one argument reduction.
    #[inline(always)]
    fn sin_cos(self) -> (Self, Self) {
        emulation::sin_cos(self)
    }

    unary_forms! {
        recip => recip_masked, recip_assign, recip_assign_masked;
        sqrt => sqrt_masked, sqrt_assign, sqrt_assign_masked;
        round => round_masked, round_assign, round_assign_masked;
        floor => floor_masked, floor_assign, floor_assign_masked;
        ceil => ceil_masked, ceil_assign, ceil_assign_masked;
        trunc => trunc_masked, trunc_assign, trunc_assign_masked;
        exp => exp_masked, exp_assign, exp_assign_masked;
        log => log_masked, log_assign, log_assign_masked;
        log2 => log2_masked, log2_assign, log2_assign_masked;
        log10 => log10_masked, log10_assign, log10_assign_masked;
        sin => sin_masked, sin_assign, sin_assign_masked;
        cos => cos_masked, cos_assign, cos_assign_masked;
    }
}

/// Integer vectors.
///
/// Shift amounts are read as unsigned values: shifting by `BITS` or more
/// yields zero, rotates take the amount modulo `BITS`, and `shr` is always
/// a logical shift regardless of signedness.
pub trait SimdInt: SimdVector<Scalar: IntElement> {
    /// Signed sibling with the same lane count and bit width.
    type Signed: SimdInt<Mask = Self::Mask, Swizzle = Self::Swizzle>;
    /// Unsigned sibling with the same lane count and bit width.
    type Unsigned: SimdInt<Mask = Self::Mask, Swizzle = Self::Swizzle>;

    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;

    /// `self & !rhs`
    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        self.and(rhs.not())
    }

    /// Shifts lane `i` left by `rhs[i]`.
    fn shl(self, rhs: Self) -> Self;

    /// Logical right shift of lane `i` by `rhs[i]`.
    fn shr(self, rhs: Self) -> Self;

    /// Rotates lane `i` left by `rhs[i] % BITS`.
    #[inline(always)]
    fn rotl(self, rhs: Self) -> Self {
        let bits = <Self::Scalar as IntElement>::BITS as u64;
        let amount = rhs.and(Self::splat(IntElement::from_u64_wrapping(bits - 1)));
        let complement = Self::splat(IntElement::from_u64_wrapping(bits)).sub(amount);
        self.shl(amount).or(self.shr(complement))
    }

    /// Rotates lane `i` right by `rhs[i] % BITS`.
    #[inline(always)]
    fn rotr(self, rhs: Self) -> Self {
        let bits = <Self::Scalar as IntElement>::BITS as u64;
        let amount = rhs.and(Self::splat(IntElement::from_u64_wrapping(bits - 1)));
        let complement = Self::splat(IntElement::from_u64_wrapping(bits)).sub(amount);
        self.shr(amount).or(self.shl(complement))
    }

    fn shl_scalar(self, amount: u32) -> Self;
    fn shr_scalar(self, amount: u32) -> Self;

    #[inline(always)]
    fn rotl_scalar(self, amount: u32) -> Self {
        let bits = <Self::Scalar as IntElement>::BITS;
        let amount = amount % bits;
        self.shl_scalar(amount).or(self.shr_scalar(bits - amount))
    }

    #[inline(always)]
    fn rotr_scalar(self, amount: u32) -> Self {
        let bits = <Self::Scalar as IntElement>::BITS;
        let amount = amount % bits;
        self.shr_scalar(amount).or(self.shl_scalar(bits - amount))
    }

    /// Reinterprets the lanes as signed, bit pattern preserved.
    fn to_signed(self) -> Self::Signed;

    /// Reinterprets the lanes as unsigned, bit pattern preserved.
    fn to_unsigned(self) -> Self::Unsigned;

    binary_forms! {
        and => and_masked, and_assign, and_assign_masked;
        or => or_masked, or_assign, or_assign_masked;
        xor => xor_masked, xor_assign, xor_assign_masked;
        and_not => and_not_masked, and_not_assign, and_not_assign_masked;
        shl => shl_masked, shl_assign, shl_assign_masked;
        shr => shr_masked, shr_assign, shr_assign_masked;
        rotl => rotl_masked, rotl_assign, rotl_assign_masked;
        rotr => rotr_masked, rotr_assign, rotr_assign_masked;
    }

    unary_forms! {
        not => not_masked, not_assign, not_assign_masked;
    }

    scalar_amount_forms! {
        shl_scalar => shl_scalar_masked, shl_scalar_assign, shl_scalar_assign_masked;
        shr_scalar => shr_scalar_masked, shr_scalar_assign, shr_scalar_assign_masked;
        rotl_scalar => rotl_scalar_masked, rotl_scalar_assign, rotl_scalar_assign_masked;
        rotr_scalar => rotr_scalar_masked, rotr_scalar_assign, rotr_scalar_assign_masked;
    }
}

/// Vectors that split into two half-width vectors of the same element type.
pub trait SimdPack: SimdVector {
    type Half: SimdVector<Scalar = Self::Scalar>;

    /// `lo` fills lanes `0..LANES / 2`, `hi` fills the rest.
    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        let mut lanes = Self::zero().to_array();
        let (low, high) = lanes.as_mut().split_at_mut(<Self::Half as SimdVector>::LANES);
        low.copy_from_slice(lo.to_array().as_ref());
        high.copy_from_slice(hi.to_array().as_ref());
        Self::from_array(lanes)
    }

    /// Inverse of [`SimdPack::pack`].
    #[inline(always)]
    fn unpack(self) -> (Self::Half, Self::Half) {
        let lanes = self.to_array();
        let (low, high) = lanes.as_ref().split_at(<Self::Half as SimdVector>::LANES);
        (
            <Self::Half as SimdVector>::from_slice(low),
            <Self::Half as SimdVector>::from_slice(high),
        )
    }

    #[inline(always)]
    fn low(self) -> Self::Half {
        self.unpack().0
    }

    #[inline(always)]
    fn high(self) -> Self::Half {
        self.unpack().1
    }
}

/// Lane-count-preserving conversion to the next wider element type.
pub trait SimdPromote: SimdVector {
    type Wide: SimdVector<Mask = Self::Mask>;

    /// Widens every lane exactly (floats), by sign extension (signed) or by
    /// zero extension (unsigned).
    fn promote(self) -> Self::Wide;
}

/// Lane-count-preserving conversion to the next narrower element type.
pub trait SimdDegrade: SimdVector {
    type Narrow: SimdVector<Mask = Self::Mask>;

    /// Narrows every lane: floats round to nearest even (overflowing to
    /// infinity), integers keep their low bits.
    fn degrade(self) -> Self::Narrow;
}

/// Splat and literal construction from another scalar type, promoted to the
/// lane type.
///
/// The admissible sources are exactly the scalar types with a lossless
/// `From` conversion into `Self::Scalar`: `f64` lanes accept `f32`, `i32`,
/// `u32` and narrower integers, `f32` lanes accept 8- and 16-bit integers,
/// and so on. Anything that could round or truncate needs an explicit cast.
pub trait SimdFromScalar<S: Copy>: SimdVector {
    /// Replicates `value`, promoted, into every lane.
    fn splat_from(value: S) -> Self;

    /// Builds a vector from the first `LANES` elements of `values`,
    /// promoting each one.
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than `LANES` elements.
    fn from_scalars(values: &[S]) -> Self;
}

impl<V, S> SimdFromScalar<S> for V
where
    V: SimdVector,
    V::Scalar: From<S>,
    S: Copy,
{
    #[inline(always)]
    fn splat_from(value: S) -> Self {
        V::splat(value.into())
    }

    #[inline(always)]
    fn from_scalars(values: &[S]) -> Self {
        assert!(
            values.len() >= V::LANES,
            "slice holds {} elements, {} required",
            values.len(),
            V::LANES
        );
        let mut lanes = V::zero().to_array();
        for (lane, &value) in lanes.as_mut().iter_mut().zip(values) {
            *lane = value.into();
        }
        V::from_array(lanes)
    }
}
