//! Lane index vectors for permutes, gathers and scatters.

use std::fmt::Debug;

/// `N` unsigned lane indices laid out as a contiguous `u32` array.
///
/// As a permutation, index `i` names the source lane for destination lane
/// `i` and is taken modulo `N`. As a gather or scatter address, index `i`
/// is an element offset from the base pointer and is not range checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Swizzle<const N: usize> {
    indices: [u32; N],
}

impl<const N: usize> Swizzle<N> {
    #[inline(always)]
    pub const fn new(indices: [u32; N]) -> Self {
        Self { indices }
    }

    /// `[0, 1, .., N - 1]`
    pub fn identity() -> Self {
        Self::new(std::array::from_fn(|i| i as u32))
    }

    /// `[N - 1, .., 1, 0]`
    pub fn reverse() -> Self {
        Self::new(std::array::from_fn(|i| (N - 1 - i) as u32))
    }

    /// Destination lane `i` reads source lane `(i + amount) % N`.
    pub fn rotate_left(amount: usize) -> Self {
        Self::new(std::array::from_fn(|i| ((i + amount) % N) as u32))
    }

    /// Every destination lane reads source lane `lane`.
    pub fn broadcast(lane: u32) -> Self {
        Self::new([lane; N])
    }

    /// `[0, 0, 1, 1, ..]`: duplicates the low half lane by lane.
    pub fn interleave_low() -> Self {
        Self::new(std::array::from_fn(|i| (i / 2) as u32))
    }

    /// `[N/2, N/2, N/2 + 1, N/2 + 1, ..]`: duplicates the high half lane by lane.
    pub fn interleave_high() -> Self {
        Self::new(std::array::from_fn(|i| (N / 2 + i / 2) as u32))
    }

    /// Index stored for lane `lane % N`.
    #[inline(always)]
    pub fn get(&self, lane: usize) -> u32 {
        self.indices[lane % N]
    }

    #[inline(always)]
    pub fn indices(&self) -> &[u32; N] {
        &self.indices
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }
}

impl<const N: usize> Default for Swizzle<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> From<[u32; N]> for Swizzle<N> {
    fn from(indices: [u32; N]) -> Self {
        Self::new(indices)
    }
}

/// Index-vector surface visible to code that is generic over vector types.
pub trait SimdSwizzle: Copy + Debug + Send + Sync + 'static {
    const LANES: usize;

    /// Reads the first `LANES` indices of `indices`.
    ///
    /// # Panics
    ///
    /// Panics if `indices` holds fewer than `LANES` values.
    fn from_slice(indices: &[u32]) -> Self;

    fn as_slice(&self) -> &[u32];
}

impl<const N: usize> SimdSwizzle for Swizzle<N> {
    const LANES: usize = N;

    #[inline(always)]
    fn from_slice(indices: &[u32]) -> Self {
        assert!(
            indices.len() >= N,
            "index array holds {} lanes, {} required",
            indices.len(),
            N
        );
        Self::new(std::array::from_fn(|i| indices[i]))
    }

    #[inline(always)]
    fn as_slice(&self) -> &[u32] {
        &self.indices
    }
}
