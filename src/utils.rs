//! Aligned heap storage for vector data.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{allocation_error, layout_error, Result};
use crate::simd::element::Element;
use crate::simd::traits::SimdVector;

/// An owned, zero-initialised buffer whose first element sits on a chosen
/// byte boundary.
///
/// Use it when aligned loads and stores (`loada`/`storea`) need heap
/// memory: a buffer built with [`AlignedBuffer::for_vector`] satisfies the
/// alignment of the given vector type at every multiple of its lane count.
///
/// ```rust
/// use simdlane::simd::traits::SimdVector;
/// use simdlane::simd::F64x4;
/// use simdlane::utils::AlignedBuffer;
///
/// let mut buffer = AlignedBuffer::<f64>::for_vector::<F64x4>(8).unwrap();
/// unsafe { F64x4::splat(2.5).storea(buffer.as_mut_ptr()) };
/// assert_eq!(&buffer[..5], &[2.5, 2.5, 2.5, 2.5, 0.0]);
/// ```
pub struct AlignedBuffer<T: Element> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<T: Element> AlignedBuffer<T> {
    /// Allocates `len` zeroed elements aligned to `alignment` bytes.
    ///
    /// Fails with [`SimdError::Layout`](crate::error::SimdError::Layout) when
    /// `alignment` is not a power of two, is below the natural alignment of
    /// `T`, or the total size overflows; fails with
    /// [`SimdError::Allocation`](crate::error::SimdError::Allocation) when the
    /// allocator returns null.
    pub fn new(len: usize, alignment: usize) -> Result<Self> {
        if !alignment.is_power_of_two() {
            log::warn!("rejected aligned buffer: alignment {alignment} is not a power of two");
            return Err(layout_error(len, alignment, "alignment must be a power of two"));
        }
        if alignment < mem::align_of::<T>() {
            log::warn!(
                "rejected aligned buffer: alignment {alignment} below natural alignment {}",
                mem::align_of::<T>()
            );
            return Err(layout_error(
                len,
                alignment,
                "alignment is smaller than the element alignment",
            ));
        }

        let size = len.checked_mul(mem::size_of::<T>()).ok_or_else(|| {
            log::warn!("rejected aligned buffer: {len} elements overflow usize");
            layout_error(len, alignment, "buffer size overflows usize")
        })?;

        let layout = Layout::from_size_align(size, alignment).map_err(|err| {
            log::warn!("rejected aligned buffer: {err}");
            layout_error(size, alignment, err.to_string())
        })?;

        if size == 0 {
            // Zero-sized buffers never touch the allocator.
            let ptr = NonNull::new(alignment as *mut T)
                .ok_or_else(|| allocation_error(0, alignment))?;
            return Ok(AlignedBuffer { ptr, len, layout });
        }

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw as *mut T).ok_or_else(|| allocation_error(size, alignment))?;

        log::trace!("allocated aligned buffer: {size} bytes at {alignment} byte alignment");
        Ok(AlignedBuffer { ptr, len, layout })
    }

    /// Allocates `len` elements aligned for aligned loads and stores of `V`.
    pub fn for_vector<V: SimdVector<Scalar = T>>(len: usize) -> Result<Self> {
        Self::new(len, V::ALIGNMENT.max(mem::align_of::<T>()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte alignment of the first element.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T: Element> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            // SAFETY: allocated in `new` with this exact layout
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

impl<T: Element> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `len` zero-initialised elements live at `ptr`; all element
        // types are plain numbers for which zero bytes are a valid value
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: see `Deref`; `&mut self` guarantees exclusive access
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.layout.align())
            .field("data", &self.deref())
            .finish()
    }
}

// SAFETY: the buffer uniquely owns its allocation and element types are Send + Sync
unsafe impl<T: Element> Send for AlignedBuffer<T> {}
unsafe impl<T: Element> Sync for AlignedBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimdError;
    use crate::simd::{F32x8, F64x8};

    #[test]
    fn test_buffer_is_aligned_and_zeroed() {
        for &alignment in &[8usize, 16, 32, 64, 128] {
            let buffer = AlignedBuffer::<f64>::new(13, alignment).unwrap();
            assert_eq!(buffer.as_ptr() as usize % alignment, 0);
            assert_eq!(buffer.len(), 13);
            assert_eq!(buffer.alignment(), alignment);
            assert!(buffer.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_buffer_is_writable() {
        let mut buffer = AlignedBuffer::<u32>::new(4, 16).unwrap();
        buffer.copy_from_slice(&[1, 2, 3, 4]);
        buffer[2] = 30;
        assert_eq!(&*buffer, &[1, 2, 30, 4]);
    }

    #[test]
    fn test_for_vector_uses_vector_alignment() {
        let buffer = AlignedBuffer::<f32>::for_vector::<F32x8>(16).unwrap();
        assert_eq!(buffer.alignment(), 32);
        let buffer = AlignedBuffer::<f64>::for_vector::<F64x8>(8).unwrap();
        assert_eq!(buffer.alignment(), 64);
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedBuffer::<i64>::new(0, 64).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
        assert_eq!(&*buffer, &[] as &[i64]);
    }

    #[test]
    fn test_rejects_bad_alignment() {
        let err = AlignedBuffer::<f32>::new(4, 24).unwrap_err();
        assert!(matches!(err, SimdError::Layout { alignment: 24, .. }));

        let err = AlignedBuffer::<f64>::new(4, 4).unwrap_err();
        assert!(matches!(err, SimdError::Layout { alignment: 4, .. }));
    }

    #[test]
    fn test_rejects_size_overflow() {
        let err = AlignedBuffer::<u64>::new(usize::MAX / 2, 64).unwrap_err();
        assert!(matches!(err, SimdError::Layout { .. }));
    }

    #[test]
    fn test_debug_output() {
        let buffer = AlignedBuffer::<i32>::new(2, 16).unwrap();
        let debug = format!("{buffer:?}");
        assert!(debug.contains("AlignedBuffer"));
        assert!(debug.contains("alignment: 16"));
    }
}
