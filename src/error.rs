//! Error types for simdlane operations.
//!
//! The vector layer itself never fails: domain errors travel as data
//! (NaN, infinities, wrapped integers) through ordinary return values.
//! The types here cover the checked surface around it, such as building a
//! vector from a slice or allocating an aligned buffer.

use thiserror::Error;

/// Errors that can occur on the checked simdlane surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimdError {
    /// A slice was too short to fill a vector, or two slices that must match did not.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// The number of elements the operation needed.
        expected: usize,
        /// The number of elements it was given.
        actual: usize,
    },
    /// Invalid layout parameters were provided.
    #[error("invalid memory layout: {message} (size: {size}, alignment: {alignment})")]
    Layout {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Memory allocation failed.
    #[error("memory allocation failed (requested {size} bytes with {alignment} byte alignment)")]
    Allocation {
        /// The size that was requested to be allocated.
        size: usize,
        /// The alignment that was requested.
        alignment: usize,
    },
}

/// Result type alias for simdlane operations.
pub type Result<T> = std::result::Result<T, SimdError>;

/// Creates a length mismatch error.
pub fn length_mismatch(expected: usize, actual: usize) -> SimdError {
    SimdError::LengthMismatch { expected, actual }
}

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> SimdError {
    SimdError::Layout {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize) -> SimdError {
    SimdError::Allocation { size, alignment }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(8, 3);
        let display = error.to_string();
        assert!(display.contains("length mismatch"));
        assert!(display.contains("expected 8"));
        assert!(display.contains("got 3"));
    }

    #[test]
    fn test_layout_error_display() {
        let error = layout_error(1000, 31, "alignment must be power of two");
        let display = error.to_string();
        assert!(display.contains("invalid memory layout"));
        assert!(display.contains("size: 1000"));
        assert!(display.contains("alignment: 31"));
        assert!(display.contains("alignment must be power of two"));
    }

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1024, 64);
        let display = error.to_string();
        assert!(display.contains("memory allocation failed"));
        assert!(display.contains("1024 bytes"));
        assert!(display.contains("64 byte alignment"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(length_mismatch(4, 2), length_mismatch(4, 2));
        assert_ne!(length_mismatch(4, 2), length_mismatch(4, 1));
        assert_ne!(allocation_error(16, 16), layout_error(16, 16, ""));
    }

    #[test]
    fn test_error_trait_object() {
        let error: Box<dyn std::error::Error> = Box::new(allocation_error(8, 8));
        assert!(error.source().is_none());
        assert!(error.to_string().contains("8 bytes"));
    }
}
