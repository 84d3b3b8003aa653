//! Portable target.
//!
//! [`Vector`] implements every trait of the contract lane by lane with the
//! scalar reference operations. It is selected for every vector type when
//! no native specialization exists, and it is always compiled so native
//! targets can be checked against it.

mod float;
mod int;
mod vector;

pub use vector::Vector;

pub type F32x4 = Vector<f32, 4>;
pub type F32x8 = Vector<f32, 8>;
pub type F64x2 = Vector<f64, 2>;
pub type F64x4 = Vector<f64, 4>;
pub type F64x8 = Vector<f64, 8>;

pub type I32x4 = Vector<i32, 4>;
pub type I32x8 = Vector<i32, 8>;
pub type U32x4 = Vector<u32, 4>;
pub type U32x8 = Vector<u32, 8>;
pub type I64x2 = Vector<i64, 2>;
pub type I64x4 = Vector<i64, 4>;
pub type I64x8 = Vector<i64, 8>;
pub type U64x2 = Vector<u64, 2>;
pub type U64x4 = Vector<u64, 4>;
pub type U64x8 = Vector<u64, 8>;
