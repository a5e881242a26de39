//! # ndcopy
//!
//! **Strided N-dimensional array copy-and-cast engine.**
//!
//! ndcopy materializes one array view into another: given a source view with
//! arbitrary shape, per-dimension element strides, and base offset, and a
//! destination of possibly different layout and element type, it fills the
//! destination with the element-wise numeric conversion of the corresponding
//! source values - without ever building an intermediate contiguous copy of
//! either side.
//!
//! ## How it works
//!
//! - **Four copy strategies**: [`copy::CopyType`] classifies a request as
//!   `Scalar` (broadcast one element), `Vector` (flat 1:1), `General`
//!   (strided source, contiguous destination), or `GeneralGeneral` (both
//!   sides strided). The classification is decided by the caller; this crate
//!   only executes it.
//! - **Dimension collapsing**: adjacent dimensions that are contiguous in
//!   every participating layout are merged before kernel selection, so a
//!   logically high-rank copy usually runs through a low-rank kernel.
//! - **Rank-specialized kernels**: ranks 1-7 iterate with nested counters
//!   and precomputed stride adjustments instead of per-element offset
//!   arithmetic; higher ranks fall back to a generic index-to-offset walk.
//! - **Compile-time cast matrix**: every ordered pair of the 13 supported
//!   element types resolves to a concrete cast at monomorphization time,
//!   with no per-element branching.
//! - **Buffer donation**: a `Vector` copy from an exclusively owned source
//!   with matching element size transfers the source buffer to the
//!   destination instead of allocating and copying.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use ndcopy::prelude::*;
//!
//! let src = Array::from_slice(&[10i32, 20, 30, 40], &[4])?;
//! let mut dst = Array::empty(&[4], DType::F32);
//! copy(&src, &mut dst, CopyType::Vector);
//! assert_eq!(dst.to_vec::<f32>(), vec![10.0, 20.0, 30.0, 40.0]);
//! ```
//!
//! ## Supported dtypes
//!
//! `bool`, `u8`-`u64`, `i8`-`i64`, `f16`, `bf16`, `f32`, and `c64`
//! (two `f32` components). Cast semantics follow the destination type's
//! native conversion rules; see [`dtype::cast`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocator;
pub mod array;
pub mod copy;
pub mod dtype;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{Array, Flags};
    pub use crate::copy::{CopyType, copy, copy_inplace, copy_inplace_strided};
    pub use crate::dtype::{Bool, CastFrom, Complex64, DType, Element};
    pub use crate::error::{Error, Result};
}
