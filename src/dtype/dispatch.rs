//! Runtime dtype dispatch to monomorphized code
//!
//! The `dispatch_dtype!` macro converts a runtime [`DType`](super::DType)
//! value into a concrete Rust type binding, executing a code block with an
//! identifier bound to that type. The copy engine nests two invocations
//! (source dtype, then destination dtype) to reach the fully typed kernel
//! for any of the 13 x 13 dtype pairs.
//!
//! # Usage
//!
//! ```ignore
//! dispatch_dtype!(dtype, T => {
//!     // T is now a concrete type (f32, Bool, Complex64, ...)
//!     std::mem::size_of::<T>()
//! })
//! ```
//!
//! The match is exhaustive over the closed dtype set and has no error arm:
//! every dtype maps to a type, and the block's value is the macro's value.

/// Macro for runtime dtype dispatch to typed code
///
/// Takes a `DType` value and executes `$body` with `$T` bound to the
/// corresponding Rust element type.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::Bool => {
                type $T = $crate::dtype::Bool;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::F16 => {
                type $T = $crate::dtype::f16;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::BF16 => {
                type $T = $crate::dtype::bf16;
                $body
            }
            $crate::dtype::DType::Complex64 => {
                type $T = $crate::dtype::Complex64;
                $body
            }
        }
    };
}
