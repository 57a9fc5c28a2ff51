use std::fmt::{self, Debug};
use std::ops::{Add, Mul, Sub};

use half::f16;
use num_traits::{WrappingAdd, WrappingMul, WrappingSub, Zero};

/// Element types a matrix can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 16-bit floating point (IEEE 754 half-precision, via the `half` crate).
    F16,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl DType {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F16 => 2,
            DType::I32 | DType::F32 => 4,
            DType::I64 | DType::F64 => 8,
        }
    }

    /// Relative tolerance used when comparing results of different algorithms.
    ///
    /// Zero for integer types: their results must match exactly.
    pub fn default_tolerance(&self) -> f64 {
        match self {
            DType::I32 | DType::I64 => 0.0,
            DType::F16 => 1e-2,
            DType::F32 => 1e-4,
            DType::F64 => 1e-9,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::I32 => write!(f, "i32"),
            DType::I64 => write!(f, "i64"),
            DType::F16 => write!(f, "f16"),
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
        }
    }
}

/// An arithmetic matrix element.
///
/// Unsigned integers are not elements: Strassen's scratch operands include
/// differences such as `B12 - B22`, which go negative.
pub trait Element:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    const DTYPE: DType;

    /// Converts a small non-negative integer, as produced by random fill.
    fn from_u32(v: u32) -> Self;

    /// Compares two values. Integers compare exactly; floats use `tolerance`
    /// as a relative epsilon (also applied as an absolute floor near zero).
    fn approx_eq(self, other: Self, tolerance: f64) -> bool;

    /// Addition that wraps for integers instead of overflowing.
    ///
    /// Strassen's operand sums can leave the integer range even when the final
    /// product fits; modular arithmetic still lands on the exact result.
    fn wrapping_add(self, other: Self) -> Self;

    /// Subtraction that wraps for integers instead of overflowing.
    fn wrapping_sub(self, other: Self) -> Self;

    /// Multiplication that wraps for integers instead of overflowing.
    fn wrapping_mul(self, other: Self) -> Self;
}

macro_rules! float_arithmetic {
    () => {
        fn wrapping_add(self, other: Self) -> Self {
            self + other
        }

        fn wrapping_sub(self, other: Self) -> Self {
            self - other
        }

        fn wrapping_mul(self, other: Self) -> Self {
            self * other
        }
    };
}

macro_rules! impl_int_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            fn from_u32(v: u32) -> Self {
                v as $ty
            }

            fn approx_eq(self, other: Self, _tolerance: f64) -> bool {
                self == other
            }

            fn wrapping_add(self, other: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &other)
            }

            fn wrapping_sub(self, other: Self) -> Self {
                WrappingSub::wrapping_sub(&self, &other)
            }

            fn wrapping_mul(self, other: Self) -> Self {
                WrappingMul::wrapping_mul(&self, &other)
            }
        }
    };
}

impl_int_element!(i32, DType::I32);
impl_int_element!(i64, DType::I64);

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn from_u32(v: u32) -> Self {
        v as f32
    }

    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        let eps = tolerance as f32;
        approx::relative_eq!(self, other, epsilon = eps, max_relative = eps)
    }

    float_arithmetic!();
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    fn from_u32(v: u32) -> Self {
        v as f64
    }

    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        approx::relative_eq!(self, other, epsilon = tolerance, max_relative = tolerance)
    }

    float_arithmetic!();
}

impl Element for f16 {
    const DTYPE: DType = DType::F16;

    fn from_u32(v: u32) -> Self {
        f16::from_f32(v as f32)
    }

    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        let eps = tolerance as f32;
        approx::relative_eq!(
            self.to_f32(),
            other.to_f32(),
            epsilon = eps,
            max_relative = eps
        )
    }

    float_arithmetic!();
}
