//! Software emulation of IEEE-754 single precision (`binary32`) arithmetic.
//!
//! Every operation in this crate works on the raw 32-bit encoding of a float
//! using integer arithmetic only. The host FPU is never consulted for `+`,
//! `-`, `*` or `/`; it is only used to convert from and to native floats and to
//! compute square roots.
//!
//! Only round-to-nearest-even is implemented. Results are bit-identical to
//! what a conforming IEEE-754 implementation produces, except that the only
//! NaN ever generated is the canonical quiet NaN `0x7FC00000`.
//!
//! ```
//! use fp32::Fp32;
//!
//! let sum = Fp32::from(2.5f32) + Fp32::from(1.5f32);
//! assert_eq!(sum.to_bits(), 4.0f32.to_bits());
//!
//! let inf = Fp32::from(1.0f32) / Fp32::zero(false);
//! assert!(inf.is_infinite());
//! ```

#![doc(html_root_url = "https://docs.rs/fp32/0.1.0")]
#![warn(missing_debug_implementations)]

#[macro_use] extern crate bitflags;
#[macro_use] extern crate log;
extern crate ieee754;
extern crate num_bigint;
extern crate num_traits;

mod decomposed;
mod fp32_algo;
mod fp32_fmt;
mod fp32_mod;
mod fp32_ops;
mod significand;
mod sign_mag;

pub use fp32_fmt::{Details, ParseFp32Error};
pub use fp32_mod::*;

use std::cmp::Ordering;

bitflags! {
    /// IEEE-754 exception conditions raised by an operation.
    ///
    /// Exceptions are purely informational: the value returned by an operation
    /// is the same whether or not its exceptions are inspected.
    pub struct Exceptions: u8 {
        /// Invalid operation (`0 * Inf`, `Inf - Inf`, `0 / 0`, `sqrt(-1)`).
        ///
        /// The result of such an operation is the canonical quiet NaN.
        const INVALID     = 1 << 0;
        /// A finite non-zero dividend was divided by zero.
        const DIV_BY_ZERO = 1 << 1;
        /// The rounded result was too large and became an infinity.
        const OVERFLOW    = 1 << 2;
        /// The result is tiny (subnormal or zero) and inexact.
        const UNDERFLOW   = 1 << 3;
        /// The result had to be rounded.
        const INEXACT     = 1 << 4;
    }
}

impl Default for Exceptions {
    fn default() -> Self {
        Exceptions::empty()
    }
}

/// The outcome of comparing two `Fp32` values.
///
/// Unlike `std::cmp::Ordering`, this has a dedicated variant for comparisons
/// involving NaN.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// At least one operand is NaN.
    Unordered,
}

impl Comparison {
    /// Converts `self` to an `Ordering`, returning `None` for `Unordered`.
    pub fn to_ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Less => Some(Ordering::Less),
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Unordered => None,
        }
    }

    pub fn is_unordered(self) -> bool {
        self == Comparison::Unordered
    }
}

impl From<Ordering> for Comparison {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}
