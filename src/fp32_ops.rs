//! Operator trait implementations for `Fp32`.
//!
//! `std::ops` behaves like all exceptions are masked: the operators return the
//! same value as the corresponding `*_checked` method and drop the flags.

use num_traits::{Bounded, One, Zero};
use {Comparison, Fp32};

use std::cmp::Ordering;
use std::ops;

impl ops::Neg for Fp32 {
    type Output = Fp32;

    /// Flips the sign bit. This works on every encoding, including zeros and
    /// NaNs.
    fn neg(self) -> Fp32 {
        Fp32(self.0 ^ Fp32::SIGN_MASK)
    }
}

impl<'a> ops::Neg for &'a Fp32 {
    type Output = Fp32;

    fn neg(self) -> Fp32 {
        -(*self)
    }
}

macro_rules! binop {
    ($imp:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl ops::$imp for Fp32 {
            type Output = Fp32;

            fn $method(self, rhs: Fp32) -> Fp32 {
                self.$checked(rhs).into_inner()
            }
        }

        impl<'a> ops::$imp<&'a Fp32> for Fp32 {
            type Output = Fp32;

            fn $method(self, rhs: &'a Fp32) -> Fp32 {
                self.$checked(*rhs).into_inner()
            }
        }

        impl ops::$assign_trait for Fp32 {
            fn $assign_method(&mut self, rhs: Fp32) {
                *self = self.$checked(rhs).into_inner();
            }
        }
    };
}

binop!(Add, add, AddAssign, add_assign, add_checked);
binop!(Sub, sub, SubAssign, sub_assign, sub_checked);
binop!(Mul, mul, MulAssign, mul_assign, mul_checked);
binop!(Div, div, DivAssign, div_assign, div_checked);

/// IEEE equality: NaN is not equal to anything (including itself) and both
/// zeros are equal.
impl PartialEq for Fp32 {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Comparison::Equal
    }
}

impl PartialOrd for Fp32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other).to_ordering()
    }
}

impl Zero for Fp32 {
    fn zero() -> Self {
        Fp32::ZERO
    }

    fn is_zero(&self) -> bool {
        Fp32::is_zero(self)
    }
}

impl One for Fp32 {
    fn one() -> Self {
        Fp32::ONE
    }
}

impl Bounded for Fp32 {
    fn min_value() -> Self {
        Fp32::MIN
    }

    fn max_value() -> Self {
        Fp32::MAX
    }
}
