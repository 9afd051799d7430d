use std::ops::{Add, Neg};
use std::cmp::Ordering;
use std::fmt;

/// An integer represented as sign and magnitude.
///
/// This can represent signed zero and is useful for implementing floating-point
/// operations: adding two significands and ordering two `Fp32` encodings both
/// work on this representation.
#[derive(Copy, Clone)]
pub struct SignMagnitude {
    sign: bool,
    magnitude: u64,
}

impl SignMagnitude {
    pub fn new(sign: bool, magnitude: u64) -> Self {
        Self { sign, magnitude }
    }

    /// Returns the sign of the integer.
    ///
    /// Returns `true` when the represented number is `<=0`, `false` is the
    /// number is `>=0`.
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Returns the magnitude (or absolute value) of the stored number.
    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }
}

/// Compares two `SignMagnitude` values for equality.
///
/// This considers `-0` and `+0` to be equal.
impl PartialEq for SignMagnitude {
    fn eq(&self, other: &Self) -> bool {
        if self.magnitude == 0 && other.magnitude == 0 {
            true
        } else {
            self.sign == other.sign && self.magnitude == other.magnitude
        }
    }
}

impl Eq for SignMagnitude {}

impl PartialOrd for SignMagnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SignMagnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.magnitude == 0 && other.magnitude == 0 {
            return Ordering::Equal;
        }

        match (self.sign, other.sign) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => self.magnitude.cmp(&other.magnitude).reverse(),
            (false, false) => self.magnitude.cmp(&other.magnitude),
        }
    }
}

/// Adds two values, subtracting magnitudes when the signs differ.
///
/// The result takes the sign of the operand with the larger magnitude. When
/// the magnitudes cancel exactly, the sign of `self` is kept.
impl Add for SignMagnitude {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.sign == rhs.sign {
            return Self {
                sign: self.sign,
                magnitude: self.magnitude + rhs.magnitude,
            };
        }

        let (large, small) = if self.magnitude >= rhs.magnitude {
            (self, rhs)
        } else {
            (rhs, self)
        };

        Self {
            sign: large.sign,
            magnitude: large.magnitude - small.magnitude,
        }
    }
}

/// Negation of sign-magnitude integers just has to flip the sign.
impl Neg for SignMagnitude {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            sign: !self.sign,
            magnitude: self.magnitude,
        }
    }
}

impl fmt::Display for SignMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign {
            f.write_str("-")?;
        }

        fmt::Display::fmt(&self.magnitude, f)
    }
}

impl fmt::Debug for SignMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}
