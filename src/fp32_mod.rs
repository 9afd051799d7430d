use ieee754::Ieee754;
use std::fmt;

use Exceptions;

/// An IEEE-754 single precision floating point number.
///
/// This stores the raw 32-bit encoding:
///
/// ```notrust
/// +------+----------+----------+
/// |  31  |  30-23   |   22-0   |
/// | sign | exponent | mantissa |
/// +------+----------+----------+
/// ```
///
/// Values are immutable, every operation creates a new `Fp32`.
#[repr(transparent)]
#[derive(Copy, Clone, Default)]
pub struct Fp32(pub(crate) u32);

impl Fp32 {
    pub const ZERO: Self         = Fp32(0x0000_0000);
    pub const NEG_ZERO: Self     = Fp32(0x8000_0000);
    pub const ONE: Self          = Fp32(0x3f80_0000);
    pub const INFINITY: Self     = Fp32(0x7f80_0000);
    pub const NEG_INFINITY: Self = Fp32(0xff80_0000);

    /// Not a Number (`NaN`).
    ///
    /// This is the only NaN produced by arithmetic in this crate: a quiet NaN
    /// (most significant mantissa bit set) with an empty payload and the sign
    /// bit clear.
    pub const NAN: Self          = Fp32(0x7fc0_0000);

    /// Machine epsilon, `2^-23`: the gap between `1.0` and the next larger
    /// value.
    pub const EPSILON: Self      = Fp32(0x3400_0000);
    /// Smallest positive normal value, `2^-126`.
    pub const MIN_POSITIVE: Self = Fp32(0x0080_0000);
    /// Largest finite value.
    pub const MAX: Self          = Fp32(0x7f7f_ffff);
    /// Smallest finite value (`-MAX`).
    pub const MIN: Self          = Fp32(0xff7f_ffff);

    pub(crate) const SIGN_MASK: u32     = 0x8000_0000;
    pub(crate) const EXPONENT_MASK: u32 = 0x7f80_0000;
    pub(crate) const MANTISSA_MASK: u32 = 0x007f_ffff;
    /// Implicit integer bit of normal numbers, just above the mantissa.
    pub(crate) const HIDDEN_BIT: u32    = 1 << 23;

    pub(crate) const MANTISSA_BITS: u32 = 23;
    pub(crate) const EXPONENT_BIAS: i32 = 127;
    /// Biased exponent reserved for infinities and NaNs.
    pub(crate) const MAX_EXPONENT: i32  = 0xff;

    /// Creates an `Fp32` from its raw bit pattern.
    ///
    /// Every `u32` is a valid encoding.
    pub const fn from_bits(bits: u32) -> Self {
        Fp32(bits)
    }

    /// Returns the raw bit pattern of `self`.
    pub fn to_bits(&self) -> u32 {
        self.0
    }

    /// Returns a zero with the given sign.
    pub fn zero(negative: bool) -> Self {
        if negative { Self::NEG_ZERO } else { Self::ZERO }
    }

    /// Returns an infinity with the given sign.
    pub fn infinity(negative: bool) -> Self {
        if negative { Self::NEG_INFINITY } else { Self::INFINITY }
    }

    /// Returns the canonical quiet NaN (`0x7FC00000`).
    pub fn nan() -> Self {
        Self::NAN
    }

    /// Returns machine epsilon (`2^-23`).
    pub fn epsilon() -> Self {
        Self::EPSILON
    }

    /// Assembles an `Fp32` from sign, biased exponent and mantissa fields.
    ///
    /// Excess bits in `exponent` and `mantissa` are masked off.
    pub(crate) fn pack(sign: bool, exponent: u32, mantissa: u32) -> Self {
        let sign = if sign { Self::SIGN_MASK } else { 0 };
        let exponent = (exponent << Self::MANTISSA_BITS) & Self::EXPONENT_MASK;
        Fp32(sign | exponent | (mantissa & Self::MANTISSA_MASK))
    }

    /// Converts an `f32` to an `Fp32`. This is a bit-exact reinterpretation.
    pub fn from_f32(f: f32) -> Self {
        let (sign, exponent, mantissa) = f.decompose_raw();
        Self::pack(sign, u32::from(exponent), mantissa)
    }

    /// Converts an `f64` to an `Fp32` by first narrowing it to `f32`.
    ///
    /// The narrowing is done by the host and rounds to nearest; values too
    /// large for `f32` become infinities.
    pub fn from_f64(f: f64) -> Self {
        Self::from_f32(f as f32)
    }

    /// Returns the native `f32` with the same bit pattern.
    pub fn to_f32(&self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Converts `self` to an `f64`. This is lossless.
    pub fn to_f64(&self) -> f64 {
        f64::from(self.to_f32())
    }

    /// Returns the value of the sign bit.
    pub fn sign(&self) -> bool {
        self.0 & Self::SIGN_MASK != 0
    }

    /// The raw biased 8-bit exponent field.
    pub fn exponent(&self) -> u8 {
        ((self.0 & Self::EXPONENT_MASK) >> Self::MANTISSA_BITS) as u8
    }

    /// The 23-bit mantissa field (without the implicit integer bit).
    pub fn mantissa(&self) -> u32 {
        self.0 & Self::MANTISSA_MASK
    }

    pub fn biased_exponent(&self) -> i32 {
        i32::from(self.exponent())
    }

    /// Returns the "real" (unbiased) exponent.
    ///
    /// Zero and subnormal numbers report the minimum exponent of `-126`, which
    /// is the scale their mantissa is interpreted at.
    pub fn unbiased_exponent(&self) -> i32 {
        match self.exponent() {
            0 => 1 - Self::EXPONENT_BIAS,
            exp => i32::from(exp) - Self::EXPONENT_BIAS,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 & !Self::SIGN_MASK == 0
    }

    pub fn is_subnormal(&self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    pub fn is_normal(&self) -> bool {
        match self.exponent() {
            0 | 0xff => false,
            _ => true,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.exponent() == 0xff && self.mantissa() == 0
    }

    pub fn is_nan(&self) -> bool {
        self.exponent() == 0xff && self.mantissa() != 0
    }

    pub fn is_finite(&self) -> bool {
        !(self.is_infinite() || self.is_nan())
    }

    pub fn is_negative(&self) -> bool {
        self.sign()
    }

    /// Returns `self` with the sign bit cleared.
    pub fn abs(&self) -> Self {
        Fp32(self.0 & !Self::SIGN_MASK)
    }

    /// Classifies `self`, returning the kind of floating-point number its bit
    /// pattern encodes along with the decoded fields.
    pub fn classify(&self) -> Classified {
        let sign = self.sign();
        let mantissa = self.mantissa();

        match (self.exponent(), mantissa) {
            (0, 0) => Classified::Zero { sign },
            (0, _) => Classified::Subnormal { sign, mantissa },
            (0xff, 0) => Classified::Infinite { sign },
            (0xff, _) => Classified::NaN { sign, payload: mantissa },
            (_, _) => Classified::Normal {
                sign,
                exponent: self.unbiased_exponent() as i16,
                mantissa,
            },
        }
    }
}

impl fmt::Debug for Fp32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

impl From<f32> for Fp32 {
    fn from(f: f32) -> Self {
        Self::from_f32(f)
    }
}

impl From<f64> for Fp32 {
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

impl From<i32> for Fp32 {
    fn from(v: i32) -> Self {
        Self::from_f32(v as f32)
    }
}

impl From<Fp32> for f32 {
    fn from(f: Fp32) -> Self {
        f.to_f32()
    }
}

impl From<Fp32> for f64 {
    fn from(f: Fp32) -> Self {
        f.to_f64()
    }
}

/// The result of a floating-point operation, along with the IEEE-754
/// exceptions it raised.
#[must_use = "the result of the operation is contained in the `FloatResult`"]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatResult<T> {
    value: T,
    exceptions: Exceptions,
}

impl<T> FloatResult<T> {
    pub fn new(value: T, exceptions: Exceptions) -> Self {
        Self { value, exceptions }
    }

    /// Creates a result that raised no exceptions.
    pub fn exact(value: T) -> Self {
        Self::new(value, Exceptions::empty())
    }

    /// The exceptions raised while computing the value.
    pub fn exceptions(&self) -> Exceptions {
        self.exceptions
    }

    /// Returns `true` if the value was not rounded.
    pub fn is_exact(&self) -> bool {
        !self.exceptions.contains(Exceptions::INEXACT)
    }

    /// Extract the (possibly rounded) result, discarding the exceptions.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug> FloatResult<T> {
    /// Returns the exact result, panicking if it was rounded.
    pub fn unwrap_exact(self) -> T {
        if self.is_exact() {
            self.value
        } else {
            panic!("called `unwrap_exact` on a rounded result {:?}", self);
        }
    }
}

impl FloatResult<Fp32> {
    /// The result of an invalid operation: NaN with the `INVALID` flag.
    pub(crate) fn invalid() -> Self {
        Self::new(Fp32::NAN, Exceptions::INVALID)
    }
}

/// An `Fp32` separated by the kind of value it represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classified {
    /// All-zero exponent and mantissa.
    Zero {
        sign: bool,
    },
    /// All-zero exponent, non-zero mantissa.
    ///
    /// The value is `s * 0.m * 2^(-126)` (there is no implicit integer bit).
    Subnormal {
        sign: bool,
        mantissa: u32,
    },
    /// Any exponent other than all-zeros and all-ones.
    ///
    /// The value is `s * 1.m * 2^exponent`.
    Normal {
        sign: bool,
        /// The unbiased exponent, in `-126..=127`.
        exponent: i16,
        mantissa: u32,
    },
    /// All-one exponent, zero mantissa.
    Infinite {
        sign: bool,
    },
    /// All-one exponent, non-zero mantissa.
    ///
    /// No distinction is made between quiet and signaling NaNs; the payload is
    /// the whole 23-bit mantissa.
    NaN {
        sign: bool,
        payload: u32,
    },
}

impl Classified {
    /// Converts this classified representation back into an equivalent
    /// `Fp32`.
    pub fn pack(&self) -> Fp32 {
        match *self {
            Classified::Zero { sign } => Fp32::pack(sign, 0, 0),
            Classified::Subnormal { sign, mantissa } => Fp32::pack(sign, 0, mantissa),
            Classified::Normal { sign, exponent, mantissa } => {
                let biased = i32::from(exponent) + Fp32::EXPONENT_BIAS;
                Fp32::pack(sign, biased as u32, mantissa)
            }
            Classified::Infinite { sign } => Fp32::pack(sign, 0xff, 0),
            Classified::NaN { sign, payload } => Fp32::pack(sign, 0xff, payload),
        }
    }

    pub fn sign(&self) -> bool {
        match *self {
            Classified::Zero { sign }
            | Classified::Subnormal { sign, .. }
            | Classified::Normal { sign, .. }
            | Classified::Infinite { sign }
            | Classified::NaN { sign, .. } => sign,
        }
    }
}
