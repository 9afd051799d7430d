//! Provides a decomposed representation of finite (non-NaN, non-Inf)
//! floating-point numbers, and the normalization routine that turns a wide,
//! unrounded result back into an `Fp32`.

use significand::round_to_nearest_even;
use {Exceptions, FloatResult, Fp32};

use std::fmt;

/// A normal or subnormal `Fp32` decomposed into its components (may be zero).
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Decomposed {
    pub sign: bool,
    /// Unbiased exponent. Zero and subnormals use the minimum exponent -126.
    exponent: i32,
    /// The significand, with the implicit integer bit restored for normal
    /// numbers. The low 23 bits are the fractional part.
    significand: u64,
}

impl Decomposed {
    /// Creates a new `Decomposed` float, representing a finite number.
    ///
    /// The number represented is:
    ///
    /// ```notrust
    /// (-sign) * significand * 2^(exponent - 23)
    /// ```
    pub fn new(sign: bool, exponent: i32, significand: u64) -> Self {
        Self {
            sign,
            exponent,
            significand,
        }
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn significand(&self) -> u64 {
        self.significand
    }

    /// Returns `true` if `self` encodes exactly `0.0` or `-0.0`.
    pub fn is_zero(&self) -> bool {
        self.significand == 0
    }

    /// Shifts the significand of a subnormal number left until its integer bit
    /// (bit #23) is set, lowering the exponent to compensate.
    ///
    /// Normal numbers and zero are returned unchanged. The result may have an
    /// exponent below -126, which no `Fp32` can encode, but it is only used as
    /// an intermediate operand.
    pub fn normalize_subnormal(&self) -> Self {
        if self.significand == 0 || self.significand & u64::from(Fp32::HIDDEN_BIT) != 0 {
            return *self;
        }

        let shift = self.significand.leading_zeros() - (63 - Fp32::MANTISSA_BITS);
        Self {
            sign: self.sign,
            exponent: self.exponent - shift as i32,
            significand: self.significand << shift,
        }
    }
}

impl fmt::Debug for Decomposed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign {
            write!(f, "-")?;
        }

        let int_part = self.significand >> Fp32::MANTISSA_BITS;
        let frac_part = self.significand & u64::from(Fp32::MANTISSA_MASK);
        let frac = format!("{:023b}", frac_part);
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };
        write!(f, "{:#b}.{}*2^{}", int_part, frac, self.exponent)
    }
}

impl Fp32 {
    /// Decomposes a finite `Fp32` into sign, unbiased exponent and
    /// significand.
    ///
    /// Returns `None` for infinities and NaNs.
    pub(crate) fn decompose(&self) -> Option<Decomposed> {
        if !self.is_finite() {
            return None;
        }

        let mut significand = u64::from(self.mantissa());
        if self.is_normal() {
            significand |= u64::from(Fp32::HIDDEN_BIT);
        }

        Some(Decomposed::new(self.sign(), self.unbiased_exponent(), significand))
    }
}

/// The range a biased exponent falls into after normalization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ExponentRange {
    /// Too large for any finite value.
    Overflow,
    /// Below the normal range: the result is subnormal or zero.
    Subnormal,
    /// A normal number can be encoded.
    Normal,
}

impl ExponentRange {
    fn of(biased_exponent: i32) -> Self {
        if biased_exponent >= Fp32::MAX_EXPONENT {
            ExponentRange::Overflow
        } else if biased_exponent <= 0 {
            ExponentRange::Subnormal
        } else {
            ExponentRange::Normal
        }
    }
}

/// Rounds and packs an arbitrary-width result into an `Fp32`.
///
/// The value represented by the arguments is:
///
/// ```notrust
/// (-sign) * significand * 2^(exponent - 127 - 23)
/// ```
///
/// That is, `exponent` is a biased exponent that is correct if the leading
/// 1-bit of `significand` is bit #23. Arithmetic operations offset it to
/// account for wherever their result's binary point ended up.
///
/// This is the only place where results get rounded: it moves the leading bit
/// to bit #23, then either overflows to infinity, denormalizes into the
/// subnormal range (possibly all the way to zero), or rounds to a normal
/// number.
pub fn normalize(sign: bool, exponent: i32, significand: u64) -> FloatResult<Fp32> {
    if significand == 0 {
        return FloatResult::exact(Fp32::zero(sign));
    }

    let leading_bit = 63 - significand.leading_zeros() as i32;
    let shift = leading_bit - Fp32::MANTISSA_BITS as i32;
    let exponent = exponent + shift;
    trace!(
        "normalize: sign={} significand={:#x} leading_bit={} shift={} exp={} ({:?})",
        sign, significand, leading_bit, shift, exponent, ExponentRange::of(exponent)
    );

    match ExponentRange::of(exponent) {
        ExponentRange::Overflow => overflow(sign),
        ExponentRange::Subnormal => {
            // The subnormal scale is fixed at 2^-126, so shift the significand
            // right by the normalization shift plus the distance of the
            // exponent from 1.
            let denormalize = (1 - exponent) + shift;
            if denormalize > 64 {
                // Less than half of the smallest subnormal.
                return FloatResult::new(
                    Fp32::zero(sign),
                    Exceptions::UNDERFLOW | Exceptions::INEXACT,
                );
            }

            let (mantissa, inexact) = shift_and_round(significand, denormalize);
            let exceptions = if inexact {
                Exceptions::UNDERFLOW | Exceptions::INEXACT
            } else {
                Exceptions::empty()
            };

            let result = if mantissa >= u64::from(Fp32::HIDDEN_BIT) {
                // Rounded up to the smallest normal number.
                Fp32::pack(sign, 1, 0)
            } else {
                Fp32::pack(sign, 0, mantissa as u32)
            };
            trace!("normalize: subnormal {:?} inexact={}", result, inexact);
            FloatResult::new(result, exceptions)
        }
        ExponentRange::Normal => {
            let (rounded, inexact) = shift_and_round(significand, shift);

            // Rounding up might carry into bit #24 (`1.111..1` -> `10.000..0`).
            let (exponent, rounded) = if rounded >> (Fp32::MANTISSA_BITS + 1) != 0 {
                (exponent + 1, rounded >> 1)
            } else {
                (exponent, rounded)
            };
            if exponent >= Fp32::MAX_EXPONENT {
                return overflow(sign);
            }

            let result = Fp32::pack(sign, exponent as u32, rounded as u32 & Fp32::MANTISSA_MASK);
            trace!("normalize: normal {:?} inexact={}", result, inexact);
            let exceptions = if inexact { Exceptions::INEXACT } else { Exceptions::empty() };
            FloatResult::new(result, exceptions)
        }
    }
}

/// Shifts `significand` right by `shift` bits with rounding, or left without
/// losing anything if `shift` is negative.
fn shift_and_round(significand: u64, shift: i32) -> (u64, bool) {
    if shift < 0 {
        (significand << -shift, false)
    } else {
        round_to_nearest_even(significand, shift as u32)
    }
}

fn overflow(sign: bool) -> FloatResult<Fp32> {
    trace!("normalize: overflow to {}infinity", if sign { "-" } else { "+" });
    FloatResult::new(Fp32::infinity(sign), Exceptions::OVERFLOW | Exceptions::INEXACT)
}
