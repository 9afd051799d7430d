//! Implementation of floating point algorithms (arithmetic, comparison).
//!
//! Every operation first handles the special operands (NaN, infinities,
//! zeros) according to its own table, then computes an exact or
//! sticky-truncated wide significand and hands it to `normalize`, which does
//! all of the rounding.
//!
//! Useful resources:
//! * http://pages.cs.wisc.edu/~markhill/cs354/Fall2008/notes/flpt.apprec.html
//! * https://www.cs.cornell.edu/~tomf/notes/cps104/floating.html

use decomposed::{normalize, Decomposed};
use sign_mag::SignMagnitude;
use significand::{shift_right_sticky, GUARD_BITS};
use {Comparison, Exceptions, FloatResult, Fp32};

use std::cmp;

/// Extra quotient bits computed below the 24 significand bits, so that the
/// truncating integer division can be rounded correctly.
const QUOTIENT_GUARD_BITS: u32 = 16;

impl Fp32 {
    /// Adds `rhs` to `self`, reporting the exceptions raised.
    pub fn add_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        trace!("add: {:?} + {:?}", lhs, rhs);

        if lhs.is_nan() || rhs.is_nan() {
            return FloatResult::exact(Fp32::NAN);
        }

        if lhs.is_infinite() {
            if rhs.is_infinite() && lhs.sign() != rhs.sign() {
                // Inf - Inf
                return FloatResult::invalid();
            }
            return FloatResult::exact(lhs);
        }
        if rhs.is_infinite() {
            return FloatResult::exact(rhs);
        }

        match (lhs.is_zero(), rhs.is_zero()) {
            // -0 + -0 is the only way to get -0 out of an addition.
            (true, true) => return FloatResult::exact(Fp32::zero(lhs.sign() && rhs.sign())),
            (true, false) => return FloatResult::exact(rhs),
            (false, true) => return FloatResult::exact(lhs),
            (false, false) => {}
        }

        let (l, r) = (finite(lhs), finite(rhs));
        trace!("add: l={:?} r={:?}", l, r);

        // Align both significands to the larger exponent. Bits shifted out of
        // the smaller one are kept as a sticky bit below the guard bits.
        let exp = cmp::max(l.exponent(), r.exponent());
        let align = |d: Decomposed| {
            let shift = (exp - d.exponent()) as u32;
            let sig = shift_right_sticky(d.significand() << GUARD_BITS, shift);
            SignMagnitude::new(d.sign, sig)
        };
        let sum = align(l) + align(r);
        trace!("add: exp={} sum={:?}", exp, sum);

        if sum.magnitude() == 0 {
            // x + (-x) is +0 when rounding to nearest.
            return FloatResult::exact(Fp32::ZERO);
        }

        normalize(
            sum.sign(),
            exp + Fp32::EXPONENT_BIAS - GUARD_BITS as i32,
            sum.magnitude(),
        )
    }

    /// Subtracts `rhs` from `self`, reporting the exceptions raised.
    ///
    /// This is the same as adding `-rhs`.
    pub fn sub_checked(self, rhs: Self) -> FloatResult<Self> {
        self.add_checked(-rhs)
    }

    /// Multiplies `self` by `rhs`, reporting the exceptions raised.
    pub fn mul_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        let sign = lhs.sign() != rhs.sign();
        trace!("mul: {:?} * {:?}", lhs, rhs);

        if lhs.is_nan() || rhs.is_nan() {
            return FloatResult::exact(Fp32::NAN);
        }

        if lhs.is_infinite() || rhs.is_infinite() {
            if lhs.is_zero() || rhs.is_zero() {
                // 0 * Inf
                return FloatResult::invalid();
            }
            return FloatResult::exact(Fp32::infinity(sign));
        }

        if lhs.is_zero() || rhs.is_zero() {
            return FloatResult::exact(Fp32::zero(sign));
        }

        let (l, r) = (finite(lhs), finite(rhs));

        // Two 24-bit significands give an exact 48-bit product with 46
        // fraction bits, which is 23 more than `normalize` expects.
        let product = l.significand() * r.significand();
        let exp = l.exponent() + r.exponent() + Fp32::EXPONENT_BIAS - Fp32::MANTISSA_BITS as i32;
        trace!("mul: l={:?} r={:?} product={:#x} exp={}", l, r, product, exp);

        normalize(sign, exp, product)
    }

    /// Divides `self` by `rhs`, reporting the exceptions raised.
    pub fn div_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        let sign = lhs.sign() != rhs.sign();
        trace!("div: {:?} / {:?}", lhs, rhs);

        if lhs.is_nan() || rhs.is_nan() {
            return FloatResult::exact(Fp32::NAN);
        }

        if lhs.is_infinite() {
            if rhs.is_infinite() {
                // Inf / Inf
                return FloatResult::invalid();
            }
            return FloatResult::exact(Fp32::infinity(sign));
        }

        if rhs.is_infinite() {
            return FloatResult::exact(Fp32::zero(sign));
        }

        if rhs.is_zero() {
            if lhs.is_zero() {
                // 0 / 0
                return FloatResult::invalid();
            }
            return FloatResult::new(Fp32::infinity(sign), Exceptions::DIV_BY_ZERO);
        }

        if lhs.is_zero() {
            return FloatResult::exact(Fp32::zero(sign));
        }

        // With both integer bits at #23, the quotient of the pre-shifted
        // dividend has at least `QUOTIENT_GUARD_BITS + 23` significant bits.
        let (l, r) = (finite(lhs).normalize_subnormal(), finite(rhs).normalize_subnormal());
        let pre_shift = Fp32::MANTISSA_BITS + QUOTIENT_GUARD_BITS;
        let dividend = l.significand() << pre_shift;
        let divisor = r.significand();

        // Integer division truncates; fold the remainder into a sticky bit.
        let sticky = (dividend % divisor != 0) as u64;
        let quotient = (dividend / divisor) | sticky;
        let exp = l.exponent() - r.exponent() + Fp32::EXPONENT_BIAS
            + Fp32::MANTISSA_BITS as i32 - pre_shift as i32;
        trace!("div: l={:?} r={:?} quotient={:#x} exp={}", l, r, quotient, exp);

        normalize(sign, exp, quotient)
    }

    /// Computes the square root of `self`, reporting the exceptions raised.
    ///
    /// Special operands are handled here; everything else is delegated to the
    /// host's `f32::sqrt`, which IEEE-754 requires to be correctly rounded.
    pub fn sqrt_checked(self) -> FloatResult<Self> {
        trace!("sqrt: {:?}", self);

        if self.is_nan() {
            return FloatResult::exact(Fp32::NAN);
        }
        if self.sign() && !self.is_zero() {
            // includes -Inf
            return FloatResult::invalid();
        }
        if self.is_zero() {
            return FloatResult::exact(self);
        }
        if self.is_infinite() {
            return FloatResult::exact(Fp32::INFINITY);
        }

        let root = self.to_f32().sqrt();
        // The square of an `f32` is exact in `f64`.
        let square = f64::from(root) * f64::from(root);
        let exceptions = if square == self.to_f64() {
            Exceptions::empty()
        } else {
            Exceptions::INEXACT
        };

        FloatResult::new(Fp32::from(root), exceptions)
    }

    /// Computes the square root of `self`.
    ///
    /// Negative numbers (including `-Inf`) yield NaN, `-0.0` yields `-0.0`.
    pub fn sqrt(self) -> Self {
        self.sqrt_checked().into_inner()
    }

    /// Compares `self` with `other`.
    ///
    /// Returns `Comparison::Unordered` if either operand is NaN. `+0.0` and
    /// `-0.0` compare equal.
    pub fn compare(self, other: Self) -> Comparison {
        if self.is_nan() || other.is_nan() {
            return Comparison::Unordered;
        }

        // Exponent and mantissa are stored most significant first, so the
        // encodings order like the magnitudes they represent.
        let magnitude = |f: Fp32| SignMagnitude::new(f.sign(), u64::from(f.abs().to_bits()));
        Comparison::from(magnitude(self).cmp(&magnitude(other)))
    }

    /// Returns `true` if `self` and `other` can't be ordered, because at least
    /// one of them is NaN.
    pub fn is_unordered(self, other: Self) -> bool {
        self.compare(other).is_unordered()
    }
}

/// Decomposes an operand that was already checked to be finite.
fn finite(f: Fp32) -> Decomposed {
    f.decompose().unwrap_or_else(|| unreachable!("{:?} is not finite", f))
}

#[cfg(test)]
mod tests {
    extern crate env_logger;

    use {Comparison, Exceptions, Fp32};

    fn fp(f: f32) -> Fp32 {
        Fp32::from(f)
    }

    /// Checks `op` against the host FPU for the given operands.
    fn check(lhs: f32, rhs: f32, op: fn(Fp32, Fp32) -> Fp32, host: fn(f32, f32) -> f32) {
        env_logger::try_init().ok();

        let expected = host(lhs, rhs);
        let actual = op(fp(lhs), fp(rhs));
        debug!("{:e} op {:e}: expected {:#010X}, got {:?}", lhs, rhs, expected.to_bits(), actual);
        if expected.is_nan() {
            assert!(actual.is_nan(), "{:?}", actual);
        } else {
            assert_eq!(actual.to_bits(), expected.to_bits(), "{:e} vs {:e}", actual.to_f32(), expected);
        }
    }

    fn addition(lhs: f32, rhs: f32) {
        check(lhs, rhs, |a, b| a + b, |a, b| a + b);
    }

    #[test]
    fn add_simple() {
        let two = fp(1.0) + fp(1.0);
        assert_eq!(two.to_bits(), fp(2.0).to_bits());
    }

    /// Takes the normal-number branch of normalization.
    #[test]
    fn add_normal_result() {
        let sum = fp(2.5) + fp(1.5);
        assert_eq!(sum.to_f32(), 4.0);
        assert_eq!(sum.to_bits(), 0x4080_0000);
    }

    #[test]
    fn add_precision_loss() {
        // 2^24 + 1 is a tie between 2^24 and 2^24 + 2, ties to even wins.
        let sum = fp(16_777_216.0).add_checked(fp(1.0));
        assert_eq!(sum.into_inner().to_f32(), 16_777_216.0);
        assert!(!sum.is_exact());

        // Slightly above the tie must round up.
        addition(16_777_216.0, 1.000_000_1);
        assert_eq!((fp(16_777_216.0) + fp(3.0)).to_f32(), 16_777_220.0);
    }

    #[test]
    fn add_opposite_signs() {
        addition(1.0, -0.75);
        addition(-1.0, 0.75);
        addition(1.0, -1.000_000_1);
        addition(1e10, -1.0);
        addition(1.5, -1e-30);
    }

    #[test]
    fn add_cancellation_is_positive_zero() {
        for &v in [1.0f32, -1.0, 3.25e-20, -7e30, 1e-40].iter() {
            let diff = fp(v) - fp(v);
            assert_eq!(diff.to_bits(), 0, "{} - {} = {:?}", v, v, diff);
        }
    }

    #[test]
    fn add_zeros() {
        let (pz, nz) = (Fp32::zero(false), Fp32::zero(true));
        assert_eq!((pz + nz).to_bits(), 0);
        assert_eq!((nz + pz).to_bits(), 0);
        assert_eq!((nz + nz).to_bits(), 0x8000_0000);
        assert_eq!((pz - pz).to_bits(), 0);
        assert_eq!((nz - pz).to_bits(), 0x8000_0000);

        let x = fp(-3.5);
        assert_eq!((x + pz).to_bits(), x.to_bits());
        assert_eq!((nz + x).to_bits(), x.to_bits());
    }

    #[test]
    fn add_denormal() {
        addition(f32::from_bits(1), f32::from_bits(8_388_607));
        addition(f32::from_bits(0x007f_ffff), f32::from_bits(0x007f_ffff));
        addition(f32::from_bits(0x0080_0000), -f32::from_bits(0x0000_0001));
    }

    #[test]
    fn add_smoke() {
        addition(f32::from_bits(1), f32::from_bits(16_777_216));
        addition(f32::from_bits(206_028_801), f32::from_bits(738_197_504));
        addition(f32::from_bits(206_028_801), f32::from_bits(1_400_897_536));
        addition(f32::from_bits(1_358_958_057), f32::from_bits(2_977_955_840));
    }

    #[test]
    fn add_overflow() {
        let sum = Fp32::MAX.add_checked(Fp32::MAX);
        assert!(sum.exceptions().contains(Exceptions::OVERFLOW));
        assert_eq!(sum.into_inner().to_bits(), Fp32::INFINITY.to_bits());
    }

    #[test]
    fn add_special() {
        let (inf, ninf) = (Fp32::INFINITY, Fp32::NEG_INFINITY);
        let r = inf.sub_checked(inf);
        assert!(r.into_inner().is_nan());
        assert!(r.exceptions().contains(Exceptions::INVALID));
        assert!((inf + ninf).is_nan());
        assert_eq!((inf + inf).to_bits(), inf.to_bits());
        assert_eq!((fp(1.0) + ninf).to_bits(), ninf.to_bits());
        assert_eq!((ninf + fp(1e30)).to_bits(), ninf.to_bits());
        assert_eq!((Fp32::NAN + fp(1.0)).to_bits(), Fp32::NAN.to_bits());
        assert!((fp(1.0) + Fp32::from_bits(0xffff_ffff)).is_nan());
    }

    #[test]
    fn mul() {
        let product = fp(2.5) * fp(1.5);
        assert_eq!(product.to_f32(), 3.75);
        check(0.1, 0.2, |a, b| a * b, |a, b| a * b);
        check(-1.1, 1e-3, |a, b| a * b, |a, b| a * b);
        check(3e38, 10.0, |a, b| a * b, |a, b| a * b);
        check(1e-20, 1e-20, |a, b| a * b, |a, b| a * b);
        check(1.5e-39, 3.0, |a, b| a * b, |a, b| a * b);
        check(f32::from_bits(1), 0.5, |a, b| a * b, |a, b| a * b);
        check(f32::from_bits(3), 0.5, |a, b| a * b, |a, b| a * b);
        check(1.0e-38, 0.99999994, |a, b| a * b, |a, b| a * b);
    }

    #[test]
    fn mul_signed_zero() {
        let r = fp(-3.0) * Fp32::zero(false);
        assert_eq!(r.to_bits(), 0x8000_0000);
        let r = fp(-3.0) * Fp32::zero(true);
        assert_eq!(r.to_bits(), 0);
        let r = fp(3.0) * Fp32::zero(true);
        assert_eq!(r.to_bits(), 0x8000_0000);
    }

    #[test]
    fn mul_special() {
        let r = Fp32::zero(true).mul_checked(Fp32::INFINITY);
        assert!(r.into_inner().is_nan());
        assert!(r.exceptions().contains(Exceptions::INVALID));
        assert!((Fp32::INFINITY * Fp32::ZERO).is_nan());
        assert_eq!((Fp32::INFINITY * fp(-2.0)).to_bits(), Fp32::NEG_INFINITY.to_bits());
        assert_eq!((Fp32::NEG_INFINITY * Fp32::NEG_INFINITY).to_bits(), Fp32::INFINITY.to_bits());
        assert!((Fp32::NAN * Fp32::ZERO).is_nan());
    }

    #[test]
    fn mul_underflow() {
        let r = Fp32::MIN_POSITIVE.mul_checked(Fp32::EPSILON);
        assert!(r.is_exact());
        // 2^-126 * 2^-23 = 2^-149
        assert_eq!(r.into_inner().to_bits(), 1);

        let r = Fp32::from_bits(1).mul_checked(fp(0.25));
        assert_eq!(r.into_inner().to_bits(), 0);
        assert!(r.exceptions().contains(Exceptions::UNDERFLOW | Exceptions::INEXACT));
    }

    #[test]
    fn div() {
        assert_eq!((fp(1.0) / fp(4.0)).to_f32(), 0.25);
        let r = fp(1.0).div_checked(fp(3.0));
        assert!(!r.is_exact());
        assert_eq!(r.into_inner().to_f32(), 1.0 / 3.0);

        check(2.5, 1.5, |a, b| a / b, |a, b| a / b);
        check(-7.0, 0.1, |a, b| a / b, |a, b| a / b);
        check(1e38, 1e-5, |a, b| a / b, |a, b| a / b);
        check(1e-38, 1e5, |a, b| a / b, |a, b| a / b);
        check(f32::from_bits(1), 1.5, |a, b| a / b, |a, b| a / b);
        check(1.0, f32::from_bits(0x0000_0100), |a, b| a / b, |a, b| a / b);
        check(f32::from_bits(0x0040_0001), f32::from_bits(0x0000_0003), |a, b| a / b, |a, b| a / b);
        check(16_777_215.0, 16_777_213.0, |a, b| a / b, |a, b| a / b);
    }

    #[test]
    fn div_self_is_one() {
        for &v in [1.0f32, -2.5, 3.1415927, 1e-40, -7e37, 0.1].iter() {
            let q = fp(v) / fp(v);
            assert_eq!(q.to_f32(), 1.0, "{} / {}", v, v);
        }
    }

    #[test]
    fn div_special() {
        let r = fp(1.0).div_checked(Fp32::zero(false));
        assert_eq!(r.into_inner().to_bits(), Fp32::INFINITY.to_bits());
        assert!(r.exceptions().contains(Exceptions::DIV_BY_ZERO));
        assert_eq!((fp(-1.0) / Fp32::zero(false)).to_bits(), Fp32::NEG_INFINITY.to_bits());
        assert_eq!((fp(1.0) / Fp32::zero(true)).to_bits(), Fp32::NEG_INFINITY.to_bits());

        let r = Fp32::zero(false).div_checked(Fp32::zero(false));
        assert!(r.into_inner().is_nan());
        assert!(r.exceptions().contains(Exceptions::INVALID));

        assert!((Fp32::INFINITY / Fp32::NEG_INFINITY).is_nan());
        assert_eq!((Fp32::NEG_INFINITY / fp(2.0)).to_bits(), Fp32::NEG_INFINITY.to_bits());
        assert_eq!((fp(-2.0) / Fp32::INFINITY).to_bits(), 0x8000_0000);
        assert_eq!((Fp32::zero(true) / fp(5.0)).to_bits(), 0x8000_0000);
        assert!((Fp32::NAN / Fp32::ZERO).is_nan());
    }

    #[test]
    fn div_overflow() {
        let r = Fp32::MAX.div_checked(fp(0.5));
        assert_eq!(r.into_inner().to_bits(), Fp32::INFINITY.to_bits());
        assert!(r.exceptions().contains(Exceptions::OVERFLOW));
    }

    #[test]
    fn sqrt() {
        assert_eq!(fp(4.0).sqrt().to_f32(), 2.0);
        assert!(fp(4.0).sqrt_checked().is_exact());
        let r = fp(2.0).sqrt_checked();
        assert!(!r.is_exact());
        assert_eq!(r.into_inner().to_f32(), 2.0f32.sqrt());

        assert_eq!(Fp32::zero(true).sqrt().to_bits(), 0x8000_0000);
        assert_eq!(Fp32::INFINITY.sqrt().to_bits(), Fp32::INFINITY.to_bits());
        assert!(Fp32::NAN.sqrt().is_nan());

        let r = fp(-1.0).sqrt_checked();
        assert!(r.into_inner().is_nan());
        assert!(r.exceptions().contains(Exceptions::INVALID));
        assert!(Fp32::NEG_INFINITY.sqrt().is_nan());
    }

    #[test]
    fn compare() {
        assert_eq!(fp(1.0).compare(fp(2.0)), Comparison::Less);
        assert_eq!(fp(2.0).compare(fp(1.0)), Comparison::Greater);
        assert_eq!(fp(-1.0).compare(fp(-2.0)), Comparison::Greater);
        assert_eq!(fp(-1.0).compare(fp(1e-40)), Comparison::Less);
        assert_eq!(fp(0.0).compare(fp(-0.0)), Comparison::Equal);
        assert_eq!(Fp32::NEG_INFINITY.compare(Fp32::MIN), Comparison::Less);
        assert_eq!(Fp32::INFINITY.compare(Fp32::MAX), Comparison::Greater);
        assert_eq!(fp(3.0).compare(fp(3.0)), Comparison::Equal);
    }

    #[test]
    fn compare_nan() {
        let nan = Fp32::NAN;
        assert_eq!(nan.compare(nan), Comparison::Unordered);
        assert_eq!(nan.compare(fp(1.0)), Comparison::Unordered);
        assert_eq!(fp(1.0).compare(nan), Comparison::Unordered);
        assert!(nan.is_unordered(Fp32::INFINITY));
        assert!(!fp(1.0).is_unordered(fp(2.0)));
    }
}
