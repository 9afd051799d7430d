//! Fixed-point significand helpers: round-to-nearest-even and sticky shifts.
//!
//! Arithmetic produces significands that are wider than the 24 bits an `Fp32`
//! can hold. The functions in here reduce them, keeping track of whether any
//! 1-bits were lost along the way.

/// Number of extra low-order bits the addition path carries below the 23
/// fraction bits of its operands (guard, round and sticky bit).
pub const GUARD_BITS: u32 = 3;

/// Discards the `shift` least significant bits of `value`, rounding to
/// nearest with ties to even.
///
/// Returns the reduced value and whether any non-zero bits were discarded
/// (ie. whether the result is inexact).
///
/// The discarded bits are compared against the halfway point `2^(shift-1)`:
/// below it the value is truncated, above it it is incremented, and on an
/// exact tie it is incremented only if that makes the lowest retained bit 0.
///
/// Note that the increment may carry out of the intended width: reducing
/// `0x1ff_ffff` by one bit yields `0x100_0000`, which has one more significant
/// bit than a 24-bit significand. Callers must check for this.
pub fn round_to_nearest_even(value: u64, shift: u32) -> (u64, bool) {
    if shift == 0 {
        return (value, false);
    }
    if shift > 64 {
        // Even the halfway point is above every possible `value`.
        return (0, value != 0);
    }

    // `shift` may be 64, so work in 128 bits.
    let wide = u128::from(value);
    let mask = (1u128 << shift) - 1;
    let halfway = 1u128 << (shift - 1);
    let remainder = wide & mask;
    let truncated = wide >> shift;

    let rounded = if remainder > halfway || (remainder == halfway && truncated & 1 == 1) {
        truncated + 1
    } else {
        truncated
    };

    (rounded as u64, remainder != 0)
}

/// Shifts `sig` right by `shift` bits, ORing every 1-bit that is shifted out
/// into the least significant bit of the result ("sticky" bit).
///
/// This keeps enough information around for `round_to_nearest_even` to tell
/// an exact tie from a value slightly above it.
pub fn shift_right_sticky(sig: u64, shift: u32) -> u64 {
    if shift == 0 {
        sig
    } else if shift >= 64 {
        (sig != 0) as u64
    } else {
        let shifted = sig >> shift;
        let sticky = sig & ((1 << shift) - 1) != 0;
        shifted | sticky as u64
    }
}
