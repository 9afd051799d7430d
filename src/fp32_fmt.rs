//! Text conversions: bit-level renderings, decimal printing and parsing.

use num_bigint::BigUint;
use num_traits::pow;
use {Classified, Fp32};

use std::error::Error;
use std::num::ParseFloatError;
use std::str::FromStr;
use std::fmt;

/// Significant digits printed by `Display`. 9 digits are enough to
/// distinguish every pair of binary32 values.
const DISPLAY_DIGITS: usize = 9;

impl Fp32 {
    /// Renders the encoding as binary, with the sign, exponent and mantissa
    /// fields separated by spaces.
    ///
    /// ```
    /// # use fp32::Fp32;
    /// assert_eq!(Fp32::ONE.to_binary(), "0 01111111 00000000000000000000000");
    /// ```
    pub fn to_binary(&self) -> String {
        let bits = format!("{:032b}", self.0);
        format!("{} {} {}", &bits[..1], &bits[1..9], &bits[9..])
    }

    /// Renders the encoding as `0x` followed by 8 uppercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{:08X}", self.0)
    }

    /// Returns the exact decimal value of `self`.
    ///
    /// Every finite binary32 value is a dyadic rational and thus has a finite
    /// decimal expansion. Infinities and NaNs are printed like `Display` does.
    ///
    /// ```
    /// # use fp32::Fp32;
    /// let tenth = Fp32::from(0.1f32);
    /// assert_eq!(tenth.to_exact_decimal(), "0.100000001490116119384765625");
    /// ```
    pub fn to_exact_decimal(&self) -> String {
        let (significand, scale) = match self.classify() {
            Classified::Infinite { .. } | Classified::NaN { .. } => return self.to_string(),
            Classified::Zero { sign } => return if sign { "-0" } else { "0" }.to_string(),
            Classified::Subnormal { mantissa, .. } => {
                (mantissa, 1 - Fp32::EXPONENT_BIAS - Fp32::MANTISSA_BITS as i32)
            }
            Classified::Normal { exponent, mantissa, .. } => {
                (mantissa | Fp32::HIDDEN_BIT, i32::from(exponent) - Fp32::MANTISSA_BITS as i32)
            }
        };

        let sign = if self.sign() { "-" } else { "" };
        let significand = BigUint::from(significand);
        if scale >= 0 {
            return format!("{}{}", sign, significand << scale as usize);
        }

        // sig * 2^-k == sig * 5^k / 10^k
        let k = (-scale) as usize;
        let mut digits = (significand * pow(BigUint::from(5u32), k)).to_string();
        if digits.len() <= k {
            let zeros = k + 1 - digits.len();
            digits.insert_str(0, &"0".repeat(zeros));
        }
        let (int, frac) = digits.split_at(digits.len() - k);
        let frac = frac.trim_end_matches('0');

        if frac.is_empty() {
            format!("{}{}", sign, int)
        } else {
            format!("{}{}.{}", sign, int, frac)
        }
    }

    /// Returns a `Details` value which prints every component of `self`.
    pub fn details(&self) -> Details {
        Details(*self)
    }

    /// Returns the sign, exponent, mantissa and type of `self`, one per line.
    pub fn components_string(&self) -> String {
        Components(*self).to_string()
    }
}

/// Drops trailing zeros (and a then-trailing dot) of a fixed-point number.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats `value` like C's `%.<digits>g`.
fn format_general(value: f64, digits: usize) -> String {
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.find('e') {
        Some(pos) => (&sci[..pos], sci[pos + 1..].parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exp < -4 || exp >= digits as i32 {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), exp_sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Prints the value with 9 significant digits, in the shortest of fixed and
/// scientific notation (like C's `%.9g`).
impl fmt::Display for Fp32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.classify() {
            Classified::NaN { .. } => f.write_str("nan"),
            Classified::Infinite { sign: false } => f.write_str("inf"),
            Classified::Infinite { sign: true } => f.write_str("-inf"),
            Classified::Zero { sign: false } => f.write_str("0"),
            Classified::Zero { sign: true } => f.write_str("-0"),
            _ => f.write_str(&format_general(self.to_f64(), DISPLAY_DIGITS)),
        }
    }
}

struct Components(Fp32);

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fp = self.0;
        writeln!(f, "Sign: {}", fp.sign() as u8)?;
        writeln!(f, "Exponent (biased): {} (0x{:X})", fp.exponent(), fp.exponent())?;
        writeln!(f, "Exponent (unbiased): {}", fp.unbiased_exponent())?;
        writeln!(f, "Mantissa: 0x{:06X}", fp.mantissa())?;

        match fp.classify() {
            Classified::Normal { .. } => {
                writeln!(f, "Type: Normal")?;
                writeln!(f, "Implicit bit: 1")
            }
            Classified::Subnormal { .. } => {
                writeln!(f, "Type: Subnormal")?;
                writeln!(f, "Implicit bit: 0")
            }
            Classified::Zero { .. } => writeln!(f, "Type: Zero"),
            Classified::Infinite { .. } => writeln!(f, "Type: Infinity"),
            Classified::NaN { .. } => writeln!(f, "Type: NaN"),
        }
    }
}

/// Every component of an `Fp32`, as returned by `Fp32::details`.
///
/// The `Display` implementation prints one component per line.
#[derive(Debug, Copy, Clone)]
pub struct Details(Fp32);

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Binary: {}", self.0.to_binary())?;
        writeln!(f, "Hex: {}", self.0.to_hex())?;
        write!(f, "{}", Components(self.0))?;
        writeln!(f, "Decimal value: {}", self.0)?;
        writeln!(f, "Exact value: {}", self.0.to_exact_decimal())
    }
}

/// An error returned when parsing an `Fp32` from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFp32Error(ParseFloatError);

impl fmt::Display for ParseFp32Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to parse single precision float: {}", self.0)
    }
}

impl Error for ParseFp32Error {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Parses a decimal float literal (as accepted by `f32::from_str`), ignoring
/// surrounding whitespace.
///
/// The literal is rounded to the nearest binary32 value by the host.
impl FromStr for Fp32 {
    type Err = ParseFp32Error;

    fn from_str(s: &str) -> Result<Self, ParseFp32Error> {
        s.trim().parse::<f32>().map(Fp32::from).map_err(ParseFp32Error)
    }
}
