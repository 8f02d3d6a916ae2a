//! Bit-exact numeric renderings of binary floating-point values.
//!
//! Every finite binary float equals `s * M * 2^E` for an integer mantissa `M`
//! (implicit leading bit included) and binary exponent `E`. Since
//! `2^-n = 5^n / 10^n`, the value always has a finite decimal expansion:
//!
//! - for `E >= 0` the digits are those of `M << E` with no fractional part;
//! - for `E < 0` the digits are those of `M * 5^-E` with the decimal point
//!   `-E` places from the right.
//!
//! The digit string is then normalized to scientific form `d.ddd…E±eee`.
//! The arithmetic runs on [`BigUint`], so the expansion is exact over the
//! whole finite range, subnormals included; only infinities and NaN are
//! special-cased.
//!
//! The module also renders the two bit-level views: the IEEE field layout
//! (`sign|exponent|mantissa` in binary) and the C-style hex-power literal
//! (`0x1.<hex mantissa>p±<power of two>`).
//!
//! ## Examples
//!
//! ```rust
//! use reprs::exact::expand_f32;
//!
//! // The nearest f32 to 3.14, expanded exactly.
//! assert_eq!(expand_f32(3.14), "3.1400001049041748046875E+000");
//! ```

use num_bigint::BigUint;

/// The decomposed fields of a binary float, width-agnostic.
struct FloatParts {
    negative: bool,
    exp_field: u64,
    frac: u64,
    mantissa_bits: u32,
    exp_bits: u32,
    bias: i32,
}

impl FloatParts {
    fn of_f32(v: f32) -> Self {
        let bits = v.to_bits();
        FloatParts {
            negative: bits >> 31 == 1,
            exp_field: u64::from((bits >> 23) & 0xFF),
            frac: u64::from(bits & 0x7F_FFFF),
            mantissa_bits: 23,
            exp_bits: 8,
            bias: 127,
        }
    }

    fn of_f64(v: f64) -> Self {
        let bits = v.to_bits();
        FloatParts {
            negative: bits >> 63 == 1,
            exp_field: (bits >> 52) & 0x7FF,
            frac: bits & 0xF_FFFF_FFFF_FFFF,
            mantissa_bits: 52,
            exp_bits: 11,
            bias: 1023,
        }
    }

    fn is_nan_or_inf(&self) -> bool {
        self.exp_field == (1 << self.exp_bits) - 1
    }

    fn is_zero(&self) -> bool {
        self.exp_field == 0 && self.frac == 0
    }

    fn sign_str(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }

    /// Integer mantissa and binary exponent such that the value is
    /// `sign * M * 2^E`. Only meaningful for finite nonzero inputs.
    fn mantissa_exponent(&self) -> (u64, i32) {
        let point_shift = self.mantissa_bits as i32;
        if self.exp_field == 0 {
            // Subnormal: no implicit bit, fixed minimum exponent.
            (self.frac, 1 - self.bias - point_shift)
        } else {
            (
                self.frac | 1 << self.mantissa_bits,
                self.exp_field as i32 - self.bias - point_shift,
            )
        }
    }

    /// Renders infinity or NaN. NaN carries its quiet bit (top mantissa bit)
    /// and remaining payload bits.
    fn special(&self) -> String {
        if self.frac == 0 {
            format!("{}Infinity", self.sign_str())
        } else {
            let quiet_bit = 1 << (self.mantissa_bits - 1);
            let kind = if self.frac & quiet_bit != 0 {
                "quiet"
            } else {
                "signaling"
            };
            let payload = self.frac & (quiet_bit - 1);
            format!("{}NaN({}, payload={:#x})", self.sign_str(), kind, payload)
        }
    }
}

/// Produces the exact decimal expansion of an `f32` in scientific form.
///
/// Parsing the result back as `f32` reproduces the input bit-for-bit; this is
/// what "exact" means here.
#[must_use]
pub fn expand_f32(v: f32) -> String {
    expand(&FloatParts::of_f32(v))
}

/// Produces the exact decimal expansion of an `f64` in scientific form.
#[must_use]
pub fn expand_f64(v: f64) -> String {
    expand(&FloatParts::of_f64(v))
}

fn expand(parts: &FloatParts) -> String {
    if parts.is_nan_or_inf() {
        return parts.special();
    }
    if parts.is_zero() {
        // The sign bit survives at zero.
        return format!("{}0.0E+000", parts.sign_str());
    }

    let (mantissa, exponent) = parts.mantissa_exponent();
    let (digits, frac_len) = if exponent >= 0 {
        ((BigUint::from(mantissa) << exponent).to_string(), 0usize)
    } else {
        let shift = (-exponent) as u32;
        let scaled = BigUint::from(mantissa) * BigUint::from(5u8).pow(shift);
        (scaled.to_string(), shift as usize)
    };

    let (significand, dec_exp) = normalize(&digits, frac_len);
    let (leading, rest) = significand.split_at(1);
    format!(
        "{}{}.{}E{}{:03}",
        parts.sign_str(),
        leading,
        if rest.is_empty() { "0" } else { rest },
        if dec_exp < 0 { '-' } else { '+' },
        dec_exp.abs()
    )
}

/// Normalizes a digit string (with `frac_len` digits after the implied
/// point) to one leading nonzero digit and a power-of-ten exponent.
fn normalize(digits: &str, frac_len: usize) -> (String, i64) {
    // Pad so an integer part exists even for values below one.
    let padded = if digits.len() <= frac_len {
        let mut s = "0".repeat(frac_len + 1 - digits.len());
        s.push_str(digits);
        s
    } else {
        digits.to_string()
    };

    let int_len = padded.len() - frac_len;
    let leading_zeros = padded
        .bytes()
        .position(|b| b != b'0')
        .unwrap_or(padded.len() - 1);
    let dec_exp = int_len as i64 - 1 - leading_zeros as i64;

    let significant = padded[leading_zeros..].trim_end_matches('0');
    (significant.to_string(), dec_exp)
}

/// Renders the IEEE 754 bit fields of an `f32`, pipe-delimited:
/// `sign|biased exponent|mantissa`, each as a fixed-width binary group.
#[must_use]
pub fn bit_fields_f32(v: f32) -> String {
    bit_fields(&FloatParts::of_f32(v))
}

/// Renders the IEEE 754 bit fields of an `f64`.
#[must_use]
pub fn bit_fields_f64(v: f64) -> String {
    bit_fields(&FloatParts::of_f64(v))
}

fn bit_fields(parts: &FloatParts) -> String {
    format!(
        "{}|{:0ew$b}|{:0mw$b}",
        u8::from(parts.negative),
        parts.exp_field,
        parts.frac,
        ew = parts.exp_bits as usize,
        mw = parts.mantissa_bits as usize,
    )
}

/// Renders an `f32` as a C-style hex-float literal, e.g. `0x1.91eb86p+1`.
/// Subnormals keep their `0.` leading digit and fixed minimum exponent.
#[must_use]
pub fn hex_power_f32(v: f32) -> String {
    // Align the 23 mantissa bits to a nibble boundary.
    let parts = FloatParts::of_f32(v);
    hex_power(&parts, parts.frac << 1, 6)
}

/// Renders an `f64` as a C-style hex-float literal.
#[must_use]
pub fn hex_power_f64(v: f64) -> String {
    let parts = FloatParts::of_f64(v);
    hex_power(&parts, parts.frac, 13)
}

fn hex_power(parts: &FloatParts, aligned_frac: u64, nibbles: usize) -> String {
    if parts.is_nan_or_inf() {
        return parts.special();
    }
    if parts.is_zero() {
        return format!("{}0x0.0p+0", parts.sign_str());
    }

    let (leading, power) = if parts.exp_field == 0 {
        ('0', 1 - parts.bias)
    } else {
        ('1', parts.exp_field as i32 - parts.bias)
    };

    let hex = format!("{:0width$x}", aligned_frac, width = nibbles);
    let trimmed = hex.trim_end_matches('0');
    let mantissa = if trimmed.is_empty() { "0" } else { trimmed };
    format!(
        "{}0x{}.{}p{:+}",
        parts.sign_str(),
        leading,
        mantissa,
        power
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_pi_ish_f32() {
        assert_eq!(expand_f32(3.14), "3.1400001049041748046875E+000");
    }

    #[test]
    fn test_expand_exact_small_values() {
        assert_eq!(expand_f64(1.0), "1.0E+000");
        assert_eq!(expand_f64(2.0), "2.0E+000");
        assert_eq!(expand_f64(0.5), "5.0E-001");
        assert_eq!(expand_f64(-0.25), "-2.5E-001");
    }

    #[test]
    fn test_expand_signed_zero() {
        assert_eq!(expand_f64(0.0), "0.0E+000");
        assert_eq!(expand_f64(-0.0), "-0.0E+000");
        assert_eq!(expand_f32(-0.0), "-0.0E+000");
    }

    #[test]
    fn test_expand_specials() {
        assert_eq!(expand_f64(f64::INFINITY), "Infinity");
        assert_eq!(expand_f64(f64::NEG_INFINITY), "-Infinity");
        let nan = expand_f64(f64::NAN);
        assert!(nan.starts_with("NaN(quiet"), "got {nan}");
    }

    #[test]
    fn test_expand_subnormal_round_trips() {
        let tiny = f64::from_bits(1); // smallest positive subnormal
        let s = expand_f64(tiny);
        assert!(s.ends_with("E-324"), "got {s}");
        let back: f64 = s.parse().unwrap();
        assert_eq!(back.to_bits(), tiny.to_bits());
    }

    #[test]
    fn test_expand_round_trips_known_values() {
        for v in [0.1f64, 1.0 / 3.0, f64::MAX, f64::MIN_POSITIVE, 1e-300, 123456.789] {
            let s = expand_f64(v);
            let back: f64 = s.parse().unwrap();
            assert_eq!(back.to_bits(), v.to_bits(), "{v} -> {s}");
        }
        for v in [0.1f32, 3.14f32, f32::MAX, f32::MIN_POSITIVE] {
            let s = expand_f32(v);
            let back: f32 = s.parse().unwrap();
            assert_eq!(back.to_bits(), v.to_bits(), "{v} -> {s}");
        }
    }

    #[test]
    fn test_bit_fields() {
        assert_eq!(
            bit_fields_f32(1.0),
            "0|01111111|00000000000000000000000"
        );
        assert_eq!(
            bit_fields_f32(-2.0),
            "1|10000000|00000000000000000000000"
        );
        let f = bit_fields_f64(1.0);
        assert_eq!(f.len(), 1 + 1 + 11 + 1 + 52);
        assert!(f.starts_with("0|01111111111|"));
    }

    #[test]
    fn test_hex_power() {
        assert_eq!(hex_power_f64(1.0), "0x1.0p+0");
        assert_eq!(hex_power_f64(2.0), "0x1.0p+1");
        assert_eq!(hex_power_f64(-1.5), "-0x1.8p+0");
        assert_eq!(hex_power_f32(3.14), "0x1.91eb86p+1");
        assert_eq!(hex_power_f64(0.0), "0x0.0p+0");
    }

    #[test]
    fn test_hex_power_subnormal() {
        let tiny = f32::from_bits(1);
        let s = hex_power_f32(tiny);
        assert!(s.starts_with("0x0."), "got {s}");
        assert!(s.ends_with("p-126"), "got {s}");
    }
}
