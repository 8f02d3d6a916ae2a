//! The numeric format directive mini-language.
//!
//! Integer directives select a radix: `D` decimal, `X`/`x` hex
//! (upper/lowercase digits), `B` binary, `O` octal, `Q` quaternary, `N`
//! grouped decimal. Radix renderings carry a distinguishing prefix (`0x`,
//! `0b`, `0o`, `0q`) with the sign placed before the prefix, and an optional
//! decimal suffix sets a minimum digit count (`X8` zero-pads to 8 hex
//! digits).
//!
//! Float directives: `exact` (bit-exact decimal expansion, the default),
//! `bits` (IEEE field layout), `hexpow` (hex-power literal), and the
//! host-native passthroughs `F<p>` fixed, `E` scientific, `G` general,
//! `N<p>` grouped. The special modes always use a locale-invariant period as
//! the decimal separator.
//!
//! An unrecognized directive is not an error: the number falls back to its
//! plain `Display` rendering.

use crate::exact;
use crate::value::{Float, Int};

/// A parsed integer directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IntFormat {
    Decimal { min_digits: usize },
    Hex { upper: bool, min_digits: usize },
    Binary { min_digits: usize },
    Octal { min_digits: usize },
    Quaternary { min_digits: usize },
    Grouped,
}

fn parse_int_directive(directive: &str) -> Option<IntFormat> {
    let mut chars = directive.chars();
    let head = chars.next()?;
    let suffix = chars.as_str();
    let min_digits = if suffix.is_empty() {
        1
    } else {
        suffix.parse().ok()?
    };
    match head {
        'D' | 'd' => Some(IntFormat::Decimal { min_digits }),
        'X' => Some(IntFormat::Hex {
            upper: true,
            min_digits,
        }),
        'x' => Some(IntFormat::Hex {
            upper: false,
            min_digits,
        }),
        'B' | 'b' => Some(IntFormat::Binary { min_digits }),
        'O' | 'o' => Some(IntFormat::Octal { min_digits }),
        'Q' | 'q' => Some(IntFormat::Quaternary { min_digits }),
        'N' | 'n' => Some(IntFormat::Grouped),
        _ => None,
    }
}

/// Renders an integer per the directive, falling back to plain decimal for an
/// unrecognized directive.
#[must_use]
pub fn format_int(int: &Int, directive: &str) -> String {
    let Some(format) = parse_int_directive(directive) else {
        return int.value.to_string();
    };

    let sign = if int.value < 0 { "-" } else { "" };
    let magnitude = int.value.unsigned_abs();

    let (prefix, digits) = match format {
        IntFormat::Decimal { min_digits } => {
            ("", pad(magnitude.to_string(), min_digits))
        }
        IntFormat::Hex { upper, min_digits } => {
            let digits = if upper {
                format!("{:X}", magnitude)
            } else {
                format!("{:x}", magnitude)
            };
            ("0x", pad(digits, min_digits))
        }
        IntFormat::Binary { min_digits } => {
            ("0b", pad(format!("{:b}", magnitude), min_digits))
        }
        IntFormat::Octal { min_digits } => {
            ("0o", pad(format!("{:o}", magnitude), min_digits))
        }
        IntFormat::Quaternary { min_digits } => {
            ("0q", pad(quaternary_digits(magnitude), min_digits))
        }
        IntFormat::Grouped => ("", group_thousands(&magnitude.to_string())),
    };

    format!("{}{}{}", sign, prefix, digits)
}

fn pad(digits: String, min_digits: usize) -> String {
    if digits.len() >= min_digits {
        digits
    } else {
        let mut padded = "0".repeat(min_digits - digits.len());
        padded.push_str(&digits);
        padded
    }
}

fn quaternary_digits(mut magnitude: u128) -> String {
    if magnitude == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(b'0' + (magnitude % 4) as u8);
        magnitude /= 4;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }
    grouped
}

/// A parsed float directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FloatFormat {
    Exact,
    BitFields,
    HexPower,
    Fixed { precision: usize },
    Scientific,
    General,
    Grouped { precision: usize },
}

fn parse_float_directive(directive: &str) -> Option<FloatFormat> {
    match directive {
        "exact" => return Some(FloatFormat::Exact),
        "bits" => return Some(FloatFormat::BitFields),
        "hexpow" => return Some(FloatFormat::HexPower),
        "E" | "e" => return Some(FloatFormat::Scientific),
        "G" | "g" => return Some(FloatFormat::General),
        _ => {}
    }
    let mut chars = directive.chars();
    let head = chars.next()?;
    let suffix = chars.as_str();
    let precision = if suffix.is_empty() {
        2
    } else {
        suffix.parse().ok()?
    };
    match head {
        'F' | 'f' => Some(FloatFormat::Fixed { precision }),
        'N' | 'n' => Some(FloatFormat::Grouped { precision }),
        _ => None,
    }
}

/// Renders a float per the directive, falling back to plain `Display` for an
/// unrecognized directive.
#[must_use]
pub fn format_float(float: &Float, directive: &str) -> String {
    let Some(format) = parse_float_directive(directive) else {
        return display(float);
    };
    match format {
        FloatFormat::Exact => match float {
            Float::F32(v) => exact::expand_f32(*v),
            Float::F64(v) => exact::expand_f64(*v),
        },
        FloatFormat::BitFields => match float {
            Float::F32(v) => exact::bit_fields_f32(*v),
            Float::F64(v) => exact::bit_fields_f64(*v),
        },
        FloatFormat::HexPower => match float {
            Float::F32(v) => exact::hex_power_f32(*v),
            Float::F64(v) => exact::hex_power_f64(*v),
        },
        FloatFormat::Fixed { precision } => match float {
            Float::F32(v) => format!("{:.*}", precision, v),
            Float::F64(v) => format!("{:.*}", precision, v),
        },
        FloatFormat::Scientific => match float {
            Float::F32(v) => format!("{:E}", v),
            Float::F64(v) => format!("{:E}", v),
        },
        FloatFormat::General => display(float),
        FloatFormat::Grouped { precision } => {
            let fixed = match float {
                Float::F32(v) => format!("{:.*}", precision, v.abs()),
                Float::F64(v) => format!("{:.*}", precision, v.abs()),
            };
            let negative = match float {
                Float::F32(v) => v.is_sign_negative() && *v != 0.0,
                Float::F64(v) => v.is_sign_negative() && *v != 0.0,
            };
            let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
            let mut out = String::new();
            if negative {
                out.push('-');
            }
            out.push_str(&group_thousands(int_part));
            if !frac_part.is_empty() {
                out.push('.');
                out.push_str(frac_part);
            }
            out
        }
    }
}

fn display(float: &Float) -> String {
    match float {
        Float::F32(v) => v.to_string(),
        Float::F64(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IntWidth;

    fn int(value: i128) -> Int {
        Int {
            value,
            width: IntWidth::I32,
        }
    }

    #[test]
    fn test_radix_prefixes() {
        assert_eq!(format_int(&int(42), "X"), "0x2A");
        assert_eq!(format_int(&int(42), "x"), "0x2a");
        assert_eq!(format_int(&int(5), "B"), "0b101");
        assert_eq!(format_int(&int(8), "O"), "0o10");
        assert_eq!(format_int(&int(9), "Q"), "0q21");
        assert_eq!(format_int(&int(42), "D"), "42");
    }

    #[test]
    fn test_sign_precedes_prefix() {
        assert_eq!(format_int(&int(-42), "X"), "-0x2A");
        assert_eq!(format_int(&int(-5), "b"), "-0b101");
    }

    #[test]
    fn test_min_digit_padding() {
        assert_eq!(format_int(&int(42), "X8"), "0x0000002A");
        assert_eq!(format_int(&int(42), "D5"), "00042");
        assert_eq!(format_int(&int(-1), "B4"), "-0b0001");
    }

    #[test]
    fn test_grouped_integers() {
        assert_eq!(format_int(&int(1_234_567), "N"), "1,234,567");
        assert_eq!(format_int(&int(-1_000), "N"), "-1,000");
        assert_eq!(format_int(&int(999), "N"), "999");
    }

    #[test]
    fn test_unrecognized_directive_falls_back() {
        assert_eq!(format_int(&int(42), "Z"), "42");
        assert_eq!(format_int(&int(42), ""), "42");
        assert_eq!(format_float(&Float::F64(1.5), "Z9"), "1.5");
    }

    #[test]
    fn test_float_modes() {
        assert_eq!(
            format_float(&Float::F32(3.14), "exact"),
            "3.1400001049041748046875E+000"
        );
        assert_eq!(format_float(&Float::F64(3.14159), "F2"), "3.14");
        assert_eq!(format_float(&Float::F64(1.0), "G"), "1");
        assert_eq!(format_float(&Float::F64(1234.5), "N1"), "1,234.5");
        assert_eq!(format_float(&Float::F64(-1234.5), "N1"), "-1,234.5");
        assert_eq!(format_float(&Float::F64(2.0), "hexpow"), "0x1.0p+1");
    }

    #[test]
    fn test_quaternary_zero() {
        assert_eq!(format_int(&int(0), "Q"), "0q0");
    }
}
