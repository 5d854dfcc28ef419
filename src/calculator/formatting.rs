//! Formatting utilities for bandwidth and size figures
//!
//! Bandwidth uses decimal (SI) prefixes in bits per second. Sizes use binary
//! prefixes in bytes. Counts shown to the user are grouped with commas.
//!
//! Every fixed-decimal figure goes through [`to_fixed`], which rounds ties
//! upward. `format!("{:.N}")` alone would round them to even.

use serde::Serialize;
use std::fmt;

/// A bandwidth figure split into its number and unit for separate styling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedBandwidth {
    pub value: String,
    pub unit: &'static str,
}

impl fmt::Display for FormattedBandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Formats bits per second with the largest SI unit the value reaches
///
/// Tier lower bounds are inclusive, so exactly 1e9 bps is reported in Gbps.
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::formatting::format_bandwidth;
///
/// assert_eq!(format_bandwidth(2_736_000.0).to_string(), "2.736 Mbps");
/// assert_eq!(format_bandwidth(1e9).to_string(), "1.000 Gbps");
/// assert_eq!(format_bandwidth(999.0).to_string(), "999 bps");
/// ```
pub fn format_bandwidth(bps: f64) -> FormattedBandwidth {
    let (value, unit) = if bps >= 1e9 {
        (to_fixed(bps / 1e9, 3), "Gbps")
    } else if bps >= 1e6 {
        (to_fixed(bps / 1e6, 3), "Mbps")
    } else if bps >= 1e3 {
        (to_fixed(bps / 1e3, 2), "Kbps")
    } else {
        (to_fixed(bps, 0), "bps")
    };

    FormattedBandwidth { value, unit }
}

/// Coarser secondary rendering shown beneath the primary figure
///
/// Gigabit figures are restated in Mbps and megabit figures in Kbps. Anything
/// below 1 Mbps has no alternate rendering and yields an empty string.
pub fn format_bandwidth_alt(bps: f64) -> String {
    if bps >= 1e9 {
        format!("{} Mbps", to_fixed(bps / 1e6, 1))
    } else if bps >= 1e6 {
        format!("{} Kbps", to_fixed(bps / 1e3, 0))
    } else {
        String::new()
    }
}

/// Formats a byte count with binary units
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::formatting::format_bytes;
///
/// assert_eq!(format_bytes(288.0), "288 B");
/// assert_eq!(format_bytes(1024.0), "1.00 KB");
/// assert_eq!(format_bytes(1048576.0), "1.00 MB");
/// ```
pub fn format_bytes(bytes: f64) -> String {
    if bytes >= 1024.0 * 1024.0 {
        format!("{} MB", to_fixed(bytes / (1024.0 * 1024.0), 2))
    } else if bytes >= 1024.0 {
        format!("{} KB", to_fixed(bytes / 1024.0, 2))
    } else {
        format!("{} B", format_grouped(bytes))
    }
}

/// Fraction digits needed to write any finite `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Formats `value` with exactly `places` fraction digits, rounding an exact
/// tie away from zero
///
/// Rounding works on the full binary value, so `1.125` becomes `"1.13"` while
/// `1.005` (stored slightly below) becomes `"1.00"`.
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::formatting::to_fixed;
///
/// assert_eq!(to_fixed(1.125, 2), "1.13");
/// assert_eq!(to_fixed(22.5, 0), "23");
/// assert_eq!(to_fixed(2.736, 3), "2.736");
/// ```
pub fn to_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let rounded = round_half_up(&exact, places);
    if value < 0.0 {
        format!("-{rounded}")
    } else {
        rounded
    }
}

/// Rounds a plain non-negative decimal string to `places` fraction digits,
/// with a 5 in the first dropped digit rounding up
fn round_half_up(decimal: &str, places: usize) -> String {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let frac = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..places).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(places).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let mut out = String::from_utf8_lossy(&digits[..split]).into_owned();
    if places > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&digits[split..]));
    }
    out
}

/// Renders a number with comma thousands separators and at most three
/// fraction digits, trailing zeros dropped
///
/// Ties round away from zero on the shortest decimal form of the value, so
/// `1.0005` renders as `"1.001"`.
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::formatting::format_grouped;
///
/// assert_eq!(format_grouped(1000.0), "1,000");
/// assert_eq!(format_grouped(3003.003003), "3,003.003");
/// assert_eq!(format_grouped(2.5), "2.5");
/// ```
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = round_half_up(&value.abs().to_string(), 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }

    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}
