//! Calculator inputs and field sanitization
//!
//! Values arrive as raw field text. Channel and stream counts are clamped into
//! range and never rejected; the remaining fields are parsed leniently from
//! their leading numeric prefix and left for [`compute_metrics`] to validate.
//!
//! [`compute_metrics`]: crate::calculator::compute_metrics

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::calculator::errors::CalculatorError;

pub const MIN_CHANNELS: u32 = 1;
pub const MAX_CHANNELS: u32 = 256;
pub const MIN_STREAMS: u32 = 1;
pub const MAX_STREAMS: u32 = 10_000;

/// The five stream parameters a calculation is run against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    /// Audio channels per stream (1-256)
    pub channels: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bit_depth: u32,
    /// Packet time in seconds (0.001 = 1 ms)
    pub packet_time: f64,
    /// Independent streams of this shape (1-10000)
    pub streams: u32,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48_000,
            bit_depth: 24,
            packet_time: 0.001,
            streams: 1,
        }
    }
}

impl CalculatorInputs {
    pub fn new(channels: u32, sample_rate: u32, bit_depth: u32, packet_time: f64, streams: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bit_depth,
            packet_time,
            streams,
        }
    }

    /// Builds inputs from raw field text the way the form reads it
    ///
    /// Channels and streams go through [`clamp_field`] and cannot fail. Sample
    /// rate, bit depth and packet time must carry a leading number; anything
    /// after it is ignored.
    pub fn from_fields(fields: &RawFields) -> Result<Self, CalculatorError> {
        let channels = clamp_field(&fields.channels, MAX_CHANNELS);
        let streams = clamp_field(&fields.streams, MAX_STREAMS);
        let sample_rate = parse_unsigned_field("sample_rate", &fields.sample_rate)?;
        let bit_depth = parse_unsigned_field("bit_depth", &fields.bit_depth)?;
        let packet_time = parse_leading_float(&fields.packet_time).ok_or_else(|| {
            CalculatorError::invalid(
                "packet_time",
                format!("'{}' is not a number", fields.packet_time.trim()),
            )
        })?;

        Ok(Self::new(channels, sample_rate, bit_depth, packet_time, streams))
    }
}

fn parse_unsigned_field(field: &'static str, raw: &str) -> Result<u32, CalculatorError> {
    let value = parse_leading_int(raw)
        .ok_or_else(|| CalculatorError::invalid(field, format!("'{}' is not a number", raw.trim())))?;

    u32::try_from(value).map_err(|_| {
        CalculatorError::invalid(field, format!("{} is outside 0..={}", value, u32::MAX))
    })
}

/// Raw text of the five input fields, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub channels: String,
    pub sample_rate: String,
    pub bit_depth: String,
    pub packet_time: String,
    pub streams: String,
}

impl RawFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Channels => &self.channels,
            Field::SampleRate => &self.sample_rate,
            Field::BitDepth => &self.bit_depth,
            Field::PacketTime => &self.packet_time,
            Field::Streams => &self.streams,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Channels => &mut self.channels,
            Field::SampleRate => &mut self.sample_rate,
            Field::BitDepth => &mut self.bit_depth,
            Field::PacketTime => &mut self.packet_time,
            Field::Streams => &mut self.streams,
        }
    }
}

impl From<CalculatorInputs> for RawFields {
    fn from(inputs: CalculatorInputs) -> Self {
        Self {
            channels: inputs.channels.to_string(),
            sample_rate: inputs.sample_rate.to_string(),
            bit_depth: inputs.bit_depth.to_string(),
            packet_time: inputs.packet_time.to_string(),
            streams: inputs.streams.to_string(),
        }
    }
}

/// Identifies one of the five input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Channels,
    SampleRate,
    BitDepth,
    PacketTime,
    Streams,
}

impl Field {
    /// Fields in display order
    pub const ALL: [Field; 5] = [
        Field::Channels,
        Field::Streams,
        Field::SampleRate,
        Field::BitDepth,
        Field::PacketTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Channels => "Channels",
            Field::SampleRate => "Sample rate (Hz)",
            Field::BitDepth => "Bit depth",
            Field::PacketTime => "Packet time (s)",
            Field::Streams => "Streams",
        }
    }

    /// Upper bound for fields that are clamped on blur
    pub fn max(self) -> Option<u32> {
        match self {
            Field::Channels => Some(MAX_CHANNELS),
            Field::Streams => Some(MAX_STREAMS),
            _ => None,
        }
    }

    /// Whether the field only takes whole positive numbers typed as digits
    pub fn is_count(self) -> bool {
        self.max().is_some()
    }

    /// Whether `ch` may be typed into this field
    pub fn accepts_key(self, ch: char) -> bool {
        if self.is_count() {
            accepts_integer_key(ch)
        } else {
            accepts_numeric_key(ch)
        }
    }
}

/// Characters a numeric field accepts at all
pub fn accepts_numeric_key(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')
}

/// Keystroke filter for channel and stream counts
///
/// Blocks the decimal point, signs and scientific notation.
pub fn accepts_integer_key(ch: char) -> bool {
    accepts_numeric_key(ch) && !matches!(ch, '.' | '-' | 'e' | 'E' | '+')
}

/// Parses the leading integer of `raw`, ignoring trailing garbage
///
/// Leading whitespace and a single sign are allowed. Returns `None` when no
/// digit follows. Values beyond `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parses the leading decimal number of `raw`, ignoring trailing garbage
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. `"1.5ms"` parses as `1.5`; `"ms"` does not parse.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Reads a count field for calculation: invalid or zero becomes 1, then `[1, max]`
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::inputs::clamp_field;
///
/// assert_eq!(clamp_field("256", 256), 256);
/// assert_eq!(clamp_field("257", 256), 256);
/// assert_eq!(clamp_field("0", 256), 1);
/// assert_eq!(clamp_field("abc", 256), 1);
/// ```
pub fn clamp_field(raw: &str, max: u32) -> u32 {
    let parsed = parse_leading_int(raw).filter(|n| *n != 0).unwrap_or(1);
    let clamped = parsed.clamp(1, i64::from(max)) as u32;

    if i64::from(clamped) != parsed {
        warn!(
            "Clamped field value '{}' to {} (valid range 1..={})",
            raw.trim(),
            clamped,
            max
        );
    }

    clamped
}

/// Normalizes a count field when it loses focus
///
/// Returns the replacement text, or `None` when the field already holds its
/// canonical in-range integer. Non-numeric and sub-1 values reset to `"1"`;
/// fractional values are floored; values above `max` are capped.
pub fn sanitize_positive_int(raw: &str, max: u32) -> Option<String> {
    let n = parse_leading_float(raw).map(|v| v.floor().min(f64::from(max)));

    match n {
        Some(n) if n.is_finite() && n >= 1.0 => {
            let canonical = (n as u64).to_string();
            if canonical != raw.trim() {
                trace!("Normalized field '{}' to '{}'", raw, canonical);
                Some(canonical)
            } else {
                None
            }
        }
        _ => {
            warn!("Field value '{}' is not a positive integer, resetting to 1", raw.trim());
            Some("1".to_string())
        }
    }
}
