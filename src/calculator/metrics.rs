//! Bandwidth metrics for a single audio-over-IP stream configuration
//!
//! Every value here is derived fresh from a [`CalculatorInputs`] on each call.
//! Nothing is cached between calculations.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::calculator::errors::CalculatorError;
use crate::calculator::inputs::{CalculatorInputs, MAX_CHANNELS, MAX_STREAMS, MIN_CHANNELS, MIN_STREAMS};

/// Per-packet header overhead: Ethernet (14) + IPv4 (20) + UDP (8) + RTP (12)
pub const HEADER_BYTES: f64 = 54.0;

/// Derived bandwidth and size figures for one input set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Samples carried per channel in each packet
    pub samples_per_packet: u64,
    /// Audio payload per packet, excluding headers (fractional for odd bit depths)
    pub payload_bytes: f64,
    /// Payload plus [`HEADER_BYTES`]
    pub packet_bytes: f64,
    /// Packets emitted per second
    pub packet_rate: f64,
    /// Wire bandwidth of a single stream in bits per second
    pub per_stream_bps: f64,
    /// Wire bandwidth of all streams in bits per second
    pub total_bps: f64,
}

/// Computes the full metric chain for one set of stream parameters
///
/// # Arguments
///
/// * `inputs` - Channel count, sample rate, bit depth, packet time and stream count
///
/// # Returns
///
/// * `Ok(Metrics)` for inputs inside their domains
/// * `Err(CalculatorError::InvalidInput)` when a field is out of range, non-positive
///   or would drive a derived value to infinity
///
/// # Examples
///
/// ```
/// use aoip_bandwidth::calculator::{compute_metrics, CalculatorInputs};
///
/// let inputs = CalculatorInputs::new(2, 48_000, 24, 0.001, 1);
/// let metrics = compute_metrics(inputs).unwrap();
/// assert_eq!(metrics.samples_per_packet, 48);
/// assert_eq!(metrics.packet_bytes, 342.0);
/// assert_eq!(metrics.per_stream_bps, 2_736_000.0);
/// ```
pub fn compute_metrics(inputs: CalculatorInputs) -> Result<Metrics, CalculatorError> {
    validate_inputs(&inputs)?;

    // Round half up, never half-to-even
    let samples = (inputs.sample_rate as f64 * inputs.packet_time + 0.5).floor();
    let payload_bytes = inputs.channels as f64 * samples * (inputs.bit_depth as f64 / 8.0);
    let packet_bytes = payload_bytes + HEADER_BYTES;
    let packet_rate = 1.0 / inputs.packet_time;
    let per_stream_bps = packet_bytes * 8.0 * packet_rate;
    let total_bps = per_stream_bps * inputs.streams as f64;

    trace!(
        "Intermediate values: samples={}, payload={}, packet={}, rate={}",
        samples,
        payload_bytes,
        packet_bytes,
        packet_rate
    );

    if !packet_rate.is_finite() {
        return Err(CalculatorError::invalid(
            "packet_time",
            format!("{} s yields an unbounded packet rate", inputs.packet_time),
        ));
    }
    // 2^64 and above cannot be held as a sample count
    if samples >= u64::MAX as f64 {
        return Err(CalculatorError::invalid(
            "packet_time",
            format!(
                "{} Hz x {} s gives more samples per packet than can be counted",
                inputs.sample_rate, inputs.packet_time
            ),
        ));
    }
    if !per_stream_bps.is_finite() {
        return Err(CalculatorError::invalid(
            "packet_time",
            format!(
                "{} byte packets at {} pkt/s overflow the bandwidth range",
                packet_bytes, packet_rate
            ),
        ));
    }
    if !total_bps.is_finite() {
        return Err(CalculatorError::invalid(
            "streams",
            format!(
                "{} streams at {} bps each overflow the bandwidth range",
                inputs.streams, per_stream_bps
            ),
        ));
    }

    let metrics = Metrics {
        samples_per_packet: samples as u64,
        payload_bytes,
        packet_bytes,
        packet_rate,
        per_stream_bps,
        total_bps,
    };

    debug!(
        "Computed metrics for {}ch/{}Hz/{}bit/{}s x{}: per_stream={:.0}bps total={:.0}bps",
        inputs.channels,
        inputs.sample_rate,
        inputs.bit_depth,
        inputs.packet_time,
        inputs.streams,
        metrics.per_stream_bps,
        metrics.total_bps
    );

    Ok(metrics)
}

fn validate_inputs(inputs: &CalculatorInputs) -> Result<(), CalculatorError> {
    if !(MIN_CHANNELS..=MAX_CHANNELS).contains(&inputs.channels) {
        return Err(CalculatorError::invalid(
            "channels",
            format!(
                "{} is outside {}..={}",
                inputs.channels, MIN_CHANNELS, MAX_CHANNELS
            ),
        ));
    }

    if !(MIN_STREAMS..=MAX_STREAMS).contains(&inputs.streams) {
        return Err(CalculatorError::invalid(
            "streams",
            format!(
                "{} is outside {}..={}",
                inputs.streams, MIN_STREAMS, MAX_STREAMS
            ),
        ));
    }

    if inputs.sample_rate == 0 {
        return Err(CalculatorError::invalid("sample_rate", "must be greater than 0 Hz"));
    }

    if inputs.bit_depth == 0 {
        return Err(CalculatorError::invalid("bit_depth", "must be greater than 0 bits"));
    }

    if !inputs.packet_time.is_finite() || inputs.packet_time <= 0.0 {
        return Err(CalculatorError::invalid(
            "packet_time",
            format!("{} is not a positive number of seconds", inputs.packet_time),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_overhead_matches_protocol_stack() {
        // Ethernet + IPv4 + UDP + RTP
        assert_eq!(HEADER_BYTES, (14 + 20 + 8 + 12) as f64);
    }

    #[test]
    fn test_zero_samples_is_header_only() {
        // 8000 Hz * 0.00005 s = 0.4 samples, rounds down to zero
        let metrics = compute_metrics(CalculatorInputs::new(2, 8_000, 16, 0.000_05, 1)).unwrap();
        assert_eq!(metrics.samples_per_packet, 0);
        assert_eq!(metrics.payload_bytes, 0.0);
        assert_eq!(metrics.packet_bytes, HEADER_BYTES);
    }

    #[test]
    fn test_half_sample_rounds_up() {
        // 5 Hz * 0.5 s = 2.5 samples
        let metrics = compute_metrics(CalculatorInputs::new(1, 5, 8, 0.5, 1)).unwrap();
        assert_eq!(metrics.samples_per_packet, 3);
    }

    #[test]
    fn test_subnormal_packet_time_is_rejected() {
        let result = compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e-320, 1));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field(), Some("packet_time"));
    }

    #[test]
    fn test_uncountable_samples_are_rejected() {
        let err = compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e20, 1)).unwrap_err();
        assert_eq!(err.field(), Some("packet_time"));
        assert!(err.to_string().contains("samples per packet"));
    }

    #[test]
    fn test_large_but_countable_samples_stay_consistent() {
        // 48000 Hz * 1e9 s = 4.8e13 samples, well inside u64
        let metrics = compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e9, 1)).unwrap();
        assert_eq!(metrics.samples_per_packet, 48_000_000_000_000);
        assert_eq!(
            metrics.payload_bytes,
            2.0 * metrics.samples_per_packet as f64 * 3.0
        );
    }

    #[test]
    fn test_bandwidth_overflow_names_packet_rate() {
        // Finite packet rate of 1e307 pkt/s, but 54+ byte packets overflow
        let err = compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e-307, 1)).unwrap_err();
        assert_eq!(err.field(), Some("packet_time"));
        assert!(err.to_string().contains("pkt/s"));
    }

    #[test]
    fn test_total_overflow_names_streams() {
        // Per-stream 4.32e304 bps is finite; ten thousand of them are not
        let err = compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e-302, 10_000)).unwrap_err();
        assert_eq!(err.field(), Some("streams"));
        assert!(err.to_string().contains("10000 streams"));

        assert!(compute_metrics(CalculatorInputs::new(2, 48_000, 24, 1e-302, 1)).is_ok());
    }
}
