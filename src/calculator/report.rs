//! Display report for one calculation
//!
//! Turns raw [`Metrics`] into the six strings a user sees: per-stream and total
//! bandwidth (each with an alternate rendering), packet rate, samples per packet,
//! payload size and packet size.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::calculator::errors::CalculatorError;
use crate::calculator::formatting::{
    format_bandwidth, format_bandwidth_alt, format_bytes, format_grouped, FormattedBandwidth,
};
use crate::calculator::inputs::CalculatorInputs;
use crate::calculator::metrics::{compute_metrics, Metrics};

/// A bandwidth figure with its primary and alternate renderings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandwidthDisplay {
    pub bps: f64,
    pub primary: FormattedBandwidth,
    /// Empty below 1 Mbps
    pub alt: String,
}

impl BandwidthDisplay {
    pub fn new(bps: f64) -> Self {
        Self {
            bps,
            primary: format_bandwidth(bps),
            alt: format_bandwidth_alt(bps),
        }
    }
}

/// Everything rendered for one input set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandwidthReport {
    pub generated_at: DateTime<Utc>,
    pub inputs: CalculatorInputs,
    pub metrics: Metrics,
    pub per_stream: BandwidthDisplay,
    pub total_label: String,
    pub total: BandwidthDisplay,
    pub packet_rate: String,
    pub samples_per_packet: String,
    pub payload_size: String,
    pub packet_size: String,
}

impl BandwidthReport {
    /// Computes metrics for `inputs` and renders them
    pub fn from_inputs(inputs: CalculatorInputs) -> Result<Self, CalculatorError> {
        let metrics = compute_metrics(inputs)?;
        Ok(Self::new(inputs, metrics))
    }

    pub fn new(inputs: CalculatorInputs, metrics: Metrics) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs,
            metrics,
            per_stream: BandwidthDisplay::new(metrics.per_stream_bps),
            total_label: total_label(inputs.streams),
            total: BandwidthDisplay::new(metrics.total_bps),
            packet_rate: format!("{} pkt/s", format_grouped(metrics.packet_rate)),
            samples_per_packet: format!("{} per ch", format_grouped(metrics.samples_per_packet as f64)),
            payload_size: format_bytes(metrics.payload_bytes),
            packet_size: format_bytes(metrics.packet_bytes),
        }
    }
}

/// Heading for the total bandwidth figure, e.g. "Total (100 streams)"
pub fn total_label(streams: u32) -> String {
    if streams == 1 {
        "Total (1 stream)".to_string()
    } else {
        format!("Total ({} streams)", format_grouped(f64::from(streams)))
    }
}

fn write_bandwidth(f: &mut fmt::Formatter<'_>, label: &str, display: &BandwidthDisplay) -> fmt::Result {
    if display.alt.is_empty() {
        writeln!(f, "{:<20} {}", format!("{label}:"), display.primary)
    } else {
        writeln!(f, "{:<20} {} ({})", format!("{label}:"), display.primary, display.alt)
    }
}

impl fmt::Display for BandwidthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bandwidth(f, "Per stream", &self.per_stream)?;
        write_bandwidth(f, &self.total_label, &self.total)?;
        writeln!(f, "{:<20} {}", "Packet rate:", self.packet_rate)?;
        writeln!(f, "{:<20} {}", "Samples/packet:", self.samples_per_packet)?;
        writeln!(f, "{:<20} {}", "Payload size:", self.payload_size)?;
        write!(f, "{:<20} {}", "Packet size:", self.packet_size)
    }
}
