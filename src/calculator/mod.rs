//! Audio-over-IP bandwidth calculator
//!
//! Pure functions from five stream parameters to bandwidth and packet-size
//! figures, plus the field rules and formatting a front end needs to present
//! them.
//!
//! ## Module Organization
//!
//! - `inputs`: `CalculatorInputs`, lenient field parsing and count clamping
//! - `metrics`: the bandwidth formula
//! - `formatting`: bandwidth, byte and count rendering
//! - `presets`: labeled input sets
//! - `report`: the six display strings for one calculation
//! - `errors`: `CalculatorError`
//!
//! ## Usage
//!
//! ```rust
//! use aoip_bandwidth::calculator::{BandwidthReport, CalculatorInputs};
//!
//! let report = BandwidthReport::from_inputs(CalculatorInputs::new(2, 48_000, 24, 0.001, 100)).unwrap();
//! assert_eq!(report.total_label, "Total (100 streams)");
//! assert_eq!(report.total.primary.to_string(), "273.600 Mbps");
//! ```

pub mod errors;
pub mod formatting;
pub mod inputs;
pub mod metrics;
pub mod presets;
pub mod report;

pub use errors::CalculatorError;
pub use formatting::{format_bandwidth, format_bandwidth_alt, format_bytes, format_grouped, FormattedBandwidth};
pub use inputs::{clamp_field, sanitize_positive_int, CalculatorInputs, Field, RawFields};
pub use metrics::{compute_metrics, Metrics, HEADER_BYTES};
pub use presets::{builtin_presets, find_preset, find_preset_index, Preset};
pub use report::{BandwidthDisplay, BandwidthReport};

#[cfg(test)]
pub mod tests;
