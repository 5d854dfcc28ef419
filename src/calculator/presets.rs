//! Labeled preset input sets
//!
//! Built-in presets cover common AES67 / Dante channel counts at 48 kHz,
//! 24-bit, 1 ms packets and a single stream.

use serde::{Deserialize, Serialize};

use crate::calculator::errors::CalculatorError;
use crate::calculator::inputs::CalculatorInputs;

/// A named, fixed set of calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    pub channels: u32,
    #[serde(default = "default_streams")]
    pub streams: u32,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u32,
    #[serde(default = "default_packet_time")]
    pub packet_time: f64,
}

fn default_streams() -> u32 {
    1
}

fn default_sample_rate() -> u32 {
    48_000
}

fn default_bit_depth() -> u32 {
    24
}

fn default_packet_time() -> f64 {
    0.001
}

impl Preset {
    /// A preset with the standard stream shape and the given channel count
    pub fn with_channels(label: impl Into<String>, channels: u32) -> Self {
        Self {
            label: label.into(),
            channels,
            streams: default_streams(),
            sample_rate: default_sample_rate(),
            bit_depth: default_bit_depth(),
            packet_time: default_packet_time(),
        }
    }

    /// The inputs this preset sets, all five fields at once
    pub fn inputs(&self) -> CalculatorInputs {
        CalculatorInputs::new(
            self.channels,
            self.sample_rate,
            self.bit_depth,
            self.packet_time,
            self.streams,
        )
    }
}

/// The presets shipped with the calculator
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::with_channels("Stereo", 2),
        Preset::with_channels("8 ch", 8),
        Preset::with_channels("16 ch", 16),
        Preset::with_channels("32 ch", 32),
        Preset::with_channels("64 ch", 64),
        Preset::with_channels("128 ch", 128),
        Preset::with_channels("256 ch", 256),
    ]
}

/// Finds a preset by label, ignoring case and surrounding whitespace
pub fn find_preset<'a>(presets: &'a [Preset], label: &str) -> Result<&'a Preset, CalculatorError> {
    find_preset_index(presets, label).map(|i| &presets[i])
}

/// Position of the preset with `label`, matched as in [`find_preset`]
pub fn find_preset_index(presets: &[Preset], label: &str) -> Result<usize, CalculatorError> {
    let wanted = label.trim();
    presets
        .iter()
        .position(|p| p.label.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CalculatorError::UnknownPreset(wanted.to_string()))
}
