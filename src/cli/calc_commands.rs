use crate::calculator::{find_preset, find_preset_index, BandwidthReport, CalculatorInputs, RawFields};
use crate::cli::commands::Commands;
use crate::config::AppConfig;
use crate::dashboard::CalculatorForm;
use anyhow::{Context, Result};
use log::{debug, info};

pub struct CalcCommandHandler {
    config: AppConfig,
}

/// Command-line overrides for a single calculation
#[derive(Debug, Clone, Default)]
pub struct CalcOverrides {
    pub channels: Option<String>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u32>,
    pub packet_time: Option<f64>,
    pub streams: Option<String>,
}

impl CalcCommandHandler {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn handle(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Calc {
                channels,
                sample_rate,
                bit_depth,
                packet_time,
                streams,
                json,
            } => {
                let overrides = CalcOverrides {
                    channels,
                    sample_rate,
                    bit_depth,
                    packet_time,
                    streams,
                };
                self.handle_calc(&overrides, json)
            }
            Commands::Preset { name, json } => self.handle_preset(&name, json),
            Commands::Presets => {
                print!("{}", self.presets_listing());
                Ok(())
            }
            Commands::Form { preset } => self.handle_form(preset.as_deref()).await,
        }
    }

    pub fn handle_calc(&self, overrides: &CalcOverrides, json: bool) -> Result<()> {
        let inputs = self.build_inputs(overrides)?;
        let report = BandwidthReport::from_inputs(inputs).context("Calculation failed")?;
        println!("{}", render_report(&report, json)?);
        Ok(())
    }

    pub fn handle_preset(&self, name: &str, json: bool) -> Result<()> {
        let preset = find_preset(&self.config.presets, name)
            .with_context(|| format!("Run `abw presets` to list the {} available presets", self.config.presets.len()))?;
        info!("Applying preset '{}'", preset.label);

        let report = BandwidthReport::from_inputs(preset.inputs()).context("Calculation failed")?;
        println!("{}", render_report(&report, json)?);
        Ok(())
    }

    async fn handle_form(&self, preset: Option<&str>) -> Result<()> {
        self.build_form(preset)?.run().await
    }

    /// Form seeded with the configured defaults, with `preset` applied if given
    pub fn build_form(&self, preset: Option<&str>) -> Result<CalculatorForm> {
        let mut form = CalculatorForm::new(self.config.defaults, self.config.presets.clone());
        if let Some(name) = preset {
            let index = find_preset_index(&self.config.presets, name)
                .context("Cannot open the form with this preset")?;
            form.apply_preset(index);
        }
        Ok(form)
    }

    /// Merges overrides onto the configured defaults, reading every field the
    /// way the form does
    pub fn build_inputs(&self, overrides: &CalcOverrides) -> Result<CalculatorInputs> {
        let mut fields = RawFields::from(self.config.defaults);

        if let Some(channels) = &overrides.channels {
            fields.channels = channels.clone();
        }
        if let Some(sample_rate) = overrides.sample_rate {
            fields.sample_rate = sample_rate.to_string();
        }
        if let Some(bit_depth) = overrides.bit_depth {
            fields.bit_depth = bit_depth.to_string();
        }
        if let Some(packet_time) = overrides.packet_time {
            fields.packet_time = packet_time.to_string();
        }
        if let Some(streams) = &overrides.streams {
            fields.streams = streams.clone();
        }

        debug!("Calculation fields: {:?}", fields);
        CalculatorInputs::from_fields(&fields).context("Invalid calculator input")
    }

    /// One line per preset: label and its five inputs
    pub fn presets_listing(&self) -> String {
        let mut out = String::new();
        for preset in &self.config.presets {
            out.push_str(&format!(
                "{:<10} {:>3} ch  {:>6} Hz  {:>2}-bit  {} s  x{}\n",
                preset.label,
                preset.channels,
                preset.sample_rate,
                preset.bit_depth,
                preset.packet_time,
                preset.streams
            ));
        }
        out
    }
}

/// Renders a report as aligned text or pretty-printed JSON
pub fn render_report(report: &BandwidthReport, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(report).context("Failed to serialize report");
    }

    let inputs = &report.inputs;
    Ok(format!(
        "Inputs: {} ch, {} Hz, {}-bit, {} s packets, {} stream{}\n\n{}",
        inputs.channels,
        inputs.sample_rate,
        inputs.bit_depth,
        inputs.packet_time,
        inputs.streams,
        if inputs.streams == 1 { "" } else { "s" },
        report
    ))
}
