use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the abw calculator
/// Uses clap's derive macros for automatic CLI generation
#[derive(Parser, Debug)]
#[command(author = "Kaipo Chen")]
#[command(version)] // Automatically uses version from Cargo.toml
#[command(about = "Audio-over-IP Bandwidth Calculator - Work out packet sizes and wire bandwidth for RTP audio streams")]
#[command(long_about = "abw computes samples per packet, payload and packet size, packet rate, and per-stream \
and total network bandwidth for audio-over-IP streams (AES67, Dante, RAVENNA). Packet size includes 54 bytes \
of Ethernet, IPv4, UDP and RTP headers.")]
pub struct Cli {
    /// Configuration file with default inputs and presets
    #[arg(
        short,
        long,
        global = true,
        help = "Path to a TOML configuration file (default: ./abw.toml if present)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-shot calculation from command-line parameters
    /// Any parameter left out falls back to the configured defaults
    #[command(about = "Calculate bandwidth for a stream configuration")]
    #[command(long_about = "Calculates bandwidth and packet figures for one stream configuration. \
Channel and stream counts are clamped into range (channels 1-256, streams 1-10000) rather than rejected.\n\n\
Examples:\n  \
abw calc                                  # Configured defaults\n  \
abw calc --channels 64                    # 64 channels, other values from defaults\n  \
abw calc -n 8 -r 96000 -p 0.000125        # 8 ch, 96 kHz, 125 us packets\n  \
abw calc --streams 100 --json             # Machine-readable output")]
    Calc {
        /// Audio channels per stream, clamped to 1-256
        #[arg(short = 'n', long, help = "Channels per stream (1-256)")]
        channels: Option<String>,

        /// Sample rate in Hz
        #[arg(short = 'r', long, help = "Sample rate in Hz")]
        sample_rate: Option<u32>,

        /// Bits per sample
        #[arg(short, long, help = "Bit depth in bits")]
        bit_depth: Option<u32>,

        /// Packet time in seconds (0.001 = 1 ms)
        #[arg(short, long, allow_negative_numbers = true, help = "Packet time in seconds")]
        packet_time: Option<f64>,

        /// Number of identical streams, clamped to 1-10000
        #[arg(short, long, help = "Number of streams (1-10000)")]
        streams: Option<String>,

        /// Print the report as JSON
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    /// Apply a named preset and calculate
    #[command(about = "Calculate bandwidth for a named preset")]
    #[command(long_about = "Applies a preset (all five inputs at once) and calculates. \
Preset names are matched case-insensitively; see `abw presets`.\n\n\
Examples:\n  \
abw preset stereo\n  \
abw preset \"64 ch\" --json")]
    Preset {
        /// Preset label
        #[arg(help = "Preset label, e.g. \"64 ch\"")]
        name: String,

        /// Print the report as JSON
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    /// List the available presets
    #[command(about = "List available presets")]
    Presets,

    /// Interactive form with live recalculation
    #[command(about = "Open the interactive calculator form")]
    #[command(long_about = "Opens a terminal form with the five input fields and preset buttons. \
Results are recalculated on every edit.\n\n\
Keys:\n  \
Tab / Shift-Tab, Up / Down   Move between fields\n  \
Left / Right                 Select a preset\n  \
Enter                        Apply the selected preset\n  \
q / Esc                      Quit")]
    Form {
        /// Preset to apply when the form opens
        #[arg(short, long, help = "Preset to apply on start")]
        preset: Option<String>,
    },
}
