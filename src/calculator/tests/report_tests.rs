//! Tests for the rendered report

#[cfg(test)]
mod tests {
    use crate::calculator::inputs::CalculatorInputs;
    use crate::calculator::report::*;

    #[test]
    fn test_reference_report() {
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(2, 48_000, 24, 0.001, 1)).unwrap();

        assert_eq!(report.per_stream.primary.to_string(), "2.736 Mbps");
        assert_eq!(report.per_stream.alt, "2736 Kbps");
        assert_eq!(report.total_label, "Total (1 stream)");
        assert_eq!(report.total.primary.to_string(), "2.736 Mbps");
        assert_eq!(report.packet_rate, "1,000 pkt/s");
        assert_eq!(report.samples_per_packet, "48 per ch");
        assert_eq!(report.payload_size, "288 B");
        assert_eq!(report.packet_size, "342 B");
    }

    #[test]
    fn test_hundred_stream_report() {
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(2, 48_000, 24, 0.001, 100)).unwrap();

        assert_eq!(report.total_label, "Total (100 streams)");
        assert_eq!(report.total.primary.to_string(), "273.600 Mbps");
        assert_eq!(report.total.alt, "273600 Kbps");
        assert_eq!(report.per_stream.primary.to_string(), "2.736 Mbps");
    }

    #[test]
    fn test_total_label_groups_thousands() {
        assert_eq!(total_label(1), "Total (1 stream)");
        assert_eq!(total_label(2), "Total (2 streams)");
        assert_eq!(total_label(10_000), "Total (10,000 streams)");
    }

    #[test]
    fn test_large_payload_uses_binary_units() {
        // 256 ch * 192 samples * 4 bytes = 196608 bytes
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(256, 192_000, 32, 0.001, 1)).unwrap();
        assert_eq!(report.payload_size, "192.00 KB");
    }

    #[test]
    fn test_low_bandwidth_has_no_alt() {
        // 1 ch * 1 sample * 1 byte + 54 header, 10 pkt/s
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(1, 10, 8, 0.1, 1)).unwrap();
        assert_eq!(report.per_stream.primary.to_string(), "4.40 Kbps");
        assert!(report.per_stream.alt.is_empty());
    }

    #[test]
    fn test_text_rendering_lists_every_target() {
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(2, 48_000, 24, 0.001, 100)).unwrap();
        let text = report.to_string();

        assert!(text.contains("Per stream:"));
        assert!(text.contains("2.736 Mbps (2736 Kbps)"));
        assert!(text.contains("Total (100 streams):"));
        assert!(text.contains("1,000 pkt/s"));
        assert!(text.contains("48 per ch"));
        assert!(text.contains("288 B"));
        assert!(text.contains("342 B"));
    }

    #[test]
    fn test_json_rendering() {
        let report = BandwidthReport::from_inputs(CalculatorInputs::new(2, 48_000, 24, 0.001, 1)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["per_stream"]["primary"]["value"], "2.736");
        assert_eq!(json["per_stream"]["primary"]["unit"], "Mbps");
        assert_eq!(json["metrics"]["packet_bytes"], 342.0);
        assert_eq!(json["inputs"]["channels"], 2);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_eight_channel_preset_sizes() {
        use crate::calculator::presets::{builtin_presets, find_preset};

        let presets = builtin_presets();
        let preset = find_preset(&presets, "8 ch").unwrap();
        let report = BandwidthReport::from_inputs(preset.inputs()).unwrap();

        // 8 ch * 48 samples * 3 bytes = 1152 bytes, exactly 1.125 KB
        assert_eq!(report.metrics.payload_bytes, 1152.0);
        assert_eq!(report.payload_size, "1.13 KB");
        assert_eq!(report.packet_size, "1.18 KB");
        // 1206 bytes * 8 * 1000
        assert_eq!(report.per_stream.primary.to_string(), "9.648 Mbps");
        assert_eq!(report.per_stream.alt, "9648 Kbps");
    }
}
