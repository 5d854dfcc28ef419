use aoip_bandwidth::calculator::{
    builtin_presets, clamp_field, compute_metrics, find_preset, format_bandwidth, format_bytes,
    sanitize_positive_int, BandwidthReport, CalculatorInputs, RawFields, HEADER_BYTES,
};

/// End-to-end checks of the public calculator API
/// These follow the path a front end takes: raw fields in, display strings out

fn fields(channels: &str, sample_rate: &str, bit_depth: &str, packet_time: &str, streams: &str) -> RawFields {
    RawFields {
        channels: channels.to_string(),
        sample_rate: sample_rate.to_string(),
        bit_depth: bit_depth.to_string(),
        packet_time: packet_time.to_string(),
        streams: streams.to_string(),
    }
}

#[test]
fn test_stereo_48k_single_stream_from_fields() {
    let inputs = CalculatorInputs::from_fields(&fields("2", "48000", "24", "0.001", "1")).unwrap();
    let report = BandwidthReport::from_inputs(inputs).unwrap();

    assert_eq!(report.metrics.samples_per_packet, 48);
    assert_eq!(report.metrics.payload_bytes, 288.0);
    assert_eq!(report.metrics.packet_bytes, 342.0);
    assert_eq!(report.metrics.packet_rate, 1000.0);
    assert_eq!(report.metrics.per_stream_bps, 2_736_000.0);

    assert_eq!(report.per_stream.primary.to_string(), "2.736 Mbps");
    assert_eq!(report.total_label, "Total (1 stream)");
    assert_eq!(report.packet_rate, "1,000 pkt/s");
    assert_eq!(report.samples_per_packet, "48 per ch");
    assert_eq!(report.payload_size, "288 B");
    assert_eq!(report.packet_size, "342 B");
}

#[test]
fn test_hundred_streams_scale_total_only() {
    let inputs = CalculatorInputs::from_fields(&fields("2", "48000", "24", "0.001", "100")).unwrap();
    let report = BandwidthReport::from_inputs(inputs).unwrap();

    assert_eq!(report.metrics.total_bps, 273_600_000.0);
    assert_eq!(report.total.primary.to_string(), "273.600 Mbps");
    assert_eq!(report.total_label, "Total (100 streams)");
    assert_eq!(report.per_stream.primary.to_string(), "2.736 Mbps");
}

#[test]
fn test_out_of_range_counts_are_clamped_before_calculation() {
    let inputs = CalculatorInputs::from_fields(&fields("257", "48000", "24", "0.001", "20000")).unwrap();
    assert_eq!(inputs.channels, 256);
    assert_eq!(inputs.streams, 10_000);
    assert!(compute_metrics(inputs).is_ok());

    let inputs = CalculatorInputs::from_fields(&fields("0", "48000", "24", "0.001", "x")).unwrap();
    assert_eq!(inputs.channels, 1);
    assert_eq!(inputs.streams, 1);
}

#[test]
fn test_count_rules_are_symmetric() {
    assert_eq!(clamp_field("256", 256), 256);
    assert_eq!(clamp_field("257", 256), 256);
    assert_eq!(clamp_field("10000", 10_000), 10_000);
    assert_eq!(clamp_field("10001", 10_000), 10_000);

    assert_eq!(sanitize_positive_int("256", 256), None);
    assert_eq!(sanitize_positive_int("257", 256).as_deref(), Some("256"));
    assert_eq!(sanitize_positive_int("10000", 10_000), None);
    assert_eq!(sanitize_positive_int("10001", 10_000).as_deref(), Some("10000"));
}

#[test]
fn test_preset_reproduces_direct_entry() {
    let presets = builtin_presets();
    let preset = find_preset(&presets, "64 ch").unwrap();

    let from_preset = BandwidthReport::from_inputs(preset.inputs()).unwrap();
    let direct = CalculatorInputs::from_fields(&fields("64", "48000", "24", "0.001", "1")).unwrap();
    let from_fields = BandwidthReport::from_inputs(direct).unwrap();

    assert_eq!(from_preset.metrics, from_fields.metrics);
    assert_eq!(from_preset.per_stream, from_fields.per_stream);
    assert_eq!(from_preset.payload_size, from_fields.payload_size);
    // 64 ch * 48 samples * 3 bytes
    assert_eq!(from_preset.metrics.payload_bytes, 9_216.0);
    assert_eq!(from_preset.payload_size, "9.00 KB");
}

#[test]
fn test_gigabit_boundary_is_inclusive() {
    assert_eq!(format_bandwidth(1_000_000_000.0).unit, "Gbps");
    assert_eq!(format_bandwidth(999_999_999.0).unit, "Mbps");
}

#[test]
fn test_header_overhead_on_every_packet() {
    for preset in builtin_presets() {
        let metrics = compute_metrics(preset.inputs()).unwrap();
        assert_eq!(metrics.packet_bytes - metrics.payload_bytes, HEADER_BYTES, "{}", preset.label);
    }
}

#[test]
fn test_format_bytes_below_kilobyte() {
    assert_eq!(format_bytes(288.0), "288 B");
    assert_eq!(format_bytes(1_000.0), "1,000 B");
}

#[test]
fn test_invalid_inputs_surface_errors() {
    let inputs = CalculatorInputs::from_fields(&fields("2", "48000", "24", "0", "1")).unwrap();
    let err = BandwidthReport::from_inputs(inputs).unwrap_err();
    assert_eq!(err.field(), Some("packet_time"));

    let inputs = CalculatorInputs::from_fields(&fields("2", "0", "24", "0.001", "1")).unwrap();
    let err = BandwidthReport::from_inputs(inputs).unwrap_err();
    assert_eq!(err.field(), Some("sample_rate"));
}

#[test]
fn test_eight_channel_payload_rounds_tie_up() {
    let presets = builtin_presets();
    let report = BandwidthReport::from_inputs(find_preset(&presets, "8 ch").unwrap().inputs()).unwrap();
    assert_eq!(report.payload_size, "1.13 KB");
}
