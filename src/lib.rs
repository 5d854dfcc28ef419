//! # aoip-bandwidth
//!
//! Network bandwidth calculator for audio-over-IP streams (AES67, Dante,
//! RAVENNA and similar RTP-based transports).
//!
//! Given a channel count, sample rate, bit depth, packet time and stream
//! count, the calculator derives samples per packet, payload and packet size
//! (with 54 bytes of Ethernet/IPv4/UDP/RTP overhead), packet rate, and
//! per-stream and total wire bandwidth.

pub mod calculator;
pub mod cli;
pub mod config;
pub mod dashboard;
