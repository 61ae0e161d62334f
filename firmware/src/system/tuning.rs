//! Build-time tuning for this board
//!
//! The RP2350 ADC converts in about 2 µs, far quicker than the multiplexers settle,
//! so the settling wait dominates a measurement. Samples are scaled to 10 bits
//! before they reach the meter, which keeps the default thresholds meaningful.

use activity_hold::{Config, MeterConfig};
use embassy_time::Duration;

/// Right shift turning 12-bit conversions into 10-bit samples
pub const SAMPLE_SHIFT: u32 = 2;

/// Sources addressable with four select lines
pub const MAX_SOURCES: u8 = 16;

pub const TUNING: Config = Config {
    meter: MeterConfig {
        settle: Duration::from_micros(200),
        sample_interval: Duration::from_micros(20),
        ..MeterConfig::default()
    },
    ..Config::default()
};

const _: () = assert!(TUNING.check().is_ok(), "invalid tuning");
const _: () = assert!(
    TUNING.scan.source_count <= MAX_SOURCES,
    "more sources than select lines can address"
);
