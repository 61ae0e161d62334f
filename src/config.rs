//! Build-time tuning
//!
//! Every constant the control loop depends on lives in one of three groups:
//! - [`MeterConfig`]: sampling window, validity floor and settling times
//! - [`ScanConfig`]: how many sources are wired to the multiplexer
//! - [`HoldConfig`]: activity threshold and credit arithmetic
//!
//! The defaults are tuned for a 10-bit sampler. Firmware builds pick their own
//! [`Config`] and verify it with [`Config::check`] in a `const` context, so a
//! nonsensical combination fails the build instead of misbehaving in the field.

use embassy_time::Duration;

use crate::meter::ActivityScore;
use crate::platform::Sample;

/// How many sub-channels each source carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubChannels {
    /// One signal per source, read from the left sub-channel
    Single,
    /// Left and right are measured back to back into one score
    Pair,
}

/// Activity meter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterConfig {
    /// Samples taken per sub-channel
    pub sample_count: u16,
    /// Any sample below this abandons the measurement with a zero score
    pub min_valid_reading: Sample,
    /// Wait after a selection change before the first sample
    pub settle: Duration,
    /// Wait after every sample
    pub sample_interval: Duration,
    /// Sub-channel layout of the sources
    pub sub_channels: SubChannels,
}

impl MeterConfig {
    pub const fn default() -> Self {
        Self {
            sample_count: 40,
            min_valid_reading: 300,
            settle: Duration::from_micros(400),
            sample_interval: Duration::from_micros(40),
            sub_channels: SubChannels::Pair,
        }
    }
}

/// Channel scanner tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Sources are numbered `0..source_count`
    pub source_count: u8,
}

impl ScanConfig {
    pub const fn default() -> Self {
        Self { source_count: 4 }
    }
}

/// Hold controller tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldConfig {
    /// Scores at or above this count as active
    pub activity_threshold: ActivityScore,
    /// Credit granted to a freshly committed source
    pub initial_credit: u16,
    /// Credit added per active check
    pub credit_increment: u16,
    /// Credit removed per quiet check
    pub credit_decrement: u16,
    /// Credit never exceeds this
    pub credit_ceiling: u16,
    /// Scan passes between heartbeat level changes
    pub heartbeat_passes: u16,
    /// Optional pause between hold checks
    pub dwell: Duration,
}

impl HoldConfig {
    pub const fn default() -> Self {
        Self {
            activity_threshold: ActivityScore::new(128),
            initial_credit: 20,
            credit_increment: 2,
            credit_decrement: 1,
            credit_ceiling: 512,
            heartbeat_passes: 8,
            dwell: Duration::from_ticks(0),
        }
    }
}

/// Complete tuning for one build
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub meter: MeterConfig,
    pub scan: ScanConfig,
    pub hold: HoldConfig,
}

impl Config {
    pub const fn default() -> Self {
        Self {
            meter: MeterConfig::default(),
            scan: ScanConfig::default(),
            hold: HoldConfig::default(),
        }
    }

    /// Rejects combinations the control loop cannot work with
    pub const fn check(&self) -> Result<(), ConfigError> {
        if self.meter.sample_count < 2 {
            return Err(ConfigError::SampleWindowTooShort);
        }
        if self.scan.source_count == 0 {
            return Err(ConfigError::NoSources);
        }
        if self.hold.initial_credit == 0 {
            return Err(ConfigError::NoInitialCredit);
        }
        if self.hold.initial_credit > self.hold.credit_ceiling {
            return Err(ConfigError::InitialCreditAboveCeiling);
        }
        if self.hold.credit_increment == 0 || self.hold.credit_decrement == 0 {
            return Err(ConfigError::ZeroCreditStep);
        }
        if self.hold.heartbeat_passes == 0 {
            return Err(ConfigError::ZeroHeartbeat);
        }
        Ok(())
    }
}

/// Default tuning for a 10-bit sampler and four stereo sources
pub const DEFAULT_CONFIG: Config = Config::default();

/// Reasons a [`Config`] is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Fewer than two samples cannot show any variation
    SampleWindowTooShort,
    /// Nothing to scan
    NoSources,
    /// A committed source would be released before its first check
    NoInitialCredit,
    /// The ceiling must bound the starting credit too
    InitialCreditAboveCeiling,
    /// Credit must move on every hold check
    ZeroCreditStep,
    /// The heartbeat needs a non-zero period
    ZeroHeartbeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(DEFAULT_CONFIG.check(), Ok(()));
        assert_eq!(DEFAULT_CONFIG.meter.sample_count, 40);
        assert_eq!(DEFAULT_CONFIG.meter.min_valid_reading, 300);
        assert_eq!(DEFAULT_CONFIG.hold.activity_threshold, ActivityScore::new(128));
        assert_eq!(DEFAULT_CONFIG.hold.initial_credit, 20);
        assert_eq!(DEFAULT_CONFIG.hold.credit_increment, 2);
        assert_eq!(DEFAULT_CONFIG.hold.credit_decrement, 1);
        assert_eq!(DEFAULT_CONFIG.hold.credit_ceiling, 512);
    }

    #[test]
    fn rejects_broken_tuning() {
        let mut config = Config::default();
        config.meter.sample_count = 1;
        assert_eq!(config.check(), Err(ConfigError::SampleWindowTooShort));

        let mut config = Config::default();
        config.scan.source_count = 0;
        assert_eq!(config.check(), Err(ConfigError::NoSources));

        let mut config = Config::default();
        config.hold.initial_credit = 0;
        assert_eq!(config.check(), Err(ConfigError::NoInitialCredit));

        let mut config = Config::default();
        config.hold.initial_credit = 600;
        assert_eq!(config.check(), Err(ConfigError::InitialCreditAboveCeiling));

        let mut config = Config::default();
        config.hold.credit_decrement = 0;
        assert_eq!(config.check(), Err(ConfigError::ZeroCreditStep));

        let mut config = Config::default();
        config.hold.heartbeat_passes = 0;
        assert_eq!(config.check(), Err(ConfigError::ZeroHeartbeat));
    }

    #[test]
    fn check_runs_at_compile_time() {
        const CHECKED: bool = DEFAULT_CONFIG.check().is_ok();
        assert!(CHECKED);
    }
}
