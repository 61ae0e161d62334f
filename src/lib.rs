//! Channel activity detection with hold-while-active hysteresis
//!
//! Scans a set of multiplexed analog sources, commits to the one carrying the
//! liveliest signal and keeps a transmitter powered until that source goes quiet.
//!
//! # Components
//! - [`meter`]: turns a window of samples into an activity score
//! - [`scanner`]: measures every source and reports the best one
//! - [`controller`]: the scan / hold state machine driving the transmitter
//!
//! Hardware is reached only through the capability traits in [`platform`], so the
//! whole control path runs unchanged against the firmware board or a simulated one.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod meter;
pub mod mux;
pub mod platform;
pub mod scanner;

#[cfg(test)]
mod sim;

pub use config::{
    Config, ConfigError, HoldConfig, MeterConfig, ScanConfig, SubChannels, DEFAULT_CONFIG,
};
pub use controller::{Credit, HoldController, Phase, Step};
pub use meter::{ActivityMeter, ActivityScore};
pub use mux::{PreservedSelection, SourceMux};
pub use platform::{
    Board, Frontend, Outputs, Sample, Sampler, SourceId, SourceSelect, SubChannel, Wait,
};
pub use scanner::{ChannelScanner, ScanResult};
