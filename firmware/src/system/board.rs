//! Analog front end
//!
//! Implements the control-loop capabilities on the RP2350:
//! - Source selection drives S0-S3 of both multiplexers with the binary source index
//! - Sub-channel selection picks the left or right ADC input
//! - Samples are blocking ADC conversions, scaled to 10 bits
//! - Waits spin on the time driver
//!
//! A failed conversion reads as zero, which is below any sensible validity floor,
//! so the meter treats the source as silent.

use activity_hold::{Outputs, Sample, Sampler, SourceId, SourceSelect, SubChannel, Wait};
use defmt::warn;
use embassy_rp::adc::{Adc, Blocking, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_time::{block_for, Duration};

use crate::system::resources::{FrontEndResources, OutputResources};
use crate::system::tuning::SAMPLE_SHIFT;

/// Multiplexed stereo inputs plus the two digital outputs
pub struct AnalogBoard {
    adc: Adc<'static, Blocking>,
    left: Channel<'static>,
    right: Channel<'static>,
    sub_channel: SubChannel,
    select_lines: [Output<'static>; 4],
    transmitter: Output<'static>,
    status_led: Output<'static>,
}

impl AnalogBoard {
    /// Brings every output low: source 0 routed, transmitter off, light off
    pub fn new(front_end: FrontEndResources, outputs: OutputResources) -> Self {
        Self {
            adc: Adc::new_blocking(front_end.adc, AdcConfig::default()),
            left: Channel::new_pin(front_end.left_pin, Pull::None),
            right: Channel::new_pin(front_end.right_pin, Pull::None),
            sub_channel: SubChannel::Left,
            select_lines: [
                Output::new(front_end.select_s0, Level::Low),
                Output::new(front_end.select_s1, Level::Low),
                Output::new(front_end.select_s2, Level::Low),
                Output::new(front_end.select_s3, Level::Low),
            ],
            transmitter: Output::new(outputs.transmitter_pin, Level::Low),
            status_led: Output::new(outputs.status_led_pin, Level::Low),
        }
    }
}

impl SourceSelect for AnalogBoard {
    fn select_source(&mut self, source: SourceId) {
        let index = source.index();
        for (bit, line) in self.select_lines.iter_mut().enumerate() {
            line.set_level(Level::from((index >> bit) & 1 == 1));
        }
    }

    fn select_sub_channel(&mut self, sub_channel: SubChannel) {
        self.sub_channel = sub_channel;
    }
}

impl Sampler for AnalogBoard {
    fn read_sample(&mut self) -> Sample {
        let channel = match self.sub_channel {
            SubChannel::Left => &mut self.left,
            SubChannel::Right => &mut self.right,
        };
        match self.adc.blocking_read(channel) {
            Ok(raw) => raw >> SAMPLE_SHIFT,
            Err(_) => {
                warn!("ADC conversion failed on {}", self.sub_channel);
                0
            }
        }
    }
}

impl Wait for AnalogBoard {
    fn wait(&mut self, duration: Duration) {
        block_for(duration);
    }
}

impl Outputs for AnalogBoard {
    fn set_actuator(&mut self, on: bool) {
        self.transmitter.set_level(Level::from(on));
    }

    fn set_status_indicator(&mut self, on: bool) {
        self.status_led.set_level(Level::from(on));
    }
}
