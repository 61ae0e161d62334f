//! Hardware Resource Management
//!
//! Allocates the pins and peripherals of the board to the control loop.
//!
//! # Resource Groups
//! - Front end: ADC, the left/right analog inputs shared by all sources and the
//!   four multiplexer select lines
//! - Outputs: transmitter power switch and status light
//!
//! Pinout of the analog board:
//! ```text
//! GPIO0-3  S0-S3 on both multiplexers (binary source index)
//! GPIO6    transmitter power (also drives the "signal found" light)
//! GPIO7    status light
//! GPIO26   left channel, common pin of the left multiplexer
//! GPIO27   right channel, common pin of the right multiplexer
//! ```

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// ADC, analog inputs and multiplexer select lines
    front_end: FrontEndResources {
        adc: ADC,
        left_pin: PIN_26,
        right_pin: PIN_27,
        select_s0: PIN_0,
        select_s1: PIN_1,
        select_s2: PIN_2,
        select_s3: PIN_3,
    },
    /// Digital outputs
    outputs: OutputResources {
        transmitter_pin: PIN_6,
        status_led_pin: PIN_7,
    },
}
