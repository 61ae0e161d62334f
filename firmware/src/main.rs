//! Transmitter hold firmware entry point
//!
//! Brings up the RP2350 and spawns the control loop.

#![no_std]
#![no_main]

use crate::task::hold_transmitter::hold_transmitter;
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{AssignedResources, FrontEndResources, OutputResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Board support
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups
    let r = split_resources!(p);

    info!("Activity hold starting");
    spawner.spawn(hold_transmitter(r.front_end, r.outputs)).unwrap();
}
