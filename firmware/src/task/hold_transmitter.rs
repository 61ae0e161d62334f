//! Transmitter hold task
//!
//! Runs the scan / hold control loop on the analog board. The loop busy-waits
//! between samples and never yields, so it is the only task on the executor.

use activity_hold::HoldController;
use defmt::info;

use crate::system::board::AnalogBoard;
use crate::system::resources::{FrontEndResources, OutputResources};
use crate::system::tuning::TUNING;

#[embassy_executor::task]
pub async fn hold_transmitter(front_end: FrontEndResources, outputs: OutputResources) {
    let board = AnalogBoard::new(front_end, outputs);
    let mut controller = HoldController::new(board, &TUNING);

    info!(
        "{} samples per sub-channel, floor {}, credit {} (+{}/-{}, max {})",
        TUNING.meter.sample_count,
        TUNING.meter.min_valid_reading,
        TUNING.hold.initial_credit,
        TUNING.hold.credit_increment,
        TUNING.hold.credit_decrement,
        TUNING.hold.credit_ceiling
    );

    controller.run()
}
