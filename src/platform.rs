//! Hardware capabilities
//!
//! The control path never touches registers. Everything it needs from the board
//! is expressed by four small traits:
//! - [`SourceSelect`]: route a numbered input (and one of its sub-channels) to the sampler
//! - [`Sampler`]: read one sample from whatever is currently routed
//! - [`Wait`]: busy-wait for a fixed duration
//! - [`Outputs`]: drive the transmitter enable and the status indicator
//!
//! The firmware implements all four on one type; tests use a simulated board.

use embassy_time::Duration;

/// One reading from the sampler (0-1023 with the default tuning)
pub type Sample = u16;

/// Identifies one selectable analog input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceId(u8);

impl SourceId {
    /// Source selected after power-up (all select lines low)
    pub const FIRST: SourceId = SourceId(0);

    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// One of the two signals sharing a source selection, e.g. a stereo pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubChannel {
    Left,
    Right,
}

/// Input routing
pub trait SourceSelect {
    /// Routes `source` to the sampler.
    ///
    /// Selecting the source that is already routed must have no side effect.
    fn select_source(&mut self, source: SourceId);

    /// Chooses which sub-channel of the routed source the next samples come from
    fn select_sub_channel(&mut self, sub_channel: SubChannel);
}

/// Blocking sampler
pub trait Sampler {
    /// Triggers a conversion, waits for it and returns the reading
    fn read_sample(&mut self) -> Sample;
}

/// Busy-wait delay
pub trait Wait {
    fn wait(&mut self, duration: Duration);
}

/// Boolean outputs
pub trait Outputs {
    /// Powers the transmitter on or off
    fn set_actuator(&mut self, on: bool);

    /// Drives the status light
    fn set_status_indicator(&mut self, on: bool);
}

/// Everything the activity meter needs
pub trait Frontend: SourceSelect + Sampler + Wait {}

impl<T: SourceSelect + Sampler + Wait> Frontend for T {}

/// Everything the hold controller needs
pub trait Board: Frontend + Outputs {}

impl<T: Frontend + Outputs> Board for T {}
