//! Activity measurement
//!
//! Samples the routed source and sums every step up into a rising accumulator and
//! every step down into a falling one. The score is the smaller of the two: a live
//! signal swings both ways, while drift, a ramp or a stuck input only moves one way
//! and scores close to nothing.
//!
//! # Measurement window
//! ```text
//! select Left ─ settle ─ s0 ─ wait ─ s1 ─ wait ─ ... ─ sN-1 ─ wait
//! select Right ─ settle ─ s0 ─ wait ─ ...                     (Pair only)
//! score = min(rising, falling)
//! ```
//! The previous-sample reference restarts on each sub-channel; the accumulators do not.
//! A single sample under the validity floor ends the measurement with a zero score.

use core::ops::Add;

use crate::config::{MeterConfig, SubChannels};
use crate::platform::{Frontend, Sample, SubChannel};

/// How much a window of samples moved in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityScore(u32);

impl ActivityScore {
    /// No detectable variation, or an unreadable source
    pub const ZERO: ActivityScore = ActivityScore(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// True when this score reaches `threshold`
    pub fn is_active(self, threshold: ActivityScore) -> bool {
        self >= threshold
    }
}

impl Add<u32> for ActivityScore {
    type Output = ActivityScore;

    fn add(self, rhs: u32) -> ActivityScore {
        ActivityScore(self.0.saturating_add(rhs))
    }
}

/// Rising and falling energy of one measurement
#[derive(Default)]
struct Energy {
    rising: ActivityScore,
    falling: ActivityScore,
}

impl Energy {
    fn record(&mut self, previous: Sample, current: Sample) {
        if current > previous {
            self.rising = self.rising + u32::from(current - previous);
        } else if current < previous {
            self.falling = self.falling + u32::from(previous - current);
        }
    }

    fn score(&self) -> ActivityScore {
        self.rising.min(self.falling)
    }
}

/// Turns a window of samples into an [`ActivityScore`]
#[derive(Debug, Clone, Copy)]
pub struct ActivityMeter {
    config: MeterConfig,
}

impl ActivityMeter {
    pub const fn new(config: MeterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Measures the source currently routed to the sampler.
    ///
    /// Leaves the left sub-channel selected.
    pub fn measure<F: Frontend>(&self, frontend: &mut F) -> ActivityScore {
        let mut energy = Energy::default();

        let valid = match self.config.sub_channels {
            SubChannels::Single => self.accumulate(frontend, SubChannel::Left, &mut energy),
            SubChannels::Pair => {
                self.accumulate(frontend, SubChannel::Left, &mut energy)
                    && self.accumulate(frontend, SubChannel::Right, &mut energy)
            }
        };

        if self.config.sub_channels == SubChannels::Pair {
            frontend.select_sub_channel(SubChannel::Left);
        }

        if !valid {
            return ActivityScore::ZERO;
        }
        energy.score()
    }

    /// Samples one sub-channel into `energy`. Returns false once a reading falls
    /// under the validity floor.
    fn accumulate<F: Frontend>(
        &self,
        frontend: &mut F,
        sub_channel: SubChannel,
        energy: &mut Energy,
    ) -> bool {
        frontend.select_sub_channel(sub_channel);
        frontend.wait(self.config.settle);

        let mut previous: Option<Sample> = None;
        for _ in 0..self.config.sample_count {
            let current = frontend.read_sample();
            if current < self.config.min_valid_reading {
                trace!("reading {} below floor, window rejected", current);
                return false;
            }
            if let Some(previous) = previous {
                energy.record(previous, current);
            }
            previous = Some(current);
            frontend.wait(self.config.sample_interval);
        }
        true
    }
}
