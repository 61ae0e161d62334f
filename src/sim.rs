//! Simulated board for host tests
//!
//! Every source carries one scripted [`Pattern`] per sub-channel. The sample cursor
//! restarts on every selection change, so each measurement window sees the pattern
//! from its first sample. All side effects are logged for assertions.

use embassy_time::Duration;

use crate::platform::{Outputs, Sample, Sampler, SourceId, SourceSelect, SubChannel, Wait};

/// Scripted input signal, indexed by sample position in the window
#[derive(Debug, Clone)]
pub enum Pattern {
    Flat(Sample),
    Ramp { start: Sample, step: i16 },
    Square { low: Sample, high: Sample, high_first: bool },
    /// One spike of `height` on the second sample; scores exactly `height`
    Pulse { base: Sample, height: Sample },
    /// Explicit samples, the last one repeats
    Samples(Vec<Sample>),
}

impl Pattern {
    /// Pulse on a mid-scale base
    pub fn pulse(height: Sample) -> Self {
        Pattern::Pulse { base: 500, height }
    }

    fn sample(&self, position: usize) -> Sample {
        match self {
            Pattern::Flat(value) => *value,
            Pattern::Ramp { start, step } => {
                let value = i64::from(*start) + i64::from(*step) * position as i64;
                value.clamp(0, i64::from(Sample::MAX)) as Sample
            }
            Pattern::Square { low, high, high_first } => {
                if (position % 2 == 0) == *high_first {
                    *high
                } else {
                    *low
                }
            }
            Pattern::Pulse { base, height } => {
                if position == 1 {
                    base.saturating_add(*height)
                } else {
                    *base
                }
            }
            Pattern::Samples(samples) => samples
                .get(position)
                .or(samples.last())
                .copied()
                .unwrap_or(0),
        }
    }
}

pub struct SimBoard {
    patterns: Vec<[Pattern; 2]>,
    source: SourceId,
    sub_channel: SubChannel,
    cursor: usize,
    reads: usize,
    selections: Vec<SourceId>,
    sub_channels: Vec<SubChannel>,
    waits: Vec<Duration>,
    actuator: bool,
    actuator_writes: Vec<bool>,
    indicator_writes: Vec<bool>,
}

impl SimBoard {
    /// `count` sources, all flat at mid-scale
    pub fn new(count: u8) -> Self {
        Self {
            patterns: (0..count)
                .map(|_| [Pattern::Flat(512), Pattern::Flat(512)])
                .collect(),
            source: SourceId::FIRST,
            sub_channel: SubChannel::Left,
            cursor: 0,
            reads: 0,
            selections: Vec::new(),
            sub_channels: Vec::new(),
            waits: Vec::new(),
            actuator: false,
            actuator_writes: Vec::new(),
            indicator_writes: Vec::new(),
        }
    }

    /// Same pattern on both sub-channels
    pub fn set_pattern(&mut self, source: SourceId, pattern: Pattern) {
        let slot = &mut self.patterns[usize::from(source.index())];
        slot[0] = pattern.clone();
        slot[1] = pattern;
    }

    pub fn set_pattern_on(&mut self, source: SourceId, sub_channel: SubChannel, pattern: Pattern) {
        let slot = &mut self.patterns[usize::from(source.index())];
        slot[sub_index(sub_channel)] = pattern;
    }

    /// Forgets every logged side effect
    pub fn clear_log(&mut self) {
        self.reads = 0;
        self.selections.clear();
        self.sub_channels.clear();
        self.waits.clear();
        self.actuator_writes.clear();
        self.indicator_writes.clear();
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn selections(&self) -> &[SourceId] {
        &self.selections
    }

    pub fn sub_channel(&self) -> SubChannel {
        self.sub_channel
    }

    pub fn sub_channels(&self) -> &[SubChannel] {
        &self.sub_channels
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn actuator(&self) -> bool {
        self.actuator
    }

    pub fn actuator_writes(&self) -> &[bool] {
        &self.actuator_writes
    }

    pub fn indicator(&self) -> Option<bool> {
        self.indicator_writes.last().copied()
    }

    pub fn indicator_writes(&self) -> &[bool] {
        &self.indicator_writes
    }
}

fn sub_index(sub_channel: SubChannel) -> usize {
    match sub_channel {
        SubChannel::Left => 0,
        SubChannel::Right => 1,
    }
}

impl SourceSelect for SimBoard {
    fn select_source(&mut self, source: SourceId) {
        self.selections.push(source);
        self.source = source;
        self.cursor = 0;
    }

    fn select_sub_channel(&mut self, sub_channel: SubChannel) {
        self.sub_channels.push(sub_channel);
        self.sub_channel = sub_channel;
        self.cursor = 0;
    }
}

impl Sampler for SimBoard {
    fn read_sample(&mut self) -> Sample {
        self.reads += 1;
        let position = self.cursor;
        self.cursor += 1;
        // an unwired input reads as ground
        self.patterns
            .get(usize::from(self.source.index()))
            .map_or(0, |slot| slot[sub_index(self.sub_channel)].sample(position))
    }
}

impl Wait for SimBoard {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

impl Outputs for SimBoard {
    fn set_actuator(&mut self, on: bool) {
        self.actuator = on;
        self.actuator_writes.push(on);
    }

    fn set_status_indicator(&mut self, on: bool) {
        self.indicator_writes.push(on);
    }
}
