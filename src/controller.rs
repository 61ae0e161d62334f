//! Scan / hold state machine
//!
//! Keeps the transmitter powered while the committed source stays active.
//!
//! # Phases
//! - Scanning: every pass measures all sources. The best one is committed once its
//!   score reaches the activity threshold; until then the status light blinks slowly.
//! - Holding: only the committed source is measured. Active checks add credit up to a
//!   ceiling, quiet checks take credit away, and the source is released the moment
//!   its credit runs out.
//!
//! ```text
//!            best < threshold                     active: credit += inc (<= ceiling)
//!              ┌──────────┐                        ┌──────────┐
//!              v          │   best >= threshold    v          │
//!          ┌──────────┐───┘ ─────────────────> ┌──────────┐───┘
//!          │ Scanning │                         │ Holding  │
//!          └──────────┘ <───────────────────────└──────────┘───┐
//!                           credit reaches 0       ^          │
//!                                                  └──────────┘
//!                                                quiet: credit -= dec
//! ```
//!
//! A short lull is absorbed by banked credit; sustained silence drains it. The
//! ceiling keeps a long burst from masking an equally long silence afterwards.

use crate::config::{Config, HoldConfig};
use crate::meter::{ActivityMeter, ActivityScore};
use crate::mux::SourceMux;
use crate::platform::{Board, SourceId};
use crate::scanner::{ChannelScanner, ScanResult};

/// Remaining trust in the committed source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Credit(u16);

impl Credit {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    /// Adds `increment`, never exceeding `ceiling`
    pub fn reinforce(self, increment: u16, ceiling: u16) -> Self {
        Self(self.0.saturating_add(increment).min(ceiling))
    }

    /// Removes `decrement`, never going below zero
    pub fn decay(self, decrement: u16) -> Self {
        Self(self.0.saturating_sub(decrement))
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Looking for an active source
    Scanning,
    /// Committed to `source` until `credit` runs out
    Holding { source: SourceId, credit: Credit },
}

/// What a single [`HoldController::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Scanned, nothing reached the threshold
    Idle(ScanResult),
    /// Scanned and committed to a source
    Committed { source: SourceId, score: ActivityScore },
    /// Committed source was active
    Reinforced { credit: Credit, score: ActivityScore },
    /// Committed source was quiet but still has credit
    Decayed { credit: Credit, score: ActivityScore },
    /// Credit ran out, transmitter released
    Released { source: SourceId },
}

/// Slow blink shown while scanning
#[derive(Debug, Clone, Copy)]
struct Heartbeat {
    passes: u16,
    period: u16,
}

impl Heartbeat {
    const fn new(period: u16) -> Self {
        Self { passes: 0, period }
    }

    /// Counts a scan pass and returns the light level for it
    fn beat(&mut self) -> bool {
        self.passes = self.passes.wrapping_add(1);
        (self.passes / self.period) % 2 == 0
    }
}

/// Top-level control loop state
///
/// Owns the board, the current selection and the credit. At most one source is
/// committed at a time: the committed source only exists inside [`Phase::Holding`].
pub struct HoldController<B: Board> {
    mux: SourceMux<B>,
    meter: ActivityMeter,
    scanner: ChannelScanner,
    config: HoldConfig,
    phase: Phase,
    heartbeat: Heartbeat,
}

impl<B: Board> HoldController<B> {
    /// Takes over the board with the transmitter off and the first source routed
    pub fn new(mut board: B, config: &Config) -> Self {
        debug_assert!(config.check().is_ok());
        board.set_actuator(false);
        board.set_status_indicator(false);
        Self {
            mux: SourceMux::new(board, SourceId::FIRST),
            meter: ActivityMeter::new(config.meter),
            scanner: ChannelScanner::new(config.scan),
            config: config.hold,
            phase: Phase::Scanning,
            heartbeat: Heartbeat::new(config.hold.heartbeat_passes),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Committed source, if any
    pub fn committed(&self) -> Option<SourceId> {
        match self.phase {
            Phase::Scanning => None,
            Phase::Holding { source, .. } => Some(source),
        }
    }

    /// Credit left for the committed source, zero while scanning
    pub fn credit(&self) -> Credit {
        match self.phase {
            Phase::Scanning => Credit::new(0),
            Phase::Holding { credit, .. } => credit,
        }
    }

    /// Source currently routed to the sampler
    pub fn selected(&self) -> SourceId {
        self.mux.selected()
    }

    pub fn board(&self) -> &B {
        self.mux.port()
    }

    pub fn board_mut(&mut self) -> &mut B {
        self.mux.port_mut()
    }

    /// Runs the control loop forever
    pub fn run(&mut self) -> ! {
        info!(
            "scanning {} sources, threshold {}",
            self.scanner.source_count(),
            self.config.activity_threshold.value()
        );
        loop {
            self.step();
        }
    }

    /// Runs one scan pass or one hold check
    pub fn step(&mut self) -> Step {
        match self.phase {
            Phase::Scanning => self.scan_pass(),
            Phase::Holding { source, credit } => self.hold_check(source, credit),
        }
    }

    fn scan_pass(&mut self) -> Step {
        let result = self.scanner.scan(&mut self.mux, &self.meter);

        let level = self.heartbeat.beat();
        self.mux.port_mut().set_status_indicator(level);

        let Some(source) = result.winner(self.config.activity_threshold) else {
            debug!("scan best {} at {}", result.source, result.score.value());
            return Step::Idle(result);
        };

        self.mux.select(source);
        let credit = Credit::new(self.config.initial_credit);
        self.phase = Phase::Holding { source, credit };
        self.mux.port_mut().set_actuator(true);

        info!(
            "committed to source {} (score {}), transmitter on",
            source.index(),
            result.score.value()
        );
        Step::Committed {
            source,
            score: result.score,
        }
    }

    fn hold_check(&mut self, source: SourceId, credit: Credit) -> Step {
        let port = self.mux.port_mut();
        if self.config.dwell.as_ticks() > 0 {
            port.wait(self.config.dwell);
        }

        // strobe: the light only comes back on if this check is active
        port.set_status_indicator(false);
        let score = self.meter.measure(port);

        if score.is_active(self.config.activity_threshold) {
            let credit = credit.reinforce(self.config.credit_increment, self.config.credit_ceiling);
            port.set_status_indicator(true);
            self.phase = Phase::Holding { source, credit };
            trace!("source {} active, credit {}", source.index(), credit.value());
            return Step::Reinforced { credit, score };
        }

        let credit = credit.decay(self.config.credit_decrement);
        if !credit.is_exhausted() {
            self.phase = Phase::Holding { source, credit };
            trace!("source {} quiet, credit {}", source.index(), credit.value());
            return Step::Decayed { credit, score };
        }

        port.set_actuator(false);
        self.phase = Phase::Scanning;
        info!("source {} went quiet, transmitter off", source.index());
        Step::Released { source }
    }
}
