//! Best-of-N source selection
//!
//! Measures every source in increasing order and keeps the first strict maximum.
//! The scan runs inside a [`PreservedSelection`](crate::mux::PreservedSelection), so
//! whatever was routed before the scan is routed again afterwards.

use crate::config::ScanConfig;
use crate::meter::{ActivityMeter, ActivityScore};
use crate::mux::SourceMux;
use crate::platform::{Frontend, SourceId};

/// Outcome of one pass over all sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult {
    /// Source with the highest score, `None` if nothing scored above zero
    pub source: Option<SourceId>,
    /// Highest score seen
    pub score: ActivityScore,
}

impl ScanResult {
    pub const NONE: ScanResult = ScanResult {
        source: None,
        score: ActivityScore::ZERO,
    };

    /// The winning source, if its score reaches `threshold`
    pub fn winner(&self, threshold: ActivityScore) -> Option<SourceId> {
        self.source.filter(|_| self.score.is_active(threshold))
    }
}

/// Drives the activity meter across all sources
#[derive(Debug, Clone, Copy)]
pub struct ChannelScanner {
    config: ScanConfig,
}

impl ChannelScanner {
    pub const fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn source_count(&self) -> u8 {
        self.config.source_count
    }

    /// Measures sources `0..source_count` and returns the best one
    pub fn scan<F: Frontend>(&self, mux: &mut SourceMux<F>, meter: &ActivityMeter) -> ScanResult {
        let mut mux = mux.preserve();
        let mut best = ScanResult::NONE;

        for index in 0..self.config.source_count {
            let source = SourceId::new(index);
            mux.select(source);
            let score = meter.measure(mux.port_mut());
            trace!("source {} scored {}", index, score.value());

            if score > best.score {
                best = ScanResult {
                    source: Some(source),
                    score,
                };
            }
        }

        best
    }
}
