//! Source selection tracking
//!
//! The select lines are write-only, so the current selection is remembered here.
//! [`SourceMux::preserve`] returns a guard that puts the saved selection back when
//! it goes out of scope, whichever way the scope is left.

use core::ops::{Deref, DerefMut};

use crate::platform::{SourceId, SourceSelect};

/// Board wrapper that knows which source is routed to the sampler
pub struct SourceMux<P> {
    port: P,
    selected: SourceId,
}

impl<P: SourceSelect> SourceMux<P> {
    /// Takes ownership of the board and routes `initial` so both sides agree
    pub fn new(mut port: P, initial: SourceId) -> Self {
        port.select_source(initial);
        Self {
            port,
            selected: initial,
        }
    }

    /// Currently routed source
    pub fn selected(&self) -> SourceId {
        self.selected
    }

    /// Routes `source`, skipping the board call if it is already routed
    pub fn select(&mut self, source: SourceId) {
        if source != self.selected {
            self.port.select_source(source);
            self.selected = source;
        }
    }

    /// Saves the current selection and restores it when the guard drops
    pub fn preserve(&mut self) -> PreservedSelection<'_, P> {
        let saved = self.selected;
        PreservedSelection { mux: self, saved }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

/// Scoped selection: restores the source that was routed on creation
pub struct PreservedSelection<'a, P: SourceSelect> {
    mux: &'a mut SourceMux<P>,
    saved: SourceId,
}

impl<P: SourceSelect> PreservedSelection<'_, P> {
    /// Source that will be routed again on drop
    pub fn saved(&self) -> SourceId {
        self.saved
    }
}

impl<P: SourceSelect> Deref for PreservedSelection<'_, P> {
    type Target = SourceMux<P>;

    fn deref(&self) -> &Self::Target {
        self.mux
    }
}

impl<P: SourceSelect> DerefMut for PreservedSelection<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.mux
    }
}

impl<P: SourceSelect> Drop for PreservedSelection<'_, P> {
    fn drop(&mut self) {
        self.mux.select(self.saved);
    }
}
