//! The uniform simulation contract every component exposes.

use crate::Phase;

/// A simulated hardware component.
///
/// Components own their pins as public fields (`i_*` inputs, outputs via
/// getters) plus the current clock phase. A full clock cycle is: settle
/// during phi1, advance to phi2, settle during phi2, advance back to
/// phi1. State-holding elements update only on the transitions; `settle`
/// is free to call any number of times.
///
/// There is no independent scheduling: the caller drives phase
/// transitions and every component recomputes in lockstep.
pub trait Component {
    /// Force the component (and its sub-components) to the documented
    /// reset state. Idempotent; overrides every other input.
    fn reset(&mut self);

    /// Recompute combinational outputs from the current inputs without
    /// crossing a clock edge.
    fn settle(&mut self);

    /// Toggle the clock phase by one half-cycle, apply edge and
    /// phase-freeze updates, then settle.
    fn advance_phase(&mut self);

    /// The currently active phase.
    fn phase(&self) -> Phase;

    /// One full clock period.
    fn tick(&mut self) {
        self.advance_phase();
        self.advance_phase();
    }

    /// `count` full clock periods.
    fn tick_n(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }
}
