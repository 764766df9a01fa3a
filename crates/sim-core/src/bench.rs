//! Test bench driving a component and recording its ports.

use crate::{Component, Phase, Ports, Trace};

/// Drives a [`Component`] half-cycle by half-cycle while recording every
/// observable port into a [`Trace`].
///
/// Each [`step`](TestBench::step) is one half-cycle: run the wiring
/// callback (if any) so combinational inputs reflect the current
/// outputs, settle, sample all ports, then advance the clock by one
/// phase. Sampling happens before the phase toggles, so step `k` of the
/// trace shows the state that was stable during the `k`-th half-cycle.
pub struct TestBench<C> {
    /// The component under test, exposed for direct pin access.
    pub core: C,
    /// Everything recorded since the last [`reset`](TestBench::reset).
    pub trace: Trace,
    on_settle: Option<Box<dyn FnMut(&mut C)>>,
}

impl<C: Component + Ports> TestBench<C> {
    #[must_use]
    pub fn new(core: C) -> Self {
        Self {
            core,
            trace: Trace::new(),
            on_settle: None,
        }
    }

    /// Install combinational wiring evaluated before every settle, e.g.
    /// a memory model answering the address bus, or feedback routing
    /// between two pins.
    pub fn on_settle(&mut self, callback: impl FnMut(&mut C) + 'static) {
        self.on_settle = Some(Box::new(callback));
    }

    fn wire_and_settle(&mut self) {
        if let Some(callback) = &mut self.on_settle {
            callback(&mut self.core);
        }
        self.core.settle();
    }

    /// Reset the component, settle, and discard any recorded trace.
    /// Afterwards the clock sits in phi1 with the reset state visible.
    pub fn reset(&mut self) {
        self.core.reset();
        self.wire_and_settle();
        self.trace.clear();
    }

    /// One half-cycle: wire, settle, sample, advance.
    pub fn step(&mut self) {
        self.wire_and_settle();
        for &name in self.core.port_names() {
            if let Some(value) = self.core.read_port(name) {
                self.trace.record(name, value);
            }
        }
        self.core.advance_phase();
    }

    /// One full clock period (two half-cycles).
    pub fn tick(&mut self) {
        self.step();
        self.step();
    }

    /// `count` full clock periods.
    pub fn tick_n(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// The phase the next step will sample in.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.core.phase()
    }

    /// Panic with a rendered diff unless the recorded trace matches
    /// `expected` on every port `expected` names.
    #[track_caller]
    pub fn assert_trace(&self, expected: &Trace) {
        if let Some(diff) = self.trace.diff(expected) {
            panic!("trace mismatch: {diff}");
        }
    }
}
