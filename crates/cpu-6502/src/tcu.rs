//! Timing control unit: the per-instruction cycle sequencer.

use sim_core::{Component, ConfigError, Latch, LatchKind, Phase, Ports};

/// Timing state register.
///
/// Holds the cycle number (T0, T1, ...) of the instruction in flight.
/// The decoder supplies the next state on `i_next`; the register samples
/// it at each phi2-to-phi1 transition while `i_ce` is high and never
/// increments on its own. `sync` is asserted through every T0 cycle,
/// marking an opcode fetch on the external bus.
#[derive(Debug)]
pub struct Tcu {
    phase: Phase,
    state: Latch,
    /// Next timing state, computed externally each cycle.
    pub i_next: u16,
    /// Clock enable; the sequencer holds its state while low.
    pub i_ce: bool,
}

impl Tcu {
    /// State width used by the full datapath; T0..T6 needs three bits,
    /// one spare matches the hardware layout.
    pub const DEFAULT_WIDTH: u8 = 4;

    /// Sequencer with a `width`-bit state register.
    pub fn new(width: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            phase: Phase::Phi1,
            state: Latch::new(LatchKind::Counter, width, 0)?,
            i_next: 0,
            i_ce: true,
        })
    }

    /// Current timing state.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.state.value()
    }

    /// High through every T0 cycle.
    #[must_use]
    pub fn sync(&self) -> bool {
        self.state.value() == 0
    }
}

impl Component for Tcu {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.state.reset();
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.state.clock(self.phase, self.i_ce, self.i_next);
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for Tcu {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "tcu", "sync"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "tcu" => Some(u64::from(self.value())),
            "sync" => Some(u64::from(self.sync())),
            _ => None,
        }
    }
}
