//! Address bus register, one per address byte.

use sim_core::{Component, Latch, Phase, Ports};

/// Drives one byte of the external address bus.
///
/// Transparent during phi1 while `i_load` is high, so the address
/// computed for the cycle propagates to the pads; frozen through phi2 so
/// the address stays stable while data transfers.
#[derive(Debug)]
pub struct AddressBusRegister {
    phase: Phase,
    latch: Latch,
    /// Address byte to drive.
    pub i_data: u8,
    /// Load line.
    pub i_load: bool,
}

impl AddressBusRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::transparent(Phase::Phi1, 0x00),
            i_data: 0,
            i_load: false,
        }
    }

    /// The byte currently driven onto the address bus.
    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.latch.byte()
    }
}

impl Default for AddressBusRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AddressBusRegister {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.latch.reset();
    }

    fn settle(&mut self) {
        self.latch
            .settle(self.phase, self.i_load, u16::from(self.i_data));
    }

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.latch
            .clock(self.phase, self.i_load, u16::from(self.i_data));
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for AddressBusRegister {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "address"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "address" => Some(u64::from(self.byte())),
            _ => None,
        }
    }
}
