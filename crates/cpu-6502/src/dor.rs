//! Data output register.

use sim_core::{Component, Edge, Latch, Phase, Ports};

/// Drives the external data bus during write cycles.
///
/// At each phi1-to-phi2 transition the register captures the byte to
/// write when the cycle direction is write, and begins driving the bus;
/// on read cycles the output goes hi-Z. The bus is only ever driven
/// during phi2, so a read in the following cycle never collides.
#[derive(Debug)]
pub struct DataOutputRegister {
    phase: Phase,
    latch: Latch,
    driving: bool,
    /// Byte to present on the next write cycle.
    pub i_data: u8,
    /// Cycle direction, high for read.
    pub i_rw: bool,
}

impl DataOutputRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::edge(Edge::Rising, 0x00),
            driving: false,
            i_data: 0,
            i_rw: true,
        }
    }

    /// The byte driven onto the data bus, or `None` while hi-Z.
    #[must_use]
    pub const fn data(&self) -> Option<u8> {
        if self.driving && matches!(self.phase, Phase::Phi2) {
            Some(self.latch.byte())
        } else {
            None
        }
    }
}

impl Default for DataOutputRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DataOutputRegister {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.latch.reset();
        self.driving = false;
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        if self.phase == Phase::Phi2 {
            self.driving = !self.i_rw;
        }
        self.latch
            .clock(self.phase, !self.i_rw, u16::from(self.i_data));
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for DataOutputRegister {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "data", "drive"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "data" => Some(u64::from(self.latch.byte())),
            "drive" => Some(u64::from(self.data().is_some())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hi_z_after_reset() {
        let mut dor = DataOutputRegister::new();
        dor.reset();
        assert_eq!(dor.data(), None);
    }

    #[test]
    fn drives_only_during_phi2_of_write_cycles() {
        let mut dor = DataOutputRegister::new();
        dor.i_rw = false;
        dor.i_data = 0x5A;

        dor.advance_phase();
        assert_eq!(dor.data(), Some(0x5A));

        dor.advance_phase();
        assert_eq!(dor.data(), None, "hi-Z during phi1");
    }

    #[test]
    fn read_cycle_releases_the_bus() {
        let mut dor = DataOutputRegister::new();
        dor.i_rw = false;
        dor.i_data = 0x5A;
        dor.tick();

        dor.i_rw = true;
        dor.i_data = 0x99;
        dor.advance_phase();
        assert_eq!(dor.data(), None);
    }

    #[test]
    fn reset_clears_value_and_disables_output() {
        let mut dor = DataOutputRegister::new();
        dor.i_rw = false;
        dor.i_data = 0x5A;
        dor.advance_phase();
        dor.reset();
        assert_eq!(dor.data(), None);
        dor.i_rw = true;
        dor.advance_phase();
        assert_eq!(dor.data(), None);
    }
}
