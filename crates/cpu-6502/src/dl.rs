//! Input data latch, in both of its silicon renditions.

use sim_core::{Component, Edge, Latch, Phase, Ports};

/// Transparent input data latch.
///
/// Follows the external data bus through phi2 (while the clock enable is
/// high) and freezes at the phi2-to-phi1 transition, holding the byte
/// read during the previous cycle for the datapath to consume.
#[derive(Debug)]
pub struct DataLatch {
    phase: Phase,
    latch: Latch,
    /// External data bus input.
    pub i_data: u8,
    /// Clock enable.
    pub i_ce: bool,
}

impl DataLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::transparent(Phase::Phi2, 0x00),
            i_data: 0,
            i_ce: true,
        }
    }

    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.latch.byte()
    }
}

impl Default for DataLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DataLatch {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.latch.reset();
    }

    fn settle(&mut self) {
        self.latch
            .settle(self.phase, self.i_ce, u16::from(self.i_data));
    }

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.latch
            .clock(self.phase, self.i_ce, u16::from(self.i_data));
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for DataLatch {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "dl"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "dl" => Some(u64::from(self.byte())),
            _ => None,
        }
    }
}

/// Edge-capturing variant of the input latch.
///
/// Samples the data bus exactly at the phi1-to-phi2 transition and
/// ignores everything between edges. Used where a stage needs the bus
/// value from the start of phi2 rather than its end.
#[derive(Debug)]
pub struct DataRegister {
    phase: Phase,
    latch: Latch,
    /// External data bus input.
    pub i_data: u8,
    /// Clock enable.
    pub i_ce: bool,
}

impl DataRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::edge(Edge::Rising, 0x00),
            i_data: 0,
            i_ce: true,
        }
    }

    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.latch.byte()
    }
}

impl Default for DataRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DataRegister {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.latch.reset();
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.latch
            .clock(self.phase, self.i_ce, u16::from(self.i_data));
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for DataRegister {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "dr"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "dr" => Some(u64::from(self.byte())),
            _ => None,
        }
    }
}
