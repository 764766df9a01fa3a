//! Instruction register.

use sim_core::{Component, Edge, Latch, Phase, Ports};

/// Holds the opcode of the instruction in flight.
///
/// Loads from the data bus at the phi2-to-phi1 transition, but only when
/// the sequencer's next state is T1 (an opcode fetch is completing) and
/// `i_ce` is high. At every other falling edge the opcode is held, so a
/// multi-cycle instruction keeps decoding from the same value. Resets to
/// 0x00 (`BRK`), the safe idle opcode.
#[derive(Debug)]
pub struct InstructionRegister {
    phase: Phase,
    opcode: Latch,
    /// Data bus input.
    pub i_data: u8,
    /// The sequencer's next timing state.
    pub i_next_t: u16,
    /// Clock enable; fetches are suppressed while low.
    pub i_ce: bool,
}

impl InstructionRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            opcode: Latch::edge(Edge::Falling, 0x00),
            i_data: 0,
            i_next_t: 0,
            i_ce: true,
        }
    }

    /// The opcode currently being executed.
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        self.opcode.byte()
    }
}

impl Default for InstructionRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InstructionRegister {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.opcode.reset();
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        let fetching = self.i_ce && self.i_next_t == 1;
        self.opcode
            .clock(self.phase, fetching, u16::from(self.i_data));
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for InstructionRegister {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "ir"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "ir" => Some(u64::from(self.opcode())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resets_to_brk() {
        let mut ir = InstructionRegister::new();
        ir.i_data = 0xA9;
        ir.i_next_t = 1;
        ir.tick();
        assert_eq!(ir.opcode(), 0xA9);
        ir.reset();
        assert_eq!(ir.opcode(), 0x00);
    }

    #[test]
    fn loads_only_when_fetch_completes() {
        let mut ir = InstructionRegister::new();
        ir.i_data = 0xEA;
        ir.i_next_t = 2;
        ir.tick_n(3);
        assert_eq!(ir.opcode(), 0x00, "no fetch marker, opcode held");

        ir.i_next_t = 1;
        ir.advance_phase();
        assert_eq!(ir.opcode(), 0x00, "rising edge must not load");
        ir.advance_phase();
        assert_eq!(ir.opcode(), 0xEA);
    }

    #[test]
    fn holds_across_held_cycles() {
        let mut ir = InstructionRegister::new();
        ir.i_data = 0xA2;
        ir.i_next_t = 1;
        ir.tick();

        // Changing data without a fetch marker never disturbs the opcode.
        for step in 0..16 {
            ir.i_data = step;
            ir.i_next_t = 4;
            ir.tick();
            assert_eq!(ir.opcode(), 0xA2);
        }
    }

    #[test]
    fn clock_enable_suppresses_fetch() {
        let mut ir = InstructionRegister::new();
        ir.i_data = 0xA9;
        ir.i_next_t = 1;
        ir.i_ce = false;
        ir.tick();
        assert_eq!(ir.opcode(), 0x00);
    }
}
