//! Program counter byte (PCL or PCH).

use sim_core::{Component, Edge, Latch, Phase, Ports};

/// One half of the program counter.
///
/// Each cycle the byte selects its source: the address bus input when
/// `i_ad_pc` is high, otherwise its own held value when `i_pc_pc` is
/// high. `i_inc` adds one to the selected source. The result is latched
/// at the end of phi2; with neither select asserted the byte holds.
///
/// The carry-out is combinational: asserted whenever increment is
/// selected and the selected source reads 0xFF, independent of the
/// clock. The high byte wires its `i_inc` to the low byte's carry.
#[derive(Debug)]
pub struct PcByte {
    phase: Phase,
    latch: Latch,
    /// Address bus input.
    pub i_ad: u8,
    /// Select the address bus input.
    pub i_ad_pc: bool,
    /// Select the held value.
    pub i_pc_pc: bool,
    /// Add one to the selected source.
    pub i_inc: bool,
}

impl PcByte {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::edge(Edge::Falling, 0x00),
            i_ad: 0,
            i_ad_pc: false,
            i_pc_pc: false,
            i_inc: false,
        }
    }

    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.latch.byte()
    }

    /// Source selected for this cycle. The address bus select wins if
    /// both are asserted.
    const fn selected(&self) -> u8 {
        if self.i_ad_pc { self.i_ad } else { self.byte() }
    }

    /// Combinational carry-out of the increment.
    #[must_use]
    pub const fn carry(&self) -> bool {
        self.i_inc && self.selected() == 0xFF
    }

    fn next(&self) -> u8 {
        self.selected().wrapping_add(u8::from(self.i_inc))
    }
}

impl Default for PcByte {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PcByte {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.latch.reset();
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        let load = self.i_ad_pc || self.i_pc_pc;
        let next = u16::from(self.next());
        self.latch.clock(self.phase, load, next);
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for PcByte {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "pc", "pclc"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "pc" => Some(u64::from(self.byte())),
            "pclc" => Some(u64::from(self.carry())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loaded_with(value: u8) -> PcByte {
        let mut pc = PcByte::new();
        pc.i_ad = value;
        pc.i_ad_pc = true;
        pc.tick();
        pc.i_ad_pc = false;
        pc
    }

    #[test]
    fn loads_from_address_bus_at_end_of_phi2() {
        let mut pc = PcByte::new();
        pc.i_ad = 0x12;
        pc.i_ad_pc = true;
        pc.advance_phase();
        assert_eq!(pc.byte(), 0x00, "rising edge must not load");
        pc.advance_phase();
        assert_eq!(pc.byte(), 0x12);
    }

    #[test]
    fn holds_with_no_select() {
        let mut pc = loaded_with(0x34);
        pc.i_ad = 0x99;
        pc.tick_n(3);
        assert_eq!(pc.byte(), 0x34);
    }

    #[test]
    fn increments_held_value() {
        let mut pc = loaded_with(0x10);
        pc.i_pc_pc = true;
        pc.i_inc = true;
        pc.tick();
        assert_eq!(pc.byte(), 0x11);
        pc.tick();
        assert_eq!(pc.byte(), 0x12);
    }

    #[test]
    fn carry_is_combinational() {
        let mut pc = loaded_with(0xFF);
        assert!(!pc.carry(), "no carry without increment");
        pc.i_pc_pc = true;
        pc.i_inc = true;
        assert!(pc.carry(), "asserted before any clock edge");
        pc.tick();
        assert_eq!(pc.byte(), 0x00);
        assert!(!pc.carry());
    }

    proptest! {
        #[test]
        fn increment_wraps_and_carries_only_at_ff(value: u8) {
            let mut low = loaded_with(value);
            let mut high = loaded_with(0x80);

            low.i_pc_pc = true;
            low.i_inc = true;
            let carry = low.carry();
            prop_assert_eq!(carry, value == 0xFF);

            high.i_pc_pc = true;
            high.i_inc = carry;
            low.tick();
            high.tick();

            prop_assert_eq!(low.byte(), value.wrapping_add(1));
            let expected_high = if carry { 0x81 } else { 0x80 };
            prop_assert_eq!(high.byte(), expected_high);
        }
    }
}
