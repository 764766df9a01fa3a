//! General-purpose datapath register (AC, X, Y, S).

use sim_core::{Component, Latch, Phase, Ports};

/// Follower register with no phase restriction.
///
/// While `i_load` is high the output tracks the internal bus input;
/// the value present when `i_load` drops is held indefinitely.
#[derive(Debug)]
pub struct Register {
    phase: Phase,
    latch: Latch,
    /// Internal bus input.
    pub i_data: u8,
    /// Load line.
    pub i_load: bool,
}

impl Register {
    #[must_use]
    pub const fn new(reset_value: u8) -> Self {
        Self {
            phase: Phase::Phi1,
            latch: Latch::follower(reset_value),
            i_data: 0,
            i_load: false,
        }
    }

    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.latch.byte()
    }
}

impl Component for Register {
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

impl Ports for Register {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "value"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "value" => Some(u64::from(self.byte())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_input_while_loaded() {
        let mut register = Register::new(0xFF);
        assert_eq!(register.byte(), 0xFF);

        register.i_load = true;
        register.i_data = 0x10;
        register.settle();
        assert_eq!(register.byte(), 0x10);

        register.advance_phase();
        register.i_data = 0x11;
        register.settle();
        assert_eq!(register.byte(), 0x11, "phase does not gate a follower");
    }

    #[test]
    fn freezes_when_load_drops() {
        let mut register = Register::new(0xFF);
        register.i_load = true;
        register.i_data = 0x22;
        register.settle();

        register.i_load = false;
        register.i_data = 0x99;
        register.settle();
        register.tick();
        assert_eq!(register.byte(), 0x22);
    }
}
