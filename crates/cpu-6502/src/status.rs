//! Processor status register.

use sim_core::{Component, Latch, Phase, Ports};

/// Status flag bit positions.
pub mod flag {
    /// Negative.
    pub const N: u8 = 0x80;
    /// Overflow.
    pub const V: u8 = 0x40;
    /// Unused, reads as set when pushed.
    pub const U: u8 = 0x20;
    /// Break, set in the pushed copy for `BRK`.
    pub const B: u8 = 0x10;
    /// Decimal mode.
    pub const D: u8 = 0x08;
    /// Interrupt disable.
    pub const I: u8 = 0x04;
    /// Zero.
    pub const Z: u8 = 0x02;
    /// Carry.
    pub const C: u8 = 0x01;
}

/// Flag register, a follower latch with per-flag update masks.
///
/// Each control line makes its flag track the data bus condition for as
/// long as the line is asserted; dropping every line freezes the byte.
/// `i_db7_n` routes DB bit 7 into N, `i_dbz_z` sets Z when the bus reads
/// zero, `i_set_i` forces the interrupt disable bit.
#[derive(Debug)]
pub struct ProcessorStatus {
    phase: Phase,
    flags: Latch,
    /// Internal data bus input.
    pub i_db: u8,
    /// N follows DB bit 7.
    pub i_db7_n: bool,
    /// Z follows (DB == 0).
    pub i_dbz_z: bool,
    /// Set the interrupt disable flag.
    pub i_set_i: bool,
}

impl ProcessorStatus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            flags: Latch::follower(0x00),
            i_db: 0,
            i_db7_n: false,
            i_dbz_z: false,
            i_set_i: false,
        }
    }

    /// The packed flag byte.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.flags.byte()
    }

    fn apply(&mut self) {
        let mut next = self.flags.byte();
        if self.i_db7_n {
            if self.i_db & 0x80 != 0 {
                next |= flag::N;
            } else {
                next &= !flag::N;
            }
        }
        if self.i_dbz_z {
            if self.i_db == 0 {
                next |= flag::Z;
            } else {
                next &= !flag::Z;
            }
        }
        if self.i_set_i {
            next |= flag::I;
        }
        let load = self.i_db7_n || self.i_dbz_z || self.i_set_i;
        self.flags.settle(self.phase, load, u16::from(next));
    }
}

impl Default for ProcessorStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProcessorStatus {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.flags.reset();
    }

    fn settle(&mut self) {
        self.apply();
    }

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.apply();
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for ProcessorStatus {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "p"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "p" => Some(u64::from(self.flags.byte())),
            _ => None,
        }
    }
}
