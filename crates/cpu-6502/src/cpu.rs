//! Minimal 6502 core.
//!
//! Composes the datapath registers into a core that runs the reset
//! sequence, the immediate-mode loads, `NOP` and `BRK` with
//! hardware-accurate half-cycle timing. Decode for everything else is
//! out of scope; unknown opcodes execute as two-cycle no-ops.

use sim_core::{Component, ConfigError, Phase, Ports};
use tracing::trace;

use crate::{
    AddressBusRegister, DataLatch, DataOutputRegister, InstructionRegister, PcByte,
    ProcessorStatus, Register, Routing, Tcu, flag,
};

/// Opcodes the core decodes.
pub mod opcode {
    /// Force interrupt.
    pub const BRK: u8 = 0x00;
    /// Load Y, immediate.
    pub const LDY_IMM: u8 = 0xA0;
    /// Load X, immediate.
    pub const LDX_IMM: u8 = 0xA2;
    /// Load accumulator, immediate.
    pub const LDA_IMM: u8 = 0xA9;
    /// No operation.
    pub const NOP: u8 = 0xEA;
}

/// The composed datapath.
///
/// External pins: `i_data` in, address, data out, R/W and SYNC out.
/// Drive it with a [`sim_core::TestBench`] and a memory callback
/// answering reads during phi2.
#[derive(Debug)]
pub struct Cpu6502 {
    phase: Phase,
    resetting: bool,
    rw: bool,
    tcu: Tcu,
    ir: InstructionRegister,
    pcl: PcByte,
    pch: PcByte,
    abl: AddressBusRegister,
    abh: AddressBusRegister,
    dl: DataLatch,
    dor: DataOutputRegister,
    routing: Routing,
    ac: Register,
    x: Register,
    y: Register,
    s: Register,
    p: ProcessorStatus,
    /// External data bus input.
    pub i_data: u8,
}

impl Cpu6502 {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            phase: Phase::Phi1,
            resetting: true,
            rw: true,
            tcu: Tcu::new(Tcu::DEFAULT_WIDTH)?,
            ir: InstructionRegister::new(),
            pcl: PcByte::new(),
            pch: PcByte::new(),
            abl: AddressBusRegister::new(),
            abh: AddressBusRegister::new(),
            dl: DataLatch::new(),
            dor: DataOutputRegister::new(),
            routing: Routing::new(),
            ac: Register::new(0xFF),
            x: Register::new(0xFF),
            y: Register::new(0xFF),
            s: Register::new(0xFF),
            p: ProcessorStatus::new(),
            i_data: 0,
        })
    }

    /// The address driven for the current cycle.
    #[must_use]
    pub const fn o_address(&self) -> u16 {
        (self.abh.byte() as u16) << 8 | self.abl.byte() as u16
    }

    /// Cycle direction, high for read.
    #[must_use]
    pub const fn o_rw(&self) -> bool {
        self.rw
    }

    /// High through every opcode fetch cycle.
    #[must_use]
    pub fn o_sync(&self) -> bool {
        self.tcu.sync()
    }

    /// The byte driven onto the data bus, or `None` while hi-Z.
    #[must_use]
    pub const fn o_data(&self) -> Option<u8> {
        self.dor.data()
    }

    #[must_use]
    pub const fn ac(&self) -> u8 {
        self.ac.byte()
    }

    #[must_use]
    pub const fn x(&self) -> u8 {
        self.x.byte()
    }

    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y.byte()
    }

    #[must_use]
    pub const fn s(&self) -> u8 {
        self.s.byte()
    }

    #[must_use]
    pub const fn p(&self) -> u8 {
        self.p.value()
    }

    #[must_use]
    pub const fn pc(&self) -> u16 {
        (self.pch.byte() as u16) << 8 | self.pcl.byte() as u16
    }

    #[must_use]
    pub const fn ir(&self) -> u8 {
        self.ir.opcode()
    }

    /// True while the seven-cycle reset or `BRK` sequence is running.
    const fn interrupt_sequence(&self) -> bool {
        self.resetting || self.ir.opcode() == opcode::BRK
    }

    const fn last_state(&self) -> u16 {
        if self.interrupt_sequence() { 6 } else { 1 }
    }

    fn next_state(&self) -> u16 {
        let t = self.tcu.value();
        if t >= self.last_state() { 0 } else { t + 1 }
    }

    const fn operand_fetch_increments_pc(&self) -> bool {
        matches!(
            self.ir.opcode(),
            opcode::BRK | opcode::LDA_IMM | opcode::LDX_IMM | opcode::LDY_IMM
        )
    }

    /// Address, direction and write data for the current cycle.
    fn drive_cycle(&mut self) {
        let t = self.tcu.value();
        let s = self.s.byte();

        self.routing.clear();
        self.routing.i_dl = self.dl.byte();
        self.routing.i_pcl = self.pcl.byte();
        self.routing.i_pch = self.pch.byte();

        let vector = if self.resetting { 0xFC } else { 0xFE };
        let (adl, adh) = if self.interrupt_sequence() && t >= 2 {
            match t {
                2 | 3 | 4 => (s.wrapping_sub((t - 2) as u8), 0x01),
                5 => (vector, 0xFF),
                _ => (vector.wrapping_add(1), 0xFF),
            }
        } else {
            self.routing.pcl_adl = true;
            self.routing.pch_adh = true;
            (self.routing.adl(), self.routing.adh())
        };

        let write =
            !self.resetting && self.ir.opcode() == opcode::BRK && (2..=4).contains(&t);
        self.rw = !write;

        self.abl.i_data = adl;
        self.abl.i_load = true;
        self.abh.i_data = adh;
        self.abh.i_load = true;

        self.dor.i_rw = self.rw;
        self.dor.i_data = match t {
            2 => self.pch.byte(),
            3 => self.pcl.byte(),
            _ => self.p.value() | flag::B | flag::U,
        };
    }

    /// End-of-cycle register transfers, decided while the cycle's last
    /// read is still on the bus.
    fn prepare_falling_edge(&mut self) {
        let t = self.tcu.value();
        let data = self.dl.byte();
        let interrupt = self.interrupt_sequence();

        self.routing.clear();
        self.routing.i_dl = data;

        if self.ir.i_ce && self.next_state() == 1 {
            trace!(opcode = format_args!("{data:#04X}"), pc = self.pc(), "opcode fetch");
        }
        self.ir.i_data = data;

        let inc = match t {
            0 => true,
            1 => !self.resetting && self.operand_fetch_increments_pc(),
            _ => false,
        };
        if interrupt && t == 5 {
            self.routing.dl_adl = true;
            self.pcl.i_ad = self.routing.adl();
            self.pcl.i_ad_pc = true;
        } else if inc {
            self.pcl.i_pc_pc = true;
            self.pcl.i_inc = true;
        }
        if interrupt && t == 6 {
            self.routing.dl_adh = true;
            self.pch.i_ad = self.routing.adh();
            self.pch.i_ad_pc = true;
        } else {
            self.pch.i_pc_pc = self.pcl.i_pc_pc;
            self.pch.i_inc = self.pcl.carry();
        }

        if !self.resetting && t == 1 {
            let op = self.ir.opcode();
            if matches!(op, opcode::LDA_IMM | opcode::LDX_IMM | opcode::LDY_IMM) {
                self.routing.dl_db = true;
                let db = self.routing.db();
                let register = match op {
                    opcode::LDA_IMM => &mut self.ac,
                    opcode::LDX_IMM => &mut self.x,
                    _ => &mut self.y,
                };
                register.i_data = db;
                register.i_load = true;
                self.p.i_db = db;
                self.p.i_db7_n = true;
                self.p.i_dbz_z = true;
            }
        }

        if interrupt && t == 5 {
            self.s.i_data = self.s.byte().wrapping_sub(3);
            self.s.i_load = true;
        }
        if !self.resetting && self.ir.opcode() == opcode::BRK && t == 6 {
            self.p.i_set_i = true;
        }
    }

    /// Release the one-shot load and select lines asserted for the edge.
    fn finish_falling_edge(&mut self) {
        self.release_edge_lines();
        if self.resetting && self.tcu.value() == 0 {
            self.resetting = false;
        }
    }

    fn release_edge_lines(&mut self) {
        self.pcl.i_ad_pc = false;
        self.pcl.i_pc_pc = false;
        self.pcl.i_inc = false;
        self.pch.i_ad_pc = false;
        self.pch.i_pc_pc = false;
        self.pch.i_inc = false;
        self.ac.i_load = false;
        self.x.i_load = false;
        self.y.i_load = false;
        self.s.i_load = false;
        self.p.i_db7_n = false;
        self.p.i_dbz_z = false;
        self.p.i_set_i = false;
    }
}

impl Component for Cpu6502 {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.resetting = true;
        self.rw = true;
        self.tcu.reset();
        self.ir.reset();
        self.pcl.reset();
        self.pch.reset();
        self.abl.reset();
        self.abh.reset();
        self.dl.reset();
        self.dor.reset();
        self.routing.clear();
        self.ac.reset();
        self.x.reset();
        self.y.reset();
        self.s.reset();
        self.p.reset();
        self.release_edge_lines();
        self.settle();
    }

    fn settle(&mut self) {
        self.dl.i_data = self.i_data;
        self.tcu.i_next = self.next_state();
        self.ir.i_next_t = self.tcu.i_next;
        self.ir.i_ce = !self.resetting;
        self.drive_cycle();

        self.abl.settle();
        self.abh.settle();
        self.dl.settle();
        self.ac.settle();
        self.x.settle();
        self.y.settle();
        self.s.settle();
        self.p.settle();
    }

    fn advance_phase(&mut self) {
        if self.phase == Phase::Phi2 {
            self.prepare_falling_edge();
        }
        self.phase = self.phase.other();

        self.abl.advance_phase();
        self.abh.advance_phase();
        self.dl.advance_phase();
        self.dor.advance_phase();
        self.ir.advance_phase();
        self.pcl.advance_phase();
        self.pch.advance_phase();
        self.ac.advance_phase();
        self.x.advance_phase();
        self.y.advance_phase();
        self.s.advance_phase();
        self.p.advance_phase();
        self.tcu.advance_phase();

        if self.phase == Phase::Phi1 {
            self.finish_falling_edge();
        }
        self.settle();
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for Cpu6502 {
    fn port_names(&self) -> &'static [&'static str] {
        &[
            "clk", "rw", "sync", "address", "ir", "tcu", "ac", "x", "y", "s", "p",
        ]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "rw" => Some(u64::from(self.rw)),
            "sync" => Some(u64::from(self.o_sync())),
            "address" => Some(u64::from(self.o_address())),
            "ir" => Some(u64::from(self.ir.opcode())),
            "tcu" => Some(u64::from(self.tcu.value())),
            "ac" => Some(u64::from(self.ac.byte())),
            "x" => Some(u64::from(self.x.byte())),
            "y" => Some(u64::from(self.y.byte())),
            "s" => Some(u64::from(self.s.byte())),
            "p" => Some(u64::from(self.p.value())),
            _ => None,
        }
    }
}
