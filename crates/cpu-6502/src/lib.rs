//! Cycle-accurate 6502 datapath.
//!
//! Each register of the datapath is its own component with pin-level
//! inputs, built on the phase-gated latch primitive. [`Cpu6502`]
//! composes them into a minimal core able to run the reset sequence,
//! immediate-mode loads, `NOP` and `BRK` with hardware-accurate
//! half-cycle timing.

mod abr;
mod cpu;
mod dl;
mod dor;
mod ir;
mod pc;
mod register;
mod routing;
mod status;
mod tcu;

pub use abr::AddressBusRegister;
pub use cpu::{Cpu6502, opcode};
pub use dl::{DataLatch, DataRegister};
pub use dor::DataOutputRegister;
pub use ir::InstructionRegister;
pub use pc::PcByte;
pub use register::Register;
pub use routing::Routing;
pub use status::{ProcessorStatus, flag};
pub use tcu::Tcu;
