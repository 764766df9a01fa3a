//! Bus fabric: shared memory, arbitration and address decoding.
//!
//! A single SRAM stands behind a multi-port [`MemoryController`];
//! requesters see their own data pins and never each other's traffic.
//! The address decoders are purely combinational, one per clock domain.

mod controller;
mod cpu_map;
mod ppu_map;
mod sram;

pub use controller::{MemoryController, PortId, RequestPort};
pub use cpu_map::CpuMemoryMap;
pub use ppu_map::PpuMemoryMap;
pub use sram::Sram;
