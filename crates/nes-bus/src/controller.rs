//! Multi-port memory controller.

use sim_core::{Component, Edge, Latch, Phase, Ports};
use tracing::trace;

/// Request ports in descending priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortId {
    /// PPU pattern-table fetches.
    PpuPattern,
    /// PPU name-table fetches.
    PpuName,
    /// Debug and management access.
    Debug,
    /// CPU bus.
    Cpu,
}

impl PortId {
    const PRIORITY: [Self; 4] = [Self::PpuPattern, Self::PpuName, Self::Debug, Self::Cpu];

    const fn label(self) -> &'static str {
        match self {
            Self::PpuPattern => "ppu_pattern",
            Self::PpuName => "ppu_name",
            Self::Debug => "debug",
            Self::Cpu => "cpu",
        }
    }
}

/// One requester's pins.
///
/// The last-read register is private to the port: it captures the
/// shared memory's read data at the end of phi2, but only on a cycle
/// where this port held the grant with a read request. Another port's
/// traffic can never disturb it.
#[derive(Debug)]
pub struct RequestPort {
    /// Request line.
    pub i_en: bool,
    /// Direction, high for write.
    pub i_wr: bool,
    /// Requested address.
    pub i_address: u16,
    /// Write data.
    pub i_data: u8,
    last_read: Latch,
}

impl RequestPort {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            i_en: false,
            i_wr: false,
            i_address: 0,
            i_data: 0,
            last_read: Latch::edge(Edge::Falling, 0x00),
        }
    }

    /// The most recent byte this port read.
    #[must_use]
    pub const fn data(&self) -> u8 {
        self.last_read.byte()
    }
}

impl Default for RequestPort {
    fn default() -> Self {
        Self::new()
    }
}

/// Static-priority arbiter in front of the shared memory pins.
///
/// Exactly one enabled port wins each cycle; its request is forwarded
/// to `o_mem_*` for the whole cycle and, for reads, the memory's answer
/// is captured into the winner's last-read register at the falling
/// edge. Lower-priority requests simply wait, they are never dropped.
#[derive(Debug, Default)]
pub struct MemoryController {
    phase: Phase,
    granted: Option<PortId>,
    /// PPU pattern-table port, highest priority.
    pub ppu_pattern: RequestPort,
    /// PPU name-table port.
    pub ppu_name: RequestPort,
    /// Debug/management port.
    pub debug: RequestPort,
    /// CPU port, lowest priority.
    pub cpu: RequestPort,
    /// Read data answered by the shared memory.
    pub i_mem_data: u8,
}

impl MemoryController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn port(&self, id: PortId) -> &RequestPort {
        match id {
            PortId::PpuPattern => &self.ppu_pattern,
            PortId::PpuName => &self.ppu_name,
            PortId::Debug => &self.debug,
            PortId::Cpu => &self.cpu,
        }
    }

    pub const fn port_mut(&mut self, id: PortId) -> &mut RequestPort {
        match id {
            PortId::PpuPattern => &mut self.ppu_pattern,
            PortId::PpuName => &mut self.ppu_name,
            PortId::Debug => &mut self.debug,
            PortId::Cpu => &mut self.cpu,
        }
    }

    /// The port holding the grant this cycle, if any.
    #[must_use]
    pub const fn granted(&self) -> Option<PortId> {
        self.granted
    }

    /// Shared memory enable.
    #[must_use]
    pub const fn o_mem_en(&self) -> bool {
        self.granted.is_some()
    }

    /// Shared memory write enable.
    #[must_use]
    pub fn o_mem_wr(&self) -> bool {
        self.granted.is_some_and(|id| self.port(id).i_wr)
    }

    /// Address forwarded to the shared memory.
    #[must_use]
    pub fn o_mem_address(&self) -> u16 {
        self.granted.map_or(0, |id| self.port(id).i_address)
    }

    /// Write data forwarded to the shared memory.
    #[must_use]
    pub fn o_mem_data(&self) -> u8 {
        self.granted.map_or(0, |id| self.port(id).i_data)
    }
}

impl Component for MemoryController {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.granted = None;
        self.ppu_pattern.last_read.reset();
        self.ppu_name.last_read.reset();
        self.debug.last_read.reset();
        self.cpu.last_read.reset();
    }

    fn settle(&mut self) {
        self.granted = PortId::PRIORITY
            .into_iter()
            .find(|&id| self.port(id).i_en);
    }

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        if self.phase == Phase::Phi1 {
            if let Some(id) = self.granted {
                let write = self.port(id).i_wr;
                trace!(
                    port = id.label(),
                    address = format_args!("{:#06X}", self.port(id).i_address),
                    write,
                    "grant"
                );
                if !write {
                    let data = u16::from(self.i_mem_data);
                    self.port_mut(id).last_read.clock(Phase::Phi1, true, data);
                }
            }
        }
        self.settle();
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for MemoryController {
    fn port_names(&self) -> &'static [&'static str] {
        &[
            "clk",
            "mem_en",
            "mem_wr",
            "mem_address",
            "mem_data",
            "ppu_pattern_data",
            "ppu_name_data",
            "debug_data",
            "cpu_data",
        ]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "mem_en" => Some(u64::from(self.o_mem_en())),
            "mem_wr" => Some(u64::from(self.o_mem_wr())),
            "mem_address" => Some(u64::from(self.o_mem_address())),
            "mem_data" => Some(u64::from(self.o_mem_data())),
            "ppu_pattern_data" => Some(u64::from(self.ppu_pattern.data())),
            "ppu_name_data" => Some(u64::from(self.ppu_name.data())),
            "debug_data" => Some(u64::from(self.debug.data())),
            "cpu_data" => Some(u64::from(self.cpu.data())),
            _ => None,
        }
    }
}
