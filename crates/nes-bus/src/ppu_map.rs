//! Display-domain address decoder.

/// Combinational decoder for the PPU's 14-bit address space.
///
/// Pattern tables occupy 0x0000-0x1FFF, name tables 0x2000-0x2FFF,
/// and 0x3000-0x3FFF mirrors the name tables at address minus 0x1000.
/// Anything above 14 bits is masked off before decoding. No chip
/// select asserts unless a read or write is actually in flight.
#[derive(Debug, Default)]
pub struct PpuMemoryMap {
    /// Address from the display domain.
    pub i_address: u16,
    /// Read enable.
    pub i_re: bool,
    /// Write enable.
    pub i_we: bool,
    /// Write data, forwarded to the selected sub-bus.
    pub i_data: u8,
}

impl PpuMemoryMap {
    const ADDRESS_MASK: u16 = 0x3FFF;
    const NAME_BASE: u16 = 0x2000;
    const MIRROR_BASE: u16 = 0x3000;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn effective(&self) -> u16 {
        self.i_address & Self::ADDRESS_MASK
    }

    const fn active(&self) -> bool {
        self.i_re || self.i_we
    }

    /// Pattern-table chip select.
    #[must_use]
    pub const fn cs_pattern(&self) -> bool {
        self.active() && self.effective() < Self::NAME_BASE
    }

    /// Name-table chip select, covering the mirror region.
    #[must_use]
    pub const fn cs_name(&self) -> bool {
        self.active() && self.effective() >= Self::NAME_BASE
    }

    /// Address forwarded to the selected sub-bus, with the mirror
    /// region folded down.
    #[must_use]
    pub const fn o_address(&self) -> u16 {
        let effective = self.effective();
        if effective >= Self::MIRROR_BASE {
            effective - 0x1000
        } else {
            effective
        }
    }

    /// Write enable forwarded to the selected sub-bus.
    #[must_use]
    pub const fn o_we(&self) -> bool {
        self.i_we
    }

    /// Write data forwarded to the selected sub-bus.
    #[must_use]
    pub const fn o_data(&self) -> u8 {
        self.i_data
    }
}
