//! CPU-domain address decoder.

/// Combinational decoder for the CPU bus.
///
/// Internal RAM occupies 0x0000-0x07FF and mirrors through 0x1FFF;
/// the PPU's registers strobe on 0x2000-0x3FFF with the register
/// number in the low three address bits; program ROM sits at
/// 0x8000-0xFFFF. Chip selects gate on the domain clock enable, so a
/// stalled CPU never strobes a peripheral.
#[derive(Debug, Default)]
pub struct CpuMemoryMap {
    /// Address from the CPU bus.
    pub i_address: u16,
    /// CPU-domain clock enable.
    pub i_clk_en: bool,
}

impl CpuMemoryMap {
    const RAM_TOP: u16 = 0x1FFF;
    const RAM_SIZE: u16 = 0x0800;
    const PPU_TOP: u16 = 0x3FFF;
    const PRG_BASE: u16 = 0x8000;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Internal RAM chip select.
    #[must_use]
    pub const fn cs_ram(&self) -> bool {
        self.i_clk_en && self.i_address <= Self::RAM_TOP
    }

    /// RAM address with mirrors folded down.
    #[must_use]
    pub const fn ram_address(&self) -> u16 {
        self.i_address % Self::RAM_SIZE
    }

    /// PPU register strobe.
    #[must_use]
    pub const fn cs_ppu(&self) -> bool {
        self.i_clk_en && self.i_address > Self::RAM_TOP && self.i_address <= Self::PPU_TOP
    }

    /// Selected PPU register number.
    #[must_use]
    pub const fn ppu_register(&self) -> u8 {
        (self.i_address & 0x0007) as u8
    }

    /// Program ROM chip select.
    #[must_use]
    pub const fn cs_prg(&self) -> bool {
        self.i_clk_en && self.i_address >= Self::PRG_BASE
    }

    /// Offset into program ROM.
    #[must_use]
    pub const fn prg_address(&self) -> u16 {
        self.i_address & 0x7FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enabled(address: u16) -> CpuMemoryMap {
        CpuMemoryMap {
            i_address: address,
            i_clk_en: true,
        }
    }

    #[test]
    fn clock_enable_gates_every_select() {
        let map = CpuMemoryMap {
            i_address: 0x0000,
            i_clk_en: false,
        };
        assert!(!map.cs_ram());
        assert!(!map.cs_ppu());
        assert!(!map.cs_prg());
    }

    #[test]
    fn ram_mirrors_fold_to_the_first_2k() {
        let map = enabled(0x1805);
        assert!(map.cs_ram());
        assert_eq!(map.ram_address(), 0x0005);
    }

    #[test]
    fn ppu_register_strobe_uses_low_bits() {
        let map = enabled(0x3456);
        assert!(map.cs_ppu());
        assert!(!map.cs_ram());
        assert_eq!(map.ppu_register(), 6);
    }

    #[test]
    fn program_rom_from_0x8000() {
        let map = enabled(0xFFFC);
        assert!(map.cs_prg());
        assert_eq!(map.prg_address(), 0x7FFC);
    }

    #[test]
    fn expansion_region_selects_nothing() {
        let map = enabled(0x5000);
        assert!(!map.cs_ram());
        assert!(!map.cs_ppu());
        assert!(!map.cs_prg());
    }

    proptest! {
        #[test]
        fn at_most_one_select(address: u16) {
            let map = enabled(address);
            let selects =
                u8::from(map.cs_ram()) + u8::from(map.cs_ppu()) + u8::from(map.cs_prg());
            prop_assert!(selects <= 1);
        }
    }
}
