//! Divider ratio configuration.

use sim_core::ConfigError;

/// Master-edge ratios for the derived clock domains.
///
/// A ratio of `n` means the derived clock toggles every `n` master
/// edges, giving a period of `2n` edges. `window` is the length of the
/// PPU chip-select window in master edges; every derived period must
/// fit it a whole number of times so the window never slices a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRatios {
    /// CPU clock toggle interval.
    pub cpu: u32,
    /// PPU clock toggle interval.
    pub ppu: u32,
    /// MCU clock toggle interval.
    pub mcu: u32,
    /// Chip-select window length.
    pub window: u32,
}

impl Default for ClockRatios {
    fn default() -> Self {
        Self {
            cpu: 12,
            ppu: 4,
            mcu: 2,
            window: 24,
        }
    }
}

impl ClockRatios {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for ratio in [self.cpu, self.ppu, self.mcu] {
            if ratio == 0 || ratio % 2 != 0 {
                return Err(ConfigError::InvalidClockRatio(ratio));
            }
            let period = ratio * 2;
            if self.window % period != 0 {
                return Err(ConfigError::WindowRatioMismatch {
                    window: self.window,
                    ratio: period,
                });
            }
        }
        Ok(())
    }
}
