//! Clock domain divider.

use sim_core::{Component, ConfigError, Phase, Ports};

use crate::ClockRatios;

/// Derives the slower domain clocks from the master clock.
///
/// Counts master edges (one per half-cycle) and toggles each derived
/// clock every `ratio` edges. The PPU chip-select is active low on the
/// first and last edge of every window, giving external logic a setup
/// and hold margin around the window boundary.
#[derive(Debug)]
pub struct ClockDivider {
    phase: Phase,
    ratios: ClockRatios,
    edges: u32,
}

impl ClockDivider {
    pub fn new(ratios: ClockRatios) -> Result<Self, ConfigError> {
        ratios.validate()?;
        Ok(Self {
            phase: Phase::Phi1,
            ratios,
            edges: 0,
        })
    }

    fn level(&self, ratio: u32) -> bool {
        self.edges % (ratio * 2) >= ratio
    }

    /// Derived CPU clock.
    #[must_use]
    pub fn clk_cpu(&self) -> bool {
        self.level(self.ratios.cpu)
    }

    /// Derived PPU clock.
    #[must_use]
    pub fn clk_ppu(&self) -> bool {
        self.level(self.ratios.ppu)
    }

    /// Derived MCU clock.
    #[must_use]
    pub fn clk_mcu(&self) -> bool {
        self.level(self.ratios.mcu)
    }

    /// PPU chip select, active low at the edges of each window.
    #[must_use]
    pub const fn cs_n_ppu(&self) -> bool {
        let position = self.edges % self.ratios.window;
        position != 0 && position != self.ratios.window - 1
    }
}

impl Component for ClockDivider {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.edges = 0;
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        self.edges = (self.edges + 1) % self.ratios.window;
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for ClockDivider {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "clk_cpu", "clk_ppu", "clk_mcu", "cs_n_ppu"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "clk_cpu" => Some(u64::from(self.clk_cpu())),
            "clk_ppu" => Some(u64::from(self.clk_ppu())),
            "clk_mcu" => Some(u64::from(self.clk_mcu())),
            "cs_n_ppu" => Some(u64::from(self.cs_n_ppu())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{TestBench, Waveform};

    fn divider() -> ClockDivider {
        ClockDivider::new(ClockRatios::default()).expect("valid ratios")
    }

    #[test]
    fn rejects_invalid_ratios() {
        let ratios = ClockRatios {
            cpu: 7,
            ..ClockRatios::default()
        };
        assert!(ClockDivider::new(ratios).is_err());
    }

    #[test]
    fn deasserts_everything_at_reset() {
        let mut divider = divider();
        divider.tick_n(5);
        divider.reset();
        assert!(!divider.clk_cpu());
        assert!(!divider.clk_ppu());
        assert!(!divider.clk_mcu());
        assert!(!divider.cs_n_ppu());
    }

    #[test]
    fn divides_the_master_clock() {
        let mut bench = TestBench::new(divider());
        bench.reset();
        bench.tick_n(24);

        let window = Waveform::new()
            .port("clk")
            .bits("_-")
            .repeat(12)
            .port("clk_cpu")
            .bits("_-")
            .repeat_each_step(12)
            .port("clk_ppu")
            .bits("_-")
            .repeat_each_step(4)
            .repeat(3)
            .port("clk_mcu")
            .bits("_-")
            .repeat_each_step(2)
            .repeat(6)
            .port("cs_n_ppu")
            .bits("_")
            .bits("-")
            .repeat(22)
            .bits("_")
            .build();

        bench.assert_trace(&(window.clone() + window));
    }
}
