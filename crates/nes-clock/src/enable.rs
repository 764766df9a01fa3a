//! Clock enable pulse generation.

use sim_core::{Component, Phase, Ports};

/// Derives per-domain enable pulses from a master enable.
///
/// With `i_ce` high, `ce_cpu` is asserted for exactly one full cycle out
/// of every [`ClockEnable::CPU_DIVISOR`] cycles and `ce_ppu` follows
/// `i_ce` combinationally. While `i_ce` is low the position counter
/// freezes, so an arbitrarily long stall resumes mid-pattern without
/// slipping a cycle.
#[derive(Debug)]
pub struct ClockEnable {
    phase: Phase,
    position: u32,
    /// Master enable.
    pub i_ce: bool,
}

impl Default for ClockEnable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockEnable {
    /// CPU runs one cycle in three.
    pub const CPU_DIVISOR: u32 = 3;

    const PERIOD: u32 = Self::CPU_DIVISOR * 2;

    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Phi1,
            position: 0,
            i_ce: false,
        }
    }

    /// CPU enable, high through the last enabled cycle of each group.
    #[must_use]
    pub const fn ce_cpu(&self) -> bool {
        self.i_ce && self.position % Self::PERIOD >= Self::PERIOD - 2
    }

    /// PPU enable, follows the master enable.
    #[must_use]
    pub const fn ce_ppu(&self) -> bool {
        self.i_ce
    }
}

impl Component for ClockEnable {
    fn reset(&mut self) {
        self.phase = Phase::Phi1;
        self.position = 0;
    }

    fn settle(&mut self) {}

    fn advance_phase(&mut self) {
        self.phase = self.phase.other();
        if self.i_ce {
            self.position = (self.position + 1) % Self::PERIOD;
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl Ports for ClockEnable {
    fn port_names(&self) -> &'static [&'static str] {
        &["clk", "ce_cpu", "ce_ppu"]
    }

    fn read_port(&self, name: &str) -> Option<u64> {
        match name {
            "clk" => Some(self.phase.level()),
            "ce_cpu" => Some(u64::from(self.ce_cpu())),
            "ce_ppu" => Some(u64::from(self.ce_ppu())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{TestBench, Waveform};

    fn enabled_bench() -> TestBench<ClockEnable> {
        let mut bench = TestBench::new(ClockEnable::new());
        bench.reset();
        bench.core.i_ce = true;
        bench
    }

    #[test]
    fn deasserted_at_reset() {
        let mut enable = ClockEnable::new();
        enable.i_ce = true;
        enable.tick_n(2);
        enable.reset();
        assert!(!enable.ce_cpu());
    }

    #[test]
    fn cpu_enabled_one_cycle_in_three() {
        let mut bench = enabled_bench();
        bench.tick_n(6);

        bench.assert_trace(
            &Waveform::new()
                .port("clk")
                .bits("_-")
                .repeat(6)
                .port("ce_cpu")
                .bits("____--")
                .repeat(2)
                .port("ce_ppu")
                .bits("------")
                .repeat(2)
                .build(),
        );
    }

    #[test]
    fn everything_low_while_disabled() {
        let mut bench = TestBench::new(ClockEnable::new());
        bench.reset();
        bench.tick_n(6);

        bench.assert_trace(
            &Waveform::new()
                .port("ce_cpu")
                .bits("______")
                .repeat(2)
                .port("ce_ppu")
                .bits("______")
                .repeat(2)
                .build(),
        );
    }

    #[test]
    fn disable_pauses_the_pattern_without_slip() {
        let mut bench = TestBench::new(ClockEnable::new());
        bench.reset();

        for _ in 0..2 {
            bench.core.i_ce = false;
            bench.tick_n(3);
            bench.core.i_ce = true;
            bench.tick_n(3);
        }

        bench.assert_trace(
            &Waveform::new()
                .port("ce_cpu")
                .bits("______")
                .bits("____--")
                .concat()
                .repeat(2)
                .port("ce_ppu")
                .bits("______")
                .bits("------")
                .concat()
                .repeat(2)
                .build(),
        );
    }

    #[test]
    fn long_stall_resumes_mid_pattern() {
        let mut bench = TestBench::new(ClockEnable::new());
        bench.reset();
        bench.core.i_ce = false;
        bench.tick_n(1000);
        bench.trace.clear();

        bench.core.i_ce = true;
        bench.tick_n(3);

        bench.assert_trace(
            &Waveform::new()
                .port("ce_cpu")
                .bits("____--")
                .port("ce_ppu")
                .bits("------")
                .build(),
        );
    }
}
