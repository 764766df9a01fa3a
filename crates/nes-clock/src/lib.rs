//! Clock domain generation.
//!
//! A single master clock feeds every domain. [`ClockDivider`] derives
//! the slower CPU, PPU and MCU clocks plus the PPU chip-select window;
//! [`ClockEnable`] derives per-domain enable pulses for designs that
//! run every component off the master clock and gate with enables
//! instead.

mod config;
mod divider;
mod enable;

pub use config::ClockRatios;
pub use divider::ClockDivider;
pub use enable::ClockEnable;
