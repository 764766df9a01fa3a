//! Core types for two-phase cycle-accurate hardware simulation.
//!
//! Everything advances in half-cycle steps of a two-phase (phi1/phi2)
//! master clock. Registers are phase-gated latches; components expose
//! pin-level inputs and outputs and settle combinationally between edges.

mod bench;
mod component;
mod error;
mod latch;
mod phase;
mod ports;
mod trace;

pub use bench::TestBench;
pub use component::Component;
pub use error::ConfigError;
pub use latch::{Latch, LatchKind};
pub use phase::{Edge, Phase};
pub use ports::Ports;
pub use trace::{Trace, Waveform};
