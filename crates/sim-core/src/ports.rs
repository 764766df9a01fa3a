//! Read-only observability of component pins.

/// A component whose named ports can be sampled.
///
/// This is the seam the trace recorder attaches to: it reads port values
/// after every half-cycle but is never a dependency of the component
/// itself. Reads must not affect simulation state.
pub trait Ports {
    /// Names of all observable ports, inputs and outputs alike.
    ///
    /// Every component exposes `"clk"` reporting the master clock level
    /// for its current phase.
    fn port_names(&self) -> &'static [&'static str];

    /// Sample one port by name. Returns `None` for unknown names.
    fn read_port(&self, name: &str) -> Option<u64>;
}
