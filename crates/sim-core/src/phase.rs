//! The two non-overlapping halves of a master clock period.

/// One of the two clock phases.
///
/// Exactly one phase is active at any simulated instant. The master clock
/// line maps low to `Phi1` and high to `Phi2`; register transfers are
/// pipelined across the two phases so no combinational race can occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// First half-cycle (master clock low).
    #[default]
    Phi1,
    /// Second half-cycle (master clock high).
    Phi2,
}

impl Phase {
    /// The opposite phase.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Phi1 => Self::Phi2,
            Self::Phi2 => Self::Phi1,
        }
    }

    /// Logic level of the master clock line during this phase.
    #[must_use]
    pub const fn level(self) -> u64 {
        match self {
            Self::Phi1 => 0,
            Self::Phi2 => 1,
        }
    }
}

/// A clock transition, named for the master clock line.
///
/// `Rising` is the phi1-to-phi2 transition, `Falling` is phi2-to-phi1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// phi1 -> phi2 (master clock goes high).
    Rising,
    /// phi2 -> phi1 (master clock goes low).
    Falling,
}

impl Edge {
    /// The phase this edge transitions into.
    #[must_use]
    pub const fn into_phase(self) -> Phase {
        match self {
            Self::Rising => Phase::Phi2,
            Self::Falling => Phase::Phi1,
        }
    }
}
