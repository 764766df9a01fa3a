//! Phase-gated storage primitive.
//!
//! Every register in the datapath is one of these, configured with a
//! distinct (kind, governing condition, reset value) triple. Behavior
//! dispatches on a tagged variant rather than virtual dispatch, so the
//! set of register behaviors stays exhaustive and statically checkable.

use crate::{ConfigError, Edge, Phase};

/// How a latch responds to phases and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchKind {
    /// While the governing phase is active (or always, if `None`) and the
    /// enable input is asserted, output follows input combinationally.
    /// The value present at the instant the phase transitions away is
    /// frozen and held through the opposite phase.
    Transparent {
        /// Governing phase; `None` means transparent whenever enabled.
        phase: Option<Phase>,
    },
    /// Output updates to input only on the configured clock transition,
    /// ignoring input and enable changes at any other time.
    Edge {
        /// The transition that captures.
        edge: Edge,
    },
    /// Holding register with no internal increment: the externally
    /// computed next value is sampled at the phi2-to-phi1 transition.
    Counter,
}

/// An N-bit phase-gated storage cell.
///
/// Reset is level-sensitive and takes priority over phase and enable:
/// callers assert it by invoking [`Latch::reset`] before any evaluation
/// for that step.
#[derive(Debug, Clone)]
pub struct Latch {
    kind: LatchKind,
    width: u8,
    reset_value: u16,
    value: u16,
}

impl Latch {
    /// Create a latch, validating width and reset value.
    ///
    /// Fails fast at setup: a zero or oversized width, or a reset value
    /// with bits above the width, is a misconfiguration.
    pub fn new(kind: LatchKind, width: u8, reset_value: u16) -> Result<Self, ConfigError> {
        if width == 0 || width > 16 {
            return Err(ConfigError::InvalidWidth(width));
        }
        let mask = Self::mask_for(width);
        if reset_value & !mask != 0 {
            return Err(ConfigError::ResetValueTooWide {
                value: reset_value,
                width,
            });
        }
        Ok(Self {
            kind,
            width,
            reset_value,
            value: reset_value,
        })
    }

    /// 8-bit latch transparent during `phase`.
    #[must_use]
    pub const fn transparent(phase: Phase, reset_value: u8) -> Self {
        Self {
            kind: LatchKind::Transparent { phase: Some(phase) },
            width: 8,
            reset_value: reset_value as u16,
            value: reset_value as u16,
        }
    }

    /// 8-bit latch transparent whenever enabled, with no phase restriction.
    #[must_use]
    pub const fn follower(reset_value: u8) -> Self {
        Self {
            kind: LatchKind::Transparent { phase: None },
            width: 8,
            reset_value: reset_value as u16,
            value: reset_value as u16,
        }
    }

    /// 8-bit edge-triggered register.
    #[must_use]
    pub const fn edge(edge: Edge, reset_value: u8) -> Self {
        Self {
            kind: LatchKind::Edge { edge },
            width: 8,
            reset_value: reset_value as u16,
            value: reset_value as u16,
        }
    }

    const fn mask_for(width: u8) -> u16 {
        if width >= 16 { 0xFFFF } else { (1 << width) - 1 }
    }

    const fn mask(&self) -> u16 {
        Self::mask_for(self.width)
    }

    /// Force the configured reset value, regardless of phase or enable.
    pub fn reset(&mut self) {
        self.value = self.reset_value;
    }

    /// Current stored (or passed-through) value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Current value truncated to a byte.
    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.value as u8
    }

    /// Combinational evaluation within `phase`.
    ///
    /// Only a transparent latch whose governing condition holds responds;
    /// all other kinds hold their value between edges. Recomputed on
    /// every call, so a transparent latch tracks a changing input for as
    /// long as its phase and enable stay asserted.
    pub fn settle(&mut self, phase: Phase, enable: bool, input: u16) {
        if let LatchKind::Transparent { phase: governing } = self.kind {
            let open = governing.is_none_or(|p| p == phase);
            if open && enable {
                self.value = input & self.mask();
            }
        }
    }

    /// Apply a clock transition into `into`.
    ///
    /// Edge registers capture here when this is their configured edge;
    /// counters sample their externally supplied next value on the
    /// falling transition; transparent latches become transparent if the
    /// new phase is their governing phase (freezing on the opposite
    /// transition is implicit — the stored value simply stops updating).
    pub fn clock(&mut self, into: Phase, enable: bool, input: u16) {
        match self.kind {
            LatchKind::Transparent { .. } => self.settle(into, enable, input),
            LatchKind::Edge { edge } => {
                if edge.into_phase() == into && enable {
                    self.value = input & self.mask();
                }
            }
            LatchKind::Counter => {
                if into == Phase::Phi1 && enable {
                    self.value = input & self.mask();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_invalid_width() {
        let err = Latch::new(LatchKind::Counter, 0, 0).unwrap_err();
        assert_eq!(err, ConfigError::InvalidWidth(0));
        assert!(Latch::new(LatchKind::Counter, 17, 0).is_err());
        assert!(Latch::new(LatchKind::Counter, 16, 0xFFFF).is_ok());
    }

    #[test]
    fn rejects_oversized_reset_value() {
        let err = Latch::new(LatchKind::Counter, 4, 0x10).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ResetValueTooWide {
                value: 0x10,
                width: 4
            }
        );
    }

    #[test]
    fn transparent_follows_then_freezes() {
        let mut latch = Latch::transparent(Phase::Phi2, 0x00);

        // Not transparent outside the governing phase.
        latch.settle(Phase::Phi1, true, 0x42);
        assert_eq!(latch.byte(), 0x00);

        // Transparent during phi2 while enabled.
        latch.clock(Phase::Phi2, true, 0x42);
        assert_eq!(latch.byte(), 0x42);
        latch.settle(Phase::Phi2, true, 0x43);
        assert_eq!(latch.byte(), 0x43);

        // Frozen through phi1 regardless of input and enable.
        latch.clock(Phase::Phi1, true, 0x99);
        latch.settle(Phase::Phi1, true, 0x99);
        assert_eq!(latch.byte(), 0x43);
    }

    #[test]
    fn transparent_requires_enable() {
        let mut latch = Latch::transparent(Phase::Phi2, 0x00);
        latch.settle(Phase::Phi2, false, 0x42);
        assert_eq!(latch.byte(), 0x00);
    }

    #[test]
    fn edge_register_ignores_level_changes() {
        let mut latch = Latch::edge(Edge::Rising, 0x00);

        latch.settle(Phase::Phi2, true, 0x42);
        assert_eq!(latch.byte(), 0x00, "no capture without an edge");

        latch.clock(Phase::Phi1, true, 0x42);
        assert_eq!(latch.byte(), 0x00, "wrong edge");

        latch.clock(Phase::Phi2, true, 0x42);
        assert_eq!(latch.byte(), 0x42);

        latch.settle(Phase::Phi2, true, 0x99);
        assert_eq!(latch.byte(), 0x42, "input changes within the phase ignored");
    }

    #[test]
    fn counter_samples_on_falling_only() {
        let mut latch = Latch::new(LatchKind::Counter, 4, 0).expect("valid");
        latch.clock(Phase::Phi2, true, 5);
        assert_eq!(latch.value(), 0);
        latch.clock(Phase::Phi1, true, 5);
        assert_eq!(latch.value(), 5);
        latch.clock(Phase::Phi1, false, 9);
        assert_eq!(latch.value(), 5, "gated by enable");
    }

    #[test]
    fn reset_overrides_everything() {
        let mut latch = Latch::follower(0xFF);
        latch.settle(Phase::Phi1, true, 0x12);
        assert_eq!(latch.byte(), 0x12);
        latch.reset();
        assert_eq!(latch.byte(), 0xFF);
    }

    proptest! {
        // Freeze law: the value held through the non-governing phase is
        // exactly the value present at the instant of transition, for any
        // input sequence applied afterwards.
        #[test]
        fn freeze_law(inputs in prop::collection::vec(0u16..256, 1..32), frozen in 0u16..256) {
            let mut latch = Latch::transparent(Phase::Phi2, 0x00);
            latch.clock(Phase::Phi2, true, frozen);
            latch.clock(Phase::Phi1, true, frozen);
            for input in inputs {
                latch.settle(Phase::Phi1, true, input);
                prop_assert_eq!(latch.value(), frozen);
            }
        }
    }
}
