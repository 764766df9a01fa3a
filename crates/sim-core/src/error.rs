//! Construction-time configuration errors.

use thiserror::Error;

/// A component was constructed with an invalid configuration.
///
/// These are the only errors the simulator produces. They surface at
/// setup; once a component exists, its operation is total — arbitration
/// conflicts and the like are resolved deterministically, never reported
/// as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Latch width outside the supported 1..=16 bit range.
    #[error("latch width must be 1..=16 bits, got {0}")]
    InvalidWidth(u8),

    /// Reset value has bits set above the configured width.
    #[error("reset value {value:#06X} does not fit in {width} bits")]
    ResetValueTooWide {
        /// The offending reset value.
        value: u16,
        /// The configured width in bits.
        width: u8,
    },

    /// A clock divider ratio must be a non-zero even edge count.
    #[error("clock ratio must be a non-zero even count of master edges, got {0}")]
    InvalidClockRatio(u32),

    /// The divider's chip-select window must contain a whole number of
    /// periods of every derived clock.
    #[error("divider window {window} is not a multiple of ratio {ratio}")]
    WindowRatioMismatch {
        /// Window length in master edges.
        window: u32,
        /// The ratio that does not divide it.
        ratio: u32,
    },
}
