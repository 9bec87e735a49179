//! 8080 port I/O space.
//!
//! The 8080 has a dedicated 256-port I/O address space separate from
//! memory. Input ports are what IN reads and peripherals write; output
//! ports are what OUT writes and peripherals read. The two directions are
//! independent arrays: port 3 for input and port 3 for output are
//! different latches on real hardware.

/// Input and output port latches.
#[derive(Debug, Clone)]
pub struct Ports {
    /// Latched by peripherals, read by IN.
    pub(crate) input: [u8; 256],
    /// Written by OUT, observed by peripherals.
    pub(crate) output: [u8; 256],
}

impl Ports {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: [0; 256],
            output: [0; 256],
        }
    }
}

impl Default for Ports {
    fn default() -> Self {
        Self::new()
    }
}
