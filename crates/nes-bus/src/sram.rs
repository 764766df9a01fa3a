//! 64 KiB SRAM model.

/// Flat byte-addressable memory behind the controller.
#[derive(Debug, Clone)]
pub struct Sram {
    bytes: Vec<u8>,
}

impl Sram {
    const SIZE: usize = 64 * 1024;

    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; Self::SIZE],
        }
    }

    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.bytes[usize::from(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[usize::from(address)] = value;
    }

    /// Fill the whole array with one value.
    pub fn clear(&mut self, fill: u8) {
        self.bytes.fill(fill);
    }

    /// Place a test program, wrapping at the top of memory.
    pub fn load(&mut self, org: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            let address = org.wrapping_add(offset as u16);
            self.write(address, byte);
        }
    }
}

impl Default for Sram {
    fn default() -> Self {
        Self::new()
    }
}
