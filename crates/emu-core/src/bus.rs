//! Memory bus interface.

/// Memory bus interface.
///
/// Components access memory through this trait. The bus handles address
/// decoding and routing to the appropriate device. The full 16-bit address
/// space is always decodable; there are no wait states at this level.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Flat 64 KiB RAM with no address decoding.
///
/// Enough for test harnesses and CP/M-style program images. Real machines
/// implement `Bus` themselves to map ROM, RAM, and mirrors.
pub struct SimpleBus {
    memory: Box<[u8; 0x1_0000]>,
}

impl SimpleBus {
    /// Create a bus with all memory zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy `bytes` into memory starting at `base`, wrapping at the top of
    /// the address space.
    pub fn load(&mut self, base: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            let address = base.wrapping_add(offset as u16);
            self.memory[address as usize] = byte;
        }
    }

    /// Read a byte without going through the bus interface.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_wraps_at_top_of_address_space() {
        let mut bus = SimpleBus::new();
        bus.load(0xFFFF, &[0xAA, 0xBB]);
        assert_eq!(bus.peek(0xFFFF), 0xAA);
        assert_eq!(bus.peek(0x0000), 0xBB);
    }

    #[test]
    fn read_reflects_write() {
        let mut bus = SimpleBus::new();
        bus.write(0x1234, 0x5A);
        assert_eq!(bus.read(0x1234), 0x5A);
        assert_eq!(bus.peek(0x1234), 0x5A);
    }
}
