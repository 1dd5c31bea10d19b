use std::fmt;

use range_map::Range;

use super::*;

pub struct RAM {
    ram: Box<[u8; MEMMAX + 1]>,
    bus: Range<u16>,
}

impl RAM {
    pub fn new() -> RAM {
        RAM::with_bus_limit(BUS_LIMIT)
    }

    pub fn with_bus_limit(limit: u16) -> RAM {
        RAM {
            ram: Box::new([0x00; MEMMAX + 1]),
            bus: Range::new(0, limit),
        }
    }
}

impl fmt::Debug for RAM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RAM")
            .field("size", &self.get_size())
            .finish_non_exhaustive()
    }
}

impl Default for RAM {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressableIO for RAM {
    fn read_word(&self, addr: u16) -> Result<u16, MemoryError> {
        self.validate_address(addr)?;
        let addr = addr & !1;

        Ok(little_endian([
            self.ram[addr as usize],
            self.ram[addr as usize | 1],
        ]))
    }

    fn write_word(&mut self, addr: u16, value: u16) -> Result<(), MemoryError> {
        self.validate_address(addr)?;
        let addr = addr & !1;
        let [low, high] = value.to_le_bytes();
        self.ram[addr as usize] = low;
        self.ram[addr as usize | 1] = high;

        Ok(())
    }

    fn read_byte(&self, addr: u16) -> Result<u8, MemoryError> {
        self.validate_address(addr)?;

        Ok(self.ram[addr as usize])
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
        self.validate_address(addr)?;
        self.ram[addr as usize] = value;

        Ok(())
    }

    fn validate_address(&self, addr: u16) -> Result<(), MemoryError> {
        if self.bus.contains(addr) {
            Ok(())
        } else {
            Err(MemoryError::BusFault(addr))
        }
    }

    fn get_size(&self) -> usize {
        self.ram.len()
    }
}
