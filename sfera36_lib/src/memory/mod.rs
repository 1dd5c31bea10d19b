mod error;
mod ram;

pub use error::MemoryError;
pub use ram::RAM;

pub const MEMMAX: usize = 65535;

/// Highest address the bus answers to. Anything above it, including the odd
/// byte right after it, raises a bus fault.
pub const BUS_LIMIT: u16 = 0o157776;

pub fn little_endian(bytes: [u8; 2]) -> u16 {
    (bytes[1] as u16) << 8 | bytes[0] as u16
}

/*
 * AddressableIO
 * this trait defines the interface for all memory systems
 * Words live at even addresses, low byte first. Word accesses ignore the
 * lowest address bit.
 */
pub trait AddressableIO {
    fn read_word(&self, addr: u16) -> Result<u16, MemoryError>;
    fn write_word(&mut self, addr: u16, value: u16) -> Result<(), MemoryError>;
    fn read_byte(&self, addr: u16) -> Result<u8, MemoryError>;
    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), MemoryError>;
    fn validate_address(&self, addr: u16) -> Result<(), MemoryError>;
    fn get_size(&self) -> usize;
}
