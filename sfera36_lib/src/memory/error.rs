use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryError {
    // ↓ the address is outside of the bus window
    #[error("BUS ERROR")]
    BusFault(u16),
}

impl MemoryError {
    pub fn address(&self) -> u16 {
        match *self {
            MemoryError::BusFault(addr) => addr,
        }
    }
}
