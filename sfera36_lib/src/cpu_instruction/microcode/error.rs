use thiserror::Error;

use crate::addressing_mode::ResolutionError;
use crate::memory::MemoryError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MicrocodeError {
    // ↓ when a memory access faults during the microcode operation
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Resolution(ResolutionError),
    #[error("unknown instruction {word:06o}")]
    UnknownInstruction { address: u16, word: u16 },
    #[error("runtime error while executing {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, MicrocodeError>;

impl MicrocodeError {
    /// Faulting address when this error is a bus fault.
    pub fn bus_fault(&self) -> Option<u16> {
        match *self {
            MicrocodeError::Memory(e) => Some(e.address()),
            MicrocodeError::Resolution(ResolutionError::Memory(e)) => Some(e.address()),
            _ => None,
        }
    }
}

impl From<ResolutionError> for MicrocodeError {
    fn from(err: ResolutionError) -> MicrocodeError {
        match err {
            ResolutionError::Memory(e) => MicrocodeError::Memory(e),
            _ => MicrocodeError::Resolution(err),
        }
    }
}
