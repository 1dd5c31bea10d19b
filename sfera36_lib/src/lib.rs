mod addressing_mode;
mod cpu_instruction;
pub mod memory;
mod processing_unit;
mod registers;

pub use addressing_mode::{
    Access, AddressingMode, Operand, OperandSize, ResolutionError, WriteBack,
};
pub use cpu_instruction::{CPUInstruction, LogLine, MicrocodeError, Opcode, Operands, HALT_WORD};
pub use memory::{AddressableIO, MemoryError, BUS_LIMIT};
pub use memory::RAM as Memory;
pub use processing_unit::*;
pub use registers::{Registers, PC, REGISTERS_COUNT};
