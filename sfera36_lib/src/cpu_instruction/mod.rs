mod cpu_instruction;
pub mod microcode;

/// The all-zero word stops the execution loop.
pub const HALT_WORD: u16 = 0o000000;

pub use self::cpu_instruction::{CPUInstruction, LogLine, Opcode, Operands};
pub use self::microcode::MicrocodeError;
