use std::fmt;

use thiserror::Error;

use super::memory::{AddressableIO, MemoryError};
use super::registers::{Registers, PC};

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[derive(Debug, Error, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ResolutionError {
    #[error("addressing mode '{0}' can not be written to (instruction at {1:06o})")]
    InvalidDestination(AddressingMode, u16),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum OperandSize {
    Word,
    Byte,
}

impl OperandSize {
    pub fn from_byte_flag(byte: bool) -> OperandSize {
        if byte {
            OperandSize::Byte
        } else {
            OperandSize::Word
        }
    }

    pub fn mask(&self) -> u16 {
        match *self {
            OperandSize::Word => 0xffff,
            OperandSize::Byte => 0x00ff,
        }
    }

    pub fn sign_bit(&self) -> u16 {
        match *self {
            OperandSize::Word => 0x8000,
            OperandSize::Byte => 0x0080,
        }
    }

    pub fn is_negative(&self, value: u16) -> bool {
        value & self.sign_bit() != 0
    }

    /// Register step of the auto increment and auto decrement modes.
    pub fn step(&self) -> u16 {
        match *self {
            OperandSize::Word => 2,
            OperandSize::Byte => 1,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Access {
    Read,
    Write,
}

/*
 * WriteBack
 * Where the result of an instruction goes once the operand is solved. A byte
 * written to a register only replaces its low half.
 */
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum WriteBack {
    Discard,
    Register(usize),
    RegisterLowByte(usize),
    MemoryWord(u16),
    MemoryByte(u16),
}

impl WriteBack {
    pub fn commit(
        &self,
        value: u16,
        memory: &mut dyn AddressableIO,
        registers: &mut Registers,
    ) -> Result<()> {
        match *self {
            WriteBack::Discard => {}
            WriteBack::Register(reg) => registers.set_register(reg, value),
            WriteBack::RegisterLowByte(reg) => {
                let high = registers.get_register(reg) & 0xff00;
                registers.set_register(reg, high | (value & 0x00ff));
            }
            WriteBack::MemoryWord(addr) => memory.write_word(addr, value)?,
            WriteBack::MemoryByte(addr) => memory.write_byte(addr, value as u8)?,
        };

        Ok(())
    }

    /// True when committing stores into the given register.
    pub fn targets_register(&self, register: usize) -> bool {
        match *self {
            WriteBack::Register(reg) | WriteBack::RegisterLowByte(reg) => reg == register,
            _ => false,
        }
    }
}

/*
 * Operand
 * The outcome of solving an addressing mode: the value it designates, the
 * extra instruction word it consumed if any and where to write a result.
 */
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct Operand {
    pub addressing_mode: AddressingMode,
    pub size: OperandSize,
    pub value: u16,
    pub write_back: WriteBack,
    pub extra_word: Option<u16>,
    pub effective_address: Option<u16>,
}

impl Operand {
    pub fn extra_words(&self) -> u16 {
        match self.extra_word {
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn commit(
        &self,
        value: u16,
        memory: &mut dyn AddressableIO,
        registers: &mut Registers,
    ) -> Result<()> {
        self.write_back.commit(value, memory, registers)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let syntax = match (self.addressing_mode, self.extra_word) {
            (AddressingMode::Immediate, Some(word)) => format!("#{:06o}", word),
            (AddressingMode::Absolute, Some(word)) => format!("@#{:06o}", word),
            (AddressingMode::Indexed(reg), Some(word)) => format!("{:06o}(R{})", word, reg),
            (AddressingMode::IndexedDeferred(reg), Some(word)) => {
                format!("@{:06o}(R{})", word, reg)
            }
            (mode, _) => mode.to_string(),
        };

        match self.effective_address {
            Some(addr) => write!(f, "{}[{:06o}]", syntax, addr),
            None => write!(f, "{}", syntax),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum AddressingMode {
    Register(usize),
    RegisterDeferred(usize),
    AutoIncrement(usize),
    Immediate,
    AutoIncrementDeferred(usize),
    Absolute,
    AutoDecrement(usize),
    AutoDecrementDeferred(usize),
    Indexed(usize),
    IndexedDeferred(usize),
}

impl AddressingMode {
    /// Build the mode out of the 3 bits mode field and the 3 bits register
    /// field of an instruction word.
    pub fn from_fields(mode: u16, reg: u16) -> AddressingMode {
        let reg = (reg & 0o7) as usize;

        match (mode & 0o7, reg) {
            (0, reg) => AddressingMode::Register(reg),
            (1, reg) => AddressingMode::RegisterDeferred(reg),
            (2, PC) => AddressingMode::Immediate,
            (2, reg) => AddressingMode::AutoIncrement(reg),
            (3, PC) => AddressingMode::Absolute,
            (3, reg) => AddressingMode::AutoIncrementDeferred(reg),
            (4, reg) => AddressingMode::AutoDecrement(reg),
            (5, reg) => AddressingMode::AutoDecrementDeferred(reg),
            (6, reg) => AddressingMode::Indexed(reg),
            (_, reg) => AddressingMode::IndexedDeferred(reg),
        }
    }

    /// Number of words this mode reads from the instruction stream.
    pub fn extra_words(&self) -> u16 {
        match *self {
            AddressingMode::Immediate
            | AddressingMode::Absolute
            | AddressingMode::Indexed(_)
            | AddressingMode::IndexedDeferred(_) => 1,
            _ => 0,
        }
    }

    /*
     * solve
     * Compute the operand designated by this mode for the instruction at
     * `opcode_address`. Extra words are read right after `opcode_address`
     * so two operands instructions solve their destination from the address
     * of the last word consumed by the source. Register side effects (auto
     * increment and decrement) happen here and only here.
     */
    pub fn solve(
        &self,
        opcode_address: u16,
        size: OperandSize,
        access: Access,
        memory: &dyn AddressableIO,
        registers: &mut Registers,
    ) -> Result<Operand> {
        let extra_address = opcode_address.wrapping_add(2);
        let (value, extra_word, effective_address) = match *self {
            AddressingMode::Register(reg) => {
                let value = registers.get_register(reg) & size.mask();
                let write_back = match size {
                    OperandSize::Word => WriteBack::Register(reg),
                    OperandSize::Byte => WriteBack::RegisterLowByte(reg),
                };

                return Ok(Operand {
                    addressing_mode: *self,
                    size,
                    value,
                    write_back: if access == Access::Write {
                        write_back
                    } else {
                        WriteBack::Discard
                    },
                    extra_word: None,
                    effective_address: None,
                });
            }
            AddressingMode::RegisterDeferred(reg) => {
                let addr = registers.get_register(reg);
                (read_operand(memory, size, addr)?, None, addr)
            }
            AddressingMode::AutoIncrement(reg) => {
                let addr = registers.get_register(reg);
                let value = read_operand(memory, size, addr)?;
                registers.set_register(reg, addr.wrapping_add(size.step()));
                (value, None, addr)
            }
            AddressingMode::Immediate => {
                if access == Access::Write {
                    return Err(ResolutionError::InvalidDestination(*self, opcode_address));
                }
                let word = memory.read_word(extra_address)?;

                return Ok(Operand {
                    addressing_mode: *self,
                    size,
                    value: word & size.mask(),
                    write_back: WriteBack::Discard,
                    extra_word: Some(word),
                    effective_address: None,
                });
            }
            AddressingMode::AutoIncrementDeferred(reg) => {
                let pointer = registers.get_register(reg);
                let addr = memory.read_word(pointer)?;
                let value = read_operand(memory, size, addr)?;
                registers.set_register(reg, pointer.wrapping_add(2));
                (value, None, addr)
            }
            AddressingMode::Absolute => {
                let addr = memory.read_word(extra_address)?;
                (read_operand(memory, size, addr)?, Some(addr), addr)
            }
            AddressingMode::AutoDecrement(reg) => {
                let addr = registers.get_register(reg).wrapping_sub(size.step());
                registers.set_register(reg, addr);
                (read_operand(memory, size, addr)?, None, addr)
            }
            AddressingMode::AutoDecrementDeferred(reg) => {
                let pointer = registers.get_register(reg).wrapping_sub(2);
                registers.set_register(reg, pointer);
                let addr = memory.read_word(pointer)?;
                (read_operand(memory, size, addr)?, None, addr)
            }
            AddressingMode::Indexed(reg) => {
                let displacement = memory.read_word(extra_address)?;
                let addr = index_base(reg, extra_address, registers).wrapping_add(displacement);
                (
                    read_operand(memory, size, addr)?,
                    Some(displacement),
                    addr,
                )
            }
            AddressingMode::IndexedDeferred(reg) => {
                let displacement = memory.read_word(extra_address)?;
                let pointer = index_base(reg, extra_address, registers).wrapping_add(displacement);
                let addr = memory.read_word(pointer)?;
                (
                    read_operand(memory, size, addr)?,
                    Some(displacement),
                    addr,
                )
            }
        };

        let write_back = match (access, size) {
            (Access::Read, _) => WriteBack::Discard,
            (Access::Write, OperandSize::Word) => WriteBack::MemoryWord(effective_address),
            (Access::Write, OperandSize::Byte) => WriteBack::MemoryByte(effective_address),
        };

        Ok(Operand {
            addressing_mode: *self,
            size,
            value,
            write_back,
            extra_word,
            effective_address: Some(effective_address),
        })
    }
}

fn read_operand(memory: &dyn AddressableIO, size: OperandSize, addr: u16) -> Result<u16> {
    let value = match size {
        OperandSize::Word => memory.read_word(addr)?,
        OperandSize::Byte => memory.read_byte(addr)? as u16,
    };

    Ok(value)
}

// R7 based indexing is relative to the displacement word itself.
fn index_base(reg: usize, extra_address: u16, registers: &Registers) -> u16 {
    if reg == PC {
        extra_address
    } else {
        registers.get_register(reg)
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AddressingMode::Register(reg) => write!(f, "R{}", reg),
            AddressingMode::RegisterDeferred(reg) => write!(f, "(R{})", reg),
            AddressingMode::AutoIncrement(reg) => write!(f, "(R{})+", reg),
            AddressingMode::Immediate => write!(f, "#n"),
            AddressingMode::AutoIncrementDeferred(reg) => write!(f, "@(R{})+", reg),
            AddressingMode::Absolute => write!(f, "@#a"),
            AddressingMode::AutoDecrement(reg) => write!(f, "-(R{})", reg),
            AddressingMode::AutoDecrementDeferred(reg) => write!(f, "@-(R{})", reg),
            AddressingMode::Indexed(reg) => write!(f, "X(R{})", reg),
            AddressingMode::IndexedDeferred(reg) => write!(f, "@X(R{})", reg),
        }
    }
}
