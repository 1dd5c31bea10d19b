use std::fmt;

use super::microcode;
use super::microcode::{MicrocodeError, Result as MicrocodeResult};
use super::HALT_WORD;
use crate::addressing_mode::*;
use crate::memory::AddressableIO;
use crate::registers::{Registers, PC};

pub type Microcode =
    fn(&mut dyn AddressableIO, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Opcode {
    Halt,
    Mov,
    Cmp,
    Bit,
    Bic,
    Bis,
    Add,
    Sub,
    Clr,
    Com,
    Inc,
    Dec,
    Neg,
    Tst,
    Asr,
    Asl,
    Mtps,
    Mfps,
    Br,
    Bne,
    Beq,
    Bpl,
    Bmi,
    Jmp,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        match *self {
            Opcode::Halt => "HALT",
            Opcode::Mov => "MOV",
            Opcode::Cmp => "CMP",
            Opcode::Bit => "BIT",
            Opcode::Bic => "BIC",
            Opcode::Bis => "BIS",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Clr => "CLR",
            Opcode::Com => "COM",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Neg => "NEG",
            Opcode::Tst => "TST",
            Opcode::Asr => "ASR",
            Opcode::Asl => "ASL",
            Opcode::Mtps => "MTPS",
            Opcode::Mfps => "MFPS",
            Opcode::Br => "BR",
            Opcode::Bne => "BNE",
            Opcode::Beq => "BEQ",
            Opcode::Bpl => "BPL",
            Opcode::Bmi => "BMI",
            Opcode::Jmp => "JMP",
        }
    }

    /// Families that exist in a word and a byte flavor, the byte one being
    /// spelled with a trailing B.
    pub fn has_byte_form(&self) -> bool {
        matches!(
            *self,
            Opcode::Mov
                | Opcode::Cmp
                | Opcode::Bit
                | Opcode::Bic
                | Opcode::Bis
                | Opcode::Clr
                | Opcode::Com
                | Opcode::Inc
                | Opcode::Dec
                | Opcode::Neg
                | Opcode::Tst
                | Opcode::Asr
                | Opcode::Asl
        )
    }

    fn microcode(&self) -> Microcode {
        match *self {
            Opcode::Halt => microcode::halt,
            Opcode::Mov => microcode::mov,
            Opcode::Cmp => microcode::cmp,
            Opcode::Bit => microcode::bit,
            Opcode::Bic => microcode::bic,
            Opcode::Bis => microcode::bis,
            Opcode::Add => microcode::add,
            Opcode::Sub => microcode::sub,
            Opcode::Clr => microcode::clr,
            Opcode::Com => microcode::com,
            Opcode::Inc => microcode::inc,
            Opcode::Dec => microcode::dec,
            Opcode::Neg => microcode::neg,
            Opcode::Tst => microcode::tst,
            Opcode::Asr => microcode::asr,
            Opcode::Asl => microcode::asl,
            Opcode::Mtps => microcode::mtps,
            Opcode::Mfps => microcode::mfps,
            Opcode::Br => microcode::br,
            Opcode::Bne => microcode::bne,
            Opcode::Beq => microcode::beq,
            Opcode::Bpl => microcode::bpl,
            Opcode::Bmi => microcode::bmi,
            Opcode::Jmp => microcode::jmp,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Operands {
    None,
    Double {
        source: AddressingMode,
        destination: AddressingMode,
    },
    Single(AddressingMode),
    Offset(i8),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct CPUInstruction {
    pub address: u16,
    pub word: u16,
    pub opcode: Opcode,
    pub size: OperandSize,
    pub operands: Operands,
}

impl CPUInstruction {
    /*
     * decode
     * Turn an instruction word into an instruction. The two operands
     * families are tried first, then the one operand families and finally
     * the branches and JMP.
     */
    pub fn decode(address: u16, word: u16) -> MicrocodeResult<CPUInstruction> {
        let instruction = |opcode: Opcode, size: OperandSize, operands: Operands| CPUInstruction {
            address,
            word,
            opcode,
            size,
            operands,
        };

        if word == HALT_WORD {
            return Ok(instruction(Opcode::Halt, OperandSize::Word, Operands::None));
        }

        let byte = word & 0o100000 != 0;
        let double = match (word >> 12) & 0o7 {
            1 => Some(Opcode::Mov),
            2 => Some(Opcode::Cmp),
            3 => Some(Opcode::Bit),
            4 => Some(Opcode::Bic),
            5 => Some(Opcode::Bis),
            6 if byte => Some(Opcode::Sub),
            6 => Some(Opcode::Add),
            _ => None,
        };
        if let Some(opcode) = double {
            let size = match opcode {
                Opcode::Add | Opcode::Sub => OperandSize::Word,
                _ => OperandSize::from_byte_flag(byte),
            };
            let operands = Operands::Double {
                source: AddressingMode::from_fields(word >> 9, word >> 6),
                destination: AddressingMode::from_fields(word >> 3, word),
            };

            return Ok(instruction(opcode, size, operands));
        }

        let single = match ((word >> 6) & 0o777, byte) {
            (0o050, _) => Some(Opcode::Clr),
            (0o051, _) => Some(Opcode::Com),
            (0o052, _) => Some(Opcode::Inc),
            (0o053, _) => Some(Opcode::Dec),
            (0o054, _) => Some(Opcode::Neg),
            (0o057, _) => Some(Opcode::Tst),
            (0o062, _) => Some(Opcode::Asr),
            (0o063, _) => Some(Opcode::Asl),
            (0o064, true) => Some(Opcode::Mtps),
            (0o067, true) => Some(Opcode::Mfps),
            _ => None,
        };
        if let Some(opcode) = single {
            let operands = Operands::Single(AddressingMode::from_fields(word >> 3, word));

            return Ok(instruction(
                opcode,
                OperandSize::from_byte_flag(byte),
                operands,
            ));
        }

        let offset = Operands::Offset((word & 0o377) as u8 as i8);
        let (opcode, operands) = match word {
            0o000100..=0o000177 => (
                Opcode::Jmp,
                Operands::Single(AddressingMode::from_fields(word >> 3, word)),
            ),
            0o000400..=0o000777 => (Opcode::Br, offset),
            0o001000..=0o001377 => (Opcode::Bne, offset),
            0o001400..=0o001777 => (Opcode::Beq, offset),
            0o100000..=0o100377 => (Opcode::Bpl, offset),
            0o100400..=0o100777 => (Opcode::Bmi, offset),
            _ => return Err(MicrocodeError::UnknownInstruction { address, word }),
        };

        Ok(instruction(opcode, OperandSize::Word, operands))
    }

    pub fn execute(
        &self,
        memory: &mut dyn AddressableIO,
        registers: &mut Registers,
    ) -> MicrocodeResult<LogLine> {
        (self.opcode.microcode())(memory, registers, self)
    }

    pub fn mnemonic(&self) -> String {
        match self.size {
            OperandSize::Byte if self.opcode.has_byte_form() => format!("{}B", self.opcode.name()),
            _ => self.opcode.name().to_owned(),
        }
    }

    pub fn double_operands(&self) -> MicrocodeResult<(AddressingMode, AddressingMode)> {
        match self.operands {
            Operands::Double {
                source,
                destination,
            } => Ok((source, destination)),
            _ => Err(MicrocodeError::Runtime(self.mnemonic())),
        }
    }

    pub fn single_operand(&self) -> MicrocodeResult<AddressingMode> {
        match self.operands {
            Operands::Single(mode) => Ok(mode),
            _ => Err(MicrocodeError::Runtime(self.mnemonic())),
        }
    }

    pub fn branch_offset(&self) -> MicrocodeResult<i8> {
        match self.operands {
            Operands::Offset(offset) => Ok(offset),
            _ => Err(MicrocodeError::Runtime(self.mnemonic())),
        }
    }

    /// Destination of a branch: the address of the branch itself plus twice
    /// the signed offset. An offset of 0 branches to itself.
    pub fn branch_target(&self, offset: i8) -> u16 {
        self.address.wrapping_add((offset as i16 * 2) as u16)
    }
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = match self.operands {
            Operands::None => String::new(),
            Operands::Double {
                source,
                destination,
            } => format!("{},{}", source, destination),
            Operands::Single(mode) => mode.to_string(),
            Operands::Offset(offset) => format!("{:06o}", self.branch_target(offset)),
        };

        write!(
            f,
            "{:06o}: ({:06o}) {: <5} {}",
            self.address,
            self.word,
            self.mnemonic(),
            operands
        )
    }
}

/*
 * LogLine
 * What an instruction did. `jumped` is set by the microcodes that load the
 * program counter themselves, the execution loop must not move it further.
 */
#[derive(Debug, Clone)]
pub struct LogLine {
    pub address: u16,
    pub word: u16,
    pub opcode: Opcode,
    pub mnemonic: String,
    pub resolution: Vec<Operand>,
    pub outcome: String,
    pub jumped: bool,
}

impl LogLine {
    pub fn new(
        cpu_instruction: &CPUInstruction,
        resolution: Vec<Operand>,
        outcome: String,
    ) -> LogLine {
        // A result stored into PC redirects the flow even when the value is
        // the instruction's own address.
        let jumped = resolution
            .iter()
            .any(|operand| operand.write_back.targets_register(PC));

        LogLine {
            address: cpu_instruction.address,
            word: cpu_instruction.word,
            opcode: cpu_instruction.opcode,
            mnemonic: cpu_instruction.mnemonic(),
            resolution,
            outcome,
            jumped,
        }
    }

    pub fn jumped(mut self) -> LogLine {
        self.jumped = true;
        self
    }

    pub fn is_halt(&self) -> bool {
        self.opcode == Opcode::Halt
    }

    /// Instruction words consumed past the opcode word.
    pub fn extra_words(&self) -> u16 {
        self.resolution.iter().map(|operand| operand.extra_words()).sum()
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self
            .resolution
            .iter()
            .map(|operand| operand.to_string())
            .collect::<Vec<String>>()
            .join(",");

        write!(
            f,
            "{:06o}: ({:06o}) {: <5} {: <28} {}",
            self.address, self.word, self.mnemonic, operands, self.outcome
        )
    }
}
