use crate::addressing_mode::{Access, Operand, OperandSize};
use crate::cpu_instruction::{CPUInstruction, LogLine};
use crate::memory::AddressableIO;
use crate::registers::Registers;

mod error;

mod add;
mod asl;
mod asr;
mod beq;
mod bic;
mod bis;
mod bit;
mod bmi;
mod bne;
mod bpl;
mod br;
mod clr;
mod cmp;
mod com;
mod dec;
mod halt;
mod inc;
mod jmp;
mod mfps;
mod mov;
mod mtps;
mod neg;
mod sub;
mod tst;

pub use error::{MicrocodeError, Result};

pub use add::add;
pub use asl::asl;
pub use asr::asr;
pub use beq::beq;
pub use bic::bic;
pub use bis::bis;
pub use bit::bit;
pub use bmi::bmi;
pub use bne::bne;
pub use bpl::bpl;
pub use br::br;
pub use clr::clr;
pub use cmp::cmp;
pub use com::com;
pub use dec::dec;
pub use halt::halt;
pub use inc::inc;
pub use jmp::jmp;
pub use mfps::mfps;
pub use mov::mov;
pub use mtps::mtps;
pub use neg::neg;
pub use sub::sub;
pub use tst::tst;

/*
 * Solve the source then the destination of a two operands instruction. The
 * destination reads its extra word past the ones consumed by the source.
 */
fn solve_double(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
    destination_access: Access,
) -> Result<(Operand, Operand)> {
    let (source_mode, destination_mode) = cpu_instruction.double_operands()?;
    let source = source_mode.solve(
        cpu_instruction.address,
        cpu_instruction.size,
        Access::Read,
        memory,
        registers,
    )?;
    let destination = destination_mode.solve(
        cpu_instruction
            .address
            .wrapping_add(2 * source.extra_words()),
        cpu_instruction.size,
        destination_access,
        memory,
        registers,
    )?;

    Ok((source, destination))
}

fn solve_single(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
    access: Access,
) -> Result<Operand> {
    let mode = cpu_instruction.single_operand()?;

    Ok(mode.solve(
        cpu_instruction.address,
        cpu_instruction.size,
        access,
        memory,
        registers,
    )?)
}

fn branch_if(
    condition: bool,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let target = cpu_instruction.branch_target(cpu_instruction.branch_offset()?);

    if condition {
        registers.set_program_counter(target);

        Ok(LogLine::new(cpu_instruction, vec![], format!("[PC={:06o}]", target)).jumped())
    } else {
        Ok(LogLine::new(
            cpu_instruction,
            vec![],
            format!("[S={}]", registers.format_status()),
        ))
    }
}

fn outcome(value: u16, size: OperandSize, registers: &Registers) -> String {
    match size {
        OperandSize::Word => format!("{:06o}[S={}]", value, registers.format_status()),
        OperandSize::Byte => format!("{:03o}[S={}]", value & 0o377, registers.format_status()),
    }
}
