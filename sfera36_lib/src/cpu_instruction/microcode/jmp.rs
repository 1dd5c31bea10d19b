use super::*;
use crate::addressing_mode::{AddressingMode, ResolutionError};

pub fn jmp(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let mode = cpu_instruction.single_operand()?;
    if let AddressingMode::Register(_) = mode {
        return Err(ResolutionError::InvalidDestination(mode, cpu_instruction.address).into());
    }
    let operand = mode.solve(
        cpu_instruction.address,
        OperandSize::Word,
        Access::Read,
        memory,
        registers,
    )?;
    let target = operand
        .effective_address
        .ok_or(ResolutionError::InvalidDestination(mode, cpu_instruction.address))?;
    registers.set_program_counter(target);

    Ok(LogLine::new(cpu_instruction, vec![operand], format!("[PC={:06o}]", target)).jumped())
}
