use super::*;

/*
 * MFPS
 * Copy the status byte to the destination. A register destination keeps
 * its high byte.
 */
pub fn mfps(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    let status = registers.get_status_register() as u16;
    destination.commit(status, memory, registers)?;

    registers.set_nz_flags(status, OperandSize::Byte);
    registers.set_v_flag(false);

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(status, OperandSize::Byte, registers),
    ))
}
