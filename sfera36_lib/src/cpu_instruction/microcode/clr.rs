use super::*;

pub fn clr(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    destination.commit(0, memory, registers)?;

    registers.set_n_flag(false);
    registers.set_z_flag(true);
    registers.set_v_flag(false);
    registers.set_c_flag(false);

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(0, cpu_instruction.size, registers),
    ))
}
