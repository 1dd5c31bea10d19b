use super::*;

pub fn bit(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Read)?;
    let result = destination.value & source.value;

    registers.set_nz_flags(result, cpu_instruction.size);
    registers.set_v_flag(false);

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(result, cpu_instruction.size, registers),
    ))
}
