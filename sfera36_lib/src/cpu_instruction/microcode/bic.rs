use super::*;

pub fn bic(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Write)?;
    let result = destination.value & !source.value & cpu_instruction.size.mask();
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, cpu_instruction.size);

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(result, cpu_instruction.size, registers),
    ))
}
