use super::*;

pub fn cmp(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Read)?;
    let size = cpu_instruction.size;
    let result = destination.value.wrapping_sub(source.value) & size.mask();

    registers.set_nz_flags(result, size);
    registers.set_c_flag(destination.value < source.value);

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(result, size, registers),
    ))
}
