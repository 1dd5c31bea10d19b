use super::*;

pub fn dec(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let size = cpu_instruction.size;
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    let result = destination.value.wrapping_sub(1) & size.mask();
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, size);
    registers.set_c_flag(result == size.mask());
    registers.set_v_flag(destination.value == size.sign_bit());

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(result, size, registers),
    ))
}
