use super::*;

pub fn asr(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let size = cpu_instruction.size;
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    let value = destination.value;
    let result = ((value >> 1) | (value & size.sign_bit())) & size.mask();
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, size);
    registers.set_c_flag(value & 1 != 0);
    registers.set_v_flag(registers.n_flag_is_set() ^ registers.c_flag_is_set());

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(result, size, registers),
    ))
}
