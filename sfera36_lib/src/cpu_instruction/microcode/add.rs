use super::*;

pub fn add(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Write)?;
    let (result, carry) = destination.value.overflowing_add(source.value);
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, OperandSize::Word);
    registers.set_c_flag(carry);
    // same sign operands, result of the other sign
    registers.set_v_flag(
        !(source.value ^ destination.value) & (destination.value ^ result) & 0x8000 != 0,
    );

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(result, OperandSize::Word, registers),
    ))
}
