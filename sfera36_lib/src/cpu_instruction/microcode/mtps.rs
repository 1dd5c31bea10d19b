use super::*;

pub fn mtps(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let source = solve_single(memory, registers, cpu_instruction, Access::Read)?;
    registers.set_status_register(source.value as u8);

    Ok(LogLine::new(
        cpu_instruction,
        vec![source],
        format!("[S={}]", registers.format_status()),
    ))
}
