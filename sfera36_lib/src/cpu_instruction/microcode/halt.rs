use super::*;

pub fn halt(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    Ok(LogLine::new(
        cpu_instruction,
        vec![],
        format!("[S={}]", registers.format_status()),
    ))
}
