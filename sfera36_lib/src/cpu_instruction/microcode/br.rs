use super::*;

pub fn br(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    branch_if(true, registers, cpu_instruction)
}
