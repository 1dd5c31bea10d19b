use super::*;

pub fn bne(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    branch_if(!registers.z_flag_is_set(), registers, cpu_instruction)
}
