use super::*;

pub fn bpl(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    branch_if(!registers.n_flag_is_set(), registers, cpu_instruction)
}
