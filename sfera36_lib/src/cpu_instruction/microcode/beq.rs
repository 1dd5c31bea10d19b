use super::*;

pub fn beq(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    branch_if(registers.z_flag_is_set(), registers, cpu_instruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_beq() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o001777).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o001777]);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert!(!log_line.jumped);
        registers.set_z_flag(true);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert!(log_line.jumped);
        assert_eq!(0o776, registers.program_counter());
    }
}
