use super::*;

pub fn bmi(
    _memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    branch_if(registers.n_flag_is_set(), registers, cpu_instruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_bmi() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o100776).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o100776]);
        registers.set_n_flag(true);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert!(log_line.jumped);
        assert_eq!(0o774, registers.program_counter());
    }
}
