use super::*;

pub fn tst(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let operand = solve_single(memory, registers, cpu_instruction, Access::Read)?;

    registers.set_nz_flags(operand.value, cpu_instruction.size);
    registers.set_v_flag(false);
    registers.set_c_flag(false);

    Ok(LogLine::new(
        cpu_instruction,
        vec![operand],
        outcome(operand.value, cpu_instruction.size, registers),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_tst() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o005721).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o005721]);
        memory.write_word(0o2000, 0o100000).unwrap();
        registers.set_register(1, 0o2000);
        registers.set_status_register(0o003);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!("TST".to_owned(), log_line.mnemonic);
        assert_eq!(0o010, registers.get_status_register());
        assert_eq!(0o2002, registers.get_register(1));
        assert_eq!(0o100000, memory.read_word(0o2000).unwrap());
    }

    #[test]
    fn test_tst_immediate_is_readable() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o005727).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o005727, 0]);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert!(registers.z_flag_is_set());
        assert_eq!(1, log_line.extra_words());
    }
}
