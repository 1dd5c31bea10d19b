use super::*;

pub fn sub(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Write)?;
    let (result, borrow) = destination.value.overflowing_sub(source.value);
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, OperandSize::Word);
    registers.set_c_flag(borrow);
    // operands of different signs, result of the source sign
    registers.set_v_flag(
        (source.value ^ destination.value) & (destination.value ^ result) & 0x8000 != 0,
    );

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(result, OperandSize::Word, registers),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_sub() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o160102).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o160102]);
        registers.set_register(1, 0o000003);
        registers.set_register(2, 0o000010);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!("SUB".to_owned(), log_line.mnemonic);
        assert_eq!(0o000005, registers.get_register(2));
        assert!(!registers.c_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_sub_borrow() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o160102).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o160102]);
        registers.set_register(1, 0o000001);
        registers.set_register(2, 0o000000);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o177777, registers.get_register(2));
        assert!(registers.c_flag_is_set());
        assert!(registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_sub_overflow() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o160102).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o160102]);
        registers.set_register(1, 0o000001);
        registers.set_register(2, 0o100000);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o077777, registers.get_register(2));
        assert!(registers.v_flag_is_set());
        assert!(!registers.c_flag_is_set());
    }
}
