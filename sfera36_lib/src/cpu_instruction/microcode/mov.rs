use super::*;

pub fn mov(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let (source, destination) = solve_double(memory, registers, cpu_instruction, Access::Write)?;
    destination.commit(source.value, memory, registers)?;

    registers.set_nz_flags(source.value, cpu_instruction.size);
    registers.set_v_flag(false);
    if cpu_instruction.size == OperandSize::Byte {
        registers.set_c_flag(source.value & 0o200 != 0);
    }

    Ok(LogLine::new(
        cpu_instruction,
        vec![source, destination],
        outcome(source.value, cpu_instruction.size, registers),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_mov_immediate_to_register() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o012703).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o012703, 0o100000]);
        registers.set_c_flag(true);
        registers.set_v_flag(true);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!("MOV".to_owned(), log_line.mnemonic);
        assert_eq!(0o100000, registers.get_register(3));
        assert_eq!(1, log_line.extra_words());
        assert!(registers.n_flag_is_set());
        assert!(!registers.z_flag_is_set());
        assert!(!registers.v_flag_is_set());
        assert!(registers.c_flag_is_set());
        assert!(!log_line.jumped);
    }

    #[test]
    fn test_mov_to_pc_is_a_jump() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o012707).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o012707, 0o1000]);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert!(log_line.jumped);
        assert_eq!(0o1000, registers.program_counter());
    }

    #[test]
    fn test_movb_autoincrement_to_autodecrement() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o112142).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o112142]);
        memory.write_word(0o2000, 0o005177).unwrap();
        memory.write_word(0o3002, 0o055177).unwrap();
        registers.set_register(1, 0o2001);
        registers.set_register(2, 0o3003);
        registers.set_c_flag(true);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!("MOVB".to_owned(), log_line.mnemonic);
        assert_eq!(0o055012, memory.read_word(0o3002).unwrap());
        assert_eq!(0o2002, registers.get_register(1));
        assert_eq!(0o3002, registers.get_register(2));
        assert!(!registers.c_flag_is_set());
        assert!(!registers.n_flag_is_set());
    }

    #[test]
    fn test_movb_carry_is_source_bit_seven() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o110102).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o110102]);
        registers.set_register(1, 0o000200);
        registers.set_register(2, 0o177777);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o177600, registers.get_register(2));
        assert!(registers.c_flag_is_set());
        assert!(registers.n_flag_is_set());
    }

    #[test]
    fn test_mov_to_immediate_is_refused() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o010127).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o010127, 0o000001]);
        assert!(matches!(
            cpu_instruction.execute(&mut memory, &mut registers),
            Err(MicrocodeError::Resolution(_))
        ));
    }
}
