use super::*;

pub fn com(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    let result = !destination.value & cpu_instruction.size.mask();
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, cpu_instruction.size);
    registers.set_v_flag(false);
    registers.set_c_flag(true);

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(result, cpu_instruction.size, registers),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_com() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o005101).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o005101]);
        registers.set_register(1, 0o177777);
        registers.set_v_flag(true);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0, registers.get_register(1));
        assert!(registers.z_flag_is_set());
        assert!(registers.c_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_comb_memory_byte() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o105111).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o105111]);
        memory.write_word(0o2000, 0o000252).unwrap();
        registers.set_register(1, 0o2000);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o000125, memory.read_word(0o2000).unwrap());
        assert!(!registers.n_flag_is_set());
        assert!(registers.c_flag_is_set());
    }
}
