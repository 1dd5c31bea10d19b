use super::*;

pub fn asl(
    memory: &mut dyn AddressableIO,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let size = cpu_instruction.size;
    let destination = solve_single(memory, registers, cpu_instruction, Access::Write)?;
    let value = destination.value;
    let result = (value << 1) & size.mask();
    destination.commit(result, memory, registers)?;

    registers.set_nz_flags(result, size);
    registers.set_c_flag(size.is_negative(value));
    registers.set_v_flag(registers.n_flag_is_set() ^ registers.c_flag_is_set());

    Ok(LogLine::new(
        cpu_instruction,
        vec![destination],
        outcome(result, size, registers),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_asl() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o006301).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o006301]);
        registers.set_register(1, 0o140001);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o100002, registers.get_register(1));
        assert!(registers.c_flag_is_set());
        assert!(registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_aslb_shifts_out_bit_seven() {
        let cpu_instruction = CPUInstruction::decode(0o1000, 0o106311).unwrap();
        let (mut memory, mut registers) = get_stuff(0o1000, &[0o106311]);
        memory.write_word(0o2000, 0o000300).unwrap();
        registers.set_register(1, 0o2000);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0o000200, memory.read_word(0o2000).unwrap());
        assert!(registers.c_flag_is_set());
        assert!(registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }
}
